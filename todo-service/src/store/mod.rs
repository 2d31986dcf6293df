//! Storage layer for todo records.
//!
//! # Design
//! Handlers only see `TodoStore`, injected as `Arc<dyn TodoStore>` router
//! state. Lookups return `Option` so "not found" is an explicit signal from
//! storage. Ids are always assigned here, never by the caller.

mod memory;
mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{bson::oid::ObjectId, error::ErrorKind};
use thiserror::Error;

use crate::models::{CreateTodo, Todo, UpdateTodo};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

pub type SharedStore = Arc<dyn TodoStore>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(mongodb::error::Error),

    #[error("insert did not return an object id")]
    MissingId,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<mongodb::error::Error> for StoreError {
    /// Connection-level failures (no reachable server, socket errors) become
    /// `Unavailable`; everything else is kept as the driver reported it.
    fn from(e: mongodb::error::Error) -> Self {
        let unreachable = matches!(
            e.kind.as_ref(),
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_)
        );
        if unreachable {
            StoreError::Unavailable(e.to_string())
        } else {
            StoreError::Database(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Outcome of an update, mirroring the driver's matched count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a new record and return the id storage assigned to it.
    async fn insert(&self, input: CreateTodo) -> Result<ObjectId>;

    async fn list(&self) -> Result<Vec<Todo>>;

    async fn find(&self, id: ObjectId) -> Result<Option<Todo>>;

    /// Set the fields present in `changes` on the record keyed by `id`,
    /// upserting if it has vanished since the caller looked it up.
    async fn update(&self, id: ObjectId, changes: &UpdateTodo) -> Result<UpdateOutcome>;

    /// Atomically fetch and remove one record.
    async fn delete(&self, id: ObjectId) -> Result<Option<Todo>>;
}
