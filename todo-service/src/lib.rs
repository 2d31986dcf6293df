//! HTTP service exposing CRUD operations over todo records.
//!
//! # Overview
//! Each request is validated, turned into a single storage call, and the
//! result is wrapped in a `{status, ...}` JSON envelope. The storage handle
//! is the only state shared between requests; it is injected as router
//! state so tests can swap MongoDB for `MemoryStore`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

use std::{any::Any, future::Future};

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub use config::Config;
pub use error::ApiError;
pub use models::{CreateTodo, Todo, UpdateTodo};
pub use store::{MemoryStore, MongoStore, SharedStore, StoreError, TodoStore};

pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .fallback(handlers::fallback)
        .with_state(store)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    run_with_shutdown(listener, store, std::future::pending::<()>()).await
}

pub async fn run_with_shutdown<F>(
    listener: TcpListener,
    store: SharedStore,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}

fn panic_response(_: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    ApiError::Internal.into_response()
}
