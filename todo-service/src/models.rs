//! Wire and domain types for the todo service.
//!
//! # Design
//! `Todo` is the record as handlers see it: the storage-assigned `ObjectId`
//! plus the three user fields. On the wire the id travels as its 24-char hex
//! form under `"id"`, and the description keeps its historical `"des"` key.
//! Every response is wrapped in a `{status, ...}` envelope; the envelope
//! structs below are `Deserialize` as well so tests can read them back.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A single todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(with = "hex_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(rename = "des")]
    pub description: String,
    pub completed: bool,
}

/// Request payload for creating a todo. Missing fields take their defaults;
/// any client-supplied id is ignored because there is no field to bind it to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "des")]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for updating a todo. Only the fields present in the JSON
/// are written; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "des")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Apply the present fields to `todo` in place.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = description.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
}

/// `GET /todos` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub status: Status,
    pub todos: Vec<Todo>,
}

/// `POST /todos` response carrying the storage-assigned id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub status: Status,
    #[serde(rename = "_id", with = "hex_id")]
    pub id: ObjectId,
}

/// `GET /todos/{id}` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct Item {
    pub status: Status,
    pub item: Todo,
}

/// Envelope carrying only a human-readable message, used for update/delete
/// confirmations and for every failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub status: Status,
    pub message: String,
}

impl Message {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failure,
            message: message.into(),
        }
    }
}

/// Serialize an `ObjectId` as its plain hex string rather than BSON's
/// extended-JSON `{"$oid": ...}` form.
mod hex_id {
    use mongodb::bson::oid::ObjectId;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ObjectId, D::Error> {
        let hex = String::deserialize(deserializer)?;
        ObjectId::parse_str(&hex).map_err(D::Error::custom)
    }
}
