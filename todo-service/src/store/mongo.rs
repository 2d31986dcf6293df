use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{ClientOptions, UpdateOptions},
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use super::{Result, StoreError, TodoStore, UpdateOutcome};
use crate::models::{CreateTodo, Todo, UpdateTodo};

/// Stored shape of a todo. Fields absent from older documents decode to
/// their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    des: String,
    #[serde(default)]
    completed: bool,
}

/// Insert shape; `_id` is left for the driver to assign.
#[derive(Debug, Serialize)]
struct NewTodoDocument {
    title: String,
    des: String,
    completed: bool,
}

impl From<TodoDocument> for Todo {
    fn from(doc: TodoDocument) -> Self {
        Todo {
            id: doc.id,
            title: doc.title,
            description: doc.des,
            completed: doc.completed,
        }
    }
}

impl From<CreateTodo> for NewTodoDocument {
    fn from(input: CreateTodo) -> Self {
        NewTodoDocument {
            title: input.title,
            des: input.description,
            completed: input.completed,
        }
    }
}

/// `$set` body for the fields present in `changes`.
fn set_document(changes: &UpdateTodo) -> Document {
    let mut set = Document::new();
    if let Some(title) = &changes.title {
        set.insert("title", title.as_str());
    }
    if let Some(description) = &changes.description {
        set.insert("des", description.as_str());
    }
    if let Some(completed) = changes.completed {
        set.insert("completed", completed);
    }
    set
}

/// Driver options for `uri`. `timeout` bounds server selection for every
/// operation and connection establishment for every pooled connection, for
/// the life of the client, including the startup ping.
async fn client_options(uri: &str, timeout: Duration) -> Result<ClientOptions> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some("todo-service".to_string());
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);
    Ok(options)
}

/// MongoDB-backed store. The driver's client is pooled and cheap to clone,
/// so one instance is shared by every request.
#[derive(Clone)]
pub struct MongoStore {
    todos: Collection<TodoDocument>,
}

impl MongoStore {
    /// Connect and ping the database. A failed ping fails startup.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::with_options(client_options(uri, timeout).await?)?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }, None).await?;
        tracing::info!(database, collection, "connected to MongoDB");

        Ok(Self {
            todos: db.collection::<TodoDocument>(collection),
        })
    }
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn insert(&self, input: CreateTodo) -> Result<ObjectId> {
        let result = self
            .todos
            .clone_with_type::<NewTodoDocument>()
            .insert_one(NewTodoDocument::from(input), None)
            .await?;
        result.inserted_id.as_object_id().ok_or(StoreError::MissingId)
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        let cursor = self.todos.find(doc! {}, None).await?;
        let docs: Vec<TodoDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Todo::from).collect())
    }

    async fn find(&self, id: ObjectId) -> Result<Option<Todo>> {
        let doc = self.todos.find_one(doc! { "_id": id }, None).await?;
        Ok(doc.map(Todo::from))
    }

    async fn update(&self, id: ObjectId, changes: &UpdateTodo) -> Result<UpdateOutcome> {
        if changes.is_empty() {
            // $set rejects an empty document; nothing to write.
            let matched = self.find(id).await?.map_or(0, |_| 1);
            return Ok(UpdateOutcome { matched });
        }
        let set = set_document(changes);

        let options = UpdateOptions::builder().upsert(true).build();
        let result = self
            .todos
            .update_one(doc! { "_id": id }, doc! { "$set": set }, options)
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
        })
    }

    async fn delete(&self, id: ObjectId) -> Result<Option<Todo>> {
        let doc = self
            .todos
            .find_one_and_delete(doc! { "_id": id }, None)
            .await?;
        Ok(doc.map(Todo::from))
    }
}
