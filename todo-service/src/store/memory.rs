use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{Result, TodoStore, UpdateOutcome};
use crate::models::{CreateTodo, Todo, UpdateTodo};

/// In-process store backed by a shared map. Used by tests and `--in-memory`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    todos: Arc<RwLock<HashMap<ObjectId, Todo>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert(&self, input: CreateTodo) -> Result<ObjectId> {
        let todo = Todo {
            id: ObjectId::new(),
            title: input.title,
            description: input.description,
            completed: input.completed,
        };
        let id = todo.id;
        self.todos.write().await.insert(id, todo);
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.values().cloned().collect())
    }

    async fn find(&self, id: ObjectId) -> Result<Option<Todo>> {
        Ok(self.todos.read().await.get(&id).cloned())
    }

    async fn update(&self, id: ObjectId, changes: &UpdateTodo) -> Result<UpdateOutcome> {
        let mut todos = self.todos.write().await;
        match todos.get_mut(&id) {
            Some(todo) => {
                changes.apply_to(todo);
                Ok(UpdateOutcome { matched: 1 })
            }
            None => {
                // upsert
                let mut todo = Todo {
                    id,
                    title: String::new(),
                    description: String::new(),
                    completed: false,
                };
                changes.apply_to(&mut todo);
                todos.insert(id, todo);
                Ok(UpdateOutcome { matched: 0 })
            }
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<Option<Todo>> {
        Ok(self.todos.write().await.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> CreateTodo {
        CreateTodo {
            title: title.to_string(),
            ..CreateTodo::default()
        }
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert(input("a")).await.unwrap();
        let b = store.insert(input("b")).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_record_is_still_found() {
        let store = MemoryStore::new();
        let id = store.insert(CreateTodo::default()).await.unwrap();
        let found = store.find(id).await.unwrap().expect("record exists");
        assert_eq!(found.title, "");
        assert_eq!(found.description, "");
    }

    #[tokio::test]
    async fn update_reports_match_and_merges() {
        let store = MemoryStore::new();
        let id = store.insert(input("keep me")).await.unwrap();
        let changes = UpdateTodo {
            completed: Some(true),
            ..UpdateTodo::default()
        };
        let outcome = store.update(id, &changes).await.unwrap();
        assert_eq!(outcome.matched, 1);

        let todo = store.find(id).await.unwrap().unwrap();
        assert_eq!(todo.title, "keep me");
        assert!(todo.completed);
    }

    #[tokio::test]
    async fn update_of_missing_record_upserts_without_match() {
        let store = MemoryStore::new();
        let id = ObjectId::new();
        let changes = UpdateTodo {
            title: Some("late".to_string()),
            ..UpdateTodo::default()
        };
        let outcome = store.update(id, &changes).await.unwrap();
        assert_eq!(outcome.matched, 0);
        assert_eq!(store.find(id).await.unwrap().unwrap().title, "late");
    }

    #[tokio::test]
    async fn delete_returns_removed_record_once() {
        let store = MemoryStore::new();
        let id = store.insert(input("gone")).await.unwrap();
        assert_eq!(store.delete(id).await.unwrap().unwrap().title, "gone");
        assert!(store.delete(id).await.unwrap().is_none());
        assert!(store.find(id).await.unwrap().is_none());
    }
}
