//! Round trip against a real MongoDB. Run with
//! `MONGODB_URI=mongodb://localhost:27017 cargo test -- --ignored`.

use std::time::Duration;

use mongodb::bson::oid::ObjectId;
use todo_service::{CreateTodo, MongoStore, TodoStore, UpdateTodo};

async fn connect() -> MongoStore {
    let uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let collection = format!("todos_test_{}", ObjectId::new());
    MongoStore::connect(&uri, "todo_service_test", &collection, Duration::from_secs(5))
        .await
        .expect("connect to MongoDB")
}

#[tokio::test]
#[ignore = "requires a running MongoDB (set MONGODB_URI)"]
async fn mongo_store_round_trip() {
    let store = connect().await;

    let id = store
        .insert(CreateTodo {
            title: "buy milk".to_string(),
            description: "2%".to_string(),
            completed: false,
        })
        .await
        .unwrap();

    let todo = store.find(id).await.unwrap().expect("inserted record");
    assert_eq!(todo.title, "buy milk");
    assert_eq!(todo.description, "2%");
    assert!(!todo.completed);

    let changes = UpdateTodo {
        completed: Some(true),
        ..UpdateTodo::default()
    };
    assert_eq!(store.update(id, &changes).await.unwrap().matched, 1);
    let todo = store.find(id).await.unwrap().unwrap();
    assert_eq!(todo.title, "buy milk");
    assert!(todo.completed);

    assert_eq!(store.update(id, &UpdateTodo::default()).await.unwrap().matched, 1);
    assert_eq!(store.list().await.unwrap().len(), 1);

    assert!(store.delete(id).await.unwrap().is_some());
    assert!(store.delete(id).await.unwrap().is_none());
    assert!(store.find(id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a running MongoDB (set MONGODB_URI)"]
async fn mongo_store_update_of_missing_record_upserts() {
    let store = connect().await;
    let id = ObjectId::new();

    let changes = UpdateTodo {
        title: Some("late".to_string()),
        ..UpdateTodo::default()
    };
    assert_eq!(store.update(id, &changes).await.unwrap().matched, 0);
    assert_eq!(store.find(id).await.unwrap().unwrap().title, "late");
}
