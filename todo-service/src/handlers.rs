use axum::{
    extract::{FromRequest, FromRequestParts, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;
use crate::models::{CreateTodo, Created, Item, Message, Status, TodoList, UpdateTodo};
use crate::store::SharedStore;

/// JSON body extractor whose rejection renders as a failure envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Path extractor whose rejection (e.g. a segment that is not valid UTF-8)
/// renders as the invalid-id envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

/// Parse a path segment into an `ObjectId`. Runs before any storage access.
fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| {
        tracing::warn!(id = raw, "invalid todo id");
        ApiError::InvalidId
    })
}

pub async fn list_todos(State(store): State<SharedStore>) -> Result<Json<TodoList>, ApiError> {
    let todos = store.list().await?;
    Ok(Json(TodoList {
        status: Status::Success,
        todos,
    }))
}

pub async fn create_todo(
    State(store): State<SharedStore>,
    JsonBody(input): JsonBody<CreateTodo>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let id = store.insert(input).await?;
    tracing::info!(%id, "created todo");
    Ok((
        StatusCode::CREATED,
        Json(Created {
            status: Status::Success,
            id,
        }),
    ))
}

pub async fn get_todo(
    State(store): State<SharedStore>,
    IdPath(raw_id): IdPath<String>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_id(&raw_id)?;
    let item = store.find(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(Item {
        status: Status::Success,
        item,
    }))
}

pub async fn update_todo(
    State(store): State<SharedStore>,
    IdPath(raw_id): IdPath<String>,
    JsonBody(changes): JsonBody<UpdateTodo>,
) -> Result<Json<Message>, ApiError> {
    let id = parse_id(&raw_id)?;
    if store.find(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let outcome = store.update(id, &changes).await?;
    if outcome.matched == 0 {
        tracing::warn!(%id, "update matched no record");
        return Err(ApiError::UpdateFailed);
    }

    tracing::info!(%id, "updated todo");
    Ok(Json(Message::success("Updated todo successfully!")))
}

pub async fn delete_todo(
    State(store): State<SharedStore>,
    IdPath(raw_id): IdPath<String>,
) -> Result<Json<Message>, ApiError> {
    let id = parse_id(&raw_id)?;
    store.delete(id).await?.ok_or(ApiError::NotFound)?;
    tracing::info!(%id, "deleted todo");
    Ok(Json(Message::success("Deleted todo successfully!")))
}

pub async fn fallback() -> ApiError {
    ApiError::RouteNotFound
}
