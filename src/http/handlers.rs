//! `/todos` routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::error::ApiError;
use crate::model::TodoItem;
use crate::service::TodoService;

pub fn todo_routes(service: Arc<TodoService>) -> Router {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    responses((status = 200, description = "Every todo item", body = [TodoItem]))
)]
pub async fn list_todos(
    State(service): State<Arc<TodoService>>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    Ok(Json(service.get_all().await?))
}

#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "The todo item", body = TodoItem),
        (status = 404, description = "No todo with this id")
    )
)]
pub async fn get_todo(
    State(service): State<Arc<TodoService>>,
    Path(id): Path<i64>,
) -> Result<Json<TodoItem>, ApiError> {
    service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// No field is validated; an empty object creates an empty item.
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = TodoItem,
    responses((status = 201, description = "Created"))
)]
pub async fn create_todo(
    State(service): State<Arc<TodoService>>,
    Json(item): Json<TodoItem>,
) -> Result<StatusCode, ApiError> {
    service.add(item).await?;
    Ok(StatusCode::CREATED)
}

/// The path id replaces whatever id the body carries.
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo id")),
    request_body = TodoItem,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "No todo with this id")
    )
)]
pub async fn update_todo(
    State(service): State<Arc<TodoService>>,
    Path(id): Path<i64>,
    Json(mut item): Json<TodoItem>,
) -> Result<StatusCode, ApiError> {
    item.id = Some(id);
    service.update(item).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No todo with this id")
    )
)]
pub async fn delete_todo(
    State(service): State<Arc<TodoService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
