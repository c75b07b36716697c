//! Handlers for `/todo` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/todo` | Body: [`Item`]; any `id` is ignored |
//! | `PUT`    | `/todo` | Body: [`ItemPatch`]; 404 if `id` is unknown |
//! | `DELETE` | `/todo/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use todo_core::{
  TodoService,
  item::{Item, ItemId, ItemPatch},
  remote::RemoteSource,
  store::TodoStore,
};

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /todo`: returns the stored item with its assigned id.
pub async fn create<S, R>(
  State(service): State<Arc<TodoService<S, R>>>,
  Json(item): Json<Item>,
) -> Result<Json<Item>, ApiError>
where
  S: TodoStore,
  R: RemoteSource,
{
  Ok(Json(service.create(item).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /todo`: merge the body onto the stored item it names.
pub async fn update<S, R>(
  State(service): State<Arc<TodoService<S, R>>>,
  Json(patch): Json<ItemPatch>,
) -> Result<Json<Item>, ApiError>
where
  S: TodoStore,
  R: RemoteSource,
{
  service
    .update(patch)
    .await?
    .map(Json)
    .ok_or(ApiError::NotFound)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /todo/:id`
pub async fn delete_one<S, R>(
  State(service): State<Arc<TodoService<S, R>>>,
  Path(id): Path<ItemId>,
) -> Result<&'static str, ApiError>
where
  S: TodoStore,
  R: RemoteSource,
{
  service
    .delete(id)
    .await?
    .map(|_| "Item deleted successfully.")
    .ok_or(ApiError::NotFound)
}
