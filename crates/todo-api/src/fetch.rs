//! Handler for `GET /todo/fetch`: import the remote todo listing.

use std::sync::Arc;

use axum::extract::State;
use todo_core::{TodoService, remote::RemoteSource, store::TodoStore};

use crate::error::ApiError;

/// `GET /todo/fetch`
///
/// Every call stores the whole listing again; items are not deduplicated.
pub async fn handler<S, R>(
  State(service): State<Arc<TodoService<S, R>>>,
) -> Result<&'static str, ApiError>
where
  S: TodoStore,
  R: RemoteSource,
{
  service.collect_todos().await?;
  Ok("Fetched and stored ToDo items successfully.")
}
