//! JSON REST API for the todo service.
//!
//! Exposes an axum [`Router`] backed by any [`TodoService`]. TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", todo_api::api_router(service.clone()))
//! ```

pub mod error;
pub mod fetch;
pub mod search;
pub mod todos;
pub mod weather;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use todo_core::{TodoService, remote::RemoteSource, store::TodoStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, R>(service: Arc<TodoService<S, R>>) -> Router<()>
where
  S: TodoStore + 'static,
  R: RemoteSource + 'static,
{
  Router::new()
    .route("/todo", post(todos::create::<S, R>).put(todos::update::<S, R>))
    .route("/todo/fetch", get(fetch::handler::<S, R>))
    .route("/todo/search", get(search::handler::<S, R>))
    .route("/todo/{id}", delete(todos::delete_one::<S, R>))
    .route("/todo/{id}/weather", get(weather::handler::<S, R>))
    .with_state(service)
}
