//! Handler for `GET /todo/search`.
//!
//! Every parameter is optional; supplied ones are combined with AND.

use std::{fmt::Display, str::FromStr, sync::Arc};

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de};
use todo_core::{TodoService, item::Item, remote::RemoteSource, store::TodoStore};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
  /// Case-sensitive substring of the item text.
  pub title:    Option<String>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub priority: Option<i32>,
  /// Exact RFC 3339 instant.
  #[serde(default, deserialize_with = "empty_as_none")]
  pub due_date: Option<DateTime<Utc>>,
}

/// Parse a query value, treating `key=` the same as an absent key.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: FromStr,
  T::Err: Display,
{
  match Option::<String>::deserialize(deserializer)? {
    Some(raw) if !raw.is_empty() => raw.parse().map(Some).map_err(de::Error::custom),
    _ => Ok(None),
  }
}

/// `GET /todo/search[?title=...][&priority=...][&dueDate=...]`
///
/// An empty array is a normal result.
pub async fn handler<S, R>(
  State(service): State<Arc<TodoService<S, R>>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Item>>, ApiError>
where
  S: TodoStore,
  R: RemoteSource,
{
  let items = service
    .search(params.title.as_deref(), params.priority, params.due_date)
    .await?;
  Ok(Json(items))
}

#[cfg(test)]
mod tests {
  use axum::{extract::Query, http::Uri};
  use chrono::TimeZone;

  use super::*;

  fn parse(uri: &'static str) -> SearchParams {
    Query::<SearchParams>::try_from_uri(&Uri::from_static(uri)).unwrap().0
  }

  #[test]
  fn empty_values_are_not_supplied() {
    let params = parse("/todo/search?title=&priority=&dueDate=");
    assert_eq!(params.title.as_deref(), Some(""));
    assert_eq!(params.priority, None);
    assert_eq!(params.due_date, None);
  }

  #[test]
  fn supplied_values_are_parsed() {
    let params = parse("/todo/search?priority=2&dueDate=2024-12-01T00:00:00Z");
    assert_eq!(params.priority, Some(2));
    assert_eq!(params.due_date, Some(Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap()));
  }

  #[test]
  fn malformed_priority_is_rejected() {
    let uri = Uri::from_static("/todo/search?priority=high");
    assert!(Query::<SearchParams>::try_from_uri(&uri).is_err());
  }
}
