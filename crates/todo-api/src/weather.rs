//! Handler for `GET /todo/:id/weather`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use serde::Serialize;
use todo_core::{
  TodoService,
  item::{Item, ItemId},
  remote::RemoteSource,
  store::TodoStore,
};

use crate::error::ApiError;

/// The slice of an enriched item returned to the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherView {
  pub todo:              String,
  pub weather_condition: Option<String>,
  pub temperature:       Option<f64>,
}

impl From<Item> for WeatherView {
  fn from(item: Item) -> Self {
    Self {
      todo:              item.todo,
      weather_condition: item.weather_condition,
      temperature:       item.temperature,
    }
  }
}

/// `GET /todo/:id/weather`: fetch and store current weather for the item.
///
/// Answers 404 both for an unknown id and for an item without coordinates.
pub async fn handler<S, R>(
  State(service): State<Arc<TodoService<S, R>>>,
  Path(id): Path<ItemId>,
) -> Result<Json<WeatherView>, ApiError>
where
  S: TodoStore,
  R: RemoteSource,
{
  service
    .enrich(id)
    .await?
    .map(|item| Json(WeatherView::from(item)))
    .ok_or(ApiError::NotFound)
}
