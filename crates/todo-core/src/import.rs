//! Bulk ingestion from the remote todo source.

use serde::Deserialize;

use crate::item::Item;

/// Body returned by the remote todo source.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoListResponse {
  pub todos: Vec<Item>,
  #[serde(default)]
  pub total: u64,
  #[serde(default)]
  pub skip:  u64,
  #[serde(default)]
  pub limit: u64,
}

/// Strip foreign identifiers so the store assigns fresh ones.
///
/// Nothing else is touched, and nothing is deduplicated against local
/// records: importing the same batch twice stores it twice.
pub fn normalize_for_import(items: Vec<Item>) -> Vec<Item> {
  items
    .into_iter()
    .map(|mut item| {
      item.id = None;
      item
    })
    .collect()
}
