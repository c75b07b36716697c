//! Item and category types: the records managed by the todo store.
//!
//! Identifiers are assigned by the store. A record that has not been persisted
//! carries `id: None`; there is no sentinel value for "unset".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of an [`Item`].
pub type ItemId = i64;

/// Store-assigned identifier of a [`Category`].
pub type CategoryId = i64;

/// Priority given to items that do not specify one.
pub const DEFAULT_PRIORITY: i32 = 3;

fn default_priority() -> i32 { DEFAULT_PRIORITY }

// ─── Category ────────────────────────────────────────────────────────────────

/// A label with an optional parent.
///
/// Categories form a tree through `parent_id`, referenced by id only. Nothing
/// validates that the chain is acyclic; the store treats it as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
  #[serde(default)]
  pub id:        Option<CategoryId>,
  pub title:     String,
  #[serde(default)]
  pub parent_id: Option<CategoryId>,
}

// ─── Item ────────────────────────────────────────────────────────────────────

/// A task record with scheduling, location, and weather attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
  #[serde(default)]
  pub id:                Option<ItemId>,
  /// Free-form description.
  pub todo:              String,
  #[serde(default)]
  pub completed:         bool,
  /// Owning user; never checked against anything.
  #[serde(default)]
  pub user_id:           i64,
  #[serde(default = "default_priority")]
  pub priority:          i32,
  #[serde(default)]
  pub due_date:          Option<DateTime<Utc>>,
  #[serde(default)]
  pub latitude:          Option<f64>,
  #[serde(default)]
  pub longitude:         Option<f64>,
  /// Set only by weather enrichment, together with `temperature`.
  #[serde(default)]
  pub weather_condition: Option<String>,
  /// Degrees Celsius.
  #[serde(default)]
  pub temperature:       Option<f64>,
  #[serde(default)]
  pub category_id:       Option<CategoryId>,
  #[serde(default)]
  pub category:          Option<Category>,
}

impl Item {
  /// An unpersisted item with every optional attribute absent.
  pub fn new(todo: impl Into<String>) -> Self {
    Self {
      id:                None,
      todo:              todo.into(),
      completed:         false,
      user_id:           0,
      priority:          DEFAULT_PRIORITY,
      due_date:          None,
      latitude:          None,
      longitude:         None,
      weather_condition: None,
      temperature:       None,
      category_id:       None,
      category:          None,
    }
  }

  /// Both coordinates, if both are stored.
  pub fn location(&self) -> Option<(f64, f64)> {
    Some((self.latitude?, self.longitude?))
  }
}

// ─── ItemPatch ───────────────────────────────────────────────────────────────

/// A partial update addressed to an existing item.
///
/// Every attribute other than `id` is optional. `None` (absent or JSON `null`)
/// leaves the stored value alone; `Some(false)` or `Some(0)` are real values
/// and overwrite. A patch cannot clear an optional attribute back to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
  /// Selects the record to update. Never copied onto it.
  pub id:                ItemId,
  #[serde(default)]
  pub todo:              Option<String>,
  #[serde(default)]
  pub completed:         Option<bool>,
  #[serde(default)]
  pub user_id:           Option<i64>,
  #[serde(default)]
  pub priority:          Option<i32>,
  #[serde(default)]
  pub due_date:          Option<DateTime<Utc>>,
  #[serde(default)]
  pub latitude:          Option<f64>,
  #[serde(default)]
  pub longitude:         Option<f64>,
  #[serde(default)]
  pub weather_condition: Option<String>,
  #[serde(default)]
  pub temperature:       Option<f64>,
  #[serde(default)]
  pub category_id:       Option<CategoryId>,
  #[serde(default)]
  pub category:          Option<Category>,
}

impl ItemPatch {
  /// A patch for `id` with every attribute absent.
  pub fn new(id: ItemId) -> Self { Self { id, ..Self::default() } }
}
