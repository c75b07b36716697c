//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings in UTC, so equal instants encode
//! to equal strings and exact-match filters can compare text.

use chrono::{DateTime, Utc};
use rusqlite::{Row, types::Value};
use todo_core::{
  filter::Criterion,
  item::{Category, CategoryId, Item, ItemId},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Criterion ───────────────────────────────────────────────────────────────

/// SQL predicate and bound value for one search criterion.
///
/// `instr` keeps the title test case-sensitive, unlike `LIKE`.
pub fn encode_criterion(c: &Criterion) -> (&'static str, Value) {
  match c {
    Criterion::TitleContains(t) => ("instr(i.todo, ?) > 0", Value::Text(t.clone())),
    Criterion::PriorityEquals(p) => ("i.priority = ?", Value::Integer(i64::from(*p))),
    Criterion::DueDateEquals(d) => ("i.due_date = ?", Value::Text(encode_dt(*d))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Columns selected by every item read, in order. The category is joined in
/// the same query.
pub const ITEM_COLUMNS: &str = "
  i.id, i.todo, i.completed, i.user_id, i.priority, i.due_date,
  i.latitude, i.longitude, i.weather_condition, i.temperature, i.category_id,
  c.id, c.title, c.parent_id";

/// Raw values read directly from an `items` row joined with `categories`.
pub struct RawItem {
  // items columns
  pub id:                ItemId,
  pub todo:              String,
  pub completed:         bool,
  pub user_id:           i64,
  pub priority:          i32,
  pub due_date:          Option<String>,
  pub latitude:          Option<f64>,
  pub longitude:         Option<f64>,
  pub weather_condition: Option<String>,
  pub temperature:       Option<f64>,
  pub category_id:       Option<CategoryId>,
  // categories join
  pub cat_id:            Option<CategoryId>,
  pub cat_title:         Option<String>,
  pub cat_parent_id:     Option<CategoryId>,
}

impl RawItem {
  /// Read a row selected with [`ITEM_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      todo:              row.get(1)?,
      completed:         row.get(2)?,
      user_id:           row.get(3)?,
      priority:          row.get(4)?,
      due_date:          row.get(5)?,
      latitude:          row.get(6)?,
      longitude:         row.get(7)?,
      weather_condition: row.get(8)?,
      temperature:       row.get(9)?,
      category_id:       row.get(10)?,
      cat_id:            row.get(11)?,
      cat_title:         row.get(12)?,
      cat_parent_id:     row.get(13)?,
    })
  }

  pub fn into_item(self) -> Result<Item> {
    let due_date = self.due_date.as_deref().map(decode_dt).transpose()?;

    let category = match (self.cat_id, self.cat_title) {
      (Some(id), Some(title)) => Some(Category {
        id: Some(id),
        title,
        parent_id: self.cat_parent_id,
      }),
      _ => None,
    };

    Ok(Item {
      id: Some(self.id),
      todo: self.todo,
      completed: self.completed,
      user_id: self.user_id,
      priority: self.priority,
      due_date,
      latitude: self.latitude,
      longitude: self.longitude,
      weather_condition: self.weather_condition,
      temperature: self.temperature,
      category_id: self.category_id,
      category,
    })
  }
}
