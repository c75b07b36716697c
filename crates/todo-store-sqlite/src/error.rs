//! Error type for `todo-store-sqlite`.

use rusqlite::ErrorCode;
use thiserror::Error;
use todo_core::{item::ItemId, store::StoreError};

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Update or delete addressed a row that does not exist.
  #[error("item not found: {0}")]
  ItemNotFound(ItemId),

  /// Update or delete of an item that was never persisted.
  #[error("item has no identifier")]
  Unpersisted,
}

impl StoreError for Error {
  fn is_conflict(&self) -> bool {
    match self {
      Error::Database(tokio_rusqlite::Error::Rusqlite(e)) => {
        e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation)
      }
      _ => false,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
