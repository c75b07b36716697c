//! Error types for `todo-core`.
//!
//! The service surfaces "not found" as `Ok(None)`, never as an error. What
//! remains splits into two buckets: [`Error::Conflict`] for writes the store
//! rejected, and everything else, which callers treat as unexpected.

use thiserror::Error;

use crate::store::StoreError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store rejected the write: {0}")]
  Conflict(#[source] BoxError),

  #[error("store error: {0}")]
  Store(#[source] BoxError),

  #[error("remote source error: {0}")]
  Remote(#[source] BoxError),

  #[error("malformed remote payload: {0}")]
  Payload(#[from] serde_json::Error),

  #[error("invalid configuration: {0}")]
  Config(String),
}

impl Error {
  /// Wrap a backend error in the bucket it classifies itself into.
  pub fn from_store<E: StoreError>(e: E) -> Self {
    if e.is_conflict() {
      Self::Conflict(Box::new(e))
    } else {
      Self::Store(Box::new(e))
    }
  }

  pub fn from_remote<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Remote(Box::new(e))
  }

  pub fn is_conflict(&self) -> bool { matches!(self, Self::Conflict(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
