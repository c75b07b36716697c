//! The `TodoStore` trait: persistence as seen by the service.
//!
//! The trait is implemented by storage backends (e.g. `todo-store-sqlite`).
//! The service depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  filter::ItemFilter,
  item::{Item, ItemId},
};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A backend error that knows whether it is a rejected write.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// `true` when the store refused a write (constraint violation and the
  /// like), as opposed to an internal failure.
  fn is_conflict(&self) -> bool;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a todo store backend.
///
/// Identifiers are assigned by the store on insert. Every read attaches the
/// item's [`Category`](crate::item::Category) when it has one.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait TodoStore: Send + Sync {
  type Error: StoreError;

  /// Retrieve an item by id. Returns `None` if not found.
  fn get_by_id(
    &self,
    id: ItemId,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// Insert one item and return it with its assigned id.
  ///
  /// Any id on `item` is ignored. An embedded category without an id is
  /// inserted and linked. An embedded category with an id only links to that
  /// existing category; its `title` and `parent_id` are not written.
  fn save_one(
    &self,
    item: Item,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Insert a batch atomically: either every item is stored or none is.
  fn save_many(
    &self,
    items: Vec<Item>,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  /// Overwrite the stored row identified by `item.id` and return the stored
  /// record.
  ///
  /// Categories link as in [`save_one`](Self::save_one): an existing category
  /// is referenced, never renamed, so the returned record carries the stored
  /// category's title.
  fn update(
    &self,
    item: Item,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Remove the stored row identified by `item.id`.
  fn delete(
    &self,
    item: Item,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Return the items matching `filter`, ordered by id, categories attached
  /// in the same query.
  fn list<'a>(
    &'a self,
    filter: &'a ItemFilter,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + 'a;
}
