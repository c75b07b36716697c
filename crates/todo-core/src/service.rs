//! `TodoService`: the use cases behind every endpoint.
//!
//! The service holds no state of its own beyond configuration. Each call is a
//! short sequence of store and remote operations with no locking: two
//! concurrent updates of one item both read the same row and the later write
//! wins.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
  Error, Result,
  config::ServiceConfig,
  filter::compose_filter,
  import::{TodoListResponse, normalize_for_import},
  item::{Item, ItemId, ItemPatch},
  merge::merge,
  remote::RemoteSource,
  store::TodoStore,
  weather::{WeatherResponse, current_conditions_url},
};

/// Coordinates the store and the remote sources.
pub struct TodoService<S, R> {
  store:  S,
  remote: R,
  config: ServiceConfig,
}

impl<S, R> TodoService<S, R>
where
  S: TodoStore,
  R: RemoteSource,
{
  pub fn new(store: S, remote: R, config: ServiceConfig) -> Self {
    Self { store, remote, config }
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn config(&self) -> &ServiceConfig { &self.config }

  // ── Create ────────────────────────────────────────────────────────────────

  /// Store a new item. Caller-supplied ids (on the item and on an embedded
  /// category) are discarded so the store assigns fresh ones.
  pub async fn create(&self, mut item: Item) -> Result<Item> {
    item.id = None;
    if let Some(category) = item.category.as_mut() {
      category.id = None;
    }

    let stored = self.store.save_one(item).await.map_err(Error::from_store)?;
    info!(id = ?stored.id, "created item");
    Ok(stored)
  }

  // ── Update ────────────────────────────────────────────────────────────────

  /// Merge `patch` onto the stored item it names. `None` if there is no such
  /// item.
  pub async fn update(&self, patch: ItemPatch) -> Result<Option<Item>> {
    let Some(existing) = self.fetch(patch.id).await? else {
      return Ok(None);
    };

    // The stored embedded category would otherwise override a new reference.
    let repoints_category = patch.category_id.is_some() && patch.category.is_none();
    let mut merged = merge(existing, patch);
    if repoints_category {
      merged.category = None;
    }

    let stored = self.store.update(merged).await.map_err(Error::from_store)?;
    info!(id = ?stored.id, "updated item");
    Ok(Some(stored))
  }

  // ── Delete ────────────────────────────────────────────────────────────────

  /// Remove an item, returning what was removed. `None` if there was nothing
  /// to remove.
  pub async fn delete(&self, id: ItemId) -> Result<Option<Item>> {
    let Some(existing) = self.fetch(id).await? else {
      return Ok(None);
    };

    self
      .store
      .delete(existing.clone())
      .await
      .map_err(Error::from_store)?;
    info!(id, "deleted item");
    Ok(Some(existing))
  }

  // ── Search ────────────────────────────────────────────────────────────────

  /// Items matching every supplied criterion. An empty result is not an
  /// error.
  pub async fn search(
    &self,
    title: Option<&str>,
    priority: Option<i32>,
    due_date: Option<DateTime<Utc>>,
  ) -> Result<Vec<Item>> {
    let filter = compose_filter(title, priority, due_date);
    let items = self.store.list(&filter).await.map_err(Error::from_store)?;
    debug!(criteria = filter.criteria().len(), found = items.len(), "searched items");
    Ok(items)
  }

  // ── Import ────────────────────────────────────────────────────────────────

  /// Fetch the remote todo listing and store it as new items. Returns the
  /// number of items stored.
  ///
  /// The batch is saved atomically. Re-running the import stores duplicates.
  pub async fn collect_todos(&self) -> Result<usize> {
    let body = self
      .remote
      .get(&self.config.todo_source_url)
      .await
      .map_err(Error::from_remote)?;
    let listing: TodoListResponse = serde_json::from_str(&body)?;
    debug!(
      received = listing.todos.len(),
      total = listing.total,
      skip = listing.skip,
      limit = listing.limit,
      "fetched remote todos"
    );

    let items = normalize_for_import(listing.todos);
    let saved = self.store.save_many(items).await.map_err(Error::from_store)?;
    info!(count = saved.len(), "imported remote todos");
    Ok(saved.len())
  }

  // ── Weather enrichment ────────────────────────────────────────────────────

  /// Look up current weather at the item's stored location and persist it on
  /// the item.
  ///
  /// Returns `None` both when the item does not exist and when it lacks a
  /// coordinate; no request is made in either case. Every call re-fetches, so
  /// repeated calls may store different values.
  pub async fn enrich(&self, id: ItemId) -> Result<Option<Item>> {
    let Some(mut item) = self.fetch(id).await? else {
      return Ok(None);
    };
    let Some((latitude, longitude)) = item.location() else {
      debug!(id, "item has no location, skipping weather lookup");
      return Ok(None);
    };

    let url = current_conditions_url(
      &self.config.weather_base_url,
      &self.config.weather_api_key,
      latitude,
      longitude,
    );
    let body = self.remote.get(&url).await.map_err(Error::from_remote)?;
    let weather: WeatherResponse = serde_json::from_str(&body)?;

    item.weather_condition = Some(weather.current.condition.text);
    item.temperature = Some(weather.current.temp_c);

    let stored = self.store.update(item).await.map_err(Error::from_store)?;
    info!(
      id,
      condition = stored.weather_condition.as_deref(),
      temperature = stored.temperature,
      "stored weather for item"
    );
    Ok(Some(stored))
  }

  async fn fetch(&self, id: ItemId) -> Result<Option<Item>> {
    let item = self.store.get_by_id(id).await.map_err(Error::from_store)?;
    if item.is_none() {
      debug!(id, "item not found");
    }
    Ok(item)
  }
}
