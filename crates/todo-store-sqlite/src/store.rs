//! The SQLite implementation of [`TodoStore`].

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _, params, params_from_iter};
use todo_core::{
  filter::ItemFilter,
  item::{Category, CategoryId, Item, ItemId},
  store::TodoStore,
};

use crate::{
  Error, Result,
  encode::{ITEM_COLUMNS, RawItem, encode_criterion, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A todo store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row helpers ─────────────────────────────────────────────────────────────
//
// These run on the database thread, inside `Connection::call`.

fn select_item(conn: &Connection, id: ItemId) -> rusqlite::Result<Option<RawItem>> {
  conn
    .query_row(
      &format!(
        "SELECT {ITEM_COLUMNS}
         FROM items i
         LEFT JOIN categories c ON c.id = i.category_id
         WHERE i.id = ?1"
      ),
      params![id],
      RawItem::from_row,
    )
    .optional()
}

/// Read back a row written earlier in the same transaction.
fn reload_item(conn: &Connection, id: ItemId) -> rusqlite::Result<RawItem> {
  select_item(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

/// Resolve the category an item should point at.
///
/// An embedded category without an id is inserted first. An embedded category
/// with an id wins over `category_id`; only its id is used, the row itself is
/// left as stored.
fn link_category(conn: &Connection, item: &Item) -> rusqlite::Result<Option<CategoryId>> {
  match &item.category {
    Some(Category { id: None, title, parent_id }) => {
      conn.execute(
        "INSERT INTO categories (title, parent_id) VALUES (?1, ?2)",
        params![title, parent_id],
      )?;
      Ok(Some(conn.last_insert_rowid()))
    }
    Some(Category { id: Some(id), .. }) => Ok(Some(*id)),
    None => Ok(item.category_id),
  }
}

fn insert_item(conn: &Connection, item: &Item) -> rusqlite::Result<ItemId> {
  let category_id = link_category(conn, item)?;
  conn.execute(
    "INSERT INTO items (
       todo, completed, user_id, priority, due_date,
       latitude, longitude, weather_condition, temperature, category_id
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    params![
      item.todo,
      item.completed,
      item.user_id,
      item.priority,
      item.due_date.map(encode_dt),
      item.latitude,
      item.longitude,
      item.weather_condition,
      item.temperature,
      category_id,
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

/// Returns the number of rows changed (0 or 1).
fn update_item(conn: &Connection, id: ItemId, item: &Item) -> rusqlite::Result<usize> {
  let category_id = link_category(conn, item)?;
  conn.execute(
    "UPDATE items SET
       todo = ?1, completed = ?2, user_id = ?3, priority = ?4, due_date = ?5,
       latitude = ?6, longitude = ?7, weather_condition = ?8, temperature = ?9,
       category_id = ?10
     WHERE id = ?11",
    params![
      item.todo,
      item.completed,
      item.user_id,
      item.priority,
      item.due_date.map(encode_dt),
      item.latitude,
      item.longitude,
      item.weather_condition,
      item.temperature,
      category_id,
      id,
    ],
  )
}

// ─── TodoStore impl ──────────────────────────────────────────────────────────

impl TodoStore for SqliteStore {
  type Error = Error;

  async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>> {
    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| Ok(select_item(conn, id)?))
      .await?;

    raw.map(RawItem::into_item).transpose()
  }

  async fn save_one(&self, item: Item) -> Result<Item> {
    let raw: RawItem = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let id = insert_item(&tx, &item)?;
        let raw = reload_item(&tx, id)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.into_item()
  }

  async fn save_many(&self, items: Vec<Item>) -> Result<Vec<Item>> {
    let raws: Vec<RawItem> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut raws = Vec::with_capacity(items.len());
        for item in &items {
          let id = insert_item(&tx, item)?;
          raws.push(reload_item(&tx, id)?);
        }
        tx.commit()?;
        Ok(raws)
      })
      .await?;

    raws.into_iter().map(RawItem::into_item).collect()
  }

  async fn update(&self, item: Item) -> Result<Item> {
    let id = item.id.ok_or(Error::Unpersisted)?;

    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if update_item(&tx, id, &item)? == 0 {
          // Dropping the transaction rolls back any category just inserted.
          return Ok(None);
        }
        let raw = reload_item(&tx, id)?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.ok_or(Error::ItemNotFound(id))?.into_item()
  }

  async fn delete(&self, item: Item) -> Result<()> {
    let id = item.id.ok_or(Error::Unpersisted)?;

    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute("DELETE FROM items WHERE id = ?1", params![id])?))
      .await?;

    if changed == 0 {
      return Err(Error::ItemNotFound(id));
    }
    Ok(())
  }

  async fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>> {
    let (conds, values): (Vec<&'static str>, Vec<_>) =
      filter.criteria().iter().map(encode_criterion).unzip();

    let raws: Vec<RawItem> = self
      .conn
      .call(move |conn| {
        // Build WHERE clause dynamically.
        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!(
          "SELECT {ITEM_COLUMNS}
           FROM items i
           LEFT JOIN categories c ON c.id = i.category_id
           {where_clause}
           ORDER BY i.id"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(values.iter()), RawItem::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawItem::into_item).collect()
  }
}
