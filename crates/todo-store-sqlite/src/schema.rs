//! SQL schema for the todo SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- parent_id is a bare reference: no foreign key, no cycle check.
CREATE TABLE IF NOT EXISTS categories (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    title     TEXT NOT NULL,
    parent_id INTEGER
);

-- AUTOINCREMENT keeps ids of deleted rows from being handed out again.
CREATE TABLE IF NOT EXISTS items (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    todo              TEXT    NOT NULL,
    completed         INTEGER NOT NULL DEFAULT 0,
    user_id           INTEGER NOT NULL DEFAULT 0,
    priority          INTEGER NOT NULL DEFAULT 3,
    due_date          TEXT,            -- RFC 3339 UTC
    latitude          REAL,
    longitude         REAL,
    weather_condition TEXT,
    temperature       REAL,            -- degrees Celsius
    category_id       INTEGER REFERENCES categories(id)
);

CREATE INDEX IF NOT EXISTS items_priority_idx ON items(priority);
CREATE INDEX IF NOT EXISTS items_due_idx      ON items(due_date);
CREATE INDEX IF NOT EXISTS items_category_idx ON items(category_id);

PRAGMA user_version = 1;
";
