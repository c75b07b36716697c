//! HTTP server assembly for the todo service.
//!
//! Wires the SQLite store and the HTTP remote client into a
//! [`TodoService`], and mounts the JSON API under `/api`.

pub mod remote;

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use serde::Deserialize;
use todo_core::{
  ServiceConfig, TodoService,
  config::{DEFAULT_TODO_SOURCE_URL, DEFAULT_WEATHER_BASE_URL},
  remote::RemoteSource,
  store::TodoStore,
};
use tower_http::trace::TraceLayer;

pub use remote::{HttpRemote, RemoteError};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `TODO_*`
/// environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  pub todo_source_url:  String,
  pub weather_base_url: String,
  pub weather_api_key:  String,
}

impl ServerConfig {
  /// Layer defaults, the optional file at `path`, and the environment.
  ///
  /// Environment wins, e.g. `TODO_WEATHER_API_KEY=...`.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 5080_i64)?
      .set_default("store_path", "todo.db")?
      .set_default("todo_source_url", DEFAULT_TODO_SOURCE_URL)?
      .set_default("weather_base_url", DEFAULT_WEATHER_BASE_URL)?
      .add_source(config::File::from(path.into()).required(false))
      .add_source(config::Environment::with_prefix("TODO"))
      .build()?
      .try_deserialize()
  }

  /// The validated service portion of the configuration.
  pub fn service_config(&self) -> todo_core::Result<ServiceConfig> {
    ServiceConfig::new(
      self.todo_source_url.clone(),
      self.weather_base_url.clone(),
      self.weather_api_key.clone(),
    )
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: the API under `/api`, with request
/// tracing.
pub fn router<S, R>(service: Arc<TodoService<S, R>>) -> Router
where
  S: TodoStore + 'static,
  R: RemoteSource + 'static,
{
  Router::new()
    .nest("/api", todo_api::api_router(service))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Mutex;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use thiserror::Error;
  use todo_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  #[derive(Debug, Error)]
  #[error("no route for {0}")]
  struct Unrouted(String);

  /// Answers by URL prefix and records every request.
  #[derive(Clone, Default)]
  struct StubRemote {
    routes: Vec<(&'static str, String)>,
    calls:  Arc<Mutex<Vec<String>>>,
  }

  impl StubRemote {
    fn route(mut self, prefix: &'static str, body: impl Into<String>) -> Self {
      self.routes.push((prefix, body.into()));
      self
    }

    fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }
  }

  impl RemoteSource for StubRemote {
    type Error = Unrouted;

    async fn get(&self, url: &str) -> Result<String, Unrouted> {
      self.calls.lock().unwrap().push(url.to_owned());
      self
        .routes
        .iter()
        .find(|(prefix, _)| url.starts_with(prefix))
        .map(|(_, body)| body.clone())
        .ok_or_else(|| Unrouted(url.to_owned()))
    }
  }

  const TODOS_URL: &str = "http://todos.test/todos";
  const WEATHER_URL: &str = "http://weather.test";

  const LISTING: &str = r#"{"todos":[
    {"id":1,"todo":"Do something nice for someone you care about","completed":false,"userId":152},
    {"id":2,"todo":"Memorize a poem","completed":true,"userId":13},
    {"id":3,"todo":"Watch a classic movie","completed":true,"userId":68}
  ],"total":254,"skip":0,"limit":3}"#;

  async fn make_app(remote: StubRemote) -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let config = ServiceConfig::new(TODOS_URL, WEATHER_URL, "test-key").unwrap();
    router(Arc::new(TodoService::new(store, remote, config)))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
  }

  fn json(body: &str) -> Value { serde_json::from_str(body).unwrap() }

  // ── Create ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_store_assigned_id() {
    let app = make_app(StubRemote::default()).await;
    let (status, body) = send(
      &app,
      "POST",
      "/api/todo",
      Some(json!({ "id": 99, "todo": "New ToDo", "priority": 2 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let item = json(&body);
    assert_eq!(item["id"], 1);
    assert_eq!(item["priority"], 2);
    assert_eq!(item["completed"], false);
  }

  #[tokio::test]
  async fn create_with_unknown_category_returns_400() {
    let app = make_app(StubRemote::default()).await;
    let (status, body) = send(
      &app,
      "POST",
      "/api/todo",
      Some(json!({ "todo": "Dangling", "categoryId": 42 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["message"], "Database update failed.");
  }

  // ── Update ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_changes_only_present_fields() {
    let app = make_app(StubRemote::default()).await;
    send(
      &app,
      "POST",
      "/api/todo",
      Some(json!({ "todo": "Existing ToDo", "priority": 3, "completed": true })),
    )
    .await;

    let (status, body) =
      send(&app, "PUT", "/api/todo", Some(json!({ "id": 1, "priority": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    let item = json(&body);
    assert_eq!(item["priority"], 1);
    assert_eq!(item["completed"], true);
    assert_eq!(item["todo"], "Existing ToDo");
  }

  #[tokio::test]
  async fn update_explicit_false_overwrites() {
    let app = make_app(StubRemote::default()).await;
    send(&app, "POST", "/api/todo", Some(json!({ "todo": "Done", "completed": true }))).await;

    let (_, body) =
      send(&app, "PUT", "/api/todo", Some(json!({ "id": 1, "completed": false }))).await;
    assert_eq!(json(&body)["completed"], false);
  }

  #[tokio::test]
  async fn update_with_unknown_category_returns_400() {
    let app = make_app(StubRemote::default()).await;
    send(&app, "POST", "/api/todo", Some(json!({ "todo": "Filed" }))).await;

    let (status, body) =
      send(&app, "PUT", "/api/todo", Some(json!({ "id": 1, "categoryId": 99 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["message"], "Database update failed.");

    let (_, body) = send(&app, "GET", "/api/todo/search", None).await;
    assert_eq!(json(&body)[0]["categoryId"], Value::Null);
  }

  #[tokio::test]
  async fn update_unknown_item_returns_404() {
    let app = make_app(StubRemote::default()).await;
    let (status, body) =
      send(&app, "PUT", "/api/todo", Some(json!({ "id": 7, "todo": "ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Item does not exist.");
  }

  // ── Delete ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_existing_then_missing() {
    let app = make_app(StubRemote::default()).await;
    send(&app, "POST", "/api/todo", Some(json!({ "todo": "To be deleted" }))).await;

    let (status, body) = send(&app, "DELETE", "/api/todo/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Item deleted successfully.");

    let (status, _) = send(&app, "DELETE", "/api/todo/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/api/todo/search", None).await;
    assert_eq!(json(&body), json!([]));
  }

  // ── Search ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_combines_criteria() {
    let app = make_app(StubRemote::default()).await;
    send(
      &app,
      "POST",
      "/api/todo",
      Some(json!({
        "todo": "Buy milk",
        "priority": 1,
        "dueDate": "2024-12-01T00:00:00Z",
        "category": { "title": "Errands" }
      })),
    )
    .await;
    send(&app, "POST", "/api/todo", Some(json!({ "todo": "Sell car", "priority": 1 }))).await;

    let (status, body) = send(&app, "GET", "/api/todo/search?title=Buy", None).await;
    assert_eq!(status, StatusCode::OK);
    let found = json(&body);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["category"]["title"], "Errands");

    let (_, body) = send(&app, "GET", "/api/todo/search?priority=1", None).await;
    assert_eq!(json(&body).as_array().unwrap().len(), 2);

    let (_, body) = send(
      &app,
      "GET",
      "/api/todo/search?priority=1&dueDate=2024-12-01T00:00:00Z",
      None,
    )
    .await;
    assert_eq!(json(&body)[0]["todo"], "Buy milk");

    let (status, body) = send(&app, "GET", "/api/todo/search?title=Rent", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!([]));
  }

  #[tokio::test]
  async fn search_treats_empty_parameters_as_absent() {
    let app = make_app(StubRemote::default()).await;
    send(&app, "POST", "/api/todo", Some(json!({ "todo": "Buy milk", "priority": 1 }))).await;
    send(&app, "POST", "/api/todo", Some(json!({ "todo": "Sell car" }))).await;

    let (status, body) =
      send(&app, "GET", "/api/todo/search?title=&priority=&dueDate=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body).as_array().unwrap().len(), 2);

    let (status, body) = send(&app, "GET", "/api/todo/search?title=Buy&priority=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)[0]["todo"], "Buy milk");
    assert_eq!(json(&body).as_array().unwrap().len(), 1);
  }

  // ── Fetch ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn fetch_imports_with_fresh_ids_and_duplicates_on_repeat() {
    let remote = StubRemote::default().route(TODOS_URL, LISTING);
    let app = make_app(remote.clone()).await;
    send(&app, "POST", "/api/todo", Some(json!({ "todo": "local" }))).await;

    let (status, body) = send(&app, "GET", "/api/todo/fetch", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Fetched and stored ToDo items successfully.");

    let (_, body) = send(&app, "GET", "/api/todo/search", None).await;
    let all = json(&body);
    let ids: Vec<_> = all.as_array().unwrap().iter().map(|i| i["id"].clone()).collect();
    assert_eq!(ids, vec![json!(1), json!(2), json!(3), json!(4)]);
    assert_eq!(all[0]["todo"], "local");

    send(&app, "GET", "/api/todo/fetch", None).await;
    let (_, body) = send(&app, "GET", "/api/todo/search?title=poem", None).await;
    assert_eq!(json(&body).as_array().unwrap().len(), 2);
    assert_eq!(remote.calls(), vec![TODOS_URL.to_owned(), TODOS_URL.to_owned()]);
  }

  #[tokio::test]
  async fn fetch_upstream_failure_returns_500() {
    let app = make_app(StubRemote::default()).await;
    let (status, body) = send(&app, "GET", "/api/todo/fetch", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body)["message"], "An unexpected error occurred.");
  }

  // ── Weather ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn weather_enriches_located_item() {
    let remote = StubRemote::default().route(
      WEATHER_URL,
      r#"{"current":{"temp_c":18.3,"condition":{"text":"Patchy rain nearby"}}}"#,
    );
    let app = make_app(remote.clone()).await;
    send(
      &app,
      "POST",
      "/api/todo",
      Some(json!({ "todo": "Walk the dog", "latitude": 40.71, "longitude": -74.0 })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/todo/1/weather", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
      json(&body),
      json!({ "todo": "Walk the dog", "weatherCondition": "Patchy rain nearby", "temperature": 18.3 })
    );
    assert_eq!(
      remote.calls(),
      vec![format!("{WEATHER_URL}/v1/current.json?key=test-key&q=40.71,-74")]
    );

    let (_, body) = send(&app, "GET", "/api/todo/search?title=dog", None).await;
    assert_eq!(json(&body)[0]["weatherCondition"], "Patchy rain nearby");
  }

  #[tokio::test]
  async fn weather_without_location_returns_404_without_request() {
    let remote = StubRemote::default();
    let app = make_app(remote.clone()).await;
    send(&app, "POST", "/api/todo", Some(json!({ "todo": "Indoors", "latitude": 1.0 }))).await;

    let (status, body) = send(&app, "GET", "/api/todo/1/weather", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Item does not exist.");
    assert!(remote.calls().is_empty());
  }

  #[tokio::test]
  async fn weather_unknown_item_returns_404() {
    let app = make_app(StubRemote::default()).await;
    let (status, _) = send(&app, "GET", "/api/todo/5/weather", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Configuration ────────────────────────────────────────────────────────────

  #[test]
  fn blank_api_key_fails_validation() {
    let cfg = ServerConfig {
      host:             "127.0.0.1".into(),
      port:             5080,
      store_path:       PathBuf::from(":memory:"),
      todo_source_url:  TODOS_URL.into(),
      weather_base_url: WEATHER_URL.into(),
      weather_api_key:  String::new(),
    };
    assert!(cfg.service_config().is_err());
  }
}
