//! The reqwest implementation of [`RemoteSource`].

use reqwest::{Client, StatusCode};
use thiserror::Error;
use todo_core::remote::RemoteSource;

#[derive(Debug, Error)]
pub enum RemoteError {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("GET {url} failed: {source}")]
  Request {
    url:    String,
    #[source]
    source: reqwest::Error,
  },

  #[error("GET {url} → {status}")]
  Status { url: String, status: StatusCode },
}

/// Outbound HTTP GET with the client's default timeouts and no retries.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpRemote {
  client: Client,
}

impl HttpRemote {
  pub fn new() -> Result<Self, RemoteError> {
    let client = Client::builder()
      .user_agent(concat!("todo-server/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(RemoteError::Client)?;
    Ok(Self { client })
  }
}

/// Drop the query string, which may carry credentials, before a URL is
/// logged or reported.
fn redact(url: &str) -> &str { url.split_once('?').map_or(url, |(base, _)| base) }

impl RemoteSource for HttpRemote {
  type Error = RemoteError;

  async fn get(&self, url: &str) -> Result<String, RemoteError> {
    let target = redact(url).to_owned();
    tracing::debug!(url = %target, "GET remote source");

    let request_failed = |source: reqwest::Error| RemoteError::Request {
      url:    target.clone(),
      source: source.without_url(),
    };

    let resp = self.client.get(url).send().await.map_err(request_failed)?;

    let status = resp.status();
    if !status.is_success() {
      return Err(RemoteError::Status { url: target.clone(), status });
    }
    resp.text().await.map_err(request_failed)
  }
}
