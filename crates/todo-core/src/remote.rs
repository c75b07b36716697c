//! The `RemoteSource` trait: outbound HTTP GET as seen by the service.
//!
//! Implemented by an HTTP client in `todo-server` and by scripted fakes in
//! tests. Each call is a single request: no retry, no caching.

use std::future::Future;

/// Fetches the raw body of a remote resource.
pub trait RemoteSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// GET `url` and return the response body. Non-success statuses are errors.
  fn get<'a>(
    &'a self,
    url: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
