//! Typed service configuration, validated once at construction.

use crate::{Error, Result};

pub const DEFAULT_TODO_SOURCE_URL: &str = "https://dummyjson.com/todos";
pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.weatherapi.com";

/// Remote endpoints and credentials used by [`TodoService`](crate::service::TodoService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
  /// Full URL of the bulk todo listing.
  pub todo_source_url:  String,
  /// Scheme and host of the weather API; the path is appended per request.
  pub weather_base_url: String,
  pub weather_api_key:  String,
}

impl ServiceConfig {
  /// Build a config, rejecting blank values.
  pub fn new(
    todo_source_url: impl Into<String>,
    weather_base_url: impl Into<String>,
    weather_api_key: impl Into<String>,
  ) -> Result<Self> {
    let config = Self {
      todo_source_url:  todo_source_url.into(),
      weather_base_url: weather_base_url.into(),
      weather_api_key:  weather_api_key.into(),
    };
    config.validate()?;
    Ok(config)
  }

  /// Default remote endpoints with the given weather credential.
  pub fn with_api_key(weather_api_key: impl Into<String>) -> Result<Self> {
    Self::new(DEFAULT_TODO_SOURCE_URL, DEFAULT_WEATHER_BASE_URL, weather_api_key)
  }

  fn validate(&self) -> Result<()> {
    let checks = [
      ("todo_source_url", &self.todo_source_url),
      ("weather_base_url", &self.weather_base_url),
      ("weather_api_key", &self.weather_api_key),
    ];
    for (name, value) in checks {
      if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} must not be empty")));
      }
    }
    Ok(())
  }
}
