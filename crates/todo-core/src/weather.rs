//! Weather source payload and request construction.

use serde::Deserialize;

/// Body returned by the weather source's `current.json` endpoint.
///
/// Only the fields the service copies onto an item are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherResponse {
  pub current: WeatherCurrent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCurrent {
  pub temp_c:    f64,
  pub condition: WeatherCondition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
  pub text: String,
}

/// URL of the current-conditions request for a coordinate pair.
pub fn current_conditions_url(
  base_url: &str,
  api_key: &str,
  latitude: f64,
  longitude: f64,
) -> String {
  format!(
    "{}/v1/current.json?key={api_key}&q={latitude},{longitude}",
    base_url.trim_end_matches('/'),
  )
}
