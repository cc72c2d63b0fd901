//! `OpenMeteo` geocoding and forecast client
//!
//! Neither endpoint needs an API key. Requests go through a retrying
//! middleware client; transient failures are retried with exponential backoff.

use std::time::{Duration, Instant};

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::WeatherLookup;
use crate::config::WeatherDeskConfig;
use crate::models::{CurrentConditions, Location, PlaceSuggestion};
use crate::{Result, WeatherDeskError};

/// Weather API client for `OpenMeteo`
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    geocoding_base_url: String,
    forecast_base_url: String,
    suggestion_count: u32,
    language: String,
}

impl OpenMeteoClient {
    /// Create a new client from configuration
    pub fn new(config: &WeatherDeskConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.http.timeout_seconds.into());

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.http.user_agent.clone())
            .build()
            .map_err(|e| WeatherDeskError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.http.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            geocoding_base_url: config.geocoding.base_url.trim_end_matches('/').to_string(),
            forecast_base_url: config.forecast.base_url.trim_end_matches('/').to_string(),
            suggestion_count: config.geocoding.suggestion_count,
            language: config.geocoding.language.clone(),
        })
    }

    /// Query the geocoding search endpoint
    #[instrument(skip(self))]
    pub async fn search_places(&self, name: &str, count: u32) -> Result<Vec<PlaceSuggestion>> {
        let url = format!(
            "{}/search?name={}&count={}&language={}&format=json",
            self.geocoding_base_url,
            urlencoding::encode(name),
            count,
            urlencoding::encode(&self.language)
        );

        let response: GeocodingResponse = self.get_json(&url).await?;

        let places: Vec<PlaceSuggestion> = response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(PlaceSuggestion::from)
            .collect();

        if places.is_empty() {
            debug!("No geocoding results for '{}'", name);
        } else {
            debug!(
                "Geocoding results: {:?}",
                places
                    .iter()
                    .map(|p| format!("{} ({:.4}, {:.4})", p.name, p.latitude, p.longitude))
                    .collect::<Vec<_>>()
            );
        }

        Ok(places)
    }

    /// Current temperature and weather code at the given coordinates
    #[instrument(skip(self))]
    pub async fn fetch_current(&self, lat: f64, lon: f64) -> Result<CurrentConditions> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current=temperature_2m,weather_code&timezone=auto",
            self.forecast_base_url, lat, lon
        );

        let response: ForecastResponse = self.get_json(&url).await?;

        response
            .current
            .map(|current| CurrentConditions {
                temperature: current.temperature,
                weather_code: current.weather_code,
            })
            .ok_or_else(|| {
                WeatherDeskError::api(format!(
                    "No current weather data available for {lat:.4},{lon:.4}"
                ))
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("OpenMeteo API request URL: {}", url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherDeskError::network(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.reason)
                .unwrap_or(body);
            warn!("OpenMeteo returned {}: {}", status, reason);
            return Err(WeatherDeskError::network(format!("HTTP {status}: {reason}")));
        }

        let parsed = response
            .json::<T>()
            .await
            .map_err(|e| WeatherDeskError::api(format!("Invalid response from OpenMeteo: {e}")))?;

        let total_duration = start_time.elapsed();
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow API response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        } else {
            debug!("API response in {:.3}s", total_duration.as_secs_f64());
        }

        Ok(parsed)
    }
}

impl WeatherLookup for OpenMeteoClient {
    async fn suggest(&self, name: &str) -> Result<Vec<PlaceSuggestion>> {
        self.search_places(name, self.suggestion_count)
            .await
            .map_err(|e| WeatherDeskError::suggestion(name, e.to_string()))
    }

    async fn resolve(&self, name: &str) -> Result<Option<Location>> {
        let top = self.search_places(name, 1).await?.into_iter().next();
        match &top {
            Some(place) => info!("Resolved '{}' to {}", name, place.name),
            None => warn!("No results found for location '{}'", name),
        }
        Ok(top.map(Location::from))
    }

    async fn current_conditions(&self, location: &Location) -> Result<CurrentConditions> {
        let conditions = self
            .fetch_current(location.latitude, location.longitude)
            .await?;
        info!(
            "Current weather for {}: {:.1}°C, code {}",
            location.name, conditions.temperature, conditions.weather_code
        );
        Ok(conditions)
    }
}

/// Geocoding response; `results` is absent when nothing matches
#[derive(Debug, serde::Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, serde::Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

impl From<GeocodingResult> for PlaceSuggestion {
    fn from(result: GeocodingResult) -> Self {
        Self {
            name: result.name,
            admin_region: result.admin1,
            country: result.country,
            latitude: result.latitude,
            longitude: result.longitude,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ForecastResponse {
    current: Option<CurrentData>,
}

#[derive(Debug, serde::Deserialize)]
struct CurrentData {
    #[serde(rename = "temperature_2m")]
    temperature: f64,
    weather_code: i64,
}

/// Body of a 4xx answer, e.g. `{"error": true, "reason": "..."}`
#[derive(Debug, serde::Deserialize)]
struct ErrorResponse {
    reason: String,
}
