use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::weather_models::*;

/// Country code searched first and favoured when ranking.
pub const HOME_COUNTRY: &str = "ID";
pub const MAX_CITY_RESULTS: usize = 5;
const SCOPED_LIMIT: u32 = 10;
const GLOBAL_LIMIT: u32 = 15;

/// Where to fetch weather for, after resolving the request parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherLocation {
    Coordinates { lat: f64, lon: f64 },
    City(String),
}

impl WeatherLocation {
    /// Explicit coordinates, then the requested city, then the configured
    /// default city, then the default coordinates.
    pub fn resolve(coordinates: Option<(f64, f64)>, city: Option<&str>, config: &Config) -> Self {
        if let Some((lat, lon)) = coordinates {
            return WeatherLocation::Coordinates { lat, lon };
        }
        if let Some(city) = city.or(config.default_city.as_deref()) {
            return WeatherLocation::City(city.to_string());
        }
        WeatherLocation::Coordinates {
            lat: config.default_lat,
            lon: config.default_lon,
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            WeatherLocation::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
            WeatherLocation::City(name) => vec![("q", name.clone())],
        }
    }
}

/// Client for the OpenWeatherMap current, forecast and geocoding APIs.
#[derive(Clone)]
pub struct WeatherService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    weather_timeout: Duration,
    search_timeout: Duration,
}

impl WeatherService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create weather client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.openweather_base_url.trim_end_matches('/').to_string(),
            api_key: config.openweather_api_key.clone(),
            weather_timeout: config.weather_timeout,
            search_timeout: config.search_timeout,
        })
    }

    fn api_key(&self) -> Result<&str, AppError> {
        self.api_key.as_deref().ok_or(AppError::MissingApiKey)
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, AppError> {
        Url::parse_with_params(&format!("{}{}", self.base_url, path), params)
            .map_err(|e| AppError::InternalError(format!("Failed to build URL: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        timeout: Duration,
    ) -> Result<T, AppError> {
        // Redact the key from logs
        tracing::debug!("GET {}{}?[REDACTED]", self.base_url, url.path());

        let response = self.client.get(url).timeout(timeout).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Weather provider returned error {}: {}", status, error_text);
            return Err(AppError::GatewayFailure(format!(
                "provider returned status {}: {}",
                status, error_text
            )));
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetches current conditions and the 5-day forecast, then projects them.
    pub async fn fetch_weather(
        &self,
        location: &WeatherLocation,
    ) -> Result<WeatherSnapshot, AppError> {
        let api_key = self.api_key()?;

        let mut params = location.query();
        params.push(("appid", api_key.to_string()));
        params.push(("units", "metric".to_string()));
        params.push(("lang", "id".to_string()));

        let current_url = self.url("/data/2.5/weather", &params)?;
        let forecast_url = self.url("/data/2.5/forecast", &params)?;

        tracing::info!("Fetching weather for {:?}", location);

        let (current, forecast) = tokio::try_join!(
            async {
                self.get_json::<CurrentWeatherPayload>(current_url, self.weather_timeout)
                    .await
                    .context("Current weather request")
            },
            async {
                self.get_json::<ForecastPayload>(forecast_url, self.weather_timeout)
                    .await
                    .context("Forecast request")
            },
        )?;

        let requested = match location {
            WeatherLocation::Coordinates { lat, lon } => Some((*lat, *lon)),
            WeatherLocation::City(_) => None,
        };
        let snapshot = build_snapshot(current, &forecast, requested)?;

        tracing::info!(
            "Weather for {}, {}: flood risk {:?}",
            snapshot.location.name,
            snapshot.location.country,
            snapshot.flood_risk.level
        );
        Ok(snapshot)
    }

    async fn geocode(&self, query: &str, limit: u32) -> Result<Vec<GeocodingResult>, AppError> {
        let url = self.url(
            "/geo/1.0/direct",
            &[
                ("q", query.to_string()),
                ("limit", limit.to_string()),
                ("appid", self.api_key()?.to_string()),
            ],
        )?;
        self.get_json(url, self.search_timeout).await
    }

    /// Ranked city search: home-country hits first, then global results.
    pub async fn search_cities(&self, city: &str) -> Result<Vec<CityCandidate>, AppError> {
        self.api_key()?;

        let city = city.trim();
        if city.is_empty() {
            return Err(AppError::BadRequest("City parameter is required".to_string()));
        }
        let query = city.to_lowercase();

        tracing::info!("Searching for city: '{}'", city);

        let scoped = self
            .geocode(&format!("{},{}", city, HOME_COUNTRY), SCOPED_LIMIT)
            .await
            .context("Home-country geocoding")?;
        tracing::debug!("Found {} results from {} search", scoped.len(), HOME_COUNTRY);
        let mut candidates = score_scoped(&query, scoped);

        if candidates.len() < MAX_CITY_RESULTS {
            let global = self
                .geocode(city, GLOBAL_LIMIT)
                .await
                .with_context(|| format!("Global geocoding for '{}'", city))?;
            tracing::debug!("Found {} results from global search", global.len());
            merge_global(&mut candidates, &query, global);
        }

        let ranked = rank(candidates);
        match ranked.first() {
            Some(top) => {
                tracing::info!(
                    "Top result: {}, {} (priority: {}, score: {})",
                    top.name,
                    top.country,
                    top.priority,
                    top.match_score
                );
                Ok(ranked)
            }
            None => {
                tracing::warn!("No cities found for: '{}'", city);
                Err(AppError::NotFound(format!("City \"{}\" not found", city)))
            }
        }
    }
}

fn is_exact(result: &GeocodingResult, query_lower: &str) -> bool {
    result.name.to_lowercase() == query_lower
}

/// Scores results of the home-country query.
pub fn score_scoped(query_lower: &str, results: Vec<GeocodingResult>) -> Vec<CityCandidate> {
    results
        .into_iter()
        .map(|result| {
            let (priority, score) = if is_exact(&result, query_lower) {
                (0, 100)
            } else {
                (1, 50)
            };
            CityCandidate::from_result(result, priority, score)
        })
        .collect()
}

/// Adds global results whose coordinates are not already present.
pub fn merge_global(
    candidates: &mut Vec<CityCandidate>,
    query_lower: &str,
    results: Vec<GeocodingResult>,
) {
    for result in results {
        if candidates
            .iter()
            .any(|c| c.lat == result.lat && c.lon == result.lon)
        {
            continue;
        }
        let exact = is_exact(&result, query_lower);
        let home = result.country == HOME_COUNTRY;
        let (priority, score) = match (exact, home) {
            (true, true) => (0, 100),
            (true, false) => (1, 90),
            (false, true) => (2, 60),
            (false, false) => (3, 30),
        };
        candidates.push(CityCandidate::from_result(result, priority, score));
    }
}

/// Sorts by priority, then higher score, then name, and keeps the top five.
pub fn rank(mut candidates: Vec<CityCandidate>) -> Vec<CityCandidate> {
    candidates.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.match_score.cmp(&a.match_score))
            .then_with(|| a.name.cmp(&b.name))
    });
    candidates.truncate(MAX_CITY_RESULTS);
    candidates
}
