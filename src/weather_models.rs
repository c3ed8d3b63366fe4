//! Weather provider payloads and the snapshot projected from them.
//!
//! Provider structs mirror the OpenWeatherMap JSON with every optional field
//! defaulted, so decoding fails only when a field the projection needs is
//! absent.

use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::errors::AppError;

/// Forecast samples come every 3 hours; 40 of them cover 5 days.
pub const MAX_FORECAST_SAMPLES: usize = 40;
pub const FORECAST_DAYS: usize = 5;

// ============ Provider Payloads ============

/// A provider number passed through as sent: `85` stays `85`, `60.0` stays `60.0`.
/// Missing readings default to integer `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reading(Number);

impl Reading {
    pub fn value(&self) -> f64 {
        self.0.as_f64().unwrap_or(0.0)
    }
}

impl Default for Reading {
    fn default() -> Self {
        Reading(Number::from(0))
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    #[serde(default)]
    pub pressure: Reading,
    #[serde(default)]
    pub humidity: Reading,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: Reading,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Clouds {
    #[serde(default)]
    pub all: Reading,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "1h", default)]
    pub one_hour: Reading,
    #[serde(rename = "3h", default)]
    pub three_hours: Reading,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

/// `GET /data/2.5/weather`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub coord: Option<Coord>,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub clouds: Clouds,
    /// Metres; the provider omits it when visibility is unlimited.
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub rain: Option<Precipitation>,
    #[serde(default)]
    pub sys: Sys,
    pub dt: i64,
    /// Seconds east of UTC.
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub rain: Option<Precipitation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastCity {
    #[serde(default)]
    pub timezone: i32,
}

/// `GET /data/2.5/forecast`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub list: Vec<ForecastSample>,
    #[serde(default)]
    pub city: ForecastCity,
}

/// `GET /geo/1.0/direct` returns an array of these.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

// ============ Snapshot ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FloodRiskLevel {
    Low,
    Medium,
    High,
}

/// Rainfall in mm over the last hour, humidity in percent. Thresholds are strict.
pub fn flood_risk_level(rainfall: f64, humidity: f64) -> FloodRiskLevel {
    if rainfall > 50.0 || humidity > 90.0 {
        FloodRiskLevel::High
    } else if rainfall > 20.0 || humidity > 80.0 {
        FloodRiskLevel::Medium
    } else {
        FloodRiskLevel::Low
    }
}

pub fn flood_risk_message(level: FloodRiskLevel, rainfall: &Reading) -> String {
    match level {
        FloodRiskLevel::High => format!(
            "⚠️ PERINGATAN: Curah hujan tinggi ({}mm/jam). Waspada potensi banjir!",
            rainfall
        ),
        FloodRiskLevel::Medium => format!(
            "⚡ PERHATIAN: Curah hujan sedang ({}mm/jam). Pantau kondisi cuaca.",
            rainfall
        ),
        FloodRiskLevel::Low => "✅ Kondisi cuaca normal. Tidak ada peringatan banjir.".to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FloodRisk {
    pub level: FloodRiskLevel,
    pub rainfall: Reading,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    pub temp: i64,
    pub feels_like: i64,
    pub temp_min: i64,
    pub temp_max: i64,
    pub pressure: Reading,
    pub humidity: Reading,
    pub description: String,
    pub icon: String,
    /// km/h
    pub wind_speed: f64,
    pub wind_deg: Reading,
    pub clouds: Reading,
    /// km
    pub visibility: f64,
    pub rain_1h: Reading,
    pub rain_3h: Reading,
    pub sunrise: String,
    pub sunset: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyForecast {
    pub date: String,
    pub day: String,
    pub temp: i64,
    pub temp_min: i64,
    pub temp_max: i64,
    pub description: String,
    pub icon: String,
    pub humidity: Reading,
    pub wind_speed: f64,
    pub rain: Reading,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
    pub flood_risk: FloodRisk,
}

/// A geocoding hit under consideration. Only the location fields are returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityCandidate {
    pub name: String,
    pub country: String,
    pub state: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing)]
    pub priority: u8,
    #[serde(skip_serializing)]
    pub match_score: u8,
}

impl CityCandidate {
    pub fn from_result(result: GeocodingResult, priority: u8, match_score: u8) -> Self {
        Self {
            name: result.name,
            country: result.country,
            state: result.state.unwrap_or_default(),
            lat: result.lat,
            lon: result.lon,
            priority,
            match_score,
        }
    }
}

// ============ Projection ============

fn offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}

fn local_time(timestamp: i64, tz: FixedOffset) -> Result<DateTime<FixedOffset>, AppError> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(&tz))
        .ok_or_else(|| AppError::InvalidPayload(format!("timestamp {} out of range", timestamp)))
}

fn primary_condition(conditions: &[Condition]) -> Result<&Condition, AppError> {
    conditions
        .first()
        .ok_or_else(|| AppError::InvalidPayload("missing weather conditions".to_string()))
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn round_whole(value: f64) -> i64 {
    value.round() as i64
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// m/s to km/h, one decimal.
pub fn to_kmh(speed: f64) -> f64 {
    round_tenth(speed * 3.6)
}

/// Keeps the first sample of each calendar date, up to five dates.
pub fn daily_forecast(
    samples: &[ForecastSample],
    timezone_offset: i32,
) -> Result<Vec<DailyForecast>, AppError> {
    let tz = offset(timezone_offset);
    let mut days: Vec<DailyForecast> = Vec::with_capacity(FORECAST_DAYS);

    for sample in samples.iter().take(MAX_FORECAST_SAMPLES) {
        if days.len() >= FORECAST_DAYS {
            break;
        }
        let at = local_time(sample.dt, tz)?;
        let date = at.format("%Y-%m-%d").to_string();
        if days.iter().any(|d| d.date == date) {
            continue;
        }
        let condition = primary_condition(&sample.weather)?;
        days.push(DailyForecast {
            date,
            day: at.format("%A").to_string(),
            temp: round_whole(sample.main.temp),
            temp_min: round_whole(sample.main.temp_min),
            temp_max: round_whole(sample.main.temp_max),
            description: capitalize(&condition.description),
            icon: condition.icon.clone(),
            humidity: sample.main.humidity.clone(),
            wind_speed: to_kmh(sample.wind.speed),
            rain: sample
                .rain
                .as_ref()
                .map(|r| r.three_hours.clone())
                .unwrap_or_default(),
        });
    }

    Ok(days)
}

/// Builds the snapshot. `requested` is reported as the location when the
/// caller asked by coordinates; otherwise the provider's own `coord` is used.
pub fn build_snapshot(
    current: CurrentWeatherPayload,
    forecast: &ForecastPayload,
    requested: Option<(f64, f64)>,
) -> Result<WeatherSnapshot, AppError> {
    let (lat, lon) = match (requested, current.coord) {
        (Some(coords), _) => coords,
        (None, Some(coord)) => (coord.lat, coord.lon),
        (None, None) => {
            return Err(AppError::InvalidPayload(
                "missing coordinates for named city".to_string(),
            ))
        }
    };

    let tz = offset(current.timezone);
    let condition = primary_condition(&current.weather)?;
    let rain = current.rain.clone().unwrap_or_default();
    let rainfall = rain.one_hour.clone();
    let level = flood_risk_level(rainfall.value(), current.main.humidity.value());

    let current_block = CurrentConditions {
        temp: round_whole(current.main.temp),
        feels_like: round_whole(current.main.feels_like),
        temp_min: round_whole(current.main.temp_min),
        temp_max: round_whole(current.main.temp_max),
        pressure: current.main.pressure.clone(),
        humidity: current.main.humidity.clone(),
        description: capitalize(&condition.description),
        icon: condition.icon.clone(),
        wind_speed: to_kmh(current.wind.speed),
        wind_deg: current.wind.deg.clone(),
        clouds: current.clouds.all.clone(),
        visibility: current.visibility.unwrap_or(10_000.0) / 1000.0,
        rain_1h: rain.one_hour,
        rain_3h: rain.three_hours,
        sunrise: local_time(current.sys.sunrise, tz)?.format("%H:%M").to_string(),
        sunset: local_time(current.sys.sunset, tz)?.format("%H:%M").to_string(),
        timestamp: local_time(current.dt, tz)?
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    };

    Ok(WeatherSnapshot {
        location: Location {
            name: current.name,
            country: current.sys.country,
            lat,
            lon,
        },
        current: current_block,
        forecast: daily_forecast(&forecast.list, forecast.city.timezone)?,
        flood_risk: FloodRisk {
            level,
            message: flood_risk_message(level, &rainfall),
            rainfall,
        },
    })
}
