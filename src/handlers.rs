use crate::articles::ARTICLES;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::*;
use crate::recommendations;
use crate::risk::{classify, generate_table, DisasterType, RiskAssessment};
use crate::services::{WeatherLocation, WeatherService};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration, read once at startup.
    pub config: Config,
    /// Client for the weather and geocoding provider.
    pub weather: WeatherService,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let weather = WeatherService::new(&config)?;
        Ok(Self { config, weather })
    }
}

/// Routes that go through rate limiting. Mounted under `/api`.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/calculate", post(calculate))
        .route("/truth-table", get(truth_table))
        .route("/calculate-flood", post(calculate_flood))
        .route("/calculate-earthquake", post(calculate_earthquake))
        .route("/calculate-combined", post(calculate_combined))
        .route("/truth-table/flood", get(flood_truth_table))
        .route("/truth-table/earthquake", get(earthquake_truth_table))
        .route("/weather", get(weather))
        .route("/weather/search", get(weather_search))
        .route("/articles", get(articles))
}

/// Full application router without transport middleware.
pub fn router(state: Arc<AppState>) -> Router {
    build_router(state, |routes| routes)
}

/// Builds the router, letting the caller wrap the rate-limited routes.
/// `/api/health` stays outside `protect`.
pub fn build_router<F>(state: Arc<AppState>, protect: F) -> Router
where
    F: FnOnce(Router<Arc<AppState>>) -> Router<Arc<AppState>>,
{
    let api = Router::new()
        .route("/health", get(health))
        .merge(protect(api_routes()));

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "Sistem Pakar Mitigasi Bencana Alam - Enhanced",
            "version": env!("CARGO_PKG_VERSION"),
            "features": ["flood", "earthquake", "combined"]
        })),
    )
}

pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Endpoint not found"
        })),
    )
}

fn assess(body: &serde_json::Value, disaster: DisasterType) -> RiskAssessment {
    let assessment = RiskAssessment::assess(disaster, factors_from_body(body, disaster));
    tracing::debug!(
        "{} assessment: {:?} -> {}",
        disaster.as_str(),
        assessment.factors,
        assessment.result
    );
    assessment
}

/// POST /api/calculate
///
/// Single-hazard flood evaluation with the classic per-row advice.
pub async fn calculate(body: Bytes) -> Result<Json<CalculateResponse>, AppError> {
    let body = parse_lenient(&body);
    let assessment = assess(&body, DisasterType::Flood);
    tracing::info!("POST /calculate - factors: {:?}", assessment.factors);

    let recommendation = recommendations::recommend_classic(&assessment)?;
    let f = assessment.factors;

    Ok(Json(CalculateResponse {
        success: true,
        p: f.p,
        q: f.q,
        r: f.r,
        q_or_r: assessment.intermediate,
        result: assessment.result,
        recommendation,
    }))
}

/// POST /api/calculate-flood
pub async fn calculate_flood(body: Bytes) -> Result<Json<HazardResponse>, AppError> {
    let body = parse_lenient(&body);
    let assessment = assess(&body, DisasterType::Flood);
    tracing::info!("POST /calculate-flood - factors: {:?}", assessment.factors);

    let recommendation = recommendations::recommend(&assessment)?;
    Ok(Json(HazardResponse::new(&assessment, recommendation)))
}

/// POST /api/calculate-earthquake
pub async fn calculate_earthquake(body: Bytes) -> Result<Json<HazardResponse>, AppError> {
    let body = parse_lenient(&body);
    let assessment = assess(&body, DisasterType::Earthquake);
    tracing::info!(
        "POST /calculate-earthquake - factors: {:?}",
        assessment.factors
    );

    let recommendation = recommendations::recommend(&assessment)?;
    Ok(Json(HazardResponse::new(&assessment, recommendation)))
}

/// POST /api/calculate-combined
///
/// Reads `p,q,r` and `e,b,l` from the same body and classifies the pair.
pub async fn calculate_combined(body: Bytes) -> Result<Json<CombinedResponse>, AppError> {
    let body = parse_lenient(&body);
    let flood = assess(&body, DisasterType::Flood);
    let quake = assess(&body, DisasterType::Earthquake);

    let summarize = |a: &RiskAssessment| -> Result<HazardSummary, AppError> {
        Ok(HazardSummary {
            variables: NamedFactors {
                disaster: a.disaster,
                factors: a.factors,
            },
            result: a.result,
            recommendation: recommendations::recommend(a)?,
        })
    };

    let combined_risk = classify(flood.result, quake.result);
    tracing::info!(
        "POST /calculate-combined - flood: {}, earthquake: {}, level: {:?}",
        flood.result,
        quake.result,
        combined_risk.level
    );

    Ok(Json(CombinedResponse {
        success: true,
        flood: summarize(&flood)?,
        earthquake: summarize(&quake)?,
        combined_risk,
    }))
}

/// GET /api/truth-table
pub async fn truth_table() -> Json<TruthTableResponse> {
    flood_truth_table().await
}

/// GET /api/truth-table/flood
pub async fn flood_truth_table() -> Json<TruthTableResponse> {
    Json(TruthTableResponse {
        success: true,
        table: generate_table(DisasterType::Flood),
    })
}

/// GET /api/truth-table/earthquake
pub async fn earthquake_truth_table() -> Json<TruthTableResponse> {
    Json(TruthTableResponse {
        success: true,
        table: generate_table(DisasterType::Earthquake),
    })
}

/// GET /api/weather?city=&lat=&lon=
///
/// Current conditions, 5-day forecast and a rainfall-based flood label.
pub async fn weather(
    State(state): State<Arc<AppState>>,
    query: Result<Query<WeatherQueryParams>, QueryRejection>,
) -> Result<Json<WeatherResponse>, AppError> {
    let Query(params) = query?;
    tracing::info!("GET /weather - params: {:?}", params);

    let location = WeatherLocation::resolve(params.coordinates(), params.city(), &state.config);
    let snapshot = state.weather.fetch_weather(&location).await?;

    Ok(Json(WeatherResponse {
        success: true,
        snapshot,
    }))
}

/// GET /api/weather/search?city=
pub async fn weather_search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CitySearchParams>, QueryRejection>,
) -> Result<Json<CitySearchResponse>, AppError> {
    let Query(params) = query?;
    tracing::info!("GET /weather/search - params: {:?}", params);

    let cities = state
        .weather
        .search_cities(params.city.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(CitySearchResponse {
        success: true,
        cities,
    }))
}

/// GET /api/articles
pub async fn articles() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "articles": &ARTICLES[..],
    }))
}
