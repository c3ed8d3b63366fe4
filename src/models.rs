use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::recommendations::Recommendation;
use crate::risk::{CombinedRisk, DisasterType, RiskAssessment, RiskFactors};
use crate::weather_models::{CityCandidate, WeatherSnapshot};

// ============ Request Coercion ============

/// Parses a request body leniently; anything that is not JSON becomes `null`.
pub fn parse_lenient(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!("Ignoring malformed request body: {}", e);
        Value::Null
    })
}

/// Truthiness coercion for a JSON value.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Reads a flag from a JSON object; missing keys and non-objects are `false`.
pub fn flag(body: &Value, key: &str) -> bool {
    body.get(key).map(truthy).unwrap_or(false)
}

/// Reads the three factors of a hazard using its wire names.
pub fn factors_from_body(body: &Value, disaster: DisasterType) -> RiskFactors {
    let [a, b, c] = disaster.variable_names();
    RiskFactors::new(flag(body, a), flag(body, b), flag(body, c))
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQueryParams {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl WeatherQueryParams {
    /// Explicit coordinates, only when both parse as finite floats.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let parse = |raw: &Option<String>| {
            raw.as_deref()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };
        Some((parse(&self.lat)?, parse(&self.lon)?))
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CitySearchParams {
    pub city: Option<String>,
}

// ============ Response Models ============

/// Factor values keyed by the hazard's variable names.
#[derive(Debug, Clone, Copy)]
pub struct NamedFactors {
    pub disaster: DisasterType,
    pub factors: RiskFactors,
}

impl Serialize for NamedFactors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let [a, b, c] = self.disaster.variable_names();
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(a, &self.factors.p)?;
        map.serialize_entry(b, &self.factors.q)?;
        map.serialize_entry(c, &self.factors.r)?;
        map.end()
    }
}

/// The OR step keyed by the hazard's intermediate name.
#[derive(Debug, Clone, Copy)]
pub struct NamedStep {
    pub disaster: DisasterType,
    pub value: bool,
}

impl Serialize for NamedStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.disaster.intermediate_name(), &self.value)?;
        map.end()
    }
}

/// `POST /api/calculate`
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub success: bool,
    pub p: bool,
    pub q: bool,
    pub r: bool,
    pub q_or_r: bool,
    pub result: bool,
    pub recommendation: Recommendation,
}

/// `POST /api/calculate-flood` and `POST /api/calculate-earthquake`
#[derive(Debug, Serialize)]
pub struct HazardResponse {
    pub success: bool,
    pub variables: NamedFactors,
    pub steps: NamedStep,
    pub result: bool,
    pub recommendation: Recommendation,
}

impl HazardResponse {
    pub fn new(assessment: &RiskAssessment, recommendation: Recommendation) -> Self {
        Self {
            success: true,
            variables: NamedFactors {
                disaster: assessment.disaster,
                factors: assessment.factors,
            },
            steps: NamedStep {
                disaster: assessment.disaster,
                value: assessment.intermediate,
            },
            result: assessment.result,
            recommendation,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HazardSummary {
    pub variables: NamedFactors,
    pub result: bool,
    pub recommendation: Recommendation,
}

/// `POST /api/calculate-combined`
#[derive(Debug, Serialize)]
pub struct CombinedResponse {
    pub success: bool,
    pub flood: HazardSummary,
    pub earthquake: HazardSummary,
    pub combined_risk: CombinedRisk,
}

#[derive(Debug, Serialize)]
pub struct TruthTableResponse {
    pub success: bool,
    pub table: Vec<RiskAssessment>,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub success: bool,
    #[serde(flatten)]
    pub snapshot: WeatherSnapshot,
}

#[derive(Debug, Serialize)]
pub struct CitySearchResponse {
    pub success: bool,
    pub cities: Vec<CityCandidate>,
}
