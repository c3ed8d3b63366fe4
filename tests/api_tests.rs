/// End-to-end tests through the axum router
/// Requests are driven with `tower::ServiceExt::oneshot`, no socket involved
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use disaster_mitigation_api::config::Config;
use disaster_mitigation_api::handlers::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(config: Config) -> Router {
    router(Arc::new(AppState::new(config).unwrap()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[cfg(test)]
mod risk_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_calculate_flood_maximum() {
        let (status, body) = send(
            app(Config::default()),
            post("/api/calculate-flood", r#"{"p":true,"q":true,"r":true}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["result"], true);
        assert_eq!(body["variables"], json!({"p": true, "q": true, "r": true}));
        assert_eq!(body["steps"], json!({"q_or_r": true}));
        assert!(body["recommendation"]["title"]
            .as_str()
            .unwrap()
            .contains("MAKSIMAL"));
    }

    #[tokio::test]
    async fn test_calculate_classic_shape() {
        let (status, body) = send(
            app(Config::default()),
            post("/api/calculate", r#"{"p":false,"q":true,"r":true}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["p"], false);
        assert_eq!(body["q_or_r"], true);
        assert_eq!(body["result"], false);
        assert_eq!(body["recommendation"]["title"], "⚠️ SIAGA ANTISIPASI");
    }

    #[tokio::test]
    async fn test_malformed_body_defaults_to_false() {
        let (status, body) = send(
            app(Config::default()),
            post("/api/calculate-flood", "this is not json"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["variables"], json!({"p": false, "q": false, "r": false}));
        assert_eq!(body["result"], false);
    }

    #[tokio::test]
    async fn test_empty_body_defaults_to_false() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/calculate")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(Config::default()), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], false);
        assert_eq!(body["recommendation"]["title"], "✅ KONDISI IDEAL");
    }

    #[tokio::test]
    async fn test_calculate_earthquake_uses_e_b_l() {
        let (status, body) = send(
            app(Config::default()),
            post("/api/calculate-earthquake", r#"{"e":1,"b":"yes","l":false}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["variables"], json!({"e": true, "b": true, "l": false}));
        assert_eq!(body["steps"], json!({"b_or_l": true}));
        assert_eq!(body["result"], true);
        assert_eq!(
            body["recommendation"]["title"],
            "⚠️ RISIKO KERUSAKAN BANGUNAN"
        );
    }

    #[tokio::test]
    async fn test_calculate_combined_critical() {
        let (status, body) = send(
            app(Config::default()),
            post(
                "/api/calculate-combined",
                r#"{"p":true,"q":true,"r":false,"e":true,"b":false,"l":true}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["flood"]["result"], true);
        assert_eq!(body["earthquake"]["result"], true);
        assert_eq!(body["earthquake"]["variables"]["l"], true);
        assert_eq!(body["combined_risk"]["level"], "CRITICAL");
        assert_eq!(body["combined_risk"]["severity"], 5);
    }

    #[tokio::test]
    async fn test_truth_tables() {
        let (status, body) = send(app(Config::default()), get("/api/truth-table/earthquake")).await;
        assert_eq!(status, StatusCode::OK);
        let table = body["table"].as_array().unwrap();
        assert_eq!(table.len(), 8);
        assert_eq!(
            table[0],
            json!({"e": false, "b": false, "l": false, "b_or_l": false, "result": false})
        );
        assert_eq!(
            table[7],
            json!({"e": true, "b": true, "l": true, "b_or_l": true, "result": true})
        );

        let (_, classic) = send(app(Config::default()), get("/api/truth-table")).await;
        let (_, flood) = send(app(Config::default()), get("/api/truth-table/flood")).await;
        assert_eq!(classic, flood);
        assert_eq!(flood["table"][5]["q_or_r"], true);
    }
}

#[cfg(test)]
mod misc_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(Config::default()), get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_articles() {
        let (status, body) = send(app(Config::default()), get("/api/articles")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["articles"].as_array().unwrap().len(), 6);
        assert_eq!(body["articles"][0]["id"], 1);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send(app(Config::default()), get("/api/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Endpoint not found");
    }
}

#[cfg(test)]
mod weather_endpoint_tests {
    use super::*;

    fn mocked_config(uri: String) -> Config {
        Config {
            openweather_api_key: Some("test_key".to_string()),
            openweather_base_url: uri,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_search_without_api_key() {
        let (status, body) = send(
            app(Config::default()),
            get("/api/weather/search?city=Jakarta"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("API key not configured"));
    }

    #[tokio::test]
    async fn test_weather_without_api_key() {
        let (status, body) = send(app(Config::default()), get("/api/weather")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("API key not configured"));
    }

    #[tokio::test]
    async fn test_search_missing_city_param() {
        let mock_server = MockServer::start().await;
        let (status, body) = send(
            app(mocked_config(mock_server.uri())),
            get("/api/weather/search"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "City parameter is required");
    }

    #[tokio::test]
    async fn test_search_not_found_is_404() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let (status, body) = send(
            app(mocked_config(mock_server.uri())),
            get("/api/weather/search?city=Atlantis"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "City \"Atlantis\" not found");
    }

    #[tokio::test]
    async fn test_search_returns_location_fields_only() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Jakarta", "country": "ID", "lat": -6.2, "lon": 106.8}
            ])))
            .mount(&mock_server)
            .await;

        let (status, body) = send(
            app(mocked_config(mock_server.uri())),
            get("/api/weather/search?city=Jakarta"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["cities"],
            json!([{"name": "Jakarta", "country": "ID", "state": "", "lat": -6.2, "lon": 106.8}])
        );
    }

    #[tokio::test]
    async fn test_weather_falls_back_to_default_coordinates() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "5.5483"))
            .and(query_param("lon", "95.3238"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Banda Aceh",
                "main": {"temp": 29.0, "feels_like": 33.0, "temp_min": 29.0, "temp_max": 29.0,
                         "pressure": 1010, "humidity": 95},
                "weather": [{"description": "hujan", "icon": "09d"}],
                "wind": {"speed": 1.0, "deg": 90},
                "clouds": {"all": 90},
                "sys": {"country": "ID", "sunrise": 1735775400, "sunset": 1735818900},
                "dt": 1735790400,
                "timezone": 25200
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
            .expect(1)
            .mount(&mock_server)
            .await;

        // unparsable lon means no explicit coordinates
        let (status, body) = send(
            app(mocked_config(mock_server.uri())),
            get("/api/weather?lat=1.0&lon=east"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["location"]["name"], "Banda Aceh");
        assert_eq!(body["location"]["lat"], 5.5483);
        assert_eq!(body["flood_risk"]["level"], "high");
        assert_eq!(body["current"]["visibility"], 10.0);
        assert_eq!(body["forecast"], json!([]));
        // provider numbers pass through unchanged
        assert_eq!(body["current"]["humidity"].to_string(), "95");
        assert_eq!(body["current"]["pressure"].to_string(), "1010");
        assert_eq!(body["flood_risk"]["rainfall"].to_string(), "0");
    }

    #[tokio::test]
    async fn test_rainfall_message_keeps_provider_format() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Padang",
                "coord": {"lat": -0.95, "lon": 100.35},
                "main": {"temp": 24.0, "pressure": 1004, "humidity": 85},
                "weather": [{"description": "hujan lebat", "icon": "10d"}],
                "rain": {"1h": 60.0},
                "sys": {"country": "ID"},
                "dt": 1735790400,
                "timezone": 25200
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
            .mount(&mock_server)
            .await;

        let (status, body) = send(
            app(mocked_config(mock_server.uri())),
            get("/api/weather?city=Padang"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["flood_risk"]["level"], "high");
        assert_eq!(body["flood_risk"]["rainfall"].to_string(), "60.0");
        assert!(body["flood_risk"]["message"]
            .as_str()
            .unwrap()
            .contains("(60.0mm/jam)"));
        assert_eq!(body["current"]["humidity"].to_string(), "85");
    }

    #[tokio::test]
    async fn test_malformed_query_uses_json_envelope() {
        for uri in [
            "/api/weather?lat=1.0&lat=2.0&lon=3.0",
            "/api/weather/search?city=a&city=b",
        ] {
            let (status, body) = send(app(Config::default()), get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["success"], false, "{}", uri);
            assert!(
                body["error"].as_str().unwrap().contains("duplicate field"),
                "{}",
                uri
            );
        }
    }

    #[tokio::test]
    async fn test_weather_provider_failure_is_500() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let (status, body) = send(
            app(mocked_config(mock_server.uri())),
            get("/api/weather?city=Medan"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("maintenance"));
    }
}
