use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sustainrec::data::{MaterialRecord, MaterialTable};
use sustainrec::recommend::Recommender;
use tower::ServiceExt;

use super::*;

fn table() -> MaterialTable {
    MaterialTable::new(vec![
        MaterialRecord::new("Plastic")
            .with_category("plastic")
            .with_description("recycled plastic packaging")
            .with_recyclable(true)
            .with_features(2.5, 1.2, 0.5),
        MaterialRecord::new("Glass")
            .with_category("container")
            .with_description("reusable glass bottle")
            .with_recyclable(true)
            .with_features(0.85, 5.0, 1.4),
        MaterialRecord::new("Foam")
            .with_category("plastic")
            .with_description("expanded foam packaging")
            .with_features(3.4, 12.0, 0.6),
        MaterialRecord::new("Cardboard")
            .with_category("paper")
            .with_description("corrugated paper packaging box")
            .with_recyclable(true)
            .with_compostable(true)
            .with_features(0.7, 25.0, 0.3),
    ])
}

fn offline_config() -> ServerConfig {
    ServerConfig::default().with_offline(true)
}

fn state_with(table: MaterialTable, config: ServerConfig) -> Arc<ServerState> {
    Arc::new(ServerState::new(Recommender::new(table), config))
}

fn app(state: &Arc<ServerState>) -> Router {
    build_router(Arc::clone(state))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|r| r["material"].as_str().expect("material").to_string())
        .collect()
}

// ==================== ServerConfig Tests ====================

#[test]
fn test_server_config_default() {
    let config = ServerConfig::default();
    assert_eq!(config.port, 8080);
    assert_eq!(config.host, "127.0.0.1");
    assert!(config.cors);
    assert_eq!(config.timeout_secs, 30);
    assert!(config.metrics);
    assert!(!config.offline);
    assert_eq!(config.intensity_url, DEFAULT_INTENSITY_URL);
}

#[test]
fn test_server_config_builders() {
    let config = ServerConfig::default()
        .with_host("0.0.0.0")
        .with_port(9000)
        .with_cors(false)
        .with_timeout_secs(0);
    assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    assert!(!config.cors);
    assert_eq!(config.timeout_secs, 1);
}

#[test]
fn test_metrics_buckets() {
    let metrics = ServerMetrics::new();
    metrics.record_status(200);
    metrics.record_status(404);
    metrics.record_status(502);
    metrics.record_recommendations(3);
    assert_eq!(metrics.requests_total.load(Ordering::Relaxed), 3);
    assert_eq!(metrics.requests_client_error.load(Ordering::Relaxed), 1);
    assert_eq!(metrics.requests_server_error.load(Ordering::Relaxed), 1);

    let text = metrics.prometheus_output();
    assert!(text.contains("sustainrec_requests_total 3"));
    assert!(text.contains("sustainrec_recommendations_served_total 3"));
}

#[test]
fn test_feature_request_requires_material() {
    let request = FeatureRecommendationRequest {
        material: " ".into(),
        carbon_footprint: 1.0,
        recyclable: FlagValue::Bool(true),
        water_usage: 1.0,
        cost: 1.0,
    };
    let err = request.features().expect_err("blank material");
    assert!(err.is_validation());

    let request = FeatureRecommendationRequest {
        material: "Glass".into(),
        ..request
    };
    assert!(request.features().is_ok());
}

#[test]
fn test_flag_value_resolution() {
    assert!(FlagValue::Bool(true).to_bool("recyclable").expect("bool"));
    assert!(!FlagValue::Number(0.0).to_bool("recyclable").expect("zero"));
    assert!(FlagValue::Text("yes".into()).to_bool("recyclable").expect("text"));
    assert!(FlagValue::Number(0.5).to_bool("recyclable").is_err());
}

// ==================== Route Tests ====================

#[tokio::test]
async fn test_root_message() {
    let state = state_with(table(), offline_config());
    let (status, body) = send(app(&state), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sustainable Recommender API is running!");
}

#[tokio::test]
async fn test_health_healthy_and_degraded() {
    let state = state_with(table(), offline_config());
    let (status, body) = send(app(&state), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["records"], 4);
    assert_eq!(body["index_ready"], true);

    let empty = state_with(MaterialTable::empty(), offline_config());
    let (status, body) = send(app(&empty), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["index_ready"], false);
}

#[tokio::test]
async fn test_recommend_by_recyclable() {
    let state = state_with(table(), offline_config());
    let (status, body) = send(app(&state), get("/recommend?recyclable=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Plastic", "Glass", "Cardboard"]);
}

#[tokio::test]
async fn test_recommend_all_constraints() {
    let state = state_with(table(), offline_config());
    let (status, body) = send(
        app(&state),
        get("/recommend?material_type=card&recyclable=yes&compostable=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Cardboard"]);
}

#[tokio::test]
async fn test_recommend_falls_back_to_text_similarity() {
    let state = state_with(table(), offline_config());
    let (status, body) = send(app(&state), get("/recommend?material_type=packaging")).await;
    assert_eq!(status, StatusCode::OK);
    let found = names(&body);
    assert!(!found.is_empty() && found.len() <= 3);
    // "Plastic" is the first row whose text mentions packaging
    assert!(!found.contains(&"Plastic".to_string()));
}

#[tokio::test]
async fn test_recommend_invalid_flag_is_400() {
    let state = state_with(table(), offline_config());
    let (status, body) = send(app(&state), get("/recommend?recyclable=maybe")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().expect("message").contains("recyclable"));
    assert_eq!(
        state.metrics.requests_client_error.load(Ordering::Relaxed),
        1
    );
}

#[tokio::test]
async fn test_recommend_no_match_is_empty_200() {
    let state = state_with(table(), offline_config());
    let (status, body) = send(app(&state), get("/recommend?material_type=titanium")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_empty_dataset_serves_empty_results() {
    let state = state_with(MaterialTable::empty(), offline_config());
    let (status, body) = send(app(&state), get("/recommend?material_type=glass")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let request = json!({
        "material": "Glass", "carbon_footprint": 1.0, "recyclable": true,
        "water_usage": 1.0, "cost": 1.0
    });
    let (status, body) = send(app(&state), post_json("/recommend", &request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendations"], json!([]));
}

#[tokio::test]
async fn test_recommend_by_features_exact_row() {
    let state = state_with(table(), offline_config());
    let request = json!({
        "material": "Glass", "carbon_footprint": 0.85, "recyclable": 1,
        "water_usage": 5.0, "cost": 1.4
    });
    let (status, body) = send(app(&state), post_json("/recommend", &request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "Glass");

    let recs = body["recommendations"].as_array().expect("array");
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0]["material"], "Glass");
    let top = recs[0]["similarity"].as_f64().expect("score");
    assert!((top - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_recommend_by_features_bad_input() {
    let state = state_with(table(), offline_config());

    let bad_flag = json!({
        "material": "Glass", "carbon_footprint": 0.85, "recyclable": 2,
        "water_usage": 5.0, "cost": 1.4
    });
    let (status, body) = send(app(&state), post_json("/recommend", &bad_flag)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    for material in ["", "   "] {
        let blank = json!({
            "material": material, "carbon_footprint": 1.0, "recyclable": true,
            "water_usage": 1.0, "cost": 1.0
        });
        let (status, body) = send(app(&state), post_json("/recommend", &blank)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().expect("message").contains("material"));
    }

    let missing_field = json!({"material": "Glass", "carbon_footprint": 0.85});
    let (status, _) = send(app(&state), post_json("/recommend", &missing_field)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let wrong_type = json!({
        "material": "Glass", "carbon_footprint": "high", "recyclable": true,
        "water_usage": 5.0, "cost": 1.4
    });
    let (status, _) = send(app(&state), post_json("/recommend", &wrong_type)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let not_json = Request::builder()
        .method(Method::POST)
        .uri("/recommend")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("valid request");
    let (status, _) = send(app(&state), not_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_alternatives() {
    let state = state_with(table(), offline_config());
    let (status, body) = send(app(&state), get("/alternatives?material=plastic")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Foam"]);

    let (status, body) = send(app(&state), get("/alternatives?material=steel")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = send(app(&state), get("/alternatives")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_calculate() {
    let state = state_with(table(), offline_config());
    let request = json!({"distance": 40.0, "electricity": 5.0, "food": "Meat-heavy"});
    let (status, body) = send(app(&state), post_json("/calculate", &request)).await;
    assert_eq!(status, StatusCode::OK);
    let total = body["total_co2"].as_f64().expect("total");
    assert!((total - 20.0).abs() < 1e-9);
    assert_eq!(body["recommendation"], "Use public transport!");

    let unknown = json!({"distance": 1.0, "electricity": 1.0, "food": "Carnivore"});
    let (status, body) = send(app(&state), post_json("/calculate", &unknown)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().expect("message").contains("food"));

    let negative = json!({"distance": -1.0, "electricity": 1.0, "food": "Vegan"});
    let (status, _) = send(app(&state), post_json("/calculate", &negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_carbon_intensity_offline_is_503() {
    let state = state_with(table(), offline_config());
    let (status, body) = send(app(&state), get("/carbon-intensity")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "unavailable");
}

#[tokio::test]
async fn test_carbon_intensity_unreachable_is_502() {
    let config = ServerConfig::default()
        .with_intensity_url("http://127.0.0.1:1/intensity")
        .with_timeout_secs(2);
    let state = state_with(table(), config);
    let (status, body) = send(app(&state), get("/carbon-intensity")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream_unavailable");
    assert_eq!(state.metrics.intensity_failures.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let state = state_with(table(), offline_config());
    let _ = send(app(&state), get("/recommend?recyclable=true")).await;

    let response = app(&state)
        .oneshot(get("/metrics"))
        .await
        .expect("infallible");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let text = String::from_utf8(bytes.to_vec()).expect("utf8");
    assert!(text.contains("sustainrec_requests_total 1"));
    assert!(text.contains("sustainrec_recommendations_served_total 3"));

    let disabled = state_with(table(), offline_config().with_metrics(false));
    let (status, _) = send(app(&disabled), get("/metrics")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_header_follows_config() {
    let request = || {
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .expect("valid request")
    };

    let state = state_with(table(), offline_config());
    let response = app(&state).oneshot(request()).await.expect("infallible");
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let closed = state_with(table(), offline_config().with_cors(false));
    let response = app(&closed).oneshot(request()).await.expect("infallible");
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
