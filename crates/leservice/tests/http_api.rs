// HTTP API integration tests
//
// These drive the full router (state, tracing and CORS layers included) in process and check
// the wire contract of /rank, /plan_jit and /health.

use axum::body::Body;
use axum::Router;
use chrono::DateTime;
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use ledecision::Catalog;
use leservice::{build_app, AppState, ServiceConfig};
use rstest::rstest;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(config: ServiceConfig) -> Router {
    build_app(AppState::new(Catalog::default(), config))
}

fn app() -> Router {
    app_with(ServiceConfig::default())
}

fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn health_reports_healthy() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ai-service");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn rank_with_empty_body() {
    let (status, body) = send(app(), json_post("/rank", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    let recs = body.as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0]["id"], "rec_001");
    assert_eq!(recs[0]["score"], 1.0);

    let scores: Vec<f64> = recs.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));

    for rec in recs {
        assert!(!rec["id"].as_str().unwrap().is_empty());
        assert!(!rec["title"].as_str().unwrap().is_empty());
        assert!(!rec["rationale"].as_str().unwrap().is_empty());
        assert!(!rec["actions"].as_array().unwrap().is_empty());
    }
    assert_eq!(recs[0]["actions"][0]["type"], "CREATE_TRANSFER");
    assert_eq!(recs[0]["actions"][0]["params"]["from"], "DAL");
}

#[tokio::test]
async fn rank_ignores_payload() {
    let (_, plain) = send(app(), json_post("/rank", json!({}))).await;
    let (status, with_context) = send(
        app(),
        json_post(
            "/rank",
            json!({"warehouse_id": "DAL", "context": {"season": "peak", "n": [1, 2]}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plain, with_context);
}

#[tokio::test]
async fn plan_jit_chi_example() {
    let (status, body) = send(
        app(),
        json_post(
            "/plan_jit",
            json!({"sku_id": "SKU-004", "qty": 20, "dest_warehouse_id": "CHI"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let rec = &body["recommendation"];
    assert_eq!(rec["title"], "JIT Transfer: SKU-004");
    assert_eq!(rec["score"], 0.9);
    assert!(rec["id"].as_str().unwrap().starts_with("jit_"));

    let transfer = &rec["actions"][0];
    assert_eq!(transfer["type"], "CREATE_TRANSFER");
    assert_eq!(transfer["params"]["from"], "DAL");
    assert_eq!(transfer["params"]["to"], "CHI");
    assert_eq!(transfer["params"]["sku"], "SKU-004");
    assert_eq!(transfer["params"]["qty"], 20);

    let carriers = body["carriers"].as_array().unwrap();
    assert_eq!(carriers.len(), 3);
    assert_eq!(carriers[0]["name"], "Econo STD");
    assert_eq!(carriers[0]["cost"], 75.0);

    let shipment = &rec["actions"][1];
    assert_eq!(shipment["type"], "CREATE_SHIPMENT");
    assert_eq!(shipment["params"]["carrier"], carriers[0]["name"]);
    assert_eq!(shipment["params"]["priority"], "urgent");

    assert!(body["explanation"].as_str().unwrap().contains("SKU-004"));
}

#[tokio::test]
async fn plan_jit_carriers_ranked_by_cost() {
    let (status, body) = send(
        app(),
        json_post(
            "/plan_jit",
            json!({"sku_id": "SKU-001", "qty": 10, "dest_warehouse_id": "DAL"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let carriers = body["carriers"].as_array().unwrap();
    let costs: Vec<f64> = carriers.iter().map(|c| c["cost"].as_f64().unwrap()).collect();
    assert!(costs.windows(2).all(|w| w[0] <= w[1]));

    for carrier in carriers {
        let cost = carrier["cost"].as_f64().unwrap();
        let reliability = carrier["reliability"].as_f64().unwrap();
        assert!((50.0..=250.0).contains(&cost));
        assert!((0.8..=1.0).contains(&reliability));
        assert!(DateTime::parse_from_rfc3339(carrier["eta"].as_str().unwrap()).is_ok());
    }

    assert_eq!(body["recommendation"]["actions"][0]["params"]["from"], "CHI");
}

#[tokio::test]
async fn plan_jit_seeded_config_is_reproducible() {
    let config = ServiceConfig {
        rng_seed: Some(1234),
        ..Default::default()
    };
    let request = json!({"sku_id": "SKU-010", "qty": 5, "dest_warehouse_id": "DAL"});

    let (_, first) = send(app_with(config.clone()), json_post("/plan_jit", request.clone())).await;
    let (_, second) = send(app_with(config), json_post("/plan_jit", request)).await;

    assert_eq!(first["recommendation"]["id"], second["recommendation"]["id"]);
    let capacities = |body: &Value| -> Vec<Value> {
        body["carriers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["capacity"].clone())
            .collect()
    };
    assert_eq!(capacities(&first), capacities(&second));
}

#[rstest]
#[case(json!({"sku_id": "SKU-004", "qty": 20}))]
#[case(json!({"qty": 20, "dest_warehouse_id": "CHI"}))]
#[case(json!({"sku_id": "SKU-004", "qty": "twenty", "dest_warehouse_id": "CHI"}))]
#[tokio::test]
async fn plan_jit_rejects_incomplete_body(#[case] body: Value) {
    let (status, error) = send(app(), json_post("/plan_jit", body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["success"], false);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn plan_jit_rejects_malformed_json() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/plan_jit")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, error) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn plan_jit_requires_json_content_type() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/plan_jit")
        .body(Body::from(
            json!({"sku_id": "SKU-004", "qty": 20, "dest_warehouse_id": "CHI"}).to_string(),
        ))
        .unwrap();
    let (status, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn lenient_mode_accepts_unknown_values() {
    let (status, body) = send(
        app(),
        json_post(
            "/plan_jit",
            json!({"sku_id": "SKU-999", "qty": -4, "dest_warehouse_id": "NYC"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation"]["actions"][0]["params"]["from"], "CHI");
    assert_eq!(body["recommendation"]["actions"][0]["params"]["qty"], -4);
}

#[rstest]
#[case(json!({"sku_id": "SKU-999", "qty": 4, "dest_warehouse_id": "CHI"}))]
#[case(json!({"sku_id": "SKU-004", "qty": 0, "dest_warehouse_id": "CHI"}))]
#[case(json!({"sku_id": "SKU-004", "qty": 4, "dest_warehouse_id": "NYC"}))]
#[tokio::test]
async fn strict_mode_rejects_unknown_values(#[case] body: Value) {
    let config = ServiceConfig {
        strict_validation: true,
        ..Default::default()
    };
    let (status, error) = send(app_with(config), json_post("/plan_jit", body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn strict_mode_accepts_known_values() {
    let config = ServiceConfig {
        strict_validation: true,
        ..Default::default()
    };
    let (status, _) = send(
        app_with(config),
        json_post(
            "/plan_jit",
            json!({"sku_id": "SKU-004", "qty": 20, "dest_warehouse_id": "CHI"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let config = ServiceConfig {
        cors_origins: vec!["http://localhost:3000".to_string()],
        ..Default::default()
    };
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app_with(config).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let request = Request::builder()
        .uri("/recommendations")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
