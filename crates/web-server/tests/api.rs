use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use configuration::Settings;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const ENDPOINT: &str = "/v1/regression/scale-decay";

fn router() -> Router {
    web_server::app(&Settings::default())
}

async fn post_raw(body: impl Into<Body>) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(ENDPOINT)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn post(body: Value) -> (StatusCode, Value) {
    let (status, bytes) = post_raw(body.to_string()).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn decades() -> Value {
    json!([
        {"investmentSize": 10, "moic": 2.0, "irr": 0.30},
        {"investmentSize": 100, "moic": 1.5, "irr": 0.22},
        {"investmentSize": 1000, "moic": 1.0, "irr": 0.11},
        {"investmentSize": 5000, "moic": 0.9, "irr": 0.10}
    ])
}

#[tokio::test]
async fn decreasing_moic_yields_negative_coefficient() {
    let (status, body) = post(json!({
        "data": [
            {"investmentSize": 10, "moic": 2.0},
            {"investmentSize": 100, "moic": 1.5},
            {"investmentSize": 1000, "moic": 1.0}
        ],
        "returnMetric": "moic"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coefficient"], -0.2171);
    assert_eq!(body["intercept"], 2.5);
    assert_eq!(body["rSquared"], 1.0);

    let p_value = body["pValue"].as_f64().unwrap();
    let expected = if p_value < 0.05 {
        "There is statistically significant evidence of scale decay."
    } else {
        "There is no statistically significant evidence of scale decay."
    };
    assert_eq!(body["interpretation"], expected);
}

#[tokio::test]
async fn two_records_fit_with_an_undefined_p_value() {
    let (status, body) = post(json!({
        "data": [
            {"investmentSize": 10, "moic": 2.0},
            {"investmentSize": 100, "moic": 1.0}
        ]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coefficient"], -0.4343);
    assert_eq!(body["intercept"], 3.0);
    assert_eq!(body["rSquared"], 1.0);
    assert!(body["pValue"].is_null());
    assert_eq!(
        body["interpretation"],
        "There is no statistically significant evidence of scale decay."
    );
}

#[tokio::test]
async fn success_body_has_exactly_the_report_fields() {
    let (status, body) = post(json!({ "data": decades(), "returnMetric": "irr" })).await;

    assert_eq!(status, StatusCode::OK);
    let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["coefficient", "intercept", "interpretation", "pValue", "rSquared"]
    );
    assert!(body["coefficient"].as_f64().unwrap() < 0.0);
}

#[tokio::test]
async fn omitted_metric_equals_moic() {
    let (_, implicit) = post(json!({ "data": decades() })).await;
    let (_, explicit) = post(json!({ "data": decades(), "returnMetric": "moic" })).await;
    assert_eq!(implicit, explicit);
}

#[tokio::test]
async fn identical_requests_give_identical_bytes() {
    let body = json!({ "data": decades(), "returnMetric": "irr" }).to_string();
    let first = post_raw(body.clone()).await;
    let second = post_raw(body).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn unknown_metric_is_invalid_input() {
    let (status, body) = post(json!({ "data": decades(), "returnMetric": "ebitda" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid input" }));
}

#[tokio::test]
async fn empty_data_is_invalid_input() {
    let (status, body) = post(json!({ "data": [], "returnMetric": "moic" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid input" }));
}

#[tokio::test]
async fn oddly_shaped_data_is_validated_in_order() {
    let (status, body) = post(json!({ "data": "x", "returnMetric": "ebitda" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid input" }));

    let (status, body) = post(json!({ "data": {}, "returnMetric": "moic" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid input" }));

    let (status, body) = post(json!({ "data": [1, 2] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing required fields" }));
}

#[tokio::test]
async fn non_numeric_size_in_a_used_record_is_internal_error() {
    let (status, body) = post(json!({
        "data": [
            {"investmentSize": "large", "moic": 2.0},
            {"investmentSize": 100, "moic": 1.5},
            {"investmentSize": 1000, "moic": 1.0}
        ]
    }))
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("investmentSize must be numeric"));
}

#[tokio::test]
async fn missing_size_column_is_missing_fields() {
    let (status, body) = post(json!({
        "data": [{"size": 10, "moic": 2.0}, {"size": 100, "moic": 1.5}]
    }))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing required fields" }));
}

#[tokio::test]
async fn non_positive_sizes_are_dropped_silently() {
    let mut data = decades();
    data.as_array_mut()
        .unwrap()
        .push(json!({"investmentSize": 0, "moic": 9.0}));
    data.as_array_mut()
        .unwrap()
        .push(json!({"investmentSize": -50, "moic": 9.0}));

    let (_, with_junk) = post(json!({ "data": data })).await;
    let (_, clean) = post(json!({ "data": decades() })).await;
    assert_eq!(with_junk, clean);
}

#[tokio::test]
async fn nothing_usable_left_is_internal_error() {
    let (status, body) = post(json!({
        "data": [{"investmentSize": 0, "moic": 2.0}, {"investmentSize": -1, "moic": 1.0}]
    }))
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Not enough data"));
}

#[tokio::test]
async fn constant_size_is_internal_error() {
    let (status, body) = post(json!({
        "data": [
            {"investmentSize": 100, "moic": 2.0},
            {"investmentSize": 100, "moic": 1.5},
            {"investmentSize": 100, "moic": 1.0}
        ]
    }))
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("zero variance"));
}

#[tokio::test]
async fn malformed_body_is_internal_error() {
    let (status, bytes) = post_raw("{not json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let request = Request::builder()
        .method("POST")
        .uri(ENDPOINT)
        .header(header::ORIGIN, "https://chat.example.com")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "data": decades() }).to_string()))
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn health_check_responds() {
    let request = Request::builder()
        .uri("/v1/health")
        .body(Body::empty())
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
