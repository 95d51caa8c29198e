use api::config::ApiConfig;
use api::endpoints::{admin, material, student};
use api::extractors::ValidatedRequest;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use campus_validation::RequestInput;
use serde::Deserialize;
use serde_json::{json, Value};
use tower::ServiceExt;

const VALID_ID: &str = "65f1c2a9e4b0a1b2c3d4e5f6";

async fn echo_register(req: ValidatedRequest<student::Register>) -> Json<RequestInput> {
    Json(req.into_inner())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Registration {
    first_name: String,
    semester: u8,
}

async fn register_typed(req: ValidatedRequest<student::Register>) -> Json<Value> {
    match req.body_as::<Registration>() {
        Ok(r) => Json(json!({ "greeting": format!("{} joins semester {}", r.first_name, r.semester) })),
        Err(e) => Json(json!({ "error": e.to_string() })),
    }
}

async fn echo_delete(req: ValidatedRequest<admin::Delete>) -> Json<Value> {
    Json(json!({ "deleted": req.param("id") }))
}

async fn echo_list(req: ValidatedRequest<material::List>) -> Json<Value> {
    Json(Value::Object(req.query.clone()))
}

fn router(config: ApiConfig) -> Router {
    Router::new()
        .route("/students", post(echo_register))
        .route("/students/typed", post(register_typed))
        .route("/admins/:id", delete(echo_delete))
        .route("/materials", get(echo_list))
        .with_state(config)
}

fn registration() -> Value {
    json!({
        "firstName": " Asha ",
        "lastName": "Verma",
        "email": "asha.verma@college.edu",
        "phone": "9876543210",
        "gender": "female",
        "dob": "2003-05-14",
        "address": "12 MG Road",
        "city": "Pune",
        "state": "Maharashtra",
        "pincode": "411001",
        "enrollmentNo": "210034",
        "semester": 3,
        "branchId": VALID_ID
    })
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_handler_receives_normalized_input() {
    let (status, body) = send(
        router(ApiConfig::default()),
        post_json("/students", registration().to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["body"]["firstName"], json!("Asha"));
    assert_eq!(body["body"]["enrollmentNo"], json!(210034));
    assert_eq!(body["body"]["country"], json!("India"));
}

#[tokio::test]
async fn test_handler_deserializes_normalized_body() {
    let mut payload = registration();
    payload["semester"] = json!("5");
    let (status, body) = send(
        router(ApiConfig::default()),
        post_json("/students/typed", payload.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["greeting"], json!("Asha joins semester 5"));
}

#[tokio::test]
async fn test_all_issues_returned_in_order() {
    let mut payload = registration();
    payload["email"] = json!("not-an-email");
    payload.as_object_mut().unwrap().remove("lastName");

    let (status, body) = send(
        router(ApiConfig::default()),
        post_json("/students", payload.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("ValidationError"));
    assert_eq!(body["code"], json!(400));
    assert_eq!(body["message"], json!("Validation failed for 2 fields"));
    assert_eq!(fields(&body), vec!["body.lastName", "body.email"]);
    assert_eq!(body["errors"][1]["message"], json!("Invalid email address"));
}

#[tokio::test]
async fn test_path_param_is_validated() {
    let app = router(ApiConfig::default());
    let request = Request::builder()
        .method("DELETE")
        .uri("/admins/12345")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], json!("params.id"));
    assert_eq!(body["errors"][0]["message"], json!("Invalid ID format"));

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/admins/{}", VALID_ID))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], json!(VALID_ID));
}

#[tokio::test]
async fn test_query_strings_are_coerced() {
    let request = Request::builder()
        .uri("/materials?semester=4&type=notes")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router(ApiConfig::default()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["semester"], json!(4));
    assert_eq!(body["type"], json!("notes"));
}

#[tokio::test]
async fn test_repeated_query_key_is_a_coercion_issue_for_scalar_field() {
    let request = Request::builder()
        .uri("/materials?semester=4&semester=5")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router(ApiConfig::default()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(fields(&body), vec!["query.semester"]);
}

#[tokio::test]
async fn test_malformed_json_is_single_body_issue() {
    let (status, body) = send(
        router(ApiConfig::default()),
        post_json("/students", "{\"firstName\": ".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(fields(&body), vec!["body"]);
    assert!(body["errors"][0]["message"]
        .as_str()
        .unwrap()
        .starts_with("JSON syntax error"));
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let config = ApiConfig {
        max_body_bytes: 1024,
        ..ApiConfig::default()
    };
    let mut payload = registration();
    payload["address"] = json!("x".repeat(4096));

    let (status, body) = send(router(config), post_json("/students", payload.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(fields(&body), vec!["body"]);
}

#[tokio::test]
async fn test_deep_json_rejected() {
    let config = ApiConfig {
        max_json_depth: 3,
        ..ApiConfig::default()
    };
    let mut payload = registration();
    payload["extra"] = json!({"a": {"b": {"c": {"d": 1}}}});

    let (status, body) = send(router(config), post_json("/students", payload.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"][0]["message"],
        json!("JSON exceeds maximum nesting depth of 3")
    );
}

#[tokio::test]
async fn test_missing_body_reports_required_fields() {
    let request = Request::builder()
        .method("POST")
        .uri("/students")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router(ApiConfig::default()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = fields(&body);
    assert_eq!(fields.first().map(String::as_str), Some("body.firstName"));
    assert!(fields.iter().all(|f| f.starts_with("body.")));
}

#[tokio::test]
async fn test_rejection_carries_correlation_id() {
    let app = router(ApiConfig::default());
    let response = app
        .oneshot(post_json("/students", "[]".to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let header_id = response
        .headers()
        .get("x-correlation-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["correlation_id"], json!(header_id));
    assert_eq!(
        body["errors"][0]["message"],
        json!("body must be an object, received array")
    );
}
