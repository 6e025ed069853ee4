use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use reset_config::{ConfigSource, DatabaseConfig, ResetConfig};
use reset_core::{LeaderboardStore, StoreConnector, StoreError};
use reset_server::{create_app, ServerState, RESET_ROUTE};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "let-me-in";

#[derive(Default)]
struct RecordingConnector {
    deletes: Arc<AtomicUsize>,
    failure: Option<StoreError>,
}

struct RecordingStore {
    deletes: Arc<AtomicUsize>,
    failure: Option<StoreError>,
}

impl StoreConnector for RecordingConnector {
    fn connect(&self, _database: &DatabaseConfig) -> Result<Box<dyn LeaderboardStore>, StoreError> {
        Ok(Box::new(RecordingStore {
            deletes: self.deletes.clone(),
            failure: self.failure.clone(),
        }))
    }
}

#[async_trait]
impl LeaderboardStore for RecordingStore {
    async fn delete_all(&self, _table: &str, _key_column: &str) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn full_config() -> ResetConfig {
    ResetConfig {
        reset_secret: Some(SECRET.into()),
        supabase_url: Some("https://project.supabase.co".into()),
        supabase_service_role_key: Some("service-role".into()),
    }
}

fn app_with(config: ResetConfig, failure: Option<StoreError>) -> (Router, Arc<AtomicUsize>) {
    let deletes = Arc::new(AtomicUsize::new(0));
    let connector = RecordingConnector {
        deletes: deletes.clone(),
        failure,
    };
    let state = Arc::new(ServerState::new(ConfigSource::Fixed(config), Arc::new(connector)));
    (create_app(state), deletes)
}

fn reset_request(method: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(RESET_ROUTE)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = app_with(full_config(), None);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_get_returns_method_not_allowed() {
    let (app, deletes) = app_with(full_config(), None);

    let response = app.oneshot(reset_request("GET", "")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get(header::ALLOW).unwrap(), "POST");
    assert_eq!(json_body(response).await, json!({ "message": "Method Not Allowed" }));
    assert_eq!(deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_put_with_secret_still_not_allowed() {
    let (app, deletes) = app_with(full_config(), None);

    let body = json!({ "secret": SECRET }).to_string();
    let response = app.oneshot(reset_request("PUT", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_wrong_secret_unauthorized() {
    let (app, deletes) = app_with(full_config(), None);

    let body = json!({ "secret": "nope" }).to_string();
    let response = app.oneshot(reset_request("POST", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await, json!({ "message": "Unauthorized" }));
    assert_eq!(deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_json_unauthorized() {
    let (app, _) = app_with(full_config(), None);

    let response = app
        .oneshot(reset_request("POST", "{\"secret\": "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_empty_body_unauthorized() {
    let (app, _) = app_with(full_config(), None);

    let response = app.oneshot(reset_request("POST", "")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unauthorized_before_configuration_check() {
    let config = ResetConfig {
        reset_secret: Some(SECRET.into()),
        ..Default::default()
    };
    let (app, _) = app_with(config, None);

    let body = json!({ "secret": "guess" }).to_string();
    let response = app.oneshot(reset_request("POST", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_database_config() {
    let config = ResetConfig {
        supabase_service_role_key: None,
        ..full_config()
    };
    let (app, deletes) = app_with(config, None);

    let body = json!({ "secret": SECRET }).to_string();
    let response = app.oneshot(reset_request("POST", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "message": "Server not configured" }));
    assert_eq!(deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_reset_succeeds_twice() {
    let (app, deletes) = app_with(full_config(), None);
    let body = json!({ "secret": SECRET }).to_string();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(reset_request("POST", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(json_body(response).await, json!({ "message": "Leaderboard reset" }));
    }

    assert_eq!(deletes.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_store_failure_includes_details() {
    let failure = StoreError::Request("error sending request for url".into());
    let (app, _) = app_with(full_config(), Some(failure));

    let body = json!({ "secret": SECRET }).to_string();
    let response = app.oneshot(reset_request("POST", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "Reset failed", "details": "error sending request for url" })
    );
}
