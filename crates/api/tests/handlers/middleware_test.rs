use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use spark_api::middleware::{auth, error_handling::map_error};
use spark_core::errors::SparkError;

use crate::test_utils::{user_header, user_value, TestContext};

#[rstest]
#[case(SparkError::NotFound("team".into()), StatusCode::NOT_FOUND)]
#[case(SparkError::Validation("name".into()), StatusCode::BAD_REQUEST)]
#[case(SparkError::Authentication("header".into()), StatusCode::UNAUTHORIZED)]
#[case(SparkError::Authorization("member".into()), StatusCode::FORBIDDEN)]
#[case(SparkError::Conflict("email".into()), StatusCode::CONFLICT)]
#[case(SparkError::Database(eyre::eyre!("pool timed out")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(SparkError::Internal("hash".into()), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: SparkError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[test]
fn test_hash_and_verify_password() {
    let hashed = auth::hash_password("test_password").unwrap();

    assert!(hashed.starts_with("$argon2"));
    assert!(auth::verify_password("test_password", &hashed).unwrap());
    assert!(!auth::verify_password("wrong_password", &hashed).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let first = auth::hash_password("same").unwrap();
    let second = auth::hash_password("same").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_verify_rejects_malformed_hash() {
    assert!(matches!(
        auth::verify_password("password", "not-a-hash"),
        Err(SparkError::Internal(_))
    ));
}

#[tokio::test]
async fn test_missing_user_header_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/friends").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["error"],
        "Authentication error: Missing x-user-id header"
    );
}

#[tokio::test]
async fn test_blank_user_header_is_unauthorized() {
    let ctx = TestContext::new();

    ctx.server
        .get("/api/friends")
        .add_header(user_header(), user_value("   "))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    let health: serde_json::Value = ctx.server.get("/health").await.json();
    assert_eq!(health["status"], "ok");

    let version: serde_json::Value = ctx.server.get("/version").await.json();
    assert_eq!(version["name"], "spark-api");
}
