use axum::{body::Bytes, http::{header, StatusCode}};
use fake::{faker::internet::en::SafeEmail, Fake};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{user_header, user_value, TestContext};

#[tokio::test]
async fn test_register_and_login() {
    let ctx = TestContext::new();
    let email: String = SafeEmail().fake();

    let response = ctx
        .server
        .post("/api/users")
        .json(&json!({ "email": email, "password": "password123" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let registered: Value = response.json();

    let response = ctx
        .server
        .post("/api/sessions")
        .json(&json!({ "email": email, "password": "password123" }))
        .await;
    response.assert_status_ok();
    let login: Value = response.json();
    assert_eq!(login["user_id"], registered["id"]);
    assert_eq!(login["has_profile"], false);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let ctx = TestContext::new();
    let body = json!({ "email": "minji@university.ac.kr", "password": "password123" });

    ctx.server.post("/api/users").json(&body).await.assert_status(StatusCode::CREATED);
    ctx.server.post("/api/users").json(&body).await.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let ctx = TestContext::new();
    ctx.sign_up("Minji").await;

    ctx.server
        .post("/api/sessions")
        .json(&json!({ "email": "minji@university.ac.kr", "password": "wrong-password" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_defaults_missing_fields() {
    let ctx = TestContext::new();
    let user_id = ctx.sign_up("Minji").await;

    let response = ctx.server.get(&format!("/api/profiles/{}", user_id)).await;
    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["user_id"], user_id.as_str());
    assert_eq!(body["profile"]["name"], "Minji");
    assert_eq!(body["profile"]["major"], "Computer Science");
    assert_eq!(body["profile"]["bio"], "");
    assert_eq!(body["profile"]["email"], "minji@university.ac.kr");

    let login: Value = ctx
        .server
        .post("/api/sessions")
        .json(&json!({ "email": "minji@university.ac.kr", "password": "password123" }))
        .await
        .json();
    assert_eq!(login["has_profile"], true);
}

#[tokio::test]
async fn test_unknown_profile_is_not_found() {
    let ctx = TestContext::new();

    ctx.server
        .get("/api/profiles/nobody")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_profile_for_unknown_user_is_not_found() {
    let ctx = TestContext::new();

    ctx.server
        .put("/api/profile")
        .add_header(user_header(), user_value("ghost"))
        .json(&json!({ "name": "Ghost" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_current_user_returns_account() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let jisoo = ctx.sign_up("Jisoo").await;
    ctx.befriend(&minji, &jisoo).await;

    let response = ctx
        .server
        .get("/api/users/me")
        .add_header(user_header(), user_value(&minji))
        .await;
    response.assert_status_ok();
    let me: Value = response.json();
    assert_eq!(me["id"], minji.as_str());
    assert_eq!(me["email"], "minji@university.ac.kr");
    assert_eq!(me["friends"], json!([jisoo]));
    assert!(me.get("password_hash").is_none());

    ctx.server
        .get("/api/users/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_and_fetch_profile_image() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let jpeg = Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xE0]);

    let response = ctx
        .server
        .put("/api/profile/image")
        .add_header(user_header(), user_value(&minji))
        .bytes(jpeg.clone())
        .content_type("image/jpeg")
        .await;
    response.assert_status_ok();
    let image_url = format!("/api/images/profiles/{}", minji);
    assert_eq!(response.json::<Value>()["image_url"], image_url.as_str());

    let profile: Value = ctx
        .server
        .get(&format!("/api/profiles/{}", minji))
        .await
        .json();
    assert_eq!(profile["profile"]["image_url"], image_url.as_str());

    let image = ctx.server.get(&image_url).await;
    image.assert_status_ok();
    assert_eq!(image.header(header::CONTENT_TYPE), "image/jpeg");
    assert_eq!(image.as_bytes(), &jpeg);
}

#[tokio::test]
async fn test_profile_image_must_be_an_image() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;

    ctx.server
        .put("/api/profile/image")
        .add_header(user_header(), user_value(&minji))
        .bytes(Bytes::from_static(b"not a picture"))
        .content_type("text/plain")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .get(&format!("/api/images/profiles/{}", minji))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
