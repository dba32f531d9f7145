use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{user_header, user_value, TestContext};

#[tokio::test]
async fn test_add_friend_by_email_is_mutual() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let jisoo = ctx.sign_up("Jisoo").await;

    let response = ctx
        .server
        .post("/api/friends")
        .add_header(user_header(), user_value(&minji))
        .json(&json!({ "email": "jisoo@university.ac.kr" }))
        .await;
    response.assert_status_ok();
    let added: Value = response.json();
    assert_eq!(added["friend_id"], jisoo.as_str());
    assert_eq!(added["added"], true);

    let friends: Value = ctx
        .server
        .get("/api/friends")
        .add_header(user_header(), user_value(&jisoo))
        .await
        .json();
    assert_eq!(friends["friends"][0]["id"], minji.as_str());
    assert_eq!(friends["friends"][0]["name"], "Minji");
    assert_eq!(friends["unresolved"], json!([]));
}

#[tokio::test]
async fn test_add_self_is_rejected() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;

    ctx.server
        .post("/api/friends")
        .add_header(user_header(), user_value(&minji))
        .json(&json!({ "friend_id": minji }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_friend() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let jisoo = ctx.sign_up("Jisoo").await;
    ctx.befriend(&minji, &jisoo).await;

    ctx.server
        .delete(&format!("/api/friends/{}", jisoo))
        .add_header(user_header(), user_value(&minji))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let friends: Value = ctx
        .server
        .get("/api/friends")
        .add_header(user_header(), user_value(&jisoo))
        .await
        .json();
    assert_eq!(friends["friends"], json!([]));
}

#[tokio::test]
async fn test_recommendations_exclude_friends_and_blocked() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let jisoo = ctx.sign_up("Jisoo").await;
    let sora = ctx.sign_up("Sora").await;
    let hana = ctx.sign_up("Hana").await;
    ctx.befriend(&minji, &jisoo).await;

    ctx.server
        .post("/api/blocks")
        .add_header(user_header(), user_value(&minji))
        .json(&json!({ "user_id": sora }))
        .await
        .assert_status_ok();

    let recommended: Vec<Value> = ctx
        .server
        .get("/api/friends/recommendations")
        .add_header(user_header(), user_value(&minji))
        .await
        .json();
    assert_eq!(recommended.len(), 1);
    assert_eq!(recommended[0]["id"], hana.as_str());
    assert_eq!(recommended[0]["major"], "Computer Science");
}

#[tokio::test]
async fn test_block_list_and_unblock() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let jisoo = ctx.sign_up("Jisoo").await;

    let blocked: Value = ctx
        .server
        .post("/api/blocks")
        .add_header(user_header(), user_value(&minji))
        .json(&json!({ "user_id": jisoo }))
        .await
        .json();
    assert_eq!(blocked["blocked"], true);

    let list: Vec<Value> = ctx
        .server
        .get("/api/blocks")
        .add_header(user_header(), user_value(&minji))
        .await
        .json();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["email"], "jisoo@university.ac.kr");

    ctx.server
        .post("/api/friends")
        .add_header(user_header(), user_value(&jisoo))
        .json(&json!({ "friend_id": minji }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .delete(&format!("/api/blocks/{}", jisoo))
        .add_header(user_header(), user_value(&minji))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.befriend(&jisoo, &minji).await;
}
