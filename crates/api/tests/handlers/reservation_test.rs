use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{user_header, user_value, TestContext};

#[tokio::test]
async fn test_reserve_and_list_by_date() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let alpha = ctx.create_team(&minji, "Alpha", &[]).await;

    let response = ctx
        .server
        .post("/api/reservations")
        .add_header(user_header(), user_value(&minji))
        .json(&json!({ "team_id": alpha, "date": "2024-05-01" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["reservation"]["id"], "2024-05-01-Alpha");
    assert_eq!(created["replaced"], false);

    let on_day: Vec<Value> = ctx
        .server
        .get("/api/reservations")
        .add_query_param("date", "2024-05-01")
        .await
        .json();
    assert_eq!(on_day.len(), 1);
    assert_eq!(on_day[0]["members"], json!([minji]));

    let other_day: Vec<Value> = ctx
        .server
        .get("/api/reservations")
        .add_query_param("date", "2024-05-02")
        .await
        .json();
    assert!(other_day.is_empty());
}

#[tokio::test]
async fn test_rereserving_same_day_replaces() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let alpha = ctx.create_team(&minji, "Alpha", &[]).await;
    let body = json!({ "team_id": alpha, "date": "2024-05-01" });

    ctx.server
        .post("/api/reservations")
        .add_header(user_header(), user_value(&minji))
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .post("/api/reservations")
        .add_header(user_header(), user_value(&minji))
        .json(&body)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["replaced"], true);

    let all: Vec<Value> = ctx.server.get("/api/reservations").await.json();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_non_member_cannot_reserve() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let outsider = ctx.sign_up("Outsider").await;
    let alpha = ctx.create_team(&minji, "Alpha", &[]).await;

    ctx.server
        .post("/api/reservations")
        .add_header(user_header(), user_value(&outsider))
        .json(&json!({ "team_id": alpha, "date": "2024-05-01" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cancel_reservation() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let alpha = ctx.create_team(&minji, "Alpha", &[]).await;

    ctx.server
        .post("/api/reservations")
        .add_header(user_header(), user_value(&minji))
        .json(&json!({ "team_id": alpha, "date": "2024-05-01" }))
        .await
        .assert_status(StatusCode::CREATED);

    ctx.server
        .delete("/api/reservations/2024-05-01-Alpha")
        .add_header(user_header(), user_value(&minji))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let all: Vec<Value> = ctx.server.get("/api/reservations").await.json();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_same_named_team_gets_conflict_and_first_team_keeps_slot() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let jisoo = ctx.sign_up("Jisoo").await;
    let stranger = ctx.sign_up("Stranger").await;
    ctx.befriend(&minji, &jisoo).await;
    let first = ctx.create_team(&minji, "Alpha", &[&jisoo]).await;
    let second = ctx.create_team(&stranger, "Alpha", &[]).await;

    ctx.server
        .post("/api/reservations")
        .add_header(user_header(), user_value(&minji))
        .json(&json!({ "team_id": first, "date": "2024-05-01" }))
        .await
        .assert_status(StatusCode::CREATED);

    ctx.server
        .post("/api/reservations")
        .add_header(user_header(), user_value(&stranger))
        .json(&json!({ "team_id": second, "date": "2024-05-01" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    let all: Vec<Value> = ctx.server.get("/api/reservations").await.json();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["team_id"], first.as_str());
    assert_eq!(all[0]["members"], json!([minji, jisoo]));

    ctx.server
        .delete("/api/reservations/2024-05-01-Alpha")
        .add_header(user_header(), user_value(&minji))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}
