use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{user_header, user_value, TestContext};

#[tokio::test]
async fn test_create_team_with_friends() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let jisoo = ctx.sign_up("Jisoo").await;
    ctx.befriend(&minji, &jisoo).await;

    let response = ctx
        .server
        .post("/api/teams")
        .add_header(user_header(), user_value(&minji))
        .json(&json!({
            "name": "Alpha",
            "department": "Computer Science",
            "description": "Friday dinner",
            "member_ids": [jisoo],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let team: Value = response.json();
    assert_eq!(team["members"], json!([minji, jisoo]));
    assert_eq!(team["created_by"], minji.as_str());

    let teams: Vec<Value> = ctx
        .server
        .get("/api/teams")
        .add_header(user_header(), user_value(&jisoo))
        .await
        .json();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0]["name"], "Alpha");
}

#[tokio::test]
async fn test_team_with_four_invited_members_is_rejected() {
    let ctx = TestContext::new();
    let creator = ctx.sign_up("Creator").await;
    let mut friends = Vec::new();
    for name in ["Ann", "Bo", "Cy", "Di"] {
        let id = ctx.sign_up(name).await;
        ctx.befriend(&creator, &id).await;
        friends.push(id);
    }

    ctx.server
        .post("/api/teams")
        .add_header(user_header(), user_value(&creator))
        .json(&json!({ "name": "Crowd", "member_ids": friends }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_team_members_must_be_friends() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let stranger = ctx.sign_up("Stranger").await;

    ctx.server
        .post("/api/teams")
        .add_header(user_header(), user_value(&minji))
        .json(&json!({ "name": "Alpha", "member_ids": [stranger] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_team_only_by_members() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let outsider = ctx.sign_up("Outsider").await;
    let team_id = ctx.create_team(&minji, "Alpha", &[]).await;

    ctx.server
        .delete(&format!("/api/teams/{}", team_id))
        .add_header(user_header(), user_value(&outsider))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let deleted: Value = ctx
        .server
        .delete(&format!("/api/teams/{}", team_id))
        .add_header(user_header(), user_value(&minji))
        .await
        .json();
    assert_eq!(deleted["deleted"], true);

    let teams: Vec<Value> = ctx
        .server
        .get("/api/teams")
        .add_header(user_header(), user_value(&minji))
        .await
        .json();
    assert!(teams.is_empty());
}

#[tokio::test]
async fn test_deleting_team_withdraws_its_reservations() {
    let ctx = TestContext::new();
    let minji = ctx.sign_up("Minji").await;
    let jisoo = ctx.sign_up("Jisoo").await;
    let alpha = ctx.create_team(&minji, "Alpha", &[]).await;
    let beta = ctx.create_team(&jisoo, "Beta", &[]).await;

    ctx.server
        .post("/api/reservations")
        .add_header(user_header(), user_value(&minji))
        .json(&json!({ "team_id": alpha, "date": "2024-05-01" }))
        .await
        .assert_status(StatusCode::CREATED);

    ctx.server
        .delete(&format!("/api/teams/{}", alpha))
        .add_header(user_header(), user_value(&minji))
        .await
        .assert_status_ok();

    let pending: Vec<Value> = ctx.server.get("/api/reservations").await.json();
    assert!(pending.is_empty());

    ctx.server
        .post("/api/reservations/2024-05-01-Alpha/confirm")
        .add_header(user_header(), user_value(&jisoo))
        .json(&json!({ "team_id": beta }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
