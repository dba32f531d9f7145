use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use mockall::mock;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use spark_chat::{ChatBridge, ChatChannel};
use test_log::test;

use crate::test_utils::{user_header, user_value, TestContext};

mock! {
    Chat {}

    #[async_trait]
    impl ChatBridge for Chat {
        async fn register_user(&self, user_id: &str, nickname: &str) -> eyre::Result<()>;
        async fn create_channel(
            &self,
            name: &str,
            member_ids: &[String],
            distinct: bool,
        ) -> eyre::Result<ChatChannel>;
    }
}

struct Matchup {
    ctx: TestContext,
    alpha: Vec<String>,
    beta_member: String,
    beta_team: String,
}

/// Team Alpha (u1, u2) reserves 2024-05-01; team Beta (u3) is ready to
/// confirm it.
async fn matchup(ctx: TestContext) -> Matchup {
    let u1 = ctx.sign_up("Minji").await;
    let u2 = ctx.sign_up("Jisoo").await;
    let u3 = ctx.sign_up("Sora").await;
    ctx.befriend(&u1, &u2).await;

    let alpha_team = ctx.create_team(&u1, "Alpha", &[u2.as_str()]).await;
    let beta_team = ctx.create_team(&u3, "Beta", &[]).await;

    ctx.server
        .post("/api/reservations")
        .add_header(user_header(), user_value(&u2))
        .json(&json!({ "team_id": alpha_team, "date": "2024-05-01" }))
        .await
        .assert_status(StatusCode::CREATED);

    Matchup {
        ctx,
        alpha: vec![u1, u2],
        beta_member: u3,
        beta_team,
    }
}

async fn confirm(m: &Matchup, user: &str, team: &str) -> axum_test::TestResponse {
    m.ctx
        .server
        .post("/api/reservations/2024-05-01-Alpha/confirm")
        .add_header(user_header(), user_value(user))
        .json(&json!({ "team_id": team }))
        .await
}

#[test(tokio::test)]
async fn test_confirm_reservation_creates_meeting() {
    let m = matchup(TestContext::new()).await;

    let response = confirm(&m, &m.beta_member, &m.beta_team).await;
    response.assert_status(StatusCode::CREATED);
    let meeting: Value = response.json();

    assert_eq!(meeting["id"], "2024-05-01-Alpha-Beta");
    assert_eq!(meeting["meeting_date"], "2024-05-01");
    assert_eq!(meeting["meeting_team_name"], "Alpha");
    assert_eq!(meeting["team_name"], "Beta");
    assert_eq!(meeting["members"], json!(m.alpha));
    assert_eq!(meeting["user_id"], m.beta_member.as_str());
    assert_eq!(meeting["comments"], json!([]));

    let pending: Vec<Value> = m.ctx.server.get("/api/reservations").await.json();
    assert!(pending.is_empty());

    let board: Vec<Value> = m
        .ctx
        .server
        .get("/api/confirmations")
        .add_header(user_header(), user_value(&m.alpha[0]))
        .await
        .json();
    assert_eq!(board.len(), 1);
}

#[test(tokio::test)]
async fn test_second_confirmation_finds_nothing() {
    let m = matchup(TestContext::new()).await;

    confirm(&m, &m.beta_member, &m.beta_team)
        .await
        .assert_status(StatusCode::CREATED);
    confirm(&m, &m.beta_member, &m.beta_team)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let board: Vec<Value> = m
        .ctx
        .server
        .get("/api/confirmations")
        .add_header(user_header(), user_value(&m.beta_member))
        .await
        .json();
    assert_eq!(board.len(), 1);
}

#[test(tokio::test)]
async fn test_reserving_team_cannot_confirm_itself() {
    let m = matchup(TestContext::new()).await;
    let alpha_team: Vec<Value> = m
        .ctx
        .server
        .get("/api/teams")
        .add_header(user_header(), user_value(&m.alpha[0]))
        .await
        .json();
    let alpha_id = alpha_team[0]["id"].as_str().unwrap().to_string();

    confirm(&m, &m.alpha[0], &alpha_id)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    confirm(&m, &m.alpha[0], &m.beta_team)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test(tokio::test)]
async fn test_comments_between_participants() {
    let m = matchup(TestContext::new()).await;
    confirm(&m, &m.beta_member, &m.beta_team).await;
    let path = "/api/confirmations/2024-05-01-Alpha-Beta/comments";

    m.ctx
        .server
        .post(path)
        .add_header(user_header(), user_value(&m.alpha[1]))
        .json(&json!({ "text": "Gangnam station at 7?" }))
        .await
        .assert_status_ok();

    let outsider = m.ctx.sign_up("Outsider").await;
    m.ctx
        .server
        .post(path)
        .add_header(user_header(), user_value(&outsider))
        .json(&json!({ "text": "hello" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    m.ctx
        .server
        .post(path)
        .add_header(user_header(), user_value(&m.beta_member))
        .json(&json!({ "text": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let comments: Value = m
        .ctx
        .server
        .get(path)
        .add_header(user_header(), user_value(&m.beta_member))
        .await
        .json();
    assert_eq!(comments["comments"], json!(["Gangnam station at 7?"]));
}

#[test(tokio::test)]
async fn test_open_chat_for_participants() {
    let mut chat = MockChat::new();
    chat.expect_register_user().returning(|_, _| Ok(()));
    chat.expect_create_channel()
        .times(1)
        .returning(|name, members, _| {
            Ok(ChatChannel {
                channel_url: format!("sendbird_group_channel_{}", name),
                name: name.to_string(),
                member_ids: members.to_vec(),
            })
        });

    let m = matchup(TestContext::with_chat(Arc::new(chat))).await;
    confirm(&m, &m.beta_member, &m.beta_team).await;

    let response = m
        .ctx
        .server
        .post("/api/confirmations/2024-05-01-Alpha-Beta/chat")
        .add_header(user_header(), user_value(&m.alpha[0]))
        .await;
    response.assert_status_ok();
    let channel: Value = response.json();

    assert_eq!(channel["name"], "2024-05-01-Alpha-Beta");
    let mut expected = m.alpha.clone();
    expected.push(m.beta_member.clone());
    assert_eq!(channel["member_ids"], json!(expected));
}

#[test(tokio::test)]
async fn test_open_chat_without_chat_service_fails() {
    let m = matchup(TestContext::new()).await;
    confirm(&m, &m.beta_member, &m.beta_team).await;

    m.ctx
        .server
        .post("/api/confirmations/2024-05-01-Alpha-Beta/chat")
        .add_header(user_header(), user_value(&m.alpha[0]))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
