//! HTTP API integration tests.
//!
//! Drives the router with `tower::ServiceExt::oneshot` against an in-memory
//! registry and skill queue.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use copilot_engine::application::{ApprovalWorkflow, MockCopilot, SkillQueue};
use copilot_engine::config::SimulationConfig;
use copilot_engine::domain::shared::{AccountId, Timestamp, UserId};
use copilot_engine::domain::trade_decision::TradeSuggestion;
use copilot_engine::infrastructure::http::{API_PREFIX, AppState, create_router};
use copilot_engine::infrastructure::persistence::{
    InMemoryOpportunityRepository, InMemoryTaskRepository,
};

fn app() -> (Router, Arc<ApprovalWorkflow<InMemoryTaskRepository>>) {
    let workflow = Arc::new(ApprovalWorkflow::new(
        MockCopilot::from_config(SimulationConfig::instant()),
        Arc::new(InMemoryTaskRepository::new()),
    ));
    let router = create_router(AppState {
        workflow: Arc::clone(&workflow),
        skills: Arc::new(SkillQueue::new(Arc::new(InMemoryOpportunityRepository::new()))),
        version: env!("CARGO_PKG_VERSION").to_string(),
    });
    (router, workflow)
}

async fn call(router: &Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(format!("{API_PREFIX}{path}"))
        .header("content-type", "application/json");
    let request = match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn suggestion() -> TradeSuggestion {
    TradeSuggestion::mock(
        UserId::new("u_123"),
        AccountId::new("acc_binance_demo0001"),
        Timestamp::now(),
        chrono::Duration::minutes(5),
    )
}

#[tokio::test]
async fn imported_suggestion_is_idempotent() {
    let (router, workflow) = app();
    let suggestion = serde_json::to_value(suggestion()).unwrap();

    let (status, first) = call(&router, "POST", "/suggestions/import", Some(suggestion.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        first["message"],
        "Suggestion delivered to OpenClaw approval channel (mock)"
    );

    let (status, second) = call(&router, "POST", "/suggestions/import", Some(suggestion)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["message"], "Duplicate suggestion ignored (idempotent)");
    assert_eq!(first["data"]["task_id"], second["data"]["task_id"]);
    assert_eq!(workflow.repository().len(), 1);
}

#[tokio::test]
async fn rejection_flow_records_canceled_result() {
    let (router, _) = app();
    let suggestion = suggestion();
    let suggestion_id = suggestion.suggestion_id.to_string();

    let (_, created) = call(
        &router,
        "POST",
        "/suggestions/import",
        Some(serde_json::to_value(&suggestion).unwrap()),
    )
    .await;
    let task_id = created["data"]["task_id"].as_str().unwrap().to_string();

    let (status, approval) = call(
        &router,
        "POST",
        "/approvals",
        Some(json!({
            "task_id": task_id,
            "suggestion_id": suggestion_id,
            "decision": "Reject",
            "channel": "telegram"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approval["data"]["status"], "accepted");
    assert_eq!(approval["data"]["next_state"], "rejected");
    assert_eq!(approval["data"]["execution_status"], "canceled");

    let (status, task) = call(&router, "GET", &format!("/tasks/{task_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let task = &task["data"];
    assert_eq!(task["state"], "rejected");
    assert_eq!(task["approval"]["channel"], "telegram");
    assert_eq!(task["approval"]["approved_by"], "u_123");
    assert_eq!(task["execution_result"]["status"], "canceled");
    assert_eq!(
        task["execution_result"]["message"],
        "Execution canceled by human rejection."
    );
    assert!(task["execution_result"].get("mock_order_id").is_none());
}

#[tokio::test]
async fn execute_before_approval_is_conflict() {
    let (router, _) = app();
    let (_, created) = call(
        &router,
        "POST",
        "/suggestions",
        Some(json!({ "user_id": "u_1", "account_id": "acc_binance_demo0002" })),
    )
    .await;
    let task_id = created["data"]["task_id"].as_str().unwrap().to_string();

    let (status, body) = call(&router, "POST", &format!("/tasks/{task_id}/execute"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 40901);
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|m| m.contains("no human approval"))
    );
}

#[tokio::test]
async fn approval_for_unknown_task_is_not_found() {
    let (router, _) = app();
    let (status, body) = call(
        &router,
        "POST",
        "/approvals",
        Some(json!({
            "task_id": "task_zzzzzzzz",
            "suggestion_id": "sug_zzzzzzzz",
            "decision": "yes"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40401);
    assert!(
        body["request_id"]
            .as_str()
            .is_some_and(|id| uuid::Uuid::parse_str(id).is_ok())
    );
}

#[tokio::test]
async fn skill_queue_serves_newest_pending_first() {
    let (router, _) = app();

    let mut ids = Vec::new();
    for pair in ["BTC/USDT", "ETH/USDT", "SOL/USDT"] {
        let (status, created) = call(
            &router,
            "POST",
            "/skill/opportunities",
            Some(json!({
                "pair": pair,
                "action": "buy",
                "qty": 2.5,
                "lev": "5x",
                "source": "Momentum Scanner",
                "requested_by": "desk-lead"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["data"]["title"], "Momentum Scanner");
        ids.push(created["data"]["id"].as_str().unwrap().to_string());
    }

    let (_, listed) = call(&router, "GET", "/skill/opportunities", None).await;
    let listed_ids: Vec<_> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed_ids, vec![ids[2].clone(), ids[1].clone(), ids[0].clone()]);

    let decide = |id: &str, user: &str, decision: &str| {
        (
            format!("/skill/opportunities/{id}/decision"),
            json!({ "user_id": user, "decision": decision, "channel": "telegram", "raw_text": "ok" }),
        )
    };

    let (path, body) = decide(&ids[2], "alice", "y");
    let (status, _) = call(&router, "POST", &path, Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, next) = call(&router, "GET", "/skill/opportunities/next", None).await;
    assert_eq!(next["data"]["id"], ids[1].as_str());

    let (path, body) = decide(&ids[1], "bob", "reject");
    let (status, decided) = call(&router, "POST", &path, Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decided["data"]["status"], "rejected");
    assert_eq!(decided["data"]["decision"]["channel"], "telegram");

    let (_, log) = call(&router, "GET", "/skill/decisions", None).await;
    let log = log["data"].as_array().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0]["user_id"], "bob");
    assert_eq!(log[0]["decision"], "no");
    assert_eq!(log[1]["opportunity_id"], ids[2].as_str());

    let (_, next) = call(&router, "GET", "/skill/opportunities/next", None).await;
    assert_eq!(next["data"]["id"], ids[0].as_str());
}

#[tokio::test]
async fn skill_decision_replay_by_other_user_conflicts() {
    let (router, _) = app();
    let (_, created) = call(
        &router,
        "POST",
        "/skill/opportunities",
        Some(json!({ "pair": "BTC/USDT", "action": "long", "qty": 0.1, "lev": "3x" })),
    )
    .await;
    let path = format!(
        "/skill/opportunities/{}/decision",
        created["data"]["id"].as_str().unwrap()
    );

    let (status, _) = call(
        &router,
        "POST",
        &path,
        Some(json!({ "user_id": "alice", "decision": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &router,
        "POST",
        &path,
        Some(json!({ "user_id": "carol", "decision": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 40911);
    assert_eq!(body["success"], false);
}
