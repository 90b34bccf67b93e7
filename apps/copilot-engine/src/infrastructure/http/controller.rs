//! HTTP Controller (Driver Adapter)
//!
//! Axum routes for the OpenClaw callback API and the skill queue. Every
//! route lives under [`API_PREFIX`]; `/health` is also served at the root.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};

use crate::application::{ApprovalWorkflow, SkillQueue};
use crate::domain::account::{ApiKeyConnection, MockAccountResponse};
use crate::domain::shared::{OpportunityId, TaskId};
use crate::domain::skill_queue::{
    DecisionReply, NewOpportunity, OpportunityError, OpportunityRepository, SkillDecision,
    SkillOpportunity,
};
use crate::domain::trade_decision::{TaskError, TaskRepository, TradeDecisionTask, TradeSuggestion};
use crate::error::ApiError;

use super::request::{ApprovalRequest, CreateSuggestionRequest, RequestId};
use super::response::{
    ApiResponse, ApprovalResponse, HealthResponse, SkillDecisionResponse, SuggestionResponse,
};

/// Path prefix of the callback API.
pub const API_PREFIX: &str = "/api/nofa/openclaw";

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Application state shared across handlers.
pub struct AppState<R, O>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    /// Registry-backed approval workflow.
    pub workflow: Arc<ApprovalWorkflow<R>>,
    /// Opportunity queue.
    pub skills: Arc<SkillQueue<O>>,
    /// Application version.
    pub version: String,
}

impl<R, O> Clone for AppState<R, O>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    fn clone(&self) -> Self {
        Self {
            workflow: Arc::clone(&self.workflow),
            skills: Arc::clone(&self.skills),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<R, O>(state: AppState<R, O>) -> Router
where
    R: TaskRepository + 'static,
    O: OpportunityRepository + 'static,
{
    let api = Router::new()
        .route("/health", get(health_check))
        .route("/accounts", post(connect_account))
        .route("/suggestions", post(create_suggestion))
        .route("/suggestions/import", post(import_suggestion))
        .route("/approvals", post(submit_approval))
        .route("/tasks/{task_id}", get(get_task))
        .route("/tasks/{task_id}/execute", post(execute_task))
        .route(
            "/skill/opportunities",
            post(create_opportunity).get(list_opportunities),
        )
        .route("/skill/opportunities/next", get(next_opportunity))
        .route(
            "/skill/opportunities/{opportunity_id}/decision",
            post(submit_skill_decision),
        )
        .route("/skill/decisions", get(list_skill_decisions));

    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, api)
        .with_state(state)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>, request_id: &RequestId) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| {
            ApiError::invalid_request(rejection.body_text()).with_request_id(request_id.0.clone())
        })
}

fn task_error(request_id: &RequestId) -> impl FnOnce(TaskError) -> ApiError + '_ {
    move |err| ApiError::from(err).with_request_id(request_id.0.clone())
}

fn queue_error(request_id: &RequestId) -> impl FnOnce(OpportunityError) -> ApiError + '_ {
    move |err| ApiError::from(err).with_request_id(request_id.0.clone())
}

/// Health check endpoint.
async fn health_check<R, O>(State(state): State<AppState<R, O>>) -> Json<HealthResponse>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Connect an exchange account (mock).
async fn connect_account<R, O>(
    State(state): State<AppState<R, O>>,
    request_id: RequestId,
    payload: Result<Json<ApiKeyConnection>, JsonRejection>,
) -> ApiResult<MockAccountResponse>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    let connection = body(payload, &request_id)?;
    let account = state.workflow.connect_account(&connection).await;

    Ok(Json(ApiResponse::ok(
        account,
        "OpenClaw connected to NOFA account (mock)",
    )))
}

/// Generate a suggestion and push it for approval.
async fn create_suggestion<R, O>(
    State(state): State<AppState<R, O>>,
    request_id: RequestId,
    payload: Result<Json<CreateSuggestionRequest>, JsonRejection>,
) -> ApiResult<SuggestionResponse>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    let request = body(payload, &request_id)?;
    let task = state
        .workflow
        .create_task(request.user_id, request.account_id)
        .await
        .map_err(task_error(&request_id))?;

    Ok(Json(ApiResponse::ok(
        SuggestionResponse::for_task(&task),
        "Suggestion delivered to OpenClaw approval channel (mock)",
    )))
}

/// Register a suggestion produced elsewhere; replays are ignored.
async fn import_suggestion<R, O>(
    State(state): State<AppState<R, O>>,
    request_id: RequestId,
    payload: Result<Json<TradeSuggestion>, JsonRejection>,
) -> ApiResult<SuggestionResponse>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    let suggestion = body(payload, &request_id)?;
    let outcome = state
        .workflow
        .submit_suggestion(suggestion)
        .await
        .map_err(task_error(&request_id))?;

    let message = if outcome.duplicate {
        "Duplicate suggestion ignored (idempotent)"
    } else {
        "Suggestion delivered to OpenClaw approval channel (mock)"
    };
    Ok(Json(ApiResponse::ok(
        SuggestionResponse::for_task(&outcome.task),
        message,
    )))
}

/// Approval callback.
async fn submit_approval<R, O>(
    State(state): State<AppState<R, O>>,
    request_id: RequestId,
    payload: Result<Json<ApprovalRequest>, JsonRejection>,
) -> ApiResult<ApprovalResponse>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    let request = body(payload, &request_id)?;
    tracing::debug!(
        request_id = %request_id.0,
        task_id = %request.task_id,
        channel = %request.channel,
        "Approval callback received"
    );

    let outcome = state
        .workflow
        .record_approval(
            &request.task_id,
            &request.suggestion_id,
            &request.decision,
            request.channel,
        )
        .await
        .map_err(task_error(&request_id))?;

    let message = if outcome.duplicate {
        "Duplicate approval ignored (idempotent)"
    } else if outcome
        .task
        .approval()
        .is_some_and(|approval| approval.decision.is_approval())
    {
        "Approval accepted"
    } else {
        "Rejection accepted"
    };
    Ok(Json(ApiResponse::ok(
        ApprovalResponse::for_task(&outcome.task),
        message,
    )))
}

/// Run the mock execution of an approved task.
async fn execute_task<R, O>(
    State(state): State<AppState<R, O>>,
    request_id: RequestId,
    Path(task_id): Path<String>,
) -> ApiResult<TradeDecisionTask>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    let task = state
        .workflow
        .execute(&TaskId::new(task_id))
        .await
        .map_err(task_error(&request_id))?;

    Ok(Json(ApiResponse::ok(
        task,
        "Mock execution completed. No live order was sent.",
    )))
}

/// Fetch a task with its full audit trail.
async fn get_task<R, O>(
    State(state): State<AppState<R, O>>,
    request_id: RequestId,
    Path(task_id): Path<String>,
) -> ApiResult<TradeDecisionTask>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    let task = state
        .workflow
        .get_task(&TaskId::new(task_id))
        .await
        .map_err(task_error(&request_id))?;

    Ok(Json(ApiResponse::ok(task, "Task loaded")))
}

/// Queue an opportunity for OpenClaw.
async fn create_opportunity<R, O>(
    State(state): State<AppState<R, O>>,
    request_id: RequestId,
    payload: Result<Json<NewOpportunity>, JsonRejection>,
) -> ApiResult<SkillOpportunity>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    let request = body(payload, &request_id)?;
    let opportunity = state
        .skills
        .create_opportunity(request)
        .await
        .map_err(queue_error(&request_id))?;

    Ok(Json(ApiResponse::ok(
        opportunity,
        "NOFA Trading Opportunity created for OpenClaw",
    )))
}

/// All opportunities, newest first.
async fn list_opportunities<R, O>(
    State(state): State<AppState<R, O>>,
    request_id: RequestId,
) -> ApiResult<Vec<SkillOpportunity>>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    let opportunities = state
        .skills
        .list_opportunities()
        .await
        .map_err(queue_error(&request_id))?;

    Ok(Json(ApiResponse::ok(opportunities, "Opportunity list fetched")))
}

/// Newest pending opportunity; `data` is `null` when the queue is drained.
async fn next_opportunity<R, O>(
    State(state): State<AppState<R, O>>,
    request_id: RequestId,
) -> ApiResult<Option<SkillOpportunity>>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    let next = state
        .skills
        .next_pending()
        .await
        .map_err(queue_error(&request_id))?;

    let message = if next.is_some() {
        "Next pending opportunity fetched"
    } else {
        "No pending opportunity"
    };
    Ok(Json(ApiResponse::ok(next, message)))
}

/// Human answer to a queued opportunity.
async fn submit_skill_decision<R, O>(
    State(state): State<AppState<R, O>>,
    request_id: RequestId,
    Path(opportunity_id): Path<String>,
    payload: Result<Json<DecisionReply>, JsonRejection>,
) -> ApiResult<SkillDecisionResponse>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    let reply = body(payload, &request_id)?;
    let outcome = state
        .skills
        .apply_decision(&OpportunityId::new(opportunity_id), reply)
        .await
        .map_err(queue_error(&request_id))?;

    Ok(Json(ApiResponse::ok(
        SkillDecisionResponse::from(outcome),
        "Decision recorded",
    )))
}

/// Decision log, newest first.
async fn list_skill_decisions<R, O>(
    State(state): State<AppState<R, O>>,
    request_id: RequestId,
) -> ApiResult<Vec<SkillDecision>>
where
    R: TaskRepository,
    O: OpportunityRepository,
{
    let decisions = state
        .skills
        .list_decisions()
        .await
        .map_err(queue_error(&request_id))?;

    Ok(Json(ApiResponse::ok(decisions, "Decision log fetched")))
}
