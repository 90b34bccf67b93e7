//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

use crate::application::DecisionOutcome;
use crate::domain::shared::{OpportunityId, TaskId};
use crate::domain::skill_queue::{OpportunityStatus, SkillDecision};
use crate::domain::trade_decision::{TaskState, TradeDecisionTask};

/// Success envelope shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true`; failures use the error body.
    pub success: bool,
    /// Endpoint payload.
    pub data: T,
    /// Human-readable summary.
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Delivery state of a suggestion push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Pushed to the simulated channel.
    SentMock,
}

/// Response to suggestion creation or import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResponse {
    /// Task tracking the suggestion.
    pub task_id: TaskId,
    /// Always `sent_mock`.
    pub delivery_status: DeliveryStatus,
    /// Task state at response time.
    pub approval_status: TaskState,
}

impl SuggestionResponse {
    /// Summarize a stored task.
    #[must_use]
    pub fn for_task(task: &TradeDecisionTask) -> Self {
        Self {
            task_id: task.task_id().clone(),
            delivery_status: DeliveryStatus::SentMock,
            approval_status: task.state(),
        }
    }
}

/// What happens to execution after an approval callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionOutlook {
    /// Approved; `POST /tasks/{task_id}/execute` runs it.
    AwaitingExecution,
    /// Mock execution in flight.
    ExecutingMock,
    /// Mock execution already done.
    CompletedMock,
    /// Rejected; nothing will run.
    Canceled,
}

impl ExecutionOutlook {
    /// Outlook for a task in `state`.
    #[must_use]
    pub const fn for_state(state: TaskState) -> Self {
        match state {
            TaskState::Executing => Self::ExecutingMock,
            TaskState::Executed => Self::CompletedMock,
            TaskState::Rejected
            | TaskState::Failed
            | TaskState::Expired => Self::Canceled,
            TaskState::Suggested
            | TaskState::Pushed
            | TaskState::PendingApproval
            | TaskState::Approved => Self::AwaitingExecution,
        }
    }
}

/// Response to an approval callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalResponse {
    /// Always `accepted`.
    pub status: String,
    /// Task state after the callback.
    pub next_state: TaskState,
    /// Execution outlook.
    pub execution_status: ExecutionOutlook,
}

impl ApprovalResponse {
    /// Summarize a decided task.
    #[must_use]
    pub fn for_task(task: &TradeDecisionTask) -> Self {
        Self {
            status: "accepted".to_string(),
            next_state: task.state(),
            execution_status: ExecutionOutlook::for_state(task.state()),
        }
    }
}

/// Response to an opportunity decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDecisionResponse {
    /// Opportunity decided.
    pub opportunity_id: OpportunityId,
    /// Status after the call.
    pub status: OpportunityStatus,
    /// Recorded decision.
    pub decision: Option<SkillDecision>,
    /// Whether the call replayed an earlier decision.
    pub duplicate: bool,
}

impl From<DecisionOutcome> for SkillDecisionResponse {
    fn from(outcome: DecisionOutcome) -> Self {
        Self {
            opportunity_id: outcome.opportunity.id().clone(),
            status: outcome.opportunity.status(),
            decision: outcome.opportunity.decision().cloned(),
            duplicate: outcome.duplicate,
        }
    }
}
