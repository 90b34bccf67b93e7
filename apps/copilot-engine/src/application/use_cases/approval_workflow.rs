//! Approval Workflow Use Case
//!
//! Drives tasks through the registry: suggestions are registered once,
//! approval callbacks are checked against the stored task, and execution is
//! only allowed after an approval. The mock copilot underneath stays
//! permissive; every check lives here.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::application::services::MockCopilot;
use crate::domain::account::{ApiKeyConnection, MockAccountResponse};
use crate::domain::shared::{AccountId, SuggestionId, TaskId, Timestamp, UserId};
use crate::domain::trade_decision::{
    ApprovalChannel, Decision, ExecutionResult, NormalizedReply, TaskError, TaskRepository,
    TaskState, TaskStateMachine, TradeDecisionTask, TradeSuggestion,
};

/// Channel recorded for suggestions registered from outside the simulator.
const IMPORT_CHANNEL: ApprovalChannel = ApprovalChannel::OpenclawChat;

/// Result of an idempotent workflow call.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowOutcome {
    /// Current task snapshot.
    pub task: TradeDecisionTask,
    /// `true` when the call replayed an earlier one and changed nothing.
    pub duplicate: bool,
}

impl WorkflowOutcome {
    const fn fresh(task: TradeDecisionTask) -> Self {
        Self {
            task,
            duplicate: false,
        }
    }

    const fn replay(task: TradeDecisionTask) -> Self {
        Self {
            task,
            duplicate: true,
        }
    }
}

/// Use case tying the mock copilot to a task repository.
pub struct ApprovalWorkflow<R>
where
    R: TaskRepository,
{
    copilot: MockCopilot,
    task_repo: Arc<R>,
    // Serializes read-check-save sequences against the repository.
    write_gate: Mutex<()>,
}

impl<R> ApprovalWorkflow<R>
where
    R: TaskRepository,
{
    /// Create a new `ApprovalWorkflow`.
    pub fn new(copilot: MockCopilot, task_repo: Arc<R>) -> Self {
        Self {
            copilot,
            task_repo,
            write_gate: Mutex::new(()),
        }
    }

    /// The repository backing this workflow.
    pub const fn repository(&self) -> &Arc<R> {
        &self.task_repo
    }

    /// Connect an exchange account through the simulator.
    pub async fn connect_account(&self, connection: &ApiKeyConnection) -> MockAccountResponse {
        self.copilot.submit_mock_account(connection).await
    }

    /// Generate a suggestion for `user_id` and store the resulting task.
    pub async fn create_task(
        &self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<TradeDecisionTask, TaskError> {
        let task = self
            .copilot
            .generate_mock_suggestion(user_id, account_id)
            .await;
        self.task_repo.save(&task).await?;
        Ok(task)
    }

    /// Register an externally produced suggestion.
    ///
    /// A suggestion id seen before returns the existing task untouched.
    pub async fn submit_suggestion(
        &self,
        suggestion: TradeSuggestion,
    ) -> Result<WorkflowOutcome, TaskError> {
        let _gate = self.write_gate.lock().await;

        if let Some(existing) = self
            .task_repo
            .find_by_suggestion_id(&suggestion.suggestion_id)
            .await?
        {
            tracing::info!(
                task_id = %existing.task_id(),
                suggestion_id = %suggestion.suggestion_id,
                "Duplicate suggestion ignored"
            );
            return Ok(WorkflowOutcome::replay(existing));
        }

        let task = TradeDecisionTask::awaiting_approval(suggestion, IMPORT_CHANNEL, Timestamp::now());
        self.task_repo.save(&task).await?;

        tracing::info!(
            task_id = %task.task_id(),
            suggestion_id = %task.suggestion().suggestion_id,
            "Suggestion registered"
        );
        Ok(WorkflowOutcome::fresh(task))
    }

    /// Apply a human reply to a stored task.
    ///
    /// Checks, in order: the task exists, the suggestion matches, the reply
    /// is a yes or no, any earlier decision agrees, and the task is still
    /// awaiting approval. A `no` attaches a canceled execution result.
    pub async fn record_approval(
        &self,
        task_id: &TaskId,
        suggestion_id: &SuggestionId,
        reply: &str,
        channel: ApprovalChannel,
    ) -> Result<WorkflowOutcome, TaskError> {
        let _gate = self.write_gate.lock().await;
        let task = self.load(task_id).await?;

        if &task.suggestion().suggestion_id != suggestion_id {
            return Err(TaskError::SuggestionMismatch {
                task_id: task_id.to_string(),
                expected: task.suggestion().suggestion_id.to_string(),
                received: suggestion_id.to_string(),
            });
        }

        let NormalizedReply::Decided(decision) = Decision::normalize(reply) else {
            return Err(TaskError::NeedsConfirmation {
                reply: reply.to_string(),
            });
        };

        if let Some(existing) = task.approval() {
            if existing.decision == decision {
                tracing::info!(%task_id, %decision, "Duplicate approval ignored");
                return Ok(WorkflowOutcome::replay(task));
            }
            return Err(TaskError::ApprovalConflict {
                task_id: task_id.to_string(),
                existing: existing.decision,
                requested: decision,
            });
        }

        let target = if decision.is_approval() {
            TaskState::Approved
        } else {
            TaskState::Rejected
        };
        TaskStateMachine::validate_transition(task.state(), target)?;

        let mut decided = task.with_decision(decision, channel, Timestamp::now());
        if !decision.is_approval() {
            decided = decided.with_execution_result(ExecutionResult::canceled_by_rejection());
        }
        self.task_repo.save(&decided).await?;

        tracing::info!(
            %task_id,
            %decision,
            %channel,
            state = %decided.state(),
            "Approval recorded"
        );
        Ok(WorkflowOutcome::fresh(decided))
    }

    /// Run the mock execution for an approved task.
    ///
    /// The task is stored as `executing` while the simulator runs, so a
    /// second call in that window is refused. If the finished task cannot be
    /// stored, the task is moved to `failed` and the storage error returned.
    pub async fn execute(&self, task_id: &TaskId) -> Result<TradeDecisionTask, TaskError> {
        let executing = {
            let _gate = self.write_gate.lock().await;
            let task = self.load(task_id).await?;
            TaskStateMachine::validate_transition(task.state(), TaskState::Executing)?;

            let executing = task.begin_execution();
            self.task_repo.save(&executing).await?;
            executing
        };

        let executed = self.copilot.run_mock_execution(&executing).await;

        {
            let _gate = self.write_gate.lock().await;
            if let Err(err) = self.task_repo.save(&executed).await {
                let failed = executing.with_failure(ExecutionResult::failed(format!(
                    "Execution result could not be stored: {err}"
                )));
                match self.task_repo.save(&failed).await {
                    Ok(()) => tracing::warn!(%task_id, error = %err, "Task marked failed"),
                    Err(mark_err) => tracing::error!(
                        %task_id,
                        error = %err,
                        mark_error = %mark_err,
                        "Task left executing"
                    ),
                }
                return Err(err);
            }
        }

        tracing::info!(%task_id, state = %executed.state(), "Task executed");
        Ok(executed)
    }

    /// Fetch a stored task.
    pub async fn get_task(&self, task_id: &TaskId) -> Result<TradeDecisionTask, TaskError> {
        self.load(task_id).await
    }

    async fn load(&self, task_id: &TaskId) -> Result<TradeDecisionTask, TaskError> {
        self.task_repo
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| TaskError::NotFound {
                task_id: task_id.to_string(),
            })
    }
}
