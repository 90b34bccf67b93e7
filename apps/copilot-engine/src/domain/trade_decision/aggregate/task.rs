//! Trade Decision Task Aggregate Root
//!
//! Tracks one suggestion from delivery through approval to execution.
//! Transitions never mutate the receiver: each returns a new task with the
//! updated fields and one more audit event.

use serde::{Deserialize, Serialize};

use super::TradeSuggestion;
use crate::domain::shared::{TaskId, Timestamp};
use crate::domain::trade_decision::events::AuditEvent;
use crate::domain::trade_decision::value_objects::{
    ApprovalChannel, ApprovalDecision, Decision, ExecutionResult, TaskState,
};

/// Aggregate root for the approval lifecycle of one suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDecisionTask {
    task_id: TaskId,
    state: TaskState,
    suggestion: TradeSuggestion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    approval: Option<ApprovalDecision>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    execution_result: Option<ExecutionResult>,
    audit_events: Vec<AuditEvent>,
}

impl TradeDecisionTask {
    /// A freshly delivered task waiting on a human.
    ///
    /// The trail starts with `suggestion.generated` followed by
    /// `openclaw.delivery.sent`; the delivery carries its own task id.
    #[must_use]
    pub fn awaiting_approval(
        suggestion: TradeSuggestion,
        channel: ApprovalChannel,
        now: Timestamp,
    ) -> Self {
        let delivery_task_id = TaskId::generate();
        let audit_events = vec![
            AuditEvent::suggestion_generated(&suggestion, now),
            AuditEvent::delivery_sent(channel, &delivery_task_id, now),
        ];

        Self {
            task_id: TaskId::generate(),
            state: TaskState::PendingApproval,
            suggestion,
            approval: None,
            execution_result: None,
            audit_events,
        }
    }

    /// Copy of this task with the human's decision recorded.
    ///
    /// No prior-state check happens here; see `TaskStateMachine`.
    #[must_use]
    pub fn with_decision(
        &self,
        decision: Decision,
        channel: ApprovalChannel,
        decided_at: Timestamp,
    ) -> Self {
        let approval = ApprovalDecision {
            task_id: self.task_id.clone(),
            suggestion_id: self.suggestion.suggestion_id.clone(),
            decision,
            approved_by: self.suggestion.user_id.clone(),
            channel,
            decided_at,
        };

        let mut next = self.clone();
        next.state = if decision.is_approval() {
            TaskState::Approved
        } else {
            TaskState::Rejected
        };
        next.audit_events.push(AuditEvent::approval_received(&approval));
        next.approval = Some(approval);
        next
    }

    /// Copy of this task marked `executing`; the trail is unchanged.
    #[must_use]
    pub fn begin_execution(&self) -> Self {
        let mut next = self.clone();
        next.state = TaskState::Executing;
        next
    }

    /// Copy of this task forced to `executed` with `result` attached.
    #[must_use]
    pub fn with_execution(&self, result: ExecutionResult, at: Timestamp) -> Self {
        let mut next = self.clone();
        next.state = TaskState::Executed;
        next.audit_events
            .push(AuditEvent::execution_succeeded(&result, at));
        next.execution_result = Some(result);
        next
    }

    /// Copy of this task marked `failed` with `result` attached; the trail is unchanged.
    #[must_use]
    pub fn with_failure(&self, result: ExecutionResult) -> Self {
        let mut next = self.clone();
        next.state = TaskState::Failed;
        next.execution_result = Some(result);
        next
    }

    /// Copy of this task with an execution result attached and nothing else changed.
    #[must_use]
    pub fn with_execution_result(&self, result: ExecutionResult) -> Self {
        let mut next = self.clone();
        next.execution_result = Some(result);
        next
    }

    /// Task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// The owned suggestion.
    #[must_use]
    pub const fn suggestion(&self) -> &TradeSuggestion {
        &self.suggestion
    }

    /// Recorded human decision, if any.
    #[must_use]
    pub const fn approval(&self) -> Option<&ApprovalDecision> {
        self.approval.as_ref()
    }

    /// Execution outcome, if any.
    #[must_use]
    pub const fn execution_result(&self) -> Option<&ExecutionResult> {
        self.execution_result.as_ref()
    }

    /// Audit trail in insertion order.
    #[must_use]
    pub fn audit_events(&self) -> &[AuditEvent] {
        &self.audit_events
    }

    /// Event types of the audit trail, in order.
    #[must_use]
    pub fn audit_event_types(&self) -> Vec<&str> {
        self.audit_events
            .iter()
            .map(|event| event.event_type.as_str())
            .collect()
    }
}
