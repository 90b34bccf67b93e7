//! Audit trail entries appended to a task.
//!
//! Events are append-only and kept in insertion order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::aggregate::TradeSuggestion;
use super::value_objects::{ApprovalChannel, ApprovalDecision, ExecutionResult};
use crate::domain::shared::{TaskId, Timestamp};

/// Free-form payload carried by an audit event.
pub type AuditPayload = Map<String, Value>;

/// Event type strings.
pub mod event_types {
    /// Copilot produced a suggestion.
    pub const SUGGESTION_GENERATED: &str = "suggestion.generated";
    /// OpenClaw pushed the approval request to a channel.
    pub const DELIVERY_SENT: &str = "openclaw.delivery.sent";
    /// Human replied.
    pub const APPROVAL_RECEIVED: &str = "approval.received";
    /// Simulator completed the order.
    pub const EXECUTION_MOCK_SUCCESS: &str = "execution.mock.success";
}

/// Actor strings.
pub mod actors {
    /// Suggestion generator.
    pub const COPILOT: &str = "nofa-copilot";
    /// Delivery runtime.
    pub const OPENCLAW_RUNTIME: &str = "openclaw-runtime";
    /// The approving human.
    pub const HUMAN: &str = "human";
    /// Execution simulator.
    pub const EXECUTION_SIMULATOR: &str = "nofa-execution-simulator";
}

/// One entry in a task's audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// When the event happened.
    pub time: Timestamp,
    /// Dotted event type, see [`event_types`].
    #[serde(rename = "type")]
    pub event_type: String,
    /// Who produced the event, see [`actors`].
    pub actor: String,
    /// Human-readable summary.
    pub summary: String,
    /// Optional structured details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<AuditPayload>,
}

impl AuditEvent {
    /// Create an event; `payload` is kept only when it is a JSON object.
    #[must_use]
    pub fn new(
        time: Timestamp,
        event_type: impl Into<String>,
        actor: impl Into<String>,
        summary: impl Into<String>,
        payload: Option<Value>,
    ) -> Self {
        Self {
            time,
            event_type: event_type.into(),
            actor: actor.into(),
            summary: summary.into(),
            payload: payload.and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            }),
        }
    }

    /// `suggestion.generated` for a fresh suggestion.
    #[must_use]
    pub fn suggestion_generated(suggestion: &TradeSuggestion, time: Timestamp) -> Self {
        Self::new(
            time,
            event_types::SUGGESTION_GENERATED,
            actors::COPILOT,
            "NOFA Copilot generated a trade suggestion.",
            Some(json!({
                "suggestion_id": suggestion.suggestion_id,
                "symbol": suggestion.symbol,
            })),
        )
    }

    /// `openclaw.delivery.sent` for a push on `channel`.
    #[must_use]
    pub fn delivery_sent(channel: ApprovalChannel, delivery_task_id: &TaskId, time: Timestamp) -> Self {
        Self::new(
            time,
            event_types::DELIVERY_SENT,
            actors::OPENCLAW_RUNTIME,
            "OpenClaw sent a Slack/Telegram-style approval request (mock).",
            Some(json!({
                "channel": channel,
                "task_id": delivery_task_id,
            })),
        )
    }

    /// `approval.received`, timed at the decision.
    #[must_use]
    pub fn approval_received(approval: &ApprovalDecision) -> Self {
        Self::new(
            approval.decided_at,
            event_types::APPROVAL_RECEIVED,
            actors::HUMAN,
            format!(
                "Human replied {} to the trade suggestion.",
                approval.decision.as_str().to_uppercase()
            ),
            Some(json!({
                "decision": approval.decision,
                "channel": approval.channel,
            })),
        )
    }

    /// `execution.mock.success` for a completed mock order.
    #[must_use]
    pub fn execution_succeeded(result: &ExecutionResult, time: Timestamp) -> Self {
        Self::new(
            time,
            event_types::EXECUTION_MOCK_SUCCESS,
            actors::EXECUTION_SIMULATOR,
            "Mock order execution completed after approval.",
            Some(json!({ "status": result.status })),
        )
    }

    /// Look up a payload field.
    #[must_use]
    pub fn payload_field(&self, key: &str) -> Option<&Value> {
        self.payload.as_ref().and_then(|payload| payload.get(key))
    }
}
