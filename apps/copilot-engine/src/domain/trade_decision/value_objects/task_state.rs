//! Lifecycle state of a trade decision task.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a task sits in the suggest → approve → execute lifecycle.
///
/// The simulator only produces `PendingApproval`, `Approved`, `Rejected` and
/// `Executed`; the remaining states are produced by other parts of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Suggestion created, not yet pushed to a channel.
    Suggested,
    /// Pushed to the approval channel.
    Pushed,
    /// Waiting on a human yes/no.
    PendingApproval,
    /// Human said yes.
    Approved,
    /// Human said no.
    Rejected,
    /// Order is being placed.
    Executing,
    /// Order placed.
    Executed,
    /// Execution failed.
    Failed,
    /// Suggestion expired before a decision.
    Expired,
}

impl TaskState {
    /// All lifecycle states in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Suggested,
        Self::Pushed,
        Self::PendingApproval,
        Self::Approved,
        Self::Rejected,
        Self::Executing,
        Self::Executed,
        Self::Failed,
        Self::Expired,
    ];

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Rejected | Self::Executed | Self::Failed | Self::Expired
        )
    }

    /// Returns true while a human decision can still be recorded.
    #[must_use]
    pub const fn awaits_human(&self) -> bool {
        matches!(self, Self::Suggested | Self::Pushed | Self::PendingApproval)
    }

    /// Wire name of the state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Suggested => "suggested",
            Self::Pushed => "pushed",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Executing => "executing",
            Self::Executed => "executed",
            Self::Failed => "failed",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(TaskState::Rejected.is_terminal());
        assert!(TaskState::Executed.is_terminal());
        assert!(TaskState::Failed.is_terminal());
        assert!(TaskState::Expired.is_terminal());
        assert!(!TaskState::PendingApproval.is_terminal());
        assert!(!TaskState::Approved.is_terminal());
    }

    #[test]
    fn awaits_human() {
        assert!(TaskState::PendingApproval.awaits_human());
        assert!(TaskState::Pushed.awaits_human());
        assert!(!TaskState::Approved.awaits_human());
        assert!(!TaskState::Executed.awaits_human());
    }

    #[test]
    fn serde_matches_display_for_every_state() {
        for state in TaskState::ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{state}\""));
            let parsed: TaskState = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, state);
        }
    }

    #[test]
    fn pending_approval_wire_name() {
        assert_eq!(TaskState::PendingApproval.as_str(), "pending_approval");
    }
}
