//! Task State Machine Service
//!
//! Lifecycle table for trade decision tasks. The simulator does not consult
//! it; the registry-backed workflow does.

use crate::domain::trade_decision::errors::TaskError;
use crate::domain::trade_decision::value_objects::TaskState;

/// Validates task lifecycle transitions.
pub struct TaskStateMachine;

impl TaskStateMachine {
    /// Check if a state transition is valid.
    #[must_use]
    pub const fn is_valid_transition(from: TaskState, to: TaskState) -> bool {
        matches!(
            (from, to),
            // From Suggested
            (TaskState::Suggested, TaskState::Pushed)
                | (TaskState::Suggested, TaskState::PendingApproval)
                | (TaskState::Suggested, TaskState::Expired)
                // From Pushed
                | (TaskState::Pushed, TaskState::PendingApproval)
                | (TaskState::Pushed, TaskState::Expired)
                // From PendingApproval
                | (TaskState::PendingApproval, TaskState::Approved)
                | (TaskState::PendingApproval, TaskState::Rejected)
                | (TaskState::PendingApproval, TaskState::Expired)
                // From Approved
                | (TaskState::Approved, TaskState::Executing)
                | (TaskState::Approved, TaskState::Executed)
                | (TaskState::Approved, TaskState::Failed)
                // From Executing
                | (TaskState::Executing, TaskState::Executed)
                | (TaskState::Executing, TaskState::Failed)
        )
    }

    /// Validate a state transition.
    ///
    /// # Errors
    ///
    /// Returns error if the transition is invalid.
    pub fn validate_transition(from: TaskState, to: TaskState) -> Result<(), TaskError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(TaskError::InvalidStateTransition {
                from,
                to,
                reason: Self::transition_error_reason(from, to),
            })
        }
    }

    /// Get a human-readable reason for an invalid transition.
    #[must_use]
    pub fn transition_error_reason(from: TaskState, to: TaskState) -> String {
        match from {
            TaskState::Executed => format!("Task is already executed, cannot transition to {to}"),
            TaskState::Rejected => format!("Task was rejected, cannot transition to {to}"),
            TaskState::Failed => format!("Task execution failed, cannot transition to {to}"),
            TaskState::Expired => format!("Suggestion has expired, cannot transition to {to}"),
            TaskState::Suggested | TaskState::Pushed | TaskState::PendingApproval
                if matches!(to, TaskState::Executing | TaskState::Executed) =>
            {
                format!("Task is {from} and has no human approval yet")
            }
            _ => format!("Invalid transition from {from} to {to}"),
        }
    }

    /// Get all valid next states from a given state.
    #[must_use]
    pub fn valid_next_states(from: TaskState) -> Vec<TaskState> {
        TaskState::ALL
            .into_iter()
            .filter(|to| Self::is_valid_transition(from, *to))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulator_path_is_valid() {
        assert!(TaskStateMachine::is_valid_transition(
            TaskState::PendingApproval,
            TaskState::Approved
        ));
        assert!(TaskStateMachine::is_valid_transition(
            TaskState::PendingApproval,
            TaskState::Rejected
        ));
        assert!(TaskStateMachine::is_valid_transition(
            TaskState::Approved,
            TaskState::Executed
        ));
    }

    #[test]
    fn execution_requires_approval() {
        assert!(!TaskStateMachine::is_valid_transition(
            TaskState::PendingApproval,
            TaskState::Executed
        ));
        assert!(!TaskStateMachine::is_valid_transition(
            TaskState::Rejected,
            TaskState::Executed
        ));

        let reason = TaskStateMachine::transition_error_reason(
            TaskState::PendingApproval,
            TaskState::Executed,
        );
        assert!(reason.contains("no human approval"));
    }

    #[test]
    fn no_transitions_from_terminal_states() {
        for state in TaskState::ALL.into_iter().filter(TaskState::is_terminal) {
            assert!(TaskStateMachine::valid_next_states(state).is_empty());
        }
    }

    #[test]
    fn valid_next_states_from_pending() {
        let states = TaskStateMachine::valid_next_states(TaskState::PendingApproval);
        assert_eq!(
            states,
            vec![TaskState::Approved, TaskState::Rejected, TaskState::Expired]
        );
    }

    #[test]
    fn validate_transition_results() {
        assert!(
            TaskStateMachine::validate_transition(TaskState::Approved, TaskState::Executed).is_ok()
        );
        let err = TaskStateMachine::validate_transition(TaskState::Executed, TaskState::Approved)
            .unwrap_err();
        assert!(err.to_string().contains("already executed"));
    }
}
