//! Trade decision errors.
//!
//! The mock simulator itself never fails; these errors come from the
//! registry-backed workflow that enforces the lifecycle.

use std::fmt;

use super::value_objects::{Decision, TaskState};

/// Errors raised while driving a task through its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Invalid state transition attempted.
    InvalidStateTransition {
        /// Current state.
        from: TaskState,
        /// Attempted state.
        to: TaskState,
        /// Reason for failure.
        reason: String,
    },

    /// Task not found.
    NotFound {
        /// Task ID.
        task_id: String,
    },

    /// Callback references a different suggestion than the task holds.
    SuggestionMismatch {
        /// Task ID.
        task_id: String,
        /// Suggestion held by the task.
        expected: String,
        /// Suggestion named by the caller.
        received: String,
    },

    /// A different decision was already recorded.
    ApprovalConflict {
        /// Task ID.
        task_id: String,
        /// Recorded decision.
        existing: Decision,
        /// Decision in the new callback.
        requested: Decision,
    },

    /// Reply text could not be interpreted as yes or no.
    NeedsConfirmation {
        /// Raw reply.
        reply: String,
    },

    /// Task store failure.
    Storage {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStateTransition { from, to, reason } => {
                write!(f, "Invalid task state transition: {from} -> {to}: {reason}")
            }
            Self::NotFound { task_id } => write!(f, "Task not found: {task_id}"),
            Self::SuggestionMismatch {
                task_id,
                expected,
                received,
            } => write!(
                f,
                "Suggestion mismatch for task {task_id}: expected {expected}, got {received}"
            ),
            Self::ApprovalConflict {
                task_id,
                existing,
                requested,
            } => write!(
                f,
                "Task {task_id} already has decision '{existing}', cannot record '{requested}'"
            ),
            Self::NeedsConfirmation { reply } => {
                write!(f, "Unknown decision text '{reply}', needs_confirmation")
            }
            Self::Storage { message } => write!(f, "Task storage error: {message}"),
        }
    }
}

impl std::error::Error for TaskError {}
