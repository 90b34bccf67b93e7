//! Skill queue errors.

use std::fmt;

use super::opportunity::OpportunityStatus;

/// Errors raised while deciding queued opportunities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpportunityError {
    /// Opportunity not found.
    NotFound {
        /// Opportunity ID.
        opportunity_id: String,
    },

    /// Reply text could not be interpreted as yes or no.
    NeedsConfirmation {
        /// Raw reply.
        reply: String,
    },

    /// The opportunity was already settled differently or by someone else.
    InvalidState {
        /// Opportunity ID.
        opportunity_id: String,
        /// Current status.
        status: OpportunityStatus,
    },

    /// Queue store failure.
    Storage {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for OpportunityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { opportunity_id } => {
                write!(f, "Opportunity not found: {opportunity_id}")
            }
            Self::NeedsConfirmation { reply } => {
                write!(f, "Unknown decision text '{reply}', needs_confirmation")
            }
            Self::InvalidState {
                opportunity_id,
                status,
            } => write!(
                f,
                "Opportunity {opportunity_id} does not accept decision in current state ({status})"
            ),
            Self::Storage { message } => write!(f, "Opportunity storage error: {message}"),
        }
    }
}

impl std::error::Error for OpportunityError {}
