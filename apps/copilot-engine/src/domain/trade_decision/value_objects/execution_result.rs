//! Outcome of a (mock) execution.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::OrderId;

/// Message attached to every successful mock execution.
pub const MOCK_SUCCESS_MESSAGE: &str = "Mock execution completed. No live order was sent.";

/// Message attached when a human rejection cancels execution.
pub const REJECTION_CANCELED_MESSAGE: &str = "Execution canceled by human rejection.";

/// Execution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// Order placed.
    Success,
    /// Order placement failed.
    Failed,
    /// Execution was called off.
    Canceled,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
            Self::Canceled => write!(f, "canceled"),
        }
    }
}

/// Result attached to a task once execution finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Outcome.
    pub status: ExecutionStatus,
    /// Mock order id, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_order_id: Option<OrderId>,
    /// Human-readable message.
    pub message: String,
}

impl ExecutionResult {
    /// Successful mock fill with a fresh order id.
    #[must_use]
    pub fn mock_success() -> Self {
        Self {
            status: ExecutionStatus::Success,
            mock_order_id: Some(OrderId::generate()),
            message: MOCK_SUCCESS_MESSAGE.to_string(),
        }
    }

    /// Execution that could not be completed.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::Failed,
            mock_order_id: None,
            message: message.into(),
        }
    }

    /// Execution called off because the human said no.
    #[must_use]
    pub fn canceled_by_rejection() -> Self {
        Self {
            status: ExecutionStatus::Canceled,
            mock_order_id: None,
            message: REJECTION_CANCELED_MESSAGE.to_string(),
        }
    }
}
