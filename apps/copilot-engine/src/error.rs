//! HTTP-facing error handling for the copilot engine.
//!
//! Domain errors are mapped onto a small set of [`ErrorCode`]s, each with a
//! stable reason string, an HTTP status and the numeric code carried in the
//! response body.
//!
//! | Reason | HTTP | Code | Usage |
//! |--------|------|------|-------|
//! | `INVALID_REQUEST` | 400 | 40001 | Malformed request body |
//! | `SUGGESTION_MISMATCH` | 403 | 40301 | Callback names another suggestion |
//! | `TASK_NOT_FOUND` | 404 | 40401 | Unknown task id |
//! | `APPROVAL_CONFLICT` | 409 | 40901 | Different decision already recorded |
//! | `INVALID_STATE` | 409 | 40901 | Lifecycle forbids the operation |
//! | `NEEDS_CONFIRMATION` | 422 | 42201 | Reply text is neither yes nor no |
//! | `OPPORTUNITY_NOT_FOUND` | 404 | 40411 | Unknown opportunity id |
//! | `OPPORTUNITY_INVALID_STATE` | 409 | 40911 | Opportunity already settled |
//! | `OPPORTUNITY_NEEDS_CONFIRMATION` | 422 | 42211 | Reply text is neither yes nor no |
//! | `INTERNAL_ERROR` | 500 | 50001 | Task or queue store failure |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shared::Timestamp;
use crate::domain::skill_queue::OpportunityError;
use crate::domain::trade_decision::TaskError;

/// Error codes for the HTTP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed request body.
    InvalidRequest,
    /// Callback references a different suggestion.
    SuggestionMismatch,
    /// Task not found.
    TaskNotFound,
    /// A different decision was already recorded.
    ApprovalConflict,
    /// The task's state does not allow the operation.
    InvalidState,
    /// Decision text could not be interpreted.
    NeedsConfirmation,
    /// Opportunity not found.
    OpportunityNotFound,
    /// Opportunity no longer takes this decision.
    OpportunityInvalidState,
    /// Opportunity reply could not be interpreted.
    OpportunityNeedsConfirmation,
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// HTTP status for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::SuggestionMismatch => StatusCode::FORBIDDEN,
            Self::TaskNotFound | Self::OpportunityNotFound => StatusCode::NOT_FOUND,
            Self::ApprovalConflict | Self::InvalidState | Self::OpportunityInvalidState => {
                StatusCode::CONFLICT
            }
            Self::NeedsConfirmation | Self::OpportunityNeedsConfirmation => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Numeric code reported in the response body.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::InvalidRequest => 40001,
            Self::SuggestionMismatch => 40301,
            Self::TaskNotFound => 40401,
            Self::ApprovalConflict | Self::InvalidState => 40901,
            Self::NeedsConfirmation => 42201,
            Self::OpportunityNotFound => 40411,
            Self::OpportunityInvalidState => 40911,
            Self::OpportunityNeedsConfirmation => 42211,
            Self::InternalError => 50001,
        }
    }

    /// Stable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::SuggestionMismatch => "SUGGESTION_MISMATCH",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::ApprovalConflict => "APPROVAL_CONFLICT",
            Self::InvalidState => "INVALID_STATE",
            Self::NeedsConfirmation => "NEEDS_CONFIRMATION",
            Self::OpportunityNotFound => "OPPORTUNITY_NOT_FOUND",
            Self::OpportunityInvalidState => "OPPORTUNITY_INVALID_STATE",
            Self::OpportunityNeedsConfirmation => "OPPORTUNITY_NEEDS_CONFIRMATION",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// An error returned by an HTTP handler.
#[derive(Debug, Error)]
#[error("[{}] {message}", .code.reason())]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    request_id: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            request_id: None,
        }
    }

    /// Attach the request id echoed in the response.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Malformed request.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the request id, if one was attached.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Build the error response body.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            message: self.message.clone(),
            code: self.code.code(),
            request_id: self
                .request_id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            timestamp: Timestamp::now().to_iso_string(),
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        let code = match &err {
            TaskError::NotFound { .. } => ErrorCode::TaskNotFound,
            TaskError::SuggestionMismatch { .. } => ErrorCode::SuggestionMismatch,
            TaskError::ApprovalConflict { .. } => ErrorCode::ApprovalConflict,
            TaskError::InvalidStateTransition { .. } => ErrorCode::InvalidState,
            TaskError::NeedsConfirmation { .. } => ErrorCode::NeedsConfirmation,
            TaskError::Storage { .. } => ErrorCode::InternalError,
        };
        Self::new(code, err.to_string())
    }
}

impl From<OpportunityError> for ApiError {
    fn from(err: OpportunityError) -> Self {
        let code = match &err {
            OpportunityError::NotFound { .. } => ErrorCode::OpportunityNotFound,
            OpportunityError::NeedsConfirmation { .. } => ErrorCode::OpportunityNeedsConfirmation,
            OpportunityError::InvalidState { .. } => ErrorCode::OpportunityInvalidState,
            OpportunityError::Storage { .. } => ErrorCode::InternalError,
        };
        Self::new(code, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.code == ErrorCode::InternalError {
            tracing::error!(code = %self.code, message = %self.message, "Request failed");
        } else {
            tracing::debug!(code = %self.code, message = %self.message, "Request rejected");
        }
        (self.code.http_status(), Json(self.to_body())).into_response()
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// Numeric error code.
    pub code: u32,
    /// Echoed `X-Request-ID`, or a generated UUID.
    pub request_id: String,
    /// When the error was produced.
    pub timestamp: String,
}
