//! HTTP request DTOs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{AccountId, SuggestionId, TaskId, UserId};
use crate::domain::trade_decision::ApprovalChannel;

/// Header carrying the caller's correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request to generate a suggestion for an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSuggestionRequest {
    /// Account owner.
    pub user_id: UserId,
    /// Connected account.
    pub account_id: AccountId,
}

/// Approval callback from the chat channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Task being decided.
    pub task_id: TaskId,
    /// Suggestion the human saw.
    pub suggestion_id: SuggestionId,
    /// Raw reply text, e.g. `yes` or `Cancel`.
    pub decision: String,
    /// Channel the reply came from.
    #[serde(default = "default_channel")]
    pub channel: ApprovalChannel,
}

const fn default_channel() -> ApprovalChannel {
    ApprovalChannel::OpenclawChat
}

/// Correlation id from `X-Request-ID`, or a fresh UUID when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string);
        Ok(Self(id))
    }
}
