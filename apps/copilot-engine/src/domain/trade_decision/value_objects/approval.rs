//! Recorded approval decision.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Decision;
use crate::domain::shared::{SuggestionId, TaskId, Timestamp, UserId};

/// Channel the approval request was delivered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalChannel {
    /// Slack message with buttons.
    Slack,
    /// Telegram bot.
    Telegram,
    /// OpenClaw in-app chat.
    OpenclawChat,
}

impl ApprovalChannel {
    /// Wire name of the channel.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Slack => "slack",
            Self::Telegram => "telegram",
            Self::OpenclawChat => "openclaw_chat",
        }
    }
}

impl fmt::Display for ApprovalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A human decision, created exactly once per task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    /// Task the decision applies to.
    pub task_id: TaskId,
    /// Suggestion the decision applies to.
    pub suggestion_id: SuggestionId,
    /// Yes or no.
    pub decision: Decision,
    /// Who decided.
    pub approved_by: UserId,
    /// Where the reply came from.
    pub channel: ApprovalChannel,
    /// When the reply was recorded.
    pub decided_at: Timestamp,
}
