//! Human yes/no decision and free-text normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The human's answer to a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Approve the trade.
    Yes,
    /// Reject the trade.
    No,
}

/// Replies accepted as approval.
const YES_REPLIES: [&str; 4] = ["yes", "y", "approve", "approved"];
/// Replies accepted as rejection.
const NO_REPLIES: [&str; 4] = ["no", "n", "cancel", "reject"];

/// Result of interpreting a free-text chat reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizedReply {
    /// Reply maps to a decision.
    Decided(Decision),
    /// Reply is ambiguous; ask the human again.
    NeedsConfirmation,
}

impl Decision {
    /// Interpret a chat reply, case-insensitively and ignoring surrounding whitespace.
    #[must_use]
    pub fn normalize(reply: &str) -> NormalizedReply {
        let value = reply.trim().to_lowercase();
        if YES_REPLIES.contains(&value.as_str()) {
            NormalizedReply::Decided(Self::Yes)
        } else if NO_REPLIES.contains(&value.as_str()) {
            NormalizedReply::Decided(Self::No)
        } else {
            NormalizedReply::NeedsConfirmation
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    /// Returns true for approval.
    #[must_use]
    pub const fn is_approval(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("yes", NormalizedReply::Decided(Decision::Yes); "yes")]
    #[test_case(" Y ", NormalizedReply::Decided(Decision::Yes); "y_padded")]
    #[test_case("APPROVE", NormalizedReply::Decided(Decision::Yes); "approve_upper")]
    #[test_case("approved", NormalizedReply::Decided(Decision::Yes); "approved")]
    #[test_case("no", NormalizedReply::Decided(Decision::No); "no")]
    #[test_case("N", NormalizedReply::Decided(Decision::No); "n_upper")]
    #[test_case("cancel", NormalizedReply::Decided(Decision::No); "cancel")]
    #[test_case("Reject\n", NormalizedReply::Decided(Decision::No); "reject_newline")]
    #[test_case("maybe", NormalizedReply::NeedsConfirmation; "maybe")]
    #[test_case("", NormalizedReply::NeedsConfirmation; "empty")]
    fn normalizes_reply(input: &str, expected: NormalizedReply) {
        assert_eq!(Decision::normalize(input), expected);
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&Decision::Yes).unwrap(), "\"yes\"");
        let parsed: Decision = serde_json::from_str("\"no\"").unwrap();
        assert_eq!(parsed, Decision::No);
    }

    #[test]
    fn serde_rejects_free_text() {
        assert!(serde_json::from_str::<Decision>("\"approve\"").is_err());
    }
}
