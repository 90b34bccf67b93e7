//! Exchange connection request and the mock connection response.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{AccountId, UserId};

/// Permissions the mock connector always reports.
pub const MOCK_PERMISSIONS: [&str; 2] = ["trade", "read"];

/// Supported exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    /// Binance futures.
    Binance,
    /// Aster DEX.
    Aster,
    /// Hyperliquid.
    Hyperliquid,
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binance => write!(f, "binance"),
            Self::Aster => write!(f, "aster"),
            Self::Hyperliquid => write!(f, "hyperliquid"),
        }
    }
}

/// How much autonomy the agent has on the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingMode {
    /// Agent trades on its own.
    Pilot,
    /// Agent suggests, a human approves.
    Copilot,
}

impl fmt::Display for TradingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pilot => write!(f, "pilot"),
            Self::Copilot => write!(f, "copilot"),
        }
    }
}

/// Credentials submitted to connect an exchange account.
///
/// No field is validated; empty strings are accepted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyConnection {
    /// Owner of the account.
    pub user_id: UserId,
    /// Target exchange.
    pub exchange: Exchange,
    /// API key.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
    /// Optional human label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Autonomy mode.
    pub mode: TradingMode,
}

// Secrets must never reach logs.
impl fmt::Debug for ApiKeyConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyConnection")
            .field("user_id", &self.user_id)
            .field("exchange", &self.exchange)
            .field("api_key", &super::mask_api_key(&self.api_key))
            .field("api_secret", &"<redacted>")
            .field("label", &self.label)
            .field("mode", &self.mode)
            .finish()
    }
}

/// Status reported for a mock connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    /// Connected through the simulator; no exchange was contacted.
    #[serde(rename = "connected_mock")]
    ConnectedMock,
}

/// Fabricated connected-account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockAccountResponse {
    /// Freshly generated account id.
    pub account_id: AccountId,
    /// Always `connected_mock`.
    pub status: AccountStatus,
    /// Always `["trade", "read"]`.
    pub permissions_detected: Vec<String>,
    /// Redacted form of the submitted API key.
    pub masked_key: String,
}

impl MockAccountResponse {
    /// Build the canned response for a connection request.
    #[must_use]
    pub fn for_connection(connection: &ApiKeyConnection) -> Self {
        Self {
            account_id: AccountId::generate(),
            status: AccountStatus::ConnectedMock,
            permissions_detected: MOCK_PERMISSIONS.iter().map(ToString::to_string).collect(),
            masked_key: super::mask_api_key(&connection.api_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(api_key: &str) -> ApiKeyConnection {
        ApiKeyConnection {
            user_id: UserId::new("alice"),
            exchange: Exchange::Hyperliquid,
            api_key: api_key.to_string(),
            api_secret: "super-secret-value".to_string(),
            label: None,
            mode: TradingMode::Pilot,
        }
    }

    #[test]
    fn debug_never_prints_secret() {
        let rendered = format!("{:?}", connection("123456789"));
        assert!(!rendered.contains("super-secret-value"));
        assert!(!rendered.contains("123456789"));
        assert!(rendered.contains("1234***6789"));
    }

    #[test]
    fn response_is_canned_regardless_of_input() {
        let response = MockAccountResponse::for_connection(&connection(""));
        assert_eq!(response.status, AccountStatus::ConnectedMock);
        assert_eq!(response.permissions_detected, vec!["trade", "read"]);
        assert_eq!(response.masked_key, "");
        assert!(response.account_id.as_str().starts_with("acc_binance_"));
    }

    #[test]
    fn connection_serde_uses_lowercase_enums() {
        let json = r#"{
            "user_id": "alice",
            "exchange": "aster",
            "api_key": "k",
            "api_secret": "s",
            "mode": "copilot"
        }"#;
        let parsed: ApiKeyConnection = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.exchange, Exchange::Aster);
        assert_eq!(parsed.mode, TradingMode::Copilot);
        assert!(parsed.label.is_none());
    }

    #[test]
    fn status_serializes_as_literal() {
        let json = serde_json::to_string(&AccountStatus::ConnectedMock).unwrap();
        assert_eq!(json, "\"connected_mock\"");
    }
}
