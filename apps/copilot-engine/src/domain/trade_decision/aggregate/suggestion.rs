//! Trade suggestion produced by the copilot.

use serde::{Deserialize, Serialize};

use crate::domain::account::{Exchange, TradingMode};
use crate::domain::shared::{AccountId, SuggestionId, Timestamp, UserId};
use crate::domain::trade_decision::value_objects::{
    OrderSide, RiskAssessment, RiskLevel, TradeAction,
};

/// Symbol of the canned suggestion.
pub const MOCK_SYMBOL: &str = "BTCUSDT";
/// Rationale of the canned suggestion.
pub const MOCK_RATIONALE: &str = "MACD reversal with bullish funding rate";

/// A proposed trade awaiting a human decision. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSuggestion {
    /// Suggestion identifier.
    pub suggestion_id: SuggestionId,
    /// Account owner.
    pub user_id: UserId,
    /// Account the trade targets.
    pub account_id: AccountId,
    /// Autonomy mode.
    pub mode: TradingMode,
    /// Exchange.
    pub exchange: Exchange,
    /// Trading pair.
    pub symbol: String,
    /// Order action.
    pub action: TradeAction,
    /// Side.
    pub side: OrderSide,
    /// Size in base units.
    pub quantity: f64,
    /// Leverage multiple.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leverage: Option<f64>,
    /// Take-profit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tp: Option<f64>,
    /// Stop-loss price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sl: Option<f64>,
    /// Why the copilot proposes this trade.
    pub rationale: String,
    /// After this instant the suggestion should not be acted on.
    pub expires_at: Timestamp,
    /// Risk annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskAssessment>,
}

impl TradeSuggestion {
    /// The canned BTCUSDT long used by the simulator, expiring `ttl` after `now`.
    #[must_use]
    pub fn mock(
        user_id: UserId,
        account_id: AccountId,
        now: Timestamp,
        ttl: chrono::Duration,
    ) -> Self {
        Self {
            suggestion_id: SuggestionId::generate(),
            user_id,
            account_id,
            mode: TradingMode::Copilot,
            exchange: Exchange::Binance,
            symbol: MOCK_SYMBOL.to_string(),
            action: TradeAction::OpenNewOrder,
            side: OrderSide::Buy,
            quantity: 0.1,
            leverage: Some(8.0),
            tp: Some(65_000.0),
            sl: Some(62_500.0),
            rationale: MOCK_RATIONALE.to_string(),
            expires_at: now.plus(ttl),
            risk: Some(RiskAssessment {
                confidence: Some(0.72),
                risk_level: Some(RiskLevel::Medium),
            }),
        }
    }

    /// Returns true once `now` is past the expiry.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }
}
