//! Trade decision aggregates.

mod suggestion;
mod task;

pub use suggestion::{MOCK_RATIONALE, MOCK_SYMBOL, TradeSuggestion};
pub use task::TradeDecisionTask;
