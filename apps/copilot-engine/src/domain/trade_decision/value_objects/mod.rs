//! Trade Decision Value Objects

mod approval;
mod decision;
mod execution_result;
mod risk;
mod task_state;
mod trade_action;

pub use approval::{ApprovalChannel, ApprovalDecision};
pub use decision::{Decision, NormalizedReply};
pub use execution_result::{
    ExecutionResult, ExecutionStatus, MOCK_SUCCESS_MESSAGE, REJECTION_CANCELED_MESSAGE,
};
pub use risk::{RiskAssessment, RiskLevel};
pub use task_state::TaskState;
pub use trade_action::{OrderSide, TradeAction};
