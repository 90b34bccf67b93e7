//! Trade Decision Bounded Context
//!
//! One copilot suggestion moving through delivery, human approval and
//! (mock) execution, with an append-only audit trail.
//!
//! # Key Concepts
//!
//! - **TradeDecisionTask**: aggregate root; transitions return new values
//! - **AuditEvent**: append-only history entries
//! - **TaskStateMachine**: lifecycle table used by the registry workflow

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{TradeDecisionTask, TradeSuggestion};
pub use errors::TaskError;
pub use events::{AuditEvent, AuditPayload, actors, event_types};
pub use repository::TaskRepository;
pub use services::TaskStateMachine;
pub use value_objects::{
    ApprovalChannel, ApprovalDecision, Decision, ExecutionResult, ExecutionStatus,
    NormalizedReply, OrderSide, RiskAssessment, RiskLevel, TaskState, TradeAction,
};
