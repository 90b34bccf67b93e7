// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Copilot Engine - Rust Core Library
//!
//! Mock human-in-the-loop trading workflow for NOFA Copilot and OpenClaw:
//! a suggestion is generated, delivered for approval, answered yes or no by a
//! human, and (on request) executed against a simulator. Nothing touches a
//! real exchange or chat channel.
//!
//! # Architecture (DDD + Hexagonal)
//!
//! - **Domain**: task aggregate, suggestion, audit events, lifecycle table
//!   - `account`: credential intake and key masking
//!   - `trade_decision`: suggest → approve → execute lifecycle
//!   - `skill_queue`: admin opportunities awaiting a human yes/no
//!
//! - **Application**
//!   - `services`: `MockCopilot`, the latency-simulating core
//!   - `use_cases`: `ApprovalWorkflow`, registry-backed and lifecycle-checked;
//!     `SkillQueue` for opportunities
//!
//! - **Infrastructure**
//!   - `persistence`: in-memory task registry and skill queue
//!   - `http`: axum callback API

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - Core business types with no infrastructure dependencies.
pub mod domain;

/// Application layer - Simulator and use cases.
pub mod application;

/// Infrastructure layer - Adapters.
pub mod infrastructure;

/// YAML configuration.
pub mod config;

/// HTTP-facing errors.
pub mod error;

/// Tracing setup.
pub mod telemetry;

pub use application::{ApprovalWorkflow, MockCopilot, SkillQueue, WorkflowOutcome};
pub use domain::account::{ApiKeyConnection, MockAccountResponse, mask_api_key};
pub use domain::skill_queue::{OpportunityError, SkillDecision, SkillOpportunity};
pub use domain::trade_decision::{
    AuditEvent, Decision, ExecutionResult, TaskError, TaskState, TradeDecisionTask,
    TradeSuggestion,
};
pub use error::{ApiError, ErrorCode};
