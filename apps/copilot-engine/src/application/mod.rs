//! Application Layer
//!
//! Orchestrates the domain for callers:
//!
//! - **Services**: the latency-simulating mock copilot
//! - **Use Cases**: the registry-backed approval workflow and the skill queue

pub mod services;
pub mod use_cases;

pub use services::MockCopilot;
pub use use_cases::{ApprovalWorkflow, DecisionOutcome, SkillQueue, WorkflowOutcome};
