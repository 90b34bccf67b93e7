//! Application use cases.

mod approval_workflow;
mod skill_queue;

pub use approval_workflow::{ApprovalWorkflow, WorkflowOutcome};
pub use skill_queue::{DecisionOutcome, SkillQueue};
