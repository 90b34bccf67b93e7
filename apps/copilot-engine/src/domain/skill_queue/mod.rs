//! Skill Queue Bounded Context
//!
//! Admin-queued trading opportunities that OpenClaw puts in front of a
//! human. Each one takes a single yes or no; every decision also lands in a
//! newest-first log.

pub mod errors;
pub mod opportunity;
pub mod repository;

pub use errors::OpportunityError;
pub use opportunity::{
    DEFAULT_REQUESTER, DEFAULT_TITLE, DecisionReply, NewOpportunity, OpportunityStatus,
    SkillDecision, SkillOpportunity,
};
pub use repository::OpportunityRepository;
