//! Domain Layer
//!
//! Business types and rules with no infrastructure dependencies.
//!
//! # Bounded Contexts
//!
//! - [`account`]: Exchange credentials and the mock connection record
//! - [`trade_decision`]: Suggestion → approval → execution lifecycle
//! - [`skill_queue`]: Admin-queued opportunities awaiting a human yes/no

pub mod account;
pub mod shared;
pub mod skill_queue;
pub mod trade_decision;
