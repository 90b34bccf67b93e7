//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.

mod identifiers;
mod timestamp;

pub use identifiers::{
    AccountId, ID_SUFFIX_LEN, OpportunityId, OrderId, SuggestionId, TaskId, UserId, prefixed_id,
};
pub use timestamp::Timestamp;
