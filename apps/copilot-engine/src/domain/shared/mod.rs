//! Shared Domain Types
//!
//! Identifiers and timestamps shared across bounded contexts.

pub mod value_objects;

pub use value_objects::{
    AccountId, ID_SUFFIX_LEN, OpportunityId, OrderId, SuggestionId, TaskId, Timestamp, UserId,
    prefixed_id,
};
