//! Persistence Adapters
//!
//! Process-lifetime implementations of the task and opportunity repositories.

pub mod in_memory;
pub mod in_memory_opportunity;

pub use in_memory::InMemoryTaskRepository;
pub use in_memory_opportunity::InMemoryOpportunityRepository;
