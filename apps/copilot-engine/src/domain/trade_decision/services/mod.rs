//! Trade decision domain services.

mod task_state_machine;

pub use task_state_machine::TaskStateMachine;
