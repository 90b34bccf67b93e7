//! Application services.

mod mock_copilot;

pub use mock_copilot::MockCopilot;
