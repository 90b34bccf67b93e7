//! Task Repository Trait
//!
//! Storage abstraction for tasks, implemented in the infrastructure layer.

use async_trait::async_trait;

use super::aggregate::TradeDecisionTask;
use super::errors::TaskError;
use super::value_objects::TaskState;
use crate::domain::shared::{SuggestionId, TaskId};

/// Repository trait for task snapshots.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Save a task snapshot (insert or replace).
    async fn save(&self, task: &TradeDecisionTask) -> Result<(), TaskError>;

    /// Find a task by its ID.
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<TradeDecisionTask>, TaskError>;

    /// Find the task that owns a suggestion.
    async fn find_by_suggestion_id(
        &self,
        suggestion_id: &SuggestionId,
    ) -> Result<Option<TradeDecisionTask>, TaskError>;

    /// Find all tasks in a given state.
    async fn find_by_state(&self, state: TaskState) -> Result<Vec<TradeDecisionTask>, TaskError>;

    /// Check if a task exists.
    async fn exists(&self, id: &TaskId) -> Result<bool, TaskError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
