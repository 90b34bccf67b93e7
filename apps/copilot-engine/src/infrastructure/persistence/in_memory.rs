//! In-memory task registry.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::shared::{SuggestionId, TaskId};
use crate::domain::trade_decision::{TaskError, TaskRepository, TaskState, TradeDecisionTask};

#[derive(Debug, Default)]
struct Registry {
    tasks: HashMap<String, TradeDecisionTask>,
    by_suggestion: HashMap<String, String>,
    insertion_order: Vec<String>,
}

/// In-memory implementation of `TaskRepository`.
///
/// Lives as long as the process. Not durable.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    registry: RwLock<Registry>,
}

fn poisoned<T>(_: PoisonError<T>) -> TaskError {
    TaskError::Storage {
        message: "task registry lock poisoned".to_string(),
    }
}

impl InMemoryTaskRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Registry>, TaskError> {
        self.registry.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Registry>, TaskError> {
        self.registry.write().map_err(poisoned)
    }

    /// Get the number of tasks in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tasks
            .len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tasks, oldest first.
    pub fn list(&self) -> Result<Vec<TradeDecisionTask>, TaskError> {
        let registry = self.read()?;
        Ok(registry
            .insertion_order
            .iter()
            .filter_map(|id| registry.tasks.get(id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, task: &TradeDecisionTask) -> Result<(), TaskError> {
        let mut registry = self.write()?;
        let task_id = task.task_id().to_string();

        if !registry.tasks.contains_key(&task_id) {
            registry.insertion_order.push(task_id.clone());
        }
        registry.by_suggestion.insert(
            task.suggestion().suggestion_id.to_string(),
            task_id.clone(),
        );
        registry.tasks.insert(task_id, task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<TradeDecisionTask>, TaskError> {
        let registry = self.read()?;
        Ok(registry.tasks.get(id.as_str()).cloned())
    }

    async fn find_by_suggestion_id(
        &self,
        suggestion_id: &SuggestionId,
    ) -> Result<Option<TradeDecisionTask>, TaskError> {
        let registry = self.read()?;
        Ok(registry
            .by_suggestion
            .get(suggestion_id.as_str())
            .and_then(|task_id| registry.tasks.get(task_id))
            .cloned())
    }

    async fn find_by_state(&self, state: TaskState) -> Result<Vec<TradeDecisionTask>, TaskError> {
        let registry = self.read()?;
        Ok(registry
            .insertion_order
            .iter()
            .filter_map(|id| registry.tasks.get(id))
            .filter(|task| task.state() == state)
            .cloned()
            .collect())
    }

    async fn exists(&self, id: &TaskId) -> Result<bool, TaskError> {
        let registry = self.read()?;
        Ok(registry.tasks.contains_key(id.as_str()))
    }
}
