//! In-memory skill queue.

use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::shared::OpportunityId;
use crate::domain::skill_queue::{
    OpportunityError, OpportunityRepository, SkillDecision, SkillOpportunity,
};

#[derive(Debug, Default)]
struct Queue {
    opportunities: HashMap<String, SkillOpportunity>,
    newest_first: VecDeque<String>,
    decisions: VecDeque<SkillDecision>,
}

/// In-memory implementation of `OpportunityRepository`.
#[derive(Debug, Default)]
pub struct InMemoryOpportunityRepository {
    queue: RwLock<Queue>,
}

fn poisoned<T>(_: PoisonError<T>) -> OpportunityError {
    OpportunityError::Storage {
        message: "skill queue lock poisoned".to_string(),
    }
}

impl InMemoryOpportunityRepository {
    /// Create a new empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Queue>, OpportunityError> {
        self.queue.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Queue>, OpportunityError> {
        self.queue.write().map_err(poisoned)
    }

    /// Number of queued opportunities, settled ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .opportunities
            .len()
    }

    /// Check if nothing was ever queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OpportunityRepository for InMemoryOpportunityRepository {
    async fn save(&self, opportunity: &SkillOpportunity) -> Result<(), OpportunityError> {
        let mut queue = self.write()?;
        let id = opportunity.id().to_string();

        if !queue.opportunities.contains_key(&id) {
            queue.newest_first.push_front(id.clone());
        }
        queue.opportunities.insert(id, opportunity.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &OpportunityId,
    ) -> Result<Option<SkillOpportunity>, OpportunityError> {
        Ok(self.read()?.opportunities.get(id.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<SkillOpportunity>, OpportunityError> {
        let queue = self.read()?;
        Ok(queue
            .newest_first
            .iter()
            .filter_map(|id| queue.opportunities.get(id))
            .cloned()
            .collect())
    }

    async fn append_decision(&self, decision: &SkillDecision) -> Result<(), OpportunityError> {
        self.write()?.decisions.push_front(decision.clone());
        Ok(())
    }

    async fn list_decisions(&self) -> Result<Vec<SkillDecision>, OpportunityError> {
        Ok(self.read()?.decisions.iter().cloned().collect())
    }
}
