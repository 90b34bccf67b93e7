//! Opportunity Repository Trait

use async_trait::async_trait;

use super::errors::OpportunityError;
use super::opportunity::{OpportunityStatus, SkillDecision, SkillOpportunity};
use crate::domain::shared::OpportunityId;

/// Storage for queued opportunities and the decision log.
#[async_trait]
pub trait OpportunityRepository: Send + Sync {
    /// Save an opportunity snapshot (insert or replace).
    async fn save(&self, opportunity: &SkillOpportunity) -> Result<(), OpportunityError>;

    /// Find an opportunity by its ID.
    async fn find_by_id(
        &self,
        id: &OpportunityId,
    ) -> Result<Option<SkillOpportunity>, OpportunityError>;

    /// All opportunities, newest first.
    async fn list(&self) -> Result<Vec<SkillOpportunity>, OpportunityError>;

    /// Newest opportunity still waiting on a human.
    async fn next_pending(&self) -> Result<Option<SkillOpportunity>, OpportunityError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|opportunity| opportunity.status() == OpportunityStatus::PendingHuman))
    }

    /// Append to the decision log.
    async fn append_decision(&self, decision: &SkillDecision) -> Result<(), OpportunityError>;

    /// Decision log, newest first.
    async fn list_decisions(&self) -> Result<Vec<SkillDecision>, OpportunityError>;
}
