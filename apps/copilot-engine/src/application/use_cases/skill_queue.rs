//! Skill Queue Use Case
//!
//! Queues admin opportunities for OpenClaw and records the human's answer.
//! A repeated answer from the same user is a replay; anything else on a
//! settled opportunity is refused.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::shared::{OpportunityId, Timestamp};
use crate::domain::skill_queue::{
    DecisionReply, NewOpportunity, OpportunityError, OpportunityRepository, SkillDecision,
    SkillOpportunity,
};
use crate::domain::trade_decision::{Decision, NormalizedReply};

/// Result of recording a decision.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionOutcome {
    /// Opportunity after the call.
    pub opportunity: SkillOpportunity,
    /// `true` when the call replayed an earlier decision.
    pub duplicate: bool,
}

/// Use case over an opportunity repository.
pub struct SkillQueue<R>
where
    R: OpportunityRepository,
{
    repo: Arc<R>,
    write_gate: Mutex<()>,
}

impl<R> SkillQueue<R>
where
    R: OpportunityRepository,
{
    /// Create a new `SkillQueue`.
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            write_gate: Mutex::new(()),
        }
    }

    /// The repository backing this queue.
    pub const fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Queue a new opportunity.
    pub async fn create_opportunity(
        &self,
        request: NewOpportunity,
    ) -> Result<SkillOpportunity, OpportunityError> {
        let opportunity = SkillOpportunity::open(request, Timestamp::now());
        self.repo.save(&opportunity).await?;

        tracing::info!(
            opportunity_id = %opportunity.id(),
            pair = %opportunity.pair,
            action = %opportunity.action,
            requested_by = %opportunity.requested_by,
            "Opportunity queued"
        );
        Ok(opportunity)
    }

    /// Every opportunity, newest first.
    pub async fn list_opportunities(&self) -> Result<Vec<SkillOpportunity>, OpportunityError> {
        self.repo.list().await
    }

    /// Newest opportunity still waiting on a human.
    pub async fn next_pending(&self) -> Result<Option<SkillOpportunity>, OpportunityError> {
        self.repo.next_pending().await
    }

    /// Record a human answer.
    ///
    /// Checks, in order: the opportunity exists, the reply is a yes or no,
    /// and the opportunity is still pending. On a settled opportunity the
    /// same user repeating the same answer is a replay.
    pub async fn apply_decision(
        &self,
        id: &OpportunityId,
        reply: DecisionReply,
    ) -> Result<DecisionOutcome, OpportunityError> {
        let _gate = self.write_gate.lock().await;
        let opportunity = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| OpportunityError::NotFound {
                opportunity_id: id.to_string(),
            })?;

        let NormalizedReply::Decided(decision) = Decision::normalize(&reply.reply) else {
            return Err(OpportunityError::NeedsConfirmation { reply: reply.reply });
        };

        if !opportunity.status().accepts_decision() {
            if opportunity
                .decision()
                .is_some_and(|existing| existing.is_replay_of(&reply.user_id, decision))
            {
                tracing::info!(opportunity_id = %id, %decision, "Duplicate decision ignored");
                return Ok(DecisionOutcome {
                    opportunity,
                    duplicate: true,
                });
            }
            return Err(OpportunityError::InvalidState {
                opportunity_id: id.to_string(),
                status: opportunity.status(),
            });
        }

        let record = SkillDecision {
            opportunity_id: id.clone(),
            user_id: reply.user_id,
            decision,
            channel: reply.channel,
            raw_text: reply.raw_text,
            decided_at: Timestamp::now(),
        };
        let decided = opportunity.with_decision(record.clone());
        self.repo.save(&decided).await?;
        self.repo.append_decision(&record).await?;

        tracing::info!(
            opportunity_id = %id,
            user_id = %record.user_id,
            %decision,
            channel = %record.channel,
            status = %decided.status(),
            "Opportunity decided"
        );
        Ok(DecisionOutcome {
            opportunity: decided,
            duplicate: false,
        })
    }

    /// Decision log, newest first.
    pub async fn list_decisions(&self) -> Result<Vec<SkillDecision>, OpportunityError> {
        self.repo.list_decisions().await
    }
}
