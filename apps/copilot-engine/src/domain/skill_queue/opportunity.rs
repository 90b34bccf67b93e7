//! Trading opportunity aggregate and its decision record.
//!
//! An admin queues an opportunity; OpenClaw shows it to a human, whose single
//! yes or no settles it. The decision is recorded once and kept alongside the
//! opportunity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{OpportunityId, Timestamp, UserId};
use crate::domain::trade_decision::{ApprovalChannel, Decision};

/// Title used when the request names no source.
pub const DEFAULT_TITLE: &str = "NOFA Trading Opportunity";

/// Requester recorded when the request names none.
pub const DEFAULT_REQUESTER: &str = "nofa-admin";

/// Where an opportunity stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityStatus {
    /// Waiting for a human.
    PendingHuman,
    /// Human said yes.
    Approved,
    /// Human said no.
    Rejected,
}

impl OpportunityStatus {
    /// Wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingHuman => "pending_human",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Only pending opportunities take a decision.
    #[must_use]
    pub const fn accepts_decision(&self) -> bool {
        matches!(self, Self::PendingHuman)
    }

    const fn for_decision(decision: Decision) -> Self {
        match decision {
            Decision::Yes => Self::Approved,
            Decision::No => Self::Rejected,
        }
    }
}

impl fmt::Display for OpportunityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin request to queue an opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOpportunity {
    /// Trading pair, e.g. `BTC/USDT`.
    pub pair: String,
    /// Direction as typed by the admin; stored uppercased.
    pub action: String,
    /// Order quantity.
    #[serde(rename = "qty")]
    pub quantity: f64,
    /// Leverage label, e.g. `10x`.
    #[serde(rename = "lev")]
    pub leverage: String,
    /// Free-text reasoning.
    #[serde(default)]
    pub rationale: Option<String>,
    /// Becomes the title; defaults to [`DEFAULT_TITLE`].
    #[serde(default)]
    pub source: Option<String>,
    /// Defaults to [`DEFAULT_REQUESTER`].
    #[serde(default)]
    pub requested_by: Option<String>,
}

/// A human reply to a queued opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionReply {
    /// Who answered.
    pub user_id: UserId,
    /// Raw reply text, normalized with [`Decision::normalize`].
    #[serde(rename = "decision")]
    pub reply: String,
    /// Channel the reply came from.
    #[serde(default = "default_channel")]
    pub channel: ApprovalChannel,
    /// Full message the reply was extracted from.
    #[serde(default)]
    pub raw_text: Option<String>,
}

const fn default_channel() -> ApprovalChannel {
    ApprovalChannel::OpenclawChat
}

/// Recorded decision on an opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDecision {
    /// Opportunity decided.
    pub opportunity_id: OpportunityId,
    /// Who decided.
    pub user_id: UserId,
    /// Normalized answer.
    pub decision: Decision,
    /// Channel of the reply.
    pub channel: ApprovalChannel,
    /// Original message text.
    pub raw_text: Option<String>,
    /// When the decision was recorded.
    pub decided_at: Timestamp,
}

impl SkillDecision {
    /// Whether `user_id` answering `decision` repeats this record.
    #[must_use]
    pub fn is_replay_of(&self, user_id: &UserId, decision: Decision) -> bool {
        self.decision == decision && &self.user_id == user_id
    }
}

/// An opportunity in the skill queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillOpportunity {
    id: OpportunityId,
    /// Display title.
    pub title: String,
    /// Trading pair.
    pub pair: String,
    /// Uppercased direction.
    pub action: String,
    /// Order quantity.
    #[serde(rename = "qty")]
    pub quantity: f64,
    /// Leverage label.
    #[serde(rename = "lev")]
    pub leverage: String,
    /// Free-text reasoning.
    pub rationale: Option<String>,
    status: OpportunityStatus,
    /// When the opportunity was queued.
    pub created_at: Timestamp,
    /// Who queued it.
    pub requested_by: String,
    decision: Option<SkillDecision>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl SkillOpportunity {
    /// Queue a new opportunity awaiting a human.
    #[must_use]
    pub fn open(request: NewOpportunity, now: Timestamp) -> Self {
        Self {
            id: OpportunityId::generate(),
            title: non_blank(request.source).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            pair: request.pair,
            action: request.action.to_uppercase(),
            quantity: request.quantity,
            leverage: request.leverage,
            rationale: request.rationale,
            status: OpportunityStatus::PendingHuman,
            created_at: now,
            requested_by: non_blank(request.requested_by)
                .unwrap_or_else(|| DEFAULT_REQUESTER.to_string()),
            decision: None,
        }
    }

    /// Copy of this opportunity settled by `decision`.
    ///
    /// No status check happens here; callers check
    /// [`OpportunityStatus::accepts_decision`] first.
    #[must_use]
    pub fn with_decision(&self, decision: SkillDecision) -> Self {
        let mut next = self.clone();
        next.status = OpportunityStatus::for_decision(decision.decision);
        next.decision = Some(decision);
        next
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> &OpportunityId {
        &self.id
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> OpportunityStatus {
        self.status
    }

    /// Recorded decision, if any.
    #[must_use]
    pub const fn decision(&self) -> Option<&SkillDecision> {
        self.decision.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> NewOpportunity {
        serde_json::from_value(json!({
            "pair": "BTC/USDT",
            "action": "long",
            "qty": 0.01,
            "lev": "10x",
            "rationale": "Funding flipped positive"
        }))
        .unwrap()
    }

    fn decision(opportunity: &SkillOpportunity, user: &str, decision: Decision) -> SkillDecision {
        SkillDecision {
            opportunity_id: opportunity.id().clone(),
            user_id: UserId::new(user),
            decision,
            channel: ApprovalChannel::OpenclawChat,
            raw_text: None,
            decided_at: Timestamp::now(),
        }
    }

    #[test]
    fn open_applies_defaults() {
        let opportunity = SkillOpportunity::open(request(), Timestamp::now());

        assert!(opportunity.id().as_str().starts_with("opp_"));
        assert_eq!(opportunity.title, DEFAULT_TITLE);
        assert_eq!(opportunity.requested_by, DEFAULT_REQUESTER);
        assert_eq!(opportunity.action, "LONG");
        assert_eq!(opportunity.status(), OpportunityStatus::PendingHuman);
        assert!(opportunity.decision().is_none());
    }

    #[test]
    fn open_keeps_source_and_requester() {
        let mut request = request();
        request.source = Some("Funding Scanner".to_string());
        request.requested_by = Some("ops-bot".to_string());

        let opportunity = SkillOpportunity::open(request, Timestamp::now());
        assert_eq!(opportunity.title, "Funding Scanner");
        assert_eq!(opportunity.requested_by, "ops-bot");
    }

    #[test]
    fn blank_source_falls_back_to_default_title() {
        let mut request = request();
        request.source = Some("  ".to_string());

        let opportunity = SkillOpportunity::open(request, Timestamp::now());
        assert_eq!(opportunity.title, DEFAULT_TITLE);
    }

    #[test]
    fn decision_settles_without_touching_original() {
        let opportunity = SkillOpportunity::open(request(), Timestamp::now());

        let approved = opportunity.with_decision(decision(&opportunity, "alice", Decision::Yes));
        let rejected = opportunity.with_decision(decision(&opportunity, "alice", Decision::No));

        assert_eq!(opportunity.status(), OpportunityStatus::PendingHuman);
        assert_eq!(approved.status(), OpportunityStatus::Approved);
        assert_eq!(rejected.status(), OpportunityStatus::Rejected);
        assert!(!approved.status().accepts_decision());
    }

    #[test]
    fn replay_needs_same_user_and_decision() {
        let opportunity = SkillOpportunity::open(request(), Timestamp::now());
        let record = decision(&opportunity, "alice", Decision::Yes);

        assert!(record.is_replay_of(&UserId::new("alice"), Decision::Yes));
        assert!(!record.is_replay_of(&UserId::new("bob"), Decision::Yes));
        assert!(!record.is_replay_of(&UserId::new("alice"), Decision::No));
    }

    #[test]
    fn wire_format_uses_short_names() {
        let opportunity = SkillOpportunity::open(request(), Timestamp::now());
        let json = serde_json::to_value(&opportunity).unwrap();

        assert_eq!(json["qty"], 0.01);
        assert_eq!(json["lev"], "10x");
        assert_eq!(json["status"], "pending_human");
        assert!(json["decision"].is_null());
        assert!(json["id"].as_str().is_some_and(|id| id.starts_with("opp_")));
    }

    #[test]
    fn reply_defaults_channel() {
        let reply: DecisionReply =
            serde_json::from_value(json!({ "user_id": "alice", "decision": "yes" })).unwrap();
        assert_eq!(reply.reply, "yes");
        assert_eq!(reply.channel, ApprovalChannel::OpenclawChat);
        assert!(reply.raw_text.is_none());
    }
}
