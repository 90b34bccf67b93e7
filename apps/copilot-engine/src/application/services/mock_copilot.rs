//! Mock Copilot
//!
//! Simulates the four steps of the copilot loop (connect, suggest, approve,
//! execute). Each step waits a configured latency and then resolves with
//! fabricated data. None of them can fail, and none of them contact an
//! exchange or a chat channel.
//!
//! Inputs are never mutated: approval and execution return new task values.

use std::time::Duration;

use crate::config::SimulationConfig;
use crate::domain::account::{ApiKeyConnection, MockAccountResponse};
use crate::domain::shared::{AccountId, Timestamp, UserId};
use crate::domain::trade_decision::{
    ApprovalChannel, Decision, ExecutionResult, TradeDecisionTask, TradeSuggestion,
};

/// Channel the mock delivers suggestions on.
const DELIVERY_CHANNEL: ApprovalChannel = ApprovalChannel::Slack;

/// Latency-simulating stand-in for the copilot backend.
#[derive(Debug, Clone, Default)]
pub struct MockCopilot {
    simulation: SimulationConfig,
}

impl MockCopilot {
    /// Create a simulator with the given timings.
    #[must_use]
    pub const fn from_config(simulation: SimulationConfig) -> Self {
        Self { simulation }
    }

    /// Timings in use.
    #[must_use]
    pub const fn simulation(&self) -> &SimulationConfig {
        &self.simulation
    }

    /// Pretend to connect an exchange account.
    ///
    /// Always reports `connected_mock` with `trade` and `read` permissions.
    /// Only the masked key appears in the response or the logs.
    pub async fn submit_mock_account(&self, connection: &ApiKeyConnection) -> MockAccountResponse {
        simulate_latency("account", self.simulation.account_latency()).await;

        let response = MockAccountResponse::for_connection(connection);
        tracing::info!(
            user_id = %connection.user_id,
            exchange = %connection.exchange,
            account_id = %response.account_id,
            masked_key = %response.masked_key,
            "Mock account connected"
        );
        response
    }

    /// Generate the canned BTCUSDT suggestion and wrap it in a task awaiting approval.
    pub async fn generate_mock_suggestion(
        &self,
        user_id: UserId,
        account_id: AccountId,
    ) -> TradeDecisionTask {
        simulate_latency("suggestion", self.simulation.suggestion_latency()).await;

        let now = Timestamp::now();
        let suggestion =
            TradeSuggestion::mock(user_id, account_id, now, self.simulation.suggestion_ttl());
        let task = TradeDecisionTask::awaiting_approval(suggestion, DELIVERY_CHANNEL, now);

        tracing::info!(
            task_id = %task.task_id(),
            suggestion_id = %task.suggestion().suggestion_id,
            state = %task.state(),
            "Mock suggestion generated"
        );
        task
    }

    /// Record a human decision on `task`.
    ///
    /// The task's current state is not checked.
    pub async fn submit_mock_approval(
        &self,
        task: &TradeDecisionTask,
        decision: Decision,
    ) -> TradeDecisionTask {
        simulate_latency("approval", self.simulation.approval_latency()).await;

        let next = task.with_decision(decision, DELIVERY_CHANNEL, Timestamp::now());
        tracing::info!(
            task_id = %next.task_id(),
            decision = %decision,
            state = %next.state(),
            "Mock approval recorded"
        );
        next
    }

    /// Produce a successful mock fill for `task`.
    ///
    /// Any prior state, including `rejected`, ends up `executed`.
    pub async fn run_mock_execution(&self, task: &TradeDecisionTask) -> TradeDecisionTask {
        simulate_latency("execution", self.simulation.execution_latency()).await;

        let next = task.with_execution(ExecutionResult::mock_success(), Timestamp::now());
        tracing::info!(
            task_id = %next.task_id(),
            from = %task.state(),
            mock_order_id = ?next.execution_result().and_then(|r| r.mock_order_id.as_ref()),
            "Mock execution completed"
        );
        next
    }
}

async fn simulate_latency(step: &'static str, latency: Duration) {
    tracing::debug!(step, latency = ?latency, "Simulating latency");
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{AccountStatus, Exchange, TradingMode};
    use crate::domain::trade_decision::{ExecutionStatus, TaskState, event_types};
    use tokio::time::Instant;

    fn connection() -> ApiKeyConnection {
        ApiKeyConnection {
            user_id: UserId::new("alice"),
            exchange: Exchange::Binance,
            api_key: "abcd1234efgh5678".to_string(),
            api_secret: "s3cr3t".to_string(),
            label: Some("main".to_string()),
            mode: TradingMode::Copilot,
        }
    }

    async fn pending(copilot: &MockCopilot) -> TradeDecisionTask {
        copilot
            .generate_mock_suggestion(UserId::new("alice"), AccountId::new("acc_binance_test0001"))
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn account_connection_waits_and_masks() {
        let copilot = MockCopilot::default();
        let started = Instant::now();

        let response = copilot.submit_mock_account(&connection()).await;

        assert!(started.elapsed() >= Duration::from_millis(500));
        assert_eq!(response.status, AccountStatus::ConnectedMock);
        assert_eq!(response.permissions_detected, vec!["trade", "read"]);
        assert_eq!(response.masked_key, "abcd***5678");
        assert!(response.account_id.as_str().starts_with("acc_binance_"));
    }

    #[tokio::test(start_paused = true)]
    async fn suggestion_is_pending_with_two_events() {
        let copilot = MockCopilot::default();
        let started = Instant::now();

        let task = pending(&copilot).await;

        assert!(started.elapsed() >= Duration::from_millis(600));
        assert_eq!(task.state(), TaskState::PendingApproval);
        assert_eq!(task.suggestion().symbol, "BTCUSDT");
        assert_eq!(task.suggestion().user_id.as_str(), "alice");
        assert_eq!(
            task.audit_event_types(),
            vec![event_types::SUGGESTION_GENERATED, event_types::DELIVERY_SENT]
        );
        assert!(task.suggestion().expires_at > Timestamp::now());
    }

    #[tokio::test(start_paused = true)]
    async fn approval_yes_and_no() {
        let copilot = MockCopilot::default();
        let task = pending(&copilot).await;
        let before = task.clone();

        let started = Instant::now();
        let approved = copilot.submit_mock_approval(&task, Decision::Yes).await;
        assert!(started.elapsed() >= Duration::from_millis(450));

        assert_eq!(task, before);
        assert_eq!(approved.state(), TaskState::Approved);
        assert_eq!(approved.audit_events().len(), 3);
        assert_eq!(
            approved.approval().map(|a| a.channel),
            Some(ApprovalChannel::Slack)
        );

        let rejected = copilot.submit_mock_approval(&task, Decision::No).await;
        assert_eq!(rejected.state(), TaskState::Rejected);
        assert!(rejected.execution_result().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn execution_ignores_prior_state() {
        let copilot = MockCopilot::default();
        let task = pending(&copilot).await;
        let rejected = copilot.submit_mock_approval(&task, Decision::No).await;

        let started = Instant::now();
        let executed = copilot.run_mock_execution(&rejected).await;
        assert!(started.elapsed() >= Duration::from_millis(700));

        assert_eq!(rejected.state(), TaskState::Rejected);
        assert_eq!(executed.state(), TaskState::Executed);
        let result = executed.execution_result().unwrap();
        assert_eq!(result.status, ExecutionStatus::Success);
        assert!(
            result
                .mock_order_id
                .as_ref()
                .is_some_and(|id| id.as_str().starts_with("order_"))
        );
        assert_eq!(executed.audit_events().len(), 4);
    }

    #[tokio::test]
    async fn oversized_ttl_still_generates() {
        let copilot = MockCopilot::from_config(SimulationConfig {
            suggestion_ttl_secs: 10_000_000_000_000,
            ..SimulationConfig::instant()
        });

        let task = pending(&copilot).await;

        assert_eq!(task.state(), TaskState::PendingApproval);
        assert!(!task.suggestion().is_expired_at(Timestamp::now()));
    }

    #[tokio::test]
    async fn instant_simulation_skips_sleep() {
        let copilot = MockCopilot::from_config(SimulationConfig::instant());
        let started = std::time::Instant::now();

        let task = pending(&copilot).await;
        let _ = copilot.run_mock_execution(&task).await;

        assert!(started.elapsed() < Duration::from_millis(500));
    }
}
