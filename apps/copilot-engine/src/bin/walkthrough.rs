//! Copilot Walkthrough
//!
//! Runs connect → suggest → approve → execute once against the simulator and
//! prints each step's result as pretty JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin copilot-walkthrough
//! ```
//!
//! Honors `COPILOT_CONFIG` for simulated latencies.

use anyhow::Context;
use copilot_engine::application::MockCopilot;
use copilot_engine::config::{DEFAULT_CONFIG_PATH, load_config_or_default};
use copilot_engine::domain::account::{ApiKeyConnection, Exchange, TradingMode};
use copilot_engine::domain::shared::UserId;
use copilot_engine::domain::trade_decision::Decision;
use copilot_engine::telemetry::init_telemetry;
use serde::Serialize;

fn print_step<T: Serialize>(title: &str, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing step output")?;
    println!("== {title} ==\n{json}\n");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config_path =
        std::env::var("COPILOT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("loading configuration from {config_path}"))?;
    let _telemetry = init_telemetry(&config.observability);

    let copilot = MockCopilot::from_config(config.simulation);
    let user_id = UserId::new("demo-user");

    let account = copilot
        .submit_mock_account(&ApiKeyConnection {
            user_id: user_id.clone(),
            exchange: Exchange::Binance,
            api_key: "demo_api_key_1234567890".to_string(),
            api_secret: "demo_api_secret".to_string(),
            label: Some("Walkthrough".to_string()),
            mode: TradingMode::Copilot,
        })
        .await;
    print_step("1. Account connected", &account)?;

    let task = copilot
        .generate_mock_suggestion(user_id, account.account_id.clone())
        .await;
    print_step("2. Suggestion pending approval", &task)?;

    let approved = copilot.submit_mock_approval(&task, Decision::Yes).await;
    print_step("3. Human approved", &approved)?;

    let executed = copilot.run_mock_execution(&approved).await;
    print_step("4. Mock execution", &executed)?;

    Ok(())
}
