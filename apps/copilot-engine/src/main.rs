//! Copilot Engine Binary
//!
//! Serves the OpenClaw callback API and the skill queue on top of the mock
//! copilot.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin copilot-engine
//! ```
//!
//! # Environment Variables
//!
//! - `COPILOT_CONFIG`: Path to the YAML config (default: `config.yaml`; defaults apply when absent)
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use copilot_engine::application::{ApprovalWorkflow, MockCopilot, SkillQueue};
use copilot_engine::config::{Config, DEFAULT_CONFIG_PATH, load_config_or_default};
use copilot_engine::infrastructure::http::{API_PREFIX, AppState, create_router};
use copilot_engine::infrastructure::persistence::{
    InMemoryOpportunityRepository, InMemoryTaskRepository,
};
use copilot_engine::telemetry::init_telemetry;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path =
        std::env::var("COPILOT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("loading configuration from {config_path}"))?;

    let _telemetry = init_telemetry(&config.observability);

    tracing::info!("Starting NOFA Copilot Engine");
    log_config(&config, &config_path);

    let workflow = ApprovalWorkflow::new(
        MockCopilot::from_config(config.simulation.clone()),
        Arc::new(InMemoryTaskRepository::new()),
    );
    let state = AppState {
        workflow: Arc::new(workflow),
        skills: Arc::new(SkillQueue::new(Arc::new(InMemoryOpportunityRepository::new()))),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    serve(&config, state).await?;

    tracing::info!("Copilot engine stopped");
    Ok(())
}

/// Log the parsed configuration.
fn log_config(config: &Config, path: &str) {
    tracing::info!(
        config_path = path,
        http_port = config.server.http_port,
        account_latency_ms = config.simulation.account_latency_ms,
        suggestion_latency_ms = config.simulation.suggestion_latency_ms,
        approval_latency_ms = config.simulation.approval_latency_ms,
        execution_latency_ms = config.simulation.execution_latency_ms,
        otel_enabled = config.observability.otel.enabled,
        "Configuration loaded"
    );
}

/// Run the HTTP server until a shutdown signal arrives.
async fn serve(
    config: &Config,
    state: AppState<InMemoryTaskRepository, InMemoryOpportunityRepository>,
) -> anyhow::Result<()> {
    let app = create_router(state);

    let http_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.http_port)
        .parse()
        .context("invalid server.bind_address")?;

    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  POST {API_PREFIX}/accounts");
    tracing::info!("  POST {API_PREFIX}/suggestions");
    tracing::info!("  POST {API_PREFIX}/suggestions/import");
    tracing::info!("  POST {API_PREFIX}/approvals");
    tracing::info!("  POST {API_PREFIX}/tasks/{{task_id}}/execute");
    tracing::info!("  GET  {API_PREFIX}/tasks/{{task_id}}");
    tracing::info!("  POST {API_PREFIX}/skill/opportunities");
    tracing::info!("  GET  {API_PREFIX}/skill/opportunities");
    tracing::info!("  GET  {API_PREFIX}/skill/opportunities/next");
    tracing::info!("  POST {API_PREFIX}/skill/opportunities/{{opportunity_id}}/decision");
    tracing::info!("  GET  {API_PREFIX}/skill/decisions");

    let listener = TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("binding {http_addr}"))?;

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    let handle = tokio::spawn(async move {
        if let Err(e) = server.await {
            tracing::error!("HTTP server error: {e}");
        }
    });

    handle.await.context("HTTP server task panicked")?;
    Ok(())
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    tracing::info!("Graceful shutdown started, draining open connections");
}
