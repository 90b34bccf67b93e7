//! Tracing Setup
//!
//! Console logging through `tracing-subscriber`, with optional OTLP span
//! export.
//!
//! # Configuration
//!
//! - `observability.logging.level`: default filter; `RUST_LOG` overrides it
//! - `observability.logging.format`: `pretty` or `json`
//! - `observability.otel.enabled`: export spans to `observability.otel.endpoint`
//!
//! # Usage
//!
//! ```rust,ignore
//! use copilot_engine::telemetry::init_telemetry;
//!
//! let _guard = init_telemetry(&config.observability);
//! ```

use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, ObservabilityConfig, OtelConfig};

/// Guard that shuts down the tracer provider on drop.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are being exported over OTLP.
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Error shutting down tracer provider: {e:?}");
        }
    }
}

/// Build the filter: `RUST_LOG` wins, then the configured level, then `info`.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Build the OTLP tracer provider, or `None` when disabled or the exporter fails.
fn build_provider(otel: &OtelConfig) -> Option<SdkTracerProvider> {
    if !otel.enabled {
        return None;
    }

    let exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&otel.endpoint)
        .build()
    {
        Ok(exp) => exp,
        Err(e) => {
            eprintln!("Failed to create OTLP exporter: {e:?}, falling back to console logging");
            return None;
        }
    };

    Some(
        SdkTracerProvider::builder()
            .with_simple_exporter(exporter)
            .build(),
    )
}

/// Initialize tracing from the observability config.
///
/// Returns a guard that shuts down the tracer provider when dropped. A second
/// call in the same process keeps the first subscriber.
#[must_use]
pub fn init_telemetry(config: &ObservabilityConfig) -> TelemetryGuard {
    let env_filter = build_filter(&config.logging.level);

    let fmt_layer = match config.logging.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(true).boxed(),
    };

    let provider = build_provider(&config.otel);
    let otel_layer = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(config.otel.service_name.clone()))
    });

    if let Err(e) = Registry::default()
        .with(fmt_layer)
        .with(otel_layer)
        .with(env_filter)
        .try_init()
    {
        eprintln!("Tracing subscriber already installed: {e}");
    }

    if provider.is_some() {
        tracing::info!(
            service_name = %config.otel.service_name,
            endpoint = %config.otel.endpoint,
            "OpenTelemetry initialized"
        );
    } else {
        tracing::debug!(format = ?config.logging.format, "Console logging initialized");
    }

    TelemetryGuard { provider }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_otel_builds_no_provider() {
        assert!(build_provider(&OtelConfig::default()).is_none());
    }

    #[test]
    fn invalid_level_falls_back() {
        // Must not panic on garbage directives.
        let _filter = build_filter("not a [valid directive");
    }

    #[test]
    fn console_only_guard_is_not_exporting() {
        let guard = init_telemetry(&ObservabilityConfig::default());
        assert!(!guard.is_exporting());
    }
}
