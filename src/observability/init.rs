//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::infrastructure::trace_file;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber: an `EnvFilter` at the configured level
/// (default `info`) feeding an OpenTelemetry layer that exports to
/// `<data_dir>/mums-otlp.json`.
///
/// Failures are silent; the plugin runs without tracing.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", exporter::SCOPE)]);
    let provider = exporter::tracer_provider(trace_file(&config.data_dir), resource);
    let tracer = provider.tracer(exporter::SCOPE);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
