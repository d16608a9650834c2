//! Subscriber installation.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace output inside the data directory.
pub const TRACE_FILE_NAME: &str = "hnsearch-otlp.json";

/// Keeps the tracer provider alive; shuts it down (flushing spans) on drop.
#[derive(Debug)]
pub struct TracingGuard {
    provider: TracerProvider,
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Err(e) = self.provider.shutdown() {
            eprintln!("hnsearch: trace shutdown failed: {e}");
        }
    }
}

/// Installs the global subscriber when `config.trace_level` is set.
///
/// The level string is an `EnvFilter` directive (`"debug"`,
/// `"hnsearch=trace,reqwest=info"`, ...). Nothing is ever written to the
/// terminal; spans go to `<data_dir>/hnsearch-otlp.json`.
///
/// Returns `None` when tracing is off, there is no data directory, it cannot be
/// created, or a global subscriber is already installed.
#[must_use]
pub fn init_tracing(config: &Config) -> Option<TracingGuard> {
    let level = config.trace_level.as_deref()?;
    let dir = match crate::infrastructure::get_data_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("hnsearch: tracing disabled: {e}");
            return None;
        }
    };
    init_tracing_in(level, &dir)
}

/// Same as [`init_tracing`] with an explicit output directory.
#[must_use]
pub fn init_tracing_in(level: &str, dir: &Path) -> Option<TracingGuard> {
    std::fs::create_dir_all(dir).ok()?;

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "hnsearch"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let path = dir.join(TRACE_FILE_NAME);
    let provider = exporter::file_tracer_provider(path, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("hnsearch"));

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init()
        .ok()?;

    Some(TracingGuard { provider })
}
