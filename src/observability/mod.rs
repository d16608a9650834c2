//! Trace export to a local OTLP/JSON file.
//!
//! ```text
//! tracing spans ─► tracing-opentelemetry ─► SDK tracer ─► OtlpFileExporter ─► hnsearch-otlp.json
//! ```
//!
//! Off by default. Setting `trace_level` in the config (or `--trace-level` on
//! the command line) enables it; output lands in `$XDG_DATA_HOME/hnsearch/`,
//! rotated at 10 MB with three backups.
//!
//! # Modules
//!
//! - [`init`]: Subscriber installation and the flush-on-drop guard
//! - `exporter`: The file `SpanExporter`
//! - `otlp`: OTLP/JSON encoding
//! - `file_writer`: Size-rotated line writer

mod exporter;
mod file_writer;
pub mod init;
mod otlp;

pub use init::{init_tracing, init_tracing_in, TracingGuard, TRACE_FILE_NAME};
