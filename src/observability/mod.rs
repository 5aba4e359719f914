//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer → OtlpFileExporter → RotatingFile
//! ```
//!
//! Spans land as OTLP JSON lines in `<data_dir>/mums-otlp.json`. The file
//! rotates at 10 MB and the three newest backups are kept.
//!
//! # Usage
//!
//! ```rust,no_run
//! use mums::observability::init_tracing;
//! use mums::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod exporter;
mod init;
mod rotation;

pub use init::init_tracing;
