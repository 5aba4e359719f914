//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`; see [`paths`].

pub mod paths;

pub use paths::{data_dir, expand_tilde, trace_file, DEFAULT_DATA_DIR, TRACE_FILE_NAME};
