//! Path utilities for the Zellij sandbox.
//!
//! The host filesystem is mounted under `/host` inside the plugin sandbox.
//! Stores and trace files live in a per-plugin data directory there.

use std::path::{Path, PathBuf};

/// Data directory used when none is configured.
pub const DEFAULT_DATA_DIR: &str = "/host/.local/share/zellij/mums";

/// File name of the OTLP JSON trace export inside the data directory.
pub const TRACE_FILE_NAME: &str = "mums-otlp.json";

/// Resolves the data directory from an optional configured path.
///
/// `~` expands to the sandbox's view of the host home directory.
///
/// # Example
///
/// ```rust
/// use mums::infrastructure::data_dir;
/// use std::path::PathBuf;
///
/// assert_eq!(data_dir(None), PathBuf::from("/host/.local/share/zellij/mums"));
/// assert_eq!(data_dir(Some("~/recipes")), PathBuf::from("/host/recipes"));
/// ```
#[must_use]
pub fn data_dir(configured: Option<&str>) -> PathBuf {
    configured
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), |p| PathBuf::from(expand_tilde(p)))
}

/// Path of the trace export file inside `data_dir`.
#[must_use]
pub fn trace_file(data_dir: &Path) -> PathBuf {
    data_dir.join(TRACE_FILE_NAME)
}

/// Expands a leading `~` to `/host`.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
