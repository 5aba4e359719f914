//! Append-only line writer with size-based rotation.
//!
//! When the file grows past the size limit it is renamed to
//! `<name>.<timestamp>` and a fresh file is started. Only the newest backups
//! are kept.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

pub const MAX_BACKUP_FILES: usize = 3;

pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    keep: usize,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(path: PathBuf, max_bytes: u64, keep: usize) -> Self {
        Self {
            path,
            max_bytes,
            keep,
            file: Mutex::new(None),
        }
    }

    /// Appends one line, rotating first if the file is over the limit.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes) {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(file) = guard.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file unavailable"));
        };
        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.6f");
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}"));
        fs::rename(&self.path, PathBuf::from(backup))?;
        self.prune()
    }

    /// Removes all but the newest `keep` backups. Timestamps sort lexically.
    fn prune(&self) -> io::Result<()> {
        let (Some(dir), Some(name)) = (self.path.parent(), self.path.file_name().and_then(|n| n.to_str())) else {
            return Ok(());
        };
        let prefix = format!("{name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| file_name(path).is_some_and(|n| n.starts_with(&prefix)))
            .collect();
        backups.sort_by(|a, b| file_name(b).cmp(&file_name(a)));

        for old in backups.iter().skip(self.keep) {
            let _ = fs::remove_file(old);
        }
        Ok(())
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFile::new(path.clone());

        writer.append_line("{}").unwrap();
        writer.append_line("[]").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "{}\n[]\n");
    }

    #[test]
    fn rotates_and_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFile::with_limits(path.clone(), 4, 2);

        for i in 0..6 {
            writer.append_line(&format!("line-{i}")).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let backups = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("trace.json."))
            .count();
        assert_eq!(backups, 2);
        assert_eq!(fs::read_to_string(path).unwrap(), "line-5\n");
    }
}
