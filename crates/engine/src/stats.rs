use crate::descriptor::CompileUnitRecord;
use crate::error::EngineError;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Aggregate produced by `Count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub file_count: u64,
    /// Subdirectories below the root; the root itself is not counted.
    pub dir_count: u64,
    pub total_bytes: u64,
}

impl DirectoryStats {
    /// Total size in kilobytes, rounded up.
    #[must_use]
    pub const fn total_kilobytes(&self) -> u64 {
        self.total_bytes.div_ceil(1024)
    }
}

/// Paths matched by `Find`, with the time the walk took.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub paths: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// One row of the `Show` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub modified: Option<DateTime<Local>>,
    pub size: u64,
}

impl FileEntry {
    /// Stat `path`; a file that vanished since the walk keeps an empty time and zero size.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let meta = std::fs::metadata(path).ok();
        Self {
            path: path.to_path_buf(),
            modified: meta
                .as_ref()
                .and_then(|m| m.modified().ok())
                .map(DateTime::<Local>::from),
            size: meta.map_or(0, |m| m.len()),
        }
    }
}

/// Outcome of a `Parse` run.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub scan: ScanResult,
    /// Records of all readable descriptors, already sorted.
    pub records: Vec<CompileUnitRecord>,
    /// Descriptors that could not be loaded; their contribution is empty.
    pub failures: Vec<(PathBuf, EngineError)>,
}

#[derive(Debug)]
pub enum RunResult {
    Count {
        stats: DirectoryStats,
        elapsed: Duration,
    },
    Show {
        scan: ScanResult,
        files: Vec<FileEntry>,
    },
    Parse(ParseReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kilobytes_round_up() {
        let stats = |total_bytes| DirectoryStats {
            total_bytes,
            ..DirectoryStats::default()
        };
        assert_eq!(stats(0).total_kilobytes(), 0);
        assert_eq!(stats(1).total_kilobytes(), 1);
        assert_eq!(stats(1024).total_kilobytes(), 1);
        assert_eq!(stats(1025).total_kilobytes(), 2);
    }

    #[test]
    fn file_entry_for_missing_file() {
        let entry = FileEntry::from_path(Path::new("/definitely/not/here.cpp"));
        assert_eq!(entry.size, 0);
        assert!(entry.modified.is_none());
    }
}
