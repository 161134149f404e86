// crates/engine/src/lib.rs
pub mod aggregate;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod filesystem;
pub mod filter;
pub mod line_counter;
pub mod options;
pub mod paths;
pub mod report;
pub mod stats;

use crate::config::Config;
use crate::error::Result;
use crate::filter::ExtensionFilter;
use crate::options::Command;
use crate::stats::{FileEntry, ParseReport, RunResult};
use std::path::{Path, PathBuf};

/// Run the operation selected by `config.command`.
///
/// # Errors
///
/// Returns an error when the root directory is empty, missing or not a
/// directory, or when the walk itself fails. Descriptors that cannot be read
/// during `Parse` do not fail the run; they are collected in
/// `ParseReport::failures`.
pub fn run(config: &Config) -> Result<RunResult> {
    match config.command {
        Command::Count => {
            let (stats, elapsed) = filesystem::count(&config.root, config.recursive)?;
            Ok(RunResult::Count { stats, elapsed })
        }
        Command::Show => {
            let filter = ExtensionFilter::new(config.extensions.iter().cloned());
            let scan = filesystem::find(&config.root, &filter, config.recursive)?;
            let mut files: Vec<FileEntry> = scan.paths.iter().map(|p| FileEntry::from_path(p)).collect();
            files.sort_by(|a, b| a.path.cmp(&b.path));
            Ok(RunResult::Show { scan, files })
        }
        Command::Parse => {
            let filter = ExtensionFilter::new(config.descriptor_extensions.iter().cloned());
            let scan = filesystem::find(&config.root, &filter, config.recursive)?;
            Ok(RunResult::Parse(parse_descriptors(&config.root, scan)))
        }
    }
}

/// Parse every descriptor of `scan` and sort the combined records.
///
/// A descriptor that fails to load is skipped; the caller reports `failures`.
#[must_use]
pub fn parse_descriptors(scan_root: &Path, scan: stats::ScanResult) -> ParseReport {
    let mut records = Vec::new();
    let mut failures: Vec<(PathBuf, error::EngineError)> = Vec::new();

    for descriptor in &scan.paths {
        if let Err(e) = descriptor::parse_into(scan_root, descriptor, &mut records) {
            log::debug!("skipping descriptor: {e}");
            failures.push((descriptor.clone(), e));
        }
    }

    ParseReport {
        scan,
        records: aggregate::aggregate(records),
        failures,
    }
}
