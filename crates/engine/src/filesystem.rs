use crate::error::Result;
use crate::filter::ExtensionFilter;
use crate::paths::validate_root;
use crate::stats::{DirectoryStats, ScanResult};
use ignore::{Walk, WalkBuilder};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Run `op` and return its value together with the wall-clock time it took.
///
/// # Errors
/// Propagates the error of `op`.
pub fn timed<T>(op: impl FnOnce() -> Result<T>) -> Result<(T, Duration)> {
    let start = Instant::now();
    let value = op()?;
    Ok((value, start.elapsed()))
}

/// Plain recursive walk: no ignore files, hidden entries included, links not followed.
fn build_walker(root: &Path, filter: &ExtensionFilter, recursive: bool) -> Walk {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).follow_links(false);
    if !recursive {
        builder.max_depth(Some(1));
    }

    if !filter.is_unfiltered() {
        let filter = filter.clone();
        builder.filter_entry(move |entry| {
            // Always descend into directories
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            filter.accepts(entry.path())
        });
    }

    builder.build()
}

/// Append every regular file below `root` accepted by `filter` to `out`.
///
/// # Errors
/// Returns an error if `root` is not a directory or the walk fails; `out`
/// may then hold the paths found before the failure.
pub fn find_into(
    root: &Path,
    filter: &ExtensionFilter,
    recursive: bool,
    out: &mut Vec<PathBuf>,
) -> Result<()> {
    validate_root(root)?;
    for entry in build_walker(root, filter, recursive) {
        let entry = entry?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            out.push(entry.into_path());
        }
    }
    Ok(())
}

/// Recursive search for files by extension.
///
/// # Errors
/// Returns an error if `root` is missing, not a directory, or the walk fails.
/// No partial result is returned in that case.
pub fn find(root: &Path, filter: &ExtensionFilter, recursive: bool) -> Result<ScanResult> {
    let (paths, elapsed) = timed(|| {
        let mut paths = Vec::new();
        find_into(root, filter, recursive, &mut paths)?;
        Ok(paths)
    })?;
    log::debug!(
        "walked {}: {} matching files in {elapsed:?}",
        root.display(),
        paths.len()
    );
    Ok(ScanResult { paths, elapsed })
}

/// Count files, subdirectories and bytes below `root`.
///
/// # Errors
/// Returns an error if `root` is missing, not a directory, or the walk fails.
pub fn count(root: &Path, recursive: bool) -> Result<(DirectoryStats, Duration)> {
    validate_root(root)?;
    timed(|| {
        let mut stats = DirectoryStats::default();
        for entry in build_walker(root, &ExtensionFilter::unfiltered(), recursive) {
            let entry = entry?;
            let Some(ft) = entry.file_type() else {
                continue;
            };
            if ft.is_file() {
                stats.file_count += 1;
                stats.total_bytes += entry.metadata()?.len();
            } else if ft.is_dir() && entry.depth() > 0 {
                stats.dir_count += 1;
            }
        }
        Ok(stats)
    })
}
