// crates/cli/src/presentation.rs
use crate::config::Config;
use crate::error::Result;
use projscan_engine::report::{
    self, COUNT_COLUMNS, CountSummary, FILE_COLUMNS, PROJECT_COLUMNS, ReportOptions,
};
use projscan_engine::stats::RunResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Duration;

fn seconds(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64()
}

/// Open the configured sink: the output file, or stdout.
fn open_sink(config: &Config) -> Result<Box<dyn Write>> {
    Ok(match &config.output_path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Log the run summary and write the report rows to the sink.
pub fn print_results(result: &RunResult, config: &Config) -> Result<()> {
    let options = ReportOptions {
        format: config.format,
        header: config.header,
    };
    let mut sink = open_sink(config)?;

    match result {
        RunResult::Count { stats, elapsed } => {
            report::emit(&mut sink, COUNT_COLUMNS, &[CountSummary::from(stats)], &options)?;
            log::info!(
                "function \"Count\" processed in {:.3} sec",
                seconds(*elapsed)
            );
        }
        RunResult::Show { scan, files } => {
            log::info!(
                "function \"Find\" processed in {:.3} sec, {} files found",
                seconds(scan.elapsed),
                scan.paths.len()
            );
            report::emit(&mut sink, FILE_COLUMNS, files, &options)?;
        }
        RunResult::Parse(parse) => {
            log::info!(
                "{} files found, processed in {:.3} sec",
                parse.scan.paths.len(),
                seconds(parse.scan.elapsed)
            );
            report::emit(&mut sink, PROJECT_COLUMNS, &parse.records, &options)?;
            log::info!(
                "{} compile units from {} project files",
                parse.records.len(),
                parse.scan.paths.len() - parse.failures.len()
            );
        }
    }

    Ok(())
}
