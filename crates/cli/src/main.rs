use clap::Parser;
use projscan_cli::args::Args;
use projscan_cli::config::Config;
use projscan_cli::{logging, presentation};
use projscan_engine::stats::RunResult;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = logging::init(args.behavior.verbosity()) {
        eprintln!("{e}");
    }

    let config = Config::from(args);
    log::debug!("{config:?}");

    match projscan_engine::run(&config) {
        Ok(result) => {
            if let RunResult::Parse(report) = &result {
                for (path, err) in &report.failures {
                    match err.source() {
                        Some(cause) => eprintln!("Error processing {}: {cause}", path.display()),
                        None => eprintln!("Error processing {}: {err}", path.display()),
                    }
                }
            }

            if let Err(e) = presentation::print_results(&result, &config) {
                eprintln!("Output Error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error in function \"{}\": {e}", config.command);
            log::error!("error in function \"{}\"", config.command);
            ExitCode::FAILURE
        }
    }
}
