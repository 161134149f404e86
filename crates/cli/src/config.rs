// crates/cli/src/config.rs
use crate::args::{Args, CommandArgs};
use crate::options;
pub use projscan_engine::config::{Config, ConfigBuilder};
use projscan_engine::options as engine_options;

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let mut builder = ConfigBuilder::default();

        match args.command {
            CommandArgs::Count { directory } => {
                builder.command(engine_options::Command::Count).root(directory);
            }
            CommandArgs::Show { directory, ext } => {
                builder.command(engine_options::Command::Show).root(directory);
                if !ext.is_empty() {
                    builder.extensions(ext);
                }
            }
            CommandArgs::Parse { directory, ext } => {
                builder.command(engine_options::Command::Parse).root(directory);
                if !ext.is_empty() {
                    builder.descriptor_extensions(ext);
                }
            }
        }

        let format: engine_options::OutputFormat = args.output.format.into();

        builder
            .recursive(!args.behavior.no_recursive)
            .format(format)
            .header(args.output.header)
            .output_path(args.output.output)
            .build()
            .expect("Failed to build config")
    }
}

// From trait implementations for CLI -> Engine enum conversion

macro_rules! map_enum {
    ($from:ty, $to:ty, $($variant:ident),+ $(,)?) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self {
                match f {
                    $( <$from>::$variant => <$to>::$variant, )+
                }
            }
        }
    };
}

map_enum!(
    options::OutputFormat,
    engine_options::OutputFormat,
    Tsv,
    Csv,
    Table,
    Json,
    Yaml
);

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn config_from(argv: &[&str]) -> Config {
        Config::from(Args::try_parse_from(argv.iter().copied()).unwrap())
    }

    #[test]
    fn test_count_defaults() {
        let config = config_from(&["projscan", "count", "src"]);
        assert_eq!(config.command, engine_options::Command::Count);
        assert_eq!(config.root, PathBuf::from("src"));
        assert!(config.recursive);
        assert_eq!(config.format, engine_options::OutputFormat::Tsv);
        assert!(config.output_path.is_none());
    }

    #[test]
    fn test_show_extensions() {
        let config = config_from(&["projscan", "show", ".", "--ext", "cpp,.h"]);
        assert_eq!(config.command, engine_options::Command::Show);
        assert_eq!(config.extensions, vec![".cpp".to_string(), ".h".to_string()]);
    }

    #[test]
    fn test_show_default_extensions() {
        let config = config_from(&["projscan", "show", "."]);
        assert!(config.extensions.contains(&".cbproj".to_string()));
        assert_eq!(config.extensions.len(), 7);
    }

    #[test]
    fn test_parse_with_global_options_after_subcommand() {
        let config = config_from(&[
            "projscan",
            "parse",
            "d:/projekte",
            "--format",
            "json",
            "--header",
            "--no-recursive",
            "-o",
            "out.json",
        ]);
        assert_eq!(config.command, engine_options::Command::Parse);
        assert_eq!(config.descriptor_extensions, vec![".cbproj".to_string()]);
        assert_eq!(config.format, engine_options::OutputFormat::Json);
        assert!(config.header);
        assert!(!config.recursive);
        assert_eq!(config.output_path, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        assert!(Args::try_parse_from(["projscan", "count"]).is_err());
    }
}
