use crate::options::{Command, OutputFormat};
use derive_builder::Builder;
use std::path::PathBuf;

/// Extensions listed by `Show` when the caller supplies none.
pub const DEFAULT_SHOW_EXTENSIONS: &[&str] = &[".cpp", ".h", ".dfm", ".fmx", ".cbproj", ".c", ".hpp"];

/// Extensions of the project descriptors read by `Parse`.
pub const DEFAULT_DESCRIPTOR_EXTENSIONS: &[&str] = &[".cbproj"];

fn to_owned_list(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub command: Command,
    #[builder(default)]
    pub root: PathBuf,
    #[builder(default = "true")]
    pub recursive: bool,
    #[builder(default = "to_owned_list(DEFAULT_SHOW_EXTENSIONS)")]
    pub extensions: Vec<String>,
    #[builder(default = "to_owned_list(DEFAULT_DESCRIPTOR_EXTENSIONS)")]
    pub descriptor_extensions: Vec<String>,

    #[builder(default)]
    pub format: OutputFormat,
    #[builder(default)]
    pub header: bool,
    #[builder(default)]
    pub output_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command: Command::default(),
            root: PathBuf::new(),
            recursive: true,
            extensions: to_owned_list(DEFAULT_SHOW_EXTENSIONS),
            descriptor_extensions: to_owned_list(DEFAULT_DESCRIPTOR_EXTENSIONS),
            format: OutputFormat::default(),
            header: false,
            output_path: None,
        }
    }
}
