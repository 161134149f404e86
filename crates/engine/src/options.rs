use serde::{Deserialize, Serialize};
use std::fmt;

/// The three driving operations of an analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Tally files, directories and bytes below the root.
    #[default]
    Count,
    /// List the files whose extension is in the extension set.
    Show,
    /// Parse every project descriptor below the root.
    Parse,
}

impl Command {
    /// Label used in diagnostics (`error in function "Parse"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Count => "Count",
            Self::Show => "Show",
            Self::Parse => "Parse",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Tsv,
    Csv,
    Table,
    Json,
    Yaml,
}
