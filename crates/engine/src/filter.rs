use std::collections::BTreeSet;
use std::path::Path;

/// Extension based entry filter.
///
/// Extensions are stored with their leading `.` and compared case-sensitively.
/// An empty set accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: BTreeSet<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Filter that accepts every entry (used by `Count`).
    #[must_use]
    pub fn unfiltered() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Decide on a bare extension such as `".cpp"` (or `""` for none).
    #[must_use]
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.is_unfiltered() || self.extensions.contains(extension)
    }

    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        self.is_unfiltered() || self.accepts_extension(&dotted_extension(path))
    }
}

/// Extension of `path` including the leading `.`, or an empty string.
#[must_use]
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
