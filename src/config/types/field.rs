//! Config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// Dot-separated path of a config field, e.g. `css.files.base`.
///
/// Alias names are user data, so paths are built at runtime rather
/// than being `'static`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    #[inline]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Extend the path with one more segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.0.is_empty() {
            return Self::new(segment);
        }
        Self(format!("{}.{segment}", self.0))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
