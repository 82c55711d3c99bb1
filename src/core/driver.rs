//! Build mode configuration for production/development rendering.

/// Build mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMode {
    /// Whether to emit one cached, minified bundle per kind instead of
    /// one tag per source file.
    pub bundle: bool,
}

impl BuildMode {
    /// Production mode: minified bundles when available.
    pub const PRODUCTION: Self = Self { bundle: true };

    /// Development mode: individual source files, easier to debug.
    pub const DEVELOPMENT: Self = Self { bundle: false };

    /// Check if this is development mode.
    #[inline]
    pub const fn is_dev(&self) -> bool {
        !self.bundle
    }
}
