//! Asset kind definitions.

use std::fmt;

/// Kind of static asset. Each kind owns its own alias namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum AssetKind {
    /// Stylesheets, bundled into `.css`.
    Css,
    /// Scripts, bundled into `.js`.
    Js,
    /// Images. No dependency graph, never bundled.
    #[value(name = "img")]
    Image,
}

impl AssetKind {
    /// Kinds that carry a dependency graph and can be bundled.
    pub const BUNDLED: [Self; 2] = [Self::Css, Self::Js];

    /// Config section name (`[css]`, `[js]`, `[img]`).
    pub const fn section(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Js => "js",
            Self::Image => "img",
        }
    }

    /// File extension of bundle artifacts (`None` for images).
    pub const fn extension(self) -> Option<&'static str> {
        match self {
            Self::Css => Some("css"),
            Self::Js => Some("js"),
            Self::Image => None,
        }
    }

    #[inline]
    pub const fn has_dependencies(self) -> bool {
        !matches!(self, Self::Image)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}
