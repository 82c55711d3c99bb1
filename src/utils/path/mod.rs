//! Path and URL utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`)
//! - [`route`]: `/`-separated relative paths (`with_trailing_slash`, `resolve_relative`)

pub mod fs;
pub mod route;

pub use fs::normalize_path;
pub use route::{is_external_link, parent_dir, resolve_relative, strip_leading_slash, with_trailing_slash};
