//! Asset aliases, dependency resolution and bundling.
//!
//! # Module Structure
//!
//! ```text
//! asset/
//! ├── kind.rs       # AssetKind (css, js, img)
//! ├── alias.rs      # alias name rules
//! ├── registry.rs   # alias -> path + dependencies
//! ├── vars.rs       # {NAME} placeholder substitution
//! ├── resolve.rs    # dependency walk
//! ├── bundle.rs     # cache key + atomic artifact write
//! ├── minify.rs     # AssetMinifier seam, oxc/lightningcss implementation
//! ├── manager.rs    # AssetCatalog (shared) + AssetManager (per request)
//! ├── tags.rs       # <link>/<script> emission
//! ├── check.rs      # whole-catalog check
//! └── error.rs      # AssetError
//! ```

mod alias;
pub mod bundle;
mod check;
mod error;
mod kind;
mod manager;
pub mod minify;
mod registry;
mod resolve;
mod tags;
mod vars;

pub use alias::is_valid_alias;
pub use check::CheckIssue;
pub use error::{AssetError, Result};
pub use kind::AssetKind;
pub use manager::{AssetCatalog, AssetManager, RequestedSet};
pub use minify::{AssetMinifier, MinifyError, StandardMinifier};
pub use registry::{AssetEntry, AssetRegistry, ImageRegistry};
pub use resolve::{Resolution, ResolvedAsset, ResolvedAssets};
pub use vars::{ComputeFn, PathVar, PathVars};
