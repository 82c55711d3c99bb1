//! MIDL asset manager.
//!
//! Resolves CSS/JS aliases and their dependencies into ordered file lists,
//! bundles them into content-addressed minified files, and maps image
//! aliases to paths.
//!
//! ```ignore
//! let config = AssetsConfig::load(Path::new("assets.toml"))?;
//! let catalog = Arc::new(AssetCatalog::from_config(&config)?);
//!
//! // per request
//! let mut assets = AssetManager::new(catalog.clone())
//!     .with_minifier(Arc::new(StandardMinifier));
//! assets.add_css("base");
//! let head = assets.tags(AssetKind::Css, BuildMode::PRODUCTION, "/")?;
//! ```

pub mod asset;
pub mod cli;
pub mod config;
pub mod core;
pub mod logger;
pub mod utils;

pub use asset::{
    AssetCatalog, AssetError, AssetKind, AssetManager, AssetMinifier, PathVar, PathVars,
    StandardMinifier,
};
pub use config::{AssetsConfig, ConfigError};
pub use core::BuildMode;
