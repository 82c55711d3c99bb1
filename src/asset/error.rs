//! Asset resolution errors.

use std::path::PathBuf;

use thiserror::Error;

use super::AssetKind;
use super::minify::MinifyError;
use crate::config::ConfigError;

/// Errors surfaced by asset resolution and bundling.
///
/// None of these are retried: a failing resolution call fails the
/// current request.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown {kind} alias `{alias}`")]
    UnknownAlias { kind: AssetKind, alias: String },

    #[error("Asset file `{path}` of {kind} alias `{alias}` doesn't exist")]
    FileMissing {
        kind: AssetKind,
        alias: String,
        path: String,
    },

    #[error("Unable to write asset cache file `{path}`")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to compute bundle cache key")]
    Fingerprint(#[from] serde_json::Error),

    #[error("Unable to minify {kind} bundle")]
    Minify {
        kind: AssetKind,
        #[source]
        source: MinifyError,
    },
}

pub type Result<T, E = AssetError> = std::result::Result<T, E>;
