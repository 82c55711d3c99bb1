//! Asset configuration management for `assets.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [css]/[js] and [img] definitions
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # config file lookup
//! └── mod.rs         # AssetsConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section   | Purpose                                             |
//! |-----------|-----------------------------------------------------|
//! | `[vars]`  | Literal path variables (`{LANG}` in path templates) |
//! | `[css]`   | Stylesheets: base/min path, files, dependencies     |
//! | `[js]`    | Scripts: base/min path, files, dependencies         |
//! | `[img]`   | Images: base path, files                            |

pub mod section;
pub mod types;
mod util;

pub use section::{Dependencies, ImageSection, KindSection};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::find_config_file;

use crate::asset::AssetKind;
use crate::log;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "assets.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing assets.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Application root - parent of config file unless overridden (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Literal path variables substituted into `{NAME}` placeholders.
    pub vars: BTreeMap<String, toml::Value>,

    /// Stylesheets
    pub css: Option<KindSection>,

    /// Scripts
    pub js: Option<KindSection>,

    /// Images
    pub img: Option<ImageSection>,
}

impl AssetsConfig {
    /// Load configuration from a file.
    ///
    /// The application root is the config file's parent directory.
    /// Unknown fields are reported as warnings, never rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = path.to_path_buf();
        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the application root directory
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the application root directory
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Section for a dependency-graph kind (`None` for images or unconfigured kinds).
    pub fn section(&self, kind: AssetKind) -> Option<&KindSection> {
        match kind {
            AssetKind::Css => self.css.as_ref(),
            AssetKind::Js => self.js.as_ref(),
            AssetKind::Image => None,
        }
    }

    /// Literal `[vars]` as strings. Non-scalar values are skipped.
    pub fn literal_vars(&self) -> impl Iterator<Item = (&str, String)> {
        self.vars
            .iter()
            .filter_map(|(name, value)| scalar_to_string(value).map(|v| (name.as_str(), v)))
    }

    /// Full validation of alias names and variables.
    ///
    /// All problems are collected first, then reported at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        for (name, value) in &self.vars {
            if scalar_to_string(value).is_none() {
                diag.error_with_hint(
                    FieldPath::new("vars").join(name),
                    format!("variable '{name}' must be a string, number or boolean"),
                    "tables and arrays cannot be substituted into a path",
                );
            }
        }

        if let Some(css) = &self.css {
            css.validate(AssetKind::Css.section(), &mut diag);
        }
        if let Some(js) = &self.js {
            js.validate(AssetKind::Js.section(), &mut diag);
        }
        if let Some(img) = &self.img {
            img.validate(&mut diag);
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

/// Stringify a scalar TOML value.
fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

// ============================================================================
// tests
// ============================================================================
