//! `[css]` and `[js]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [js]
//! base_path = "assets/js/"
//! min_path = "assets/min/"
//!
//! [js.files]
//! base = ""
//! jq = "vendor/jquery/jquery-2.2.4.min.js"
//! ng-locale = "vendor/angular/locale/angular-locale_{LANG}.js"
//!
//! [js.dependencies]
//! base = ["jq", "ng-locale"]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::asset::is_valid_alias;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Dependency list of one alias: a single alias or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependencies {
    One(String),
    Many(Vec<String>),
}

impl Dependencies {
    /// Dependencies in declaration order.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(alias) => vec![alias.clone()],
            Self::Many(aliases) => aliases.clone(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::One(alias) => std::slice::from_ref(alias),
            Self::Many(aliases) => aliases,
        };
        slice.iter().map(String::as_str)
    }
}

impl Default for Dependencies {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// Asset section with a dependency graph (CSS or JS).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KindSection {
    /// Source root, relative to the application root.
    #[serde(alias = "basePath")]
    pub base_path: String,

    /// Bundle cache directory. Absent disables bundling for this kind.
    #[serde(alias = "minPath")]
    pub min_path: Option<String>,

    /// Alias → path template (relative to `base_path`, `""` for umbrella aliases).
    pub files: BTreeMap<String, String>,

    /// Alias → aliases loaded before it, in order.
    pub dependencies: BTreeMap<String, Dependencies>,
}

impl KindSection {
    /// Dependencies declared for `alias`, empty when none.
    pub fn deps_of(&self, alias: &str) -> Vec<String> {
        self.dependencies
            .get(alias)
            .map(Dependencies::to_vec)
            .unwrap_or_default()
    }

    /// Validate alias names and dependency keys.
    ///
    /// # Checks
    /// - every alias in `files` is a valid alias
    /// - every alias named in `dependencies` is a valid alias
    /// - `dependencies` keys without a matching `files` entry are ignored (warning)
    pub fn validate(&self, section: &'static str, diag: &mut ConfigDiagnostics) {
        let root = FieldPath::new(section);

        for alias in self.files.keys() {
            if !is_valid_alias(alias) {
                diag.error_with_hint(
                    root.join("files").join(alias),
                    format!("invalid alias '{alias}'"),
                    "only alphanumeric, `-` and `.` characters are allowed",
                );
            }
        }

        for (alias, deps) in &self.dependencies {
            let field = root.join("dependencies").join(alias);
            if !self.files.contains_key(alias) {
                diag.warn(
                    field.clone(),
                    format!("'{alias}' is not declared in [{section}.files]"),
                );
            }
            for dep in deps.iter() {
                if !is_valid_alias(dep) {
                    diag.error(field.clone(), format!("invalid dependency alias '{dep}'"));
                }
            }
        }
    }
}
