//! Alias registries.
//!
//! Populated once at startup and read-only afterwards, so a registry can be
//! shared by every request through an `Arc`.

use rustc_hash::FxHashMap;

use super::{AssetKind, is_valid_alias};
use crate::config::ConfigError;
use crate::utils::path::{strip_leading_slash, with_trailing_slash};

/// One registered CSS/JS alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    /// Path template relative to the registry's base path. Empty for
    /// umbrella aliases that only pull in dependencies.
    pub path: String,
    /// Aliases resolved before this one, in order.
    pub deps: Vec<String>,
}

impl AssetEntry {
    #[inline]
    pub fn is_umbrella(&self) -> bool {
        self.path.is_empty()
    }
}

/// Aliases of one dependency-graph kind (CSS or JS).
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    kind: AssetKind,
    base_path: String,
    min_path: Option<String>,
    files: FxHashMap<String, AssetEntry>,
}

impl AssetRegistry {
    /// Create an empty registry.
    ///
    /// Paths are made root-relative: no leading `/`, trailing `/` unless empty.
    pub fn new(kind: AssetKind, base_path: &str, min_path: Option<&str>) -> Self {
        Self {
            kind,
            base_path: dir_prefix(base_path),
            min_path: min_path.map(dir_prefix),
            files: FxHashMap::default(),
        }
    }

    /// Register or replace `alias`.
    ///
    /// Both the alias and its dependency names must be valid aliases.
    pub fn insert<S: AsRef<str>>(
        &mut self,
        alias: &str,
        path: &str,
        deps: &[S],
    ) -> Result<(), ConfigError> {
        self.check_alias(alias)?;
        for dep in deps {
            self.check_alias(dep.as_ref())?;
        }

        let entry = AssetEntry {
            path: strip_leading_slash(path).to_string(),
            deps: deps.iter().map(|d| d.as_ref().to_string()).collect(),
        };
        self.files.insert(alias.to_string(), entry);
        Ok(())
    }

    fn check_alias(&self, alias: &str) -> Result<(), ConfigError> {
        if is_valid_alias(alias) {
            Ok(())
        } else {
            Err(ConfigError::InvalidAlias {
                kind: self.kind.section(),
                alias: alias.to_string(),
            })
        }
    }

    #[inline]
    pub fn get(&self, alias: &str) -> Option<&AssetEntry> {
        self.files.get(alias)
    }

    #[inline]
    pub fn contains(&self, alias: &str) -> bool {
        self.files.contains_key(alias)
    }

    /// All aliases, sorted for deterministic reporting.
    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<_> = self.files.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }

    #[inline]
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Source root, ends with `/` (or is empty for the application root).
    #[inline]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Bundle cache directory, ends with `/`.
    #[inline]
    pub fn min_path(&self) -> Option<&str> {
        self.min_path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// `"/assets/css"` → `"assets/css/"`.
fn dir_prefix(path: &str) -> String {
    with_trailing_slash(strip_leading_slash(path))
}

/// Image aliases: alias → path, no dependencies.
#[derive(Debug, Clone, Default)]
pub struct ImageRegistry {
    base_path: String,
    files: FxHashMap<String, String>,
}

impl ImageRegistry {
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: dir_prefix(base_path),
            files: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, alias: &str, path: &str) -> Result<(), ConfigError> {
        if !is_valid_alias(alias) {
            return Err(ConfigError::InvalidAlias {
                kind: AssetKind::Image.section(),
                alias: alias.to_string(),
            });
        }
        self.files.insert(alias.to_string(), path.to_string());
        Ok(())
    }

    #[inline]
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.files.get(alias).map(String::as_str)
    }

    #[inline]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// All aliases, sorted.
    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<_> = self.files.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_normalized() {
        let registry = AssetRegistry::new(AssetKind::Css, "assets/css", Some("assets/min//"));
        assert_eq!(registry.base_path(), "assets/css/");
        assert_eq!(registry.min_path(), Some("assets/min/"));
        assert_eq!(ImageRegistry::new("assets/img\\").base_path(), "assets/img/");

        let registry = AssetRegistry::new(AssetKind::Js, "/assets/js/", Some("/assets/min"));
        assert_eq!(registry.base_path(), "assets/js/");
        assert_eq!(registry.min_path(), Some("assets/min/"));
        assert_eq!(AssetRegistry::new(AssetKind::Js, "/", None).base_path(), "");
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = AssetRegistry::new(AssetKind::Js, "assets/js/", None);
        registry.insert("base", "", &["jq", "app"]).unwrap();
        registry.insert("app", "/app.js", &[] as &[&str]).unwrap();

        let base = registry.get("base").unwrap();
        assert!(base.is_umbrella());
        assert_eq!(base.deps, vec!["jq", "app"]);
        assert_eq!(registry.get("app").unwrap().path, "app.js");
        assert!(!registry.contains("jq"));
        assert_eq!(registry.aliases(), vec!["app", "base"]);
        assert_eq!(registry.min_path(), None);
    }

    #[test]
    fn test_insert_rejects_invalid_alias() {
        let mut registry = AssetRegistry::new(AssetKind::Css, "assets/css/", None);
        let err = registry.insert("a b", "x.css", &[] as &[&str]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAlias { kind: "css", .. }));

        let err = registry.insert("ok", "x.css", &["bad/dep"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAlias { ref alias, .. } if alias == "bad/dep"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_image_registry() {
        let mut images = ImageRegistry::new("assets/img");
        images.insert("logo", "brand/logo.png").unwrap();
        assert_eq!(images.get("logo"), Some("brand/logo.png"));
        assert!(images.insert("lo go", "x.png").is_err());
        assert_eq!(images.aliases(), vec!["logo"]);
    }
}
