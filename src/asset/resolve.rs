//! Dependency walk shared by path and bundle resolution.
//!
//! Each requested alias is expanded depth-first: its dependencies (and
//! theirs) come first, then the alias's own path. An alias already
//! resolved earlier in the same call is not walked again, so the output
//! keeps the first occurrence of every alias.
//!
//! Cycles are not errors. While walking an alias, an edge back to any
//! alias currently being expanded is skipped and logged in verbose mode.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use rustc_hash::FxHashSet;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::error::{AssetError, Result};
use super::{AssetManager, AssetRegistry};
use crate::debug;
use crate::utils::path::strip_leading_slash;

/// One resolved alias and its root-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub alias: String,
    pub path: String,
}

/// Ordered, duplicate-free alias → path mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAssets {
    entries: Vec<ResolvedAsset>,
}

impl ResolvedAssets {
    /// Append unless `alias` or `path` is already present.
    ///
    /// A second alias for an already listed file is dropped so the file is
    /// emitted (and bundled) once.
    pub fn push(&mut self, alias: &str, path: String) -> bool {
        if self.contains(alias) || self.entries.iter().any(|e| e.path == path) {
            return false;
        }
        self.entries.push(ResolvedAsset {
            alias: alias.to_string(),
            path,
        });
        true
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.entries.iter().any(|e| e.alias == alias)
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.alias == alias)
            .map(|e| e.path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedAsset> {
        self.entries.iter()
    }

    /// Paths in resolution order.
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }

    pub fn aliases(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.alias.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ResolvedAssets {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.alias, &entry.path)?;
        }
        map.end()
    }
}

/// Output of a walk: the ordered mapping and the newest source mtime.
#[derive(Debug, Default)]
pub struct Resolution {
    pub assets: ResolvedAssets,
    pub max_mtime: Option<SystemTime>,
}

/// State of one resolution call.
pub(crate) struct Walk<'a> {
    manager: &'a AssetManager,
    registry: &'a AssetRegistry,
    root: &'a Path,
    done: FxHashSet<String>,
    out: Resolution,
}

impl<'a> Walk<'a> {
    pub fn new(manager: &'a AssetManager, registry: &'a AssetRegistry, root: &'a Path) -> Self {
        Self {
            manager,
            registry,
            root,
            done: FxHashSet::default(),
            out: Resolution::default(),
        }
    }

    /// Walk every alias in request order.
    pub fn run<S: AsRef<str>>(mut self, aliases: &[S]) -> Result<Resolution> {
        for alias in aliases {
            let mut in_progress = FxHashSet::default();
            self.visit(alias.as_ref(), &mut in_progress)?;
        }
        Ok(self.out)
    }

    fn visit(&mut self, alias: &str, in_progress: &mut FxHashSet<String>) -> Result<()> {
        if self.done.contains(alias) {
            return Ok(());
        }

        let registry = self.registry;
        let entry = registry
            .get(alias)
            .ok_or_else(|| AssetError::UnknownAlias {
                kind: registry.kind(),
                alias: alias.to_string(),
            })?;

        in_progress.insert(alias.to_string());
        for dep in &entry.deps {
            if in_progress.contains(dep) {
                debug!("resolve"; "{} dependency cycle: skipping {} -> {}", registry.kind(), alias, dep);
                continue;
            }
            self.visit(dep, in_progress)?;
        }
        in_progress.remove(alias);

        if !entry.is_umbrella() {
            self.push_file(alias, &entry.path)?;
        }
        self.done.insert(alias.to_string());
        Ok(())
    }

    /// Substitute variables, check the file exists and track its mtime.
    fn push_file(&mut self, alias: &str, template: &str) -> Result<()> {
        let kind = self.registry.kind();
        let template = format!("{}{}", self.registry.base_path(), template);
        let path = strip_leading_slash(&self.manager.apply_vars(&template)).to_string();

        let metadata = fs::metadata(self.root.join(&path))
            .ok()
            .filter(fs::Metadata::is_file)
            .ok_or_else(|| AssetError::FileMissing {
                kind,
                alias: alias.to_string(),
                path: path.clone(),
            })?;

        if let Ok(mtime) = metadata.modified() {
            self.out.max_mtime = self.out.max_mtime.max(Some(mtime));
        }
        self.out.assets.push(alias, path);
        Ok(())
    }
}
