//! Asset catalog (shared) and per-request asset manager.
//!
//! ```text
//! AssetCatalog   built once from assets.toml, immutable, Arc-shared
//!      │
//!      ▼
//! AssetManager   one per request: requested aliases, path vars, minifier
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::bundle::{ensure_writable, fingerprint, write_artifact};
use super::error::{AssetError, Result};
use super::minify::AssetMinifier;
use super::resolve::{Resolution, Walk};
use super::{AssetKind, AssetRegistry, ImageRegistry, PathVars, ResolvedAssets};
use crate::config::{AssetsConfig, ConfigError, ImageSection, KindSection};
use crate::utils::path::{normalize_path, strip_leading_slash};
use crate::{debug, log};

// ============================================================================
// AssetCatalog
// ============================================================================

/// Registries of every asset kind, rooted at the application root.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    root: PathBuf,
    css: Option<AssetRegistry>,
    js: Option<AssetRegistry>,
    images: ImageRegistry,
}

impl AssetCatalog {
    /// Empty catalog. Fails if `root` is not a directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ConfigError::MissingRoot(root.to_path_buf()));
        }
        Ok(Self {
            root: normalize_path(root),
            css: None,
            js: None,
            images: ImageRegistry::default(),
        })
    }

    /// Build a catalog from a loaded config, validating it first.
    pub fn from_config(config: &AssetsConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut catalog = Self::new(config.get_root())?;
        for kind in AssetKind::BUNDLED {
            if let Some(section) = config.section(kind) {
                catalog.configure(kind, section)?;
            }
        }
        if let Some(img) = &config.img {
            catalog.configure_images(img)?;
        }
        Ok(catalog)
    }

    /// Register the base/min path and every alias of one kind.
    ///
    /// For [`AssetKind::Image`] only `base_path` and `files` are used.
    pub fn configure(&mut self, kind: AssetKind, section: &KindSection) -> Result<(), ConfigError> {
        if kind == AssetKind::Image {
            let images = ImageSection {
                base_path: section.base_path.clone(),
                files: section.files.clone(),
            };
            return self.configure_images(&images);
        }

        self.check_base_path(kind, &section.base_path)?;

        let mut registry = AssetRegistry::new(kind, &section.base_path, section.min_path.as_deref());
        for (alias, path) in &section.files {
            registry.insert(alias, path, &section.deps_of(alias))?;
        }

        match kind {
            AssetKind::Css => self.css = Some(registry),
            AssetKind::Js => self.js = Some(registry),
            AssetKind::Image => unreachable!("images handled above"),
        }
        Ok(())
    }

    /// Register the image base path and aliases.
    pub fn configure_images(&mut self, section: &ImageSection) -> Result<(), ConfigError> {
        self.check_base_path(AssetKind::Image, &section.base_path)?;

        let mut images = ImageRegistry::new(&section.base_path);
        for (alias, path) in &section.files {
            images.insert(alias, path)?;
        }
        self.images = images;
        Ok(())
    }

    fn check_base_path(&self, kind: AssetKind, base_path: &str) -> Result<(), ConfigError> {
        let dir = self.root.join(strip_leading_slash(base_path));
        if dir.is_dir() {
            Ok(())
        } else {
            Err(ConfigError::MissingBasePath {
                kind: kind.section(),
                path: dir,
            })
        }
    }

    /// Register one more CSS/JS alias, creating the registry if needed.
    pub fn add_alias<S: AsRef<str>>(
        &mut self,
        kind: AssetKind,
        alias: &str,
        path: &str,
        deps: &[S],
    ) -> Result<(), ConfigError> {
        if kind == AssetKind::Image {
            return self.images.insert(alias, path);
        }

        let slot = match kind {
            AssetKind::Css => &mut self.css,
            _ => &mut self.js,
        };
        slot.get_or_insert_with(|| AssetRegistry::new(kind, "", None))
            .insert(alias, path, deps)
    }

    /// Register one more image alias.
    pub fn add_image_alias(&mut self, alias: &str, path: &str) -> Result<(), ConfigError> {
        self.images.insert(alias, path)
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Registry of a dependency-graph kind.
    pub fn registry(&self, kind: AssetKind) -> Option<&AssetRegistry> {
        match kind {
            AssetKind::Css => self.css.as_ref(),
            AssetKind::Js => self.js.as_ref(),
            AssetKind::Image => None,
        }
    }

    #[inline]
    pub fn images(&self) -> &ImageRegistry {
        &self.images
    }

    /// Whether `rel` (relative to the application root) is an existing directory.
    fn dir_exists(&self, rel: &str) -> bool {
        self.root.join(strip_leading_slash(rel)).is_dir()
    }
}

// ============================================================================
// RequestedSet
// ============================================================================

/// Aliases requested for the current response, first-add order, no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedSet {
    aliases: Vec<String>,
}

impl RequestedSet {
    /// Append `alias` unless already requested.
    pub fn add(&mut self, alias: &str) {
        if !self.aliases.iter().any(|a| a == alias) {
            self.aliases.push(alias.to_string());
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.aliases
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

// ============================================================================
// AssetManager
// ============================================================================

/// Per-request view over a shared [`AssetCatalog`].
///
/// Controllers and views add aliases while rendering; the page layout then
/// asks for the final paths (development) or bundle path (production).
#[derive(Clone)]
pub struct AssetManager {
    catalog: Arc<AssetCatalog>,
    vars: PathVars,
    minifier: Option<Arc<dyn AssetMinifier>>,
    css: RequestedSet,
    js: RequestedSet,
}

impl std::fmt::Debug for AssetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetManager")
            .field("root", &self.catalog.root())
            .field("vars", &self.vars)
            .field("minifier", &self.minifier.is_some())
            .field("css", &self.css)
            .field("js", &self.js)
            .finish()
    }
}

impl AssetManager {
    pub fn new(catalog: Arc<AssetCatalog>) -> Self {
        Self {
            catalog,
            vars: PathVars::default(),
            minifier: None,
            css: RequestedSet::default(),
            js: RequestedSet::default(),
        }
    }

    pub fn with_vars(mut self, vars: PathVars) -> Self {
        self.vars = vars;
        self
    }

    pub fn with_minifier(mut self, minifier: Arc<dyn AssetMinifier>) -> Self {
        self.minifier = Some(minifier);
        self
    }

    /// Replace or remove the minifier. Without one, bundling is disabled.
    pub fn set_minifier(&mut self, minifier: Option<Arc<dyn AssetMinifier>>) {
        self.minifier = minifier;
    }

    pub fn minifier(&self) -> Option<&Arc<dyn AssetMinifier>> {
        self.minifier.as_ref()
    }

    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    pub fn vars(&self) -> &PathVars {
        &self.vars
    }

    /// Request `alias` for the current response.
    ///
    /// Not validated here; unknown aliases fail at resolution.
    pub fn add(&mut self, kind: AssetKind, alias: &str) {
        match kind {
            AssetKind::Css => self.css.add(alias),
            AssetKind::Js => self.js.add(alias),
            AssetKind::Image => {}
        }
    }

    #[inline]
    pub fn add_css(&mut self, alias: &str) {
        self.add(AssetKind::Css, alias);
    }

    #[inline]
    pub fn add_js(&mut self, alias: &str) {
        self.add(AssetKind::Js, alias);
    }

    /// Aliases requested so far for `kind`.
    pub fn requested(&self, kind: AssetKind) -> &[String] {
        match kind {
            AssetKind::Css => self.css.as_slice(),
            AssetKind::Js => self.js.as_slice(),
            AssetKind::Image => &[],
        }
    }

    /// Substitute `{NAME}` placeholders with this request's variables.
    pub fn apply_vars(&self, template: &str) -> String {
        self.vars.apply(self, template)
    }

    /// Ordered, deduplicated alias → path mapping of every requested alias
    /// and its transitive dependencies.
    ///
    /// Empty when nothing was requested or the base path is gone.
    pub fn resolve_paths(&self, kind: AssetKind) -> Result<ResolvedAssets> {
        let Some(registry) = self.catalog.registry(kind) else {
            return Ok(ResolvedAssets::default());
        };
        let requested = self.requested(kind);
        if requested.is_empty() || !self.catalog.dir_exists(registry.base_path()) {
            return Ok(ResolvedAssets::default());
        }

        Ok(self.walk(registry, requested)?.assets)
    }

    /// Path of the cached bundle for the requested aliases, built on a miss.
    ///
    /// `None` when bundling is unavailable: no minifier, no `min_path`,
    /// nothing requested, missing base/min directory, or only umbrella
    /// aliases resolved.
    pub fn resolve_minified_path(&self, kind: AssetKind) -> Result<Option<String>> {
        let Some(minifier) = self.minifier.as_deref() else {
            return Ok(None);
        };
        let Some(registry) = self.catalog.registry(kind) else {
            return Ok(None);
        };
        let (Some(min_path), Some(ext)) = (registry.min_path(), kind.extension()) else {
            return Ok(None);
        };
        let requested = self.requested(kind);
        if requested.is_empty()
            || !self.catalog.dir_exists(registry.base_path())
            || !self.catalog.dir_exists(min_path)
        {
            return Ok(None);
        }

        let resolution = self.walk(registry, requested)?;
        if resolution.assets.is_empty() {
            return Ok(None);
        }

        let key = fingerprint(resolution.max_mtime, &resolution.assets)?.cache_key();
        let cache_path = format!("{min_path}{key}.{ext}");
        let dest = self.catalog.root().join(strip_leading_slash(&cache_path));

        if dest.is_file() {
            debug!("bundle"; "cache hit {}", cache_path);
            return Ok(Some(cache_path));
        }

        let root = self.catalog.root();
        let cache_write = |source| AssetError::CacheWrite {
            path: dest.clone(),
            source,
        };
        ensure_writable(dest.parent().unwrap_or(root)).map_err(cache_write)?;

        let files = resolution.assets.paths();
        let content = match kind {
            AssetKind::Css => minifier.minify_css(&files, root),
            _ => minifier.minify_js(&files, root),
        }
        .map_err(|source| AssetError::Minify { kind, source })?;

        write_artifact(&dest, &content).map_err(cache_write)?;
        log!("bundle"; "{} ({} files) -> {}", kind, files.len(), cache_path);

        Ok(Some(cache_path))
    }

    /// Root-relative path of an image alias, or of `image` itself when it
    /// is not a registered alias.
    pub fn resolve_image_path(&self, image: &str) -> String {
        let images = self.catalog.images();
        let rel = images.get(image).unwrap_or(image);
        let path = format!("{}{}", images.base_path(), strip_leading_slash(rel));
        self.apply_vars(&path)
    }

    fn walk(&self, registry: &AssetRegistry, requested: &[String]) -> Result<Resolution> {
        Walk::new(self, registry, self.catalog.root()).run(requested)
    }
}
