//! Command-line interface module.

mod args;
pub mod check;
pub mod resolve;

pub use args::{AliasArgs, Cli, Commands};

use std::env;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};

use crate::asset::{AssetCatalog, AssetManager, PathVars, StandardMinifier};
use crate::config::{AssetsConfig, find_config_file};
use crate::debug;

/// Load the config named on the command line and build a request manager.
///
/// `[vars]` are bound first, then `--var` overrides.
pub fn init_manager(cli: &Cli) -> Result<AssetManager> {
    let cwd = env::current_dir().context("failed to read current directory")?;
    let config_path = find_config_file(&cwd, &cli.config).ok_or_else(|| {
        anyhow!(
            "config file `{}` not found in `{}` or its parents",
            cli.config.display(),
            cwd.display()
        )
    })?;
    debug!("config"; "loading {}", config_path.display());

    let mut config = AssetsConfig::load(&config_path)?;
    if let Some(root) = &cli.root {
        config.set_root(&absolute(&cwd, root));
    }

    let catalog = AssetCatalog::from_config(&config)
        .with_context(|| format!("invalid config `{}`", config_path.display()))?;

    let mut vars = PathVars::new();
    for (name, value) in config.literal_vars() {
        vars.set(name, value);
    }
    for (name, value) in &cli.vars {
        vars.set(name.as_str(), value.as_str());
    }

    Ok(AssetManager::new(Arc::new(catalog))
        .with_vars(vars)
        .with_minifier(Arc::new(StandardMinifier)))
}

fn absolute(cwd: &Path, path: &Path) -> std::path::PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
