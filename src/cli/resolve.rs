//! `paths`, `bundle`, `img` and `tags` commands.
//!
//! Results go to stdout one per line, diagnostics to stderr.

use anyhow::Result;

use super::AliasArgs;
use crate::asset::{AssetKind, AssetManager};
use crate::core::BuildMode;
use crate::log;
use crate::utils::plural_count;

fn request(manager: &mut AssetManager, args: &AliasArgs) {
    for alias in &args.aliases {
        manager.add(args.kind, alias);
    }
}

/// Print `alias<TAB>path` for every resolved file, dependencies first.
pub fn run_paths(mut manager: AssetManager, args: &AliasArgs) -> Result<()> {
    if args.kind == AssetKind::Image {
        return run_img(&manager, &args.aliases);
    }

    request(&mut manager, args);
    let resolved = manager.resolve_paths(args.kind)?;
    if resolved.is_empty() {
        log!("paths"; "no {} files resolved", args.kind);
    }
    for asset in resolved.iter() {
        println!("{}\t{}", asset.alias, asset.path);
    }
    Ok(())
}

/// Print the bundle path, building it on a cache miss.
pub fn run_bundle(mut manager: AssetManager, args: &AliasArgs) -> Result<()> {
    request(&mut manager, args);
    match manager.resolve_minified_path(args.kind)? {
        Some(path) => println!("{path}"),
        None => log!("bundle"; "bundling unavailable for {}", args.kind),
    }
    Ok(())
}

/// Print the path of every image alias.
pub fn run_img(manager: &AssetManager, aliases: &[String]) -> Result<()> {
    for alias in aliases {
        println!("{}", manager.resolve_image_path(alias));
    }
    Ok(())
}

/// Print the tags a page layout would emit.
pub fn run_tags(mut manager: AssetManager, args: &AliasArgs, dev: bool, base_url: &str) -> Result<()> {
    let mode = if dev {
        BuildMode::DEVELOPMENT
    } else {
        BuildMode::PRODUCTION
    };

    request(&mut manager, args);
    let tags = manager.tags(args.kind, mode, base_url)?;
    if !tags.is_empty() {
        println!("{tags}");
    }
    log!("tags"; "{} for {}", plural_count(tags.lines().count(), "tag"), args.kind);
    Ok(())
}
