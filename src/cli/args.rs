//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::asset::AssetKind;

/// MIDL asset manager CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = "assets.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Application root (default: directory of the config file)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Path variable, overrides `[vars]` (e.g. --var LANG=fr)
    #[arg(long = "var", global = true, value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the ordered file paths of aliases and their dependencies
    #[command(visible_alias = "p")]
    Paths {
        #[command(flatten)]
        args: AliasArgs,
    },

    /// Build (or reuse) the minified bundle and print its path
    #[command(visible_alias = "b")]
    Bundle {
        #[command(flatten)]
        args: AliasArgs,
    },

    /// Print the paths of image aliases
    Img {
        /// Image aliases (unregistered names are used as paths)
        #[arg(required = true)]
        aliases: Vec<String>,
    },

    /// Print the `<link>`/`<script>` tags a page layout would emit
    #[command(visible_alias = "t")]
    Tags {
        #[command(flatten)]
        args: AliasArgs,

        /// One tag per source file instead of the bundle
        #[arg(short, long)]
        dev: bool,

        /// Prefix for every emitted URL
        #[arg(short = 'u', long, default_value = "/", value_hint = clap::ValueHint::Url)]
        base_url: String,
    },

    /// Check every alias for unknown dependencies, missing files and cycles
    #[command(visible_alias = "c")]
    Check,
}

/// Kind plus aliases, shared by the resolution commands.
#[derive(clap::Args, Debug, Clone)]
pub struct AliasArgs {
    /// Asset kind
    #[arg(value_enum)]
    pub kind: AssetKind,

    /// Aliases to request, in order
    #[arg(required = true)]
    pub aliases: Vec<String>,
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    if name.is_empty() {
        return Err(format!("empty variable name in `{s}`"));
    }
    Ok((name.to_string(), value.to_string()))
}
