//! midl-assets - MIDL asset manager command line.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use midl_assets::cli::{self, Cli, Commands};
use midl_assets::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let manager = cli::init_manager(&cli)?;

    match &cli.command {
        Commands::Paths { args } => cli::resolve::run_paths(manager, args),
        Commands::Bundle { args } => cli::resolve::run_bundle(manager, args),
        Commands::Img { aliases } => cli::resolve::run_img(&manager, aliases),
        Commands::Tags {
            args,
            dev,
            base_url,
        } => cli::resolve::run_tags(manager, args, *dev, base_url),
        Commands::Check => cli::check::run_check(&manager),
    }
}
