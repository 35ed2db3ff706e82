//! blockdoc - HTML ⇄ block document converter
//!
//! A CLI tool for converting post content between stored HTML and the
//! block JSON used by block-based editors.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]

mod cli;

use anyhow::{Context, Result};
use blockdoc::converter_config::{ConverterConfig, CONFIG_FILE_NAME};
use blockdoc::pipeline::{self, Direction};
use blockdoc::{round_trip, BlockDocument, BlockKind};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

/// Main entry point for the blockdoc CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG still applies on top of --verbose
    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Info);
    }
    logger.init();

    let config_path = cli.config;

    match cli.command {
        Commands::ToBlocks {
            input,
            output,
            compact,
        } => {
            let config = load_config(config_path.as_deref())?;
            handle_to_blocks_command(&input, output.as_deref(), compact, config)?;
        }

        Commands::ToHtml {
            input,
            output,
            escape,
        } => {
            let config = load_config(config_path.as_deref())?;
            handle_to_html_command(&input, output.as_deref(), escape, config)?;
        }

        Commands::Convert {
            input,
            direction,
            output,
        } => {
            let config = load_config(config_path.as_deref())?;
            handle_convert_command(&input, output.as_deref(), direction.into(), &config)?;
        }

        Commands::Check { input } => {
            handle_check_command(&input)?;
        }

        Commands::Stats { input } => {
            handle_stats_command(&input)?;
        }

        Commands::Init { path, force } => {
            handle_init_command(path, force)?;
        }
    }

    Ok(())
}

/// Load blockdoc.toml from the given path or the current directory
fn load_config(path: Option<&Path>) -> Result<ConverterConfig> {
    pipeline::load_config(path, Path::new(".")).context("Failed to load configuration")
}

/// Handle the to-blocks command
fn handle_to_blocks_command(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    mut config: ConverterConfig,
) -> Result<()> {
    if compact {
        config.pretty_json = false;
    }

    let json = pipeline::convert_file(input, Direction::ToBlocks, &config)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    pipeline::write_output(output, &json).context("Failed to write block JSON")?;

    Ok(())
}

/// Handle the to-html command
fn handle_to_html_command(
    input: &Path,
    output: Option<&Path>,
    escape: bool,
    mut config: ConverterConfig,
) -> Result<()> {
    if escape {
        config.escape_text = true;
    }

    let html = pipeline::convert_file(input, Direction::ToHtml, &config)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    pipeline::write_output(output, &html).context("Failed to write HTML")?;

    Ok(())
}

/// Handle the convert command
fn handle_convert_command(
    input: &Path,
    output: Option<&Path>,
    direction: Direction,
    config: &ConverterConfig,
) -> Result<()> {
    println!("Converting files under {}...", input.display());

    let report = pipeline::convert_directory(input, output, direction, config)
        .with_context(|| format!("Failed to convert directory {}", input.display()))?;

    for (source, target) in &report.converted {
        println!("  {} -> {}", source.display(), target.display());
    }
    for (source, error) in &report.failed {
        println!("  ✗ {}: {}", source.display(), error);
    }

    println!(
        "\n✓ Converted {} files, {} failed",
        report.converted.len(),
        report.failed.len()
    );

    if !report.is_success() {
        anyhow::bail!("{} files failed to convert", report.failed.len());
    }

    Ok(())
}

/// Handle the check command
fn handle_check_command(input: &Path) -> Result<()> {
    let content = pipeline::read_input(input)?;
    let doc = BlockDocument::from_json(&content)
        .with_context(|| format!("Failed to parse block JSON from {}", input.display()))?;

    let report = round_trip::check(&doc);
    print!("{}", report);

    Ok(())
}

/// Handle the stats command
fn handle_stats_command(input: &Path) -> Result<()> {
    let doc = pipeline::read_document(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    println!("{} blocks, {} words", doc.len(), doc.word_count());
    let counts = doc.kind_counts();
    for kind in BlockKind::ALL {
        if let Some(count) = counts.get(&kind) {
            println!("  {:<10} {}", kind, count);
        }
    }

    Ok(())
}

/// Handle the init command
fn handle_init_command(path: Option<PathBuf>, force: bool) -> Result<()> {
    let target_path = path.unwrap_or_else(|| PathBuf::from("."));
    let config_path = target_path.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it",
            config_path.display()
        );
    }

    if !target_path.exists() {
        std::fs::create_dir_all(&target_path)
            .with_context(|| format!("Failed to create directory {}", target_path.display()))?;
    }

    ConverterConfig::default()
        .save(&config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("✓ Wrote {}", config_path.display());

    Ok(())
}
