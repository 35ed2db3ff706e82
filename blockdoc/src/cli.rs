//! Command-line interface definitions for blockdoc

use blockdoc::pipeline::Direction;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Batch conversion direction
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum DirectionArg {
    /// HTML files to block JSON
    #[default]
    ToBlocks,
    /// Block JSON files to HTML
    ToHtml,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::ToBlocks => Direction::ToBlocks,
            DirectionArg::ToHtml => Direction::ToHtml,
        }
    }
}

/// CLI structure for the blockdoc application
#[derive(Parser)]
#[command(name = "blockdoc")]
#[command(version)]
#[command(about = "Convert post content between HTML and editor blocks", long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./blockdoc.toml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for blockdoc
#[derive(Subcommand)]
pub enum Commands {
    /// Convert HTML to block JSON
    ToBlocks {
        /// Input HTML file, or - for stdin
        #[arg(value_name = "INPUT", default_value = "-")]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write single-line JSON regardless of configuration
        #[arg(long)]
        compact: bool,
    },

    /// Convert block JSON to HTML
    ToHtml {
        /// Input JSON file, or - for stdin
        #[arg(value_name = "INPUT", default_value = "-")]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// HTML-escape block text regardless of configuration
        #[arg(long)]
        escape: bool,
    },

    /// Convert every matching file under a directory
    Convert {
        /// Directory to convert
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Conversion direction
        #[arg(short, long, value_enum, default_value = "to-blocks")]
        direction: DirectionArg,

        /// Output directory (defaults to writing next to each input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report which blocks do not survive an HTML round trip
    Check {
        /// Input JSON file, or - for stdin
        #[arg(value_name = "INPUT", default_value = "-")]
        input: PathBuf,
    },

    /// Print block counts and word count
    Stats {
        /// Input file (.json is read as blocks, anything else as HTML)
        #[arg(value_name = "INPUT", default_value = "-")]
        input: PathBuf,
    },

    /// Write a default blockdoc.toml
    Init {
        /// Directory to initialize (defaults to current directory)
        path: Option<PathBuf>,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}
