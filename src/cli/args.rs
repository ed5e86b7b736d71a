//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Export architecture metadata from compiled codebases
#[derive(Parser, Debug)]
#[command(name = "blueprint")]
#[command(about = "Export architecture metadata from compiled codebases")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export the architecture of a source tree to a JSON or XML document
    Export {
        /// Path to the source tree of class descriptors
        path: PathBuf,

        /// Destination file (default: architecture.json or architecture.xml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export minimal architecture (names and annotations only)
        #[arg(short, long)]
        minimal: bool,

        /// Group the export by package instead of by class
        #[arg(short, long)]
        packages: bool,

        /// Output format (json, xml)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overwrite an existing destination file without asking
        #[arg(short, long)]
        force: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}
