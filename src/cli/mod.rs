//! CLI command definitions for drone-config
//!
//! This module defines the CLI structure using clap's derive macros.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and apply AR.Drone configuration dumps
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to section settings (YAML)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Unknown key behavior: allow, warn or reject (overrides settings)
    #[arg(long, global = true)]
    pub unknown_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Output format: json or markdown
    #[arg(short, long, default_value = "markdown", global = true)]
    pub format: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a configuration dump and report which keys changed
    Apply(ApplyArgs),

    /// List the known keys with their kinds and default values
    Kinds,
}

/// Arguments for the apply subcommand
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Dump file with one `key = value` per line (`-` for stdin)
    #[arg(value_name = "DUMP")]
    pub dump: PathBuf,

    /// Print the resulting section after the report
    #[arg(long)]
    pub show: bool,
}
