//! Command-line argument definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::stream::StreamArg;

/// Top-level CLI entry point for resbundle.
#[derive(Parser, Debug)]
#[command(
    name = "resbundle",
    about = "Embed resources as C arrays and package distribution tarballs",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Settings file (defaults to ./resbundle.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Append a timestamped log of every event to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a file's bytes as a C array declaration
    Embed(EmbedOpts),
    /// Package source files into a distribution tarball
    Disttar(DisttarOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name, used in log headers.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Embed(_) => "embed",
            Self::Disttar(_) => "disttar",
            Self::Version => "version",
        }
    }
}

/// Options for the `embed` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct EmbedOpts {
    /// Input file, or `-` for stdin
    #[arg(value_parser = StreamArg::parse)]
    pub input: StreamArg,

    /// Output file, or `-` for stdout
    #[arg(value_parser = StreamArg::parse)]
    pub output: StreamArg,

    /// Array symbol name (defaults to the output file name plus `_data`)
    pub symbol: Option<String>,

    /// Declare the array and length with `static` storage
    #[arg(long = "static")]
    pub is_static: bool,

    /// Also declare `<symbol>_len` holding the byte count
    #[arg(long)]
    pub with_length: bool,

    /// Element type of the array (default `char`)
    #[arg(long)]
    pub array_type: Option<String>,

    /// Type of the length declaration (default `size_t`)
    #[arg(long)]
    pub size_type: Option<String>,
}

/// Options for the `disttar` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct DisttarOpts {
    /// Archive to write; the format suffix is appended when missing
    pub target: PathBuf,

    /// Files and directories to include
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,

    /// Resolve sources relative to this directory
    #[arg(short = 'C', long)]
    pub directory: Option<PathBuf>,

    /// Compression: gz, bz2, or none
    #[arg(long)]
    pub format: Option<String>,

    /// File extensions to leave out
    #[arg(long, value_delimiter = ',')]
    pub exclude_ext: Vec<String>,

    /// Directory names to prune
    #[arg(long, value_delimiter = ',')]
    pub exclude_dir: Vec<String>,

    /// Top-level directory inside the archive (defaults to the target name)
    #[arg(long)]
    pub root_name: Option<String>,

    /// Store fixed timestamps and ownership for byte-identical rebuilds
    #[arg(long)]
    pub reproducible: bool,

    /// Write `<target>.sha256` next to the archive
    #[arg(long)]
    pub checksum: bool,

    /// List the members without writing the archive
    #[arg(short = 'd', long)]
    pub dry_run: bool,
}
