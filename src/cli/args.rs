//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Parse Jahia site exports into a multilingual page tree
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: jahiap.toml, optional)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

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
    /// Parse an export and cache the result
    #[command(visible_alias = "p")]
    Parse {
        #[command(flatten)]
        args: ParseArgs,
    },

    /// Write a JSON summary of every page, language and box
    #[command(visible_alias = "d")]
    Dump {
        #[command(flatten)]
        args: DumpArgs,
    },

    /// Parse several exports and tabulate their pages, files and boxes as CSV
    #[command(visible_alias = "g")]
    GlobalReport {
        #[command(flatten)]
        args: GlobalReportArgs,
    },
}

/// Which export to read.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory holding the `export_<lang>.xml` documents and the asset tree
    #[arg(value_name = "EXPORT_DIR", value_hint = clap::ValueHint::DirPath)]
    pub export_dir: PathBuf,

    /// Site name (default: the export directory name)
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ParseArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Where parse caches are written (default from config: build)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Reuse a cached parse when the export has not changed (also `[parse] use_cache`)
    #[arg(long)]
    pub use_cache: bool,

    /// Print the parse report to stdout
    #[arg(short = 'r', long)]
    pub print_report: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DumpArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output file (default: stdout)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(short, long)]
    pub pretty: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalReportArgs {
    /// Export directories, one per site
    #[arg(value_name = "EXPORT_DIR", required = true, value_hint = clap::ValueHint::DirPath)]
    pub export_dirs: Vec<PathBuf>,

    /// Where `global-report.csv` and the parse caches are written (default from config: build)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Reuse cached parses when an export has not changed
    #[arg(long)]
    pub use_cache: bool,
}
