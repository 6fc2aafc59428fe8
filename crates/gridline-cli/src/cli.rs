//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gridline::ExportFormat;

/// Export and inspect data tables described in YAML or JSON.
#[derive(Debug, Parser)]
#[command(name = "gridline")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write rows as a CSV, PDF or text file
    Export(ExportArgs),

    /// Print pinned offsets, group widths and the group header row
    Layout(LayoutArgs),
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Table definition (.yaml, .yml or .json)
    #[arg(long, short = 't')]
    pub table: PathBuf,

    /// Row data (.json, .yaml, .yml or .csv)
    #[arg(long, short = 'r')]
    pub rows: PathBuf,

    #[arg(long, short = 'f', value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Output directory
    #[arg(long, short = 'o', default_value = ".")]
    pub out: PathBuf,

    /// 1-based page to export; implies pagination
    #[arg(long)]
    pub page: Option<usize>,

    /// Rows per page when paginating
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Table definition (.yaml, .yml or .json)
    #[arg(long, short = 't')]
    pub table: PathBuf,

    #[arg(long, short = 'o', value_enum, default_value_t = LayoutFormat::Text)]
    pub output: LayoutFormat,
}

/// Export sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Pdf,
    Text,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ExportFormat::Csv,
            Format::Pdf => ExportFormat::Pdf,
            Format::Text => ExportFormat::Text,
        }
    }
}

/// How `layout` prints its report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LayoutFormat {
    /// Bordered tables
    #[default]
    Text,
    Json,
    Yaml,
}
