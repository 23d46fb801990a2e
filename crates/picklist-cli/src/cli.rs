//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "picklist",
    version,
    about = "Expand marketplace order picklists into warehouse pick lines",
    long_about = "Expand marketplace order picklists into warehouse pick lines.\n\n\
                  Pack-size rows get their SKU and quantity rewritten in place;\n\
                  bundle rows are replaced by one row per contained item."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include order identifiers in row-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Expand the bundles and pack sizes of a picklist sheet.
    Process(ProcessArgs),

    /// Turn a marketplace order export into a picklist sheet.
    Prepare(PrepareArgs),

    /// Group the SKUs of a processed sheet by warehouse shelf order.
    Route(RouteArgs),

    /// List the active expansion rules.
    Rules(RulesArgs),
}

/// Location of a picklist sheet: `<STORE>/<TABLE>/<SHEET>.csv`.
#[derive(Args, Clone)]
pub struct SheetArgs {
    /// Directory holding one folder per table.
    #[arg(long = "store", value_name = "DIR", default_value = ".")]
    pub store: PathBuf,

    /// Table (folder) name.
    #[arg(long = "table", default_value = "Warehouse Test")]
    pub table: String,

    /// Sub-sheet (file) name.
    #[arg(long = "sheet", default_value = "Imported Data2")]
    pub sheet: String,
}

#[derive(Parser)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Rule catalog in TOML (default: built-in rules).
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Print the plan without writing to the sheet.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct PrepareArgs {
    /// Marketplace export CSV with `order_sn` and `product_info` columns.
    #[arg(value_name = "EXPORT_CSV")]
    pub export: PathBuf,

    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Write to this CSV file instead of the sheet store.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RouteArgs {
    /// Warehouse sequence CSV with `warehouse` and `sku` columns.
    #[arg(value_name = "SEQUENCE_CSV")]
    pub sequence: PathBuf,

    #[command(flatten)]
    pub sheet: SheetArgs,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Rule catalog in TOML (default: built-in rules).
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
