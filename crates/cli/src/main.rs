// shipmatch CLI - compare a carrier manifest against a warehouse dispatch sheet

mod compare;
mod exit_codes;
mod table;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

#[derive(Parser)]
#[command(name = "shipmatch")]
#[command(about = "Reconcile shipped quantities per order number across two spreadsheet exports")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Log debug detail (row counts, skipped rows) to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare source A (carrier) against source B (warehouse)
    #[command(after_help = "\
Examples:
  shipmatch compare --a carrier.xlsx --b warehouse.xlsx
  shipmatch compare --a carrier.xlsx --b warehouse.csv --output diff.xlsx
  shipmatch compare --a a.csv --b b.csv --config layout.toml --json

Exit codes:
  0  sources agree
  1  discrepancies found
  3  --a or --b missing
  4  invalid layout config
  5  input file unreadable
  6  export failed")]
    Compare {
        /// Source A file (.xlsx, .xls, .xlsm, .xlsb, .ods, .csv, .tsv)
        #[arg(long)]
        a: Option<PathBuf>,

        /// Source B file
        #[arg(long)]
        b: Option<PathBuf>,

        /// Layout TOML (columns, filter, labels); defaults to the built-in layout
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write discrepancies to a file (.xlsx, .csv or .json)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the full result as JSON to stdout instead of the table
        #[arg(long)]
        json: bool,

        /// Suppress the table and the summary line
        #[arg(long, short)]
        quiet: bool,
    },

    /// Check a layout config without running
    #[command(after_help = "\
Examples:
  shipmatch validate layout.toml")]
    Validate {
        /// Path to the layout TOML
        config: PathBuf,
    },

    /// Print the built-in layout as TOML (a starting point for --config)
    #[command(after_help = "\
Examples:
  shipmatch layout > layout.toml")]
    Layout,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compare { a, b, config, output, json, quiet } => {
            compare::cmd_compare(compare::CompareArgs { a, b, config, output, json, quiet })
        }
        Commands::Validate { config } => compare::cmd_validate(config),
        Commands::Layout => compare::cmd_layout(),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
