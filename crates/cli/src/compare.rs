//! `shipmatch compare` / `validate` / `layout`.

use std::path::{Path, PathBuf};

use shipmatch_io::{ExtractError, OutputFormat};
use shipmatch_recon::engine::require_inputs;
use shipmatch_recon::{RawRow, ReconConfig, ReconInput, ReconSession, RunStatus, Source};

use crate::exit_codes::{
    export_exit_code, extract_exit_code, recon_exit_code, EXIT_DISCREPANCIES, EXIT_ERROR,
    EXIT_INVALID_CONFIG, EXIT_USAGE,
};
use crate::{table, CliError};

pub struct CompareArgs {
    pub a: Option<PathBuf>,
    pub b: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

fn cli_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

/// Load the layout from `--config`, or the built-in one.
fn load_config(path: Option<&Path>) -> Result<ReconConfig, CliError> {
    let Some(path) = path else {
        return Ok(ReconConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| {
        cli_err(EXIT_INVALID_CONFIG, format!("cannot read config {}: {e}", path.display()))
    })?;
    ReconConfig::from_toml(&text).map_err(|e| {
        cli_err(recon_exit_code(&e), format!("{}: {e}", path.display()))
            .with_hint("run `shipmatch layout` for a complete example")
    })
}

pub fn cmd_compare(args: CompareArgs) -> Result<(), CliError> {
    // Missing inputs are reported before anything is opened
    let (path_a, path_b) = require_inputs(args.a, args.b).map_err(|e| {
        let flag = match &e {
            shipmatch_recon::ReconError::MissingInput(Source::A) => "--a",
            _ => "--b",
        };
        cli_err(recon_exit_code(&e), e.to_string()).with_hint(format!("pass {flag} <FILE>"))
    })?;

    let config = load_config(args.config.as_deref())?;

    if let Some(out) = &args.output {
        if OutputFormat::from_path(out).is_none() {
            return Err(cli_err(
                EXIT_USAGE,
                format!("unsupported output format: {}", out.display()),
            )
            .with_hint("use a .xlsx, .csv or .json file name"));
        }
    }

    let (rows_a, rows_b) = read_sources(&path_a, &path_b)?;
    let input = ReconInput { source_a: Some(rows_a), source_b: Some(rows_b) };

    let session = ReconSession::new();
    session
        .run(&config, &input)
        .map_err(|e| cli_err(recon_exit_code(&e), e.to_string()))?;

    let (result, discrepancies) = match (session.status(), session.latest()) {
        (RunStatus::Completed { discrepancies, .. }, Some(result)) => (result, discrepancies),
        _ => return Err(cli_err(EXIT_ERROR, "comparison did not complete")),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&*result)
            .map_err(|e| cli_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json}");
    } else if !args.quiet && discrepancies > 0 {
        print!("{}", table::render(&result.discrepancies, &config.labels));
    }

    if let Some(out) = &args.output {
        shipmatch_io::export(&result, &config.labels, out)
            .map_err(|e| cli_err(export_exit_code(&e), e.to_string()))?;
        if !args.quiet {
            eprintln!("wrote {}", out.display());
        }
    }

    if !args.quiet {
        let s = &result.summary;
        eprintln!(
            "comparison produced {} discrepancies ({} keys compared, {} only in {}, {} only in {})",
            discrepancies, s.keys_compared, s.only_a, result.meta.source_a, s.only_b, result.meta.source_b,
        );
    }

    if discrepancies > 0 {
        // Summary already printed; exit code alone signals "differs"
        return Err(cli_err(EXIT_DISCREPANCIES, ""));
    }
    Ok(())
}

/// Extract both files concurrently. Errors name the source they came from.
fn read_sources(path_a: &Path, path_b: &Path) -> Result<(Vec<RawRow>, Vec<RawRow>), CliError> {
    let (joined_a, joined_b) = std::thread::scope(|s| {
        let a = s.spawn(|| shipmatch_io::read_rows(path_a));
        let b = s.spawn(|| shipmatch_io::read_rows(path_b));
        (a.join(), b.join())
    });

    let finish = |source: Source, joined: std::thread::Result<Result<Vec<RawRow>, ExtractError>>| {
        match joined {
            Ok(Ok(rows)) => {
                log::debug!("{source}: {} row(s) extracted", rows.len());
                Ok(rows)
            }
            Ok(Err(e)) => {
                let err = cli_err(extract_exit_code(&e), format!("{source}: {e}"));
                Err(match e {
                    ExtractError::UnsupportedFormat(_) => err
                        .with_hint("inputs must be .xlsx/.xls/.xlsm/.xlsb/.ods or .csv/.tsv/.txt"),
                    _ => err,
                })
            }
            Err(_) => Err(cli_err(EXIT_ERROR, format!("{source}: reader thread panicked"))),
        }
    };

    Ok((finish(Source::A, joined_a)?, finish(Source::B, joined_b)?))
}

pub fn cmd_validate(config: PathBuf) -> Result<(), CliError> {
    let parsed = load_config(Some(&config))?;
    println!(
        "ok: {} (A: {}, key {} qty {}; B: {}, key {} qty {})",
        parsed.name,
        parsed.sources.a.label,
        parsed.sources.a.columns.key,
        parsed.sources.a.columns.quantity,
        parsed.sources.b.label,
        parsed.sources.b.columns.key,
        parsed.sources.b.columns.quantity,
    );
    Ok(())
}

pub fn cmd_layout() -> Result<(), CliError> {
    let text = ReconConfig::default()
        .to_toml()
        .map_err(|e| cli_err(EXIT_ERROR, e.to_string()))?;
    print!("{text}");
    Ok(())
}
