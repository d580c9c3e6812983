//! CLI Exit Code Registry
//!
//! Single source of truth for `shipmatch` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                       |
//! |------|-----------------------------------------------|
//! | 0    | Success; sources agree (0 discrepancies)      |
//! | 1    | Discrepancies found, or unspecified failure   |
//! | 2    | CLI usage error                               |
//! | 3    | Source A or B input not supplied             |
//! | 4    | Layout config unreadable or invalid           |
//! | 5    | Input file unreadable or unsupported          |
//! | 6    | Export file could not be written              |

use shipmatch_io::{ExportError, ExtractError};
use shipmatch_recon::ReconError;

/// Success - command completed, nothing to report.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Comparison found discrepancies. Like `diff(1)`, exit 1 means "inputs differ."
pub const EXIT_DISCREPANCIES: u8 = 1;

/// Usage error - bad arguments, unsupported output extension.
pub const EXIT_USAGE: u8 = 2;

/// `--a` or `--b` was not given. Checked before any file is opened.
pub const EXIT_MISSING_INPUT: u8 = 3;

/// Layout TOML could not be read, parsed or validated.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// An input file could not be opened or parsed.
pub const EXIT_INPUT_READ: u8 = 5;

/// The `--output` artifact could not be written.
pub const EXIT_EXPORT_WRITE: u8 = 6;

pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::MissingInput(_) => EXIT_MISSING_INPUT,
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        ReconError::Worker(_) => EXIT_ERROR,
    }
}

pub fn extract_exit_code(_err: &ExtractError) -> u8 {
    EXIT_INPUT_READ
}

pub fn export_exit_code(err: &ExportError) -> u8 {
    match err {
        ExportError::UnsupportedFormat(_) => EXIT_USAGE,
        ExportError::Write(_) => EXIT_EXPORT_WRITE,
    }
}
