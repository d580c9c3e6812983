//! Plain-text discrepancy table for stdout.

use shipmatch_recon::cell::format_number;
use shipmatch_recon::config::LabelConfig;
use shipmatch_recon::DiscrepancyRecord;
use unicode_width::UnicodeWidthStr;

/// Display width of a string, accounting for CJK double-width.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Right-pad to `width` display columns. Never truncates: order numbers must
/// be printed in full.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let sw = display_width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(sw)))
}

pub(crate) fn pad_left(s: &str, width: usize) -> String {
    let sw = display_width(s);
    format!("{}{}", " ".repeat(width.saturating_sub(sw)), s)
}

/// Render records as an aligned four-column table, header first.
/// Identifier column is left-aligned, quantities right-aligned.
pub(crate) fn render(records: &[DiscrepancyRecord], labels: &LabelConfig) -> String {
    let headers = labels.headers();
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|r| {
            [
                r.key.to_string(),
                format_number(r.quantity_a),
                format_number(r.quantity_b),
                format_number(r.difference),
            ]
        })
        .collect();

    let mut widths = headers.map(display_width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(display_width(cell));
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.map(String::from), &widths);
    push_line(&mut out, widths.map(|w| "-".repeat(w)), &widths);
    for row in rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: [String; 4], widths: &[usize; 4]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        if i == 0 {
            line.push_str(&pad_right(cell, widths[i]));
        } else {
            line.push_str(&pad_left(cell, widths[i]));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
