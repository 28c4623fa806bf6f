//! Row recognition and column tokenization
//!
//! The table is laid out by `pdftotext -layout` as monospaced columns. Two or
//! more whitespace characters separate columns; a single space is part of a
//! value (class and engine descriptors contain spaces).

use crate::record::{IcaoWtc, ParsedRow, WakeFields};
use once_cell::sync::Lazy;
use regex::Regex;

/// Designator in the leftmost column, followed by a column gap
static DESIGNATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{0,4}([A-Z0-9]{2,5}\*?)\s{2,}").unwrap());

static COLUMN_GAP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Number of columns in a complete Appendix A row
pub const FULL_ROW_COLUMNS: usize = 8;

// Column positions in a complete row:
// designator, class, engine/FAA weight, ICAO WTC, RECAT 1.5,
// RECAT 2.0 Apdx A, RECAT 2.0 Apdx B, CWT
const COL_WTC: usize = 3;
const COL_RECAT_1_5: usize = 4;
const COL_RECAT_2_0_A: usize = 5;
const COL_RECAT_2_0_B: usize = 6;
const COL_CWT: usize = 7;

/// Return the raw designator token if the line looks like a data row
pub fn recognize_row(line: &str) -> Option<&str> {
    DESIGNATOR_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Split a line into column tokens
pub fn tokenize(line: &str) -> Vec<&str> {
    COLUMN_GAP_RE
        .split(line.trim())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Map a full row's tokens to wake fields.
///
/// Returns `None` unless there are at least eight columns and the WTC column
/// holds a known category; anything else is a partial or shifted row.
pub fn wake_fields(tokens: &[&str]) -> Option<WakeFields> {
    if tokens.len() < FULL_ROW_COLUMNS {
        return None;
    }

    let icao_wtc: IcaoWtc = tokens[COL_WTC].parse().ok()?;

    Some(WakeFields {
        icao_wtc,
        recat_1_5: non_empty(tokens[COL_RECAT_1_5]),
        recat_2_0_apdx_a: non_empty(tokens[COL_RECAT_2_0_A]),
        recat_2_0_apdx_b: non_empty(tokens[COL_RECAT_2_0_B]),
        cwt: non_empty(tokens[COL_CWT]),
    })
}

/// Recognize and tokenize a line in one step
pub fn parse_row(line: &str) -> Option<ParsedRow> {
    let designator = recognize_row(line)?;
    let tokens = tokenize(line);

    Some(ParsedRow {
        designator_raw: designator.to_string(),
        wake: wake_fields(&tokens),
    })
}

fn non_empty(token: &str) -> Option<String> {
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
