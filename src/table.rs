//! Appendix A table boundary detection and extraction
//!
//! Scans layout text line by line. The table starts at the Appendix A title
//! only if the "RECAT Wake Category" column header follows within a short
//! window; a bare title mention (table of contents, running header) is not
//! enough. The table ends at the Appendix B title, which has a different
//! schema.

use crate::record::ResultSet;
use crate::row::parse_row;
use once_cell::sync::Lazy;
use regex::Regex;

static APPENDIX_A_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*Appendix A\. Aircraft Type Designator(s)?\s*$").unwrap()
});

static APPENDIX_B_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*Appendix B\.").unwrap());

static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)RECAT\s+Wake\s+Category").unwrap());

/// Position of the scanner relative to the target table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    /// Looking for the Appendix A title
    SearchingTitle,
    /// Title seen; the column header must show up within `remaining` lines
    AwaitingHeader { remaining: usize },
    /// Inside the data table
    InTable,
    /// Appendix B reached; nothing further is read
    Done,
}

/// Configuration for table detection
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Lines after the Appendix A title in which the column header must appear
    pub header_window: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { header_window: 25 }
    }
}

/// Incremental Appendix A extractor
///
/// Feed lines in document order with [`feed`](Self::feed), then call
/// [`finish`](Self::finish). Never fails: lines that don't fit the table
/// layout are skipped.
#[derive(Debug)]
pub struct AppendixExtractor {
    config: TableConfig,
    state: TableState,
    records: ResultSet,
    rows_seen: usize,
}

impl Default for AppendixExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl AppendixExtractor {
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    pub fn with_config(config: TableConfig) -> Self {
        Self {
            config,
            state: TableState::SearchingTitle,
            records: ResultSet::new(),
            rows_seen: 0,
        }
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    /// Process one line. Returns `false` once the table has ended and no
    /// further input is wanted.
    pub fn feed(&mut self, line: &str) -> bool {
        let line = line.trim_end_matches(['\n', '\r']);

        self.state = match self.state {
            TableState::SearchingTitle => self.search_title(line),
            TableState::AwaitingHeader { remaining } => self.await_header(line, remaining),
            TableState::InTable => self.table_line(line),
            TableState::Done => TableState::Done,
        };

        self.state != TableState::Done
    }

    /// Number of lines recognized as data rows
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    pub fn finish(self) -> ResultSet {
        log::info!(
            "Appendix A: {} rows, {} designators (state {:?})",
            self.rows_seen,
            self.records.len(),
            self.state
        );
        self.records
    }

    fn arm_header_window(&self) -> TableState {
        if self.config.header_window == 0 {
            return TableState::SearchingTitle;
        }
        TableState::AwaitingHeader {
            remaining: self.config.header_window,
        }
    }

    fn search_title(&self, line: &str) -> TableState {
        if APPENDIX_A_TITLE_RE.is_match(line) {
            log::debug!("Appendix A title found: {:?}", line.trim());
            self.arm_header_window()
        } else {
            TableState::SearchingTitle
        }
    }

    fn await_header(&self, line: &str, remaining: usize) -> TableState {
        if APPENDIX_A_TITLE_RE.is_match(line) {
            return self.arm_header_window();
        }
        if HEADER_RE.is_match(line) {
            log::debug!("Appendix A column header found, table starts");
            return TableState::InTable;
        }

        match remaining.saturating_sub(1) {
            0 => {
                log::debug!("No column header after Appendix A title, resuming search");
                TableState::SearchingTitle
            }
            left => TableState::AwaitingHeader { remaining: left },
        }
    }

    fn table_line(&mut self, line: &str) -> TableState {
        if APPENDIX_B_TITLE_RE.is_match(line) {
            log::debug!("Appendix B title found, table ends");
            return TableState::Done;
        }

        if let Some(row) = parse_row(line) {
            self.rows_seen += 1;
            if row.wake.is_none() {
                log::trace!("Partial row for {}: {:?}", row.designator_raw, line);
            }
            self.records.apply(row);
        }

        TableState::InTable
    }
}

/// Extract the Appendix A table from a sequence of layout text lines
pub fn extract_appendix_a<I, S>(lines: I) -> ResultSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extract_appendix_a_with_config(lines, TableConfig::default())
}

/// Extract the Appendix A table with custom detection settings
pub fn extract_appendix_a_with_config<I, S>(lines: I, config: TableConfig) -> ResultSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut extractor = AppendixExtractor::with_config(config);
    for line in lines {
        if !extractor.feed(line.as_ref()) {
            break;
        }
    }
    extractor.finish()
}
