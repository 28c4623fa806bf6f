//! Wake-category extraction from the FAA aircraft type designator order
//!
//! This crate provides:
//! - Appendix A table detection in layout-preserving text
//! - Column tokenization into ICAO WTC, RECAT 1.5/2.0 and CWT fields
//! - A `pdftotext` driven pipeline producing a JSON report

pub mod detector;
pub mod record;
pub mod report;
pub mod row;
pub mod table;
pub mod text_source;

pub use detector::{inspect_pdf, PdfSummary, PreflightConfig};
pub use record::{AircraftRecord, IcaoWtc, ResultSet};
pub use report::{ExtractionReport, SourceInfo, DEFAULT_TITLE};
pub use table::{extract_appendix_a, AppendixExtractor, TableConfig, TableState};
pub use text_source::{read_lines, Pdftotext, TextSource};

use std::path::{Path, PathBuf};

/// Options for a full PDF to report run
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Where the intermediate layout text is written
    pub text_path: PathBuf,
    /// Keep the intermediate text file after parsing
    pub keep_text: bool,
    /// Document title recorded in the provenance block
    pub title: String,
    /// Run the lopdf preflight before conversion
    pub preflight: bool,
    pub table: TableConfig,
}

impl ExtractOptions {
    pub fn new(text_path: impl Into<PathBuf>) -> Self {
        Self {
            text_path: text_path.into(),
            keep_text: false,
            title: DEFAULT_TITLE.to_string(),
            preflight: true,
            table: TableConfig::default(),
        }
    }
}

/// Convert a PDF with `pdftotext` and extract its Appendix A table
pub fn process_pdf<P: AsRef<Path>>(
    pdf_path: P,
    options: &ExtractOptions,
) -> Result<ExtractionReport, ExtractError> {
    process_pdf_with(pdf_path, &Pdftotext::default(), options)
}

/// Same as [`process_pdf`] with a caller-supplied text source
pub fn process_pdf_with<P: AsRef<Path>, S: TextSource + ?Sized>(
    pdf_path: P,
    source: &S,
    options: &ExtractOptions,
) -> Result<ExtractionReport, ExtractError> {
    let pdf_path = pdf_path.as_ref();
    if !pdf_path.is_file() {
        return Err(ExtractError::InputNotFound(pdf_path.to_path_buf()));
    }

    let page_count = if options.preflight {
        preflight(pdf_path)
    } else {
        None
    };

    source.convert(pdf_path, &options.text_path)?;

    let parsed = read_lines(&options.text_path)
        .map(|lines| table::extract_appendix_a_with_config(lines, options.table.clone()));

    if !options.keep_text {
        if let Err(e) = std::fs::remove_file(&options.text_path) {
            log::debug!(
                "Could not remove {}: {}",
                options.text_path.display(),
                e
            );
        }
    }

    let aircraft = parsed?;
    if aircraft.is_empty() {
        log::warn!("No Appendix A records found in {}", pdf_path.display());
    }

    let source_info = SourceInfo {
        title: options.title.clone(),
        pdf: pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| pdf_path.display().to_string()),
        extracted_with: source.describe(),
        page_count,
    };

    Ok(ExtractionReport::new(source_info, aircraft))
}

/// Best-effort lopdf scan; `pdftotext` remains the authority on readability
fn preflight(pdf_path: &Path) -> Option<u32> {
    match inspect_pdf(pdf_path) {
        Ok(summary) => {
            log::debug!(
                "Preflight: {} pages, {}/{} sampled pages with text, title {:?}",
                summary.page_count,
                summary.pages_with_text,
                summary.pages_sampled,
                summary.title
            );
            if !summary.has_text_layer() {
                log::warn!(
                    "{} appears to have no text layer; extraction will likely be empty",
                    pdf_path.display()
                );
            }
            Some(summary.page_count)
        }
        Err(e) => {
            log::warn!("Preflight of {} failed: {}", pdf_path.display(), e);
            None
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("PDF not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("{tool} not found. Install poppler-utils.")]
    ToolMissing { tool: String },
    #[error("{tool} failed (exit code {}): {stderr}", exit_code(.code))]
    ConversionFailed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("PDF parsing error: {0}")]
    Pdf(String),
}

fn exit_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

impl From<lopdf::Error> for ExtractError {
    fn from(e: lopdf::Error) -> Self {
        ExtractError::Pdf(e.to_string())
    }
}
