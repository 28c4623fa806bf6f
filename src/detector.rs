//! PDF preflight before text conversion
//!
//! Samples a few content streams for text-show operators (Tj/TJ) to tell
//! whether the document has a text layer at all. A scanned copy of the order
//! converts to empty text and would silently yield zero records, so the
//! pipeline warns about it up front. Also reads page count and metadata title
//! for the provenance block.

use crate::ExtractError;
use lopdf::{Document, Object, ObjectId};
use std::path::Path;

/// Summary of a PDF gathered before conversion
#[derive(Debug, Clone)]
pub struct PdfSummary {
    /// Number of pages in the document
    pub page_count: u32,
    /// Number of pages sampled for text operators
    pub pages_sampled: u32,
    /// Sampled pages with enough text operators
    pub pages_with_text: u32,
    /// Title from the Info dictionary (if present)
    pub title: Option<String>,
}

impl PdfSummary {
    /// True when at least one sampled page shows text
    pub fn has_text_layer(&self) -> bool {
        self.pages_with_text > 0
    }
}

/// Configuration for the preflight scan
#[derive(Debug, Clone)]
pub struct PreflightConfig {
    /// Maximum number of pages to sample (default: 5)
    pub max_pages_to_sample: u32,
    /// Minimum text operator count for a page to count as text
    pub min_text_ops_per_page: u32,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            max_pages_to_sample: 5,
            min_text_ops_per_page: 3,
        }
    }
}

/// Inspect a PDF file
pub fn inspect_pdf<P: AsRef<Path>>(path: P) -> Result<PdfSummary, ExtractError> {
    inspect_pdf_with_config(path, &PreflightConfig::default())
}

pub fn inspect_pdf_with_config<P: AsRef<Path>>(
    path: P,
    config: &PreflightConfig,
) -> Result<PdfSummary, ExtractError> {
    let doc = Document::load(path)?;
    Ok(summarize(&doc, config))
}

/// Inspect a PDF held in memory
pub fn inspect_pdf_mem(buffer: &[u8]) -> Result<PdfSummary, ExtractError> {
    let doc = Document::load_mem(buffer)?;
    Ok(summarize(&doc, &PreflightConfig::default()))
}

fn summarize(doc: &Document, config: &PreflightConfig) -> PdfSummary {
    let pages = doc.get_pages();
    let page_count = pages.len() as u32;

    let sample = sample_pages(page_count, config.max_pages_to_sample);

    let mut pages_with_text = 0u32;
    for page_num in &sample {
        if let Some(&page_id) = pages.get(page_num) {
            if count_page_text_ops(doc, page_id) >= config.min_text_ops_per_page {
                pages_with_text += 1;
            }
        }
    }

    PdfSummary {
        page_count,
        pages_sampled: sample.len() as u32,
        pages_with_text,
        title: get_document_title(doc),
    }
}

/// First page, last page, and evenly spaced pages in between (1-indexed)
fn sample_pages(total_pages: u32, max_samples: u32) -> Vec<u32> {
    let to_sample = max_samples.min(total_pages);
    if to_sample >= total_pages {
        return (1..=total_pages).collect();
    }

    let mut indices = Vec::with_capacity(to_sample as usize);
    indices.push(1);
    if to_sample > 1 {
        indices.push(total_pages);
    }

    let remaining = to_sample.saturating_sub(2);
    if remaining > 0 && total_pages > 2 {
        let step = (total_pages - 2) / (remaining + 1);
        for i in 1..=remaining {
            let idx = 1 + step * i;
            if idx > 1 && idx < total_pages && !indices.contains(&idx) {
                indices.push(idx);
            }
        }
    }

    indices.sort_unstable();
    indices.dedup();
    indices
}

fn count_page_text_ops(doc: &Document, page_id: ObjectId) -> u32 {
    let mut text_ops = 0u32;

    for content_id in doc.get_page_contents(page_id) {
        if let Ok(Object::Stream(stream)) = doc.get_object(content_id) {
            let content = match stream.decompressed_content() {
                Ok(data) => data,
                Err(_) => stream.content.clone(),
            };
            text_ops += scan_text_operators(&content);
        }
    }

    text_ops
}

/// Count `Tj` / `TJ` operators in a content stream
fn scan_text_operators(content: &[u8]) -> u32 {
    content
        .windows(3)
        .filter(|w| w[0] == b'T' && (w[1] == b'j' || w[1] == b'J') && w[2].is_ascii_whitespace())
        .count() as u32
        + u32::from(content.ends_with(b"Tj") || content.ends_with(b"TJ"))
}

/// Get document title from Info dictionary
fn get_document_title(doc: &Document) -> Option<String> {
    let info_ref = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
    let info = doc.get_dictionary(info_ref).ok()?;

    match info.get(b"Title").ok()? {
        Object::String(bytes, _) => {
            // UTF-16BE with BOM
            let title = if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks_exact(2)
                    .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                    .collect();
                String::from_utf16_lossy(&utf16)
            } else {
                String::from_utf8_lossy(bytes).to_string()
            };
            let title = title.trim().to_string();
            (!title.is_empty()).then_some(title)
        }
        _ => None,
    }
}
