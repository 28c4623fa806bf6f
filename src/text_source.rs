//! Conversion of the source PDF into layout-preserving text
//!
//! The parser never reads PDF bytes itself. A [`TextSource`] writes a plain
//! text rendering of the document to disk, and [`read_lines`] loads it back.

use crate::ExtractError;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

/// A backend that renders a PDF as layout-preserving text
pub trait TextSource {
    /// Write the text rendering of `pdf` to `txt`
    fn convert(&self, pdf: &Path, txt: &Path) -> Result<(), ExtractError>;

    /// Short description of the extraction method, recorded as provenance
    fn describe(&self) -> String;
}

/// Poppler's `pdftotext` run in `-layout` mode
#[derive(Debug, Clone)]
pub struct Pdftotext {
    program: String,
}

impl Default for Pdftotext {
    fn default() -> Self {
        Self {
            program: "pdftotext".to_string(),
        }
    }
}

impl Pdftotext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific executable name or path
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl TextSource for Pdftotext {
    fn convert(&self, pdf: &Path, txt: &Path) -> Result<(), ExtractError> {
        log::debug!(
            "Running {} -layout {} {}",
            self.program,
            pdf.display(),
            txt.display()
        );

        let output = Command::new(&self.program)
            .arg("-layout")
            .arg(pdf)
            .arg(txt)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ExtractError::ToolMissing {
                    tool: self.program.clone(),
                },
                _ => ExtractError::Io(e),
            })?;

        if !output.status.success() {
            return Err(ExtractError::ConversionFailed {
                tool: self.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }

    fn describe(&self) -> String {
        format!("{} -layout", self.program)
    }
}

/// Read a text file as lines, replacing invalid UTF-8 instead of failing
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ExtractError> {
    let bytes = std::fs::read(path.as_ref())?;
    let text = String::from_utf8_lossy(&bytes);

    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    log::debug!(
        "Read {} lines ({} bytes) from {}",
        lines.len(),
        bytes.len(),
        path.as_ref().display()
    );

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool() {
        let source = Pdftotext::with_program("pdftotext-does-not-exist-7360");
        let dir = tempfile::tempdir().unwrap();
        let err = source
            .convert(&dir.path().join("in.pdf"), &dir.path().join("out.txt"))
            .unwrap_err();
        match err {
            ExtractError::ToolMissing { tool } => assert_eq!(tool, "pdftotext-does-not-exist-7360"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_failure() {
        let source = Pdftotext::with_program("false");
        let dir = tempfile::tempdir().unwrap();
        let err = source
            .convert(&dir.path().join("in.pdf"), &dir.path().join("out.txt"))
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::ConversionFailed { code: Some(1), .. }
        ));
    }

    #[test]
    fn test_describe() {
        assert_eq!(Pdftotext::new().describe(), "pdftotext -layout");
        assert_eq!(Pdftotext::with_program("/opt/bin/pdftotext").program(), "/opt/bin/pdftotext");
    }

    #[test]
    fn test_read_lines_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, b"A320  Airplane\r\nbad \xff byte\n\x0cpage two\n").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "A320  Airplane");
        assert!(lines[1].contains('\u{FFFD}'));
        assert_eq!(lines[2], "\x0cpage two");
    }

    #[test]
    fn test_read_lines_missing_file() {
        let result = read_lines("/nonexistent/file.txt");
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }
}
