//! Output artifact: provenance, record count and the designator table

use crate::record::ResultSet;
use crate::ExtractError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const DEFAULT_TITLE: &str = "FAA Order JO 7360.1E Aircraft Type Designators";

/// Where the records came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub title: String,
    /// File name of the source PDF (no directory)
    pub pdf: String,
    pub extracted_with: String,
    /// Page count from preflight, `null` when preflight was skipped or failed
    pub page_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub source: SourceInfo,
    pub count: usize,
    pub aircraft: ResultSet,
}

impl ExtractionReport {
    pub fn new(source: SourceInfo, aircraft: ResultSet) -> Self {
        Self {
            source,
            count: aircraft.len(),
            aircraft,
        }
    }

    pub fn to_json(&self) -> Result<String, ExtractError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ExtractError> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        log::info!(
            "Wrote {} records to {}",
            self.count,
            path.as_ref().display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{IcaoWtc, ParsedRow, WakeFields};

    fn sample_report() -> ExtractionReport {
        let mut set = ResultSet::new();
        set.apply(ParsedRow {
            designator_raw: "B747*".into(),
            wake: Some(WakeFields {
                icao_wtc: IcaoWtc::Heavy,
                recat_1_5: Some("B".into()),
                recat_2_0_apdx_a: Some("B".into()),
                recat_2_0_apdx_b: None,
                cwt: Some("B".into()),
            }),
        });
        set.apply(ParsedRow {
            designator_raw: "ZZZZ".into(),
            wake: None,
        });

        ExtractionReport::new(
            SourceInfo {
                title: DEFAULT_TITLE.to_string(),
                pdf: "JO_7360.1E.pdf".to_string(),
                extracted_with: "pdftotext -layout".to_string(),
                page_count: None,
            },
            set,
        )
    }

    #[test]
    fn test_report_json_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&sample_report().to_json().unwrap()).unwrap();

        assert_eq!(json["count"], 2);
        assert_eq!(json["source"]["pdf"], "JO_7360.1E.pdf");
        assert!(json["source"]["page_count"].is_null());

        let b747 = &json["aircraft"]["B747"];
        assert_eq!(b747["designator_raw"], "B747*");
        assert_eq!(b747["icao_wtc"], "Heavy");
        assert!(b747["recat_2_0_apdx_b"].is_null());

        let zzzz = json["aircraft"]["ZZZZ"].as_object().unwrap();
        assert_eq!(zzzz.len(), 6);
        assert!(zzzz["icao_wtc"].is_null());
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recat.json");
        let report = sample_report();
        report.write_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: ExtractionReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);
    }
}
