//! Aircraft wake records and the keyed result set
//!
//! One [`AircraftRecord`] exists per ICAO type designator. Records are
//! accumulated into a [`ResultSet`] while the Appendix A table is scanned.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Trailing marker some designators carry in the source table (e.g. `B747*`)
pub const DESIGNATOR_MARKER: char = '*';

/// ICAO wake turbulence category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IcaoWtc {
    Light,
    Medium,
    Heavy,
    Super,
}

impl IcaoWtc {
    pub fn as_str(&self) -> &'static str {
        match self {
            IcaoWtc::Light => "Light",
            IcaoWtc::Medium => "Medium",
            IcaoWtc::Heavy => "Heavy",
            IcaoWtc::Super => "Super",
        }
    }
}

impl fmt::Display for IcaoWtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a column value is not one of the four ICAO categories
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an ICAO wake turbulence category: {0:?}")]
pub struct UnknownWtc(pub String);

impl FromStr for IcaoWtc {
    type Err = UnknownWtc;

    /// Matching is exact: the order prints categories capitalized, and any
    /// other spelling signals a shifted column rather than a real value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Light" => Ok(IcaoWtc::Light),
            "Medium" => Ok(IcaoWtc::Medium),
            "Heavy" => Ok(IcaoWtc::Heavy),
            "Super" => Ok(IcaoWtc::Super),
            other => Err(UnknownWtc(other.to_string())),
        }
    }
}

/// Wake-category columns of one well-formed table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WakeFields {
    pub icao_wtc: IcaoWtc,
    pub recat_1_5: Option<String>,
    pub recat_2_0_apdx_a: Option<String>,
    pub recat_2_0_apdx_b: Option<String>,
    pub cwt: Option<String>,
}

/// Wake categories for a single type designator
///
/// Absent values serialize as `null` so every record carries the same keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftRecord {
    /// Designator token exactly as printed, marker included
    pub designator_raw: String,
    pub icao_wtc: Option<IcaoWtc>,
    pub recat_1_5: Option<String>,
    pub recat_2_0_apdx_a: Option<String>,
    pub recat_2_0_apdx_b: Option<String>,
    pub cwt: Option<String>,
}

impl AircraftRecord {
    /// Create a record with no wake fields captured yet
    pub fn new(designator_raw: impl Into<String>) -> Self {
        Self {
            designator_raw: designator_raw.into(),
            ..Self::default()
        }
    }

    /// Overwrite every wake field with the values from a well-formed row
    pub fn apply(&mut self, wake: WakeFields) {
        self.icao_wtc = Some(wake.icao_wtc);
        self.recat_1_5 = wake.recat_1_5;
        self.recat_2_0_apdx_a = wake.recat_2_0_apdx_a;
        self.recat_2_0_apdx_b = wake.recat_2_0_apdx_b;
        self.cwt = wake.cwt;
    }

    /// True when no wake field has been captured
    pub fn is_bare(&self) -> bool {
        self.icao_wtc.is_none()
            && self.recat_1_5.is_none()
            && self.recat_2_0_apdx_a.is_none()
            && self.recat_2_0_apdx_b.is_none()
            && self.cwt.is_none()
    }

    /// Lookup key for this record
    pub fn designator(&self) -> &str {
        designator_key(&self.designator_raw)
    }
}

/// Strip a single trailing marker from a raw designator token
pub fn designator_key(raw: &str) -> &str {
    raw.strip_suffix(DESIGNATOR_MARKER).unwrap_or(raw)
}

/// A recognized data row: the designator plus wake fields when the row
/// matched the full column layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub designator_raw: String,
    pub wake: Option<WakeFields>,
}

/// Designator-keyed aircraft records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: BTreeMap<String, AircraftRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one row into the set.
    ///
    /// The first row seen for a designator creates its record. A row with
    /// wake fields overwrites all of them; a row without leaves the record
    /// as it was.
    pub fn apply(&mut self, row: ParsedRow) {
        let key = designator_key(&row.designator_raw).to_string();
        let record = self
            .records
            .entry(key)
            .or_insert_with(|| AircraftRecord::new(row.designator_raw));

        if let Some(wake) = row.wake {
            record.apply(wake);
        }
    }

    pub fn get(&self, designator: &str) -> Option<&AircraftRecord> {
        self.records.get(designator)
    }

    pub fn contains(&self, designator: &str) -> bool {
        self.records.contains_key(designator)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in designator order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AircraftRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> BTreeMap<String, AircraftRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wake(wtc: IcaoWtc, cwt: &str) -> WakeFields {
        WakeFields {
            icao_wtc: wtc,
            recat_1_5: Some("B".into()),
            recat_2_0_apdx_a: Some("C".into()),
            recat_2_0_apdx_b: None,
            cwt: Some(cwt.into()),
        }
    }

    #[test]
    fn test_wtc_parse_is_exact() {
        assert_eq!("Heavy".parse::<IcaoWtc>(), Ok(IcaoWtc::Heavy));
        assert_eq!("Super".parse::<IcaoWtc>(), Ok(IcaoWtc::Super));
        assert!("heavy".parse::<IcaoWtc>().is_err());
        assert!("H".parse::<IcaoWtc>().is_err());
        assert!("".parse::<IcaoWtc>().is_err());
    }

    #[test]
    fn test_designator_key_strips_one_marker() {
        assert_eq!(designator_key("B747*"), "B747");
        assert_eq!(designator_key("A320"), "A320");
        assert_eq!(designator_key("C1**"), "C1*");
    }

    #[test]
    fn test_bare_row_does_not_erase() {
        let mut set = ResultSet::new();
        set.apply(ParsedRow {
            designator_raw: "A320".into(),
            wake: Some(wake(IcaoWtc::Medium, "F")),
        });
        set.apply(ParsedRow {
            designator_raw: "A320".into(),
            wake: None,
        });

        let rec = set.get("A320").unwrap();
        assert_eq!(rec.icao_wtc, Some(IcaoWtc::Medium));
        assert_eq!(rec.cwt.as_deref(), Some("F"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_later_full_row_wins() {
        let mut set = ResultSet::new();
        set.apply(ParsedRow {
            designator_raw: "B744".into(),
            wake: None,
        });
        assert!(set.get("B744").unwrap().is_bare());

        set.apply(ParsedRow {
            designator_raw: "B744".into(),
            wake: Some(wake(IcaoWtc::Heavy, "B")),
        });
        set.apply(ParsedRow {
            designator_raw: "B744".into(),
            wake: Some(wake(IcaoWtc::Super, "A")),
        });

        let rec = set.get("B744").unwrap();
        assert_eq!(rec.icao_wtc, Some(IcaoWtc::Super));
        assert_eq!(rec.cwt.as_deref(), Some("A"));
        assert_eq!(rec.recat_2_0_apdx_b, None);
    }

    #[test]
    fn test_first_raw_token_is_kept() {
        let mut set = ResultSet::new();
        set.apply(ParsedRow {
            designator_raw: "B747*".into(),
            wake: None,
        });
        set.apply(ParsedRow {
            designator_raw: "B747".into(),
            wake: Some(wake(IcaoWtc::Heavy, "B")),
        });

        let rec = set.get("B747").unwrap();
        assert_eq!(rec.designator_raw, "B747*");
        assert_eq!(rec.designator(), "B747");
        assert!(!set.contains("B747*"));
    }

    #[test]
    fn test_record_serializes_nulls() {
        let rec = AircraftRecord::new("ZZZZ");
        let json = serde_json::to_value(&rec).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        assert!(obj["icao_wtc"].is_null());
        assert!(obj["cwt"].is_null());
        assert_eq!(obj["designator_raw"], "ZZZZ");
    }
}
