use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::VariantError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of the variant table: daily specimen count for a single variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub date: NaiveDate,
    pub variant_name: String,
    pub specimens: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothedRecord {
    pub date: NaiveDate,
    pub variant_name: String,
    pub specimens: f64,
    pub rolling_avg: f64,
}

impl SmoothedRecord {
    pub fn from_record(rec: &VariantRecord, rolling_avg: f64) -> Self {
        SmoothedRecord {
            date: rec.date,
            variant_name: rec.variant_name.clone(),
            specimens: rec.specimens,
            rolling_avg,
        }
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, VariantError> {
        if start > end {
            return Err(VariantError::InvalidDateRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, VariantError> {
        DateRange::new(parse_date(start)?, parse_date(end)?)
    }

    /// Bounds of the dashboard's date picker.
    pub fn dashboard_default() -> Self {
        DateRange {
            start: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2022, 9, 23).unwrap_or(NaiveDate::MAX),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which variants to keep. An empty `Only` list selects everything; other lists filter by exact
/// name, so `"all"` inside a list is just another name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantSelection {
    #[default]
    All,
    Only(Vec<String>),
}

impl VariantSelection {
    pub fn from_names(names: Option<Vec<String>>) -> Self {
        match names {
            None => VariantSelection::All,
            Some(v) if v.is_empty() => VariantSelection::All,
            Some(v) => VariantSelection::Only(v),
        }
    }

    pub fn includes(&self, variant: &str) -> bool {
        match self {
            VariantSelection::All => true,
            VariantSelection::Only(names) => names.is_empty() || names.iter().any(|n| n == variant),
        }
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, VariantError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| VariantError::Parse(format!("bad date {:?}: {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_date_range_inclusive() {
        let r = DateRange::new(d(2021, 3, 1), d(2021, 3, 5)).unwrap();
        assert!(r.contains(d(2021, 3, 1)));
        assert!(r.contains(d(2021, 3, 5)));
        assert!(!r.contains(d(2021, 3, 6)));
        assert!(!r.contains(d(2021, 2, 28)));
    }

    #[test]
    fn test_date_range_rejects_reversed() {
        let err = DateRange::new(d(2022, 1, 2), d(2022, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            VariantError::InvalidDateRange { start: d(2022, 1, 2), end: d(2022, 1, 1) }
        );
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2021-01-01").unwrap(), d(2021, 1, 1));
        assert!(matches!(parse_date("01/01/2021"), Err(VariantError::Parse(_))));
    }

    #[test]
    fn test_selection() {
        assert_eq!(VariantSelection::from_names(None), VariantSelection::All);
        assert_eq!(VariantSelection::from_names(Some(vec![])), VariantSelection::All);
        let mixed = VariantSelection::from_names(Some(vec!["all".into(), "Delta".into()]));
        assert_eq!(mixed, VariantSelection::Only(vec!["all".into(), "Delta".into()]));
        assert!(mixed.includes("Delta"));
        assert!(!mixed.includes("Alpha"));
        let sel = VariantSelection::from_names(Some(vec!["Delta".into()]));
        assert!(sel.includes("Delta"));
        assert!(!sel.includes("Omicron"));
        assert!(VariantSelection::Only(vec![]).includes("Omicron"));
    }

    #[test]
    fn test_record_json() {
        let rec: VariantRecord =
            serde_json::from_str(r#"{"date":"2021-06-01","variant_name":"Alpha","specimens":12.0}"#).unwrap();
        assert_eq!(rec.date, d(2021, 6, 1));
        assert_eq!(rec.variant_name, "Alpha");
        assert_eq!(rec.specimens, 12.0);
    }
}
