use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use pitchreport_parser::PitchRecord;
use regex::Regex;
use serde::Serialize;

static FILE_NAME_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\D)(\d{1,2})_(\d{1,2})_(\d{4}|\d{2})(?:\D|$)")
        .expect("file name date pattern is valid")
});

/// Extracts a `M_D_YY` or `M_D_YYYY` session date embedded in a file name,
/// e.g. `bullpen_3_15_24.csv`. Two-digit years are in the 2000s.
pub fn extract_session_date(file_name: &str) -> Option<NaiveDate> {
    let captures = FILE_NAME_DATE.captures(file_name)?;
    let month: u32 = captures.get(1)?.as_str().parse().ok()?;
    let day: u32 = captures.get(2)?.as_str().parse().ok()?;
    let year_text = captures.get(3)?.as_str();
    let mut year: i32 = year_text.parse().ok()?;
    if year_text.len() == 2 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Date range covered by the records of one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl SessionWindow {
    pub fn from_records(records: &[PitchRecord]) -> Self {
        let mut dates = records.iter().filter_map(|record| record.session_date);
        let Some(first) = dates.next() else {
            return Self::default();
        };
        let (start, end) = dates.fold((first, first), |(lo, hi), date| (lo.min(date), hi.max(date)));
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn label(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                format!("{} → {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
            }
            _ => "Unknown Date Range".to_string(),
        }
    }
}

impl fmt::Display for SessionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
