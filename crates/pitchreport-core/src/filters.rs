use std::collections::BTreeSet;

use chrono::NaiveDate;
use pitchreport_parser::PitchRecord;
use serde::{Deserialize, Serialize};

pub const ALL_PITCHERS_TITLE: &str = "All Pitchers";

/// Session-date and pitcher selection applied between loading and
/// aggregation. The default keeps every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    pub pitcher: Option<String>,
    pub dates: Vec<NaiveDate>,
}

impl ReportFilter {
    pub fn is_empty(&self) -> bool {
        self.pitcher.is_none() && self.dates.is_empty()
    }

    /// Records without a session date only survive when no dates are selected.
    pub fn matches(&self, record: &PitchRecord) -> bool {
        if !self.dates.is_empty() {
            match record.session_date {
                Some(date) if self.dates.contains(&date) => {}
                _ => return false,
            }
        }
        match &self.pitcher {
            Some(name) => record.pitcher.as_deref() == Some(name.as_str()),
            None => true,
        }
    }

    pub fn apply(&self, records: &[PitchRecord]) -> Vec<PitchRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }

    /// Header title: the selected pitcher, else the only pitcher present.
    pub fn title(&self, records: &[PitchRecord]) -> String {
        if let Some(name) = &self.pitcher {
            return name.clone();
        }
        let names = pitchers(records);
        match names.as_slice() {
            [only] => only.clone(),
            _ => ALL_PITCHERS_TITLE.to_string(),
        }
    }
}

/// Pitchers and session dates present in the loaded uploads; the values the
/// pitcher and date selections can take.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selections {
    pub pitchers: Vec<String>,
    pub dates: Vec<NaiveDate>,
}

impl Selections {
    pub fn from_records(records: &[PitchRecord]) -> Self {
        Self {
            pitchers: pitchers(records),
            dates: session_dates(records),
        }
    }
}

/// Distinct pitcher names, sorted.
pub fn pitchers(records: &[PitchRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.pitcher.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct session dates, sorted.
pub fn session_dates(records: &[PitchRecord]) -> Vec<NaiveDate> {
    records
        .iter()
        .filter_map(|record| record.session_date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchreport_parser::PitchType;

    fn record(pitcher: Option<&str>, session_date: Option<NaiveDate>) -> PitchRecord {
        PitchRecord {
            pitch_no: None,
            pitcher: pitcher.map(str::to_string),
            pitch_type: PitchType::new("Fastball").unwrap(),
            velocity_mph: 90.0,
            spin_rate_rpm: None,
            plate_loc_side_ft: None,
            plate_loc_height_ft: None,
            horz_break_in: None,
            induced_vert_break_in: None,
            horz_approach_angle: None,
            vert_approach_angle: None,
            pitch_call: None,
            date: None,
            time: None,
            source_file: String::new(),
            session_date,
        }
    }

    fn day(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 3, d)
    }

    #[test]
    fn default_filter_keeps_everything() {
        let records = vec![record(Some("A"), day(1)), record(None, None)];
        let filter = ReportFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&records).len(), 2);
    }

    #[test]
    fn date_filter_drops_undated_records() {
        let records = vec![
            record(Some("A"), day(1)),
            record(Some("A"), day(2)),
            record(Some("A"), None),
        ];
        let filter = ReportFilter {
            pitcher: None,
            dates: vec![day(2).unwrap()],
        };
        let kept = filter.apply(&records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].session_date, day(2));
    }

    #[test]
    fn pitcher_filter_matches_exact_name() {
        let records = vec![record(Some("A"), None), record(Some("B"), None)];
        let filter = ReportFilter {
            pitcher: Some("B".to_string()),
            dates: Vec::new(),
        };
        let kept = filter.apply(&records);
        assert_eq!(kept.len(), 1);
        assert_eq!(filter.title(&kept), "B");
    }

    #[test]
    fn title_falls_back_to_single_pitcher_or_all() {
        let filter = ReportFilter::default();
        assert_eq!(filter.title(&[record(Some("A"), None)]), "A");
        assert_eq!(
            filter.title(&[record(Some("A"), None), record(Some("B"), None)]),
            ALL_PITCHERS_TITLE
        );
        assert_eq!(filter.title(&[record(None, None)]), ALL_PITCHERS_TITLE);
    }

    #[test]
    fn lists_distinct_sorted_values() {
        let records = vec![
            record(Some("B"), day(3)),
            record(Some("A"), day(1)),
            record(Some("B"), day(1)),
        ];
        assert_eq!(pitchers(&records), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(
            session_dates(&records),
            vec![day(1).unwrap(), day(3).unwrap()]
        );
    }
}
