//! Per-pitch-type statistics.
//!
//! Records are grouped by pitch type and each group is reduced to a
//! [`PitchTypeSummary`]. Summaries are ordered by descending pitch count with
//! ties broken alphabetically, which is also the layout order of the report.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use pitchreport_parser::{PitchRecord, PitchType};
use serde::Serialize;

use crate::error::AggregationError;
use crate::session::SessionWindow;

/// Descriptive statistics over the present values of one attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample (n - 1) standard deviation; `None` below two values.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl NumericSummary {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (values[mid - 1] + values[mid]) / 2.0
        } else {
            values[mid]
        };
        let std_dev = (count > 1).then(|| {
            let squared: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
            (squared / (count - 1) as f64).sqrt()
        });

        Some(Self {
            count,
            mean,
            median,
            std_dev,
            min: values[0],
            max: values[count - 1],
        })
    }
}

/// Strike zone used for the zone rate, widened by `margin_in` on every edge.
/// Plate side is measured in feet by the tracker and compared in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrikeZone {
    pub half_width_in: f64,
    pub bottom_ft: f64,
    pub top_ft: f64,
    pub margin_in: f64,
}

impl StrikeZone {
    pub const DEFAULT_MARGIN_IN: f64 = 2.85;

    pub fn with_margin(margin_in: f64) -> Self {
        Self {
            half_width_in: 8.5,
            bottom_ft: 1.5,
            top_ft: 3.5,
            margin_in,
        }
    }

    pub fn contains(&self, side_ft: f64, height_ft: f64) -> bool {
        let side_in = side_ft * 12.0;
        let margin_ft = self.margin_in / 12.0;
        let limit = self.half_width_in + self.margin_in;
        (-limit..=limit).contains(&side_in)
            && (self.bottom_ft - margin_ft..=self.top_ft + margin_ft).contains(&height_ft)
    }

    /// Percentage of all pitches inside the zone. A pitch without a plate
    /// location counts as outside.
    pub fn zone_rate<'a>(&self, records: impl IntoIterator<Item = &'a PitchRecord>) -> Option<f64> {
        let (total, inside) = records
            .into_iter()
            .fold((0usize, 0usize), |(total, inside), record| {
                let hit = record
                    .plate_location()
                    .is_some_and(|(side, height)| self.contains(side, height));
                (total + 1, inside + usize::from(hit))
            });
        percentage(inside, total)
    }
}

impl Default for StrikeZone {
    fn default() -> Self {
        Self::with_margin(Self::DEFAULT_MARGIN_IN)
    }
}

fn percentage(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64 * 100.0)
}

fn strike_rate<'a>(records: impl IntoIterator<Item = &'a PitchRecord>) -> Option<f64> {
    let (called, strikes) = records
        .into_iter()
        .filter_map(|record| record.pitch_call.as_ref())
        .fold((0usize, 0usize), |(called, strikes), call| {
            (called + 1, strikes + usize::from(call.is_strike()))
        });
    percentage(strikes, called)
}

/// One plotted pitch. `sequence` numbers the pitches of the whole report from 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchPoint {
    pub sequence: u32,
    pub velocity_mph: f64,
    /// (horizontal break, induced vertical break), inches.
    pub movement: Option<(f64, f64)>,
    /// (plate side, plate height), feet.
    pub plate_location: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchTypeSummary {
    pub pitch_type: PitchType,
    pub count: usize,
    pub velocity: NumericSummary,
    pub spin_rate: Option<NumericSummary>,
    pub induced_vert_break: Option<NumericSummary>,
    pub horz_break: Option<NumericSummary>,
    pub horz_approach_angle: Option<NumericSummary>,
    pub vert_approach_angle: Option<NumericSummary>,
    pub zone_rate: Option<f64>,
    pub strike_rate: Option<f64>,
    #[serde(skip)]
    pub points: Vec<PitchPoint>,
}

/// Whole-outing numbers shown in the summary boxes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallSummary {
    pub total_pitches: usize,
    pub avg_velocity: f64,
    pub max_velocity: f64,
    pub min_velocity: f64,
    pub zone_rate: Option<f64>,
    pub strike_rate: Option<f64>,
}

/// Everything the renderer needs for one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub title: String,
    pub window: SessionWindow,
    pub overall: OverallSummary,
    pub summaries: Vec<PitchTypeSummary>,
}

/// Groups by pitch type with the default strike zone.
pub fn aggregate(records: &[PitchRecord]) -> Result<Vec<PitchTypeSummary>, AggregationError> {
    aggregate_with_zone(records, &StrikeZone::default())
}

pub fn aggregate_with_zone(
    records: &[PitchRecord],
    zone: &StrikeZone,
) -> Result<Vec<PitchTypeSummary>, AggregationError> {
    if records.is_empty() {
        return Err(AggregationError::EmptyTable);
    }

    let mut groups: BTreeMap<&PitchType, Vec<(u32, &PitchRecord)>> = BTreeMap::new();
    for (sequence, record) in sequence_records(records) {
        groups
            .entry(&record.pitch_type)
            .or_default()
            .push((sequence, record));
    }

    let mut summaries: Vec<PitchTypeSummary> = groups
        .into_iter()
        .filter_map(|(pitch_type, members)| summarize_group(pitch_type, &members, zone))
        .collect();

    summaries.sort_by(|a, b| {
        (Reverse(a.count), &a.pitch_type).cmp(&(Reverse(b.count), &b.pitch_type))
    });
    Ok(summaries)
}

pub fn summarize_outing(records: &[PitchRecord]) -> Result<OverallSummary, AggregationError> {
    summarize_outing_with_zone(records, &StrikeZone::default())
}

pub fn summarize_outing_with_zone(
    records: &[PitchRecord],
    zone: &StrikeZone,
) -> Result<OverallSummary, AggregationError> {
    let velocity = NumericSummary::from_values(records.iter().map(|r| r.velocity_mph))
        .ok_or(AggregationError::EmptyTable)?;

    Ok(OverallSummary {
        total_pitches: records.len(),
        avg_velocity: velocity.mean,
        max_velocity: velocity.max,
        min_velocity: velocity.min,
        zone_rate: zone.zone_rate(records),
        strike_rate: strike_rate(records),
    })
}

pub fn build_report_data(
    records: &[PitchRecord],
    title: impl Into<String>,
    zone: &StrikeZone,
) -> Result<ReportData, AggregationError> {
    let summaries = aggregate_with_zone(records, zone)?;
    let overall = summarize_outing_with_zone(records, zone)?;
    Ok(ReportData {
        title: title.into(),
        window: SessionWindow::from_records(records),
        overall,
        summaries,
    })
}

/// Numbers pitches 1..=n by session date then pitch number. Records missing
/// either key sort after those that have it; the sort is stable.
fn sequence_records(records: &[PitchRecord]) -> Vec<(u32, &PitchRecord)> {
    let mut ordered: Vec<&PitchRecord> = records.iter().collect();
    ordered.sort_by_key(|record| {
        (
            record.session_date.is_none(),
            record.session_date,
            record.pitch_no.is_none(),
            record.pitch_no,
        )
    });
    ordered
        .into_iter()
        .zip(1u32..)
        .map(|(record, sequence)| (sequence, record))
        .collect()
}

fn summarize_group(
    pitch_type: &PitchType,
    members: &[(u32, &PitchRecord)],
    zone: &StrikeZone,
) -> Option<PitchTypeSummary> {
    let records = || members.iter().map(|(_, record)| *record);
    let numeric = |field: fn(&PitchRecord) -> Option<f64>| {
        NumericSummary::from_values(records().filter_map(field))
    };

    let velocity = NumericSummary::from_values(records().map(|r| r.velocity_mph))?;

    let points = members
        .iter()
        .map(|(sequence, record)| PitchPoint {
            sequence: *sequence,
            velocity_mph: record.velocity_mph,
            movement: record.movement(),
            plate_location: record.plate_location(),
        })
        .collect();

    Some(PitchTypeSummary {
        pitch_type: pitch_type.clone(),
        count: members.len(),
        velocity,
        spin_rate: numeric(|r| r.spin_rate_rpm),
        induced_vert_break: numeric(|r| r.induced_vert_break_in),
        horz_break: numeric(|r| r.horz_break_in),
        horz_approach_angle: numeric(|r| r.horz_approach_angle),
        vert_approach_angle: numeric(|r| r.vert_approach_angle),
        zone_rate: zone.zone_rate(records()),
        strike_rate: strike_rate(records()),
        points,
    })
}
