use std::io::Write;
use std::path::Path;

use polars::prelude::*;
use thiserror::Error;

use crate::aggregation::{NumericSummary, PitchTypeSummary, ReportData};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),
    #[error("JSON operation failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported export extension '{0}' (expected .parquet or .json)")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Parquet,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "parquet" => Ok(ExportFormat::Parquet),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

pub const SUMMARY_COLUMNS: [&str; 14] = [
    "pitch_type",
    "count",
    "velocity_mean_mph",
    "velocity_median_mph",
    "velocity_std_mph",
    "velocity_min_mph",
    "velocity_max_mph",
    "spin_rate_mean_rpm",
    "induced_vert_break_mean_in",
    "horz_break_mean_in",
    "horz_approach_angle_mean_deg",
    "vert_approach_angle_mean_deg",
    "zone_rate_pct",
    "strike_rate_pct",
];

fn mean_of(summary: &Option<NumericSummary>) -> Option<f64> {
    summary.as_ref().map(|s| s.mean)
}

/// One row per pitch type, in summary order.
pub fn summaries_to_dataframe(summaries: &[PitchTypeSummary]) -> Result<DataFrame, ExportError> {
    let optional = |f: fn(&PitchTypeSummary) -> Option<f64>| -> Vec<Option<f64>> {
        summaries.iter().map(f).collect()
    };
    let required = |f: fn(&PitchTypeSummary) -> f64| -> Vec<f64> {
        summaries.iter().map(f).collect()
    };

    let pitch_types: Vec<&str> = summaries.iter().map(|s| s.pitch_type.as_str()).collect();
    let counts: Vec<i64> = summaries.iter().map(|s| s.count as i64).collect();

    let columns: Vec<Column> = vec![
        Series::new(SUMMARY_COLUMNS[0].into(), pitch_types).into(),
        Series::new(SUMMARY_COLUMNS[1].into(), counts).into(),
        Series::new(SUMMARY_COLUMNS[2].into(), required(|s| s.velocity.mean)).into(),
        Series::new(SUMMARY_COLUMNS[3].into(), required(|s| s.velocity.median)).into(),
        Series::new(SUMMARY_COLUMNS[4].into(), optional(|s| s.velocity.std_dev)).into(),
        Series::new(SUMMARY_COLUMNS[5].into(), required(|s| s.velocity.min)).into(),
        Series::new(SUMMARY_COLUMNS[6].into(), required(|s| s.velocity.max)).into(),
        Series::new(SUMMARY_COLUMNS[7].into(), optional(|s| mean_of(&s.spin_rate))).into(),
        Series::new(
            SUMMARY_COLUMNS[8].into(),
            optional(|s| mean_of(&s.induced_vert_break)),
        )
        .into(),
        Series::new(SUMMARY_COLUMNS[9].into(), optional(|s| mean_of(&s.horz_break))).into(),
        Series::new(
            SUMMARY_COLUMNS[10].into(),
            optional(|s| mean_of(&s.horz_approach_angle)),
        )
        .into(),
        Series::new(
            SUMMARY_COLUMNS[11].into(),
            optional(|s| mean_of(&s.vert_approach_angle)),
        )
        .into(),
        Series::new(SUMMARY_COLUMNS[12].into(), optional(|s| s.zone_rate)).into(),
        Series::new(SUMMARY_COLUMNS[13].into(), optional(|s| s.strike_rate)).into(),
    ];

    Ok(DataFrame::new(columns)?)
}

pub fn write_parquet<W: Write>(
    summaries: &[PitchTypeSummary],
    writer: W,
) -> Result<(), ExportError> {
    let mut df = summaries_to_dataframe(summaries)?;
    ParquetWriter::new(writer).finish(&mut df)?;
    Ok(())
}

/// Pretty JSON of the whole report model (per-pitch points excluded).
pub fn to_json(data: &ReportData) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec_pretty(data)?)
}

pub fn export_summaries<W: Write>(
    data: &ReportData,
    format: ExportFormat,
    mut writer: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Parquet => write_parquet(&data.summaries, writer),
        ExportFormat::Json => {
            writer.write_all(&to_json(data)?)?;
            Ok(())
        }
    }
}
