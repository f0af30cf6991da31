use csv::StringRecord;

use crate::errors::ParserError;
use crate::model::{ParsedPitchFile, PitchCall, PitchRecord, PitchType};
use crate::registry::PitchFileParser;

use super::schema::{ColumnIndex, PitchColumn};
use super::{parse_date, parse_optional_f64, parse_optional_u32, parse_time, LineCounter};

/// Single-header CSV export of a radar/optical pitch tracking unit.
///
/// Only pitch type and release speed are mandatory; every other recognised
/// column is optional so exports from the same software version with extra or
/// missing optional columns load alike.
pub struct TrackmanCsvParser;

impl Default for TrackmanCsvParser {
    fn default() -> Self {
        Self
    }
}

impl TrackmanCsvParser {
    const NAME: &'static str = "TRACKMAN_CSV";

    fn validate_columns(index: &ColumnIndex) -> Result<(), ParserError> {
        let has_type = index.contains(PitchColumn::PitchType);
        let has_velocity = index.contains(PitchColumn::Velocity);

        match (has_type, has_velocity) {
            (true, true) => Ok(()),
            (false, false) => Err(ParserError::FormatMismatch {
                parser: Self::NAME,
                reason: "header has neither a pitch type nor a velocity column".to_string(),
            }),
            (false, true) => Err(ParserError::MissingColumn {
                parser: Self::NAME,
                column: PitchColumn::PitchType.vendor_name(),
            }),
            (true, false) => Err(ParserError::MissingColumn {
                parser: Self::NAME,
                column: PitchColumn::Velocity.vendor_name(),
            }),
        }
    }

    fn cell<'r>(record: &'r StringRecord, index: &ColumnIndex, column: PitchColumn) -> &'r str {
        index
            .get(column)
            .and_then(|position| record.get(position))
            .unwrap_or("")
    }

    fn optional_f64(
        record: &StringRecord,
        index: &ColumnIndex,
        column: PitchColumn,
        line_index: usize,
    ) -> Result<Option<f64>, ParserError> {
        parse_optional_f64(
            Self::NAME,
            Self::cell(record, index, column),
            line_index,
            column.vendor_name(),
        )
    }

    /// Returns `Ok(None)` for rows without a pitch type or velocity.
    fn parse_row(
        record: &StringRecord,
        index: &ColumnIndex,
        line_index: usize,
    ) -> Result<Option<PitchRecord>, ParserError> {
        let type_cell = Self::cell(record, index, PitchColumn::PitchType);
        let Ok(pitch_type) = PitchType::new(type_cell) else {
            return Ok(None);
        };
        let Some(velocity_mph) =
            Self::optional_f64(record, index, PitchColumn::Velocity, line_index)?
        else {
            return Ok(None);
        };

        let pitcher = Some(Self::cell(record, index, PitchColumn::Pitcher).trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Ok(Some(PitchRecord {
            pitch_no: parse_optional_u32(
                Self::NAME,
                Self::cell(record, index, PitchColumn::PitchNo),
                line_index,
                PitchColumn::PitchNo.vendor_name(),
            )?,
            pitcher,
            pitch_type,
            velocity_mph,
            spin_rate_rpm: Self::optional_f64(record, index, PitchColumn::SpinRate, line_index)?,
            plate_loc_side_ft: Self::optional_f64(
                record,
                index,
                PitchColumn::PlateLocSide,
                line_index,
            )?,
            plate_loc_height_ft: Self::optional_f64(
                record,
                index,
                PitchColumn::PlateLocHeight,
                line_index,
            )?,
            horz_break_in: Self::optional_f64(record, index, PitchColumn::HorzBreak, line_index)?,
            induced_vert_break_in: Self::optional_f64(
                record,
                index,
                PitchColumn::InducedVertBreak,
                line_index,
            )?,
            horz_approach_angle: Self::optional_f64(
                record,
                index,
                PitchColumn::HorzApprAngle,
                line_index,
            )?,
            vert_approach_angle: Self::optional_f64(
                record,
                index,
                PitchColumn::VertApprAngle,
                line_index,
            )?,
            pitch_call: PitchCall::parse(Self::cell(record, index, PitchColumn::PitchCall)),
            date: parse_date(
                Self::NAME,
                Self::cell(record, index, PitchColumn::Date),
                line_index,
            )?,
            time: parse_time(
                Self::NAME,
                Self::cell(record, index, PitchColumn::Time),
                line_index,
            )?,
            source_file: String::new(),
            session_date: None,
        }))
    }
}

impl PitchFileParser for TrackmanCsvParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<ParsedPitchFile, ParserError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut records = reader.records();

        let header = records
            .next()
            .ok_or(ParserError::FormatMismatch {
                parser: Self::NAME,
                reason: "file missing column header row".to_string(),
            })?
            .map_err(|err| ParserError::Csv {
                parser: Self::NAME,
                source: err,
            })?;

        let index = ColumnIndex::from_header(header.iter());
        Self::validate_columns(&index)?;

        let mut parsed = Vec::new();
        let mut skipped_rows = 0usize;
        let mut lines = LineCounter::new(content);

        for (row_idx, record) in records.enumerate() {
            let record = record.map_err(|err| ParserError::Csv {
                parser: Self::NAME,
                source: err,
            })?;
            let line_index = record
                .position()
                .map_or(row_idx + 2, |position| lines.line_at(position.byte()));

            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            if record.len() != header.len() {
                return Err(ParserError::DataRow {
                    parser: Self::NAME,
                    line_index,
                    message: format!(
                        "expected {} columns but found {}",
                        header.len(),
                        record.len()
                    ),
                });
            }

            match Self::parse_row(&record, &index, line_index)? {
                Some(pitch) => parsed.push(pitch),
                None => skipped_rows += 1,
            }
        }

        Ok(ParsedPitchFile {
            parser: Self::NAME,
            records: parsed,
            skipped_rows,
        })
    }
}
