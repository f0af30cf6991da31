use csv::StringRecord;

use crate::errors::ParserError;
use crate::model::{ParsedPitchFile, PitchRecord, PitchType};
use crate::registry::PitchFileParser;

use super::schema::{ColumnIndex, PitchColumn};
use super::{
    normalize_header, parse_date, parse_optional_f64, parse_optional_u32, parse_time,
    LineCounter,
};

const INCHES_PER_FOOT: f64 = 12.0;

/// Pitching session export of a portable camera unit.
///
/// The file opens with `Key:,Value` rows naming the player, then a single
/// header row and one row per pitch. Strike zone side and height are written
/// in inches and converted to feet; the `Date` cell carries the time as well.
pub struct RapsodoCsvParser;

impl Default for RapsodoCsvParser {
    fn default() -> Self {
        Self
    }
}

struct Preamble {
    player: Option<String>,
    rows: usize,
}

impl RapsodoCsvParser {
    const NAME: &'static str = "RAPSODO_CSV";

    fn classify(header: &str) -> Option<PitchColumn> {
        let column = match normalize_header(header).as_str() {
            "no" | "pitchid" => PitchColumn::PitchNo,
            "date" => PitchColumn::Date,
            "pitchtype" => PitchColumn::PitchType,
            "velocity" => PitchColumn::Velocity,
            "totalspin" => PitchColumn::SpinRate,
            "vb(trajectory)" => PitchColumn::InducedVertBreak,
            "hb(trajectory)" => PitchColumn::HorzBreak,
            "strikezoneside" => PitchColumn::PlateLocSide,
            "strikezoneheight" => PitchColumn::PlateLocHeight,
            _ => return None,
        };
        Some(column)
    }

    fn column_name(column: PitchColumn) -> &'static str {
        match column {
            PitchColumn::PitchNo => "Pitch ID",
            PitchColumn::Date => "Date",
            PitchColumn::PitchType => "Pitch Type",
            PitchColumn::Velocity => "Velocity",
            PitchColumn::SpinRate => "Total Spin",
            PitchColumn::InducedVertBreak => "VB (trajectory)",
            PitchColumn::HorzBreak => "HB (trajectory)",
            PitchColumn::PlateLocSide => "Strike Zone Side",
            PitchColumn::PlateLocHeight => "Strike Zone Height",
            other => other.vendor_name(),
        }
    }

    fn mismatch(reason: impl Into<String>) -> ParserError {
        ParserError::FormatMismatch {
            parser: Self::NAME,
            reason: reason.into(),
        }
    }

    fn csv_error(err: csv::Error) -> ParserError {
        ParserError::Csv {
            parser: Self::NAME,
            source: err,
        }
    }

    fn is_pitch_header(index: &ColumnIndex) -> bool {
        index.contains(PitchColumn::PitchType) && index.contains(PitchColumn::Velocity)
    }

    /// Reads a `Key:,Value` row into the preamble; anything else is not this
    /// format.
    fn read_preamble_row(record: &StringRecord, preamble: &mut Preamble) -> Result<(), ParserError> {
        let key = record.get(0).map(normalize_header).unwrap_or_default();
        if !key.ends_with(':') {
            return Err(Self::mismatch(format!(
                "row {} is neither a 'Key:' preamble row nor the pitch header",
                preamble.rows + 1
            )));
        }
        if key == "playername:" {
            preamble.player = record
                .get(1)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string);
        }
        preamble.rows += 1;
        Ok(())
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
            Self::column_name(column),
        )
    }

    fn inches_as_feet(
        record: &StringRecord,
        index: &ColumnIndex,
        column: PitchColumn,
        line_index: usize,
    ) -> Result<Option<f64>, ParserError> {
        Ok(Self::optional_f64(record, index, column, line_index)?
            .map(|inches| inches / INCHES_PER_FOOT))
    }

    /// Returns `Ok(None)` for rows without a pitch type or velocity.
    fn parse_row(
        record: &StringRecord,
        index: &ColumnIndex,
        line_index: usize,
        player: Option<&str>,
    ) -> Result<Option<PitchRecord>, ParserError> {
        let Ok(pitch_type) = PitchType::new(Self::cell(record, index, PitchColumn::PitchType))
        else {
            return Ok(None);
        };
        let Some(velocity_mph) =
            Self::optional_f64(record, index, PitchColumn::Velocity, line_index)?
        else {
            return Ok(None);
        };

        let stamp = Self::cell(record, index, PitchColumn::Date).trim();
        let (date_cell, time_cell) = stamp.split_once(' ').unwrap_or((stamp, ""));

        Ok(Some(PitchRecord {
            pitch_no: parse_optional_u32(
                Self::NAME,
                Self::cell(record, index, PitchColumn::PitchNo),
                line_index,
                Self::column_name(PitchColumn::PitchNo),
            )?,
            pitcher: player.map(str::to_string),
            pitch_type,
            velocity_mph,
            spin_rate_rpm: Self::optional_f64(record, index, PitchColumn::SpinRate, line_index)?,
            plate_loc_side_ft: Self::inches_as_feet(
                record,
                index,
                PitchColumn::PlateLocSide,
                line_index,
            )?,
            plate_loc_height_ft: Self::inches_as_feet(
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
            horz_approach_angle: None,
            vert_approach_angle: None,
            pitch_call: None,
            date: parse_date(Self::NAME, date_cell, line_index)?,
            time: parse_time(Self::NAME, time_cell, line_index)?,
            source_file: String::new(),
            session_date: None,
        }))
    }
}

impl PitchFileParser for RapsodoCsvParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<ParsedPitchFile, ParserError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());
        let mut records = reader.records();

        let mut preamble = Preamble {
            player: None,
            rows: 0,
        };
        let mut header = None;
        for record in records.by_ref() {
            let record = record.map_err(Self::csv_error)?;
            let index = ColumnIndex::from_header_with(record.iter(), Self::classify);
            if Self::is_pitch_header(&index) {
                header = Some((record, index));
                break;
            }
            Self::read_preamble_row(&record, &mut preamble)?;
        }

        let Some((header, index)) = header else {
            return Err(Self::mismatch("no header row with Pitch Type and Velocity"));
        };
        if preamble.rows == 0 {
            return Err(Self::mismatch("no 'Key:' preamble before the pitch header"));
        }

        let mut parsed = Vec::new();
        let mut skipped_rows = 0usize;
        let mut lines = LineCounter::new(content);

        for record in records {
            let record = record.map_err(Self::csv_error)?;
            let line_index = record
                .position()
                .map_or(preamble.rows + 2, |position| lines.line_at(position.byte()));

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

            match Self::parse_row(&record, &index, line_index, preamble.player.as_deref())? {
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
