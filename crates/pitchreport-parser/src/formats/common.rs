use chrono::{NaiveDate, NaiveTime};

use crate::errors::ParserError;

/// Lowercases a header cell and drops whitespace, underscores and a leading
/// byte-order mark so `Pitch Type`, `pitch_type` and `PitchType` compare equal.
pub(crate) fn normalize_header(value: &str) -> String {
    value
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Maps the offsets csv records start at to 1-based physical line numbers.
/// A record's offset can sit before blank lines the reader skipped, so
/// leading line breaks are stepped over first. Offsets must not decrease
/// between calls.
pub(crate) struct LineCounter<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            bytes: content.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    pub fn line_at(&mut self, byte: u64) -> usize {
        let mut start = usize::try_from(byte)
            .unwrap_or(usize::MAX)
            .clamp(self.offset, self.bytes.len());
        while matches!(self.bytes.get(start), Some(b'\n' | b'\r')) {
            start += 1;
        }
        self.line += self.bytes[self.offset..start]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.offset = start;
        self.line
    }
}

fn is_missing(trimmed: &str) -> bool {
    trimmed.is_empty()
        || trimmed == "-"
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("null")
}

pub(crate) fn parse_optional_f64(
    parser: &'static str,
    value: &str,
    line_index: usize,
    column: &str,
) -> Result<Option<f64>, ParserError> {
    let trimmed = value.trim();
    if is_missing(trimmed) {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
        Ok(_) => Err(ParserError::DataRow {
            parser,
            line_index,
            message: format!("column '{column}' value '{trimmed}' is not finite"),
        }),
        Err(err) => Err(ParserError::DataRow {
            parser,
            line_index,
            message: format!("failed to parse column '{column}' as float: {err}"),
        }),
    }
}

pub(crate) fn parse_optional_u32(
    parser: &'static str,
    value: &str,
    line_index: usize,
    column: &str,
) -> Result<Option<u32>, ParserError> {
    let trimmed = value.trim();
    if is_missing(trimmed) {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|err| ParserError::DataRow {
            parser,
            line_index,
            message: format!("failed to parse column '{column}' as integer: {err}"),
        })
}

pub(crate) fn parse_date(
    parser: &'static str,
    value: &str,
    line_index: usize,
) -> Result<Option<NaiveDate>, ParserError> {
    let trimmed = value.trim();
    if is_missing(trimmed) {
        return Ok(None);
    }

    let parsed = if trimmed.contains('/') {
        // %Y would happily read "24" as the year 24 AD
        let year_digits = trimmed.rsplit('/').next().map(str::len).unwrap_or(0);
        let fmt = if year_digits == 2 { "%m/%d/%y" } else { "%m/%d/%Y" };
        NaiveDate::parse_from_str(trimmed, fmt)
    } else {
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
    };

    parsed.map(Some).map_err(|_| ParserError::DataRow {
        parser,
        line_index,
        message: format!("invalid date '{trimmed}'"),
    })
}

pub(crate) fn parse_time(
    parser: &'static str,
    value: &str,
    line_index: usize,
) -> Result<Option<NaiveTime>, ParserError> {
    static FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];
    let trimmed = value.trim();
    if is_missing(trimmed) {
        return Ok(None);
    }
    for fmt in FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(trimmed, fmt) {
            return Ok(Some(time));
        }
    }
    Err(ParserError::DataRow {
        parser,
        line_index,
        message: format!("invalid time '{trimmed}'"),
    })
}
