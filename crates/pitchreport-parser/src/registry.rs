use crate::errors::{ParserAttempt, ParserError};
use crate::formats::{RapsodoCsvParser, TrackmanCsvParser};
use crate::model::ParsedPitchFile;

pub trait PitchFileParser {
    fn name(&self) -> &'static str;
    fn parse(&self, content: &str) -> Result<ParsedPitchFile, ParserError>;
}

/// Tries every known export layout in turn.
pub fn parse_pitch_file(content: &str) -> Result<ParsedPitchFile, ParserError> {
    let trackman = TrackmanCsvParser;
    let rapsodo = RapsodoCsvParser;
    let parsers: [&dyn PitchFileParser; 2] = [&trackman, &rapsodo];
    parse_with_parsers(content, &parsers)
}

pub fn parse_with_parsers(
    content: &str,
    parsers: &[&dyn PitchFileParser],
) -> Result<ParsedPitchFile, ParserError> {
    let mut attempts = Vec::new();

    for parser in parsers {
        match parser.parse(content) {
            Ok(parsed) => return Ok(parsed),
            Err(ParserError::FormatMismatch { reason, .. }) => {
                attempts.push(ParserAttempt::new(parser.name(), reason));
            }
            Err(err) => return Err(err),
        }
    }

    Err(ParserError::NoMatchingParser { attempts })
}
