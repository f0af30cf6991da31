pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::{ParserAttempt, ParserError};
pub use model::{ParsedPitchFile, PitchCall, PitchRecord, PitchType};
pub use registry::{parse_pitch_file, parse_with_parsers, PitchFileParser};

#[cfg(test)]
mod tests;
