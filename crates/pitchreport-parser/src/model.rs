use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Categorical pitch label such as `Fastball` or `Slider`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PitchType(String);

impl PitchType {
    pub fn new(label: &str) -> Result<Self, String> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err("pitch type must not be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for PitchType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        PitchType::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchCall {
    StrikeCalled,
    StrikeSwinging,
    FoulBall,
    InPlay,
    BallCalled,
    BallIntentional,
    HitByPitch,
    Other(String),
}

impl PitchCall {
    /// Parses a vendor call label. Blank and `Undefined` cells carry no call.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let key: String = trimmed
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        let call = match key.as_str() {
            "" | "undefined" => return None,
            "strikecalled" => PitchCall::StrikeCalled,
            "strikeswinging" => PitchCall::StrikeSwinging,
            s if s.starts_with("foulball") => PitchCall::FoulBall,
            "inplay" => PitchCall::InPlay,
            "ballcalled" | "ballindirt" => PitchCall::BallCalled,
            "ballintentional" => PitchCall::BallIntentional,
            "hitbypitch" => PitchCall::HitByPitch,
            _ => PitchCall::Other(trimmed.to_string()),
        };
        Some(call)
    }

    pub fn is_strike(&self) -> bool {
        matches!(
            self,
            PitchCall::StrikeCalled
                | PitchCall::StrikeSwinging
                | PitchCall::FoulBall
                | PitchCall::InPlay
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            PitchCall::StrikeCalled => "StrikeCalled",
            PitchCall::StrikeSwinging => "StrikeSwinging",
            PitchCall::FoulBall => "FoulBall",
            PitchCall::InPlay => "InPlay",
            PitchCall::BallCalled => "BallCalled",
            PitchCall::BallIntentional => "BallIntentional",
            PitchCall::HitByPitch => "HitByPitch",
            PitchCall::Other(label) => label,
        }
    }
}

impl fmt::Display for PitchCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked pitch. Location is in feet, break in inches, velocity in mph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchRecord {
    pub pitch_no: Option<u32>,
    pub pitcher: Option<String>,
    pub pitch_type: PitchType,
    pub velocity_mph: f64,
    pub spin_rate_rpm: Option<f64>,
    pub plate_loc_side_ft: Option<f64>,
    pub plate_loc_height_ft: Option<f64>,
    pub horz_break_in: Option<f64>,
    pub induced_vert_break_in: Option<f64>,
    pub horz_approach_angle: Option<f64>,
    pub vert_approach_angle: Option<f64>,
    pub pitch_call: Option<PitchCall>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub source_file: String,
    pub session_date: Option<NaiveDate>,
}

impl PitchRecord {
    /// Attaches the originating file name and session date. Parsers leave both
    /// unset; ingestion fills them in once per file.
    pub fn with_source(mut self, source_file: &str, session_date: Option<NaiveDate>) -> Self {
        self.source_file = source_file.to_string();
        self.session_date = session_date.or(self.date);
        self
    }

    pub fn plate_location(&self) -> Option<(f64, f64)> {
        match (self.plate_loc_side_ft, self.plate_loc_height_ft) {
            (Some(side), Some(height)) => Some((side, height)),
            _ => None,
        }
    }

    pub fn movement(&self) -> Option<(f64, f64)> {
        match (self.horz_break_in, self.induced_vert_break_in) {
            (Some(hb), Some(ivb)) => Some((hb, ivb)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedPitchFile {
    pub parser: &'static str,
    pub records: Vec<PitchRecord>,
    /// Rows dropped because the pitch type or velocity cell was blank.
    pub skipped_rows: usize,
}
