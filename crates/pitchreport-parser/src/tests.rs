use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};

use crate::errors::ParserError;
use crate::formats::{PitchColumn, RapsodoCsvParser, TrackmanCsvParser};
use crate::model::{ParsedPitchFile, PitchCall, PitchType};
use crate::registry::PitchFileParser;
use crate::{parse_pitch_file, parse_with_parsers};

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

#[test]
fn parses_full_bullpen_export() {
    let content = fixture("bullpen_3_15_24.csv");
    let parsed = parse_pitch_file(&content).expect("bullpen parse failed");

    assert_eq!(parsed.parser, "TRACKMAN_CSV");
    assert_eq!(parsed.records.len(), 6);
    assert_eq!(parsed.skipped_rows, 1);

    let first = &parsed.records[0];
    assert_eq!(first.pitch_no, Some(1));
    assert_eq!(first.pitcher.as_deref(), Some("Smith, John"));
    assert_eq!(first.pitch_type.as_str(), "Fastball");
    assert_eq!(first.velocity_mph, 92.1);
    assert_eq!(first.spin_rate_rpm, Some(2250.0));
    assert_eq!(first.plate_location(), Some((-0.3, 2.6)));
    assert_eq!(first.movement(), Some((-8.1, 17.2)));
    assert_eq!(first.vert_approach_angle, Some(-5.1));
    assert_eq!(first.horz_approach_angle, Some(1.2));
    assert_eq!(first.pitch_call, Some(PitchCall::StrikeCalled));
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 3, 15));
    assert!(first.time.is_some());
    assert!(first.source_file.is_empty());
    assert!(first.session_date.is_none());

    let changeup = &parsed.records[3];
    assert_eq!(changeup.pitch_call, Some(PitchCall::FoulBall));

    let sparse_slider = &parsed.records[5];
    assert_eq!(sparse_slider.pitch_type.as_str(), "Slider");
    assert_eq!(sparse_slider.spin_rate_rpm, None);
    assert_eq!(sparse_slider.plate_location(), None);
}

#[test]
fn tolerates_alias_headers_and_missing_optional_columns() {
    let content = fixture("session_04_02_2024.csv");
    let parsed = parse_pitch_file(&content).expect("alias parse failed");

    assert_eq!(parsed.records.len(), 4);
    assert_eq!(parsed.skipped_rows, 0);

    let curve = &parsed.records[1];
    assert_eq!(curve.pitch_type, PitchType::new("Curveball").unwrap());
    assert_eq!(curve.velocity_mph, 77.5);
    assert_eq!(curve.spin_rate_rpm, Some(2700.0));
    assert_eq!(curve.pitch_no, None);
    assert_eq!(curve.pitch_call, None);
    assert_eq!(curve.plate_location(), None);
    assert_eq!(curve.date, NaiveDate::from_ymd_opt(2024, 4, 2));

    assert_eq!(parsed.records[3].pitcher.as_deref(), Some("Doe, Jane"));
    assert_eq!(parsed.records[3].spin_rate_rpm, None);
}

#[test]
fn missing_velocity_column_is_reported() {
    let content = fixture("missing_velocity.csv");
    let err = parse_pitch_file(&content).expect_err("missing velocity must fail");

    match err {
        ParserError::MissingColumn { column, .. } => {
            assert_eq!(column, PitchColumn::Velocity.vendor_name());
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn non_numeric_velocity_names_the_line() {
    let content = fixture("bad_velocity.csv");
    let err = parse_pitch_file(&content).expect_err("non-numeric velocity must fail");

    match err {
        ParserError::DataRow {
            line_index,
            message,
            ..
        } => {
            assert_eq!(line_index, 3);
            assert!(message.contains("RelSpeed"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn unrelated_csv_matches_no_parser() {
    let content = fixture("not_pitch_data.csv");
    let err = parse_pitch_file(&content).expect_err("foreign file must fail");

    match err {
        ParserError::NoMatchingParser { attempts } => {
            let parsers: Vec<&str> = attempts.iter().map(|attempt| attempt.parser).collect();
            assert_eq!(parsers, ["TRACKMAN_CSV", "RAPSODO_CSV"]);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn empty_file_is_a_format_mismatch() {
    let err = TrackmanCsvParser.parse("").expect_err("empty content must fail");
    assert!(matches!(err, ParserError::FormatMismatch { .. }));
}

#[test]
fn header_only_file_yields_no_records() {
    let parsed = TrackmanCsvParser
        .parse("TaggedPitchType,RelSpeed\n")
        .expect("header-only parse failed");
    assert!(parsed.records.is_empty());
    assert_eq!(parsed.skipped_rows, 0);
}

#[test]
fn ragged_row_is_rejected() {
    let err = TrackmanCsvParser
        .parse("TaggedPitchType,RelSpeed\nFastball,92.0\nSlider\n")
        .expect_err("ragged row must fail");
    match err {
        ParserError::DataRow { line_index, .. } => assert_eq!(line_index, 3),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn row_errors_name_the_physical_line() {
    let blank_line = "TaggedPitchType,RelSpeed\n\nFastball,92\nFastball,fast\n";
    let quoted_span = "TaggedPitchType,RelSpeed,Notes\nFastball,92,\"two\nlines\"\nFastball,fast,x\n";

    for content in [blank_line, quoted_span] {
        match parse_pitch_file(content).expect_err("bad velocity must fail") {
            ParserError::DataRow { line_index, .. } => assert_eq!(line_index, 4, "{content:?}"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}

#[test]
fn parses_rapsodo_export() {
    let content = fixture("rapsodo_3_20_24.csv");
    let parsed = parse_pitch_file(&content).expect("rapsodo parse failed");

    assert_eq!(parsed.parser, "RAPSODO_CSV");
    assert_eq!(parsed.records.len(), 4);
    assert_eq!(parsed.skipped_rows, 1);

    let first = &parsed.records[0];
    assert_eq!(first.pitch_no, Some(1));
    assert_eq!(first.pitcher.as_deref(), Some("Smith, John"));
    assert_eq!(first.pitch_type.as_str(), "Fastball");
    assert_eq!(first.velocity_mph, 91.8);
    assert_eq!(first.spin_rate_rpm, Some(2240.0));
    assert_eq!(first.plate_location(), Some((-0.5, 2.5)));
    assert_eq!(first.movement(), Some((-7.9, 17.5)));
    assert_eq!(first.pitch_call, None);
    assert_eq!(first.vert_approach_angle, None);
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 3, 20));
    assert_eq!(first.time, NaiveTime::from_hms_opt(15, 2, 11));

    assert_eq!(parsed.records[1].plate_location(), Some((1.0, 4.0)));
    assert_eq!(parsed.records[3].pitch_type.as_str(), "Changeup");
    assert_eq!(parsed.records[3].plate_location(), None);
}

#[test]
fn rapsodo_row_errors_use_its_column_names() {
    let content = "\"Player Name:\",\"Doe, Jane\"\n\n\"No\",\"Pitch Type\",\"Velocity\"\n\"1\",\"Fastball\",\"fast\"\n";
    match parse_pitch_file(content).expect_err("bad velocity must fail") {
        ParserError::DataRow {
            parser,
            line_index,
            message,
        } => {
            assert_eq!(parser, "RAPSODO_CSV");
            assert_eq!(line_index, 4);
            assert!(message.contains("Velocity"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn rapsodo_requires_its_preamble() {
    let err = RapsodoCsvParser
        .parse("Pitch Type,Velocity\nFastball,92\n")
        .expect_err("bare header is not a rapsodo export");
    assert!(matches!(err, ParserError::FormatMismatch { .. }));

    let err = RapsodoCsvParser
        .parse("PitchNo,Pitcher\n1,Smith\n")
        .expect_err("foreign rows are not a preamble");
    assert!(matches!(err, ParserError::FormatMismatch { .. }));
}

struct AlwaysMismatch;

impl PitchFileParser for AlwaysMismatch {
    fn name(&self) -> &'static str {
        "ALWAYS_MISMATCH"
    }

    fn parse(&self, _content: &str) -> Result<ParsedPitchFile, ParserError> {
        Err(ParserError::FormatMismatch {
            parser: "ALWAYS_MISMATCH",
            reason: "never matches".to_string(),
        })
    }
}

#[test]
fn registry_falls_through_format_mismatches() {
    let content = fixture("session_04_02_2024.csv");
    let mismatch = AlwaysMismatch;
    let trackman = TrackmanCsvParser;
    let parsers: [&dyn PitchFileParser; 2] = [&mismatch, &trackman];

    let parsed = parse_with_parsers(&content, &parsers).expect("fallthrough parse failed");
    assert_eq!(parsed.parser, "TRACKMAN_CSV");
}

#[test]
fn registry_stops_at_first_hard_error() {
    let content = fixture("missing_velocity.csv");
    let mismatch = AlwaysMismatch;
    let trackman = TrackmanCsvParser;
    let parsers: [&dyn PitchFileParser; 2] = [&trackman, &mismatch];

    let err = parse_with_parsers(&content, &parsers).expect_err("hard error must surface");
    assert!(matches!(err, ParserError::MissingColumn { .. }));
}

#[test]
fn pitch_calls_classify_strikes() {
    assert!(PitchCall::parse("StrikeCalled").unwrap().is_strike());
    assert!(PitchCall::parse("FoulBallFieldable").unwrap().is_strike());
    assert!(PitchCall::parse("In Play").unwrap().is_strike());
    assert!(!PitchCall::parse("BallinDirt").unwrap().is_strike());
    assert!(!PitchCall::parse("HitByPitch").unwrap().is_strike());
    assert_eq!(PitchCall::parse("Undefined"), None);
    assert_eq!(
        PitchCall::parse("CatchersInterference"),
        Some(PitchCall::Other("CatchersInterference".to_string()))
    );
}
