mod common;

use pitchreport_core::frame::{export_summaries, ExportFormat, SUMMARY_COLUMNS};
use pitchreport_core::{
    generate_report, prepare_report, render_report, ErrorKind, RenderError, RenderOptions,
    ReportError, ReportOptions,
};

use common::{fixture, input, small_options};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[test]
fn renders_a_png_of_the_requested_size() {
    let bullpen = fixture("bullpen_3_15_24.csv");
    let options = small_options();
    let png = generate_report(&[input("bullpen_3_15_24.csv", &bullpen)], &options)
        .expect("report should render");

    assert!(png.starts_with(&PNG_SIGNATURE));
    let decoded = image::load_from_memory(&png).expect("valid png");
    assert_eq!(decoded.width(), 850);
    assert_eq!(decoded.height(), 650);

    // something other than the background was drawn
    let rgb = decoded.to_rgb8();
    assert!(rgb.pixels().any(|pixel| pixel.0 != [255, 255, 255]));
}

#[test]
fn identical_input_renders_identical_bytes() {
    let bullpen = fixture("bullpen_3_15_24.csv");
    let session = fixture("session_04_02_2024.csv");
    let inputs = [
        input("bullpen_3_15_24.csv", &bullpen),
        input("session_04_02_2024.csv", &session),
    ];
    let options = small_options();

    let first = generate_report(&inputs, &options).expect("first render");
    let second = generate_report(&inputs, &options).expect("second render");
    assert_eq!(first, second);
}

#[test]
fn default_size_renders() {
    let csv = b"TaggedPitchType,RelSpeed\nFastball,92\nFastball,94\nCurveball,78\n";
    let data = prepare_report(&[input("inline.csv", csv)], &ReportOptions::default())
        .expect("report data");
    let png = render_report(&data, &RenderOptions::default()).expect("render");
    let decoded = image::load_from_memory(&png).expect("valid png");
    assert_eq!((decoded.width(), decoded.height()), (1700, 1300));
}

#[test]
fn empty_summaries_are_refused() {
    let csv = b"TaggedPitchType,RelSpeed\nFastball,92\n";
    let mut data = prepare_report(&[input("inline.csv", csv)], &ReportOptions::default())
        .expect("report data");
    data.summaries.clear();

    let err = render_report(&data, &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, RenderError::NoSummaries));
}

#[test]
fn tiny_images_are_refused() {
    let csv = b"TaggedPitchType,RelSpeed\nFastball,92\n";
    let mut options = ReportOptions::default();
    options.render = RenderOptions {
        width: 100,
        height: 80,
    };

    let err = generate_report(&[input("inline.csv", csv)], &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Render);
    assert!(matches!(
        err,
        ReportError::Render(RenderError::InvalidDimensions {
            width: 100,
            height: 80
        })
    ));
}

#[test]
fn oversized_images_are_refused_before_allocating() {
    let csv = b"TaggedPitchType,RelSpeed\nFastball,92\n";
    let data = prepare_report(&[input("inline.csv", csv)], &ReportOptions::default())
        .expect("report data");

    let options = RenderOptions {
        width: 100_000,
        height: 100,
    };
    let err = render_report(&data, &options).unwrap_err();
    assert!(matches!(
        err,
        RenderError::InvalidDimensions {
            width: 100_000,
            height: 100
        }
    ));
}

/// One pitch per type, with plate locations so every chart draws.
fn arsenal_csv(types: &[&str]) -> Vec<u8> {
    let mut csv = String::from(
        "TaggedPitchType,RelSpeed,InducedVertBreak,HorzBreak,PlateLocSide,PlateLocHeight\n",
    );
    for (index, name) in types.iter().enumerate() {
        let step = index as f64;
        csv.push_str(&format!(
            "{name},{:.1},{:.1},{:.1},{:.2},{:.2}\n",
            95.0 - 2.0 * step,
            18.0 - 4.0 * step,
            -10.0 + 3.0 * step,
            -0.6 + 0.2 * step,
            1.8 + 0.3 * step,
        ));
    }
    csv.into_bytes()
}

#[test]
fn every_pitch_type_reaches_the_image() {
    let base = [
        "Fastball", "Sinker", "Cutter", "Slider", "Curveball", "Changeup",
    ];
    let with = |last: &str| {
        let mut types = base.to_vec();
        types.push(last);
        arsenal_csv(&types)
    };
    let splitter = with("Splitter");
    let knuckleball = with("Knuckleball");

    for options in [ReportOptions::default(), small_options()] {
        let first = generate_report(&[input("arsenal.csv", &splitter)], &options)
            .expect("seven pitch types render");
        let second = generate_report(&[input("arsenal.csv", &knuckleball)], &options)
            .expect("seven pitch types render");
        assert_ne!(first, second, "the seventh pitch type must be drawn");
    }

    let data = prepare_report(&[input("arsenal.csv", &splitter)], &ReportOptions::default())
        .expect("report data");
    assert_eq!(data.summaries.len(), 7);
}

#[test]
fn twelve_pitch_types_render_at_default_size() {
    let names = [
        "Fastball", "Sinker", "Cutter", "Slider", "Sweeper", "Curveball", "Knuckle Curve",
        "Slurve", "Changeup", "Splitter", "Forkball", "Knuckleball",
    ];
    let csv = arsenal_csv(&names);
    let png = generate_report(&[input("arsenal.csv", &csv)], &ReportOptions::default())
        .expect("twelve pitch types render");
    let decoded = image::load_from_memory(&png).expect("valid png");
    assert_eq!((decoded.width(), decoded.height()), (1700, 1300));
}

#[test]
fn parse_failure_produces_no_image() {
    let missing = fixture("missing_velocity.csv");
    let err = generate_report(&[input("missing_velocity.csv", &missing)], &small_options())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn exports_json_and_parquet() {
    let bullpen = fixture("bullpen_3_15_24.csv");
    let data = prepare_report(&[input("bullpen_3_15_24.csv", &bullpen)], &ReportOptions::default())
        .expect("report data");

    let mut json = Vec::new();
    export_summaries(&data, ExportFormat::Json, &mut json).expect("json export");
    let value: serde_json::Value = serde_json::from_slice(&json).expect("valid json");
    assert_eq!(value["title"], "Smith, John");
    assert_eq!(value["summaries"][0]["pitch_type"], "Fastball");
    assert_eq!(value["summaries"][0]["count"], 3);
    assert!(value["summaries"][0].get("points").is_none());

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("summary.parquet");
    let file = std::fs::File::create(&path).expect("create parquet");
    export_summaries(&data, ExportFormat::Parquet, file).expect("parquet export");
    let bytes = std::fs::read(&path).expect("read parquet");
    assert!(bytes.starts_with(b"PAR1"));
    assert!(bytes.ends_with(b"PAR1"));

    let frame = pitchreport_core::frame::summaries_to_dataframe(&data.summaries).expect("frame");
    assert_eq!(frame.height(), 3);
    assert_eq!(frame.width(), SUMMARY_COLUMNS.len());
}
