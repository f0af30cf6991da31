#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use pitchreport_core::{FileInput, RenderOptions, ReportOptions};

pub fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../pitchreport-parser/tests/data")
        .join(name);
    fs::read(&path).unwrap_or_else(|err| panic!("failed to read fixture {}: {}", path.display(), err))
}

pub fn input<'a>(name: &'a str, contents: &'a [u8]) -> FileInput<'a> {
    FileInput { name, contents }
}

/// Half-size render keeps the image tests quick.
pub fn small_options() -> ReportOptions {
    ReportOptions {
        render: RenderOptions {
            width: 850,
            height: 650,
        },
        ..ReportOptions::default()
    }
}
