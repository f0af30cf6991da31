use std::collections::HashSet;

use blake3::Hasher;
use pitchreport_parser::{parse_pitch_file, PitchRecord};
use tracing::{debug, info, warn};

use crate::error::{ReportError, Result};
use crate::session::extract_session_date;

#[derive(Debug)]
pub struct FileInput<'a> {
    pub name: &'a str,
    pub contents: &'a [u8],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Duplicate,
    Parsed,
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub name: String,
    pub hash: String,
    pub status: FileStatus,
    pub parser: Option<&'static str>,
    pub record_count: usize,
    pub skipped_rows: usize,
}

/// Unified table of every pitch loaded in one invocation.
#[derive(Debug, Clone, Default)]
pub struct PitchTable {
    pub records: Vec<PitchRecord>,
    pub reports: Vec<FileReport>,
}

impl PitchTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn skipped_rows(&self) -> usize {
        self.reports.iter().map(|report| report.skipped_rows).sum()
    }
}

/// Parses every input into one table. The first file that fails to decode or
/// parse aborts the whole load; byte-identical files are loaded once.
pub fn load_files(inputs: &[FileInput<'_>]) -> Result<PitchTable> {
    let mut table = PitchTable::default();
    let mut seen_hashes = HashSet::new();

    for input in inputs {
        let hash = compute_hash(input.contents);
        if !seen_hashes.insert(hash.clone()) {
            warn!(file = input.name, "skipping duplicate upload");
            table.reports.push(FileReport {
                name: input.name.to_string(),
                hash,
                status: FileStatus::Duplicate,
                parser: None,
                record_count: 0,
                skipped_rows: 0,
            });
            continue;
        }

        let content = std::str::from_utf8(input.contents).map_err(|_| ReportError::InvalidUtf8 {
            file: input.name.to_string(),
        })?;

        let parsed = parse_pitch_file(content).map_err(|source| ReportError::Parse {
            file: input.name.to_string(),
            source,
        })?;

        if parsed.skipped_rows > 0 {
            warn!(
                file = input.name,
                skipped = parsed.skipped_rows,
                "dropped rows without pitch type or velocity"
            );
        }

        let session_date = extract_session_date(input.name);
        let record_count = parsed.records.len();
        debug!(
            file = input.name,
            parser = parsed.parser,
            records = record_count,
            session_date = ?session_date,
            "parsed pitch file"
        );

        table.records.extend(
            parsed
                .records
                .into_iter()
                .map(|record| record.with_source(input.name, session_date)),
        );
        table.reports.push(FileReport {
            name: input.name.to_string(),
            hash,
            status: FileStatus::Parsed,
            parser: Some(parsed.parser),
            record_count,
            skipped_rows: parsed.skipped_rows,
        });
    }

    info!(
        files = inputs.len(),
        records = table.len(),
        "loaded pitch files"
    );
    Ok(table)
}

fn compute_hash(contents: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents);
    let hash = hasher.finalize();
    hash.to_hex().to_string()
}
