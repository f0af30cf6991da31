use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;
use pitchreport_core::{FileInput, ReportConfig, ReportOptions};
use tracing::{debug, warn};

/// Input selection shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// CSV files or glob patterns (e.g. "sessions/*.csv")
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Only include pitches thrown by this pitcher
    #[arg(long)]
    pub pitcher: Option<String>,

    /// Only include this session date (YYYY-MM-DD); repeatable
    #[arg(long = "date", value_name = "YYYY-MM-DD")]
    pub dates: Vec<NaiveDate>,

    /// Config file; falls back to $PITCHREPORT_CONFIG, then ./pitchreport.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug)]
pub struct LoadedFile {
    pub name: String,
    pub contents: Vec<u8>,
}

/// Files read from disk plus the options for this run.
#[derive(Debug)]
pub struct PreparedRun {
    pub options: ReportOptions,
    pub files: Vec<LoadedFile>,
}

impl PreparedRun {
    pub fn inputs(&self) -> Vec<FileInput<'_>> {
        self.files
            .iter()
            .map(|file| FileInput {
                name: &file.name,
                contents: &file.contents,
            })
            .collect()
    }
}

pub fn prepare_run(args: &InputArgs) -> Result<PreparedRun> {
    let config = ReportConfig::load(args.config.as_deref()).context("Failed to load config")?;
    let options = apply_overrides(ReportOptions::from_config(&config), args);
    let paths = expand_patterns(&args.files)?;
    let files = read_files(&paths, config.limits.max_file_bytes)?;
    Ok(PreparedRun { options, files })
}

/// Command-line filters replace the ones from the config file.
fn apply_overrides(mut options: ReportOptions, args: &InputArgs) -> ReportOptions {
    if let Some(pitcher) = &args.pitcher {
        options.filter.pitcher = Some(pitcher.clone());
    }
    if !args.dates.is_empty() {
        options.filter.dates = args.dates.clone();
    }
    options
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expands glob patterns in order; a path listed twice is read once.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for pattern in patterns {
        if !is_glob(pattern) {
            let path = PathBuf::from(pattern);
            if !path.is_file() {
                bail!("Input file not found: {}", path.display());
            }
            if seen.insert(path.clone()) {
                paths.push(path);
            }
            continue;
        }

        let mut matched = 0usize;
        for entry in glob::glob(pattern).with_context(|| format!("Invalid pattern '{pattern}'"))? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "Could not read path from glob pattern");
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            matched += 1;
            if seen.insert(path.clone()) {
                paths.push(path);
            }
        }
        if matched == 0 {
            bail!("Pattern '{pattern}' matched no files");
        }
    }

    Ok(paths)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn read_files(paths: &[PathBuf], max_file_bytes: u64) -> Result<Vec<LoadedFile>> {
    paths
        .iter()
        .map(|path| {
            let size = std::fs::metadata(path)
                .with_context(|| format!("Failed to stat {}", path.display()))?
                .len();
            if size > max_file_bytes {
                bail!(
                    "{} is {} bytes, over the {} byte upload limit",
                    path.display(),
                    size,
                    max_file_bytes
                );
            }
            let contents = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            debug!(file = %path.display(), bytes = size, "Read input file");
            Ok(LoadedFile {
                name: display_name(path),
                contents,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).expect("write temp file");
        path
    }

    #[test]
    fn expands_globs_and_literal_paths_once() {
        let dir = tempfile::tempdir().expect("temp dir");
        let a = touch(dir.path(), "a_3_15_24.csv", "x");
        touch(dir.path(), "b_3_16_24.csv", "y");
        touch(dir.path(), "notes.txt", "z");

        let pattern = dir.path().join("*.csv").display().to_string();
        let literal = a.display().to_string();
        let paths = expand_patterns(&[literal, pattern]).expect("expand");

        let names: Vec<String> = paths.iter().map(|p| display_name(p)).collect();
        assert_eq!(names, ["a_3_15_24.csv", "b_3_16_24.csv"]);
    }

    #[test]
    fn empty_glob_and_missing_file_are_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let pattern = dir.path().join("*.csv").display().to_string();
        assert!(expand_patterns(&[pattern]).is_err());

        let missing = dir.path().join("nope.csv").display().to_string();
        assert!(expand_patterns(&[missing]).is_err());
    }

    #[test]
    fn oversized_files_are_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = touch(dir.path(), "big.csv", "0123456789");

        assert!(read_files(&[path.clone()], 5).is_err());
        let files = read_files(&[path], 10).expect("within limit");
        assert_eq!(files[0].name, "big.csv");
        assert_eq!(files[0].contents, b"0123456789");
    }

    #[test]
    fn cli_filters_override_config() {
        let mut options = ReportOptions::default();
        options.filter.pitcher = Some("From Config".to_string());

        let args = InputArgs {
            pitcher: Some("Smith, John".to_string()),
            dates: vec![NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()],
            ..InputArgs::default()
        };
        let options = apply_overrides(options, &args);
        assert_eq!(options.filter.pitcher.as_deref(), Some("Smith, John"));
        assert_eq!(options.filter.dates.len(), 1);

        let untouched = apply_overrides(ReportOptions::default(), &InputArgs::default());
        assert!(untouched.filter.is_empty());
    }
}
