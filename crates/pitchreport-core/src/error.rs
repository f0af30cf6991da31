// crates/pitchreport-core/src/error.rs

use pitchreport_parser::ParserError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::frame::ExportError;

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("no pitch records to summarize")]
    EmptyTable,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("no pitch type summaries to render")]
    NoSummaries,

    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("{count} pitch types do not fit the report table (at most {max} at this size)")]
    TooManyPitchTypes { count: usize, max: usize },

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to parse '{file}': {source}")]
    Parse {
        file: String,
        #[source]
        source: ParserError,
    },

    #[error("'{file}' is not valid UTF-8")]
    InvalidUtf8 { file: String },

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("summary export failed: {0}")]
    Export(#[from] ExportError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`ReportError`] for callers that only need to
/// pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Aggregation,
    Render,
    Other,
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::Parse { .. } | ReportError::InvalidUtf8 { .. } => ErrorKind::Parse,
            ReportError::Aggregation(_) => ErrorKind::Aggregation,
            ReportError::Render(_) => ErrorKind::Render,
            ReportError::Export(_) | ReportError::Config(_) | ReportError::Io(_) => {
                ErrorKind::Other
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
