pub mod aggregation;
pub mod config;
pub mod error;
pub mod filters;
pub mod frame;
pub mod ingestion;
pub mod pipeline;
pub mod render;
pub mod session;

pub use aggregation::{
    aggregate, build_report_data, summarize_outing, NumericSummary, OverallSummary, PitchPoint,
    PitchTypeSummary, ReportData, StrikeZone,
};
pub use config::ReportConfig;
pub use error::{AggregationError, ErrorKind, RenderError, ReportError, Result};
pub use filters::{ReportFilter, Selections};
pub use ingestion::{load_files, FileInput, FileReport, FileStatus, PitchTable};
pub use pipeline::{generate_report, prepare_report, report_from_table, ReportOptions};
pub use render::{render_report, RenderOptions};
pub use session::SessionWindow;

pub use pitchreport_parser::{PitchCall, PitchRecord, PitchType};
