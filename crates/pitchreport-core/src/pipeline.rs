use tracing::info;

use crate::aggregation::{build_report_data, ReportData, StrikeZone};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::filters::ReportFilter;
use crate::ingestion::{load_files, FileInput, PitchTable};
use crate::render::{render_report, RenderOptions};

/// Everything one report run needs besides the input files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportOptions {
    pub filter: ReportFilter,
    pub zone: StrikeZone,
    pub render: RenderOptions,
}

impl ReportOptions {
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            filter: config.report_filter(),
            zone: config.strike_zone(),
            render: config.render_options(),
        }
    }

    pub fn with_filter(mut self, filter: ReportFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Loads, filters and aggregates; stops at the first failing step.
pub fn prepare_report(inputs: &[FileInput<'_>], options: &ReportOptions) -> Result<ReportData> {
    let table = load_files(inputs)?;
    report_from_table(&table, options)
}

/// Filters and aggregates an already loaded table.
pub fn report_from_table(table: &PitchTable, options: &ReportOptions) -> Result<ReportData> {
    let records = options.filter.apply(&table.records);
    if !options.filter.is_empty() {
        info!(
            kept = records.len(),
            dropped = table.len() - records.len(),
            "Applied report filter"
        );
    }

    let title = options.filter.title(&records);
    let data = build_report_data(&records, title, &options.zone)?;
    info!(
        title = %data.title,
        pitches = data.overall.total_pitches,
        pitch_types = data.summaries.len(),
        window = %data.window,
        "Aggregated report data"
    );
    Ok(data)
}

/// Full run from raw uploads to PNG bytes.
pub fn generate_report(inputs: &[FileInput<'_>], options: &ReportOptions) -> Result<Vec<u8>> {
    let data = prepare_report(inputs, options)?;
    let png = render_report(&data, &options.render)?;
    Ok(png)
}
