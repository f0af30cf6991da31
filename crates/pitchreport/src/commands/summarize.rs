use anyhow::{Context, Result};
use clap::Args;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use pitchreport_core::{load_files, report_from_table, NumericSummary, ReportData, Selections};

use crate::inputs::{prepare_run, InputArgs};

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
}

pub fn handle_summarize(args: SummarizeArgs) -> Result<()> {
    let run = prepare_run(&args.inputs)?;
    let table = load_files(&run.inputs()).context("Failed to load pitch files")?;

    // printed before filtering so an empty selection still shows the choices
    println!("{}", selections_lines(&Selections::from_records(&table.records)));
    let data = report_from_table(&table, &run.options).context("Failed to summarize")?;

    println!();
    println!("{}  ({})", data.title, data.window);
    println!("{}", overall_line(&data));
    println!("{}", summary_table(&data));
    Ok(())
}

/// Values accepted by `--pitcher` and `--date`.
fn selections_lines(selections: &Selections) -> String {
    let join = |values: Vec<String>| {
        if values.is_empty() {
            "-".to_string()
        } else {
            values.join("; ")
        }
    };
    let dates = selections.dates.iter().map(ToString::to_string).collect();
    format!(
        "Pitchers: {}\nSession dates: {}",
        join(selections.pitchers.clone()),
        join(dates)
    )
}

fn pct(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}%"))
}

fn mean(summary: &Option<NumericSummary>, decimals: usize) -> String {
    summary
        .as_ref()
        .map_or_else(|| "-".to_string(), |s| format!("{:.*}", decimals, s.mean))
}

fn overall_line(data: &ReportData) -> String {
    let overall = &data.overall;
    format!(
        "Pitches: {}  Avg velo: {:.1}  Max velo: {:.1}  Min velo: {:.1}  PZR: {}  Strike: {}",
        overall.total_pitches,
        overall.avg_velocity,
        overall.max_velocity,
        overall.min_velocity,
        pct(overall.zone_rate),
        pct(overall.strike_rate),
    )
}

fn summary_table(data: &ReportData) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Pitch Type",
            "Count",
            "Velo",
            "Max Velo",
            "IVB",
            "HB",
            "Spin",
            "HAA",
            "VAA",
            "PZR%",
            "Strike%",
        ]);

    for summary in &data.summaries {
        let numbers = [
            summary.count.to_string(),
            format!("{:.1}", summary.velocity.mean),
            format!("{:.1}", summary.velocity.max),
            mean(&summary.induced_vert_break, 1),
            mean(&summary.horz_break, 1),
            mean(&summary.spin_rate, 0),
            mean(&summary.horz_approach_angle, 2),
            mean(&summary.vert_approach_angle, 2),
            pct(summary.zone_rate),
            pct(summary.strike_rate),
        ];
        let mut row = vec![Cell::new(summary.pitch_type.as_str())];
        row.extend(
            numbers
                .into_iter()
                .map(|value| Cell::new(value).set_alignment(CellAlignment::Right)),
        );
        table.add_row(row);
    }
    table
}
