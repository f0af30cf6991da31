use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pitchreport_core::frame::{export_summaries, ExportFormat};
use pitchreport_core::prepare_report;
use tracing::info;

use crate::inputs::{prepare_run, InputArgs};

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Output file; the extension picks the format (.parquet or .json)
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn handle_export(args: ExportArgs) -> Result<()> {
    let format = ExportFormat::from_path(&args.output)?;
    let run = prepare_run(&args.inputs)?;
    let data = prepare_report(&run.inputs(), &run.options).context("Failed to summarize")?;

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    export_summaries(&data, format, &mut writer)?;
    writer.flush()?;

    info!(
        output = %args.output.display(),
        format = ?format,
        pitch_types = data.summaries.len(),
        "Summaries exported"
    );
    Ok(())
}
