use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pitchreport_core::generate_report;
use tracing::info;

use crate::inputs::{prepare_run, InputArgs};

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Where to write the PNG
    #[arg(short, long, default_value = "report.png")]
    pub output: PathBuf,

    /// Image width in pixels (overrides the config file)
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels (overrides the config file)
    #[arg(long)]
    pub height: Option<u32>,
}

pub fn handle_render(args: RenderArgs) -> Result<()> {
    let mut run = prepare_run(&args.inputs)?;
    if let Some(width) = args.width {
        run.options.render.width = width;
    }
    if let Some(height) = args.height {
        run.options.render.height = height;
    }

    let png = generate_report(&run.inputs(), &run.options).context("Failed to build report")?;
    std::fs::write(&args.output, &png)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        files = run.files.len(),
        bytes = png.len(),
        "Report written"
    );
    Ok(())
}
