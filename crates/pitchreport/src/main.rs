use anyhow::Result;
use clap::{Parser, Subcommand};
use pitchreport_core::ReportError;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod commands;
mod inputs;

use commands::export::{handle_export, ExportArgs};
use commands::render::{handle_render, RenderArgs};
use commands::summarize::{handle_summarize, SummarizeArgs};

/// Pitching session reports from pitch-tracking CSV exports.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the PNG report
    Render(RenderArgs),
    /// Print the per-pitch-type summary table
    Summarize(SummarizeArgs),
    /// Write the summaries to .parquet or .json
    Export(ExportArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let result = match cli.command {
        Command::Render(args) => handle_render(args),
        Command::Summarize(args) => handle_summarize(args),
        Command::Export(args) => handle_export(args),
    };

    if let Err(err) = &result {
        if let Some(report_err) = err.downcast_ref::<ReportError>() {
            error!(kind = ?report_err.kind(), "report failed");
        }
    }
    result
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
