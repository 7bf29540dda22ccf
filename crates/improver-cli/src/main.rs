//! Improver CLI
//!
//! The `improver` command walks an improvement bundle through the fixed
//! improvement sequence and reports progress.
//!
//! ## Commands
//!
//! - `run`: run the agent against a bundle file
//! - `plan`: show the step budget and the areas that would run
//! - `areas`: list the recognized improvement area keys

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use improver_core::{
    ImproveAgent, ImprovementArea, ImprovementBundle, JsonLinesSink, ProgressFormat, RunSummary,
    TracingSink,
};
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "improver")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Progress-tracked improvement agent", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the improvement process for a bundle
    Run {
        /// Path to the improvement bundle (JSON)
        #[arg(env = "IMPROVER_BUNDLE")]
        bundle: PathBuf,

        /// Write progress as newline-delimited JSON events to stdout
        #[arg(long)]
        events: bool,

        /// Use ASCII markers instead of Unicode symbols
        #[arg(long)]
        ascii: bool,
    },

    /// Show the step budget and selected areas without running
    Plan {
        /// Path to the improvement bundle (JSON)
        #[arg(env = "IMPROVER_BUNDLE")]
        bundle: PathBuf,
    },

    /// List recognized improvement areas
    Areas,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    improver_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Run {
            bundle,
            events,
            ascii,
        } => cmd_run(&bundle, events, ascii).await,
        Commands::Plan { bundle } => cmd_plan(&bundle).await,
        Commands::Areas => {
            for area in ImprovementArea::ALL {
                println!("{}", area);
            }
            Ok(())
        }
    }
}

async fn read_bundle(path: &Path) -> Result<ImprovementBundle> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .context(format!("Failed to read bundle file: {:?}", path))?;
    ImprovementBundle::from_json_str(&raw).context(format!("Failed to parse bundle: {:?}", path))
}

/// Run the agent for a bundle file
async fn cmd_run(path: &Path, events: bool, ascii: bool) -> Result<()> {
    let bundle = read_bundle(path).await?;
    let format = if ascii {
        ProgressFormat::ascii()
    } else {
        ProgressFormat::unicode()
    };

    if events {
        let stdout = std::io::stdout();
        run_streaming(bundle, format, stdout.lock())?;
        return Ok(());
    }

    let summary = ImproveAgent::new(bundle, TracingSink)
        .with_format(format)
        .run()
        .context("Improvement process failed")?;

    info!(run_id = %summary.run_id, duration_ms = summary.duration_ms, "Run complete");
    println!(
        "Run {} completed: {} area(s), {} step(s) logged",
        summary.run_id,
        summary.areas_completed.len(),
        summary.steps_logged
    );
    Ok(())
}

/// Run the agent, writing the JSON event stream to `writer`.
///
/// The stream always ends with a `complete` or `error` event.
fn run_streaming<W: Write>(
    bundle: ImprovementBundle,
    format: ProgressFormat,
    writer: W,
) -> Result<RunSummary> {
    let mut sink = JsonLinesSink::new(writer);
    let outcome = ImproveAgent::new(bundle, &mut sink)
        .with_format(format)
        .run();

    match outcome {
        Ok(summary) => {
            sink.complete().context("Failed to write completion event")?;
            Ok(summary)
        }
        Err(fault) => {
            if let Err(e) = sink.fail(fault.to_string()) {
                warn!(error = %e, "Failed to write error event");
            }
            Err(anyhow::Error::new(fault).context("Improvement process failed"))
        }
    }
}

/// Show what a run would do
async fn cmd_plan(path: &Path) -> Result<()> {
    let bundle = read_bundle(path).await?;
    for line in plan_lines(&bundle) {
        println!("{}", line);
    }
    Ok(())
}

fn plan_lines(bundle: &ImprovementBundle) -> Vec<String> {
    let areas = bundle.areas();
    let mut lines = vec![
        format!("Repository:  {}", bundle.repository.full_name),
        format!("Total steps: {}", 1 + areas.selected_count()),
    ];

    let selected: Vec<ImprovementArea> = ImprovementArea::ALL
        .into_iter()
        .filter(|area| areas.is_selected(*area))
        .collect();

    if selected.is_empty() {
        lines.push("No improvement areas selected".to_string());
    } else {
        lines.push("Areas (run order):".to_string());
        for (i, area) in selected.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, area));
        }
    }
    lines
}
