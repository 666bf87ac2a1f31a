use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{info, warn};

use slugline::batch::{self, BatchConfig, FileStats, OutputMode, RunStats};
use slugline::discovery::{self, DiscoveryConfig};
use slugline::reader::read_file_async;
use slugline::{ClassifierRules, SceneIndexer};

#[derive(Parser, Debug)]
#[command(name = "slugline")]
#[command(about = "Classify screenplay markup into line-aligned elements and index its scenes")]
#[command(version)]
struct Args {
    /// Screenplay file, or directory scanned for *.fountain, *.spmd and *.screenplay files
    input: PathBuf,

    /// What to emit for each screenplay
    #[arg(long, value_enum, default_value_t = OutputMode::Document)]
    mode: OutputMode,

    /// Print JSON for a single input file instead of writing a sidecar index
    #[arg(long)]
    stdout: bool,

    /// Overwrite existing sidecar index files
    #[arg(long)]
    overwrite_all: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Additional all-caps term never treated as a character cue (repeatable)
    #[arg(long = "extra-stop", value_name = "TERM")]
    extra_stop: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stderr keeps stdout clean for --stdout JSON
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    if !args.input.exists() {
        anyhow::bail!("Input path does not exist: {}", args.input.display());
    }

    let rules = ClassifierRules {
        extra_stoplist: args.extra_stop.clone(),
        ..Default::default()
    };
    let indexer = SceneIndexer::new(rules)?;

    if args.stdout {
        if !args.input.is_file() {
            anyhow::bail!("--stdout requires a single input file: {}", args.input.display());
        }
        let text = read_file_async(&args.input).await?;
        println!("{}", batch::render_output(&indexer, &text, args.mode)?);
        return Ok(());
    }

    let mut run_stats = RunStats::start();

    let files = if args.input.is_dir() {
        let discovered = discovery::collect_discovered_files(
            &args.input,
            DiscoveryConfig { fail_fast: args.fail_fast },
        )
        .await?;
        let mut files = Vec::with_capacity(discovered.len());
        for file in discovered {
            match file.error {
                Some(error) => {
                    warn!("Skipping {}: {}", file.path.display(), error);
                    run_stats.record(FileStats::failed(&file.path, error));
                }
                None => files.push(file.path),
            }
        }
        files
    } else {
        vec![args.input.clone()]
    };

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);
        bar
    };

    let config = BatchConfig {
        mode: args.mode,
        fail_fast: args.fail_fast,
        overwrite_all: args.overwrite_all,
    };

    for path in &files {
        progress.set_message(path.display().to_string());
        let stats = batch::process_file(&indexer, path, &config)
            .await
            .with_context(|| format!("Failed to process {}", path.display()))?;
        run_stats.record(stats);
        progress.inc(1);
    }
    progress.finish_and_clear();

    println!("slugline v{} - indexing complete", env!("CARGO_PKG_VERSION"));
    println!("  Indexed: {} files", run_stats.files_processed);
    println!("  Skipped: {} files", run_stats.files_skipped);
    if run_stats.files_failed > 0 {
        println!("  Failed: {} files", run_stats.files_failed);
    }

    if let Some(stats_path) = &args.stats_out {
        batch::write_stats_file(stats_path, &run_stats).await?;
        info!("Wrote run statistics to {}", stats_path.display());
    }

    Ok(())
}
