// WHY: per-file processing and run statistics shared by the CLI and integration tests

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use crate::classifier::ParsedDocument;
use crate::incremental::{create_index_file_async, index_file_exists};
use crate::normalizer::{line_count, normalize};
use crate::reader::{AsyncFileReader, ReaderConfig};
use crate::scene_index::{IndexedScene, SceneIndexer};

/// What a run emits for each screenplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Full classified document (title, tokens, characters, scene list)
    #[default]
    Document,
    /// Indexed scenes with spans, locations and characters
    Scenes,
    /// Scene count only
    Count,
}

/// Settings for a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    pub mode: OutputMode,
    pub fail_fast: bool,
    pub overwrite_all: bool,
}

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileStats {
    pub path: String,
    /// Visual lines after normalization
    pub lines: u64,
    pub tokens: u64,
    pub scenes: u64,
    pub characters: u64,
    pub processing_time_ms: u64,
    /// success, skipped or failed
    pub status: String,
    pub error: Option<String>,
}

impl FileStats {
    /// Entry for a file that could not be processed
    pub fn failed(path: &Path, error: String) -> Self {
        Self::empty(path, "failed", Some(error))
    }

    fn empty(path: &Path, status: &str, error: Option<String>) -> Self {
        Self {
            path: path.display().to_string(),
            lines: 0,
            tokens: 0,
            scenes: 0,
            characters: 0,
            processing_time_ms: 0,
            status: status.to_string(),
            error,
        }
    }
}

/// Aggregate statistics written to `--stats-out`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RunStats {
    /// Seconds since the Unix epoch
    pub run_start: u64,
    pub total_processing_ms: u64,
    pub files_processed: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub files: Vec<FileStats>,
}

impl RunStats {
    pub fn start() -> Self {
        Self {
            run_start: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, stats: FileStats) {
        match stats.status.as_str() {
            "success" => self.files_processed += 1,
            "skipped" => self.files_skipped += 1,
            _ => self.files_failed += 1,
        }
        self.total_processing_ms += stats.processing_time_ms;
        self.files.push(stats);
    }
}

/// Render the JSON for one screenplay in the requested mode
pub fn render_output(indexer: &SceneIndexer, text: &str, mode: OutputMode) -> Result<String> {
    let json = match mode {
        OutputMode::Document => serde_json::to_string_pretty(&indexer.parser().parse(text))?,
        OutputMode::Scenes => serde_json::to_string_pretty(&indexer.index_scenes(text))?,
        OutputMode::Count => serde_json::to_string_pretty(&serde_json::json!({
            "scenes": indexer.count_scenes(text),
        }))?,
    };
    Ok(json)
}

fn serialize_output(mode: OutputMode, document: &ParsedDocument, scenes: &[IndexedScene]) -> Result<String> {
    let json = match mode {
        OutputMode::Document => serde_json::to_string_pretty(document)?,
        OutputMode::Scenes => serde_json::to_string_pretty(scenes)?,
        OutputMode::Count => serde_json::to_string_pretty(&serde_json::json!({ "scenes": scenes.len() }))?,
    };
    Ok(json)
}

/// Read, index and write the sidecar for one screenplay
/// Without fail_fast, a failure is returned as a `failed` entry instead of an error
pub async fn process_file(indexer: &SceneIndexer, path: &Path, config: &BatchConfig) -> Result<FileStats> {
    if !config.overwrite_all && index_file_exists(path) {
        info!("Skipping {}: index already present", path.display());
        return Ok(FileStats::empty(path, "skipped", None));
    }

    let start_time = Instant::now();
    let reader = AsyncFileReader::new(ReaderConfig {
        fail_fast: config.fail_fast,
        ..Default::default()
    });
    let (text, read_stats) = reader.read_screenplay(path).await?;
    if let Some(error) = read_stats.read_error {
        return Ok(FileStats::failed(path, error));
    }

    let document = indexer.parser().parse(&text);
    let scenes = indexer.index_document(&document);
    let output = serialize_output(config.mode, &document, &scenes)?;

    if let Err(e) = create_index_file_async(path, &output).await {
        let error_msg = format!("Failed to write index for {}: {}", path.display(), e);
        warn!("{}", error_msg);
        if config.fail_fast {
            return Err(anyhow::anyhow!(error_msg));
        }
        return Ok(FileStats::failed(path, error_msg));
    }

    let stats = FileStats {
        path: path.display().to_string(),
        lines: line_count(&normalize(&text)) as u64,
        tokens: document.tokens.len() as u64,
        scenes: scenes.len() as u64,
        characters: document.characters.len() as u64,
        processing_time_ms: start_time.elapsed().as_millis() as u64,
        status: "success".to_string(),
        error: None,
    };
    info!(
        path = %stats.path,
        tokens = stats.tokens,
        scenes = stats.scenes,
        "Indexed screenplay"
    );
    Ok(stats)
}

/// Write run statistics as pretty JSON
pub async fn write_stats_file(stats_path: &Path, stats: &RunStats) -> Result<()> {
    let content = serde_json::to_string_pretty(stats)?;
    tokio::fs::write(stats_path, content)
        .await
        .with_context(|| format!("Failed to write stats file {}", stats_path.display()))?;
    Ok(())
}
