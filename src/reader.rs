use anyhow::Result;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, info, warn};

/// Configuration for file reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics for file reading operations
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// Async reader that loads whole screenplay files
/// WHY: line endings are left untouched; the normalizer owns CR/CRLF handling
pub struct AsyncFileReader {
    config: ReaderConfig,
}

impl AsyncFileReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a file into a string with async buffered I/O
    /// Without fail_fast, errors are reported through `ReadStats::read_error` and an empty string
    pub async fn read_screenplay<P: AsRef<Path>>(&self, file_path: P) -> Result<(String, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting async read of file: {}", path.display());

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                let error_msg = format!("Failed to open file {}: {}", path.display(), e);
                return self.failed(path, error_msg, start_time);
            }
        };

        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut content = String::new();
        if let Err(e) = reader.read_to_string(&mut content).await {
            // read_to_string rejects invalid UTF-8 as InvalidData
            let error_msg = format!("Failed to read {} as UTF-8: {}", path.display(), e);
            return self.failed(path, error_msg, start_time);
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read: content.lines().count() as u64,
            bytes_read: content.len() as u64,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: None,
        };

        info!(
            "Successfully read {}: {} lines, {} bytes in {}ms",
            path.display(),
            stats.lines_read,
            stats.bytes_read,
            stats.duration_ms
        );

        Ok((content, stats))
    }

    fn failed(&self, path: &Path, error_msg: String, start_time: std::time::Instant) -> Result<(String, ReadStats)> {
        warn!("{}", error_msg);
        if self.config.fail_fast {
            return Err(anyhow::anyhow!(error_msg));
        }
        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read: 0,
            bytes_read: 0,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: Some(error_msg),
        };
        Ok((String::new(), stats))
    }
}

/// Convenience function for reading a single file with default configuration
pub async fn read_file_async<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let reader = AsyncFileReader::new(ReaderConfig {
        fail_fast: true,
        ..Default::default()
    });
    let (content, _stats) = reader.read_screenplay(file_path).await?;
    Ok(content)
}
