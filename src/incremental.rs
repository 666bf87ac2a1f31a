// WHY: sidecar index files let repeated runs skip screenplays already indexed
// Provides helpers for sidecar paths and writes used by CLI and tests

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix appended to the full source file name
pub const INDEX_FILE_SUFFIX: &str = "_slugline.json";

/// Generate sidecar index path from source file path
/// The extension stays in the name so `pilot.fountain` and `pilot.spmd` get separate sidecars
pub fn generate_index_path(source_path: &Path) -> PathBuf {
    let mut index_path = source_path.to_path_buf();
    let file_name = index_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    index_path.set_file_name(format!("{file_name}{INDEX_FILE_SUFFIX}"));
    index_path
}

/// Check if a sidecar index exists for given source file
pub fn index_file_exists<P: AsRef<Path>>(source_path: P) -> bool {
    generate_index_path(source_path.as_ref()).exists()
}

/// Read sidecar index content for given source file
///
/// # Example
/// ```no_run
/// use slugline::incremental::read_index_file;
/// let content = read_index_file("path/to/pilot.fountain").expect("Failed to read index file");
/// ```
pub fn read_index_file<P: AsRef<Path>>(source_path: P) -> Result<String, io::Error> {
    fs::read_to_string(generate_index_path(source_path.as_ref()))
}

/// Create a complete sidecar index file (with trailing newline) for given source
///
/// # Example
/// ```no_run
/// use slugline::incremental::create_index_file;
/// create_index_file("path/to/pilot.fountain", "[]").expect("Failed to create index file");
/// ```
pub fn create_index_file<P: AsRef<Path>>(source_path: P, content: &str) -> Result<PathBuf, io::Error> {
    let index_path = generate_index_path(source_path.as_ref());
    fs::write(&index_path, with_trailing_newline(content))?;
    Ok(index_path)
}

/// Async variant of [`create_index_file`]
pub async fn create_index_file_async<P: AsRef<Path>>(source_path: P, content: &str) -> Result<PathBuf, io::Error> {
    let index_path = generate_index_path(source_path.as_ref());
    tokio::fs::write(&index_path, with_trailing_newline(content)).await?;
    Ok(index_path)
}

fn with_trailing_newline(content: &str) -> String {
    if content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{content}\n")
    }
}
