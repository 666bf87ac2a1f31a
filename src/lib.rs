pub mod batch;
pub mod classifier;
pub mod discovery;
pub mod element;
pub mod incremental;
pub mod live;
pub mod normalizer;
pub mod reader;
pub mod scene_index;

// Re-export the core contracts for convenient access
pub use classifier::{ClassifierRules, ParsedDocument, SceneRef, ScreenplayParser, TitleMetadata, Token};
pub use element::ElementType;
pub use live::{cycle_element_type, next_element_type};
pub use normalizer::{normalize, normalize_into};
pub use scene_index::{HeadingParts, IndexedScene, SceneIndexer};

// Re-export incremental processing utilities
pub use incremental::{create_index_file, generate_index_path, index_file_exists, read_index_file};
