// WHY: scenes as index ranges over the token arena
// Spans share the caller's line-index space, so navigation keys off them directly

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{ClassifierRules, ParsedDocument, ScreenplayParser};
use crate::element::ElementType;
use crate::normalizer::normalize;

/// One scene: a heading token and every token up to the next heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedScene {
    /// Derived from number and start index; changes when the text shifts
    pub id: String,
    /// 1-based, no gaps
    pub number: usize,
    pub heading: String,
    pub location: String,
    pub time_of_day: String,
    pub start_line_index: usize,
    /// Inclusive
    pub end_line_index: usize,
    /// Upper-cased names in order of first appearance
    pub characters: Vec<String>,
    /// Token texts of the span joined with `\n`
    pub content: String,
    /// Filled in by callers, never by the indexer
    #[serde(default)]
    pub summary: Option<String>,
}

impl IndexedScene {
    pub fn line_count(&self) -> usize {
        self.end_line_index - self.start_line_index + 1
    }

    pub fn contains_line(&self, line_index: usize) -> bool {
        (self.start_line_index..=self.end_line_index).contains(&line_index)
    }
}

/// Location and time of day split out of a heading
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingParts {
    pub location: String,
    pub time_of_day: String,
}

/// Scene segmentation on top of the document classifier
#[derive(Debug)]
pub struct SceneIndexer {
    parser: ScreenplayParser,
}

impl SceneIndexer {
    /// Create indexer with custom classifier rules
    pub fn new(rules: ClassifierRules) -> Result<Self> {
        Ok(Self::from_parser(ScreenplayParser::new(rules)?))
    }

    /// Create indexer with default classifier rules
    pub fn with_default_rules() -> Result<Self> {
        Self::new(ClassifierRules::default())
    }

    pub fn from_parser(parser: ScreenplayParser) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &ScreenplayParser {
        &self.parser
    }

    /// Normalize, classify and segment `text` into scenes
    pub fn index_scenes(&self, text: &str) -> Vec<IndexedScene> {
        let document = self.parser.parse(text);
        self.index_document(&document)
    }

    /// Segment an already-parsed document
    pub fn index_document(&self, document: &ParsedDocument) -> Vec<IndexedScene> {
        let tokens = &document.tokens;
        let heading_indices: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.element_type == ElementType::SceneHeading)
            .map(|(index, _)| index)
            .collect();

        let mut scenes = Vec::with_capacity(heading_indices.len());
        for (ordinal, &start) in heading_indices.iter().enumerate() {
            let end = heading_indices
                .get(ordinal + 1)
                .map(|&next| next - 1)
                .unwrap_or(tokens.len() - 1);
            let span = &tokens[start..=end];

            let heading = tokens[start].text.clone();
            let parts = self.parse_heading(&heading);

            let mut characters: Vec<String> = Vec::new();
            for token in span.iter().filter(|t| t.element_type == ElementType::Character) {
                if let Some(name) = self.parser.canonical_character_name(&token.text) {
                    if !characters.contains(&name) {
                        characters.push(name);
                    }
                }
            }

            let content = span
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");

            let number = ordinal + 1;
            scenes.push(IndexedScene {
                id: scene_id(number, start),
                number,
                heading,
                location: parts.location,
                time_of_day: parts.time_of_day,
                start_line_index: start,
                end_line_index: end,
                characters,
                content,
                summary: None,
            });
        }

        debug!("Indexed {} scenes over {} tokens", scenes.len(), tokens.len());
        scenes
    }

    /// Count scene headings without building spans
    pub fn count_scenes(&self, text: &str) -> usize {
        let normalized = normalize(text);
        let lines: Vec<&str> = normalized.lines().collect();
        let body_start = self.parser.body_start(&lines);
        lines[body_start..]
            .iter()
            .filter(|line| self.parser.rules.is_scene_heading(line.trim()))
            .count()
    }

    /// Split a heading into location and time of day
    /// The INT/EXT/EST/I-E prefix is dropped; the first hyphen, en dash or em dash separates the parts
    pub fn parse_heading(&self, heading: &str) -> HeadingParts {
        let remainder = self.parser.rules.strip_heading_prefix(heading);
        match remainder.find(|c: char| matches!(c, '-' | '\u{2013}' | '\u{2014}')) {
            Some(pos) => {
                let separator_len = remainder[pos..].chars().next().map_or(1, char::len_utf8);
                HeadingParts {
                    location: remainder[..pos].trim().to_string(),
                    time_of_day: remainder[pos + separator_len..].trim().to_string(),
                }
            }
            None => HeadingParts {
                location: remainder.trim().to_string(),
                time_of_day: String::new(),
            },
        }
    }
}

/// Deterministic scene id from ordinal and start line
pub fn scene_id(number: usize, start_line_index: usize) -> String {
    format!("scene-{number}-{start_line_index}")
}
