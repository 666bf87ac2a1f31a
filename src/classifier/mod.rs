// WHY: document-level classifier producing one token per normalized line
// Token indices are the line indices of the caller's editing view

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

pub mod rules;
pub mod stoplist;
pub mod title_page;

pub use rules::LineRules;
pub use stoplist::{CueStoplist, CUE_STOPLIST};
pub use title_page::{is_page_break, TitleMetadata, TitlePageMatcher};

use crate::element::ElementType;
use crate::normalizer::normalize;

/// Tunable parameters for the character-cue heuristic
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    /// Shortest accepted cue name, in characters
    pub min_cue_len: usize,
    /// Longest accepted cue name, in characters
    pub max_cue_len: usize,
    /// Leading marker that forces a line to be a cue
    pub force_cue_marker: char,
    /// Additional non-character terms, matched case-insensitively
    pub extra_stoplist: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            min_cue_len: 2,
            max_cue_len: 40,
            force_cue_marker: '^',
            extra_stoplist: Vec::new(),
        }
    }
}

/// One classified line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Normalized text (upper-cased for headings, markers removed)
    pub text: String,
    /// The normalized line as it appears in the document
    pub raw: String,
}

impl Token {
    fn blank() -> Self {
        Self {
            element_type: ElementType::Action,
            text: String::new(),
            raw: String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

/// A scene heading recorded during classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRef {
    /// 1-based, in document order
    pub number: usize,
    pub heading: String,
    pub token_index: usize,
}

/// Result of classifying a whole document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub title: Option<TitleMetadata>,
    pub tokens: Vec<Token>,
    /// Distinct upper-cased speaker names
    pub characters: BTreeSet<String>,
    pub scenes: Vec<SceneRef>,
}

/// Screenplay classifier with compiled line rules
#[derive(Debug)]
pub struct ScreenplayParser {
    pub(crate) rules: LineRules,
    title_page: TitlePageMatcher,
}

impl ScreenplayParser {
    /// Create parser with custom rules
    pub fn new(rules: ClassifierRules) -> Result<Self> {
        debug!(?rules, "Compiling screenplay line rules");
        Ok(Self {
            rules: LineRules::new(&rules)?,
            title_page: TitlePageMatcher::new()?,
        })
    }

    /// Create parser with default rules
    pub fn with_default_rules() -> Result<Self> {
        Self::new(ClassifierRules::default())
    }

    /// Classify `text` into one token per normalized line
    pub fn parse(&self, text: &str) -> ParsedDocument {
        let normalized = normalize(text);
        let lines: Vec<&str> = normalized.lines().collect();

        let (title, body_start) = self.title_page.extract(&lines);
        let mut tokens = Vec::with_capacity(lines.len());
        let mut characters = BTreeSet::new();
        let mut scenes = Vec::new();

        // Title-block lines keep their slots so indices stay aligned
        for line in &lines[..body_start] {
            tokens.push(Token {
                element_type: ElementType::Action,
                text: line.trim().to_string(),
                raw: line.to_string(),
            });
        }

        let mut previous: Option<ElementType> = None;
        for (index, raw) in lines.iter().enumerate().skip(body_start) {
            let line = raw.trim();
            if line.is_empty() {
                tokens.push(Token::blank());
                previous = None;
                continue;
            }

            let next_line = lines.get(index + 1).copied();
            let (element_type, text) = self.rules.classify(line, previous, next_line);

            match element_type {
                ElementType::SceneHeading => scenes.push(SceneRef {
                    number: scenes.len() + 1,
                    heading: text.clone(),
                    token_index: index,
                }),
                ElementType::Character => {
                    if let Some(name) = self.rules.character_name(line) {
                        characters.insert(name);
                    }
                }
                _ => {}
            }

            tokens.push(Token {
                element_type,
                text,
                raw: raw.to_string(),
            });
            previous = Some(element_type);
        }

        debug!(
            tokens = tokens.len(),
            scenes = scenes.len(),
            characters = characters.len(),
            "Parsed screenplay"
        );

        ParsedDocument {
            title,
            tokens,
            characters,
            scenes,
        }
    }

    /// Canonical identity for a speaker name or alias text
    pub fn canonical_character_name(&self, text: &str) -> Option<String> {
        self.rules.character_name(text)
    }

    /// Index of the first body line after any title block
    pub(crate) fn body_start(&self, lines: &[&str]) -> usize {
        self.title_page.extract(lines).1
    }
}
