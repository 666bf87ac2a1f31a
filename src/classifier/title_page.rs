// Title-page metadata block at the very start of a screenplay

use anyhow::Result;
use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};

/// Recognized `Key: value` metadata keys, lower-cased; multi-word keys precede their prefixes
pub const TITLE_KEYS: &[&str] = &[
    "title", "credit", "author", "source", "draft date", "draft",
    "date", "contact", "copyright", "notes", "revision",
];

/// Metadata captured from the title block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleMetadata {
    pub title: Option<String>,
    pub credit: Option<String>,
    pub author: Option<String>,
    pub source: Option<String>,
    pub draft: Option<String>,
    pub date: Option<String>,
    pub contact: Option<String>,
    pub copyright: Option<String>,
    pub notes: Option<String>,
    pub revision: Option<String>,
}

impl TitleMetadata {
    fn slot(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "title" => Some(&mut self.title),
            "credit" => Some(&mut self.credit),
            "author" => Some(&mut self.author),
            "source" => Some(&mut self.source),
            "draft" | "draft date" => Some(&mut self.draft),
            "date" => Some(&mut self.date),
            "contact" => Some(&mut self.contact),
            "copyright" => Some(&mut self.copyright),
            "notes" => Some(&mut self.notes),
            "revision" => Some(&mut self.revision),
            _ => None,
        }
    }

    /// Record a value; the first occurrence of a key wins
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(slot) = self.slot(&key.to_lowercase()) {
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
    }
}

/// Matcher for `Key:` prefixes and page-break lines
#[derive(Debug)]
pub struct TitlePageMatcher {
    key_prefix: Regex,
}

impl TitlePageMatcher {
    pub fn new() -> Result<Self> {
        let keys = TITLE_KEYS.join("|");
        let key_prefix = Regex::new(&format!(r"(?i)^(?:{keys})[ \t]*:"))?;
        Ok(Self { key_prefix })
    }

    /// Split a metadata line into `(key, value)`
    pub fn key_value<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let m = self.key_prefix.find(line)?;
        let key = line[..m.end() - 1].trim();
        let value = line[m.end()..].trim();
        Some((key, value))
    }

    /// Scan the leading title block of normalized `lines`
    /// Returns the metadata (if any line matched) and the index of the first body line
    pub fn extract(&self, lines: &[&str]) -> (Option<TitleMetadata>, usize) {
        let mut metadata = TitleMetadata::default();
        let mut found = false;
        let mut index = 0;

        while index < lines.len() {
            let line = lines[index].trim();
            if line.is_empty() {
                break;
            }
            if is_page_break(line) {
                // WHY: the marker belongs to the title block only when it closes one
                if found {
                    index += 1;
                }
                break;
            }
            match self.key_value(line) {
                Some((key, value)) => {
                    metadata.set(key, value);
                    found = true;
                    index += 1;
                }
                None => break,
            }
        }

        if found {
            (Some(metadata), index)
        } else {
            (None, 0)
        }
    }
}

/// Three or more `=` and nothing else
pub fn is_page_break(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.bytes().all(|b| b == b'=')
}
