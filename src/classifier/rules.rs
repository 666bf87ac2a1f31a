// WHY: per-line classification as an ordered predicate chain
// The same predicates back both the document classifier and the live classifier

use anyhow::Result;
use regex_automata::meta::Regex;

use super::stoplist::CueStoplist;
use super::ClassifierRules;
use crate::element::ElementType;

/// Scene-heading prefixes; the longest alternatives come first
const HEADING_PREFIXES: &str = r"INT\./EXT|INT/EXT|I/E|INT|EXT|EST";

/// Compiled line predicates
#[derive(Debug)]
pub struct LineRules {
    scene_heading: Regex,
    heading_prefix: Regex,
    stoplist: CueStoplist,
    min_cue_len: usize,
    max_cue_len: usize,
    force_cue_marker: char,
}

impl LineRules {
    pub fn new(rules: &ClassifierRules) -> Result<Self> {
        // Prefix must be followed by `.` or whitespace so INTERIOR/ESTATE stay action
        let scene_heading = Regex::new(&format!(r"(?i)^(?:{HEADING_PREFIXES})(?:\.|\s)"))?;
        let heading_prefix = Regex::new(&format!(r"(?i)^(?:{HEADING_PREFIXES})(?:\.\s*|\s+)"))?;

        Ok(Self {
            scene_heading,
            heading_prefix,
            stoplist: CueStoplist::with_extra(&rules.extra_stoplist),
            min_cue_len: rules.min_cue_len,
            max_cue_len: rules.max_cue_len,
            force_cue_marker: rules.force_cue_marker,
        })
    }

    /// Classify one trimmed, non-blank line with full document context
    /// `previous` is the type of the preceding line (None after a blank run),
    /// `next_line` the raw following line if any
    pub fn classify(
        &self,
        line: &str,
        previous: Option<ElementType>,
        next_line: Option<&str>,
    ) -> (ElementType, String) {
        match line {
            l if is_forced_scene_heading(l) => (ElementType::SceneHeading, l[1..].trim().to_uppercase()),
            l if self.is_prefixed_scene_heading(l) => (ElementType::SceneHeading, l.to_uppercase()),
            l if is_forced_transition(l) => (ElementType::Transition, l[1..].trim().to_string()),
            l if is_transition(l) => (ElementType::Transition, l.to_string()),
            l if is_centered(l) => (ElementType::Centered, l[1..l.len() - 1].trim().to_string()),
            l if is_parenthetical(l)
                && matches!(previous, Some(ElementType::Character | ElementType::Dialogue)) =>
            {
                (ElementType::Parenthetical, l.to_string())
            }
            l if self.is_character_cue(l, previous, next_line) => {
                (ElementType::Character, self.strip_force_marker(l).to_string())
            }
            l if continues_dialogue(previous) => (ElementType::Dialogue, l.to_string()),
            l => (ElementType::Action, l.to_string()),
        }
    }

    /// Classify one line without lookahead
    /// Parentheticals are not detected and cues are judged on shape alone
    pub fn classify_live(&self, line: &str, previous: Option<ElementType>) -> ElementType {
        match line {
            "" => ElementType::Action,
            l if is_forced_scene_heading(l) || self.is_prefixed_scene_heading(l) => ElementType::SceneHeading,
            l if is_forced_transition(l) || is_transition(l) => ElementType::Transition,
            l if is_centered(l) => ElementType::Centered,
            l if self.has_cue_shape(l) => ElementType::Character,
            _ if continues_dialogue(previous) => ElementType::Dialogue,
            _ => ElementType::Action,
        }
    }

    /// Forced or prefixed scene heading
    pub fn is_scene_heading(&self, line: &str) -> bool {
        is_forced_scene_heading(line) || self.is_prefixed_scene_heading(line)
    }

    fn is_prefixed_scene_heading(&self, line: &str) -> bool {
        self.scene_heading.is_match(line)
    }

    /// Heading text with any INT/EXT/EST/I-E prefix removed
    pub fn strip_heading_prefix<'a>(&self, heading: &'a str) -> &'a str {
        let heading = heading.trim();
        match self.heading_prefix.find(heading) {
            Some(m) => heading[m.end()..].trim(),
            None => heading,
        }
    }

    fn is_character_cue(&self, line: &str, previous: Option<ElementType>, next_line: Option<&str>) -> bool {
        if !self.has_cue_shape(line) {
            return false;
        }
        if self.is_forced_cue(line) {
            return true;
        }
        let after_break = matches!(
            previous,
            None | Some(ElementType::SceneHeading) | Some(ElementType::Transition)
        );
        let followed_by_speech = next_line
            .map(str::trim)
            .is_some_and(|next| !next.is_empty() && !self.is_scene_heading(next));
        after_break && followed_by_speech
    }

    /// Upper-case, length and stoplist tests for a cue candidate
    pub fn has_cue_shape(&self, line: &str) -> bool {
        if !is_upper_case(line) {
            return false;
        }
        let name = strip_extensions(self.strip_force_marker(line));
        let len = name.chars().count();
        if len < self.min_cue_len || len > self.max_cue_len {
            return false;
        }
        !self.stoplist.contains(name) && !self.stoplist.contains(strip_repeat_suffix(name))
    }

    fn is_forced_cue(&self, line: &str) -> bool {
        line.starts_with(self.force_cue_marker)
    }

    fn strip_force_marker<'a>(&self, line: &'a str) -> &'a str {
        line.strip_prefix(self.force_cue_marker).unwrap_or(line).trim_start()
    }

    /// Speaker identity for a cue line: marker, extensions and repeat number removed,
    /// upper-cased; None when nothing usable remains
    pub fn character_name(&self, cue: &str) -> Option<String> {
        let name = strip_repeat_suffix(strip_extensions(self.strip_force_marker(cue.trim())));
        if name.is_empty() || self.stoplist.contains(name) {
            return None;
        }
        Some(name.to_uppercase())
    }
}

/// `.HEADING` but not an ellipsis
fn is_forced_scene_heading(line: &str) -> bool {
    line.starts_with('.') && !line.starts_with("..")
}

fn is_forced_transition(line: &str) -> bool {
    line.starts_with('>') && !line.ends_with('<')
}

fn is_transition(line: &str) -> bool {
    line.ends_with("TO:") && is_upper_case(line)
}

fn is_centered(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('>') && line.ends_with('<')
}

/// One matching pair of parentheses wrapping the whole line
fn is_parenthetical(line: &str) -> bool {
    line.len() >= 2
        && line.starts_with('(')
        && line.ends_with(')')
        && line.find(')') == Some(line.len() - 1)
        && line.rfind('(') == Some(0)
}

fn continues_dialogue(previous: Option<ElementType>) -> bool {
    matches!(previous, Some(ElementType::Character | ElementType::Parenthetical))
}

/// At least one upper-case letter and no lower-case letters
fn is_upper_case(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

/// Remove trailing `(V.O.)`-style extensions, repeatedly
fn strip_extensions(name: &str) -> &str {
    let mut name = name.trim();
    while name.ends_with(')') {
        match name.rfind('(') {
            Some(open) => name = name[..open].trim_end(),
            None => break,
        }
    }
    name
}

/// Remove a trailing standalone number (`GUARD 2` -> `GUARD`)
fn strip_repeat_suffix(name: &str) -> &str {
    let name = name.trim();
    match name.rsplit_once(char::is_whitespace) {
        Some((head, tail)) if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) => head.trim_end(),
        _ => name,
    }
}
