// WHY: per-keystroke classification for an editing surface
// Single line, previous type only; no lookahead is available while typing

use crate::classifier::ScreenplayParser;
use crate::element::ElementType;

impl ScreenplayParser {
    /// Classify a single line given only the previous element's type
    pub fn classify_line(&self, text: &str, previous: Option<ElementType>) -> ElementType {
        self.rules.classify_live(text.trim(), previous)
    }

    /// Re-run the full document rules on one line once its neighbour exists
    /// Lets an editor confirm or demote a cue the live classifier guessed
    pub fn revalidate_line(
        &self,
        text: &str,
        previous: Option<ElementType>,
        next_line: Option<&str>,
    ) -> ElementType {
        let line = text.trim();
        if line.is_empty() {
            return ElementType::Action;
        }
        self.rules.classify(line, previous, next_line).0
    }
}

/// Element to start when the user advances past `current`
pub fn next_element_type(current: ElementType) -> ElementType {
    match current {
        ElementType::SceneHeading => ElementType::Action,
        ElementType::Character => ElementType::Dialogue,
        ElementType::Parenthetical => ElementType::Dialogue,
        ElementType::Dialogue => ElementType::Action,
        ElementType::Transition => ElementType::SceneHeading,
        ElementType::Action | ElementType::Centered => ElementType::Action,
    }
}

/// Next entry after `current` in `order`, wrapping at the end
/// Falls back to the first entry when `current` is absent, or `current` when `order` is empty
pub fn cycle_element_type(current: ElementType, order: &[ElementType]) -> ElementType {
    match order.iter().position(|&element| element == current) {
        Some(pos) => order[(pos + 1) % order.len()],
        None => order.first().copied().unwrap_or(current),
    }
}
