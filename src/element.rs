// Element types shared by the document classifier and the live classifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// Screenplay element assigned to exactly one line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    SceneHeading,
    #[default]
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Transition,
    Centered,
}

impl ElementType {
    /// Every variant in the default manual-override cycle order
    pub const ALL: [ElementType; 7] = [
        ElementType::SceneHeading,
        ElementType::Action,
        ElementType::Character,
        ElementType::Parenthetical,
        ElementType::Dialogue,
        ElementType::Transition,
        ElementType::Centered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::SceneHeading => "scene-heading",
            ElementType::Action => "action",
            ElementType::Character => "character",
            ElementType::Dialogue => "dialogue",
            ElementType::Parenthetical => "parenthetical",
            ElementType::Transition => "transition",
            ElementType::Centered => "centered",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serialized_name() {
        for element in ElementType::ALL {
            let json = serde_json::to_string(&element).unwrap();
            assert_eq!(json, format!("\"{element}\""));
        }
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ElementType::SceneHeading).unwrap();
        assert_eq!(json, "\"scene-heading\"");
        let back: ElementType = serde_json::from_str("\"parenthetical\"").unwrap();
        assert_eq!(back, ElementType::Parenthetical);
    }
}
