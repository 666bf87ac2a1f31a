// WHY: all-caps lines that look like cues but never name a speaker
// Keeps transitional and structural markers out of the character set

use std::collections::HashSet;

/// Non-character all-caps terms rejected by the character-cue heuristic
pub const CUE_STOPLIST: &[&str] = &[
    // Endings and page furniture
    "THE END", "END", "CONTINUED", "CONT'D", "CONT", "MORE", "FIN",
    // Extension abbreviations written on their own line
    "V.O.", "O.S.", "O.C.", "V.O", "O.S", "O.C", "VO", "OS", "OC",
    // Transitional markers without a trailing TO:
    "FADE IN", "FADE OUT", "FADE TO BLACK", "FADE UP", "CUT TO BLACK",
    "SMASH CUT", "MATCH CUT", "JUMP CUT", "DISSOLVE", "IRIS OUT", "IRIS IN",
    "BACK TO SCENE", "BACK TO PRESENT", "BACK TO REALITY",
    // Montage, flashback and sequence markers
    "MONTAGE", "BEGIN MONTAGE", "END MONTAGE", "END OF MONTAGE",
    "FLASHBACK", "BEGIN FLASHBACK", "END FLASHBACK", "END OF FLASHBACK",
    "SERIES OF SHOTS", "END SERIES OF SHOTS", "END OF SERIES OF SHOTS",
    "INTERCUT", "INTERCUT WITH", "END INTERCUT", "SPLIT SCREEN",
    "DREAM SEQUENCE", "END DREAM SEQUENCE",
    // Camera and insert directions
    "INSERT", "CLOSE ON", "CLOSE UP", "CLOSE-UP", "ANGLE ON", "WIDE ON",
    "POV", "BACK TO", "OVER BLACK", "BLACK", "BLACKOUT", "SUPER", "TITLE",
    "TITLE CARD", "CREDITS", "OPENING CREDITS", "END CREDITS",
    // Time-of-day fragments
    "LATER", "MOMENTS LATER", "CONTINUOUS", "SAME", "SAME TIME", "DAY", "NIGHT",
];

/// Lookup over the built-in stoplist plus caller-supplied terms
#[derive(Debug, Clone)]
pub struct CueStoplist {
    terms: HashSet<String>,
}

impl CueStoplist {
    /// Create stoplist with the built-in terms only
    pub fn new() -> Self {
        Self::with_extra(&[])
    }

    /// Create stoplist with the built-in terms plus `extra` (matched case-insensitively)
    pub fn with_extra(extra: &[String]) -> Self {
        let terms = CUE_STOPLIST
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str))
            .map(stop_key)
            .filter(|key| !key.is_empty())
            .collect();
        Self { terms }
    }

    /// Check whether a candidate name is a stoplisted term
    pub fn contains(&self, name: &str) -> bool {
        self.terms.contains(&stop_key(name))
    }
}

impl Default for CueStoplist {
    fn default() -> Self {
        Self::new()
    }
}

/// Comparison key: upper-cased, trailing `:` `.` `!` `,` removed
fn stop_key(term: &str) -> String {
    term.trim()
        .trim_end_matches(|c: char| matches!(c, ':' | '.' | '!' | ','))
        .trim_end()
        .to_uppercase()
}
