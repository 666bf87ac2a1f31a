// WHY: every line index handed to callers is an index into the normalized text,
// so normalization is the single source of truth for line numbering

/// Canonicalize screenplay text into its line-aligned form
/// Unifies CRLF/CR/LF, strips trailing whitespace per line, collapses blank runs
/// to one blank line and ends non-empty documents with exactly one `\n`
pub fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 1);
    normalize_into(text, &mut result);
    result
}

/// Normalize into supplied buffer to avoid allocation
pub fn normalize_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len() + 1);

    let mut previous_blank = false;
    for line in raw_lines(text) {
        let line = line.trim_end();
        if line.is_empty() {
            // WHY: adjacent empty lines would break the one-blank-token-per-run rule
            if previous_blank {
                continue;
            }
            previous_blank = true;
        } else {
            previous_blank = false;
        }
        buffer.push_str(line);
        buffer.push('\n');
    }

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        buffer.clear();
        return;
    }
    if trimmed.len() != buffer.len() {
        let trimmed_content = trimmed.to_string();
        buffer.clear();
        buffer.push_str(&trimmed_content);
    }
    buffer.push('\n');
}

/// Number of visual lines in already-normalized text
pub fn line_count(normalized: &str) -> usize {
    normalized.lines().count()
}

/// Split on any of `\r\n`, `\r` or `\n`
fn raw_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(|c: char| c == '\r' || c == '\n') {
            Some(pos) => {
                let skip = if current[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[pos + skip..]);
                Some(&current[..pos])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize("A\r\nB\rC\nD"), "A\nB\nC\nD\n");
        assert_eq!(normalize("A\r\n\r\nB"), "A\n\nB\n");
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        assert_eq!(normalize("A\n\n\n\nB"), "A\n\nB\n");
        assert_eq!(normalize("A\n\n\nB"), "A\n\nB\n");
        assert_eq!(normalize("A\n\nB"), "A\n\nB\n");
        assert_eq!(normalize("A\n   \n\t\nB"), "A\n\nB\n");
    }

    #[test]
    fn test_normalize_trims_trailing_whitespace() {
        assert_eq!(normalize("BOB   \nHello.\t\n"), "BOB\nHello.\n");
    }

    #[test]
    fn test_normalize_preserves_interior_indentation() {
        assert_eq!(normalize("A\n    indented"), "A\n    indented\n");
    }

    #[test]
    fn test_normalize_trims_document() {
        assert_eq!(normalize("\n\n  INT. HOUSE - DAY\n\n\n"), "INT. HOUSE - DAY\n");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("\r\n\r\n\n"), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let inputs = [
            "",
            " ",
            "A",
            "A\r\n\r\n\r\n\r\nB  \r",
            "\n\n.FORCED\n\n\n\nBOB\n(beat)\nHi.\n\n",
            "Title: X\n===\n\n\n\nINT. A - B\r\rC",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_normalize_into_buffer_reuse() {
        let mut buffer = String::new();
        normalize_into("A\r\nB", &mut buffer);
        assert_eq!(buffer, "A\nB\n");
        normalize_into("C", &mut buffer);
        assert_eq!(buffer, "C\n");
    }

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(&normalize("")), 0);
        assert_eq!(line_count(&normalize("A\n\n\n\nB")), 3);
    }
}
