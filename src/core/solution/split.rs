//! Title/solution extraction from image answers.

use std::sync::OnceLock;

use regex::Regex;

/// Title used when the answer has no `Title:` line.
pub const FALLBACK_TITLE: &str = "Image Analysis Result";

/// Solution used when the answer has no `Solution:` block.
pub const FALLBACK_SOLUTION: &str = "Solution not found.";

/// Title and raw (not yet flattened) solution of an image answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSolution {
    pub title: String,
    pub solution: String,
}

/// `Title:` then the rest of that line. `\s*` may skip a line break after the marker.
fn title_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)Title:\s*(.+)").expect("title pattern compiles"))
}

/// `Solution:` then everything up to the end of the text.
fn solution_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)Solution:\s*(.+)").expect("solution pattern compiles")
    })
}

fn capture<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// Split a raw image answer into title and solution.
///
/// Markers are matched case-insensitively; the first occurrence of each wins.
/// A missing marker is replaced by [`FALLBACK_TITLE`] / [`FALLBACK_SOLUTION`]
/// rather than reported, so callers always get a populated pair.
pub fn split(raw: &str) -> ParsedSolution {
    let title = capture(title_pattern(), raw).map(str::to_string).unwrap_or_else(|| {
        log::debug!("No Title marker in model answer, using fallback title");
        FALLBACK_TITLE.to_string()
    });
    let solution = capture(solution_pattern(), raw)
        .map(str::to_string)
        .unwrap_or_else(|| {
            log::debug!("No Solution marker in model answer, using fallback solution");
            FALLBACK_SOLUTION.to_string()
        });
    ParsedSolution { title, solution }
}
