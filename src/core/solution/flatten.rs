//! Markdown flattening for plain-text display and speech.

use std::sync::OnceLock;

use regex::Regex;

struct Patterns {
    bold: Regex,
    italic: Regex,
    bullet: Regex,
    blank_lines: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        // CRLF mode: `.` stops at '\r' as well as '\n'.
        bold: Regex::new(r"(?R)\*\*(.*?)\*\*").expect("bold pattern compiles"),
        italic: Regex::new(r"(?R)\*(.*?)\*").expect("italic pattern compiles"),
        // `\s` also matches '\n', so blank lines before a bullet are absorbed into it.
        // A line may also start right after any '\r', including the one in "\r\n".
        bullet: Regex::new(r"(?m)(?:^|(\r))\s*[*\-]\s+").expect("bullet pattern compiles"),
        blank_lines: Regex::new(r"\n{2,}").expect("blank line pattern compiles"),
    })
}

/// Flatten light markdown into newline-separated plain paragraphs.
///
/// Passes run in a fixed order: bold, italic, bullets, then blank lines.
/// Emphasis never spans lines; bullets lose their indentation.
pub fn flatten(markdown: &str) -> String {
    let p = patterns();
    let text = p.bold.replace_all(markdown, "$1");
    let text = p.italic.replace_all(&text, "$1");
    let text = p.bullet.replace_all(&text, "${1}- ");
    p.blank_lines.replace_all(&text, "\n").into_owned()
}

/// Display paragraphs of a flattened string, one per line.
pub fn paragraphs(flattened: &str) -> std::str::Split<'_, char> {
    flattened.split('\n')
}
