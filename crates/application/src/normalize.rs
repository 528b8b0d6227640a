//! Markdown cleanup for generated replies
//!
//! The text generator decorates its output with markdown, which reads badly in
//! the chat bubble and sounds worse when synthesized. This strips emphasis
//! markers and list prefixes while keeping paragraph structure intact.

/// Strip markdown decoration from generated text
///
/// Paired `**`, `*`, `_` and backtick markers are removed within a line,
/// keeping the inner content; unpaired markers are left alone. Bullet and
/// ordered-list prefixes are removed entirely. Paragraphs (blank-line
/// separated blocks) are trimmed and re-joined; empty blocks are dropped.
///
/// Pure and infallible; empty input yields an empty string.
#[must_use]
pub fn clean_markdown(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let cleaned = text
        .lines()
        .map(clean_line)
        .collect::<Vec<_>>()
        .join("\n");

    cleaned
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn clean_line(line: &str) -> String {
    let line = strip_pairs(line, "**");
    let line = strip_pairs(&line, "*");
    let line = strip_pairs(&line, "_");
    let line = strip_pairs(&line, "`");
    strip_list_prefix(&line)
}

/// Remove paired occurrences of `delim`, keeping the enclosed content
fn strip_pairs(line: &str, delim: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find(delim) {
        let after = &rest[open + delim.len()..];
        let Some(close) = after.find(delim) else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str(&after[..close]);
        rest = &after[close + delim.len()..];
    }

    out.push_str(rest);
    out
}

/// Remove a leading bullet (`-`, `*`, `+`) or ordered-list (`1.`) prefix
fn strip_list_prefix(line: &str) -> String {
    let unindented = line.trim_start();

    if let Some(rest) = unindented.strip_prefix(['-', '*', '+']) {
        if rest.starts_with(char::is_whitespace) {
            return rest.trim_start().to_string();
        }
    }

    let digit_end = unindented
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unindented.len());
    if digit_end > 0 {
        if let Some(rest) = unindented[digit_end..].strip_prefix('.') {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start().to_string();
            }
        }
    }

    line.to_string()
}
