pub const MAX_SHORT_TEXT: usize = 200;
pub const MAX_LONG_TEXT: usize = 2_000;

/// Trim, strip control characters (newlines and tabs survive) and cap the
/// length in characters.
pub fn sanitize_text(input: &str, max_chars: usize) -> String {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    truncate_chars(&cleaned, max_chars)
}

/// Single-line variant: every run of whitespace collapses to one space.
pub fn sanitize_line(input: &str, max_chars: usize) -> String {
    let collapsed = input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    sanitize_text(&collapsed, max_chars)
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
