use crate::models::PreviewItem;
use crate::utils::text::{sanitize_line, MAX_SHORT_TEXT};

/// Build the attachment preview list. Only the final path component of each
/// name is kept; nothing is uploaded or stored.
pub fn preview<S: AsRef<str>>(names: &[S]) -> Vec<PreviewItem> {
    names
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
            let cleaned = sanitize_line(base, MAX_SHORT_TEXT);
            (!cleaned.is_empty()).then(|| PreviewItem { name: cleaned })
        })
        .collect()
}
