//! Markup escaping for text embedded in bubble HTML

/// Escape the five HTML metacharacters.
///
/// Not idempotent: callers must apply this exactly once, at the point where
/// untrusted text is spliced into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// True if `text` contains a raw metacharacter that `escape_html` would rewrite.
#[allow(dead_code)] // Used by tests
pub fn has_markup_metachar(text: &str) -> bool {
    text.chars().any(|c| matches!(c, '<' | '>' | '"' | '\''))
        || text
            .match_indices('&')
            .any(|(i, _)| !text.get(i..).is_some_and(is_entity_start))
}

fn is_entity_start(s: &str) -> bool {
    ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"]
        .iter()
        .any(|e| s.starts_with(e))
}
