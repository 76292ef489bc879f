//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries. Used for log previews only.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Number of characters (Unicode scalar values) in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Shorten `s` to at most `max_chars` characters, ending in `…` when cut.
pub fn truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if char_len(s) <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Keep the first `max_chars` characters of `s`, appending a truncation
/// notice when anything was cut.
///
/// The notice reads `{separator}...(truncated, N total chars)` where `N` is
/// the character count of the original text. Text of exactly `max_chars`
/// characters is returned unchanged.
pub fn truncate_with_notice(s: &str, max_chars: usize, separator: &str) -> String {
    let total = char_len(s);
    if total <= max_chars {
        return s.to_string();
    }

    let end = s
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len());

    format!(
        "{}{}...(truncated, {} total chars)",
        &s[..end],
        separator,
        total
    )
}
