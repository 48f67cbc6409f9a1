//! Width-aware text helpers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates `text` to `max_width` display columns, ending with `…` when cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let next_width = width + ch.width().unwrap_or(0);
        if next_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        width = next_width;
    }
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_with_ellipsis("GPT-4o", 10), "GPT-4o");
    }

    #[test]
    fn test_long_text_truncated() {
        assert_eq!(truncate_with_ellipsis("Claude 3.5 Sonnet", 8), "Claude …");
        assert_eq!(truncate_with_ellipsis("anything", 1), "…");
    }

    #[test]
    fn test_wide_chars_count_double() {
        // Each CJK char is two columns wide.
        assert_eq!(truncate_with_ellipsis("模型模型模型", 5), "模型…");
    }
}
