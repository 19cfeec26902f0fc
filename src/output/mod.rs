// Output formatting — terminal display of analyses and stored reports.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Collapse newlines and runs of whitespace so a message fits on one line.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("¡Hola, señor!", 4), "¡Hol...");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("12345", 5), "12345");
    }

    #[test]
    fn test_truncate_emoji_message() {
        // Each warning sign is two chars (U+26A0 U+FE0F)
        let out = truncate_chars("⚠️⚠️⚠️ Your account is blocked", 3);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 6);
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("  a\n b\t\tc "), "a b c");
    }
}
