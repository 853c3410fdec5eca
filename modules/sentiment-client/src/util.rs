/// Truncate a string to at most `max_chars` characters (Unicode scalar values).
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Numeric index of a `LABEL_<n>` style label. Anything else yields `None`.
pub fn label_index(label: &str) -> Option<u32> {
    label.strip_prefix("LABEL_")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let text = "é".repeat(600);
        let truncated = truncate_chars(&text, 512);
        assert_eq!(truncated.chars().count(), 512);
        assert!(text.starts_with(truncated));
    }

    #[test]
    fn truncate_within_bounds() {
        assert_eq!(truncate_chars("Halo", 512), "Halo");
        assert_eq!(truncate_chars("", 512), "");
    }

    #[test]
    fn label_index_parses_generic_labels() {
        assert_eq!(label_index("LABEL_0"), Some(0));
        assert_eq!(label_index("LABEL_2"), Some(2));
        assert_eq!(label_index("positive"), None);
        assert_eq!(label_index("LABEL_x"), None);
    }
}
