//! Value cleaning applied to every header and record cell.

/// Trim whitespace and control characters from both ends, then collapse
/// every internal whitespace run to a single space.
///
/// ```
/// assert_eq!(csves::normalize_text("  Jane \t  Doe\r\n"), "Jane Doe");
/// ```
pub fn normalize_text(raw: &str) -> String {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c.is_control());

    let mut normalized = String::with_capacity(trimmed.len());
    for part in trimmed.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(part);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_padding() {
        assert_eq!(normalize_text("  name  "), "name");
        assert_eq!(normalize_text("\tname\n"), "name");
    }

    #[test]
    fn test_collapses_internal_whitespace() {
        assert_eq!(normalize_text("first   last"), "first last");
        assert_eq!(normalize_text("a \t\n b"), "a b");
    }

    #[test]
    fn test_strips_control_characters_at_edges() {
        assert_eq!(normalize_text("\u{0}\u{7}value\u{1b}"), "value");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \t\r\n "), "");
    }

    #[test]
    fn test_unicode_whitespace() {
        assert_eq!(normalize_text("\u{a0}Zoë\u{2003}\u{2003}Ng\u{a0}"), "Zoë Ng");
    }
}
