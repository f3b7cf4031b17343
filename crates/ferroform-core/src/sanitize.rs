//! Per-type sanitization of submitted values.

use std::sync::OnceLock;

use regex::Regex;

// Characters legal in the local and domain parts of an address.
const EMAIL_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~.@[]";

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[,.0-9]+").expect("static pattern"))
}

/// Strips characters not allowed in an email address. Does not verify
/// deliverability or overall shape.
pub fn sanitize_email(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || EMAIL_SPECIALS.contains(*c))
        .collect()
}

/// Whether a raw value matches the numeric pattern (digits, comma,
/// period).
pub fn matches_number(value: &str) -> bool {
    number_pattern().is_match(value)
}

/// Generic text sanitization: drops markup tags and control characters,
/// collapses runs of whitespace and trims the ends.
pub fn sanitize_text(value: &str) -> String {
    let mut stripped = String::with_capacity(value.len());
    let mut in_tag = false;

    for c in value.chars() {
        if in_tag {
            if c == '>' {
                in_tag = false;
            }
        } else if c == '<' {
            in_tag = true;
        } else if c.is_control() {
            stripped.push(' ');
        } else {
            stripped.push(c);
        }
    }

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_email_strips_disallowed() {
        assert_eq!(sanitize_email("user@example.com"), "user@example.com");
        assert_eq!(sanitize_email("us er@exa mple.com"), "user@example.com");
        assert_eq!(sanitize_email("a(b)c@example.com"), "abc@example.com");
        assert_eq!(sanitize_email("first+tag@example.co.uk"), "first+tag@example.co.uk");
    }

    #[test]
    fn test_number_pattern() {
        assert!(matches_number("42"));
        assert!(matches_number("1,234.56"));
        assert!(matches_number("price: 12"));
        assert!(!matches_number("abc"));
        assert!(!matches_number(""));
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("  hello  world "), "hello world");
        assert_eq!(sanitize_text("<b>bold</b> move"), "bold move");
        assert_eq!(sanitize_text("line\u{1}break\ttab"), "line break tab");
        assert_eq!(sanitize_text("<script>alert(1)</script>"), "alert(1)");
    }
}
