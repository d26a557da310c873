//! Contact extraction: the candidate's email address, and phone detection
//! used by the structure scorer.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::extraction::ExtractedText;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}").unwrap()
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\(?\d[\d\s().-]{5,}\d").unwrap());

static YEAR_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}\s*[-–]\s*\d{4}$").unwrap());

/// Extracted reach-out details. At most one email, never several.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub email: Option<String>,
}

/// Returns the first email address in the resume, exactly as written.
pub fn extract_email(text: &ExtractedText) -> ContactInfo {
    let email = text
        .lines()
        .iter()
        .find_map(|line| EMAIL_RE.find(&line.text))
        .map(|m| m.as_str().to_string());
    ContactInfo { email }
}

pub fn contains_email(line: &str) -> bool {
    EMAIL_RE.is_match(line)
}

/// A run of 7–15 digits with phone separators; year ranges do not count.
pub fn contains_phone(line: &str) -> bool {
    PHONE_RE.find_iter(line).any(|m| {
        let candidate = m.as_str().trim();
        let digits = candidate.chars().filter(char::is_ascii_digit).count();
        (7..=15).contains(&digits) && !YEAR_RANGE_RE.is_match(candidate)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_of(text: &str) -> Option<String> {
        extract_email(&ExtractedText::from_plain_text(text)).email
    }

    #[test]
    fn test_no_email_is_none() {
        assert_eq!(email_of("Jane Doe\nSoftware Engineer"), None);
    }

    #[test]
    fn test_email_returned_verbatim() {
        assert_eq!(
            email_of("Jane Doe\nContact: Jane.Doe+jobs@Example.co.uk"),
            Some("Jane.Doe+jobs@Example.co.uk".to_string())
        );
    }

    #[test]
    fn test_first_email_wins() {
        assert_eq!(
            email_of("first@example.com\nsecond@example.org"),
            Some("first@example.com".to_string())
        );
    }

    #[test]
    fn test_trailing_period_excluded() {
        assert_eq!(
            email_of("Reach me at jane@example.com."),
            Some("jane@example.com".to_string())
        );
    }

    #[test]
    fn test_domain_needs_a_dot() {
        assert_eq!(email_of("user@localhost"), None);
        assert_eq!(email_of("@handle on twitter"), None);
    }

    #[test]
    fn test_phone_detection() {
        assert!(contains_phone("(555) 123-4567"));
        assert!(contains_phone("+44 20 7946 0958"));
        assert!(!contains_phone("2019 - 2023"));
        assert!(!contains_phone("Increased revenue by 30%"));
    }
}
