//! Line splitting, classification, and raw character statistics.

use serde::Serialize;

use crate::extraction::{Line, TextStats};

/// Structural role of a line, as far as plain text can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Heading,
    Bullet,
    Body,
}

const MAX_HEADING_WORDS: usize = 6;

/// Title-cased headings are short ("Work Experience"); longer title-cased lines
/// are job titles, degrees, or employers.
const MAX_TITLE_CASE_WORDS: usize = 2;

/// Glyphs that open a list item without needing a following space.
const BULLET_GLYPHS: &[char] = &[
    '•', '●', '▪', '◦', '‣', '■', '□', '►', '➢', '✓', '✔', '·', '–', '—', '\u{f0b7}',
    '\u{f0a7}', '\u{f076}', '\u{f0d8}',
];

/// Glyphs that only count as a marker when followed by whitespace ("-5%" is not a bullet).
const SPACED_BULLET_GLYPHS: &[char] = &['-', '*', '+', '>'];

/// Lower-case words allowed inside an otherwise title-cased heading.
const HEADING_CONNECTORS: &[&str] = &["and", "of", "&", "the", "in", "for", "to", "a", "an", "/"];

pub(crate) fn split_lines(raw: &str) -> Vec<Line> {
    raw.split(['\n', '\r', '\x0c'])
        .filter_map(|raw_line| {
            let cleaned: String = raw_line
                .chars()
                .filter(|c| !c.is_control() || *c == '\t')
                .map(|c| if c == '\t' || c == '\u{a0}' { ' ' } else { c })
                .collect();
            let text = cleaned.trim();
            if text.is_empty() {
                return None;
            }
            Some(Line {
                text: text.to_string(),
                kind: classify(text),
                widest_gap: widest_gap(text),
            })
        })
        .collect()
}

pub(crate) fn compute_stats(raw: &str) -> TextStats {
    let mut stats = TextStats::default();
    let mut prev_blank = false;
    let mut at_line_start = true;

    for c in raw.chars() {
        stats.total_chars += 1;
        let blank = c == ' ' || c == '\t';
        if blank && prev_blank {
            stats.repeated_whitespace += 1;
        }
        if c.is_control() && !matches!(c, '\n' | '\r' | '\t' | '\x0c') {
            stats.non_printable += 1;
        }
        if c == '\u{fffd}' || (is_private_use(c) && !(at_line_start && BULLET_GLYPHS.contains(&c)))
        {
            stats.replacement_glyphs += 1;
        }
        prev_blank = blank;
        if c == '\n' || c == '\r' || c == '\x0c' {
            at_line_start = true;
        } else if !blank {
            at_line_start = false;
        }
    }

    stats.cid_artifacts = raw.matches("(cid:").count();
    stats
}

fn is_private_use(c: char) -> bool {
    ('\u{e000}'..='\u{f8ff}').contains(&c)
}

fn classify(text: &str) -> LineKind {
    if bullet_marker_len(text).is_some() {
        LineKind::Bullet
    } else if is_heading(text) {
        LineKind::Heading
    } else {
        LineKind::Body
    }
}

/// Byte length of a leading list marker, including the whitespace after it.
pub fn bullet_marker_len(text: &str) -> Option<usize> {
    let first = text.chars().next()?;
    let rest = &text[first.len_utf8()..];

    if BULLET_GLYPHS.contains(&first) {
        return Some(text.len() - rest.trim_start().len());
    }
    if SPACED_BULLET_GLYPHS.contains(&first) && rest.starts_with(char::is_whitespace) {
        return Some(text.len() - rest.trim_start().len());
    }

    // Ordinal markers: "1." / "12)" followed by whitespace.
    let digits = text.chars().take_while(char::is_ascii_digit).count();
    if (1..=2).contains(&digits) {
        let after = &text[digits..];
        if let Some(stripped) = after.strip_prefix(['.', ')']) {
            if stripped.starts_with(char::is_whitespace) {
                return Some(text.len() - stripped.trim_start().len());
            }
        }
    }
    None
}

/// Probable section heading: upper-cased and at most six words, or title-cased
/// with at most two significant words. Never a list item, a sentence, or a line
/// with digits or contact details.
pub fn is_heading(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || bullet_marker_len(trimmed).is_some() {
        return false;
    }
    let title = trimmed.trim_end_matches(':').trim_end();
    if title.is_empty() || title.ends_with(['.', '!', '?', ';', ',']) {
        return false;
    }
    if title.contains(['@', ',', '|']) || title.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    if !title.chars().any(char::is_alphabetic) {
        return false;
    }

    let words: Vec<&str> = title.split_whitespace().collect();
    if words.len() > MAX_HEADING_WORDS {
        return false;
    }

    let all_upper = title
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(char::is_uppercase);
    if all_upper {
        return true;
    }

    let mut significant = 0;
    for word in &words {
        let lower = word.to_lowercase();
        if HEADING_CONNECTORS.contains(&lower.as_str()) {
            continue;
        }
        match word.chars().find(|c| c.is_alphabetic()) {
            Some(c) if c.is_uppercase() => significant += 1,
            Some(_) => return false,
            None => {}
        }
    }
    (1..=MAX_TITLE_CASE_WORDS).contains(&significant)
}

fn widest_gap(text: &str) -> usize {
    let mut widest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == ' ' {
            run += 1;
            widest = widest.max(run);
        } else {
            run = 0;
        }
    }
    widest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_upper_case() {
        assert!(is_heading("WORK EXPERIENCE"));
        assert!(is_heading("SKILLS:"));
    }

    #[test]
    fn test_heading_title_case_with_connector() {
        assert!(is_heading("Education and Training"));
        assert!(is_heading("Projects & Awards"));
    }

    #[test]
    fn test_sentence_is_not_heading() {
        assert!(!is_heading("Built a distributed cache for the payments team."));
        assert!(!is_heading("Led the migration to Kubernetes"));
    }

    #[test]
    fn test_job_titles_and_degrees_are_not_headings() {
        assert!(!is_heading("Customer Experience Lead"));
        assert!(!is_heading("Director of Education Programs"));
        assert!(!is_heading("Internal Developer Tools Owner"));
        assert!(!is_heading("BSc Computer Science"));
        assert!(is_heading("Professional Experience"));
        assert!(is_heading("CUSTOMER EXPERIENCE LEAD"));
    }

    #[test]
    fn test_long_title_case_line_is_not_heading() {
        assert!(!is_heading("Senior Staff Software Engineer At Big Company Incorporated"));
    }

    #[test]
    fn test_list_item_is_not_heading() {
        assert!(!is_heading("• SKILLS"));
        assert!(!is_heading("- Python"));
    }

    #[test]
    fn test_contact_and_dates_are_not_headings() {
        assert!(!is_heading("jane@example.com"));
        assert!(!is_heading("Acme Corp 2019 - 2023"));
        assert!(!is_heading("Python, Go, Kubernetes"));
    }

    #[test]
    fn test_bullet_markers() {
        assert_eq!(bullet_marker_len("• Shipped"), Some("• ".len()));
        assert_eq!(bullet_marker_len("- Shipped"), Some(2));
        assert_eq!(bullet_marker_len("1. Shipped"), Some(3));
        assert_eq!(bullet_marker_len("12) Shipped"), Some(4));
        assert_eq!(bullet_marker_len("\u{f0b7} Shipped"), Some("\u{f0b7} ".len()));
        assert_eq!(bullet_marker_len("-5% churn"), None);
        assert_eq!(bullet_marker_len("2019 - 2023"), None);
        assert_eq!(bullet_marker_len("Shipped"), None);
    }

    #[test]
    fn test_split_lines_normalizes_breaks_and_controls() {
        let lines = split_lines("one\r\ntwo\rthree\x0cfour\x07\n\n   \n");
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn test_widest_gap() {
        let lines = split_lines("Experience        Skills");
        assert_eq!(lines[0].widest_gap, 8);
    }

    #[test]
    fn test_stats_count_artifacts() {
        let stats = compute_stats("a\u{fffd}b  c\x01(cid:12)\n\u{f0b7} bullet");
        assert_eq!(stats.replacement_glyphs, 1);
        assert_eq!(stats.non_printable, 1);
        assert_eq!(stats.repeated_whitespace, 1);
        assert_eq!(stats.cid_artifacts, 1);
    }
}
