// TextExtractor: raw resume bytes -> normalized lines with structural hints.
// Extraction is CPU-bound; callers run it inside tokio::task::spawn_blocking.

pub mod lines;
pub mod pdf;

use std::fmt;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

pub use lines::{bullet_marker_len, LineKind};
pub use pdf::extract_pdf;

/// An uploaded resume file as received from the caller.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub bytes: Bytes,
    /// Content-Type sent with the multipart field, if any. Advisory only.
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

/// Why a PDF could not be turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreadableReason {
    Malformed,
    Encrypted,
    NoTextLayer,
}

impl fmt::Display for UnreadableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            UnreadableReason::Malformed => "The PDF is damaged or could not be parsed",
            UnreadableReason::Encrypted => "The PDF is password protected",
            UnreadableReason::NoTextLayer => {
                "The PDF has no extractable text (it looks like a scanned image)"
            }
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The bytes are not a PDF at all.
    #[error("document is not a PDF")]
    NotPdf,

    /// The bytes are a PDF, but no usable text can be read from it.
    #[error("unreadable document: {0}")]
    Unreadable(UnreadableReason),
}

/// A single non-blank line of extracted text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub text: String,
    pub kind: LineKind,
    /// Longest run of inner whitespace. Wide gaps are left by side-by-side columns.
    pub widest_gap: usize,
}

/// A line flagged as a probable section heading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionHint {
    pub line_index: usize,
    pub title: String,
}

/// Character statistics of the raw extraction, before normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TextStats {
    pub total_chars: usize,
    /// Control characters other than newline and tab.
    pub non_printable: usize,
    /// Spaces or tabs directly following another space or tab.
    pub repeated_whitespace: usize,
    /// U+FFFD and private-use glyphs that are not leading bullet markers.
    pub replacement_glyphs: usize,
    /// `(cid:N)` placeholders left by fonts without a unicode map.
    pub cid_artifacts: usize,
}

/// Normalized resume content. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedText {
    lines: Vec<Line>,
    sections: Vec<SectionHint>,
    stats: TextStats,
    page_count: Option<usize>,
}

impl ExtractedText {
    /// Normalizes text that did not come from a PDF (e.g. a pasted resume).
    pub fn from_plain_text(text: &str) -> Self {
        Self::from_raw(text, None)
    }

    pub(crate) fn from_raw(raw: &str, page_count: Option<usize>) -> Self {
        let stats = lines::compute_stats(raw);
        let lines = lines::split_lines(raw);
        let sections = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.kind == LineKind::Heading)
            .map(|(line_index, line)| SectionHint {
                line_index,
                title: line.text.trim_end_matches(':').trim().to_string(),
            })
            .collect();

        Self {
            lines,
            sections,
            stats,
            page_count,
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn sections(&self) -> &[SectionHint] {
        &self.sections
    }

    pub fn stats(&self) -> &TextStats {
        &self.stats
    }

    pub fn page_count(&self) -> Option<usize> {
        self.page_count
    }

    pub fn is_empty(&self) -> bool {
        !self
            .lines
            .iter()
            .any(|l| l.text.chars().any(char::is_alphanumeric))
    }

    /// Line texts joined with `\n`.
    pub fn joined(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Bullet lines merged with their wrapped continuation lines, marker stripped.
    pub fn bullet_units(&self) -> Vec<String> {
        let mut units: Vec<String> = Vec::new();
        let mut current: Option<String> = None;

        for line in &self.lines {
            match line.kind {
                LineKind::Bullet => {
                    if let Some(done) = current.take() {
                        units.push(done);
                    }
                    let marker = bullet_marker_len(&line.text).unwrap_or(0);
                    current = Some(line.text[marker..].trim().to_string());
                }
                LineKind::Body => {
                    if let Some(unit) = current.as_mut() {
                        if is_continuation(unit, &line.text) {
                            unit.push(' ');
                            unit.push_str(&line.text);
                            continue;
                        }
                        if let Some(done) = current.take() {
                            units.push(done);
                        }
                    }
                }
                LineKind::Heading => {
                    if let Some(done) = current.take() {
                        units.push(done);
                    }
                }
            }
        }
        if let Some(done) = current {
            units.push(done);
        }
        units
    }

    /// Every non-heading run of text: bullet units plus body paragraphs, each
    /// merged with its wrapped continuation lines.
    pub fn text_units(&self) -> Vec<String> {
        let mut units: Vec<String> = Vec::new();
        let mut current: Option<String> = None;

        for line in &self.lines {
            match line.kind {
                LineKind::Heading => {
                    if let Some(done) = current.take() {
                        units.push(done);
                    }
                }
                LineKind::Bullet => {
                    if let Some(done) = current.take() {
                        units.push(done);
                    }
                    let marker = bullet_marker_len(&line.text).unwrap_or(0);
                    current = Some(line.text[marker..].trim().to_string());
                }
                LineKind::Body => {
                    let continues = current
                        .as_deref()
                        .is_some_and(|unit| is_continuation(unit, &line.text));
                    if continues {
                        if let Some(unit) = current.as_mut() {
                            unit.push(' ');
                            unit.push_str(&line.text);
                        }
                    } else {
                        if let Some(done) = current.take() {
                            units.push(done);
                        }
                        current = Some(line.text.clone());
                    }
                }
            }
        }
        if let Some(done) = current {
            units.push(done);
        }
        units
    }
}

/// A body line continues the previous bullet when the bullet did not end a
/// sentence, or when the line starts in lower case.
fn is_continuation(unit: &str, next: &str) -> bool {
    let unit_open = !unit.ends_with(['.', '!', '?']);
    let starts_lower = next.chars().next().is_some_and(char::is_lowercase);
    unit_open || starts_lower
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "JANE DOE\n\
        jane.doe@example.com | (555) 123-4567\n\
        \n\
        EXPERIENCE\n\
        • Increased throughput by 30% across the\n\
        ingestion pipeline\n\
        • Mentored 4 engineers.\n\
        Acme Corp 2019 - 2023\n\
        Education\n\
        BSc Computer Science\n";

    #[test]
    fn test_blank_lines_dropped() {
        let text = ExtractedText::from_plain_text(RESUME);
        assert!(text.lines().iter().all(|l| !l.text.is_empty()));
        assert_eq!(text.lines().len(), 9);
    }

    #[test]
    fn test_section_hints_collected() {
        let text = ExtractedText::from_plain_text(RESUME);
        let titles: Vec<&str> = text.sections().iter().map(|s| s.title.as_str()).collect();
        assert!(titles.contains(&"EXPERIENCE"));
        assert!(titles.contains(&"Education"));
        assert!(!titles.iter().any(|t| t.contains('@')));
    }

    #[test]
    fn test_bullet_units_merge_wrapped_lines() {
        let text = ExtractedText::from_plain_text(RESUME);
        let units = text.bullet_units();
        assert_eq!(units.len(), 2);
        assert_eq!(
            units[0],
            "Increased throughput by 30% across the ingestion pipeline"
        );
        assert_eq!(units[1], "Mentored 4 engineers.");
    }

    #[test]
    fn test_text_units_skip_headings() {
        let text = ExtractedText::from_plain_text(RESUME);
        let units = text.text_units();
        assert_eq!(units[0], "jane.doe@example.com | (555) 123-4567");
        assert_eq!(
            units[1],
            "Increased throughput by 30% across the ingestion pipeline"
        );
        assert!(units.iter().all(|u| u != "EXPERIENCE" && u != "Education"));
        assert_eq!(units.last().map(String::as_str), Some("BSc Computer Science"));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(ExtractedText::from_plain_text("  \n\n\t \x0c ").is_empty());
        assert!(!ExtractedText::from_plain_text("Rust").is_empty());
    }

    #[test]
    fn test_reason_display_mentions_scan() {
        assert!(UnreadableReason::NoTextLayer.to_string().contains("scanned"));
    }
}
