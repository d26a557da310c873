//! Formatting hygiene: 15 points minus fixed penalties for extraction artifacts.

use crate::ats::config::FormattingConfig;
use crate::ats::{AtsCategory, ScoringInput, SubScorer};
use crate::extraction::{ExtractedText, Line, LineKind};

/// Detected anti-patterns. Each one costs its configured penalty once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormattingIssue {
    Garbled,
    Noise,
    MultiColumn,
}

pub struct FormattingScorer {
    config: FormattingConfig,
}

impl FormattingScorer {
    pub fn new(config: &FormattingConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn issues(&self, text: &ExtractedText) -> Vec<FormattingIssue> {
        let mut issues = Vec::new();
        if self.is_garbled(text) {
            issues.push(FormattingIssue::Garbled);
        }
        if self.is_noisy(text) {
            issues.push(FormattingIssue::Noise);
        }
        if self.is_multi_column(text) {
            issues.push(FormattingIssue::MultiColumn);
        }
        issues
    }

    fn penalty(&self, issue: FormattingIssue) -> u32 {
        match issue {
            FormattingIssue::Garbled => self.config.garbled_penalty,
            FormattingIssue::Noise => self.config.whitespace_penalty,
            FormattingIssue::MultiColumn => self.config.multi_column_penalty,
        }
    }

    fn is_garbled(&self, text: &ExtractedText) -> bool {
        let lines = text.lines();
        if lines.is_empty() {
            return false;
        }
        let garbled = lines.iter().filter(|l| self.is_garbled_line(l)).count();
        garbled > 0 && ratio(garbled, lines.len()) >= self.config.garbled_line_ratio
    }

    fn is_garbled_line(&self, line: &Line) -> bool {
        let text = line.text.as_str();
        if text.contains('\u{fffd}') || text.contains("(cid:") {
            return true;
        }
        // A private-use glyph is fine as a leading bullet, not mid-line.
        if text.chars().skip(1).any(is_private_use) {
            return true;
        }
        text.split_whitespace().any(|token| {
            token.chars().count() > self.config.fused_token_len
                && !token.contains(['@', '/'])
                && !token.starts_with("www.")
        })
    }

    fn is_noisy(&self, text: &ExtractedText) -> bool {
        let stats = text.stats();
        if stats.total_chars == 0 {
            return false;
        }
        let noise = stats.non_printable + stats.repeated_whitespace;
        ratio(noise, stats.total_chars) > self.config.max_noise_ratio
    }

    /// Side-by-side columns either survive as wide inner gaps or get interleaved
    /// into a stream of one- and two-word fragments.
    fn is_multi_column(&self, text: &ExtractedText) -> bool {
        let lines = text.lines();
        if lines.is_empty() {
            return false;
        }

        let gapped = lines
            .iter()
            .filter(|l| l.widest_gap >= self.config.column_gap)
            .count();
        if gapped >= 3 && ratio(gapped, lines.len()) >= self.config.column_gap_line_ratio {
            return true;
        }

        if lines.len() < self.config.min_lines {
            return false;
        }
        let fragments = lines
            .iter()
            .filter(|l| l.kind != LineKind::Bullet && l.text.split_whitespace().count() <= 2)
            .count();
        ratio(fragments, lines.len()) >= self.config.fragment_line_ratio
    }
}

impl SubScorer for FormattingScorer {
    fn category(&self) -> AtsCategory {
        AtsCategory::Formatting
    }

    fn score(&self, input: &ScoringInput<'_>) -> u32 {
        self.issues(input.text)
            .into_iter()
            .fold(AtsCategory::Formatting.cap(), |score, issue| {
                score.saturating_sub(self.penalty(issue))
            })
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64
}

fn is_private_use(c: char) -> bool {
    ('\u{e000}'..='\u{f8ff}').contains(&c)
}
