//! Measurable impact: points for each achievement that carries a number.

use std::sync::LazyLock;

use regex::Regex;

use crate::ats::config::MeasurableConfig;
use crate::ats::{AtsCategory, ScoringInput, SubScorer};
use crate::contact::{contains_email, contains_phone};
use crate::extraction::{ExtractedText, LineKind};

/// "2021", "01/2020", "2020-03", "2019-2023".
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,2}/)?(?:19|20)\d{2}(?:[-/–](?:\d{1,2}|(?:19|20)\d{2}))?$").unwrap()
});

/// Body lines shorter than this are labels ("GPA 3.6"), not achievements.
const MIN_BODY_UNIT_WORDS: usize = 4;

const CURRENCY: &[char] = &['$', '€', '£', '¥', '₹'];

const NUMBER_WORDS: &[&str] = &[
    "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "twelve", "twenty",
    "dozen", "dozens", "hundred", "hundreds", "thousands", "millions", "double", "doubled",
    "tripled",
];

pub struct MeasurableScorer {
    points_per_hit: u32,
    unit_words: Vec<String>,
}

impl MeasurableScorer {
    pub fn new(config: &MeasurableConfig) -> Self {
        Self {
            points_per_hit: config.points_per_hit,
            unit_words: config.unit_words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Achievement units that carry a quantified signal.
    pub fn quantified_units(&self, text: &ExtractedText) -> usize {
        let units = achievement_units(text);
        units.iter().filter(|u| self.is_quantified(u)).count()
    }

    /// A number that is not a bare year, a percent sign, a currency symbol,
    /// or a spelled-out number directly followed by a unit word.
    pub fn is_quantified(&self, unit: &str) -> bool {
        if unit.contains('%') || unit.contains(CURRENCY) {
            return true;
        }

        let words: Vec<String> = unit
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric() && c != '~' && c != '+')
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect();

        if words.iter().any(|w| is_numeric_token(w)) {
            return true;
        }

        words.windows(2).any(|pair| {
            NUMBER_WORDS.contains(&pair[0].as_str()) && self.is_unit_word(&pair[1])
        })
    }

    fn is_unit_word(&self, word: &str) -> bool {
        self.unit_words
            .iter()
            .any(|u| u == word || u.strip_suffix('s') == Some(word))
    }
}

impl SubScorer for MeasurableScorer {
    fn category(&self) -> AtsCategory {
        AtsCategory::Measurable
    }

    fn score(&self, input: &ScoringInput<'_>) -> u32 {
        (self.quantified_units(input.text) as u32).saturating_mul(self.points_per_hit)
    }
}

/// Bullets with their wrapped continuations. A resume without bullets is judged
/// on its body lines instead, minus contact lines and short labels.
fn achievement_units(text: &ExtractedText) -> Vec<String> {
    if text.lines().iter().any(|l| l.kind == LineKind::Bullet) {
        return text.bullet_units();
    }
    text.lines()
        .iter()
        .filter(|l| l.kind == LineKind::Body)
        .filter(|l| !contains_phone(&l.text) && !contains_email(&l.text))
        .filter(|l| l.text.split_whitespace().count() >= MIN_BODY_UNIT_WORDS)
        .map(|l| l.text.clone())
        .collect()
}

/// "40", "~2", "10k", "100k+", "800ms", "3x", "1.5". Years and month dates are not metrics.
fn is_numeric_token(word: &str) -> bool {
    let body = word.trim_start_matches(['~', '+']);
    body.starts_with(|c: char| c.is_ascii_digit()) && !DATE_RE.is_match(body)
}
