// ATS compatibility scoring: five independent sub-scorers composed by one aggregator.
// Sub-scorers are pure and Send + Sync; they share no state and may run in any order.

pub mod config;
pub mod formatting;
pub mod keywords;
pub mod measurable;
pub mod readability;
pub mod structure;

use serde::{Deserialize, Serialize};

use crate::extraction::ExtractedText;
use crate::skills::MatchResult;

pub use config::ScoringConfig;

/// The five sub-score categories and their caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtsCategory {
    Keywords,
    Structure,
    Measurable,
    Formatting,
    Readability,
}

impl AtsCategory {
    pub const ALL: [AtsCategory; 5] = [
        AtsCategory::Keywords,
        AtsCategory::Structure,
        AtsCategory::Measurable,
        AtsCategory::Formatting,
        AtsCategory::Readability,
    ];

    pub const fn cap(self) -> u32 {
        match self {
            AtsCategory::Keywords => 30,
            AtsCategory::Structure => 20,
            AtsCategory::Measurable => 20,
            AtsCategory::Formatting => 15,
            AtsCategory::Readability => 15,
        }
    }
}

/// Fixed-shape sub-score record. Field names are the wire contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsBreakdown {
    pub keywords: u32,
    pub structure: u32,
    pub measurable: u32,
    pub formatting: u32,
    pub readability: u32,
}

impl AtsBreakdown {
    pub fn get(&self, category: AtsCategory) -> u32 {
        match category {
            AtsCategory::Keywords => self.keywords,
            AtsCategory::Structure => self.structure,
            AtsCategory::Measurable => self.measurable,
            AtsCategory::Formatting => self.formatting,
            AtsCategory::Readability => self.readability,
        }
    }

    fn set(&mut self, category: AtsCategory, value: u32) {
        let slot = match category {
            AtsCategory::Keywords => &mut self.keywords,
            AtsCategory::Structure => &mut self.structure,
            AtsCategory::Measurable => &mut self.measurable,
            AtsCategory::Formatting => &mut self.formatting,
            AtsCategory::Readability => &mut self.readability,
        };
        *slot = value;
    }

    pub fn total(&self) -> u32 {
        AtsCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Categories whose value exceeds the cap. Empty for every scorer-produced record.
    pub fn cap_violations(&self) -> Vec<AtsCategory> {
        AtsCategory::ALL
            .into_iter()
            .filter(|c| self.get(*c) > c.cap())
            .collect()
    }
}

/// Everything a sub-scorer may look at. Borrowed, immutable.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub text: &'a ExtractedText,
    pub matches: &'a MatchResult,
}

pub trait SubScorer: Send + Sync {
    fn category(&self) -> AtsCategory;

    /// Raw score; the aggregator clamps it to the category cap.
    fn score(&self, input: &ScoringInput<'_>) -> u32;
}

/// Runs every sub-scorer once and assembles the breakdown.
pub struct AtsScorer {
    scorers: Vec<Box<dyn SubScorer>>,
}

impl AtsScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            scorers: vec![
                Box::new(keywords::KeywordScorer),
                Box::new(structure::StructureScorer::new(&config.structure)),
                Box::new(measurable::MeasurableScorer::new(&config.measurable)),
                Box::new(formatting::FormattingScorer::new(&config.formatting)),
                Box::new(readability::ReadabilityScorer::new(&config.readability)),
            ],
        }
    }

    pub fn score(&self, input: &ScoringInput<'_>) -> AtsBreakdown {
        let mut breakdown = AtsBreakdown::default();
        for scorer in &self.scorers {
            let category = scorer.category();
            breakdown.set(category, scorer.score(input).min(category.cap()));
        }
        breakdown
    }
}

impl Default for AtsScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}
