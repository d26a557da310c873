//! Tunable thresholds for the ATS sub-scorers.
//!
//! Every field has a default, so a JSON override only needs the keys it changes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub structure: StructureConfig,
    pub measurable: MeasurableConfig,
    pub formatting: FormattingConfig,
    pub readability: ReadabilityConfig,
}

impl ScoringConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid scoring config {}", path.display()))
    }
}

/// Section titles per category, compared case-insensitively on whole words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    pub contact_titles: Vec<String>,
    pub experience_titles: Vec<String>,
    pub education_titles: Vec<String>,
    pub skills_titles: Vec<String>,
    /// An email or phone number within this many leading lines counts as a contact header.
    pub contact_header_lines: usize,
}

impl Default for StructureConfig {
    fn default() -> Self {
        fn titles(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        Self {
            contact_titles: titles(&[
                "contact",
                "contact information",
                "contact details",
                "personal details",
                "personal information",
            ]),
            experience_titles: titles(&[
                "experience",
                "work experience",
                "professional experience",
                "employment",
                "employment history",
                "work history",
                "career history",
                "relevant experience",
                "internships",
            ]),
            education_titles: titles(&[
                "education",
                "academic background",
                "academics",
                "qualifications",
                "academic qualifications",
                "education and training",
            ]),
            skills_titles: titles(&[
                "skills",
                "technical skills",
                "core competencies",
                "competencies",
                "technologies",
                "tech stack",
                "expertise",
                "areas of expertise",
                "tools",
            ]),
            contact_header_lines: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurableConfig {
    /// Points per quantified bullet; the category cap is reached at 20 / points_per_hit hits.
    pub points_per_hit: u32,
    pub unit_words: Vec<String>,
}

impl Default for MeasurableConfig {
    fn default() -> Self {
        Self {
            points_per_hit: 5,
            unit_words: [
                "users",
                "customers",
                "clients",
                "hours",
                "days",
                "weeks",
                "months",
                "engineers",
                "people",
                "projects",
                "teams",
                "requests",
                "percent",
                "dollars",
                "million",
                "thousand",
                "times",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingConfig {
    pub garbled_penalty: u32,
    pub whitespace_penalty: u32,
    pub multi_column_penalty: u32,
    /// Share of lines with replacement glyphs or fused words that counts as garbled.
    pub garbled_line_ratio: f64,
    /// Tokens longer than this, without a URL or email shape, look like fused text.
    pub fused_token_len: usize,
    /// Share of non-printable plus repeated-whitespace characters tolerated.
    pub max_noise_ratio: f64,
    /// Inner gap (in spaces) that separates two columns on one line.
    pub column_gap: usize,
    pub column_gap_line_ratio: f64,
    /// Share of one- or two-word non-bullet lines that suggests interleaved columns.
    pub fragment_line_ratio: f64,
    /// The fragment-line ratio is only judged once a resume has this many lines.
    pub min_lines: usize,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            garbled_penalty: 5,
            whitespace_penalty: 5,
            multi_column_penalty: 5,
            garbled_line_ratio: 0.05,
            fused_token_len: 30,
            max_noise_ratio: 0.15,
            column_gap: 4,
            column_gap_line_ratio: 0.2,
            fragment_line_ratio: 0.5,
            min_lines: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilityConfig {
    /// Average words per sentence or bullet scoring full marks.
    pub ideal_min_words: f64,
    pub ideal_max_words: f64,
    /// Beyond this average a unit reads as run-on.
    pub long_max_words: f64,
    /// Below this average units are fragments rather than sentences.
    pub short_min_words: f64,
    /// Average letters per word for full, partial and minimal credit.
    pub word_len_good: f64,
    pub word_len_fair: f64,
    pub word_len_poor: f64,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self {
            ideal_min_words: 8.0,
            ideal_max_words: 20.0,
            long_max_words: 30.0,
            short_min_words: 4.0,
            word_len_good: 5.5,
            word_len_fair: 6.5,
            word_len_poor: 7.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{"measurable": {"points_per_hit": 4}}"#).unwrap();
        assert_eq!(config.measurable.points_per_hit, 4);
        assert!(!config.measurable.unit_words.is_empty());
        assert_eq!(config.readability, ReadabilityConfig::default());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"formatting": {{"column_gap": 6}}}}"#).unwrap();
        let config = ScoringConfig::from_path(file.path()).unwrap();
        assert_eq!(config.formatting.column_gap, 6);
        assert_eq!(config.formatting.garbled_penalty, 5);
    }

    #[test]
    fn test_from_path_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(ScoringConfig::from_path(file.path()).is_err());
    }
}
