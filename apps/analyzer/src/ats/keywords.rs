//! Keyword coverage: the share of JD skills the resume mentions, out of 30.

use crate::ats::{AtsCategory, ScoringInput, SubScorer};
use crate::skills::rounded_share;

pub struct KeywordScorer;

impl SubScorer for KeywordScorer {
    fn category(&self) -> AtsCategory {
        AtsCategory::Keywords
    }

    /// `round(30 * matched / required)`. No required skills means nothing to judge: 0.
    fn score(&self, input: &ScoringInput<'_>) -> u32 {
        let matched = input.matches.matched.len();
        let required = input.matches.required_count();
        rounded_share(matched, required, AtsCategory::Keywords.cap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ExtractedText;
    use crate::skills::MatchResult;

    fn score(matched: usize, missing: usize) -> u32 {
        let matches = MatchResult {
            matched: (0..matched).map(|i| format!("m{i}")).collect(),
            missing: (0..missing).map(|i| format!("x{i}")).collect(),
            percentage: 0,
        };
        let text = ExtractedText::from_plain_text("resume");
        KeywordScorer.score(&ScoringInput {
            text: &text,
            matches: &matches,
        })
    }

    #[test]
    fn test_no_required_skills_scores_zero() {
        assert_eq!(score(0, 0), 0);
    }

    #[test]
    fn test_full_coverage_scores_cap() {
        assert_eq!(score(4, 0), 30);
    }

    #[test]
    fn test_partial_coverage_rounds_half_up() {
        assert_eq!(score(2, 2), 15);
        assert_eq!(score(1, 3), 8); // 7.5
        assert_eq!(score(0, 5), 0);
    }
}
