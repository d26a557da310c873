//! Readability: sentence length (0-10) plus word length (0-5).

use tracing::debug;

use crate::ats::config::ReadabilityConfig;
use crate::ats::{AtsCategory, ScoringInput, SubScorer};
use crate::extraction::ExtractedText;

/// Units shorter than this are labels or contact lines, not prose.
const MIN_SENTENCE_WORDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadabilityStats {
    pub sentences: usize,
    pub avg_words_per_sentence: f64,
    pub avg_word_len: f64,
}

pub struct ReadabilityScorer {
    config: ReadabilityConfig,
}

impl ReadabilityScorer {
    pub fn new(config: &ReadabilityConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn sentence_points(&self, avg: f64) -> u32 {
        let c = &self.config;
        if (c.ideal_min_words..=c.ideal_max_words).contains(&avg) {
            10
        } else if avg > c.long_max_words {
            2
        } else if avg < c.short_min_words {
            3
        } else {
            6
        }
    }

    fn word_len_points(&self, avg: f64) -> u32 {
        let c = &self.config;
        if avg <= c.word_len_good {
            5
        } else if avg <= c.word_len_fair {
            4
        } else if avg <= c.word_len_poor {
            2
        } else {
            1
        }
    }
}

impl SubScorer for ReadabilityScorer {
    fn category(&self) -> AtsCategory {
        AtsCategory::Readability
    }

    fn score(&self, input: &ScoringInput<'_>) -> u32 {
        match measure(input.text) {
            Some(stats) => {
                debug!(
                    sentences = stats.sentences,
                    avg_words = stats.avg_words_per_sentence,
                    avg_word_len = stats.avg_word_len,
                    "Readability measured"
                );
                self.sentence_points(stats.avg_words_per_sentence)
                    + self.word_len_points(stats.avg_word_len)
            }
            None => 0,
        }
    }
}

/// Sentence and word statistics over headings-free text. `None` when no unit
/// is long enough to read as a sentence.
pub fn measure(text: &ExtractedText) -> Option<ReadabilityStats> {
    let mut sentences = 0usize;
    let mut words = 0usize;
    let mut letters = 0usize;
    let mut lettered_words = 0usize;

    for unit in text.text_units() {
        for sentence in split_sentences(&unit) {
            if sentence.len() < MIN_SENTENCE_WORDS {
                continue;
            }
            sentences += 1;
            words += sentence.len();
            for word in sentence {
                let n = word.chars().filter(|c| c.is_alphabetic()).count();
                if n > 0 {
                    letters += n;
                    lettered_words += 1;
                }
            }
        }
    }

    if sentences == 0 || lettered_words == 0 {
        return None;
    }
    Some(ReadabilityStats {
        sentences,
        avg_words_per_sentence: words as f64 / sentences as f64,
        avg_word_len: letters as f64 / lettered_words as f64,
    })
}

/// Words grouped into sentences; a word ending in `.`, `!` or `?` closes one.
fn split_sentences(unit: &str) -> Vec<Vec<&str>> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();
    for word in unit.split_whitespace() {
        if !word.chars().any(char::is_alphanumeric) {
            continue;
        }
        current.push(word);
        if word.ends_with(['.', '!', '?']) {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::MatchResult;

    fn score(resume: &str) -> u32 {
        let text = ExtractedText::from_plain_text(resume);
        let matches = MatchResult::default();
        ReadabilityScorer::new(&ReadabilityConfig::default()).score(&ScoringInput {
            text: &text,
            matches: &matches,
        })
    }

    #[test]
    fn test_concise_bullets_score_full() {
        let resume = "Experience\n\
            • Built a cache that cut page load time in half.\n\
            • Led a team of six on the new billing flow.\n\
            • Wrote the test plan used by all our web teams.\n";
        assert_eq!(score(resume), 15);
    }

    #[test]
    fn test_run_on_bullet_scores_low() {
        let resume = "• Responsible for the end to end ownership of many different \
            internal and external services and tools that were used across the \
            whole organisation by a large number of teams working in many offices \
            around the world on everything from billing to search to payments";
        let stats = measure(&ExtractedText::from_plain_text(resume)).unwrap();
        assert!(stats.avg_words_per_sentence > 30.0);
        assert!(score(resume) <= 7);
    }

    #[test]
    fn test_long_words_lose_points() {
        let resume = "• Internationalization infrastructure standardization initiatives.\n\
            • Comprehensive microservices observability instrumentation.\n";
        // four words per sentence: short but not fragments
        assert_eq!(score(resume), 6 + 1);
    }

    #[test]
    fn test_no_prose_scores_zero() {
        assert_eq!(score("SKILLS\nRust, Go"), 0);
        assert_eq!(score(""), 0);
    }

    #[test]
    fn test_sentences_split_inside_paragraph() {
        let text = ExtractedText::from_plain_text(
            "Summary\nI build payment systems. I care about reliability and testing.",
        );
        let stats = measure(&text).unwrap();
        assert_eq!(stats.sentences, 2);
        assert!((stats.avg_words_per_sentence - 5.0).abs() < f64::EPSILON);
    }
}
