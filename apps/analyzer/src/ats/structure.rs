//! Section structure: up to 5 points each for contact, experience, education
//! and skills sections.

use crate::ats::config::StructureConfig;
use crate::ats::{AtsCategory, ScoringInput, SubScorer};
use crate::contact::{contains_email, contains_phone};
use crate::extraction::{ExtractedText, LineKind};

const POINTS_PER_SECTION: u32 = 5;

/// Non-heading lines this short may still be a bare section title ("Skills").
const MAX_BARE_TITLE_WORDS: usize = 4;

const IGNORED_TITLE_WORDS: &[&str] = &["and", "of", "the", "&", "my"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionCategory {
    Contact,
    Experience,
    Education,
    Skills,
}

impl SectionCategory {
    pub const ALL: [SectionCategory; 4] = [
        SectionCategory::Contact,
        SectionCategory::Experience,
        SectionCategory::Education,
        SectionCategory::Skills,
    ];
}

pub struct StructureScorer {
    titles: Vec<(SectionCategory, Vec<Vec<String>>)>,
    contact_header_lines: usize,
}

impl StructureScorer {
    pub fn new(config: &StructureConfig) -> Self {
        let normalize_all = |list: &[String]| -> Vec<Vec<String>> {
            list.iter()
                .map(|t| title_words(t))
                .filter(|w| !w.is_empty())
                .collect()
        };
        Self {
            titles: vec![
                (SectionCategory::Contact, normalize_all(&config.contact_titles)),
                (SectionCategory::Experience, normalize_all(&config.experience_titles)),
                (SectionCategory::Education, normalize_all(&config.education_titles)),
                (SectionCategory::Skills, normalize_all(&config.skills_titles)),
            ],
            contact_header_lines: config.contact_header_lines,
        }
    }

    /// Section categories present in the resume, in fixed category order.
    pub fn detect(&self, text: &ExtractedText) -> Vec<SectionCategory> {
        let mut found: Vec<SectionCategory> = Vec::new();

        for line in text.lines() {
            if line.kind == LineKind::Bullet {
                continue;
            }
            let words = title_words(line.text.trim_end_matches(':'));
            if words.is_empty() {
                continue;
            }
            for (category, titles) in &self.titles {
                if found.contains(category) {
                    continue;
                }
                let hit = match line.kind {
                    LineKind::Heading => titles.iter().any(|t| words.starts_with(t)),
                    _ => {
                        words.len() <= MAX_BARE_TITLE_WORDS && titles.iter().any(|t| *t == words)
                    }
                };
                if hit {
                    found.push(*category);
                }
            }
        }

        if !found.contains(&SectionCategory::Contact) && self.has_contact_header(text) {
            found.push(SectionCategory::Contact);
        }

        SectionCategory::ALL
            .into_iter()
            .filter(|c| found.contains(c))
            .collect()
    }

    fn has_contact_header(&self, text: &ExtractedText) -> bool {
        text.lines()
            .iter()
            .take(self.contact_header_lines)
            .any(|l| contains_email(&l.text) || contains_phone(&l.text))
    }
}

impl SubScorer for StructureScorer {
    fn category(&self) -> AtsCategory {
        AtsCategory::Structure
    }

    fn score(&self, input: &ScoringInput<'_>) -> u32 {
        self.detect(input.text).len() as u32 * POINTS_PER_SECTION
    }
}

fn title_words(title: &str) -> Vec<String> {
    title
        .split(|c: char| !c.is_alphanumeric() && c != '&')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .filter(|w| !IGNORED_TITLE_WORDS.contains(&w.as_str()))
        .collect()
}
