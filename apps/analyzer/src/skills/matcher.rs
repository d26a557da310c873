//! Skill matching: which required skills the resume actually mentions.

use serde::Serialize;

use crate::extraction::ExtractedText;
use crate::skills::requirements::RequiredSkillSet;
use crate::skills::rounded_share;
use crate::skills::taxonomy::{SkillId, SkillTaxonomy};
use crate::skills::tokenize::{tokenize, Token};

/// Outcome of matching: every required skill lands in exactly one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// round(|matched| / |required| * 100); 0 when nothing is required.
    pub percentage: u32,
}

impl MatchResult {
    pub fn required_count(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}

/// Classifies each required skill as present or absent in the resume.
///
/// Each skill is searched independently with all of its surface forms, on token
/// boundaries: "java" never matches inside "javascript".
pub fn match_skills(
    required: &RequiredSkillSet,
    resume: &ExtractedText,
    taxonomy: &SkillTaxonomy,
) -> MatchResult {
    let text = resume.joined();
    let tokens = tokenize(&text);

    let mut result = MatchResult::default();
    for skill in required.skills() {
        if mentions(&tokens, taxonomy, skill.id) {
            result.matched.push(skill.name.clone());
        } else {
            result.missing.push(skill.name.clone());
        }
    }
    result.percentage = rounded_share(result.matched.len(), required.len(), 100);
    result
}

fn mentions(tokens: &[Token<'_>], taxonomy: &SkillTaxonomy, id: SkillId) -> bool {
    taxonomy.forms(id).iter().any(|form| {
        let width = form.tokens.len();
        width <= tokens.len() && tokens.windows(width).any(|window| form.matches(window))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::requirements::extract_required_skills;

    fn run(resume: &str, jd: &str) -> MatchResult {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        let required = extract_required_skills(jd, &taxonomy);
        match_skills(&required, &ExtractedText::from_plain_text(resume), &taxonomy)
    }

    #[test]
    fn test_half_of_required_skills_matched() {
        let result = run(
            "Experienced with Python, Go, and Kubernetes",
            "Python, Rust, Kubernetes, AWS",
        );
        assert_eq!(result.matched, vec!["Python", "Kubernetes"]);
        assert_eq!(result.missing, vec!["Rust", "AWS"]);
        assert_eq!(result.percentage, 50);
    }

    #[test]
    fn test_java_not_matched_inside_javascript() {
        let result = run("Five years of JavaScript", "Java");
        assert_eq!(result.matched, Vec::<String>::new());
        assert_eq!(result.missing, vec!["Java"]);
    }

    #[test]
    fn test_synonym_in_resume_matches_canonical() {
        let result = run("Deployed services on k8s with Golang", "Kubernetes and Go");
        assert_eq!(result.matched, vec!["Kubernetes", "Go"]);
    }

    #[test]
    fn test_multi_word_skill_split_across_lines() {
        let result = run("Applied machine\nlearning to fraud", "Machine Learning");
        assert_eq!(result.percentage, 100);
    }

    #[test]
    fn test_empty_requirements_yield_zero() {
        let result = run("Python everywhere", "");
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
        assert_eq!(result.percentage, 0);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 1 of 3 -> 33.3 -> 33; 2 of 3 -> 66.7 -> 67
        assert_eq!(run("Python", "Python Rust AWS").percentage, 33);
        assert_eq!(run("Python Rust", "Python Rust AWS").percentage, 67);
        // 1 of 8 -> 12.5 -> 13
        assert_eq!(
            run(
                "Python",
                "Python Rust AWS Docker Terraform Kafka Redis Scala"
            )
            .percentage,
            13
        );
    }

    #[test]
    fn test_matched_and_missing_partition_required() {
        let result = run("Rust and Docker", "Rust, Docker, Kafka, Rust");
        assert_eq!(result.required_count(), 3);
        assert!(result.matched.iter().all(|m| !result.missing.contains(m)));
    }
}
