//! Requirement extraction: the skills a job description asks for.

use std::collections::HashSet;

use serde::Serialize;

use crate::skills::taxonomy::{SkillId, SkillTaxonomy};
use crate::skills::tokenize::tokenize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredSkill {
    #[serde(skip)]
    pub id: SkillId,
    pub name: String,
}

/// Canonical skills named by a JD, in order of first appearance, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequiredSkillSet {
    skills: Vec<RequiredSkill>,
}

impl RequiredSkillSet {
    pub fn skills(&self) -> &[RequiredSkill] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.name.as_str())
    }
}

/// Scans JD text for taxonomy skills.
///
/// At each position the longest known token run wins, so "machine learning"
/// yields one skill rather than a second hit on a shorter form inside it.
/// Tokens that start no known form are skipped.
pub fn extract_required_skills(jd_text: &str, taxonomy: &SkillTaxonomy) -> RequiredSkillSet {
    let tokens = tokenize(jd_text);
    let mut seen: HashSet<SkillId> = HashSet::new();
    let mut skills = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let longest = taxonomy.max_form_len().min(tokens.len() - i);
        let hit = (1..=longest)
            .rev()
            .find_map(|len| taxonomy.lookup(&tokens[i..i + len]).map(|id| (id, len)));

        match hit {
            Some((id, len)) => {
                if seen.insert(id) {
                    skills.push(RequiredSkill {
                        id,
                        name: taxonomy.name(id).to_string(),
                    });
                }
                i += len;
            }
            None => i += 1,
        }
    }

    RequiredSkillSet { skills }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> SkillTaxonomy {
        SkillTaxonomy::builtin().unwrap()
    }

    fn names(jd: &str) -> Vec<String> {
        extract_required_skills(jd, &taxonomy())
            .names()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_key_skills_list_in_first_appearance_order() {
        assert_eq!(
            names("Python, Rust, Kubernetes, AWS"),
            vec!["Python", "Rust", "Kubernetes", "AWS"]
        );
    }

    #[test]
    fn test_synonyms_resolve_to_canonical_and_dedupe() {
        assert_eq!(
            names("Strong ML background. Machine learning in production, k8s and Kubernetes."),
            vec!["Machine Learning", "Kubernetes"]
        );
    }

    #[test]
    fn test_multi_word_skill_preferred_over_parts() {
        assert_eq!(names("Experience with Ruby on Rails"), vec!["Ruby on Rails"]);
    }

    #[test]
    fn test_plural_form_of_known_skill() {
        assert_eq!(names("Familiarity with WebSockets and REST APIs"), vec!["WebSockets", "REST"]);
    }

    #[test]
    fn test_unknown_words_dropped() {
        assert!(names("We value curiosity, ownership and kindness").is_empty());
    }

    #[test]
    fn test_empty_and_whitespace_jd() {
        assert!(extract_required_skills("", &taxonomy()).is_empty());
        assert!(extract_required_skills("   \n\t ", &taxonomy()).is_empty());
    }

    #[test]
    fn test_everyday_go_is_not_a_skill() {
        assert!(names("You will go above and beyond").is_empty());
        assert_eq!(names("Go or Rust"), vec!["Go", "Rust"]);
    }

    #[test]
    fn test_java_and_javascript_are_distinct() {
        assert_eq!(names("JavaScript"), vec!["JavaScript"]);
        assert_eq!(names("Java and JavaScript"), vec!["Java", "JavaScript"]);
    }
}
