//! Skill taxonomy: the static catalog mapping canonical skill names to their
//! surface forms. Loaded once at startup, shared read-only via `Arc`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::skills::tokenize::{normalize_form, tokenize, Token};

/// Catalog compiled into the binary. Overridden with `SKILL_TAXONOMY_PATH`.
const BUILTIN_TAXONOMY: &str = include_str!("../../data/skills.json");

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("failed to read skill taxonomy {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid skill taxonomy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("skill taxonomy is empty")]
    Empty,

    #[error("skill #{0} has an empty name")]
    EmptyName(usize),

    #[error("skill '{0}' is declared more than once")]
    DuplicateName(String),

    #[error("surface form '{form}' is claimed by both '{first}' and '{second}'")]
    ConflictingForm {
        form: String,
        first: String,
        second: String,
    },
}

/// One catalog entry as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// The bare canonical name is also an everyday word ("Go", "Swift").
    /// It then only matches with the capitalization given here, or in all caps.
    #[serde(default)]
    pub ambiguous: bool,
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    skills: Vec<SkillEntry>,
}

/// Index of a skill in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkillId(usize);

/// A token sequence that identifies a skill.
#[derive(Debug, Clone)]
pub struct SurfaceForm {
    pub tokens: Vec<String>,
    /// Raw tokens that must match exactly, for ambiguous canonical names.
    pub exact: Option<Vec<String>>,
}

impl SurfaceForm {
    /// Whether `window` spells this form. The last token may carry a plural "s".
    pub fn matches(&self, window: &[Token<'_>]) -> bool {
        if window.len() != self.tokens.len() {
            return false;
        }
        let last = window.len() - 1;
        let norms_match = window.iter().zip(&self.tokens).enumerate().all(|(i, (tok, form))| {
            tok.norm == *form || (i == last && is_plural_of(&tok.norm, form))
        });
        if !norms_match {
            return false;
        }
        match &self.exact {
            None => true,
            Some(exact) => window.iter().zip(exact).enumerate().all(|(i, (tok, want))| {
                let shouted = want.to_uppercase();
                tok.raw == want.as_str()
                    || tok.raw == shouted
                    || (i == last
                        && (is_plural_of(tok.raw, want) || is_plural_of(tok.raw, &shouted)))
            }),
        }
    }
}

fn is_plural_of(word: &str, singular: &str) -> bool {
    word.len() == singular.len() + 1 && word.ends_with('s') && word.starts_with(singular)
}

/// Immutable skill catalog with a case-insensitive surface-form index.
#[derive(Debug)]
pub struct SkillTaxonomy {
    entries: Vec<SkillEntry>,
    forms: Vec<Vec<SurfaceForm>>,
    index: HashMap<Vec<String>, (SkillId, usize)>,
    max_form_len: usize,
}

impl SkillTaxonomy {
    /// The catalog embedded at compile time.
    pub fn builtin() -> Result<Self, TaxonomyError> {
        Self::from_json_str(BUILTIN_TAXONOMY)
    }

    pub fn from_path(path: &Path) -> Result<Self, TaxonomyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, TaxonomyError> {
        let file: TaxonomyFile = serde_json::from_str(raw)?;
        Self::from_entries(file.skills)
    }

    pub fn from_entries(entries: Vec<SkillEntry>) -> Result<Self, TaxonomyError> {
        if entries.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        let mut forms = Vec::with_capacity(entries.len());
        let mut index: HashMap<Vec<String>, (SkillId, usize)> = HashMap::new();
        let mut names: HashMap<String, usize> = HashMap::new();
        let mut max_form_len = 0;

        for (i, entry) in entries.iter().enumerate() {
            let canonical = normalize_form(&entry.name);
            if canonical.is_empty() {
                return Err(TaxonomyError::EmptyName(i));
            }
            if names.insert(entry.name.to_lowercase(), i).is_some() {
                return Err(TaxonomyError::DuplicateName(entry.name.clone()));
            }

            let mut skill_forms = vec![SurfaceForm {
                tokens: canonical,
                exact: entry.ambiguous.then(|| {
                    tokenize(&entry.name)
                        .into_iter()
                        .map(|t| t.raw.to_string())
                        .collect()
                }),
            }];
            for synonym in &entry.synonyms {
                let tokens = normalize_form(synonym);
                if tokens.is_empty() || skill_forms.iter().any(|f| f.tokens == tokens) {
                    continue;
                }
                skill_forms.push(SurfaceForm {
                    tokens,
                    exact: None,
                });
            }

            for (form_idx, form) in skill_forms.iter().enumerate() {
                if let Some((other, _)) = index.get(&form.tokens) {
                    return Err(TaxonomyError::ConflictingForm {
                        form: form.tokens.join(" "),
                        first: entries[other.0].name.clone(),
                        second: entry.name.clone(),
                    });
                }
                index.insert(form.tokens.clone(), (SkillId(i), form_idx));
                max_form_len = max_form_len.max(form.tokens.len());
            }
            forms.push(skill_forms);
        }

        Ok(Self {
            entries,
            forms,
            index,
            max_form_len,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn name(&self, id: SkillId) -> &str {
        &self.entries[id.0].name
    }

    pub fn forms(&self, id: SkillId) -> &[SurfaceForm] {
        &self.forms[id.0]
    }

    /// Longest surface form, in tokens.
    pub fn max_form_len(&self) -> usize {
        self.max_form_len
    }

    #[cfg(test)]
    pub fn find_by_name(&self, name: &str) -> Option<SkillId> {
        self.entries
            .iter()
            .position(|e| e.name.eq_ignore_ascii_case(name))
            .map(SkillId)
    }

    /// Resolves a token run to a skill. Tries the run as written, then with a
    /// plural "s" dropped from the last token.
    pub fn lookup(&self, window: &[Token<'_>]) -> Option<SkillId> {
        if window.is_empty() {
            return None;
        }
        let mut key: Vec<String> = window.iter().map(|t| t.norm.clone()).collect();
        if let Some(id) = self.lookup_key(&key, window) {
            return Some(id);
        }

        let last = key.last_mut()?;
        if last.len() > 2 && last.ends_with('s') {
            last.pop();
            return self.lookup_key(&key, window);
        }
        None
    }

    fn lookup_key(&self, key: &[String], window: &[Token<'_>]) -> Option<SkillId> {
        let (id, form_idx) = self.index.get(key)?;
        self.forms[id.0][*form_idx].matches(window).then_some(*id)
    }
}
