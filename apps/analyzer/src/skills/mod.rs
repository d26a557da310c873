// Skill taxonomy, JD requirement extraction, and resume skill matching.
// The taxonomy is injected by reference; nothing here holds global state.

pub mod matcher;
pub mod requirements;
pub mod taxonomy;
pub mod tokenize;

pub use matcher::{match_skills, MatchResult};
pub use requirements::{extract_required_skills, RequiredSkillSet};
pub use taxonomy::SkillTaxonomy;

/// `round(scale * part / whole)` with halves rounded up; 0 when `whole` is 0.
pub fn rounded_share(part: usize, whole: usize, scale: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = 2 * scale as usize * part.min(whole);
    ((scaled + whole) / (2 * whole)) as u32
}
