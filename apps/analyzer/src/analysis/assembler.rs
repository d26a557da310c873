//! ResultAssembler: checks cross-stage invariants and builds the response record.

use std::collections::HashSet;

use anyhow::anyhow;
use tracing::error;

use crate::analysis::models::AnalysisResult;
use crate::ats::AtsBreakdown;
use crate::contact::ContactInfo;
use crate::errors::AppError;
use crate::skills::{MatchResult, RequiredSkillSet};

/// Builds the response record.
///
/// Any broken invariant is a bug in an earlier stage, so it surfaces as an
/// internal error rather than a malformed 200.
pub fn assemble(
    required: &RequiredSkillSet,
    matches: MatchResult,
    breakdown: AtsBreakdown,
    contact: ContactInfo,
) -> Result<AnalysisResult, AppError> {
    check_partition(required, &matches).map_err(invariant_violation)?;

    if matches.percentage > 100 {
        return Err(invariant_violation(format!(
            "match percentage {} out of range",
            matches.percentage
        )));
    }

    let violations = breakdown.cap_violations();
    if !violations.is_empty() {
        return Err(invariant_violation(format!(
            "sub-scores above cap: {violations:?}"
        )));
    }
    let ats_score = breakdown.total();
    if ats_score > 100 {
        return Err(invariant_violation(format!("ats score {ats_score} above 100")));
    }

    Ok(AnalysisResult {
        matched_skills: matches.matched,
        missing_skills: matches.missing,
        match_percentage: matches.percentage,
        ats_score,
        ats_breakdown: breakdown,
        candidate_email: contact.email,
    })
}

fn check_partition(required: &RequiredSkillSet, matches: &MatchResult) -> Result<(), String> {
    let mut seen: HashSet<&str> = HashSet::new();
    for name in matches.matched.iter().chain(&matches.missing) {
        if !seen.insert(name.as_str()) {
            return Err(format!("skill '{name}' reported twice"));
        }
    }

    let expected: HashSet<&str> = required.names().collect();
    if seen != expected {
        return Err(format!(
            "matched and missing do not cover the required set ({} reported, {} required)",
            seen.len(),
            expected.len()
        ));
    }
    Ok(())
}

fn invariant_violation(detail: String) -> AppError {
    error!("Analysis invariant violated: {detail}");
    AppError::Internal(anyhow!("analysis invariant violated: {detail}"))
}
