use serde::{Deserialize, Serialize};

use crate::ats::AtsBreakdown;

/// The response record. Every field is always serialized; `candidate_email`
/// is `null` when no address was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub match_percentage: u32,
    pub ats_score: u32,
    pub ats_breakdown: AtsBreakdown,
    pub candidate_email: Option<String>,
}

/// Body of `POST /analyze`, for callers that already hold resume text.
/// Fields are optional so a missing one is reported as a validation error.
#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub jd: Option<String>,
}
