//! The analysis pipeline: extraction, requirements, matching, scoring, contact,
//! assembly. `analyze` is pure; the async entry points add the blocking pool
//! and the time budget.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use tokio::sync::Semaphore;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::assembler::assemble;
use crate::analysis::models::AnalysisResult;
use crate::ats::{AtsScorer, ScoringInput};
use crate::contact::extract_email;
use crate::errors::AppError;
use crate::extraction::{extract_pdf, ExtractedText, ResumeDocument};
use crate::skills::{extract_required_skills, match_skills, SkillTaxonomy};

/// Immutable configuration every analysis reads, plus the permits bounding how
/// many analyses occupy the blocking pool at once. Cheap to clone.
#[derive(Clone)]
pub struct AnalysisContext {
    pub taxonomy: Arc<SkillTaxonomy>,
    pub scorer: Arc<AtsScorer>,
    permits: Arc<Semaphore>,
}

impl AnalysisContext {
    /// `max_concurrent` below 1 is raised to 1.
    pub fn new(taxonomy: SkillTaxonomy, scorer: AtsScorer, max_concurrent: usize) -> Self {
        Self {
            taxonomy: Arc::new(taxonomy),
            scorer: Arc::new(scorer),
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }
}

/// Runs every stage after extraction. Same inputs, same output.
pub fn analyze(
    ctx: &AnalysisContext,
    text: &ExtractedText,
    jd: &str,
) -> Result<AnalysisResult, AppError> {
    let required = extract_required_skills(jd, &ctx.taxonomy);
    if required.is_empty() {
        debug!("Job description names no known skills");
    }
    let matches = match_skills(&required, text, &ctx.taxonomy);
    let breakdown = ctx.scorer.score(&ScoringInput {
        text,
        matches: &matches,
    });
    let contact = extract_email(text);

    info!(
        pages = ?text.page_count(),
        required = required.len(),
        matched = matches.matched.len(),
        match_percentage = matches.percentage,
        ats_score = breakdown.total(),
        "Analysis scored"
    );

    assemble(&required, matches, breakdown, contact)
}

/// Extracts and analyzes an uploaded PDF within `budget`.
pub async fn analyze_document(
    ctx: AnalysisContext,
    document: ResumeDocument,
    jd: String,
    budget: Duration,
) -> Result<AnalysisResult, AppError> {
    let permits = Arc::clone(&ctx.permits);
    run_bounded(permits, budget, move || {
        let text = extract_pdf(&document)?;
        analyze(&ctx, &text, &jd)
    })
    .await
}

/// Analyzes resume text the caller already holds, within `budget`.
pub async fn analyze_text(
    ctx: AnalysisContext,
    resume: String,
    jd: String,
    budget: Duration,
) -> Result<AnalysisResult, AppError> {
    let permits = Arc::clone(&ctx.permits);
    run_bounded(permits, budget, move || {
        let text = ExtractedText::from_plain_text(&resume);
        if text.is_empty() {
            return Err(AppError::Validation("resume text cannot be empty".to_string()));
        }
        analyze(&ctx, &text, &jd)
    })
    .await
}

/// Runs CPU-bound work on the blocking pool under a fresh `analysis` span,
/// once a permit is free.
///
/// The budget covers the wait for a permit as well as the work. On timeout the
/// caller gets `AppError::Timeout` at once; a started task keeps its permit
/// until it finishes in the background, and its result is dropped.
async fn run_bounded<F>(
    permits: Arc<Semaphore>,
    budget: Duration,
    work: F,
) -> Result<AnalysisResult, AppError>
where
    F: FnOnce() -> Result<AnalysisResult, AppError> + Send + 'static,
{
    let analysis_id = Uuid::new_v4();
    let span = info_span!("analysis", %analysis_id);

    let task_span = span.clone();
    let bounded = async move {
        let permit = permits
            .acquire_owned()
            .await
            .map_err(|e| AppError::Internal(anyhow!("analysis permits closed: {e}")))?;
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            task_span.in_scope(work)
        })
        .await
        .map_err(|join_err| AppError::Internal(anyhow!("analysis task failed: {join_err}")))?
    };

    match tokio::time::timeout(budget, bounded).instrument(span).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(budget)),
    }
}
