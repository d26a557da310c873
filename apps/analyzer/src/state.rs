use crate::analysis::AnalysisContext;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Skill taxonomy and ATS scorer, loaded once at startup and never mutated.
    pub analysis: AnalysisContext,
}
