//! Axum route handlers for the analysis API: the full generation pipeline
//! and the bare extract-and-score endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::scorer::score_document;
use crate::analysis::{MatchResult, Term};
use crate::errors::AppError;
use crate::generation::about::build_about_section;
use crate::generation::letter::draft_or_template;
use crate::generation::suggestions::build_suggestions;
use crate::generation::{classify, extract_requirements, JdCategory, JdRequirements};
use crate::state::AppState;

/// Default keyword list length when the caller does not ask for one.
pub const DEFAULT_TOP_N: usize = 15;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub company: String,
    pub role: String,
    pub location: Option<String>,
    pub jd_text: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub keywords: Vec<Term>,
    /// Which validator produced the final list ("passthrough" | "llm");
    /// falls back to "passthrough" when the LLM call fails.
    pub validation_backend: &'static str,
    pub category: JdCategory,
    pub requirements: JdRequirements,
    pub cover_letter: String,
    /// "template" | "llm"
    pub letter_source: &'static str,
    pub cv_about: String,
    pub ats: MatchResult,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub document_text: String,
    pub jd_text: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub keywords: Vec<Term>,
    pub ats: MatchResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Full pipeline: extract keywords, optionally validate them via LLM,
/// classify the JD, build the letter and CV about section, score their
/// combined text against the keywords, list tailoring suggestions.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    if request.company.trim().is_empty() || request.role.trim().is_empty() {
        return Err(AppError::Validation(
            "company and role cannot be empty".to_string(),
        ));
    }

    let top_n = request.top_n.unwrap_or(DEFAULT_TOP_N);
    let local = state.extractor.extract(&request.jd_text, top_n);

    // Validation is best-effort: any failure keeps the local list.
    let (keywords, validation_backend) =
        match state.validator.validate(&request.jd_text, &local).await {
            Ok(validated) => (validated, state.validator.backend()),
            Err(e) => {
                warn!("keyword validation unavailable, using local list: {e}");
                (local, "passthrough")
            }
        };

    let requirements = extract_requirements(&request.jd_text);
    let category = classify(&request.jd_text);
    let location = request.location.as_deref().unwrap_or("Roma");

    let (cover_letter, letter_source) = draft_or_template(
        state.llm.as_ref(),
        &state.profile,
        &requirements,
        category,
        &request.company,
        &request.role,
        location,
        &request.jd_text,
    )
    .await;

    let cv_about = build_about_section(&state.profile, &requirements, &request.jd_text);
    let ats = score_document(&format!("{cover_letter} {cv_about}"), &keywords);
    let suggestions = build_suggestions(&state.profile, &requirements, &request.jd_text);

    Ok(Json(AnalyzeResponse {
        keywords,
        validation_backend,
        category,
        requirements,
        cover_letter,
        letter_source: letter_source.as_str(),
        cv_about,
        ats,
        suggestions,
    }))
}

/// POST /api/v1/score
///
/// Exposes the two core functions directly: extract keywords from the JD,
/// score an arbitrary document against them.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    if request.document_text.trim().is_empty() {
        return Err(AppError::Validation(
            "document_text cannot be empty".to_string(),
        ));
    }

    let top_n = request.top_n.unwrap_or(DEFAULT_TOP_N);
    let keywords = state
        .extractor
        .extract(&request.jd_text, top_n);
    let ats = score_document(&request.document_text, &keywords);

    Ok(Json(ScoreResponse { keywords, ats }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lexicon::Lexicon;
    use crate::analysis::validate::{KeywordValidator, PassthroughValidator};
    use crate::analysis::KeywordExtractor;
    use crate::generation::CandidateProfile;
    use crate::tracking::ApplicationStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Validator whose backing service is always down.
    struct UnavailableValidator;

    #[async_trait]
    impl KeywordValidator for UnavailableValidator {
        async fn validate(&self, _jd_text: &str, _local: &[Term]) -> Result<Vec<Term>, AppError> {
            Err(AppError::Llm("validation service unreachable".to_string()))
        }

        fn backend(&self) -> &'static str {
            "llm"
        }
    }

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        AppState {
            config: crate::config::Config {
                port: 0,
                rust_log: "info".to_string(),
                anthropic_api_key: None,
                lexicon_path: None,
                profile_path: None,
                store_path: dir.path().join("apps.json"),
                history_limit: 50,
            },
            extractor: Arc::new(KeywordExtractor::new(Lexicon::builtin())),
            validator: Arc::new(PassthroughValidator),
            llm: None,
            profile: Arc::new(CandidateProfile::default()),
            store: Arc::new(
                ApplicationStore::open(&dir.path().join("apps.json"), 50).unwrap(),
            ),
        }
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_jd() {
        let dir = tempfile::tempdir().unwrap();
        let result = handle_analyze(
            State(test_state(&dir)),
            Json(AnalyzeRequest {
                company: "Acme".to_string(),
                role: "Planner".to_string(),
                location: None,
                jd_text: "   ".to_string(),
                top_n: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_analyze_pipeline_local_only() {
        let dir = tempfile::tempdir().unwrap();
        let Json(response) = handle_analyze(
            State(test_state(&dir)),
            Json(AnalyzeRequest {
                company: "Acme Media".to_string(),
                role: "Media Planner".to_string(),
                location: Some("Milano".to_string()),
                jd_text: "Cerchiamo esperto di media planning con Power BI e Google \
                          Analytics. KPI reporting e media planning quotidiano."
                    .to_string(),
                top_n: Some(10),
            }),
        )
        .await
        .unwrap();

        assert!(response.keywords.len() <= 10);
        assert_eq!(response.validation_backend, "passthrough");
        assert_eq!(response.letter_source, "template");
        assert!(response.cover_letter.contains("Acme Media"));
        assert_eq!(
            response.ats.matched_terms.len() + response.ats.missing_terms.len(),
            response.keywords.len()
        );
    }

    /// A failing validator must leave the local keyword list unchanged and
    /// report the passthrough backend, never surface an error.
    #[tokio::test]
    async fn test_validation_failure_falls_back_to_local_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(&dir);
        state.validator = Arc::new(UnavailableValidator);

        let jd = "Cerchiamo esperto di media planning con Power BI, media planning quotidiano";
        let expected = state.extractor.extract(jd, DEFAULT_TOP_N);
        assert!(!expected.is_empty());

        let Json(response) = handle_analyze(
            State(state),
            Json(AnalyzeRequest {
                company: "Acme".to_string(),
                role: "Planner".to_string(),
                location: None,
                jd_text: jd.to_string(),
                top_n: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.validation_backend, "passthrough");
        assert_eq!(response.keywords, expected);
    }

    #[tokio::test]
    async fn test_score_endpoint_partitions_keywords() {
        let dir = tempfile::tempdir().unwrap();
        let Json(response) = handle_score(
            State(test_state(&dir)),
            Json(ScoreRequest {
                document_text: "Experienced in Google Analytics dashboards".to_string(),
                jd_text: "google analytics google analytics excel excel".to_string(),
                top_n: None,
            }),
        )
        .await
        .unwrap();

        assert!(response
            .ats
            .matched_terms
            .contains(&"google analytics".to_string()));
        assert!(response.ats.missing_terms.contains(&"excel".to_string()));
    }

    #[tokio::test]
    async fn test_score_rejects_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let result = handle_score(
            State(test_state(&dir)),
            Json(ScoreRequest {
                document_text: String::new(),
                jd_text: "some jd".to_string(),
                top_n: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
