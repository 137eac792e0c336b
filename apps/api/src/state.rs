use std::sync::Arc;

use crate::analysis::validate::KeywordValidator;
use crate::analysis::KeywordExtractor;
use crate::config::Config;
use crate::generation::CandidateProfile;
use crate::llm_client::LlmClient;
use crate::tracking::ApplicationStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: Arc<KeywordExtractor>,
    /// Pluggable validator. PassthroughValidator without an API key,
    /// LlmKeywordValidator with one.
    pub validator: Arc<dyn KeywordValidator>,
    /// Present only when an API key is configured; used for letter drafts.
    pub llm: Option<LlmClient>,
    pub profile: Arc<CandidateProfile>,
    pub store: Arc<ApplicationStore>,
}
