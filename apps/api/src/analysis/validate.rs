//! Optional LLM validation of the locally extracted keyword list.
//!
//! The local extractor is the contract; validation only prunes its output.
//! Any failure here (network, non-2xx, empty or no-overlap response) is an
//! error the caller logs and falls back from, never a pipeline failure.

use async_trait::async_trait;

use crate::analysis::extractor::Term;
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// JD excerpt length sent along with the candidates.
const JD_EXCERPT_CHARS: usize = 800;
const VALIDATION_MAX_TOKENS: u32 = 500;

/// Pluggable keyword validator, held in `AppState` as `Arc<dyn KeywordValidator>`.
#[async_trait]
pub trait KeywordValidator: Send + Sync {
    /// Returns a (possibly pruned) keyword list for the JD.
    async fn validate(&self, jd_text: &str, local: &[Term]) -> Result<Vec<Term>, AppError>;

    /// Backend label reported in responses for transparency.
    fn backend(&self) -> &'static str;
}

/// Local-only mode: the extracted list is returned unchanged.
pub struct PassthroughValidator;

#[async_trait]
impl KeywordValidator for PassthroughValidator {
    async fn validate(&self, _jd_text: &str, local: &[Term]) -> Result<Vec<Term>, AppError> {
        Ok(local.to_vec())
    }

    fn backend(&self) -> &'static str {
        "passthrough"
    }
}

/// Asks Claude to keep only the technical, role-relevant keywords, then
/// prunes the local list down to the returned set.
pub struct LlmKeywordValidator {
    llm: LlmClient,
}

impl LlmKeywordValidator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl KeywordValidator for LlmKeywordValidator {
    async fn validate(&self, jd_text: &str, local: &[Term]) -> Result<Vec<Term>, AppError> {
        if local.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = build_validation_prompt(jd_text, local);
        let response = self
            .llm
            .call_text(&prompt, None, VALIDATION_MAX_TOKENS)
            .await
            .map_err(|e| AppError::Llm(format!("keyword validation call failed: {e}")))?;

        let pruned = prune_to_validated(local, &response);
        if pruned.is_empty() {
            // No overlap with the local list means the response is unusable,
            // not that the JD has no keywords.
            return Err(AppError::Llm(
                "keyword validation response shares no terms with the local list".to_string(),
            ));
        }
        Ok(pruned)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Validation prompt, in the Italian register the JDs arrive in.
fn build_validation_prompt(jd_text: &str, local: &[Term]) -> String {
    let keyword_list = local
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Analizza questa job description e filtra solo le keyword TECNICHE, \
SPECIFICHE e RILEVANTI per il ruolo.\n\n\
ESCLUDI assolutamente:\n\
- Parole generiche HR (lavoro, offerta, posizione, candidato, azienda, team)\n\
- Aggettivi generici (dinamico, importante, ottimo, giovane)\n\
- Verbi generici (cerchiamo, offriamo, gestiamo)\n\
- Requisiti generici (esperienza, competenza, capacità)\n\n\
INCLUDI solo:\n\
- Tool/software specifici (es: Power BI, Google Analytics, Figma)\n\
- Competenze tecniche specifiche (es: Media Planning, SEO, B2B Marketing)\n\
- Tecnologie/piattaforme (es: Meta Ads, Programmatic, AWS)\n\
- Industry terms specifici (es: Automotive, Fashion, Pharma)\n\
- Acronimi tecnici (es: KPI, ROI, CPA, SaaS)\n\n\
JD (primi {JD_EXCERPT_CHARS} char):\n{excerpt}\n\n\
Keywords estratte:\n{keyword_list}\n\n\
Rispondi SOLO con la lista delle keyword valide separate da virgola, \
NIENTE altro testo.",
        excerpt = truncate_chars(jd_text, JD_EXCERPT_CHARS),
    )
}

/// Keeps the local terms whose text appears in the comma-separated response,
/// preserving local rank order. Terms the LLM invented are ignored: only the
/// deterministic extractor produces terms.
pub(crate) fn prune_to_validated(local: &[Term], response: &str) -> Vec<Term> {
    let validated: std::collections::HashSet<String> = response
        .split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    local
        .iter()
        .filter(|t| validated.contains(&t.text))
        .cloned()
        .collect()
}

/// Char-boundary-safe prefix of at most `max_chars` characters.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
