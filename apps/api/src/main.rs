mod analysis;
mod config;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod state;
mod tracking;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::lexicon::Lexicon;
use crate::analysis::validate::{KeywordValidator, LlmKeywordValidator, PassthroughValidator};
use crate::analysis::KeywordExtractor;
use crate::config::Config;
use crate::generation::CandidateProfile;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::tracking::ApplicationStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobTailor API v{}", env!("CARGO_PKG_VERSION"));

    // Extraction tables: built-in defaults plus the optional overlay
    let lexicon = Lexicon::load(config.lexicon_path.as_deref())?;
    info!(
        "Lexicon loaded: {} stop-words, {} boosted terms, {} denylist patterns",
        lexicon.stop_words.len(),
        lexicon.domain_boosts.len(),
        lexicon.denylist.len()
    );
    let extractor = Arc::new(KeywordExtractor::new(lexicon));

    let profile = Arc::new(CandidateProfile::load(config.profile_path.as_deref())?);
    info!("Candidate profile: {}", profile.name);

    // LLM enhancement is wired in only when a key is configured; the local
    // pipeline works the same either way.
    let (llm, validator): (Option<LlmClient>, Arc<dyn KeywordValidator>) =
        match &config.anthropic_api_key {
            Some(key) => {
                let client = LlmClient::new(key.clone());
                info!("LLM client initialized (model: {})", llm_client::MODEL);
                (
                    Some(client.clone()),
                    Arc::new(LlmKeywordValidator::new(client)) as Arc<dyn KeywordValidator>,
                )
            }
            None => {
                info!("No ANTHROPIC_API_KEY set; running local-only");
                (
                    None,
                    Arc::new(PassthroughValidator) as Arc<dyn KeywordValidator>,
                )
            }
        };

    let store = Arc::new(ApplicationStore::open(
        &config.store_path,
        config.history_limit,
    )?);
    info!(
        "Application store at {} (history limit {})",
        config.store_path.display(),
        config.history_limit
    );

    let state = AppState {
        config: config.clone(),
        extractor,
        validator,
        llm,
        profile,
        store,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // local single-user tool

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
