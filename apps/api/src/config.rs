use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a local-friendly default; the API key is optional and
/// controls whether LLM enhancement is wired up at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// When absent, keyword validation and letter drafting run in
    /// local-only mode (PassthroughValidator, template letters).
    pub anthropic_api_key: Option<String>,
    /// Optional JSON overlay merged over the built-in lexicon.
    pub lexicon_path: Option<PathBuf>,
    /// Optional JSON file replacing the built-in candidate profile.
    pub profile_path: Option<PathBuf>,
    pub store_path: PathBuf,
    pub history_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            lexicon_path: optional_env("LEXICON_PATH").map(PathBuf::from),
            profile_path: optional_env("PROFILE_PATH").map(PathBuf::from),
            store_path: optional_env("STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("applications.json")),
            history_limit: std::env::var("HISTORY_LIMIT")
                .unwrap_or_else(|_| "50".to_string())
                .parse::<usize>()
                .context("HISTORY_LIMIT must be a positive integer")?,
        })
    }
}

/// Returns `None` for unset or empty variables so that `FOO=` in a .env
/// file behaves the same as no `FOO` at all.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_env_empty_is_none() {
        std::env::set_var("JOBTAILOR_TEST_EMPTY", "");
        assert_eq!(optional_env("JOBTAILOR_TEST_EMPTY"), None);
        std::env::remove_var("JOBTAILOR_TEST_EMPTY");
    }

    #[test]
    fn test_optional_env_set_is_some() {
        std::env::set_var("JOBTAILOR_TEST_SET", "value");
        assert_eq!(optional_env("JOBTAILOR_TEST_SET"), Some("value".to_string()));
        std::env::remove_var("JOBTAILOR_TEST_SET");
    }
}
