//! Lexicon: the configuration data behind keyword extraction.
//!
//! Stop-words, domain boost multipliers, denylist patterns and the numeric
//! tunables are data, not logic. The built-in tables target the Italian +
//! English digital-marketing vocabulary the system was tuned on; a JSON
//! overlay file (`LEXICON_PATH`) can extend or re-tune them without
//! touching the algorithm.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

/// Italian and English function/filler words excluded from keyword candidacy.
const STOP_WORDS: &[&str] = &[
    // Italian
    "di", "da", "in", "con", "su", "per", "tra", "fra", "il", "lo", "la", "gli", "le", "un",
    "una", "uno", "ma", "se", "che", "chi", "cui", "non", "come", "anche", "più", "nel", "nella",
    "dei", "delle", "del", "della", "alla", "agli", "sono", "sarà", "essere", "nostro", "nostra",
    "vostro", "loro", "questo", "questa", "quali", "ogni",
    // English
    "the", "and", "or", "of", "to", "in", "for", "on", "at", "with", "as", "by", "from", "is",
    "are", "be", "was", "were", "will", "would", "can", "could", "may", "should", "you", "your",
    "we", "our", "us", "this", "that", "these", "those", "it", "its", "have", "has", "had",
    "not", "but", "if", "they", "their", "them", "who", "what", "which", "when", "where", "how",
    "all", "also", "more", "most", "other", "into", "about", "over", "than", "then", "per",
    "via", "within", "across", "both", "each", "such", "any", "an",
];

/// Known high-value domain vocabulary mapped to score multipliers.
/// Illustrative tuning values in the 1.5-3.0 band, not precise constants.
const DOMAIN_BOOSTS: &[(&str, f64)] = &[
    ("media planning", 2.8),
    ("google analytics", 2.5),
    ("power bi", 2.5),
    ("google ads", 2.5),
    ("meta ads", 2.5),
    ("looker studio", 2.4),
    ("customer segmentation", 2.4),
    ("performance marketing", 2.4),
    ("digital strategy", 2.3),
    ("data analysis", 2.2),
    ("marketing automation", 2.2),
    ("programmatic", 2.2),
    ("tableau", 2.2),
    ("budget management", 2.0),
    ("copywriting", 2.0),
    ("social media", 2.0),
    ("tiktok", 2.0),
    ("seo", 2.0),
    ("sem", 2.0),
    ("crm", 2.0),
    ("analytics", 1.8),
    ("excel", 1.6),
    ("powerpoint", 1.5),
];

/// Role-posting boilerplate removed from candidates regardless of frequency.
const DENYLIST_PATTERNS: &[&str] = &[
    // Italian recruiting prose
    r"\b(cerchiamo|ricerchiamo|cerca|ricerca|selezione|selezioniamo|offriamo|offerta|offresi)\b",
    r"\b(azienda|aziendale|lavoro|lavorare|opportunità|posizione|candidato|candidati|candidatura)\b",
    r"\b(requisiti|requisito|inserimento|contratto|sede|benefit|gradita|preferibile)\b",
    r"\b(esperienza|esperienze|competenza|competenze|capacità|conoscenza|conoscenze)\b",
    // English recruiting prose
    r"\b(looking|seeking|hiring|join|apply|application|applications)\b",
    r"\b(company|team|teams|opportunity|opportunities|candidate|candidates)\b",
    r"\b(position|role|roles|responsibilities|responsibility|requirements|required|preferred)\b",
    r"\b(ideal|great|strong|excellent|dynamic|motivated|passionate|exciting)\b",
    r"\b(environment|culture|benefits|salary|experience|skills|ability|abilities)\b",
    r"\b(anni|anno|years|year|mesi|months)\b",
];

/// Runtime lexicon: compiled tables plus the extraction tunables.
pub struct Lexicon {
    pub stop_words: HashSet<String>,
    pub domain_boosts: HashMap<String, f64>,
    pub denylist: Vec<Regex>,
    /// Minimum character length for a token to enter the stream
    /// (all-caps acronyms of 2+ letters are exempt).
    pub min_token_len: usize,
    /// Relevance filter: terms repeated at least this often are kept.
    pub min_repeat_count: u32,
    /// Relevance filter: terms scoring at least this are kept.
    pub score_threshold: f64,
    /// Relevance filter: terms boosted at least this much are kept.
    pub boost_keep_floor: f64,
}

/// JSON overlay shape. Every field is optional; lists extend the built-in
/// tables, the boost map overrides per key, scalars replace.
#[derive(Debug, Default, Deserialize)]
pub struct LexiconOverlay {
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub domain_boosts: HashMap<String, f64>,
    #[serde(default)]
    pub denylist: Vec<String>,
    pub min_token_len: Option<usize>,
    pub min_repeat_count: Option<u32>,
    pub score_threshold: Option<f64>,
    pub boost_keep_floor: Option<f64>,
}

impl Lexicon {
    /// The built-in Italian/English marketing lexicon.
    pub fn builtin() -> Self {
        let denylist = DENYLIST_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("built-in denylist pattern is valid"))
            .collect();

        Lexicon {
            stop_words: STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            domain_boosts: DOMAIN_BOOSTS
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            denylist,
            min_token_len: 3,
            min_repeat_count: 2,
            score_threshold: 0.035,
            boost_keep_floor: 1.8,
        }
    }

    /// Builds the lexicon, merging the JSON overlay at `path` over the
    /// built-in tables when a path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut lexicon = Self::builtin();
        if let Some(path) = path {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading lexicon overlay {}", path.display()))?;
            let overlay: LexiconOverlay = serde_json::from_str(&raw)
                .with_context(|| format!("parsing lexicon overlay {}", path.display()))?;
            lexicon.apply(overlay)?;
        }
        Ok(lexicon)
    }

    pub fn apply(&mut self, overlay: LexiconOverlay) -> Result<()> {
        self.stop_words
            .extend(overlay.stop_words.into_iter().map(|w| w.to_lowercase()));
        for (term, boost) in overlay.domain_boosts {
            self.domain_boosts.insert(term.to_lowercase(), boost);
        }
        for pattern in overlay.denylist {
            let re = Regex::new(&pattern)
                .with_context(|| format!("invalid denylist pattern: {pattern}"))?;
            self.denylist.push(re);
        }
        if let Some(v) = overlay.min_token_len {
            self.min_token_len = v;
        }
        if let Some(v) = overlay.min_repeat_count {
            self.min_repeat_count = v;
        }
        if let Some(v) = overlay.score_threshold {
            self.score_threshold = v;
        }
        if let Some(v) = overlay.boost_keep_floor {
            self.boost_keep_floor = v;
        }
        Ok(())
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn boost_for(&self, term: &str) -> f64 {
        self.domain_boosts.get(term).copied().unwrap_or(1.0)
    }

    pub fn is_denied(&self, term: &str) -> bool {
        self.denylist.iter().any(|re| re.is_match(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_has_both_languages() {
        let lex = Lexicon::builtin();
        assert!(lex.is_stop_word("di"));
        assert!(lex.is_stop_word("the"));
        assert!(!lex.is_stop_word("tableau"));
    }

    #[test]
    fn test_builtin_boosts_in_band() {
        let lex = Lexicon::builtin();
        for boost in lex.domain_boosts.values() {
            assert!((1.5..=3.0).contains(boost), "boost {boost} out of band");
        }
        assert!(lex.boost_for("media planning") > lex.boost_for("excel"));
        assert_eq!(lex.boost_for("unknown term"), 1.0);
    }

    #[test]
    fn test_denylist_catches_recruiting_prose() {
        let lex = Lexicon::builtin();
        assert!(lex.is_denied("team"));
        assert!(lex.is_denied("cerchiamo"));
        assert!(lex.is_denied("looking"));
        assert!(!lex.is_denied("tableau"));
        assert!(!lex.is_denied("media planning"));
    }

    #[test]
    fn test_overlay_merges_over_builtin() {
        let mut lex = Lexicon::builtin();
        let overlay: LexiconOverlay = serde_json::from_str(
            r#"{
                "stop_words": ["foo"],
                "domain_boosts": {"excel": 2.9, "kubernetes": 2.0},
                "denylist": ["\\bsynergy\\b"],
                "score_threshold": 0.05
            }"#,
        )
        .unwrap();
        lex.apply(overlay).unwrap();

        assert!(lex.is_stop_word("foo"));
        assert!(lex.is_stop_word("the"), "builtin entries survive the merge");
        assert_eq!(lex.boost_for("excel"), 2.9);
        assert_eq!(lex.boost_for("kubernetes"), 2.0);
        assert!(lex.is_denied("synergy"));
        assert_eq!(lex.score_threshold, 0.05);
        assert_eq!(lex.min_token_len, 3, "untouched scalars keep defaults");
    }

    #[test]
    fn test_overlay_rejects_invalid_pattern() {
        let mut lex = Lexicon::builtin();
        let overlay = LexiconOverlay {
            denylist: vec!["([unclosed".to_string()],
            ..Default::default()
        };
        assert!(lex.apply(overlay).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"domain_boosts": {{"figma": 2.1}}}}"#).unwrap();
        let lex = Lexicon::load(Some(file.path())).unwrap();
        assert_eq!(lex.boost_for("figma"), 2.1);
    }

    #[test]
    fn test_load_without_path_is_builtin() {
        let lex = Lexicon::load(None).unwrap();
        assert!(!lex.stop_words.is_empty());
        assert!(!lex.denylist.is_empty());
    }
}
