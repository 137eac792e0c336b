//! Keyword extraction: raw JD text in, ranked weighted terms out.
//!
//! Pure and synchronous. The pipeline is tokenize, generate unigram and
//! bigram candidates, score with a TF times log-dampening times domain
//! boost, filter recruiting boilerplate, sort, truncate. Raw frequency
//! over job-posting prose is dominated by generic recruiting language,
//! so the denylist and boost table carry most of the signal.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::lexicon::Lexicon;

/// A candidate keyword with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Normalized lowercase unigram or space-joined bigram.
    pub text: String,
    /// Word-boundary, case-insensitive occurrences of the exact phrase.
    pub raw_count: u32,
    /// term frequency x log dampening x domain boost
    pub score: f64,
}

impl Term {
    pub fn is_bigram(&self) -> bool {
        self.text.contains(' ')
    }
}

pub struct KeywordExtractor {
    lexicon: Lexicon,
    word_re: Regex,
}

impl KeywordExtractor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            // \p{L} so accented Italian letters are word characters.
            word_re: Regex::new(r"\p{L}+").expect("letter pattern is valid"),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Extracts the `top_n` highest-scoring terms from a job description.
    /// Degrades to a shorter (possibly empty) list for thin input; never fails.
    pub fn extract(&self, jd_text: &str, top_n: usize) -> Vec<Term> {
        let (tokens, acronyms) = self.tokenize(jd_text);
        if tokens.is_empty() || top_n == 0 {
            return Vec::new();
        }

        let candidates = self.candidates(&tokens);
        let total_tokens = tokens.len() as f64;

        let mut terms: Vec<Term> = Vec::new();
        for text in candidates {
            let Ok(re) = phrase_regex(&text) else {
                continue;
            };
            let raw_count = re.find_iter(jd_text).count() as u32;
            // Dropped short tokens can fake adjacency in the stream; a bigram
            // that never occurs verbatim in the text is not a real phrase.
            if raw_count == 0 {
                continue;
            }

            let tf = raw_count as f64 / total_tokens;
            // Corpus-of-one simplification: with a single document the IDF
            // degenerates to ln(total/count), a dampening term that zeroes
            // out terms appearing in nearly every token. The phrase regex
            // also counts spellings the tokenizer dropped ("BI" vs "bi"),
            // so the count can exceed the token total; clamp at zero to
            // keep scores non-negative.
            let idf = (total_tokens / raw_count as f64).ln().max(0.0);
            let boost = self.lexicon.boost_for(&text);

            terms.push(Term {
                text,
                raw_count,
                score: tf * idf * boost,
            });
        }

        terms.retain(|t| !self.lexicon.is_denied(&t.text));
        terms.retain(|t| self.is_relevant(t, &acronyms));

        // Stable sort keeps first-discovery order for equal scores.
        terms.sort_by(|a, b| b.score.total_cmp(&a.score));
        terms.truncate(top_n);
        terms
    }

    /// Lowercase letter-only tokens plus the set of tokens whose source
    /// spelling was an all-caps acronym (2-5 letters, e.g. "KPI", "BI").
    /// Acronyms are exempt from the minimum length so "power bi" stays
    /// extractable.
    fn tokenize(&self, text: &str) -> (Vec<String>, HashSet<String>) {
        let mut tokens = Vec::new();
        let mut acronyms = HashSet::new();

        for m in self.word_re.find_iter(text) {
            let raw = m.as_str();
            let len = raw.chars().count();
            let is_acronym = (2..=5).contains(&len) && raw.chars().all(|c| c.is_uppercase());
            if len < self.lexicon.min_token_len && !is_acronym {
                continue;
            }
            let lower = raw.to_lowercase();
            if is_acronym {
                acronyms.insert(lower.clone());
            }
            tokens.push(lower);
        }

        (tokens, acronyms)
    }

    /// Unigram and bigram candidates, deduplicated in discovery order.
    /// Bigrams require both constituents non-stop: stop-words block
    /// adjacency, they are not collapsed away.
    fn candidates(&self, tokens: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let token_ok = !self.lexicon.is_stop_word(token);
            if token_ok && seen.insert(token.clone()) {
                out.push(token.clone());
            }
            if let Some(next) = tokens.get(i + 1) {
                if token_ok && !self.lexicon.is_stop_word(next) {
                    let bigram = format!("{token} {next}");
                    if seen.insert(bigram.clone()) {
                        out.push(bigram);
                    }
                }
            }
        }

        out
    }

    /// Keeps a term when at least one signal says it carries meaning:
    /// repetition, score, a long multi-word phrase, an acronym in the
    /// source, or a strong domain boost.
    fn is_relevant(&self, term: &Term, acronyms: &HashSet<String>) -> bool {
        if term.raw_count >= self.lexicon.min_repeat_count {
            return true;
        }
        if term.score >= self.lexicon.score_threshold {
            return true;
        }
        if term.is_bigram() && term.text.split(' ').all(|p| p.chars().count() >= 4) {
            return true;
        }
        if !term.is_bigram() && acronyms.contains(&term.text) {
            return true;
        }
        self.lexicon.boost_for(&term.text) >= self.lexicon.boost_keep_floor
    }
}

/// Case-insensitive word-boundary regex for a term; internal whitespace in
/// bigrams matches any run of whitespace in the document.
pub(crate) fn phrase_regex(term: &str) -> Result<Regex, regex::Error> {
    let body = term
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    Regex::new(&format!(r"(?i)\b{body}\b"))
}
