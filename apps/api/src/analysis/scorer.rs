//! Match scoring: which keywords does a document actually contain.
//!
//! Pure function of its two inputs. Per keyword the checks short-circuit
//! in order exact phrase, compound parts, bounded substring; order only
//! matters for speed, the matched/missing classification is the same.

use serde::{Deserialize, Serialize};

use crate::analysis::extractor::{phrase_regex, Term};

/// Outcome of scoring a document against a keyword list.
/// `matched_terms` and `missing_terms` partition the keyword texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched_terms: Vec<String>,
    pub missing_terms: Vec<String>,
    /// round(100 * matched / total), 0 for an empty keyword list.
    pub score_percent: u32,
}

/// Scores `document_text` against `keywords`.
pub fn score_document(document_text: &str, keywords: &[Term]) -> MatchResult {
    let mut matched_terms = Vec::new();
    let mut missing_terms = Vec::new();

    for term in keywords {
        if term_present(document_text, &term.text) {
            matched_terms.push(term.text.clone());
        } else {
            missing_terms.push(term.text.clone());
        }
    }

    let score_percent = if keywords.is_empty() {
        0
    } else {
        (100.0 * matched_terms.len() as f64 / keywords.len() as f64).round() as u32
    };

    MatchResult {
        matched_terms,
        missing_terms,
        score_percent,
    }
}

fn term_present(document: &str, term: &str) -> bool {
    if exact_match(document, term) {
        return true;
    }
    if term.contains(' ') {
        return compound_match(document, term);
    }
    substring_match(document, term)
}

/// Word-boundary match on the literal phrase; whitespace inside multi-word
/// terms matches any whitespace run in the document.
fn exact_match(document: &str, term: &str) -> bool {
    phrase_regex(term)
        .map(|re| re.is_match(document))
        .unwrap_or(false)
}

/// Multi-word fallback: every constituent longer than 3 chars appears as a
/// whole word somewhere in the document. Accounts for the parts of a phrase
/// being present but not adjacent. No qualifying constituent, no match.
fn compound_match(document: &str, term: &str) -> bool {
    let parts: Vec<&str> = term
        .split(' ')
        .filter(|p| p.chars().count() > 3)
        .collect();
    if parts.is_empty() {
        return false;
    }
    parts.iter().all(|part| exact_match(document, part))
}

/// Single-word fallback for words longer than 4 chars: the term occurs
/// starting at a word boundary inside a longer token, so "market" gets
/// partial credit for "marketing".
fn substring_match(document: &str, term: &str) -> bool {
    if term.chars().count() <= 4 {
        return false;
    }
    regex::Regex::new(&format!(r"(?i)\b{}", regex::escape(term)))
        .map(|re| re.is_match(document))
        .unwrap_or(false)
}
