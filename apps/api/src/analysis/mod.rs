//! The extraction and ATS-scoring core plus its HTTP handlers.

pub mod extractor;
pub mod handlers;
pub mod lexicon;
pub mod scorer;
pub mod validate;

pub use extractor::{KeywordExtractor, Term};
pub use scorer::{score_document, MatchResult};
