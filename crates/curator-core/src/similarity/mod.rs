//! Similarity scoring: lexical primitives, type-specific payload
//! sub-scoring, and the weighted field-by-field record scorer.

mod payload;
mod scorer;
mod text;

pub use payload::payload_similarity;
pub use scorer::{score_pair, FieldScore};
pub use text::{array_similarity, levenshtein, string_similarity};
