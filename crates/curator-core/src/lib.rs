//! Deduplication engine for pooled automation-artifact metadata.
//!
//! Records describing workflows, AI agents, and tools arrive from
//! heterogeneous sources under different names, phrasing, and
//! formatting. This crate finds the records that describe the same
//! underlying artifact and decides how to consolidate them:
//!
//! - weighted field-by-field similarity scoring (lexical only, no ML)
//! - match-tier classification with confidence adjustment
//! - greedy single-pass grouping into primary+duplicates groups
//! - advisory merge-strategy tagging and explicit type-aware merging
//!
//! The engine is a pure, synchronous batch computation: no I/O, no
//! persistence, no cross-run state. Ingestion and review/auto-merge
//! live in external collaborators.

pub mod config;
pub mod dedup;
pub mod error;
pub mod similarity;
pub mod types;

pub use config::{FieldWeights, SimilarityConfig};
pub use dedup::{
    classify, confidence, find_duplicates, merge_records, select_strategy, strategy_catalogue,
    Deduplicator, MergeStrategyDef,
};
pub use error::{CuratorError, Result};
pub use similarity::{
    array_similarity, levenshtein, payload_similarity, score_pair, string_similarity, FieldScore,
};
pub use types::{
    ArtifactPayload, ArtifactRecord, ArtifactType, Complexity, DedupResult, DuplicateCandidate,
    DuplicateGroup, GroupId, MatchTier, MergeStrategy, RecordId, TierCounts,
};
