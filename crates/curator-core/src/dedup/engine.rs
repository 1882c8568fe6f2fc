//! Greedy single-pass duplicate grouping.
//!
//! One forward pass over the input: each still-unprocessed record in
//! turn becomes a candidate primary, its row of later unprocessed
//! records is scored, and everything clearing the potential threshold is
//! claimed into its group immediately. Claimed records never become
//! primaries and are never reconsidered, so the emitted groups plus the
//! leftover singletons always partition the input.
//!
//! This is intentionally non-transitive: if A~B and B~C but A!~C, C is
//! grouped wherever the scan order puts it, not under B. A union-find
//! transitive variant would change which record wins the primary role in
//! ambiguous chains, so it stays out of the default path.

use crate::config::SimilarityConfig;
use crate::dedup::classifier::{classify, confidence};
use crate::dedup::merge::select_strategy;
use crate::similarity::{score_pair, FieldScore};
use crate::types::{ArtifactRecord, DedupResult, DuplicateCandidate, DuplicateGroup, TierCounts};
use rayon::prelude::*;
use std::time::Instant;

/// Pairwise scoring switches to rayon above this input size; below it
/// the thread-pool overhead outweighs the scoring work.
const PARALLEL_SCORING_THRESHOLD: usize = 64;

/// Deduplication engine holding an immutable per-run configuration.
///
/// # Example
/// ```rust
/// use curator_core::{ArtifactPayload, ArtifactRecord, Deduplicator, SimilarityConfig};
///
/// let records = vec![
///     ArtifactRecord::new("a", "Send Slack Notification", ArtifactPayload::workflow()),
///     ArtifactRecord::new("b", "send slack notification ", ArtifactPayload::workflow()),
/// ];
///
/// let engine = Deduplicator::new(SimilarityConfig::default());
/// let result = engine.run(&records);
/// assert_eq!(result.total_groups, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Deduplicator {
    config: SimilarityConfig,
}

impl Deduplicator {
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Replace the configuration wholesale. Takes effect on the next
    /// call to `run`; a run in progress is never affected.
    pub fn set_config(&mut self, config: SimilarityConfig) {
        self.config = config;
    }

    /// Run deduplication over a pooled collection
    pub fn run(&self, records: &[ArtifactRecord]) -> DedupResult {
        find_duplicates(records, &self.config)
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(SimilarityConfig::default())
    }
}

/// Find duplicate groups in a pooled record collection.
///
/// Pure entry point: same records + same config = same groups. Zero or
/// one records short-circuit to an empty result.
pub fn find_duplicates(records: &[ArtifactRecord], config: &SimilarityConfig) -> DedupResult {
    let started = Instant::now();

    if records.len() < 2 {
        return DedupResult::empty(started.elapsed());
    }

    let mut processed = vec![false; records.len()];
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut tiers = TierCounts::new();

    for i in 0..records.len() {
        if processed[i] {
            continue;
        }

        // Scoring the row is read-only over the input; only the
        // sequential claim loop below may touch the processed markers.
        let row = score_row(records, &processed, i, config);

        let mut duplicates = Vec::new();
        for (j, field_score) in row {
            let Some(tier) = classify(field_score.score, config) else {
                continue;
            };
            tiers.record(tier);

            duplicates.push(DuplicateCandidate {
                record: records[j].clone(),
                similarity_score: field_score.score,
                tier,
                matched_fields: field_score.matched_fields,
                confidence: confidence(&records[i], &records[j], field_score.score),
            });
            // Claimed: j can never become its own primary or be taken
            // by a later scan.
            processed[j] = true;
        }

        if !duplicates.is_empty() {
            processed[i] = true;
            let strategy = select_strategy(&records[i]);
            let group = DuplicateGroup::new(records[i].clone(), duplicates, strategy);
            log::debug!(
                "group {} primary={} members={} strategy={:?}",
                group.id,
                group.primary.id,
                group.total_items,
                group.strategy
            );
            groups.push(group);
        }
    }

    let result = DedupResult {
        total_duplicates: groups.iter().map(|g| g.duplicates.len()).sum(),
        total_groups: groups.len(),
        groups,
        elapsed: started.elapsed(),
        tiers,
    };

    log::info!("{}", result.summary());
    result
}

/// Score record `i` against every unprocessed record after it.
///
/// Results come back in index order either way, so the claim loop is
/// deterministic regardless of how the scoring was scheduled.
fn score_row(
    records: &[ArtifactRecord],
    processed: &[bool],
    i: usize,
    config: &SimilarityConfig,
) -> Vec<(usize, FieldScore)> {
    let score_one = |j: usize| (j, score_pair(&records[i], &records[j], config));

    if records.len() - i > PARALLEL_SCORING_THRESHOLD {
        (i + 1..records.len())
            .into_par_iter()
            .filter(|&j| !processed[j])
            .map(score_one)
            .collect()
    } else {
        (i + 1..records.len())
            .filter(|&j| !processed[j])
            .map(score_one)
            .collect()
    }
}
