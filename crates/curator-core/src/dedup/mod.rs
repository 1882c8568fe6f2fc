//! Deduplication pipeline: classify scored pairs into match tiers,
//! build primary+duplicates groups in a single greedy pass, and tag
//! each group with an advisory merge strategy.

mod classifier;
mod engine;
mod merge;

#[cfg(test)]
mod tests;

pub use classifier::{classify, confidence};
pub use engine::{find_duplicates, Deduplicator};
pub use merge::{merge_records, select_strategy, strategy_catalogue, MergeStrategyDef};
