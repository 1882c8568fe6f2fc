use crate::error::{CuratorError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for similarity scoring and match-tier classification.
///
/// A config is read-only during a run. Runtime tuning replaces the whole
/// value between runs (`Deduplicator::set_config`); there is no partial
/// mutation mid-scan.
///
/// The engine accepts whatever it is given — it never calls `validate()`
/// itself. Callers owning an admin surface should validate before
/// swapping a config in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Minimum score for an `exact` match. Default: 95.
    pub exact_threshold: u8,

    /// Minimum score for a `near_exact` match. Default: 85.
    pub near_exact_threshold: u8,

    /// Minimum score for a `similar` match. Default: 70.
    pub similar_threshold: u8,

    /// Minimum score to be a candidate at all. Below this a pair is
    /// excluded from the output entirely. Default: 50.
    pub potential_threshold: u8,

    /// Per-field scoring weights.
    pub weights: FieldWeights,

    /// Reserved extension point: edit-distance fuzzy matching is always
    /// on in the current scoring path. Default: true.
    pub enable_fuzzy_matching: bool,

    /// Reserved extension point: embedding-based semantic similarity.
    /// No behavior is wired to this yet. Default: false.
    pub enable_semantic_matching: bool,
}

/// Weights for the field-by-field similarity score.
///
/// Each weight scales that field's local similarity (0.0 - 1.0) in the
/// weighted average. Weights of fields missing on a record pair drop out
/// of the denominator, so partial records still score over the fields
/// they do have. The total should stay <= 1.0 to keep scores bounded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldWeights {
    /// Artifact name. Default: 0.30.
    pub name: f64,

    /// Free-text description. Default: 0.20.
    pub description: f64,

    /// Tag set overlap. Default: 0.15.
    pub tags: f64,

    /// Category equality. Default: 0.10.
    pub category: f64,

    /// Type-specific payload sub-score. Applies only when both records
    /// share an artifact type. Default: 0.10.
    pub payload: f64,

    /// Same-source boost. A matching source contributes 0.2 x this
    /// weight; a differing source contributes 0. Default: 0.05.
    pub source: f64,

    /// Placeholder carried for config compatibility: no version field
    /// exists on records yet, so this never contributes to a score.
    /// Default: 0.05.
    pub version: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 0.30,
            description: 0.20,
            tags: 0.15,
            category: 0.10,
            payload: 0.10,
            source: 0.05,
            version: 0.05,
        }
    }
}

impl FieldWeights {
    /// Sum of all configured weights
    pub fn total(&self) -> f64 {
        self.name
            + self.description
            + self.tags
            + self.category
            + self.payload
            + self.source
            + self.version
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            exact_threshold: 95,
            near_exact_threshold: 85,
            similar_threshold: 70,
            potential_threshold: 50,
            weights: FieldWeights::default(),
            enable_fuzzy_matching: true,
            enable_semantic_matching: false,
        }
    }
}

impl SimilarityConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exact-match threshold
    pub fn with_exact_threshold(mut self, threshold: u8) -> Self {
        self.exact_threshold = threshold.min(100);
        self
    }

    /// Set the near-exact threshold
    pub fn with_near_exact_threshold(mut self, threshold: u8) -> Self {
        self.near_exact_threshold = threshold.min(100);
        self
    }

    /// Set the similar threshold
    pub fn with_similar_threshold(mut self, threshold: u8) -> Self {
        self.similar_threshold = threshold.min(100);
        self
    }

    /// Set the potential threshold (candidate cut-off)
    pub fn with_potential_threshold(mut self, threshold: u8) -> Self {
        self.potential_threshold = threshold.min(100);
        self
    }

    /// Replace the field weights
    pub fn with_weights(mut self, weights: FieldWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Validate the configuration.
    ///
    /// Opt-in for callers; the engine itself runs with whatever config it
    /// holds, sane or not.
    pub fn validate(&self) -> Result<()> {
        if self.exact_threshold < self.near_exact_threshold
            || self.near_exact_threshold < self.similar_threshold
            || self.similar_threshold < self.potential_threshold
        {
            return Err(CuratorError::Validation(
                "match thresholds must be ordered exact >= near_exact >= similar >= potential"
                    .to_string(),
            ));
        }

        let w = &self.weights;
        for (field, value) in [
            ("name", w.name),
            ("description", w.description),
            ("tags", w.tags),
            ("category", w.category),
            ("payload", w.payload),
            ("source", w.source),
            ("version", w.version),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CuratorError::Validation(format!(
                    "weight for '{}' must be between 0.0 and 1.0, got {}",
                    field, value
                )));
            }
        }

        if w.total() > 1.0 + f64::EPSILON {
            return Err(CuratorError::Validation(format!(
                "field weights sum to {:.3}, must not exceed 1.0",
                w.total()
            )));
        }

        Ok(())
    }
}
