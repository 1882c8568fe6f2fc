//! Match-tier classification and confidence adjustment.

use crate::config::SimilarityConfig;
use crate::types::{ArtifactRecord, MatchTier};

/// Quality scores above this count as "high quality" for the confidence
/// adjustment.
const HIGH_QUALITY_BAR: u8 = 80;

/// Map a raw similarity score to a match tier.
///
/// Monotone in the score: higher scores never classify into a lower
/// tier. Scores below the potential threshold return `None` — the pair
/// is not a candidate at all.
pub fn classify(score: u8, config: &SimilarityConfig) -> Option<MatchTier> {
    if score >= config.exact_threshold {
        Some(MatchTier::Exact)
    } else if score >= config.near_exact_threshold {
        Some(MatchTier::NearExact)
    } else if score >= config.similar_threshold {
        Some(MatchTier::Similar)
    } else if score >= config.potential_threshold {
        Some(MatchTier::Potential)
    } else {
        None
    }
}

/// Adjusted confidence for a candidate pair, 0 - 100.
///
/// Starts at the raw similarity score and nudges it with signals the
/// weighted score does not capture:
/// - +10 exact (case-folded) name equality
/// - +5 category equality
/// - -5 same source: two listings of one artifact usually come from
///   *different* origins, so same-source agreement is weaker evidence
/// - +5 both records verified
/// - +5 both records high quality
pub fn confidence(a: &ArtifactRecord, b: &ArtifactRecord, score: u8) -> u8 {
    let mut value = score as i32;

    if a.name.trim().to_lowercase() == b.name.trim().to_lowercase() && !a.name.trim().is_empty() {
        value += 10;
    }
    if a.category == b.category && !a.category.is_empty() {
        value += 5;
    }
    if a.source == b.source && !a.source.is_empty() {
        value -= 5;
    }
    if a.verified && b.verified {
        value += 5;
    }
    if a.quality_score > HIGH_QUALITY_BAR && b.quality_score > HIGH_QUALITY_BAR {
        value += 5;
    }

    value.clamp(0, 100) as u8
}
