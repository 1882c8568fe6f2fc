//! Weighted field-by-field similarity scoring between two records.

use crate::config::SimilarityConfig;
use crate::similarity::payload::payload_similarity;
use crate::similarity::text::{array_similarity, string_similarity};
use crate::types::ArtifactRecord;

/// Local similarity above which a field is reported as matched.
const NAME_MATCH_THRESHOLD: f64 = 0.8;
const DESCRIPTION_MATCH_THRESHOLD: f64 = 0.7;
const TAGS_MATCH_THRESHOLD: f64 = 0.6;

/// Same-source agreement contributes this fraction of the source weight.
const SAME_SOURCE_BOOST: f64 = 0.2;

/// Raw similarity between two records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldScore {
    /// Weighted similarity, 0 - 100.
    pub score: u8,

    /// Fields whose local similarity cleared the reporting threshold.
    pub matched_fields: Vec<String>,
}

/// Score a record pair field by field.
///
/// Each applicable field contributes `local_similarity x weight` to the
/// numerator and its weight to the denominator; the final score is the
/// weighted average scaled to 0 - 100. Fields missing on both sides drop
/// out of the denominator entirely, so sparse records are scored over
/// what they actually carry. A pair with no applicable field at all
/// scores 0, never NaN.
///
/// The payload term only applies when both records share an artifact
/// type and at least one payload sub-field was comparable. The `version`
/// weight is a configuration placeholder with no record field behind it
/// and never contributes.
pub fn score_pair(a: &ArtifactRecord, b: &ArtifactRecord, config: &SimilarityConfig) -> FieldScore {
    let w = &config.weights;
    let mut weighted_sum = 0.0_f64;
    let mut total_weight = 0.0_f64;
    let mut matched_fields = Vec::new();

    if has_text(&a.name) && has_text(&b.name) {
        let sim = string_similarity(&a.name, &b.name);
        weighted_sum += sim * w.name;
        total_weight += w.name;
        if sim > NAME_MATCH_THRESHOLD {
            matched_fields.push("name".to_string());
        }
    }

    if has_text(&a.description) && has_text(&b.description) {
        let sim = string_similarity(&a.description, &b.description);
        weighted_sum += sim * w.description;
        total_weight += w.description;
        if sim > DESCRIPTION_MATCH_THRESHOLD {
            matched_fields.push("description".to_string());
        }
    }

    if !a.tags.is_empty() || !b.tags.is_empty() {
        let sim = array_similarity(&a.tags, &b.tags);
        weighted_sum += sim * w.tags;
        total_weight += w.tags;
        if sim > TAGS_MATCH_THRESHOLD {
            matched_fields.push("tags".to_string());
        }
    }

    if has_text(&a.category) && has_text(&b.category) {
        let equal = a.category.trim().eq_ignore_ascii_case(b.category.trim());
        if equal {
            weighted_sum += w.category;
            matched_fields.push("category".to_string());
        }
        total_weight += w.category;
    }

    if let Some(sub) = payload_similarity(&a.payload, &b.payload) {
        weighted_sum += sub * w.payload;
        total_weight += w.payload;
    }

    if has_text(&a.source) && has_text(&b.source) {
        // Same source is only a weak hint: a catalogue rarely lists the
        // same artifact twice, so agreement earns a fifth of the weight
        // and disagreement earns nothing.
        if a.source == b.source {
            weighted_sum += SAME_SOURCE_BOOST * w.source;
        }
        total_weight += w.source;
    }

    let score = if total_weight > 0.0 {
        ((weighted_sum / total_weight) * 100.0).round().min(100.0) as u8
    } else {
        0
    };

    FieldScore {
        score,
        matched_fields,
    }
}

fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}
