//! Type-specific payload sub-scoring.
//!
//! Only pairs sharing an artifact type get a payload sub-score; the
//! result feeds the `payload` weighted term of the field scorer.

use crate::similarity::text::array_similarity;
use crate::types::ArtifactPayload;

/// Node counts within this distance of each other count as "close".
const NODE_COUNT_TOLERANCE: u32 = 2;

/// Weighted sub-score in [0.0, 1.0] for two payloads of the same type.
///
/// Each sub-field contributes `local_similarity x weight` and its weight
/// to the denominator only when present on both sides (scalars) or
/// non-empty on at least one side (arrays). Returns `None` when the
/// types differ or no sub-field was applicable, so the caller can drop
/// the payload term from its own weighted average instead of counting a
/// meaningless zero.
pub fn payload_similarity(a: &ArtifactPayload, b: &ArtifactPayload) -> Option<f64> {
    match (a, b) {
        (
            ArtifactPayload::Workflow {
                integrations: ia,
                triggers: ta,
                node_count: na,
                complexity: ca,
                execution_mode: ea,
                ..
            },
            ArtifactPayload::Workflow {
                integrations: ib,
                triggers: tb,
                node_count: nb,
                complexity: cb,
                execution_mode: eb,
                ..
            },
        ) => {
            let mut acc = WeightedAcc::new();
            if let (Some(na), Some(nb)) = (na, nb) {
                acc.add(node_count_closeness(*na, *nb), 0.2);
            }
            if !ia.is_empty() || !ib.is_empty() {
                acc.add(array_similarity(ia, ib), 0.3);
            }
            if let (Some(ca), Some(cb)) = (ca, cb) {
                acc.add(equality(ca == cb), 0.2);
            }
            if let (Some(ea), Some(eb)) = (ea, eb) {
                acc.add(equality(ea == eb), 0.1);
            }
            if !ta.is_empty() || !tb.is_empty() {
                acc.add(array_similarity(ta, tb), 0.2);
            }
            acc.finish()
        }

        (
            ArtifactPayload::AiAgent {
                model: ma,
                provider: pa,
                capabilities: ca,
                use_cases: ua,
                ..
            },
            ArtifactPayload::AiAgent {
                model: mb,
                provider: pb,
                capabilities: cb,
                use_cases: ub,
                ..
            },
        ) => {
            let mut acc = WeightedAcc::new();
            if let (Some(ma), Some(mb)) = (ma, mb) {
                acc.add(equality(ma == mb), 0.3);
            }
            if let (Some(pa), Some(pb)) = (pa, pb) {
                acc.add(equality(pa == pb), 0.2);
            }
            if !ca.is_empty() || !cb.is_empty() {
                acc.add(array_similarity(ca, cb), 0.3);
            }
            if !ua.is_empty() || !ub.is_empty() {
                acc.add(array_similarity(ua, ub), 0.2);
            }
            acc.finish()
        }

        (
            ArtifactPayload::Tool {
                tool_type: ta,
                platform: pa,
                features: fa,
                capabilities: ca,
                ..
            },
            ArtifactPayload::Tool {
                tool_type: tb,
                platform: pb,
                features: fb,
                capabilities: cb,
                ..
            },
        ) => {
            let mut acc = WeightedAcc::new();
            if let (Some(ta), Some(tb)) = (ta, tb) {
                acc.add(equality(ta == tb), 0.2);
            }
            if let (Some(pa), Some(pb)) = (pa, pb) {
                acc.add(equality(pa == pb), 0.2);
            }
            if !fa.is_empty() || !fb.is_empty() {
                acc.add(array_similarity(fa, fb), 0.3);
            }
            if !ca.is_empty() || !cb.is_empty() {
                acc.add(array_similarity(ca, cb), 0.3);
            }
            acc.finish()
        }

        _ => None,
    }
}

fn equality(eq: bool) -> f64 {
    if eq {
        1.0
    } else {
        0.0
    }
}

fn node_count_closeness(a: u32, b: u32) -> f64 {
    if a.abs_diff(b) <= NODE_COUNT_TOLERANCE {
        1.0
    } else {
        0.0
    }
}

/// Weighted average with an explicit applicable-weight denominator
struct WeightedAcc {
    weighted_sum: f64,
    total_weight: f64,
}

impl WeightedAcc {
    fn new() -> Self {
        Self {
            weighted_sum: 0.0,
            total_weight: 0.0,
        }
    }

    fn add(&mut self, similarity: f64, weight: f64) {
        self.weighted_sum += similarity * weight;
        self.total_weight += weight;
    }

    fn finish(self) -> Option<f64> {
        if self.total_weight > 0.0 {
            Some(self.weighted_sum / self.total_weight)
        } else {
            None
        }
    }
}
