//! Merge-strategy catalogue and type-aware content merging.
//!
//! Two deliberately separate concerns: `select_strategy` only *tags* a
//! group with a resolution category for the downstream review layer,
//! while `merge_records` is the explicit, type-dispatched field merger a
//! caller invokes once a group is approved for collapsing. The catalogue
//! never executes anything.

use crate::error::{CuratorError, Result};
use crate::types::{ArtifactPayload, ArtifactRecord, ArtifactType, MergeStrategy};

/// An advisory entry in the strategy catalogue.
///
/// `applies_to: None` means type-agnostic. Priority orders entries when
/// a caller wants to pick one to apply by hand; the selector only cares
/// whether *any* entry applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeStrategyDef {
    pub name: &'static str,
    pub priority: u8,
    pub description: &'static str,
    pub applies_to: Option<ArtifactType>,
}

impl MergeStrategyDef {
    /// Whether this entry applies to records of the given type
    pub fn applies(&self, artifact_type: ArtifactType) -> bool {
        match self.applies_to {
            None => true,
            Some(t) => t == artifact_type,
        }
    }
}

const CATALOGUE: &[MergeStrategyDef] = &[
    MergeStrategyDef {
        name: "keep_highest_quality",
        priority: 1,
        description: "Retain the record with the highest quality score",
        applies_to: None,
    },
    MergeStrategyDef {
        name: "keep_most_recent",
        priority: 2,
        description: "Retain the most recently updated record",
        applies_to: None,
    },
    MergeStrategyDef {
        name: "keep_verified",
        priority: 3,
        description: "Prefer a human-verified record over unverified ones",
        applies_to: None,
    },
    MergeStrategyDef {
        name: "merge_workflow_content",
        priority: 4,
        description: "Union integrations, triggers, actions, and tags across workflow records",
        applies_to: Some(ArtifactType::Workflow),
    },
    MergeStrategyDef {
        name: "merge_agent_content",
        priority: 4,
        description: "Union capabilities, use cases, industries, and tags across agent records",
        applies_to: Some(ArtifactType::AiAgent),
    },
    MergeStrategyDef {
        name: "merge_tool_content",
        priority: 4,
        description: "Union features, capabilities, integrations, and tags across tool records",
        applies_to: Some(ArtifactType::Tool),
    },
];

/// The full advisory catalogue
pub fn strategy_catalogue() -> &'static [MergeStrategyDef] {
    CATALOGUE
}

/// Pick the resolution category for a group based on its primary.
///
/// If any catalogue entry applies to the primary's type the group is
/// tagged `MergeContent`, otherwise `KeepPrimary`. `ManualReview` is
/// never chosen here — routing a group to a human is the downstream
/// layer's call.
pub fn select_strategy(primary: &ArtifactRecord) -> MergeStrategy {
    let artifact_type = primary.artifact_type();
    if CATALOGUE.iter().any(|def| def.applies(artifact_type)) {
        MergeStrategy::MergeContent
    } else {
        MergeStrategy::KeepPrimary
    }
}

/// Collapse a duplicate into its primary, producing a merged record.
///
/// Same-type only. List fields are unioned (first occurrence wins, order
/// preserved), the longer description is kept, quality takes the max,
/// `updated_at` takes the later timestamp, and every other scalar comes
/// from the primary unchanged.
pub fn merge_records(primary: &ArtifactRecord, duplicate: &ArtifactRecord) -> Result<ArtifactRecord> {
    let mut merged = primary.clone();

    merged.payload = merge_payloads(&primary.payload, &duplicate.payload)?;
    merged.tags = union_dedup(&primary.tags, &duplicate.tags);

    if duplicate.description.len() > primary.description.len() {
        merged.description = duplicate.description.clone();
    }
    merged.quality_score = primary.quality_score.max(duplicate.quality_score);
    merged.updated_at = primary.updated_at.max(duplicate.updated_at);

    Ok(merged)
}

fn merge_payloads(primary: &ArtifactPayload, duplicate: &ArtifactPayload) -> Result<ArtifactPayload> {
    match (primary, duplicate) {
        (
            ArtifactPayload::Workflow {
                integrations: ia,
                triggers: ta,
                actions: aa,
                node_count,
                complexity,
                execution_mode,
            },
            ArtifactPayload::Workflow {
                integrations: ib,
                triggers: tb,
                actions: ab,
                ..
            },
        ) => Ok(ArtifactPayload::Workflow {
            integrations: union_dedup(ia, ib),
            triggers: union_dedup(ta, tb),
            actions: union_dedup(aa, ab),
            node_count: *node_count,
            complexity: *complexity,
            execution_mode: execution_mode.clone(),
        }),

        (
            ArtifactPayload::AiAgent {
                model,
                provider,
                capabilities: ca,
                use_cases: ua,
                industries: ia,
            },
            ArtifactPayload::AiAgent {
                capabilities: cb,
                use_cases: ub,
                industries: ib,
                ..
            },
        ) => Ok(ArtifactPayload::AiAgent {
            model: model.clone(),
            provider: provider.clone(),
            capabilities: union_dedup(ca, cb),
            use_cases: union_dedup(ua, ub),
            industries: union_dedup(ia, ib),
        }),

        (
            ArtifactPayload::Tool {
                tool_type,
                platform,
                features: fa,
                capabilities: ca,
                integrations: ia,
            },
            ArtifactPayload::Tool {
                features: fb,
                capabilities: cb,
                integrations: ib,
                ..
            },
        ) => Ok(ArtifactPayload::Tool {
            tool_type: tool_type.clone(),
            platform: platform.clone(),
            features: union_dedup(fa, fb),
            capabilities: union_dedup(ca, cb),
            integrations: union_dedup(ia, ib),
        }),

        _ => Err(CuratorError::TypeMismatch {
            expected: primary.artifact_type(),
            found: duplicate.artifact_type(),
        }),
    }
}

/// Union two lists keeping first-seen order, primary entries first
fn union_dedup(primary: &[String], duplicate: &[String]) -> Vec<String> {
    let mut out: Vec<String> = primary.to_vec();
    for item in duplicate {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}
