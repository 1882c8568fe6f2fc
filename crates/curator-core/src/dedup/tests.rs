//! Cross-module scenario and property tests for the dedup pipeline.

use crate::config::SimilarityConfig;
use crate::dedup::{find_duplicates, merge_records};
use crate::similarity::{array_similarity, score_pair, string_similarity};
use crate::types::{ArtifactPayload, ArtifactRecord, MatchTier, MergeStrategy};
use proptest::prelude::*;
use std::collections::HashSet;

fn vecs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_slack_notification_pair_is_exact() {
    let a = ArtifactRecord::new("a", "Send Slack Notification", ArtifactPayload::workflow())
        .with_tags(vecs(&["slack", "notify"]))
        .with_category("comms");
    let b = ArtifactRecord::new("b", "send slack notification ", ArtifactPayload::workflow())
        .with_tags(vecs(&["slack", "notify"]))
        .with_category("comms");

    let result = find_duplicates(&[a, b], &SimilarityConfig::default());

    assert_eq!(result.total_groups, 1);
    assert_eq!(result.tiers.exact, 1);
    assert_eq!(result.groups[0].duplicates[0].tier, MatchTier::Exact);
    assert_eq!(result.groups[0].strategy, MergeStrategy::MergeContent);
}

#[test]
fn test_weakly_overlapping_agents_excluded() {
    let a = ArtifactRecord::new(
        "a",
        "Invoice triage assistant",
        ArtifactPayload::AiAgent {
            model: Some("gpt-4o".into()),
            provider: Some("openai".into()),
            capabilities: Vec::new(),
            use_cases: Vec::new(),
            industries: Vec::new(),
        },
    )
    .with_tags(vecs(&["finance", "ocr", "triage", "email"]));

    let b = ArtifactRecord::new(
        "b",
        "Meeting summarizer bot",
        ArtifactPayload::AiAgent {
            model: Some("claude-3-haiku".into()),
            provider: Some("anthropic".into()),
            capabilities: Vec::new(),
            use_cases: Vec::new(),
            industries: Vec::new(),
        },
    )
    .with_tags(vecs(&["meetings", "summaries", "calendar", "email"]));

    let config = SimilarityConfig::default();
    let score = score_pair(&a, &b, &config).score;
    assert!(score < 50, "expected sub-potential score, got {}", score);

    let result = find_duplicates(&[a, b], &config);
    assert_eq!(result.total_groups, 0);
    assert_eq!(result.total_duplicates, 0);
    assert_eq!(result.tiers.total(), 0);
}

#[test]
fn test_group_then_merge_end_to_end() {
    let a = ArtifactRecord::new(
        "a",
        "Sync CRM contacts",
        ArtifactPayload::Workflow {
            integrations: vecs(&["salesforce", "gmail"]),
            triggers: vecs(&["schedule"]),
            actions: Vec::new(),
            node_count: Some(8),
            complexity: None,
            execution_mode: None,
        },
    )
    .with_tags(vecs(&["crm", "sync"]))
    .with_category("sales")
    .with_quality(72);

    let b = ArtifactRecord::new(
        "b",
        "Sync CRM Contacts",
        ArtifactPayload::Workflow {
            integrations: vecs(&["salesforce", "hubspot"]),
            triggers: vecs(&["schedule"]),
            actions: Vec::new(),
            node_count: Some(9),
            complexity: None,
            execution_mode: None,
        },
    )
    .with_tags(vecs(&["crm", "sync"]))
    .with_category("sales")
    .with_quality(88);

    let result = find_duplicates(&[a, b], &SimilarityConfig::default());
    assert_eq!(result.total_groups, 1);

    let group = &result.groups[0];
    assert_eq!(group.strategy, MergeStrategy::MergeContent);

    let merged = merge_records(&group.primary, &group.duplicates[0].record).unwrap();
    match merged.payload {
        ArtifactPayload::Workflow { integrations, .. } => {
            let unique: HashSet<&String> = integrations.iter().collect();
            assert_eq!(unique.len(), integrations.len(), "union left duplicates");
            assert_eq!(integrations, vecs(&["salesforce", "gmail", "hubspot"]));
        }
        _ => panic!("merged payload changed type"),
    }
    assert_eq!(merged.quality_score, 88);
}

#[test]
fn test_chained_similarity_is_not_transitive() {
    // a ~ b and b ~ c. The greedy pass claims both b and c under a (or
    // leaves c out entirely) — it never builds a group around b.
    let a = ArtifactRecord::new("a", "Export orders to sheet", ArtifactPayload::workflow())
        .with_tags(vecs(&["orders", "sheets", "export"]))
        .with_category("ops");
    let b = ArtifactRecord::new("b", "Export orders to sheets", ArtifactPayload::workflow())
        .with_tags(vecs(&["orders", "sheets", "export"]))
        .with_category("ops");
    let c = ArtifactRecord::new("c", "Export order rows to google sheets", ArtifactPayload::workflow())
        .with_tags(vecs(&["orders", "sheets"]))
        .with_category("ops");

    let result = find_duplicates(&[a, b, c], &SimilarityConfig::default());

    for group in &result.groups {
        assert_ne!(group.primary.id, "b", "claimed record became a primary");
    }
}

// --- Property tests ---

fn arb_payload() -> impl Strategy<Value = ArtifactPayload> {
    prop_oneof![
        Just(ArtifactPayload::workflow()),
        Just(ArtifactPayload::agent()),
        Just(ArtifactPayload::tool()),
    ]
}

fn arb_record() -> impl Strategy<Value = ArtifactRecord> {
    let names = prop_oneof![
        Just("Send Slack Notification"),
        Just("send slack notification"),
        Just("Slack notifier"),
        Just("Sync CRM contacts"),
        Just("Sync CRM Contacts daily"),
        Just("Rotate cluster secrets"),
        Just("Summarize meeting notes"),
    ];
    let tag_pool = prop::collection::vec(
        prop_oneof![
            Just("slack"),
            Just("notify"),
            Just("crm"),
            Just("sync"),
            Just("security"),
            Just("meetings"),
        ],
        0..4,
    );
    let categories = prop_oneof![Just(""), Just("comms"), Just("sales"), Just("ops")];
    let sources = prop_oneof![Just("marketplace"), Just("community"), Just("internal")];

    (
        names,
        tag_pool,
        categories,
        sources,
        0u8..=100,
        any::<bool>(),
        arb_payload(),
    )
        .prop_map(|(name, tags, category, source, quality, verified, payload)| {
            ArtifactRecord::new("pending", name, payload)
                .with_tags(tags.into_iter().map(String::from).collect())
                .with_category(category)
                .with_source(source)
                .with_quality(quality)
                .with_verified(verified)
        })
}

fn arb_records(max: usize) -> impl Strategy<Value = Vec<ArtifactRecord>> {
    prop::collection::vec(arb_record(), 0..max).prop_map(|records| {
        records
            .into_iter()
            .enumerate()
            .map(|(i, mut record)| {
                record.id = format!("rec-{i}");
                record
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_scores_and_confidence_bounded(records in arb_records(12)) {
        let config = SimilarityConfig::default();
        let result = find_duplicates(&records, &config);

        for group in &result.groups {
            for dup in &group.duplicates {
                prop_assert!(dup.similarity_score <= 100);
                prop_assert!(dup.confidence <= 100);
            }
            prop_assert!(group.quality_score <= 100);
        }
    }

    #[test]
    fn prop_groups_partition_input(records in arb_records(16)) {
        let result = find_duplicates(&records, &SimilarityConfig::default());

        let mut seen = HashSet::new();
        for group in &result.groups {
            prop_assert!(seen.insert(group.primary.id.clone()), "primary appears twice");
            for dup in &group.duplicates {
                prop_assert!(seen.insert(dup.record.id.clone()), "record in two groups");
            }
        }

        let input_ids: HashSet<String> = records.iter().map(|r| r.id.clone()).collect();
        for id in &seen {
            prop_assert!(input_ids.contains(id), "output id not in input");
        }
    }

    #[test]
    fn prop_tier_counts_cover_all_candidates(records in arb_records(12)) {
        let result = find_duplicates(&records, &SimilarityConfig::default());
        prop_assert_eq!(result.tiers.total() as usize, result.total_duplicates);
        prop_assert_eq!(
            result.total_duplicates,
            result.groups.iter().map(|g| g.duplicates.len()).sum::<usize>()
        );
    }

    #[test]
    fn prop_string_similarity_reflexive(s in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,30}") {
        prop_assert_eq!(string_similarity(&s, &s), 1.0);
    }

    #[test]
    fn prop_string_similarity_symmetric_and_bounded(
        a in "[a-z ]{0,20}",
        b in "[a-z ]{0,20}",
    ) {
        let ab = string_similarity(&a, &b);
        let ba = string_similarity(&b, &a);
        prop_assert_eq!(ab, ba);
        prop_assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn prop_array_similarity_symmetric(
        a in prop::collection::vec("[a-z]{1,8}", 0..6),
        b in prop::collection::vec("[a-z]{1,8}", 0..6),
    ) {
        prop_assert_eq!(array_similarity(&a, &b), array_similarity(&b, &a));
    }
}
