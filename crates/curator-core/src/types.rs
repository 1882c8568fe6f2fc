use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Type alias for record identifiers. Source-scoped strings, because
/// records arrive from heterogeneous origins with their own id schemes.
pub type RecordId = String;

/// Type alias for duplicate-group identifiers
pub type GroupId = Uuid;

/// A normalized metadata record describing one automation artifact.
///
/// Records are produced upstream by the ingestion/normalization pipeline
/// and are treated as immutable value objects for the lifetime of a
/// deduplication run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactRecord {
    /// Unique identifier within the pooled collection.
    pub id: RecordId,

    /// Human-readable artifact name. The highest-weighted similarity field.
    pub name: String,

    /// Free-text description. Empty when the origin provided none.
    pub description: String,

    /// Ad-hoc labels. Treated as an unordered, case-insensitive set
    /// during scoring.
    pub tags: Vec<String>,

    /// Catalogue category. Compared by exact equality.
    pub category: String,

    /// Origin identifier: "n8n-community", "internal-registry", ...
    /// Same-source pairs get a small score boost but a confidence
    /// penalty — cross-source agreement is stronger duplicate evidence.
    pub source: String,

    /// Curation quality score (0 - 100).
    pub quality_score: u8,

    /// Whether a human has verified this record.
    pub verified: bool,

    /// Last modification upstream.
    pub updated_at: DateTime<Utc>,

    /// Type-specific content, discriminated by artifact type.
    pub payload: ArtifactPayload,
}

/// Type-specific payload of a record.
///
/// Scalar sub-fields are optional — origins routinely omit them, and the
/// payload scorer only weighs sub-fields that are actually present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArtifactPayload {
    /// An automation workflow (e.g. an n8n or Zapier flow).
    Workflow {
        integrations: Vec<String>,
        triggers: Vec<String>,
        actions: Vec<String>,
        node_count: Option<u32>,
        complexity: Option<Complexity>,
        execution_mode: Option<String>,
    },

    /// An AI agent definition.
    AiAgent {
        model: Option<String>,
        provider: Option<String>,
        capabilities: Vec<String>,
        use_cases: Vec<String>,
        industries: Vec<String>,
    },

    /// A standalone tool or integration component.
    Tool {
        tool_type: Option<String>,
        platform: Option<String>,
        features: Vec<String>,
        capabilities: Vec<String>,
        integrations: Vec<String>,
    },
}

impl ArtifactPayload {
    /// Discriminant of this payload
    pub fn artifact_type(&self) -> ArtifactType {
        match self {
            ArtifactPayload::Workflow { .. } => ArtifactType::Workflow,
            ArtifactPayload::AiAgent { .. } => ArtifactType::AiAgent,
            ArtifactPayload::Tool { .. } => ArtifactType::Tool,
        }
    }

    /// Empty workflow payload. Handy base for builders and tests.
    pub fn workflow() -> Self {
        ArtifactPayload::Workflow {
            integrations: Vec::new(),
            triggers: Vec::new(),
            actions: Vec::new(),
            node_count: None,
            complexity: None,
            execution_mode: None,
        }
    }

    /// Empty AI-agent payload.
    pub fn agent() -> Self {
        ArtifactPayload::AiAgent {
            model: None,
            provider: None,
            capabilities: Vec::new(),
            use_cases: Vec::new(),
            industries: Vec::new(),
        }
    }

    /// Empty tool payload.
    pub fn tool() -> Self {
        ArtifactPayload::Tool {
            tool_type: None,
            platform: None,
            features: Vec::new(),
            capabilities: Vec::new(),
            integrations: Vec::new(),
        }
    }
}

/// The three artifact types the engine understands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    Workflow,
    AiAgent,
    Tool,
}

impl ArtifactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactType::Workflow => "workflow",
            ArtifactType::AiAgent => "ai_agent",
            ArtifactType::Tool => "tool",
        }
    }
}

impl std::fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow complexity bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Match tier derived from a similarity score via configured thresholds.
///
/// Scores below the potential threshold are not candidates at all and
/// never appear in the output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Score >= exact threshold (default 95).
    Exact,

    /// Score >= near-exact threshold (default 85).
    NearExact,

    /// Score >= similar threshold (default 70).
    Similar,

    /// Score >= potential threshold (default 50).
    Potential,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::NearExact => "near_exact",
            MatchTier::Similar => "similar",
            MatchTier::Potential => "potential",
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One record absorbed into a duplicate group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DuplicateCandidate {
    /// The absorbed record.
    pub record: ArtifactRecord,

    /// Raw weighted similarity against the group's primary (0 - 100).
    pub similarity_score: u8,

    /// Tier the score classified into.
    pub tier: MatchTier,

    /// Fields whose local similarity cleared the per-field reporting
    /// threshold (name > 0.8, description > 0.7, tags > 0.6,
    /// category equality).
    pub matched_fields: Vec<String>,

    /// Adjusted confidence (0 - 100). Starts at the similarity score,
    /// nudged by name/category equality, source agreement, verification,
    /// and quality.
    pub confidence: u8,
}

/// Resolution category recorded for a duplicate group.
///
/// This is advisory: the engine classifies, the downstream review layer
/// decides whether to auto-apply or route to a human.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Keep the primary as-is, discard nothing automatically.
    KeepPrimary,

    /// Type-aware content merging is applicable.
    MergeContent,

    /// Needs a human decision. Never chosen by the engine itself;
    /// reserved for the downstream router.
    ManualReview,
}

/// A primary record plus the candidates absorbed under it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DuplicateGroup {
    /// Unique identifier. UUIDv7 for time-sortability.
    pub id: GroupId,

    /// The record chosen to represent the group. Leftmost unprocessed
    /// record in scan order.
    pub primary: ArtifactRecord,

    /// Absorbed duplicates, in the order they were claimed.
    pub duplicates: Vec<DuplicateCandidate>,

    /// Advisory resolution category for this group.
    pub strategy: MergeStrategy,

    /// Rounded mean quality score across primary and duplicates.
    pub quality_score: u8,

    /// Duplicates + 1.
    pub total_items: usize,
}

impl DuplicateGroup {
    /// Assemble a group around a primary. Computes the mean quality and
    /// member count; strategy selection happens in `dedup::merge`.
    pub fn new(
        primary: ArtifactRecord,
        duplicates: Vec<DuplicateCandidate>,
        strategy: MergeStrategy,
    ) -> Self {
        let total_items = duplicates.len() + 1;
        let sum: u32 = duplicates
            .iter()
            .map(|d| d.record.quality_score as u32)
            .sum::<u32>()
            + primary.quality_score as u32;
        let quality_score = ((sum as f64) / (total_items as f64)).round() as u8;
        DuplicateGroup {
            id: Uuid::now_v7(),
            primary,
            duplicates,
            strategy,
            quality_score,
            total_items,
        }
    }
}

/// Per-tier candidate counters for one deduplication run.
///
/// Every candidate found increments its tier, regardless of which group
/// it lands in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierCounts {
    pub exact: u64,
    pub near_exact: u64,
    pub similar: u64,
    pub potential: u64,
}

impl TierCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the counter for a tier
    pub fn record(&mut self, tier: MatchTier) {
        match tier {
            MatchTier::Exact => self.exact += 1,
            MatchTier::NearExact => self.near_exact += 1,
            MatchTier::Similar => self.similar += 1,
            MatchTier::Potential => self.potential += 1,
        }
    }

    /// Total candidates across all tiers
    pub fn total(&self) -> u64 {
        self.exact + self.near_exact + self.similar + self.potential
    }
}

/// Result of one deduplication run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DedupResult {
    /// Emitted groups, in primary scan order. Records that never matched
    /// anything are absent — output groups plus leftover singletons
    /// partition the input.
    pub groups: Vec<DuplicateGroup>,

    /// Sum of duplicates across groups (primaries not counted).
    pub total_duplicates: usize,

    /// Number of emitted groups.
    pub total_groups: usize,

    /// Wall-clock processing time.
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,

    /// Per-tier candidate counts.
    pub tiers: TierCounts,
}

impl DedupResult {
    /// Empty result for degenerate inputs (zero or one record)
    pub fn empty(elapsed: Duration) -> Self {
        DedupResult {
            groups: Vec::new(),
            total_duplicates: 0,
            total_groups: 0,
            elapsed,
            tiers: TierCounts::new(),
        }
    }

    /// Get a summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "Dedup run: {} groups, {} duplicates ({} exact, {} near-exact, {} similar, {} potential) in {:?}",
            self.total_groups,
            self.total_duplicates,
            self.tiers.exact,
            self.tiers.near_exact,
            self.tiers.similar,
            self.tiers.potential,
            self.elapsed
        )
    }
}

// Custom serializer for Duration (whole milliseconds)
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

impl ArtifactRecord {
    /// Create a record with the given identity and payload. Remaining
    /// fields start empty/neutral; use the `with_*` builders to fill them.
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, payload: ArtifactPayload) -> Self {
        ArtifactRecord {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            category: String::new(),
            source: String::new(),
            quality_score: 50,
            verified: false,
            updated_at: Utc::now(),
            payload,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_quality(mut self, quality_score: u8) -> Self {
        self.quality_score = quality_score.min(100);
        self
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Discriminant of this record's payload
    pub fn artifact_type(&self) -> ArtifactType {
        self.payload.artifact_type()
    }
}
