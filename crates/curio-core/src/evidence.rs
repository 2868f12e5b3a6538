//! Evidence values and the shared-evidence join relation.
//!
//! A piece of evidence is an immutable observation. It may inform more than
//! one exploration cycle; that relation is recorded on a separate join record
//! (`EvidenceEntry`), never by duplicating or mutating the evidence itself.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::time::now_unix_secs;

/// How a piece of evidence bears on a belief.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceEffect {
    /// Strengthens the belief.
    Supports,
    /// Weakens the belief.
    Contradicts,
    /// Reframes the belief entirely — certainty resets rather than shifts.
    Transforms,
    /// Relevant but directionless.
    Neutral,
}

impl EvidenceEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceEffect::Supports => "supports",
            EvidenceEffect::Contradicts => "contradicts",
            EvidenceEffect::Transforms => "transforms",
            EvidenceEffect::Neutral => "neutral",
        }
    }
}

impl std::str::FromStr for EvidenceEffect {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "supports" => Ok(EvidenceEffect::Supports),
            "contradicts" => Ok(EvidenceEffect::Contradicts),
            "transforms" => Ok(EvidenceEffect::Transforms),
            "neutral" => Ok(EvidenceEffect::Neutral),
            other => Err(EngineError::Validation(format!(
                "unknown evidence effect: {other:?}"
            ))),
        }
    }
}

/// An immutable, timestamped observation. Never mutated after construction;
/// cycle references live on [`EvidenceEntry`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Evidence {
    pub id: Uuid,
    pub observed_at: u64,
    pub source: String,
    pub content: String,
    pub domain: Option<String>,
}

impl Evidence {
    pub fn new(source: &str, content: &str, domain: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            observed_at: now_unix_secs(),
            source: source.to_string(),
            content: content.to_string(),
            domain: domain.map(str::to_string),
        }
    }

    /// Same as `new` with an explicit observation time.
    pub fn observed(source: &str, content: &str, domain: Option<&str>, observed_at: u64) -> Self {
        Self {
            observed_at,
            ..Self::new(source, content, domain)
        }
    }
}

/// Join record: one evidence value plus the cycles that reference it.
/// Appending a cycle id here is the only bookkeeping a new reference needs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvidenceEntry {
    pub evidence: Evidence,
    pub applies_to_cycle_ids: Vec<Uuid>,
}

impl EvidenceEntry {
    pub fn new(evidence: Evidence) -> Self {
        Self {
            evidence,
            applies_to_cycle_ids: Vec::new(),
        }
    }

    /// Record that a cycle references this evidence. Idempotent.
    pub fn link_cycle(&mut self, cycle_id: Uuid) {
        if !self.applies_to_cycle_ids.contains(&cycle_id) {
            self.applies_to_cycle_ids.push(cycle_id);
        }
    }
}
