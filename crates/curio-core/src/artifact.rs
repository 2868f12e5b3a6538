//! Cycle artifacts: outputs generated outside the core and registered on a
//! cycle, with bookkeeping for external fulfillment quotas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::now_unix_secs;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    /// Generation in flight.
    Draft,
    /// Generated, in use.
    Ready,
    /// External input quota met.
    Fulfilled,
    /// Invalidated by resolved/weakened source hypotheses.
    Superseded,
    /// New relevant hypotheses appeared since generation.
    NeedsUpdate,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CycleArtifact {
    pub id: Uuid,
    /// Free-form artifact type tag, e.g. "guidance".
    pub artifact_type: String,
    pub status: ArtifactStatus,
    /// Hypotheses this artifact was built from.
    pub related_hypothesis_ids: Vec<Uuid>,
    /// External inputs expected before the artifact counts as fulfilled.
    /// Zero means no quota.
    pub expected_count: u32,
    pub fulfilled_count: u32,
    pub created_at: u64,
    pub superseded_by: Option<Uuid>,
    pub superseded_reason: Option<String>,
}

impl CycleArtifact {
    pub fn new(artifact_type: &str, related_hypothesis_ids: Vec<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            artifact_type: artifact_type.to_string(),
            status: ArtifactStatus::Draft,
            related_hypothesis_ids,
            expected_count: 0,
            fulfilled_count: 0,
            created_at: now_unix_secs(),
            superseded_by: None,
            superseded_reason: None,
        }
    }

    pub fn with_expected_count(mut self, expected_count: u32) -> Self {
        self.expected_count = expected_count;
        self
    }

    /// External generation completed.
    pub fn mark_ready(&mut self) {
        if self.status == ArtifactStatus::Draft {
            self.status = ArtifactStatus::Ready;
        }
    }

    /// Record one external input against the quota. Auto-transitions
    /// Ready -> Fulfilled once the quota is met.
    pub fn record_fulfillment(&mut self) {
        self.fulfilled_count += 1;
        if self.status == ArtifactStatus::Ready
            && self.expected_count > 0
            && self.fulfilled_count >= self.expected_count
        {
            self.status = ArtifactStatus::Fulfilled;
        }
    }

    pub fn mark_superseded(&mut self, reason: &str, superseded_by: Option<Uuid>) {
        self.status = ArtifactStatus::Superseded;
        self.superseded_reason = Some(reason.to_string());
        self.superseded_by = superseded_by;
    }

    pub fn mark_needs_update(&mut self) {
        self.status = ArtifactStatus::NeedsUpdate;
    }

    /// Still in play: generated and not yet fulfilled or invalidated.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            ArtifactStatus::Ready | ArtifactStatus::NeedsUpdate
        )
    }
}
