//! The exploration cycle: a time-bounded container for hypotheses, evidence
//! and artifacts, spawned from a ready curiosity.
//!
//! Active -> EvidenceGathering -> Synthesizing -> Complete. Complete is
//! terminal: a completed cycle is frozen history, and every structural
//! mutation is rejected with `FrozenCycle`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifact::CycleArtifact;
use crate::curiosity::Curiosity;
use crate::error::{EngineError, Result};
use crate::evidence::{EvidenceEffect, EvidenceEntry};
use crate::hypothesis::{Hypothesis, HypothesisStatus};
use crate::time::now_unix_secs;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    Active,
    EvidenceGathering,
    Synthesizing,
    Complete,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExplorationCycle {
    pub id: Uuid,
    pub status: CycleStatus,
    /// Owned clones — independent lifecycle from the source curiosities.
    pub hypotheses: Vec<Hypothesis>,
    pub artifacts: Vec<CycleArtifact>,
    pub created_at: u64,
    pub updated_at: u64,
    pub completed_at: Option<u64>,
}

impl ExplorationCycle {
    pub fn new() -> Self {
        let now = now_unix_secs();
        Self {
            id: Uuid::new_v4(),
            status: CycleStatus::Active,
            hypotheses: Vec::new(),
            artifacts: Vec::new(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Spawn a cycle from a ready curiosity: clones its state into an owned
    /// starting hypothesis. The caller links the curiosity back via
    /// `CuriosityEngine::link_to_cycle`; this side keeps only provenance.
    pub fn from_curiosity(curiosity: &Curiosity) -> Self {
        let mut cycle = Self::new();
        cycle.hypotheses.push(Hypothesis::from_curiosity(curiosity));
        cycle
    }

    fn frozen_guard(&self) -> Result<()> {
        if self.status == CycleStatus::Complete {
            return Err(EngineError::FrozenCycle(self.id));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = now_unix_secs();
    }

    /// Move to a new lifecycle state. Any transition out of Complete is
    /// rejected; arriving at Complete stamps `completed_at`.
    pub fn transition_to(&mut self, new_status: CycleStatus) -> Result<()> {
        if self.status == CycleStatus::Complete {
            return Err(EngineError::InvalidTransition {
                from: self.status,
                to: new_status,
            });
        }
        self.status = new_status;
        if new_status == CycleStatus::Complete {
            self.completed_at = Some(now_unix_secs());
        }
        self.touch();
        Ok(())
    }

    pub fn add_hypothesis(&mut self, hypothesis: Hypothesis) -> Result<Uuid> {
        self.frozen_guard()?;
        let id = hypothesis.id;
        self.hypotheses.push(hypothesis);
        self.touch();
        Ok(id)
    }

    pub fn get_hypothesis(&self, id: Uuid) -> Option<&Hypothesis> {
        self.hypotheses.iter().find(|h| h.id == id)
    }

    /// Hypotheses still being worked: Forming or Active.
    pub fn active_hypotheses(&self) -> Vec<&Hypothesis> {
        self.hypotheses
            .iter()
            .filter(|h| {
                matches!(
                    h.status,
                    HypothesisStatus::Forming | HypothesisStatus::Active
                )
            })
            .collect()
    }

    pub fn resolved_hypotheses(&self) -> Vec<&Hypothesis> {
        self.hypotheses
            .iter()
            .filter(|h| h.status == HypothesisStatus::Resolved)
            .collect()
    }

    pub fn hypotheses_for_domain(&self, domain: &str) -> Vec<&Hypothesis> {
        self.hypotheses
            .iter()
            .filter(|h| h.domain.as_deref() == Some(domain))
            .collect()
    }

    /// Route evidence to an owned hypothesis and record this cycle on the
    /// shared evidence entry. Returns `Ok(false)` for an unknown id —
    /// producers may reference ids from a cycle that has since moved on.
    pub fn add_evidence_to_hypothesis(
        &mut self,
        hypothesis_id: Uuid,
        entry: &mut EvidenceEntry,
        effect: EvidenceEffect,
    ) -> Result<bool> {
        self.frozen_guard()?;
        let Some(hypothesis) = self.hypotheses.iter_mut().find(|h| h.id == hypothesis_id) else {
            return Ok(false);
        };
        hypothesis.add_evidence(entry.evidence.clone(), effect)?;
        entry.link_cycle(self.id);
        self.touch();
        Ok(true)
    }

    pub fn add_artifact(&mut self, artifact: CycleArtifact) -> Result<Uuid> {
        self.frozen_guard()?;
        let id = artifact.id;
        self.artifacts.push(artifact);
        self.touch();
        Ok(id)
    }

    /// First artifact of the given type, if any.
    pub fn get_artifact(&self, artifact_type: &str) -> Option<&CycleArtifact> {
        self.artifacts
            .iter()
            .find(|a| a.artifact_type == artifact_type)
    }

    pub fn get_artifact_mut(&mut self, artifact_type: &str) -> Option<&mut CycleArtifact> {
        self.artifacts
            .iter_mut()
            .find(|a| a.artifact_type == artifact_type)
    }

    /// Artifacts currently in play (Ready or NeedsUpdate).
    pub fn active_artifacts(&self) -> Vec<&CycleArtifact> {
        self.artifacts.iter().filter(|a| a.is_active()).collect()
    }
}

impl Default for ExplorationCycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactStatus;
    use crate::evidence::Evidence;
    use crate::hypothesis::Resolution;

    fn entry() -> EvidenceEntry {
        EvidenceEntry::new(Evidence::new("chat", "an observation", Some("coding")))
    }

    fn cycle_with_hypothesis() -> (ExplorationCycle, Uuid) {
        let mut cycle = ExplorationCycle::new();
        let id = cycle
            .add_hypothesis(Hypothesis::new("a theory", Some("coding")))
            .unwrap();
        (cycle, id)
    }

    #[test]
    fn test_full_lifecycle() {
        let mut cycle = ExplorationCycle::new();
        assert_eq!(cycle.status, CycleStatus::Active);
        assert!(cycle.completed_at.is_none());

        cycle.transition_to(CycleStatus::EvidenceGathering).unwrap();
        cycle.transition_to(CycleStatus::Synthesizing).unwrap();
        cycle.transition_to(CycleStatus::Complete).unwrap();

        assert_eq!(cycle.status, CycleStatus::Complete);
        assert!(cycle.completed_at.is_some());
    }

    #[test]
    fn test_no_transition_out_of_complete() {
        let mut cycle = ExplorationCycle::new();
        cycle.transition_to(CycleStatus::Complete).unwrap();

        let err = cycle.transition_to(CycleStatus::Active).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }), "got {err}");
    }

    #[test]
    fn test_complete_cycle_is_frozen() {
        let (mut cycle, hyp_id) = cycle_with_hypothesis();
        cycle.transition_to(CycleStatus::Complete).unwrap();

        let err = cycle
            .add_hypothesis(Hypothesis::new("late theory", None))
            .unwrap_err();
        assert!(matches!(err, EngineError::FrozenCycle(_)), "got {err}");

        let mut e = entry();
        let err = cycle
            .add_evidence_to_hypothesis(hyp_id, &mut e, EvidenceEffect::Supports)
            .unwrap_err();
        assert!(matches!(err, EngineError::FrozenCycle(_)), "got {err}");
        assert!(e.applies_to_cycle_ids.is_empty());

        let err = cycle
            .add_artifact(CycleArtifact::new("guidance", vec![hyp_id]))
            .unwrap_err();
        assert!(matches!(err, EngineError::FrozenCycle(_)), "got {err}");
    }

    #[test]
    fn test_from_curiosity_clones_independently() {
        let curiosity = Curiosity::hypothesis("night-owl", "prefers late-night work")
            .with_domain("schedule")
            .with_certainty(0.5);

        let cycle = ExplorationCycle::from_curiosity(&curiosity);
        assert_eq!(cycle.hypotheses.len(), 1);
        assert_eq!(cycle.hypotheses[0].theory, "prefers late-night work");
        assert_eq!(cycle.hypotheses[0].source_focus.as_deref(), Some("night-owl"));
        // The curiosity itself is untouched — linking is the engine's job.
        assert!(curiosity.cycle_id.is_none());
    }

    #[test]
    fn test_evidence_routing_unknown_id_is_tolerated() {
        let (mut cycle, _) = cycle_with_hypothesis();
        let mut e = entry();
        let routed = cycle
            .add_evidence_to_hypothesis(Uuid::new_v4(), &mut e, EvidenceEffect::Supports)
            .unwrap();
        assert!(!routed);
        assert!(e.applies_to_cycle_ids.is_empty());
    }

    #[test]
    fn test_evidence_routing_links_cycle() {
        let (mut cycle, hyp_id) = cycle_with_hypothesis();
        let mut e = entry();
        let routed = cycle
            .add_evidence_to_hypothesis(hyp_id, &mut e, EvidenceEffect::Supports)
            .unwrap();
        assert!(routed);
        assert_eq!(e.applies_to_cycle_ids, vec![cycle.id]);
        assert_eq!(cycle.get_hypothesis(hyp_id).unwrap().evidence.len(), 1);
    }

    #[test]
    fn test_hypothesis_queries() {
        let mut cycle = ExplorationCycle::new();
        let forming = cycle
            .add_hypothesis(Hypothesis::new("forming", Some("coding")))
            .unwrap();
        let mut resolved = Hypothesis::new("resolved", Some("music"));
        resolved.resolve(Resolution::Confirmed, None).unwrap();
        cycle.add_hypothesis(resolved).unwrap();

        assert_eq!(cycle.active_hypotheses().len(), 1);
        assert_eq!(cycle.active_hypotheses()[0].id, forming);
        assert_eq!(cycle.resolved_hypotheses().len(), 1);
        assert_eq!(cycle.hypotheses_for_domain("music").len(), 1);
        assert_eq!(cycle.hypotheses_for_domain("gardening").len(), 0);
    }

    #[test]
    fn test_artifact_bookkeeping() {
        let (mut cycle, hyp_id) = cycle_with_hypothesis();
        cycle
            .add_artifact(CycleArtifact::new("guidance", vec![hyp_id]))
            .unwrap();

        assert!(cycle.get_artifact("guidance").is_some());
        assert!(cycle.get_artifact("question-pack").is_none());
        // Draft artifacts are not active yet.
        assert!(cycle.active_artifacts().is_empty());

        cycle.get_artifact_mut("guidance").unwrap().mark_ready();
        assert_eq!(cycle.active_artifacts().len(), 1);
        assert_eq!(
            cycle.active_artifacts()[0].status,
            ArtifactStatus::Ready
        );
    }
}
