//! Hypotheses: theories under investigation inside an exploration cycle.
//!
//! A hypothesis owns its evidence list. Promotion from a curiosity is a
//! one-time clone — the hypothesis keeps only the originating focus as
//! provenance, never a live reference, so the two evolve independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    HYPOTHESIS_ACTIVE_THRESHOLD, HYPOTHESIS_CONTRADICT_DELTA, HYPOTHESIS_SUPPORT_DELTA,
    HYPOTHESIS_WEAKENING_THRESHOLD,
};
use crate::curiosity::{Curiosity, CuriosityKind};
use crate::error::{EngineError, Result};
use crate::evidence::{Evidence, EvidenceEffect};
use crate::time::{days_since, now_unix_secs};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HypothesisStatus {
    Forming,
    Active,
    Weakening,
    Resolved,
    Evolving,
}

/// How a resolved hypothesis ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Confirmed,
    Refuted,
    Evolved,
    Outgrown,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hypothesis {
    pub id: Uuid,
    pub theory: String,
    pub domain: Option<String>,
    /// Append-only. Confidence deltas are stateful, so order matters.
    pub evidence: Vec<Evidence>,
    pub confidence: f64,
    pub status: HypothesisStatus,
    pub resolution: Option<Resolution>,
    pub resolution_note: Option<String>,
    /// Focus of the curiosity this was promoted from, if any. Provenance
    /// only — the curiosity is not consulted again.
    pub source_focus: Option<String>,
    pub formed_at: u64,
    pub last_evidence_at: Option<u64>,
}

impl Hypothesis {
    pub fn new(theory: &str, domain: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            theory: theory.to_string(),
            domain: domain.map(str::to_string),
            evidence: Vec::new(),
            confidence: 0.3,
            status: HypothesisStatus::Forming,
            resolution: None,
            resolution_note: None,
            source_focus: None,
            formed_at: now_unix_secs(),
            last_evidence_at: None,
        }
    }

    /// Promotion clone: copy theory/domain out of a curiosity, seed
    /// confidence from its certainty, remember the focus as provenance.
    pub fn from_curiosity(curiosity: &Curiosity) -> Self {
        let theory = match &curiosity.kind {
            CuriosityKind::Hypothesis { theory, .. } => theory.clone(),
            CuriosityKind::Question { question } => question.clone(),
            CuriosityKind::Discovery | CuriosityKind::Pattern { .. } => curiosity.focus.clone(),
        };

        let mut h = Self::new(&theory, curiosity.domain.as_deref());
        h.confidence = curiosity.certainty.clamp(0.0, 1.0);
        h.source_focus = Some(curiosity.focus.clone());
        h
    }

    /// Append evidence and move confidence. Errors once resolved — frozen
    /// history stays frozen.
    pub fn add_evidence(&mut self, evidence: Evidence, effect: EvidenceEffect) -> Result<()> {
        if self.status == HypothesisStatus::Resolved {
            return Err(EngineError::ResolvedHypothesis(self.id));
        }

        self.last_evidence_at = Some(evidence.observed_at);
        self.evidence.push(evidence);

        match effect {
            EvidenceEffect::Supports => {
                self.confidence = (self.confidence + HYPOTHESIS_SUPPORT_DELTA).min(1.0);
                if self.status == HypothesisStatus::Forming
                    && self.confidence > HYPOTHESIS_ACTIVE_THRESHOLD
                {
                    self.status = HypothesisStatus::Active;
                }
            }
            EvidenceEffect::Contradicts => {
                self.confidence = (self.confidence - HYPOTHESIS_CONTRADICT_DELTA).max(0.0);
                if self.confidence < HYPOTHESIS_WEAKENING_THRESHOLD {
                    self.status = HypothesisStatus::Weakening;
                }
            }
            EvidenceEffect::Transforms => {
                self.status = HypothesisStatus::Evolving;
            }
            EvidenceEffect::Neutral => {}
        }

        Ok(())
    }

    /// Terminal: record how this ended. No evidence or confidence changes
    /// are valid afterward.
    pub fn resolve(&mut self, resolution: Resolution, note: Option<&str>) -> Result<()> {
        if self.status == HypothesisStatus::Resolved {
            return Err(EngineError::ResolvedHypothesis(self.id));
        }
        self.status = HypothesisStatus::Resolved;
        self.resolution = Some(resolution);
        self.resolution_note = note.map(str::to_string);
        Ok(())
    }

    /// Gone quiet without ever being confirmed or weakened: no evidence
    /// within the window (`STALE_HYPOTHESIS_DAYS` is the usual choice) and
    /// still Forming or Active.
    pub fn is_stale(&self, now: u64, window_days: f64) -> bool {
        if !matches!(
            self.status,
            HypothesisStatus::Forming | HypothesisStatus::Active
        ) {
            return false;
        }
        let last = self.last_evidence_at.unwrap_or(self.formed_at);
        days_since(last, now) > window_days
    }
}
