//! The curiosity engine: owns the perpetual and dynamic curiosity sets and
//! reacts to external events.
//!
//! One engine per monitored subject. The aggregate is single-owner — no
//! internal locking; shard by subject for parallelism. All operations are
//! synchronous and in-memory.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    FACT_MATCH_BOOST, GAP_ACTIVATION_FLOOR, GAP_CERTAINTY_CEILING, PERPETUAL_COUNT,
};
use crate::curiosity::{ActivationTuning, Curiosity, CuriosityKind};
use crate::evidence::EvidenceEffect;

/// Inbound event: a fact about the subject was learned by a collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FactLearned {
    pub content: String,
    pub domain: String,
}

/// Inbound event: an observation bearing on a focus or hypothesis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvidenceObserved {
    pub target_focus: String,
    pub content: String,
    pub effect: EvidenceEffect,
    pub source: String,
}

/// A curiosity scored with its effective activation at read time.
#[derive(Clone, Copy, Debug)]
pub struct ScoredCuriosity<'a> {
    pub curiosity: &'a Curiosity,
    pub effective_activation: f64,
}

/// Owns a fixed perpetual set of exactly five curiosities (mutable in place,
/// never removable) and an unbounded dynamic set deduplicated by focus.
/// Insertion order is preserved and breaks activation ties in `get_active`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CuriosityEngine {
    subject: String,
    perpetual: [Curiosity; PERPETUAL_COUNT],
    dynamic: Vec<Curiosity>,
    tuning: ActivationTuning,
}

impl CuriosityEngine {
    /// Engine with the standard perpetual set for a subject.
    pub fn new(subject: &str) -> Self {
        Self::with_perpetual(subject, default_perpetual(subject), ActivationTuning::default())
    }

    pub fn with_perpetual(
        subject: &str,
        perpetual: [Curiosity; PERPETUAL_COUNT],
        tuning: ActivationTuning,
    ) -> Self {
        Self {
            subject: subject.to_string(),
            perpetual,
            dynamic: Vec::new(),
            tuning,
        }
    }

    /// Reassemble an engine from snapshot parts. The dynamic list is assumed
    /// already deduplicated by focus (true of anything `to_snapshot` wrote).
    pub fn from_parts(
        subject: String,
        perpetual: [Curiosity; PERPETUAL_COUNT],
        dynamic: Vec<Curiosity>,
        tuning: ActivationTuning,
    ) -> Self {
        Self {
            subject,
            perpetual,
            dynamic,
            tuning,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn tuning(&self) -> &ActivationTuning {
        &self.tuning
    }

    pub fn perpetual(&self) -> &[Curiosity] {
        &self.perpetual
    }

    pub fn dynamic(&self) -> &[Curiosity] {
        &self.dynamic
    }

    fn all(&self) -> impl Iterator<Item = &Curiosity> {
        self.perpetual.iter().chain(self.dynamic.iter())
    }

    fn all_mut(&mut self) -> impl Iterator<Item = &mut Curiosity> {
        self.perpetual.iter_mut().chain(self.dynamic.iter_mut())
    }

    fn find_mut(&mut self, focus: &str) -> Option<&mut Curiosity> {
        self.all_mut().find(|c| c.focus == focus)
    }

    /// Insert a dynamic curiosity, or boost the existing one if the focus is
    /// already present (dedup by focus). Returns true when actually inserted.
    /// The perpetual set is never touched by this operation.
    pub fn add_curiosity(&mut self, curiosity: Curiosity) -> bool {
        if let Some(existing) = self.dynamic.iter_mut().find(|c| c.focus == curiosity.focus) {
            existing.boost_activation(curiosity.activation);
            return false;
        }
        self.dynamic.push(curiosity);
        true
    }

    /// Remove from the dynamic set. A focus naming a perpetual curiosity is
    /// a no-op, not an error. Returns whether anything was removed.
    pub fn remove_curiosity(&mut self, focus: &str) -> bool {
        let before = self.dynamic.len();
        self.dynamic.retain(|c| c.focus != focus);
        self.dynamic.len() < before
    }

    /// All curiosities with effective activation computed at `now`, sorted
    /// descending. The sort is stable, so ties keep insertion order
    /// (perpetual before dynamic).
    pub fn get_active(&self, now: u64) -> Vec<ScoredCuriosity<'_>> {
        let mut scored: Vec<ScoredCuriosity<'_>> = self
            .all()
            .map(|c| ScoredCuriosity {
                curiosity: c,
                effective_activation: c.effective_activation(now, &self.tuning),
            })
            .collect();
        scored.sort_by(|a, b| b.effective_activation.total_cmp(&a.effective_activation));
        scored
    }

    /// Boost every curiosity whose domain matches the fact's domain.
    /// Returns the number boosted.
    pub fn on_fact_learned(&mut self, fact: &FactLearned) -> usize {
        let mut boosted = 0;
        for c in self.all_mut() {
            if c.domain.as_deref() == Some(fact.domain.as_str()) {
                c.boost_activation(FACT_MATCH_BOOST);
                boosted += 1;
            }
        }
        boosted
    }

    /// Route an evidence effect to the curiosity with this focus. Returns
    /// false when no curiosity has the focus — evidence may legitimately
    /// arrive before the curiosity exists, so this is a signal, not an error.
    pub fn on_evidence_added(&mut self, focus: &str, effect: EvidenceEffect) -> bool {
        match self.find_mut(focus) {
            Some(c) => {
                c.update_certainty(effect);
                true
            }
            None => false,
        }
    }

    /// Route a full observation event by its target focus. Evidence aimed at
    /// a cycle hypothesis goes through `ExplorationCycle` instead.
    pub fn on_evidence_observed(&mut self, event: &EvidenceObserved) -> bool {
        self.on_evidence_added(&event.target_focus, event.effect)
    }

    /// Question texts we actively want answered: Question-kind curiosities
    /// that are still hot and still unsettled.
    pub fn get_gaps(&self, now: u64) -> Vec<String> {
        self.all()
            .filter(|c| {
                c.effective_activation(now, &self.tuning) >= GAP_ACTIVATION_FLOOR
                    && c.certainty < GAP_CERTAINTY_CEILING
            })
            .filter_map(|c| match &c.kind {
                CuriosityKind::Question { question } => Some(question.clone()),
                _ => None,
            })
            .collect()
    }

    /// All Hypothesis-kind curiosities.
    pub fn get_hypotheses(&self) -> Vec<&Curiosity> {
        self.all()
            .filter(|c| matches!(c.kind, CuriosityKind::Hypothesis { .. }))
            .collect()
    }

    /// Hypothesis-kind curiosities flagged as suitable for video artifacts.
    pub fn get_video_appropriate_hypotheses(&self) -> Vec<&Curiosity> {
        self.all()
            .filter(|c| {
                matches!(
                    c.kind,
                    CuriosityKind::Hypothesis {
                        video_appropriate: true,
                        ..
                    }
                )
            })
            .collect()
    }

    /// Record a promotion: attach the cycle id and bump the exploration
    /// count. Returns false if no curiosity has the focus.
    pub fn link_to_cycle(&mut self, focus: &str, cycle_id: Uuid) -> bool {
        match self.find_mut(focus) {
            Some(c) => {
                c.cycle_id = Some(cycle_id);
                c.times_explored += 1;
                true
            }
            None => false,
        }
    }
}

/// How hungry for questions a domain is, given a per-domain fact count
/// summary from an external understanding collaborator. Pure tiered lookup:
/// unexplored domains are seeded hardest.
pub fn count_domain_gaps(domain: &str, understanding: Option<&HashMap<String, usize>>) -> u32 {
    let Some(summary) = understanding else {
        return 3;
    };
    match summary.get(domain).copied().unwrap_or(0) {
        0 => 5,
        1..=2 => 3,
        3..=5 => 1,
        _ => 0,
    }
}

/// The standard perpetual set: five always-present curiosities spanning the
/// kinds, anchored to the subject being observed.
fn default_perpetual(subject: &str) -> [Curiosity; PERPETUAL_COUNT] {
    [
        Curiosity::discovery("what is changing day to day")
            .with_domain("life")
            .with_activation(0.6),
        Curiosity::question(
            "core motivations",
            &format!("what does {subject} care about most right now?"),
        )
        .with_domain("values")
        .with_activation(0.7),
        Curiosity::question(
            "current struggles",
            &format!("what is {subject} finding hard at the moment?"),
        )
        .with_domain("wellbeing")
        .with_activation(0.6),
        Curiosity::hypothesis(
            "routine shape",
            &format!("{subject}'s energy follows a weekly rhythm"),
        )
        .with_domain("schedule")
        .with_activation(0.5),
        Curiosity::pattern("cross-domain themes", &["life", "values", "schedule"])
            .with_domain("life")
            .with_activation(0.5),
    ]
}
