//! The curiosity unit and its activation model.
//!
//! Activation decays linearly with elapsed time and is dampened when the
//! belief behind it is already well settled. Decay is a read-time view:
//! `effective_activation` never mutates stored state, only explicit boost
//! and dampen operations do.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    CERTAINTY_DAMPENING, CONTRADICT_CERTAINTY_DELTA, DAMPENING_THRESHOLD, DECAY_PER_DAY,
    SPAWN_THRESHOLD, SUPPORT_CERTAINTY_DELTA, TRANSFORM_CERTAINTY_RESET,
};
use crate::evidence::EvidenceEffect;
use crate::time::{days_since, now_unix_secs};

/// Activation-model knobs: 2%/day decay, 0.1 dampening above certainty 0.7.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ActivationTuning {
    pub decay_per_day: f64,
    pub dampening_threshold: f64,
    pub certainty_dampening: f64,
}

impl Default for ActivationTuning {
    fn default() -> Self {
        Self {
            decay_per_day: DECAY_PER_DAY,
            dampening_threshold: DAMPENING_THRESHOLD,
            certainty_dampening: CERTAINTY_DAMPENING,
        }
    }
}

/// What kind of thing we are curious about. A closed set; each variant
/// carries only its own payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CuriosityKind {
    /// Something new was noticed and wants follow-up.
    Discovery,
    /// Something we actively want to know.
    Question { question: String },
    /// A theory about the subject, possibly worth a produced artifact.
    Hypothesis {
        theory: String,
        video_appropriate: bool,
    },
    /// A recurring theme cutting across domains.
    Pattern { domains_involved: Vec<String> },
}

impl CuriosityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CuriosityKind::Discovery => "discovery",
            CuriosityKind::Question { .. } => "question",
            CuriosityKind::Hypothesis { .. } => "hypothesis",
            CuriosityKind::Pattern { .. } => "pattern",
        }
    }
}

/// One unit of attention: a focus, how strongly it currently demands
/// attention, and how settled the belief behind it is.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Curiosity {
    /// Case-sensitive identity key. Dynamic curiosities dedup on this.
    pub focus: String,
    pub kind: CuriosityKind,
    /// 0-1, how strongly this demands attention right now.
    pub activation: f64,
    /// 0-1, how settled the underlying belief is.
    pub certainty: f64,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub times_explored: u32,
    /// Unix seconds of the last explicit activation.
    pub last_activated: u64,
    /// Set once promoted into an exploration cycle.
    pub cycle_id: Option<Uuid>,
}

impl Curiosity {
    fn new(focus: &str, kind: CuriosityKind) -> Self {
        Self {
            focus: focus.to_string(),
            kind,
            activation: 0.5,
            certainty: 0.3,
            domain: None,
            subdomain: None,
            times_explored: 0,
            last_activated: now_unix_secs(),
            cycle_id: None,
        }
    }

    pub fn discovery(focus: &str) -> Self {
        Self::new(focus, CuriosityKind::Discovery)
    }

    pub fn question(focus: &str, question: &str) -> Self {
        Self::new(
            focus,
            CuriosityKind::Question {
                question: question.to_string(),
            },
        )
    }

    pub fn hypothesis(focus: &str, theory: &str) -> Self {
        Self::new(
            focus,
            CuriosityKind::Hypothesis {
                theory: theory.to_string(),
                video_appropriate: false,
            },
        )
    }

    pub fn pattern(focus: &str, domains_involved: &[&str]) -> Self {
        Self::new(
            focus,
            CuriosityKind::Pattern {
                domains_involved: domains_involved.iter().map(|d| d.to_string()).collect(),
            },
        )
    }

    pub fn with_domain(mut self, domain: &str) -> Self {
        self.domain = Some(domain.to_string());
        self
    }

    pub fn with_subdomain(mut self, subdomain: &str) -> Self {
        self.subdomain = Some(subdomain.to_string());
        self
    }

    pub fn with_activation(mut self, activation: f64) -> Self {
        self.activation = activation.clamp(0.0, 1.0);
        self
    }

    pub fn with_certainty(mut self, certainty: f64) -> Self {
        self.certainty = certainty.clamp(0.0, 1.0);
        self
    }

    /// Activation as seen at `now`: stored activation minus time decay minus
    /// certainty dampening. Pure view — nothing is written back.
    ///
    /// Decay is linear at `decay_per_day` of the 0-1 scale, capped so it
    /// never drives the result below what dampening alone would produce.
    pub fn effective_activation(&self, now: u64, tuning: &ActivationTuning) -> f64 {
        let decay = (days_since(self.last_activated, now) * tuning.decay_per_day)
            .min(self.activation);
        let dampening = if self.certainty > tuning.dampening_threshold {
            tuning.certainty_dampening
        } else {
            0.0
        };
        (self.activation - decay - dampening).clamp(0.0, 1.0)
    }

    /// Raise stored activation and refresh `last_activated`.
    pub fn boost_activation(&mut self, delta: f64) {
        self.activation = (self.activation + delta).clamp(0.0, 1.0);
        self.last_activated = now_unix_secs();
    }

    /// Lower stored activation. Does not touch `last_activated`.
    pub fn dampen_activation(&mut self, delta: f64) {
        self.activation = (self.activation - delta).clamp(0.0, 1.0);
    }

    /// Shift certainty according to an evidence effect.
    pub fn update_certainty(&mut self, effect: EvidenceEffect) {
        match effect {
            EvidenceEffect::Supports => {
                self.certainty = (self.certainty + SUPPORT_CERTAINTY_DELTA).clamp(0.0, 1.0);
            }
            EvidenceEffect::Contradicts => {
                self.certainty = (self.certainty - CONTRADICT_CERTAINTY_DELTA).clamp(0.0, 1.0);
            }
            EvidenceEffect::Transforms => {
                // The belief was reframed: back to moderate uncertainty,
                // independent of where it was.
                self.certainty = TRANSFORM_CERTAINTY_RESET;
            }
            EvidenceEffect::Neutral => {}
        }
    }

    /// Ready to spawn an exploration cycle: hot enough, never explored,
    /// not already linked to a cycle.
    pub fn should_spawn_cycle(&self, now: u64, tuning: &ActivationTuning) -> bool {
        self.effective_activation(now, tuning) > SPAWN_THRESHOLD
            && self.times_explored == 0
            && self.cycle_id.is_none()
    }
}
