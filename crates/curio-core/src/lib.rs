//! Curiosity & exploration engine.
//!
//! Tracks what an observing process is curious about regarding a subject it
//! monitors over time. Curiosities carry an activation score that decays
//! linearly and is dampened by settled certainty; the engine allocates
//! attention across them and decides when one is ready to be promoted into
//! a bounded exploration cycle with its own hypotheses, evidence and
//! artifacts.
//!
//! Zero I/O — pure state machines with no opinions about transport,
//! persistence, or how artifacts get generated. One engine per subject,
//! single-owner, no internal locking.

pub mod artifact;
pub mod constants;
pub mod curiosity;
pub mod cycle;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod hypothesis;
pub mod snapshot;
pub mod staleness;
pub mod time;

pub use artifact::{ArtifactStatus, CycleArtifact};
pub use curiosity::{ActivationTuning, Curiosity, CuriosityKind};
pub use cycle::{CycleStatus, ExplorationCycle};
pub use engine::{
    CuriosityEngine, EvidenceObserved, FactLearned, ScoredCuriosity, count_domain_gaps,
};
pub use error::{EngineError, Result};
pub use evidence::{Evidence, EvidenceEffect, EvidenceEntry};
pub use hypothesis::{Hypothesis, HypothesisStatus, Resolution};
pub use snapshot::{CURRENT_VERSION, WireSnapshot, export_json, import_json};
pub use staleness::{StalenessOutcome, check_artifact_staleness};
