use std::fmt;

use uuid::Uuid;

use crate::cycle::CycleStatus;

/// Errors surfaced to the immediate caller. "Not found" is deliberately not
/// here: routing evidence to an unknown focus or hypothesis id is a tolerated
/// no-op signalled through return values, because producers may legitimately
/// run ahead of (or behind) the curiosity lifecycle.
#[derive(Debug)]
pub enum EngineError {
    /// A wire value outside its enumerated set (curiosity kind, evidence
    /// effect, status). Rejected, never coerced.
    Validation(String),
    /// Illegal cycle state-machine transition.
    InvalidTransition { from: CycleStatus, to: CycleStatus },
    /// Structural mutation attempted on a Complete cycle.
    FrozenCycle(Uuid),
    /// Evidence or confidence mutation attempted on a Resolved hypothesis.
    ResolvedHypothesis(Uuid),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Validation(msg) => write!(f, "validation: {msg}"),
            EngineError::InvalidTransition { from, to } => {
                write!(f, "invalid transition: {from:?} -> {to:?}")
            }
            EngineError::FrozenCycle(id) => {
                write!(f, "cycle {id} is complete and frozen")
            }
            EngineError::ResolvedHypothesis(id) => {
                write!(f, "hypothesis {id} is resolved and immutable")
            }
        }
    }
}

impl std::error::Error for EngineError {}

pub type Result<T> = std::result::Result<T, EngineError>;
