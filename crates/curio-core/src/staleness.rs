//! Artifact staleness detection.
//!
//! An artifact reflects the hypotheses it was built from at generation time.
//! When enough of those hypotheses have since resolved or weakened, the
//! artifact is superseded; when enough new related hypotheses have formed
//! that the artifact knows nothing about, it needs an update. Called by the
//! orchestrator after hypothesis changes — never automatically.

use std::collections::HashSet;

use crate::artifact::{ArtifactStatus, CycleArtifact};
use crate::cycle::ExplorationCycle;
use crate::hypothesis::{Hypothesis, HypothesisStatus};

/// What the check decided. The artifact itself is the only thing mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StalenessOutcome {
    Untouched,
    Superseded,
    NeedsUpdate,
}

/// Evaluate one artifact of the given type on a cycle against the cycle's
/// current hypotheses. Artifacts already Fulfilled or Superseded are skipped.
pub fn check_artifact_staleness(
    cycle: &mut ExplorationCycle,
    artifact_type: &str,
    threshold: usize,
) -> StalenessOutcome {
    let Some(idx) = cycle
        .artifacts
        .iter()
        .position(|a| a.artifact_type == artifact_type)
    else {
        return StalenessOutcome::Untouched;
    };

    let outcome = {
        let artifact = &cycle.artifacts[idx];
        evaluate(artifact, &cycle.hypotheses, threshold)
    };

    match outcome {
        StalenessOutcome::Superseded => {
            let reason = format!(
                "{threshold}+ source hypotheses resolved or weakened since generation"
            );
            cycle.artifacts[idx].mark_superseded(&reason, None);
        }
        StalenessOutcome::NeedsUpdate => cycle.artifacts[idx].mark_needs_update(),
        StalenessOutcome::Untouched => {}
    }

    outcome
}

/// Pure evaluation half: decide without mutating.
fn evaluate(
    artifact: &CycleArtifact,
    hypotheses: &[Hypothesis],
    threshold: usize,
) -> StalenessOutcome {
    if matches!(
        artifact.status,
        ArtifactStatus::Fulfilled | ArtifactStatus::Superseded
    ) {
        return StalenessOutcome::Untouched;
    }

    let related: HashSet<_> = artifact.related_hypothesis_ids.iter().copied().collect();

    // (a) source hypotheses invalidated after the artifact was generated
    let invalidated = hypotheses
        .iter()
        .filter(|h| related.contains(&h.id))
        .filter(|h| {
            matches!(
                h.status,
                HypothesisStatus::Weakening | HypothesisStatus::Resolved
            )
        })
        .filter(|h| h.evidence.iter().any(|e| e.observed_at > artifact.created_at))
        .count();
    if invalidated >= threshold {
        return StalenessOutcome::Superseded;
    }

    // (b) fresh hypotheses in the artifact's domain set that it was not
    // built from
    let domains: HashSet<&str> = hypotheses
        .iter()
        .filter(|h| related.contains(&h.id))
        .filter_map(|h| h.domain.as_deref())
        .collect();

    let fresh = hypotheses
        .iter()
        .filter(|h| !related.contains(&h.id))
        .filter(|h| h.formed_at > artifact.created_at)
        .filter(|h| {
            matches!(
                h.status,
                HypothesisStatus::Forming | HypothesisStatus::Active
            )
        })
        .filter(|h| h.domain.as_deref().is_some_and(|d| domains.contains(d)))
        .count();
    if fresh >= threshold {
        return StalenessOutcome::NeedsUpdate;
    }

    StalenessOutcome::Untouched
}
