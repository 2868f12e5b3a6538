//! JSON serde for the engine snapshot wire format.
//!
//! The wire format uses camelCase field names and plain nested maps/lists —
//! no engine-internal types — so any storage collaborator can persist it.
//! Curiosity kinds travel as a string tag plus kind-specific optional
//! fields; unknown tags or effects are rejected, never coerced.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::PERPETUAL_COUNT;
use crate::curiosity::{ActivationTuning, Curiosity, CuriosityKind};
use crate::engine::CuriosityEngine;
use crate::error::{EngineError, Result};
use crate::time::now_iso8601;

pub const CURRENT_VERSION: &str = "1.0.0";

// --- Wire format types ---

#[derive(Serialize, Deserialize, Debug)]
pub struct WireSnapshot {
    pub version: String,
    pub timestamp: String,
    pub subject: String,
    #[serde(default)]
    pub tuning: WireTuning,
    pub perpetual: Vec<WireCuriosity>,
    #[serde(default)]
    pub dynamic: Vec<WireCuriosity>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct WireTuning {
    #[serde(rename = "decayPerDay")]
    pub decay_per_day: f64,
    #[serde(rename = "dampeningThreshold")]
    pub dampening_threshold: f64,
    #[serde(rename = "certaintyDampening")]
    pub certainty_dampening: f64,
}

impl Default for WireTuning {
    fn default() -> Self {
        let t = ActivationTuning::default();
        Self {
            decay_per_day: t.decay_per_day,
            dampening_threshold: t.dampening_threshold,
            certainty_dampening: t.certainty_dampening,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireCuriosity {
    pub focus: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(rename = "domainsInvolved", default, skip_serializing_if = "Option::is_none")]
    pub domains_involved: Option<Vec<String>>,
    #[serde(rename = "videoAppropriate", default)]
    pub video_appropriate: bool,
    pub activation: f64,
    pub certainty: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(rename = "timesExplored", default)]
    pub times_explored: u32,
    #[serde(rename = "lastActivated", default)]
    pub last_activated: u64,
    #[serde(rename = "cycleId", default, skip_serializing_if = "Option::is_none")]
    pub cycle_id: Option<Uuid>,
}

// --- Conversion: Wire -> Domain ---

impl WireSnapshot {
    /// Rebuild an engine from a snapshot. Fails with `Validation` on an
    /// unknown kind tag, a missing kind payload, an out-of-range score, a
    /// duplicate dynamic focus, or a perpetual list whose length is not
    /// exactly five.
    pub fn into_engine(self) -> Result<CuriosityEngine> {
        let perpetual: Vec<Curiosity> = self
            .perpetual
            .into_iter()
            .map(wire_curiosity_to_domain)
            .collect::<Result<_>>()?;
        let perpetual: [Curiosity; PERPETUAL_COUNT] = perpetual.try_into().map_err(
            |v: Vec<Curiosity>| {
                EngineError::Validation(format!(
                    "perpetual set must have {PERPETUAL_COUNT} entries, got {}",
                    v.len()
                ))
            },
        )?;

        let dynamic: Vec<Curiosity> = self
            .dynamic
            .into_iter()
            .map(wire_curiosity_to_domain)
            .collect::<Result<_>>()?;

        // The dynamic set dedups by focus; a snapshot carrying duplicates
        // was not written by `to_snapshot` and cannot be trusted.
        let mut seen = HashSet::new();
        for c in &dynamic {
            if !seen.insert(c.focus.as_str()) {
                return Err(EngineError::Validation(format!(
                    "duplicate dynamic focus: {:?}",
                    c.focus
                )));
            }
        }

        let tuning = ActivationTuning {
            decay_per_day: self.tuning.decay_per_day,
            dampening_threshold: self.tuning.dampening_threshold,
            certainty_dampening: self.tuning.certainty_dampening,
        };

        Ok(CuriosityEngine::from_parts(
            self.subject,
            perpetual,
            dynamic,
            tuning,
        ))
    }

    /// Create a snapshot from an engine.
    pub fn from_engine(engine: &CuriosityEngine) -> Self {
        let tuning = engine.tuning();
        WireSnapshot {
            version: CURRENT_VERSION.to_string(),
            timestamp: now_iso8601(),
            subject: engine.subject().to_string(),
            tuning: WireTuning {
                decay_per_day: tuning.decay_per_day,
                dampening_threshold: tuning.dampening_threshold,
                certainty_dampening: tuning.certainty_dampening,
            },
            perpetual: engine.perpetual().iter().map(domain_curiosity_to_wire).collect(),
            dynamic: engine.dynamic().iter().map(domain_curiosity_to_wire).collect(),
        }
    }
}

fn wire_curiosity_to_domain(wire: WireCuriosity) -> Result<Curiosity> {
    for (name, value) in [("activation", wire.activation), ("certainty", wire.certainty)] {
        if !(0.0..=1.0).contains(&value) || value.is_nan() {
            return Err(EngineError::Validation(format!(
                "{name} out of range for {:?}: {value}",
                wire.focus
            )));
        }
    }

    let kind = match wire.kind.as_str() {
        "discovery" => CuriosityKind::Discovery,
        "question" => CuriosityKind::Question {
            question: wire.question.ok_or_else(|| {
                EngineError::Validation(format!("question kind without question: {:?}", wire.focus))
            })?,
        },
        "hypothesis" => CuriosityKind::Hypothesis {
            theory: wire.theory.ok_or_else(|| {
                EngineError::Validation(format!("hypothesis kind without theory: {:?}", wire.focus))
            })?,
            video_appropriate: wire.video_appropriate,
        },
        "pattern" => CuriosityKind::Pattern {
            domains_involved: wire.domains_involved.unwrap_or_default(),
        },
        other => {
            return Err(EngineError::Validation(format!(
                "unknown curiosity kind: {other:?}"
            )));
        }
    };

    Ok(Curiosity {
        focus: wire.focus,
        kind,
        activation: wire.activation,
        certainty: wire.certainty,
        domain: wire.domain,
        subdomain: wire.subdomain,
        times_explored: wire.times_explored,
        last_activated: wire.last_activated,
        cycle_id: wire.cycle_id,
    })
}

fn domain_curiosity_to_wire(c: &Curiosity) -> WireCuriosity {
    let (theory, question, domains_involved, video_appropriate) = match &c.kind {
        CuriosityKind::Discovery => (None, None, None, false),
        CuriosityKind::Question { question } => (None, Some(question.clone()), None, false),
        CuriosityKind::Hypothesis {
            theory,
            video_appropriate,
        } => (Some(theory.clone()), None, None, *video_appropriate),
        CuriosityKind::Pattern { domains_involved } => {
            (None, None, Some(domains_involved.clone()), false)
        }
    };

    WireCuriosity {
        focus: c.focus.clone(),
        kind: c.kind.as_str().to_string(),
        theory,
        question,
        domains_involved,
        video_appropriate,
        activation: c.activation,
        certainty: c.certainty,
        domain: c.domain.clone(),
        subdomain: c.subdomain.clone(),
        times_explored: c.times_explored,
        last_activated: c.last_activated,
        cycle_id: c.cycle_id,
    }
}

impl CuriosityEngine {
    /// Full engine state as a plain, storage-agnostic structure.
    pub fn to_snapshot(&self) -> WireSnapshot {
        WireSnapshot::from_engine(self)
    }

    /// Rebuild an engine from a snapshot.
    pub fn from_snapshot(snapshot: WireSnapshot) -> Result<Self> {
        snapshot.into_engine()
    }
}

/// Deserialize a JSON snapshot into an engine.
pub fn import_json(json: &str) -> Result<CuriosityEngine> {
    let wire: WireSnapshot = serde_json::from_str(json)
        .map_err(|e| EngineError::Validation(format!("malformed snapshot json: {e}")))?;
    wire.into_engine()
}

/// Serialize an engine to the JSON snapshot wire format.
pub fn export_json(engine: &CuriosityEngine) -> Result<String> {
    let wire = WireSnapshot::from_engine(engine);
    serde_json::to_string_pretty(&wire)
        .map_err(|e| EngineError::Validation(format!("snapshot serialization: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now_unix_secs;

    fn make_engine() -> CuriosityEngine {
        let mut eng = CuriosityEngine::new("sam");
        let now = now_unix_secs();

        let mut q = Curiosity::question("sleep", "why the late nights?")
            .with_domain("wellbeing")
            .with_activation(0.8)
            .with_certainty(0.2);
        q.last_activated = now - 86_400;
        eng.add_curiosity(q);

        let mut h = Curiosity::hypothesis("night-owl", "prefers late-night work")
            .with_domain("schedule")
            .with_subdomain("sleep")
            .with_activation(0.6);
        h.cycle_id = Some(Uuid::new_v4());
        h.times_explored = 2;
        eng.add_curiosity(h);

        eng.add_curiosity(
            Curiosity::pattern("themes", &["coding", "music"]).with_activation(0.4),
        );
        eng
    }

    #[test]
    fn test_roundtrip_exact() {
        let eng = make_engine();
        let json = export_json(&eng).unwrap();
        let eng2 = import_json(&json).unwrap();

        assert_eq!(eng.subject(), eng2.subject());
        assert_eq!(eng.perpetual().len(), eng2.perpetual().len());
        assert_eq!(eng.dynamic().len(), eng2.dynamic().len());

        for (a, b) in eng.dynamic().iter().zip(eng2.dynamic().iter()) {
            assert_eq!(a.focus, b.focus);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.activation, b.activation);
            assert_eq!(a.certainty, b.certainty);
            assert_eq!(a.domain, b.domain);
            assert_eq!(a.subdomain, b.subdomain);
            assert_eq!(a.times_explored, b.times_explored);
            assert_eq!(a.last_activated, b.last_activated);
            assert_eq!(a.cycle_id, b.cycle_id);
        }
    }

    #[test]
    fn test_roundtrip_preserves_active_ordering() {
        let eng = make_engine();
        let eng2 = import_json(&export_json(&eng).unwrap()).unwrap();

        let now = now_unix_secs();
        let order: Vec<String> = eng
            .get_active(now)
            .iter()
            .map(|s| s.curiosity.focus.clone())
            .collect();
        let order2: Vec<String> = eng2
            .get_active(now)
            .iter()
            .map(|s| s.curiosity.focus.clone())
            .collect();
        assert_eq!(order, order2);
    }

    #[test]
    fn test_version_field() {
        let json = export_json(&make_engine()).unwrap();
        let wire: WireSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(wire.version, CURRENT_VERSION);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{
            "version": "1.0.0",
            "timestamp": "",
            "subject": "sam",
            "perpetual": [
                {"focus": "a", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "b", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "c", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "d", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "e", "kind": "premonition", "activation": 0.5, "certainty": 0.3}
            ]
        }"#;

        let err = import_json(json).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)), "got {err}");
    }

    #[test]
    fn test_wrong_perpetual_count_rejected() {
        let json = r#"{
            "version": "1.0.0",
            "timestamp": "",
            "subject": "sam",
            "perpetual": [
                {"focus": "a", "kind": "discovery", "activation": 0.5, "certainty": 0.3}
            ]
        }"#;

        let err = import_json(json).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)), "got {err}");
    }

    #[test]
    fn test_out_of_range_scores_rejected() {
        for (activation, certainty) in [(5.0, 0.3), (0.5, -2.0), (-0.1, 0.3), (0.5, 1.5)] {
            let json = format!(
                r#"{{
                "version": "1.0.0",
                "timestamp": "",
                "subject": "sam",
                "perpetual": [
                    {{"focus": "a", "kind": "discovery", "activation": 0.5, "certainty": 0.3}},
                    {{"focus": "b", "kind": "discovery", "activation": 0.5, "certainty": 0.3}},
                    {{"focus": "c", "kind": "discovery", "activation": 0.5, "certainty": 0.3}},
                    {{"focus": "d", "kind": "discovery", "activation": 0.5, "certainty": 0.3}},
                    {{"focus": "e", "kind": "discovery", "activation": 0.5, "certainty": 0.3}}
                ],
                "dynamic": [
                    {{"focus": "wild", "kind": "discovery", "activation": {activation}, "certainty": {certainty}}}
                ]
            }}"#
            );

            let err = import_json(&json).unwrap_err();
            assert!(
                matches!(err, EngineError::Validation(_)),
                "activation={activation} certainty={certainty} should be rejected, got {err}"
            );
        }
    }

    #[test]
    fn test_duplicate_dynamic_focus_rejected() {
        let json = r#"{
            "version": "1.0.0",
            "timestamp": "",
            "subject": "sam",
            "perpetual": [
                {"focus": "a", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "b", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "c", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "d", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "e", "kind": "discovery", "activation": 0.5, "certainty": 0.3}
            ],
            "dynamic": [
                {"focus": "dup", "kind": "discovery", "activation": 0.4, "certainty": 0.3},
                {"focus": "dup", "kind": "discovery", "activation": 0.6, "certainty": 0.3}
            ]
        }"#;

        let err = import_json(json).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)), "got {err}");
    }

    #[test]
    fn test_question_kind_requires_question_text() {
        let json = r#"{
            "version": "1.0.0",
            "timestamp": "",
            "subject": "sam",
            "perpetual": [
                {"focus": "a", "kind": "question", "activation": 0.5, "certainty": 0.3},
                {"focus": "b", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "c", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "d", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "e", "kind": "discovery", "activation": 0.5, "certainty": 0.3}
            ]
        }"#;

        let err = import_json(json).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)), "got {err}");
    }

    #[test]
    fn test_kind_payloads_survive_roundtrip() {
        let eng2 = import_json(&export_json(&make_engine()).unwrap()).unwrap();

        let q = eng2.dynamic().iter().find(|c| c.focus == "sleep").unwrap();
        assert_eq!(
            q.kind,
            CuriosityKind::Question {
                question: "why the late nights?".to_string()
            }
        );

        let p = eng2.dynamic().iter().find(|c| c.focus == "themes").unwrap();
        assert_eq!(
            p.kind,
            CuriosityKind::Pattern {
                domains_involved: vec!["coding".to_string(), "music".to_string()]
            }
        );
    }

    #[test]
    fn test_tuning_defaults_when_absent() {
        let json = r#"{
            "version": "1.0.0",
            "timestamp": "",
            "subject": "sam",
            "perpetual": [
                {"focus": "a", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "b", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "c", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "d", "kind": "discovery", "activation": 0.5, "certainty": 0.3},
                {"focus": "e", "kind": "discovery", "activation": 0.5, "certainty": 0.3}
            ]
        }"#;

        let eng = import_json(json).unwrap();
        let defaults = ActivationTuning::default();
        assert_eq!(eng.tuning().decay_per_day, defaults.decay_per_day);
        assert_eq!(eng.tuning().dampening_threshold, defaults.dampening_threshold);
    }
}
