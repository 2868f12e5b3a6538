/// Activation lost per elapsed day since last activation (2% of the 0-1 scale)
pub const DECAY_PER_DAY: f64 = 0.02;

/// Certainty above which a curiosity is dampened — a satisfied belief needs
/// less attention
pub const DAMPENING_THRESHOLD: f64 = 0.7;

/// Flat activation penalty applied above DAMPENING_THRESHOLD
pub const CERTAINTY_DAMPENING: f64 = 0.1;

/// Effective activation required before a curiosity may spawn a cycle
pub const SPAWN_THRESHOLD: f64 = 0.75;

/// Certainty delta for supporting evidence
pub const SUPPORT_CERTAINTY_DELTA: f64 = 0.1;

/// Certainty delta for contradicting evidence
pub const CONTRADICT_CERTAINTY_DELTA: f64 = 0.15;

/// Certainty reset value when evidence transforms the belief entirely
pub const TRANSFORM_CERTAINTY_RESET: f64 = 0.4;

/// Activation boost when a learned fact matches a curiosity's domain
pub const FACT_MATCH_BOOST: f64 = 0.1;

/// Minimum effective activation for a Question to count as a knowledge gap
pub const GAP_ACTIVATION_FLOOR: f64 = 0.6;

/// Maximum certainty for a Question to count as a knowledge gap
pub const GAP_CERTAINTY_CEILING: f64 = 0.6;

/// Confidence delta for supporting evidence on a hypothesis
pub const HYPOTHESIS_SUPPORT_DELTA: f64 = 0.15;

/// Confidence delta for contradicting evidence on a hypothesis
pub const HYPOTHESIS_CONTRADICT_DELTA: f64 = 0.2;

/// Confidence above which a Forming hypothesis advances to Active
pub const HYPOTHESIS_ACTIVE_THRESHOLD: f64 = 0.6;

/// Confidence below which a contradicted hypothesis drops to Weakening
pub const HYPOTHESIS_WEAKENING_THRESHOLD: f64 = 0.3;

/// Days without evidence before an unresolved hypothesis goes stale
pub const STALE_HYPOTHESIS_DAYS: f64 = 90.0;

/// Qualifying-hypothesis count at which an artifact is flagged stale
pub const STALENESS_THRESHOLD: usize = 2;

/// Size of the fixed perpetual curiosity set
pub const PERPETUAL_COUNT: usize = 5;
