//! Evaluator configuration.
//!
//! The default evaluator is a weighted sum of six features whose weights
//! switch once the board holds more than 50 orbs. Flat weights, any single
//! feature, and the territorial blend are available as alternates, and any
//! of them can be scored symmetrically (own score minus opponent's).

use serde::{Deserialize, Serialize};

use crate::board::Board;

use super::heuristic::Features;

/// One of the six heuristic features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    OrbDifferential,
    Mobility,
    CriticalProximity,
    Stability,
    Vulnerability,
    ChainPotential,
}

pub const ALL_FEATURES: [Feature; 6] = [
    Feature::OrbDifferential,
    Feature::Mobility,
    Feature::CriticalProximity,
    Feature::Stability,
    Feature::Vulnerability,
    Feature::ChainPotential,
];

impl Feature {
    pub const fn name(self) -> &'static str {
        match self {
            Feature::OrbDifferential => "orbs",
            Feature::Mobility => "mobility",
            Feature::CriticalProximity => "critical",
            Feature::Stability => "stability",
            Feature::Vulnerability => "vulnerability",
            Feature::ChainPotential => "chain",
        }
    }

    pub fn from_name(s: &str) -> Option<Feature> {
        ALL_FEATURES.iter().copied().find(|f| f.name() == s)
    }
}

/// Per-feature multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub orb: f64,
    pub mobility: f64,
    pub critical: f64,
    pub stability: f64,
    pub vulnerability: f64,
    pub chain: f64,
}

impl Weights {
    /// Weights while the board holds at most 50 orbs.
    pub const EARLY: Weights = Weights {
        orb: 1.5,
        mobility: 1.5,
        critical: 3.5,
        stability: 1.0,
        vulnerability: 3.0,
        chain: 4.0,
    };

    /// Weights once the board holds more than 50 orbs.
    pub const LATE: Weights = Weights {
        orb: 2.0,
        mobility: 1.0,
        critical: 3.5,
        stability: 1.0,
        vulnerability: 3.0,
        chain: 4.0,
    };

    /// Plain unweighted sum.
    pub const UNIT: Weights = Weights {
        orb: 1.0,
        mobility: 1.0,
        critical: 1.0,
        stability: 1.0,
        vulnerability: 1.0,
        chain: 1.0,
    };

    /// Weighted sum of the features.
    pub fn combine(&self, f: &Features) -> f64 {
        self.orb * f.orb_differential
            + self.mobility * f.mobility
            + self.critical * f.critical_proximity
            + self.stability * f.stability
            + self.vulnerability * f.vulnerability
            + self.chain * f.chain_potential
    }
}

/// Orb total above which the late weights apply.
pub const LATE_GAME_ORBS: u32 = 50;

/// How weights are chosen for a board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Weighting {
    /// `late` applies once the board holds more than `late_threshold` orbs.
    Phased {
        late_threshold: u32,
        early: Weights,
        late: Weights,
    },
    /// The same weights for every board.
    Flat(Weights),
}

impl Default for Weighting {
    fn default() -> Self {
        Weighting::Phased {
            late_threshold: LATE_GAME_ORBS,
            early: Weights::EARLY,
            late: Weights::LATE,
        }
    }
}

impl Weighting {
    /// Returns the weights that apply to `board`.
    pub fn weights_for(&self, board: &Board) -> &Weights {
        match self {
            Weighting::Phased {
                late_threshold,
                early,
                late,
            } => {
                if board.orb_count() > *late_threshold {
                    late
                } else {
                    early
                }
            }
            Weighting::Flat(w) => w,
        }
    }
}

/// Which scoring function the evaluator uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EvalKind {
    Weighted(Weighting),
    Single(Feature),
    Territorial,
}

/// Evaluator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    pub kind: EvalKind,
    /// Score `f(player) - f(opponent)` instead of `f(player)`.
    #[serde(default)]
    pub symmetric: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            kind: EvalKind::Weighted(Weighting::default()),
            symmetric: false,
        }
    }
}

impl EvalConfig {
    /// Unweighted sum of the six features, no phase switch.
    pub fn flat() -> Self {
        EvalConfig {
            kind: EvalKind::Weighted(Weighting::Flat(Weights::UNIT)),
            symmetric: false,
        }
    }

    pub fn single(feature: Feature) -> Self {
        EvalConfig {
            kind: EvalKind::Single(feature),
            symmetric: false,
        }
    }

    pub fn territorial() -> Self {
        EvalConfig {
            kind: EvalKind::Territorial,
            symmetric: false,
        }
    }

    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    /// Parses a preset name: `weighted`, `flat`, `territorial`, or a feature name.
    pub fn from_name(s: &str) -> Option<EvalConfig> {
        match s.to_ascii_lowercase().as_str() {
            "weighted" | "default" => Some(EvalConfig::default()),
            "flat" => Some(EvalConfig::flat()),
            "territorial" => Some(EvalConfig::territorial()),
            other => Feature::from_name(other).map(EvalConfig::single),
        }
    }
}
