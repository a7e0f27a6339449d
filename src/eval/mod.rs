//! Position evaluation.
//!
//! Scores a board from a given player's perspective. The default evaluator
//! is a phase-weighted sum of six features; the weighting, a single feature,
//! or the territorial blend can be selected through `EvalConfig`.

pub mod heuristic;
pub mod territorial;
pub mod weights;

pub use heuristic::{evaluate, evaluate_default, Features};
pub use weights::{
    EvalConfig, EvalKind, Feature, Weighting, Weights, ALL_FEATURES, LATE_GAME_ORBS,
};
