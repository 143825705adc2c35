//! Weighted score fusion.
//!
//! Turns named sub-scores in `[0, 1]` into a final `0..=10` score and a [`Verdict`].
//! Weights are validated when questions are loaded, not here: [`fuse`] trusts its
//! inputs and never fails.

pub mod engine;
pub mod types;


pub use engine::{WeightedFusionEngine, fuse, round_to};
pub use types::{
    FusionResult, FusionWeights, SIGNAL_EVIDENCE, SIGNAL_KEYWORD, SIGNAL_SEMANTIC, ScoreMap,
    Verdict,
};
