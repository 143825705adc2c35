use tracing::{debug, trace};

use super::types::{
    FusionResult, FusionWeights, SIGNAL_EVIDENCE, SIGNAL_KEYWORD, SIGNAL_SEMANTIC, ScoreMap,
    Verdict,
};

/// Signals summed first, in this order; any other weighted signal follows in key order.
const CANONICAL_ORDER: [&str; 3] = [SIGNAL_SEMANTIC, SIGNAL_KEYWORD, SIGNAL_EVIDENCE];

/// Rounds the exact binary value to `decimals` places, ties to even.
///
/// Goes through the decimal formatter so `2.125` becomes `2.12` and `0.175`
/// (stored as `0.17499…`) becomes `0.17`.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let precision = decimals.max(0) as usize;
    format!("{:.*}", precision, value)
        .parse::<f64>()
        .unwrap_or(value)
}

fn ordered_terms(weights: &FusionWeights) -> impl Iterator<Item = (&str, f64)> {
    let canonical = CANONICAL_ORDER
        .iter()
        .filter_map(|signal| weights.get_key_value(*signal));
    let rest = weights
        .iter()
        .filter(|(signal, _)| !CANONICAL_ORDER.contains(&signal.as_str()));

    canonical
        .chain(rest)
        .map(|(signal, weight)| (signal.as_str(), *weight))
}

/// Fuses `scores` with `weights` into a final score and verdict.
///
/// Terms are accumulated semantic, keyword, evidence, then any extra signal.
/// Only keys present in `weights` contribute; a weighted key missing from `scores`
/// contributes 0.0 and keys without a weight are carried in the breakdown but ignored.
pub fn fuse(scores: &ScoreMap, weights: &FusionWeights) -> FusionResult {
    let raw = ordered_terms(weights).fold(0.0f64, |acc, (signal, weight)| {
        let score = scores.get(signal).copied().unwrap_or(0.0);
        trace!(signal, weight, score, "fusion term");
        acc + weight * score
    });

    let final_score = round_to(raw * 10.0, 2);
    let verdict = Verdict::from_score(final_score);

    debug!(raw, final_score, verdict = %verdict, "Fused scores");

    FusionResult {
        final_score,
        verdict,
        breakdown: scores.clone(),
    }
}

/// Fusion engine bound to a fixed weight set.
#[derive(Debug, Clone)]
pub struct WeightedFusionEngine {
    weights: FusionWeights,
}

impl WeightedFusionEngine {
    pub fn new(weights: FusionWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &FusionWeights {
        &self.weights
    }

    pub fn fuse(&self, scores: &ScoreMap) -> FusionResult {
        fuse(scores, &self.weights)
    }
}
