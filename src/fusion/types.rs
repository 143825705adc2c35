use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Signal name for semantic similarity to the reference answer.
pub const SIGNAL_SEMANTIC: &str = "semantic";
/// Signal name for key-concept coverage.
pub const SIGNAL_KEYWORD: &str = "keyword";
/// Signal name for retrieved supporting evidence.
pub const SIGNAL_EVIDENCE: &str = "evidence";

/// Named sub-scores, each expected in `[0, 1]`.
///
/// Ordered so breakdowns serialise deterministically.
pub type ScoreMap = BTreeMap<String, f64>;

/// Named fusion weights, expected to sum to 1.0.
pub type FusionWeights = BTreeMap<String, f64>;

/// Discrete label derived from the final score.
///
/// Variants are declared worst-to-best so `Ord` follows quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Verdict {
    /// Maps a final `0..=10` score to a verdict (closed-open bands, high to low).
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Verdict::Excellent
        } else if score >= 6.0 {
            Verdict::Good
        } else if score >= 4.0 {
            Verdict::Fair
        } else {
            Verdict::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent",
            Verdict::Good => "Good",
            Verdict::Fair => "Fair",
            Verdict::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a fusion pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionResult {
    /// Weighted sum scaled to `0..=10`, rounded to two decimals.
    pub final_score: f64,
    pub verdict: Verdict,
    /// Copy of the scores that were fused (including unweighted keys).
    pub breakdown: ScoreMap,
}
