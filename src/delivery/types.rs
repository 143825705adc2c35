use serde::{Deserialize, Serialize};

/// Discretised delivery metrics for one recording.
///
/// Each component is one of `{1.0, 0.7, 0.4, 0.0}`; `delivery_stability` blends
/// `rms_stability` and `pause_score` only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeliveryMetrics {
    pub rms_stability: f64,
    pub pause_score: f64,
    pub speaking_rate_score: f64,
    pub delivery_stability: f64,
}

/// Feedback-only delivery assessment attached to an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeedback {
    pub delivery_stability_score: f64,
    pub feedback: Vec<String>,
    pub bonus_eligible: bool,
    /// Always within `[0, max_bonus]`.
    pub suggested_bonus: f64,
}
