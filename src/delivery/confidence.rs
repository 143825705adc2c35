use tracing::debug;

use crate::constants::{DEFAULT_BONUS_THRESHOLD, DEFAULT_MAX_BONUS};
use crate::fusion::round_to;

use super::types::{AudioFeedback, DeliveryMetrics};

/// Stability at or above this gets the confident framing.
const CONFIDENT_STABILITY: f64 = 0.62;
/// Stability at or above this (and below confident) gets the neutral framing.
const CLEAR_STABILITY: f64 = 0.40;
/// Component scores below this trigger a targeted remark.
const REMARK_THRESHOLD: f64 = 0.6;

/// One feedback sentence.
///
/// The vocabulary is descriptive only; none of the messages refer to a deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryRemark {
    Confident,
    Clear,
    Fragmented,
    CarefulPace,
    LongPauses,
    VolumeVariation,
}

impl DeliveryRemark {
    pub const ALL: [DeliveryRemark; 6] = [
        DeliveryRemark::Confident,
        DeliveryRemark::Clear,
        DeliveryRemark::Fragmented,
        DeliveryRemark::CarefulPace,
        DeliveryRemark::LongPauses,
        DeliveryRemark::VolumeVariation,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            DeliveryRemark::Confident => {
                "Your delivery was stable and confident with clear pacing."
            }
            DeliveryRemark::Clear => {
                "Your delivery was generally clear. Pauses for thinking are normal in technical interviews."
            }
            DeliveryRemark::Fragmented => {
                "Your explanation appears conceptually focused, though the delivery was fragmented. This did not affect evaluation."
            }
            DeliveryRemark::CarefulPace => {
                "You spoke at a careful pace. Taking time to think is acceptable in technical interviews."
            }
            DeliveryRemark::LongPauses => {
                "You took longer pauses while explaining, which is common when recalling technical concepts."
            }
            DeliveryRemark::VolumeVariation => {
                "Your voice intensity varied during the answer. Maintaining a steady volume may improve clarity."
            }
        }
    }
}

/// Maps [`DeliveryMetrics`] to feedback and a positive-only bonus suggestion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryConfidenceScorer {
    bonus_threshold: f64,
    max_bonus: f64,
}

impl Default for DeliveryConfidenceScorer {
    fn default() -> Self {
        Self {
            bonus_threshold: DEFAULT_BONUS_THRESHOLD,
            max_bonus: DEFAULT_MAX_BONUS,
        }
    }
}

impl DeliveryConfidenceScorer {
    pub fn new(bonus_threshold: f64, max_bonus: f64) -> Self {
        Self {
            bonus_threshold,
            max_bonus,
        }
    }

    pub fn bonus_threshold(&self) -> f64 {
        self.bonus_threshold
    }

    pub fn max_bonus(&self) -> f64 {
        self.max_bonus
    }

    /// Remarks that apply to `metrics`, in presentation order.
    pub fn remarks(&self, metrics: &DeliveryMetrics) -> Vec<DeliveryRemark> {
        let mut remarks = Vec::with_capacity(4);

        remarks.push(if metrics.delivery_stability >= CONFIDENT_STABILITY {
            DeliveryRemark::Confident
        } else if metrics.delivery_stability >= CLEAR_STABILITY {
            DeliveryRemark::Clear
        } else {
            DeliveryRemark::Fragmented
        });

        if metrics.speaking_rate_score < REMARK_THRESHOLD {
            remarks.push(DeliveryRemark::CarefulPace);
        }
        if metrics.pause_score < REMARK_THRESHOLD {
            remarks.push(DeliveryRemark::LongPauses);
        }
        if metrics.rms_stability < REMARK_THRESHOLD {
            remarks.push(DeliveryRemark::VolumeVariation);
        }

        remarks
    }

    pub fn score(&self, metrics: &DeliveryMetrics) -> AudioFeedback {
        let stability = metrics.delivery_stability;
        let bonus_eligible = stability >= self.bonus_threshold;
        let suggested_bonus = if bonus_eligible {
            round_to(self.max_bonus * stability, 2)
        } else {
            0.0
        };

        let feedback = self
            .remarks(metrics)
            .iter()
            .map(|r| r.message().to_string())
            .collect();

        debug!(
            stability,
            bonus_eligible, suggested_bonus, "Delivery confidence scored"
        );

        AudioFeedback {
            delivery_stability_score: round_to(stability, 3),
            feedback,
            bonus_eligible,
            suggested_bonus,
        }
    }
}
