use super::*;
use crate::constants::{SAMPLE_RATE, SILENCE_TOP_DB, SPLIT_FRAME_LENGTH, SPLIT_HOP_LENGTH};

const SR: usize = SAMPLE_RATE as usize;

fn tone(seconds: f64, amplitude: f32) -> Vec<f32> {
    let n = (seconds * SR as f64) as usize;
    (0..n)
        .map(|i| {
            let t = i as f32 / SR as f32;
            amplitude * (2.0 * std::f32::consts::PI * 440.0 * t).sin()
        })
        .collect()
}

fn silence(seconds: f64) -> Vec<f32> {
    vec![0.0; (seconds * SR as f64) as usize]
}

fn concat(parts: &[Vec<f32>]) -> Vec<f32> {
    parts.iter().flatten().copied().collect()
}

mod signal_tests {
    use super::*;

    #[test]
    fn test_frame_rms_frame_count_is_centred() {
        let signal = tone(1.0, 0.5);
        let rms = frame_rms(&signal, 400, 160);
        assert_eq!(rms.len(), 1 + signal.len() / 160);
    }

    #[test]
    fn test_frame_rms_empty_signal() {
        assert!(frame_rms(&[], 400, 160).is_empty());
    }

    #[test]
    fn test_frame_rms_constant_signal() {
        let signal = vec![0.5f32; 4000];
        let rms = frame_rms(&signal, 400, 160);
        // Interior frames see only signal; edge frames see half padding.
        let interior = rms[5];
        assert!((interior - 0.5).abs() < 1e-9);
        assert!(rms[0] < interior);
    }

    #[test]
    fn test_split_full_tone_is_single_interval() {
        let signal = tone(1.0, 0.5);
        let intervals = split_speech(&signal, SILENCE_TOP_DB, SPLIT_FRAME_LENGTH, SPLIT_HOP_LENGTH);
        assert_eq!(
            intervals,
            vec![SpeechInterval {
                start: 0,
                end: signal.len()
            }]
        );
    }

    #[test]
    fn test_split_tone_then_silence() {
        let signal = concat(&[tone(1.0, 0.5), silence(1.0)]);
        let intervals = split_speech(&signal, SILENCE_TOP_DB, SPLIT_FRAME_LENGTH, SPLIT_HOP_LENGTH);

        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].start, 0);
        // Frames overlapping the tone by more than ~1% of their length stay voiced.
        assert_eq!(intervals[0].end, 34 * 512);
    }

    #[test]
    fn test_split_two_bursts() {
        let signal = concat(&[tone(0.5, 0.5), silence(1.0), tone(0.5, 0.5)]);
        let intervals = split_speech(&signal, SILENCE_TOP_DB, SPLIT_FRAME_LENGTH, SPLIT_HOP_LENGTH);

        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].start, 0);
        assert_eq!(intervals[1].end, signal.len());
        assert!(intervals[0].end < intervals[1].start);
    }

    #[test]
    fn test_digital_silence_counts_as_one_speech_interval() {
        let signal = silence(1.0);
        let intervals = split_speech(&signal, SILENCE_TOP_DB, SPLIT_FRAME_LENGTH, SPLIT_HOP_LENGTH);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].len(), signal.len());
    }

    #[test]
    fn test_trim_removes_leading_and_trailing_silence() {
        let signal = concat(&[silence(1.0), tone(1.0, 0.5), silence(1.0)]);
        let kept = trim_silence(&signal, SILENCE_TOP_DB, SPLIT_FRAME_LENGTH, SPLIT_HOP_LENGTH)
            .expect("tone should survive trimming");

        assert!(kept.start > 0);
        assert!(kept.start <= SR);
        assert!(kept.end >= 2 * SR);
        assert!(kept.end < signal.len());
    }

    #[test]
    fn test_trim_empty_signal() {
        assert!(trim_silence(&[], SILENCE_TOP_DB, SPLIT_FRAME_LENGTH, SPLIT_HOP_LENGTH).is_none());
    }
}

mod metrics_tests {
    use super::*;

    #[test]
    fn test_rms_stability_buckets() {
        assert_eq!(rms_stability_from_cv(0.0), 1.0);
        assert_eq!(rms_stability_from_cv(0.29), 1.0);
        assert_eq!(rms_stability_from_cv(0.30), 0.7);
        assert_eq!(rms_stability_from_cv(0.54), 0.7);
        assert_eq!(rms_stability_from_cv(0.55), 0.4);
        assert_eq!(rms_stability_from_cv(2.0), 0.4);
    }

    #[test]
    fn test_pause_score_buckets() {
        assert_eq!(pause_score_from_ratio(0.0), 1.0);
        assert_eq!(pause_score_from_ratio(0.35), 1.0);
        assert_eq!(pause_score_from_ratio(0.36), 0.7);
        assert_eq!(pause_score_from_ratio(0.50), 0.7);
        assert_eq!(pause_score_from_ratio(0.51), 0.4);
    }

    #[test]
    fn test_speaking_rate_buckets() {
        assert_eq!(speaking_rate_score_from_rate(1.2), 1.0);
        assert_eq!(speaking_rate_score_from_rate(2.0), 1.0);
        assert_eq!(speaking_rate_score_from_rate(3.0), 1.0);
        assert_eq!(speaking_rate_score_from_rate(0.5), 0.7);
        assert_eq!(speaking_rate_score_from_rate(1.19), 0.7);
        assert_eq!(speaking_rate_score_from_rate(3.51), 0.4);
    }

    #[test]
    fn test_speaking_rate_low_branch_is_subsumed_by_upper_bound() {
        // Fast speech just above the ideal band scores the same as slow speech.
        assert_eq!(speaking_rate_score_from_rate(3.2), 0.7);
        assert_eq!(speaking_rate_score_from_rate(3.5), 0.7);
        assert_eq!(
            speaking_rate_score_from_rate(0.1),
            speaking_rate_score_from_rate(3.4)
        );
    }

    #[test]
    fn test_steady_tone_is_stable() {
        assert_eq!(compute_rms_stability(&tone(1.0, 0.5)), 1.0);
    }

    #[test]
    fn test_alternating_loudness_is_unstable() {
        let signal = concat(&[
            tone(0.5, 0.9),
            tone(0.5, 0.1),
            tone(0.5, 0.9),
            tone(0.5, 0.1),
        ]);
        assert_eq!(compute_rms_stability(&signal), 0.4);
    }

    #[test]
    fn test_rms_stability_zero_for_silence_and_empty() {
        assert_eq!(compute_rms_stability(&[]), 0.0);
        assert_eq!(compute_rms_stability(&silence(0.5)), 0.0);
    }

    #[test]
    fn test_pause_score_from_signal() {
        assert_eq!(compute_pause_score(&tone(1.0, 0.5)), 1.0);
        assert_eq!(compute_pause_score(&concat(&[tone(1.0, 0.5), silence(1.0)])), 0.7);
        assert_eq!(compute_pause_score(&concat(&[tone(1.0, 0.5), silence(3.0)])), 0.4);
    }

    #[test]
    fn test_pause_score_empty_signal() {
        assert_eq!(compute_pause_score(&[]), 0.0);
    }

    #[test]
    fn test_speaking_rate_from_signal() {
        let signal = tone(1.0, 0.5);
        assert_eq!(compute_speaking_rate_score("fourier transform", &signal), 1.0);
        assert_eq!(compute_speaking_rate_score("fourier", &signal), 0.7);
        assert_eq!(
            compute_speaking_rate_score("the fourier transform maps", &signal),
            0.4
        );
    }

    #[test]
    fn test_speaking_rate_zero_without_words_or_speech() {
        assert_eq!(compute_speaking_rate_score("   ", &tone(1.0, 0.5)), 0.0);
        assert_eq!(compute_speaking_rate_score("some words", &[]), 0.0);
    }

    #[test]
    fn test_analyze_delivery_steady_answer() {
        let metrics = analyze_delivery(&tone(1.0, 0.5), "fourier transform");

        assert_eq!(metrics.rms_stability, 1.0);
        assert_eq!(metrics.pause_score, 1.0);
        assert_eq!(metrics.speaking_rate_score, 1.0);
        assert_eq!(metrics.delivery_stability, 1.0);
    }

    #[test]
    fn test_analyze_delivery_excludes_speaking_rate_from_stability() {
        let signal = tone(1.0, 0.5);
        let fast = analyze_delivery(&signal, "one two three four five six");
        let ideal = analyze_delivery(&signal, "one two");

        assert_eq!(fast.speaking_rate_score, 0.4);
        assert_eq!(fast.delivery_stability, ideal.delivery_stability);
    }

    #[test]
    fn test_analyze_delivery_blend() {
        let metrics = analyze_delivery(&concat(&[tone(1.0, 0.5), silence(1.0)]), "hello there");
        assert_eq!(metrics.pause_score, 0.7);
        let expected = 0.6 * metrics.rms_stability + 0.4 * metrics.pause_score;
        assert!((metrics.delivery_stability - expected).abs() < 1e-3);
    }

    #[test]
    fn test_analyze_delivery_empty_signal() {
        let metrics = analyze_delivery(&[], "words");
        assert_eq!(metrics, DeliveryMetrics::default());
    }

    #[test]
    fn test_metrics_are_on_the_discrete_levels() {
        let levels = [1.0, 0.7, 0.4, 0.0];
        let signal = concat(&[tone(0.7, 0.8), silence(0.4), tone(0.3, 0.2)]);
        let m = analyze_delivery(&signal, "a signal sampled at sixteen kilohertz");

        for value in [m.rms_stability, m.pause_score, m.speaking_rate_score] {
            assert!(levels.contains(&value), "{value} is not a bucket level");
        }
    }
}

mod confidence_tests {
    use super::*;

    fn metrics(delivery_stability: f64) -> DeliveryMetrics {
        DeliveryMetrics {
            rms_stability: 1.0,
            pause_score: 1.0,
            speaking_rate_score: 1.0,
            delivery_stability,
        }
    }

    #[test]
    fn test_default_parameters() {
        let scorer = DeliveryConfidenceScorer::default();
        assert_eq!(scorer.bonus_threshold(), 0.62);
        assert_eq!(scorer.max_bonus(), 0.30);
    }

    #[test]
    fn test_bonus_is_monotonic_above_threshold() {
        let scorer = DeliveryConfidenceScorer::default();

        let cases = [(0.62, 0.19), (0.80, 0.24), (1.0, 0.30)];
        for (stability, expected) in cases {
            let feedback = scorer.score(&metrics(stability));
            assert!(feedback.bonus_eligible);
            assert_eq!(feedback.suggested_bonus, expected, "stability {stability}");
        }
    }

    #[test]
    fn test_bonus_rounds_exact_product() {
        // 0.25 * 0.7 is stored just below 0.175.
        let feedback = DeliveryConfidenceScorer::new(0.62, 0.25).score(&metrics(0.7));
        assert!(feedback.bonus_eligible);
        assert_eq!(feedback.suggested_bonus, 0.17);
    }

    #[test]
    fn test_no_bonus_below_threshold() {
        let feedback = DeliveryConfidenceScorer::default().score(&metrics(0.61));
        assert!(!feedback.bonus_eligible);
        assert_eq!(feedback.suggested_bonus, 0.0);
    }

    #[test]
    fn test_bonus_never_exceeds_max() {
        let scorer = DeliveryConfidenceScorer::new(0.5, 0.2);
        for i in 0..=100 {
            let feedback = scorer.score(&metrics(i as f64 / 100.0));
            assert!((0.0..=0.2).contains(&feedback.suggested_bonus));
        }
    }

    #[test]
    fn test_headline_framing_by_stability() {
        let scorer = DeliveryConfidenceScorer::default();

        assert_eq!(scorer.remarks(&metrics(0.9))[0], DeliveryRemark::Confident);
        assert_eq!(scorer.remarks(&metrics(0.62))[0], DeliveryRemark::Confident);
        assert_eq!(scorer.remarks(&metrics(0.5))[0], DeliveryRemark::Clear);
        assert_eq!(scorer.remarks(&metrics(0.40))[0], DeliveryRemark::Clear);
        assert_eq!(scorer.remarks(&metrics(0.39))[0], DeliveryRemark::Fragmented);
    }

    #[test]
    fn test_component_remarks_fire_independently() {
        let scorer = DeliveryConfidenceScorer::default();
        let m = DeliveryMetrics {
            rms_stability: 0.4,
            pause_score: 0.4,
            speaking_rate_score: 0.4,
            delivery_stability: 0.4,
        };

        assert_eq!(
            scorer.remarks(&m),
            vec![
                DeliveryRemark::Clear,
                DeliveryRemark::CarefulPace,
                DeliveryRemark::LongPauses,
                DeliveryRemark::VolumeVariation,
            ]
        );
        assert_eq!(scorer.score(&m).feedback.len(), 4);
    }

    #[test]
    fn test_feedback_vocabulary_is_non_punitive() {
        let forbidden = ["penal", "deduct", "lost points", "poor", "fail", "bad"];
        for remark in DeliveryRemark::ALL {
            let message = remark.message().to_lowercase();
            for word in forbidden {
                assert!(!message.contains(word), "{remark:?} mentions '{word}'");
            }
        }
    }

    #[test]
    fn test_stability_score_rounded_to_three_decimals() {
        let feedback = DeliveryConfidenceScorer::default().score(&metrics(0.81234));
        assert_eq!(feedback.delivery_stability_score, 0.812);
    }
}
