//! End-to-end HTTP tests.

mod common;

use std::f32::consts::PI;

use viva::fusion::{FusionWeights, SIGNAL_EVIDENCE, SIGNAL_KEYWORD, SIGNAL_SEMANTIC};
use viva::orchestrator::WeightPolicy;

use common::harness::{TestServerConfig, spawn_test_server};
use common::http_client::TestClient;

const FLIP_FLOP_ANSWER: &str =
    "A flip-flop is a bistable circuit that changes state on the clock edge, unlike a latch.";

/// Two seconds of a tone broken by a short pause, as 16-bit 16 kHz mono WAV.
fn spoken_wav() -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..32_000 {
            let gated = (12_000..16_000).contains(&i);
            let sample = if gated {
                0.0
            } else {
                0.4 * (2.0 * PI * 180.0 * i as f32 / 16_000.0).sin()
            };
            writer.write_sample((sample * i16::MAX as f32) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");

    let health = TestClient::new(server.url())
        .health()
        .await
        .expect("Health check should succeed");
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_ready_endpoint_lists_components() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");

    let ready = TestClient::new(server.url()).ready().await.unwrap();
    assert_eq!(ready.status, 200);
    assert_eq!(ready.body["components"]["questions"], 3);
    assert_eq!(ready.body["components"]["encoder_mode"], "stub");
}

#[tokio::test]
async fn test_text_evaluation_over_real_stack() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");

    let resp = TestClient::new(server.url())
        .evaluate_text("ECE_DE_001", FLIP_FLOP_ANSWER)
        .await
        .unwrap();

    assert_eq!(resp.status, 200, "body: {}", resp.body);
    assert_eq!(resp.viva_status, "evaluated");
    assert!(resp.evaluation_id.is_some());

    let body = &resp.body;
    assert_eq!(body["question_id"], "ECE_DE_001");
    assert_eq!(body["score_breakdown"]["keyword"], 0.75);
    assert_eq!(body["score_breakdown"]["evidence"], 0.5);

    let semantic = body["score_breakdown"]["semantic"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&semantic));

    let score = body["final_score"].as_f64().unwrap();
    assert!((0.0..=10.0).contains(&score));
    assert_eq!(
        body["verdict"].as_str().unwrap(),
        viva::fusion::Verdict::from_score(score).as_str()
    );

    let snippets = body["evidence_snippets"].as_array().unwrap();
    assert_eq!(snippets.len(), 3);
    assert!(snippets[0].get("chunk_id").is_none());
    assert!(body.get("audio_feedback").is_none());
}

#[tokio::test]
async fn test_fixed_weights_override_question_weights() {
    let weights = FusionWeights::from([
        (SIGNAL_SEMANTIC.to_string(), 0.0),
        (SIGNAL_KEYWORD.to_string(), 1.0),
        (SIGNAL_EVIDENCE.to_string(), 0.0),
    ]);
    let server = spawn_test_server(TestServerConfig {
        weight_policy: WeightPolicy::Fixed(weights),
        ..TestServerConfig::default()
    })
    .await
    .expect("Server should start");

    let resp = TestClient::new(server.url())
        .evaluate_text("ECE_DE_001", FLIP_FLOP_ANSWER)
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["final_score"], 7.5);
    assert_eq!(resp.body["verdict"], "Good");
}

#[tokio::test]
async fn test_no_corpus_means_zero_evidence() {
    let server = spawn_test_server(TestServerConfig {
        corpus_path: None,
        ..TestServerConfig::default()
    })
    .await
    .expect("Server should start");

    let resp = TestClient::new(server.url())
        .evaluate_text("ECE_DE_001", FLIP_FLOP_ANSWER)
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["score_breakdown"]["evidence"], 0.0);
    assert!(resp.body["evidence_snippets"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_question_is_client_error() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");

    let resp = TestClient::new(server.url())
        .evaluate_text("ECE_XX_999", FLIP_FLOP_ANSWER)
        .await
        .unwrap();

    assert_eq!(resp.status, 400);
    assert_eq!(resp.viva_status, "unknown_question");
    assert!(resp.evaluation_id.is_some());
}

#[tokio::test]
async fn test_audio_evaluation_attaches_delivery_feedback() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");

    let resp = TestClient::new(server.url())
        .evaluate_audio("ECE_DE_001", spoken_wav())
        .await
        .unwrap();

    assert_eq!(resp.status, 200, "body: {}", resp.body);
    let body = &resp.body;
    assert_eq!(
        body["student_answer"],
        "A flip-flop is a bistable element that changes on the clock edge"
    );

    let feedback = &body["audio_feedback"];
    let stability = feedback["delivery_stability_score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&stability));
    let bonus = feedback["suggested_bonus"].as_f64().unwrap();
    assert!((0.0..=0.30).contains(&bonus));
    assert!(!feedback["feedback"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_audio_rejects_non_wav_upload() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");

    let resp = TestClient::new(server.url())
        .evaluate_audio("ECE_DE_001", b"OggS\x00\x02not really audio".to_vec())
        .await
        .unwrap();

    assert_eq!(resp.status, 400);
    assert_eq!(resp.viva_status, "invalid_request");
}
