//! Viva HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use viva::audio::WavPreprocessor;
use viva::config::Config;
use viva::delivery::DeliveryConfidenceScorer;
use viva::embedding::{EncoderConfig, SentenceEncoder};
use viva::gateway::{HandlerState, create_router_with_state};
use viva::orchestrator::{Orchestrator, SpokenAnswerPipeline, WeightPolicy};
use viva::questions::QuestionIndex;
use viva::retrieval::{DenseRetriever, load_corpus};
use viva::scoring::{EmbeddingSemanticScorer, RegexConceptScorer};
use viva::transcription::ConfiguredTranscriber;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
██╗   ██╗██╗██╗   ██╗ █████╗
██║   ██║██║██║   ██║██╔══██╗
██║   ██║██║██║   ██║███████║
╚██╗ ██╔╝██║╚██╗ ██╔╝██╔══██║
 ╚████╔╝ ██║ ╚████╔╝ ██║  ██║
  ╚═══╝  ╚═╝  ╚═══╝  ╚═╝  ╚═╝

     LISTEN. SCORE. EXPLAIN.
                       AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "Viva starting"
    );

    let questions = Arc::new(QuestionIndex::load(&config.questions_path)?);
    tracing::info!(
        path = %config.questions_path.display(),
        questions = questions.len(),
        "Question bank loaded"
    );

    let encoder_config = if let Some(path) = &config.encoder_path {
        EncoderConfig::new(path.clone())
    } else {
        tracing::warn!("No VIVA_ENCODER_PATH configured, running encoder in stub mode");
        EncoderConfig::stub()
    };
    let encoder = Arc::new(SentenceEncoder::load(encoder_config)?);
    let encoder_mode = if encoder.is_stub() { "stub" } else { "model" };

    let passages = match &config.corpus_path {
        Some(path) => load_corpus(path)?,
        None => {
            tracing::warn!("No VIVA_CORPUS_PATH configured, evidence retrieval is empty");
            Vec::new()
        }
    };
    let retriever = DenseRetriever::build(Arc::clone(&encoder), passages)?;

    let weight_policy = match &config.fusion_weights {
        Some(weights) => WeightPolicy::Fixed(weights.clone()),
        None => WeightPolicy::PerQuestion,
    };

    let orchestrator = Orchestrator::new(
        questions,
        EmbeddingSemanticScorer::new(Arc::clone(&encoder)),
        RegexConceptScorer,
        retriever,
    )
    .with_weight_policy(weight_policy)
    .with_delivery_scorer(DeliveryConfidenceScorer::new(
        config.bonus_threshold,
        config.max_bonus,
    ))
    .with_top_k_evidence(config.top_k_evidence);

    let transcriber = ConfiguredTranscriber::from_parts(
        config.transcriber_url.as_deref(),
        &config.transcriber_model,
        config.transcriber_api_key.as_deref(),
    )?;
    if !matches!(transcriber, ConfiguredTranscriber::Http(_)) {
        tracing::warn!("No VIVA_TRANSCRIBER_URL configured, audio evaluation is disabled");
    }
    let spoken = SpokenAnswerPipeline::new(WavPreprocessor::default(), transcriber);

    let state = HandlerState::new(orchestrator, spoken, encoder_mode, config.max_audio_bytes);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Viva shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var(Config::ENV_PORT)
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
