//! Test server harness.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use viva::audio::WavPreprocessor;
use viva::delivery::DeliveryConfidenceScorer;
use viva::embedding::SentenceEncoder;
use viva::gateway::{HandlerState, create_router_with_state};
use viva::orchestrator::{Orchestrator, SpokenAnswerPipeline, WeightPolicy};
use viva::questions::QuestionIndex;
use viva::retrieval::{DenseRetriever, load_corpus};
use viva::scoring::{EmbeddingSemanticScorer, RegexConceptScorer};
use viva::transcription::MockTranscriber;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub fn data_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(relative)
}

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub questions_path: PathBuf,
    pub corpus_path: Option<PathBuf>,
    pub weight_policy: WeightPolicy,
    pub transcript: String,
    pub max_audio_bytes: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            questions_path: data_path("questions/questions.json"),
            corpus_path: Some(data_path("corpus/corpus_chunks.json")),
            weight_policy: WeightPolicy::PerQuestion,
            transcript: "A flip-flop is a bistable element that changes on the clock edge"
                .to_string(),
            max_audio_bytes: 4 * 1024 * 1024,
        }
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

async fn wait_for_server_ready(addr: SocketAddr) -> Result<(), ServerStartupError> {
    let timeout = Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS);
    let interval = Duration::from_millis(STARTUP_POLL_INTERVAL_MS);
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }
        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => tokio::time::sleep(interval).await,
        }
    }
}

/// Spawns a server over the real scoring stack.
///
/// The encoder runs in stub mode and transcription is scripted; everything
/// else (question bank, corpus, retrieval, regex concepts, WAV decoding,
/// delivery analysis) is the production code path.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;

    let questions = QuestionIndex::load(&config.questions_path)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let encoder = Arc::new(SentenceEncoder::stub());
    let passages = match &config.corpus_path {
        Some(path) => {
            load_corpus(path).map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?
        }
        None => Vec::new(),
    };
    let retriever = DenseRetriever::build(Arc::clone(&encoder), passages)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let orchestrator = Orchestrator::new(
        Arc::new(questions),
        EmbeddingSemanticScorer::new(Arc::clone(&encoder)),
        RegexConceptScorer,
        retriever,
    )
    .with_weight_policy(config.weight_policy)
    .with_delivery_scorer(DeliveryConfidenceScorer::default());

    let spoken = SpokenAnswerPipeline::new(
        WavPreprocessor::default(),
        MockTranscriber::with_text(&config.transcript),
    );

    let state = HandlerState::new(orchestrator, spoken, "stub", config.max_audio_bytes);
    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    wait_for_server_ready(addr).await?;

    Ok(TestServer {
        addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
