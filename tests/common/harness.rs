//! Test server harness.

use qascore::embedding::{Encoder, EncoderConfig, SentenceEncoder};
use qascore::gateway::{HandlerState, create_router_with_state};
use qascore::normalize::{IndicNormalizer, NormalizerOptions};
use qascore::scoring::SimilarityScorer;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub port: u16,
    pub language: String,
    pub options: NormalizerOptions,
    pub inference_timeout: Duration,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            language: "hi".to_string(),
            options: NormalizerOptions::default(),
            inference_timeout: Duration::from_secs(5),
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

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
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

/// Spawns a server whose encoders run in stub mode.
///
/// Stub encoders are deterministic and need no model files, so these servers
/// exercise normalization, routing and error mapping without real inference.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let labse = load_encoder(EncoderConfig::labse_stub())?;
    let pml = load_encoder(EncoderConfig::pml_stub())?;
    spawn_server_with_encoders(config, labse, pml).await
}

/// Spawns a server around caller-supplied encoders.
pub async fn spawn_server_with_encoders(
    config: TestServerConfig,
    labse: Arc<dyn Encoder>,
    pml: Arc<dyn Encoder>,
) -> Result<TestServer, ServerStartupError> {
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let normalizer = IndicNormalizer::new(&config.language, config.options)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let scorer = Arc::new(SimilarityScorer::new(Arc::new(normalizer), labse, pml));
    let state = HandlerState::new(scorer).with_inference_timeout(config.inference_timeout);
    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Spawns a server with real models when `QASCORE_LABSE_PATH` and
/// `QASCORE_PML_PATH` are both set. Returns `None` otherwise.
pub async fn spawn_real_server() -> Option<Result<TestServer, ServerStartupError>> {
    let labse_path = std::env::var("QASCORE_LABSE_PATH").ok()?;
    let pml_path = std::env::var("QASCORE_PML_PATH").ok()?;

    println!("Using real encoders: {} / {}", labse_path, pml_path);

    let encoders = load_encoder(EncoderConfig::labse(labse_path))
        .and_then(|labse| load_encoder(EncoderConfig::pml(pml_path)).map(|pml| (labse, pml)));

    Some(match encoders {
        Ok((labse, pml)) => {
            spawn_server_with_encoders(TestServerConfig::default(), labse, pml).await
        }
        Err(e) => Err(e),
    })
}

fn load_encoder(config: EncoderConfig) -> Result<Arc<dyn Encoder>, ServerStartupError> {
    SentenceEncoder::load(config)
        .map(|encoder| Arc::new(encoder) as Arc<dyn Encoder>)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))
}
