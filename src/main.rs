//! Qascore HTTP server entrypoint.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use qascore::config::Config;
use qascore::embedding::{Encoder, EncoderConfig, SentenceEncoder};
use qascore::gateway::{HandlerState, create_router_with_state};
use qascore::normalize::IndicNormalizer;
use qascore::scoring::SimilarityScorer;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    // The health check builds its own runtime, so branch before starting the server's.
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(serve())
}

async fn serve() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        language = %config.language,
        "Qascore starting"
    );

    let normalizer = Arc::new(IndicNormalizer::new(
        &config.language,
        config.normalizer_options(),
    )?);

    let labse = load_encoder(
        config.labse_path.as_ref(),
        EncoderConfig::labse,
        EncoderConfig::labse_stub,
        Config::ENV_LABSE_PATH,
    )?;
    let pml = load_encoder(
        config.pml_path.as_ref(),
        EncoderConfig::pml,
        EncoderConfig::pml_stub,
        Config::ENV_PML_PATH,
    )?;

    let scorer = Arc::new(SimilarityScorer::new(normalizer, labse, pml));
    let state = HandlerState::new(scorer).with_inference_timeout(config.inference_timeout);

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Qascore shutdown complete");
    Ok(())
}

fn load_encoder(
    path: Option<&PathBuf>,
    real: fn(PathBuf) -> EncoderConfig,
    stub: fn() -> EncoderConfig,
    env_name: &str,
) -> anyhow::Result<Arc<dyn Encoder>> {
    let encoder_config = match path {
        Some(path) => real(path.clone()),
        None => {
            tracing::warn!("No {} configured, running encoder in stub mode", env_name);
            stub()
        }
    };
    Ok(Arc::new(SentenceEncoder::load(encoder_config)?))
}

fn run_health_check() -> i32 {
    let port = std::env::var(Config::ENV_PORT)
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

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
