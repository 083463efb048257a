//! Quill HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use quill::config::Config;
use quill::gateway::{HandlerState, check_health, create_router_with_state};
use quill::lexicon::Lexicon;
use quill::pipeline::ScoringPipeline;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
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
        model = %config.model,
        model_configured = config.model_configured(),
        cache_enabled = config.cache_enabled,
        "Quill starting"
    );

    let lexicon = match &config.lexicon_path {
        Some(path) => {
            let lexicon = Lexicon::from_json_file(path)?;
            tracing::info!(path = %path.display(), "Loaded lexicon");
            lexicon
        }
        None => Lexicon::default(),
    };

    if !config.model_configured() {
        tracing::warn!("No QUILL_MODEL_API_KEY or OPENAI_API_KEY configured, scoring with fallback only");
    }

    let pipeline = ScoringPipeline::from_config(&config, Arc::new(lexicon));
    tracing::debug!(?pipeline, "Pipeline ready");

    let app = create_router_with_state(HandlerState::new(Arc::new(pipeline)));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Quill shutdown complete");
    Ok(())
}

/// Runs before any runtime exists, so it owns a small current-thread one.
fn run_health_check() -> i32 {
    let port = std::env::var("QUILL_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    if rt.block_on(check_health(port, Duration::from_secs(1))) {
        0
    } else {
        1
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
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
