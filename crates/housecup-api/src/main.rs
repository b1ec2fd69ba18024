// House Cup API server
// Decision: the ingestion loop runs in-process on its own tokio task
// Decision: SIGINT/SIGTERM drain HTTP first, then stop ingestion

use std::sync::Arc;

use anyhow::{Context, Result};
use housecup_api::{build_app, AppConfig, HealthState};
use housecup_storage::Database;
use housecup_worker::{IngestionWorker, SyntheticEventSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "housecup_api=debug,housecup_worker=info,housecup_storage=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("housecup-api starting...");

    let config = AppConfig::from_env();

    // Initialize the event store
    let db = Database::open(&config.store)
        .await
        .context("Failed to open event store")?;
    db.initialize()
        .await
        .context("Failed to initialize event store schema")?;

    // Start background ingestion
    let ingestion = if config.ingestion.enabled {
        tracing::info!(
            interval_ms = config.ingestion.interval.as_millis() as u64,
            "Starting synthetic event ingestion"
        );
        let source = SyntheticEventSource::new(config.ingestion.interval);
        Some(IngestionWorker::spawn(db.clone(), source))
    } else {
        tracing::info!("Ingestion disabled (INGEST_ENABLED=false)");
        None
    };

    let health_state = HealthState {
        ingestion_enabled: ingestion.is_some(),
    };
    let app = build_app(Arc::new(db.clone()), health_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(handle) = ingestion {
        let stats = handle.shutdown().await?;
        tracing::info!(
            ingested = stats.ingested,
            failed = stats.failed,
            "Ingestion stopped"
        );
    }

    db.close().await;

    tracing::info!("housecup-api shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
