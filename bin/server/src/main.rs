use paygate_gate::SessionStore;
use paygate_secrets::{SecretManagerClient, SecretProvider};
use paygate_server::{AppState, ServerConfig, build_gate, pages::PageSettings, router};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from paygate.toml and the environment
    let config = ServerConfig::load().expect("failed to load configuration");
    tracing::info!(mode = %config.mode, "Loaded configuration");

    let source = SecretManagerClient::new(config.secrets.clone(), config.http.request_timeout())
        .expect("failed to build Secret Manager client");
    let secrets = SecretProvider::new(source);

    let gate = match build_gate(&config, &secrets).await {
        Ok(gate) => gate,
        Err(report) => {
            tracing::error!("Startup failed: {report}");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState {
        gate,
        pages: PageSettings::from(&config.server),
        session: config.session.clone(),
    });

    // Spawn periodic session cleanup task
    let cleanup_state = Arc::clone(&state);
    let cleanup_interval = config.session.cleanup_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let count = cleanup_state.gate.sessions().delete_expired().await;
            if count > 0 {
                tracing::debug!(deleted_sessions = count, "Periodic session cleanup");
            }
        }
    });

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.server.bind_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
