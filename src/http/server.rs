//! HTTP server setup and configuration
//!
//! This module provides the server startup logic, routing configuration,
//! and graceful shutdown handling for the webhook relay.

use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info, instrument};

use crate::{
    config::Config,
    enrichment::MondayClient,
    error::{ConfigError, Error, Result},
    http::handlers::*,
    notifications::TelegramNotifier,
};

/// Inbound bodies above this size are rejected before parsing
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Start the HTTP server with the given configuration
#[instrument(skip_all)]
pub async fn start_server(
    config: Config,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let monday = MondayClient::new(config.monday.clone())?;
    let telegram = TelegramNotifier::new(config.telegram.clone())?;

    info!(
        delivery_enabled = telegram.is_enabled(),
        enrichment_enabled = monday.is_enabled(),
        "Outbound clients initialized"
    );

    let app_state = Arc::new(AppState { monday, telegram });
    let router = create_router(app_state);

    let addr = parse_listen_address(&config.server.listen_addr())?;

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        error!(
            error = %e,
            addr = %addr,
            "Failed to bind to address"
        );
        Error::Io(e)
    })?;

    info!(
        local_addr = %listener.local_addr().unwrap_or(addr),
        "HTTP server listening"
    );

    let server = axum::serve(listener, router).with_graceful_shutdown(async {
        shutdown_signal.await;
        info!("Shutdown signal received, starting graceful shutdown");
    });

    if let Err(e) = server.await {
        error!(error = %e, "HTTP server error");
        return Err(Error::Io(e));
    }

    info!("HTTP server shutdown complete");
    Ok(())
}

/// Create the Axum router with all endpoints and middleware
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route(
            "/monday/webhook",
            get(handle_webhook_probe).post(handle_webhook),
        )
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(app_state)
}

/// Parse the listen address from configuration
fn parse_listen_address(listen: &str) -> Result<SocketAddr> {
    listen.parse().map_err(|e| {
        error!(
            listen_addr = %listen,
            error = %e,
            "Invalid listen address format"
        );
        Error::Config(ConfigError::Invalid {
            message: format!("Invalid listen address '{}': {}", listen, e),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MondayConfig, TelegramConfig};

    #[test]
    fn test_parse_listen_address() {
        // Valid addresses
        assert!(parse_listen_address("127.0.0.1:8080").is_ok());
        assert!(parse_listen_address("0.0.0.0:3000").is_ok());
        assert!(parse_listen_address("[::1]:3000").is_ok());

        // Invalid addresses
        assert!(parse_listen_address("invalid").is_err());
        assert!(parse_listen_address("127.0.0.1").is_err());
        assert!(parse_listen_address("127.0.0.1:99999").is_err());
    }

    #[test]
    fn test_create_router() {
        let app_state = Arc::new(AppState {
            monday: MondayClient::new(MondayConfig::default()).unwrap(),
            telegram: TelegramNotifier::new(TelegramConfig::default()).unwrap(),
        });

        // Router construction must not panic
        let _router = create_router(app_state);
    }
}
