//! Extraction API server implementation
//!
//! HTTP server using Axum: the multipart upload endpoint plus health and
//! version plumbing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::branches::BranchTable;

use super::handlers;

/// Uploaded workbooks are buffered in memory before hitting the scratch
/// file; anything past this is rejected by the router.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// API server configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Branch-table YAML for the department report; empty table when unset.
    pub branch_file: Option<PathBuf>,
    /// Scratch directory for uploaded workbooks; system temp when unset.
    pub upload_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            branch_file: None,
            upload_dir: None,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub version: String,
    pub branches: BranchTable,
    pub upload_dir: PathBuf,
}

/// Build the service router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        .route("/upload", post(handlers::upload))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solreport=info,tower_http=info".into()),
        )
        .init();

    let branches = match &config.branch_file {
        Some(path) => BranchTable::load(path)?,
        None => BranchTable::default(),
    };
    let upload_dir = config
        .upload_dir
        .clone()
        .unwrap_or_else(std::env::temp_dir);

    let state = Arc::new(AppState {
        version: env!("CARGO_PKG_VERSION").to_string(),
        branches,
        upload_dir,
    });

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("📊 Solreport API server starting on http://{}", addr);
    info!("   Upload: POST /upload (multipart fields: file, type)");
    info!("   Health: /health, Version: /version");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Solreport API server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert!(config.branch_file.is_none());
        assert!(config.upload_dir.is_none());
    }

    #[test]
    fn test_config_custom_values() {
        let config = ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            branch_file: Some(PathBuf::from("branches.yaml")),
            upload_dir: Some(PathBuf::from("/tmp/uploads")),
        };
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.branch_file, Some(PathBuf::from("branches.yaml")));
    }

    #[test]
    fn test_config_address_format() {
        let config = ApiConfig::default();
        let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse().unwrap();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_router_builds_over_default_state() {
        let state = Arc::new(AppState {
            version: "1.2.0".to_string(),
            branches: BranchTable::default(),
            upload_dir: std::env::temp_dir(),
        });
        let _app = router(state);
    }
}
