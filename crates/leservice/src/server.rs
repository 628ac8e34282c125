//! Server instance management

use axum::http::{HeaderValue, Method};
use axum::Router;
use ledecision::Catalog;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::handlers::{create_router, AppState};

/// Decision service HTTP server
///
/// Manages Axum server lifecycle including startup and graceful shutdown.
pub struct AiServiceServer {
    /// Server configuration
    config: ServiceConfig,

    /// Reference data shared by every request
    catalog: Arc<Catalog>,
}

impl AiServiceServer {
    /// Create new server instance
    ///
    /// Loads the catalog named by the configuration, or the built-in one.
    pub fn new(config: ServiceConfig) -> Result<Self, ApiError> {
        if let Err(e) = config.validate() {
            return Err(ApiError::internal(format!("Invalid config: {}", e)));
        }

        let catalog = match &config.catalog_path {
            Some(path) => {
                info!("Loading catalog from {:?}", path);
                Catalog::load(path).map_err(|e| {
                    error!("Failed to load catalog: {}", e);
                    ApiError::internal(format!("Failed to load catalog: {}", e))
                })?
            }
            None => Catalog::default(),
        };

        Ok(Self::with_catalog(config, catalog))
    }

    /// Create a server around an explicit catalog
    pub fn with_catalog(config: ServiceConfig, catalog: Catalog) -> Self {
        Self {
            config,
            catalog: Arc::new(catalog),
        }
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, ApiError> {
        self.config
            .socket_addr()
            .map_err(|e| ApiError::internal(format!("Failed to parse address: {}", e)))
    }

    /// Router with state, tracing and CORS applied
    pub fn app(&self) -> Router {
        let state = AppState::new_from_arc(Arc::clone(&self.catalog), self.config.clone());
        build_app(state)
    }

    /// Start server and run until a shutdown signal arrives
    pub async fn start(&self) -> Result<(), ApiError> {
        let addr = self.socket_addr()?;
        let app = self.app();

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            error!("Failed to bind to {}: {:?}", addr, e);
            ApiError::internal(format!("Failed to bind to {}: {}", addr, e))
        })?;

        info!("Server listening on: {}", self.server_url());

        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for_shutdown())
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("Server stopped");
        Ok(())
    }

    /// Get catalog reference
    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Get server URL
    #[must_use]
    pub fn server_url(&self) -> String {
        self.config.server_url()
    }
}

/// Attach state and middleware to the API router
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS policy for the configured origins
///
/// No origins means any origin is allowed. Origins that are not valid header values are
/// skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::very_permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Wait for shutdown signal
///
/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn wait_for_shutdown() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received shutdown signal"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix;
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received TERM signal");
            }
            Err(e) => {
                error!("Failed to install TERM handler: {}", e);
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_server_default_config() {
        let server = AiServiceServer::new(ServiceConfig::default()).unwrap();
        assert_eq!(server.catalog().carriers.len(), 3);
        assert_eq!(server.server_url(), "http://0.0.0.0:8000");
        assert_eq!(server.socket_addr().unwrap().port(), 8000);
    }

    #[test]
    fn test_server_rejects_invalid_config() {
        let config = ServiceConfig {
            port: 0,
            ..Default::default()
        };
        assert!(AiServiceServer::new(config).is_err());
    }

    #[test]
    fn test_server_loads_catalog_file() {
        let mut catalog = Catalog::default();
        catalog.carriers.truncate(1);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(catalog.to_toml_string().unwrap().as_bytes())
            .unwrap();

        let config = ServiceConfig {
            catalog_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let server = AiServiceServer::new(config).unwrap();
        assert_eq!(server.catalog().carriers.len(), 1);
    }

    #[test]
    fn test_server_missing_catalog_file() {
        let config = ServiceConfig {
            catalog_path: Some("/nonexistent/catalog.toml".into()),
            ..Default::default()
        };
        assert!(AiServiceServer::new(config).is_err());
    }
}
