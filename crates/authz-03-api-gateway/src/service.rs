//! API Gateway service - router assembly and server lifecycle.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::handlers::{self, AppState};
use crate::middleware::TracingLayer;
use authz_01_signature_verification::SignatureVerificationApi;
use authz_02_policy_matching::PolicyMatchingApi;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, on, MethodFilter};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<std::io::Result<()>>>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(
        config: GatewayConfig,
        verifier: Arc<dyn SignatureVerificationApi>,
        matcher: Arc<dyn PolicyMatchingApi>,
    ) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self {
            config,
            state: AppState::new(verifier, matcher),
            shutdown_tx: None,
            server: None,
        })
    }

    /// Router with all routes and middleware applied.
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Bind and start serving in the background.
    ///
    /// Returns the bound address, which differs from the configured one
    /// when port 0 was requested.
    pub async fn start(&mut self) -> Result<SocketAddr, GatewayError> {
        if self.server.is_some() {
            return Err(GatewayError::Internal("gateway already started".into()));
        }

        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind {
                addr: addr.to_string(),
                reason: e.to_string(),
            })?;
        let bound = listener
            .local_addr()
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let router = self.router();
        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.server = Some(server);
        info!(addr = %bound, "Authz gateway listening");
        Ok(bound)
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn shutdown(&mut self) -> Result<(), GatewayError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let Some(server) = self.server.take() else {
            return Ok(());
        };

        match server.await {
            Ok(Ok(())) => {
                info!("Authz gateway stopped");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(error = %e, "HTTP server error");
                Err(GatewayError::Internal(e.to_string()))
            }
            Err(e) => Err(GatewayError::Internal(e.to_string())),
        }
    }
}

/// Assemble the HTTP router.
///
/// Layer order: Request → Tracing → BodyLimit → Handler
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let actions = MethodFilter::GET
        .or(MethodFilter::POST)
        .or(MethodFilter::PUT)
        .or(MethodFilter::DELETE);

    Router::new()
        .route("/authenticate/*target", on(actions, handlers::authenticate))
        .route(
            "/authorize/:consumer_key/:service/*resource",
            on(actions, handlers::authorize),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
        .layer(TracingLayer::new())
}
