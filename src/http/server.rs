//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding route
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Record per-request metrics and logs

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, Method},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{validate_config, ConfigError, ProxyConfig};
use crate::http::forward::Forwarder;
use crate::http::request::{self, MakeRequestUuid, ProxyQuery, X_REQUEST_ID};
use crate::lifecycle::{shutdown, signals};
use crate::observability::metrics;
use crate::upstream::{Fetch, HttpFetcher};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server that fetches upstreams over reqwest.
    pub fn new(config: ProxyConfig) -> Result<Self, ConfigError> {
        let connect_timeout = Duration::from_secs(config.timeouts.upstream_secs);
        let fetcher = HttpFetcher::new(connect_timeout)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Create a server around any [`Fetch`] implementation.
    pub fn with_fetcher(config: ProxyConfig, fetcher: Arc<dyn Fetch>) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let forwarder = Forwarder::from_config(&config, fetcher)?;
        let state = AppState {
            forwarder: Arc::new(forwarder),
        };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.forwarding.path, any(proxy_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// The router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown_rx` fires or the process is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.forwarding.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown::triggered(shutdown_rx) => {},
                    _ = signals::shutdown_signal() => {},
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Forwarding route. Any method reaches here; only `OPTIONS` is special.
async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request::request_id(&headers);
    // An unreadable query string carries no usable `url`.
    let query = match pairs {
        Ok(Query(pairs)) => ProxyQuery::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(request_id = %request_id, error = %rejection, "Unreadable query string");
            ProxyQuery::default()
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        target_url = query.url.as_deref().unwrap_or(""),
        "Proxying request"
    );

    let (outcome, response) = state.forwarder.handle(&method, &query).await;
    debug_assert_eq!(outcome.status(), response.status());

    tracing::info!(
        request_id = %request_id,
        outcome = outcome.as_str(),
        status = response.status().as_u16(),
        "Request complete"
    );
    metrics::record_request(outcome.as_str(), response.status().as_u16(), start_time);

    response
}
