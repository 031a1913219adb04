mod api;
mod handlers;
pub mod mapping;

pub use api::{ApiError, BodyReadError};

use greeter_core::InvocationHandler;

use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::extract::Request;
use tokio::net;
use tower_http::trace::TraceLayer;

/// Largest body an API Gateway proxy integration accepts.
pub const DEFAULT_MAX_BODY_BYTES: usize = 6 * 1024 * 1024;
pub const DEFAULT_BODY_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Bounds applied to every request body before it is logged or mapped. The timeout covers
/// the whole read, not the gap between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimits {
    pub max_bytes: usize,
    pub read_timeout: Duration,
}

impl Default for BodyLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BODY_BYTES,
            read_timeout: DEFAULT_BODY_READ_TIMEOUT,
        }
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpServerConfig<'a> {
    pub port: &'a str,
    pub body_limits: BodyLimits,
}

#[derive(Debug, Clone, Copy)]
struct LocalState {
    body_limits: BodyLimits,
}

#[derive(Debug, Clone)]
struct SimulatorState<H: InvocationHandler> {
    handler: H,
    body_limits: BodyLimits,
}

/// Router answering every path and method directly with the hello response.
pub fn local_router(limits: BodyLimits) -> Router {
    let router = Router::new()
        .fallback(handlers::local_handler)
        .with_state(LocalState {
            body_limits: limits,
        });

    with_trace_layer(router)
}

/// Router passing every path and method through `handler` as an invocation event.
pub fn simulator_router<H: InvocationHandler>(handler: H, limits: BodyLimits) -> Router {
    let router = Router::new()
        .fallback(handlers::simulator_handler::<H>)
        .with_state(SimulatorState {
            handler,
            body_limits: limits,
        });

    with_trace_layer(router)
}

fn with_trace_layer(router: Router) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        tracing::info_span!("http_request", method = ?request.method(), uri)
    });

    router.layer(trace_layer)
}

/// The application's HTTP server. The underlying HTTP package is opaque to module consumers.
pub struct HttpServer {
    router: Router,
    listener: net::TcpListener,
}

impl HttpServer {
    /// Returns a new HTTP server bound to the port specified in `config`, serving `router`.
    pub async fn new(router: Router, config: HttpServerConfig<'_>) -> anyhow::Result<Self> {
        let listener = net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
            .await
            .with_context(|| format!("failed to listen on port {}", config.port))?;

        Ok(Self { router, listener })
    }

    /// Serves the local-mode router.
    pub async fn local(config: HttpServerConfig<'_>) -> anyhow::Result<Self> {
        Self::new(local_router(config.body_limits), config).await
    }

    /// Serves the simulator-mode router in front of `handler`.
    pub async fn simulator<H: InvocationHandler>(
        handler: H,
        config: HttpServerConfig<'_>,
    ) -> anyhow::Result<Self> {
        Self::new(simulator_router(handler, config.body_limits), config).await
    }

    /// Runs the HTTP server.
    pub async fn run(self) -> anyhow::Result<()> {
        let address = self
            .listener
            .local_addr()
            .context("failed to read listener address")?;
        tracing::info!("listening on http://localhost:{}/", address.port());

        axum::serve(self.listener, self.router)
            .await
            .context("received error from running server")?;

        Ok(())
    }
}
