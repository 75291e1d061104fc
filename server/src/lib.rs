//! HTTP front end for the todo service.
//!
//! # Overview
//! One path, `/todos`, routed by method: POST creates a todo, PUT updates
//! one, every other method is 405. Handlers decode and validate the JSON
//! body, call the injected `TodoService`, and map its errors onto status
//! codes.
//!
//! # Design
//! - The service is constructed once by the caller and shared as an `Arc`;
//!   this layer keeps no state of its own.
//! - Middleware: request id (UUID v4, echoed in `x-request-id`), a trace
//!   span per request, and a request timeout.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod store;

use std::{future::Future, sync::Arc};

use axum::{
    http::{Request, StatusCode},
    routing::any,
    Router,
};
use todo_core::TodoService;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use config::{Config, ConfigError};
pub use error::{ApiError, Operation};
pub use handler::TodoHandler;
pub use store::MemoryStore;

pub const TODOS_PATH: &str = "/todos";

/// Router with only the dispatcher, no middleware.
pub fn router<S: TodoService>(svc: Arc<S>) -> Router {
    Router::new()
        .route(TODOS_PATH, any(dispatch::dispatch::<S>))
        .with_state(TodoHandler::new(svc))
}

/// Full application: dispatcher plus tracing, request id and timeout layers.
pub fn app<S: TodoService>(svc: Arc<S>, config: &Config) -> Router {
    router(svc)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<axum::body::Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Serve until Ctrl+C.
pub async fn run<S: TodoService>(
    listener: TcpListener,
    svc: Arc<S>,
    config: &Config,
) -> Result<(), std::io::Error> {
    serve(listener, svc, config, shutdown_signal()).await
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<S, F>(
    listener: TcpListener,
    svc: Arc<S>,
    config: &Config,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    S: TodoService,
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, app(svc, config))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
