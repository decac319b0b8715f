//! HTTP resource router for the `videos` collection.
//!
//! Requires the `server` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET    /api/videos`     — all videos, unordered.
//! - `POST   /api/videos`     — create from `{ title, description }`; returns the record with `_id`.
//! - `GET    /api/videos/:id` — one video, or 404.
//! - `PUT    /api/videos/:id` — replace title/description; returns `{ matched, modified }`, or 404.
//! - `DELETE /api/videos/:id` — returns `{ removed }`, or 404.
//! - `GET    /health`         — `{ "ok": true, "videos": <count> }`.
//!
//! Errors are returned as `{ "error": "..." }` with a matching status code,
//! including the 408 produced when a request outlives its timeout.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vidzy::{api, store::InMemoryDocumentStore, Config};
//!
//! let app = api::router(Arc::new(InMemoryDocumentStore::new()));
//!
//! // Or serve directly with tracing, timeout and graceful shutdown
//! api::serve(Arc::new(InMemoryDocumentStore::new()), &Config::load()).await?;
//! ```

mod error;
mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::store::DocumentStore;

pub use error::ApiError;

/// Shared handler state: the injected document store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

/// Build an axum `Router` exposing the video resource over `store`.
pub fn router(store: Arc<dyn DocumentStore>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/videos",
            get(handlers::list_videos).post(handlers::create_video),
        )
        .route(
            "/api/videos/:id",
            get(handlers::get_video)
                .put(handlers::update_video)
                .delete(handlers::delete_video),
        )
        .with_state(AppState { store })
}

/// `router` with a per-request timeout whose 408 carries an error body.
pub fn app(store: Arc<dyn DocumentStore>, request_timeout: Duration) -> Router {
    router(store)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(map_response(timeout_body))
}

async fn timeout_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::Timeout.into_response();
    }
    response
}

/// Serve the resource router at `config.addr` until Ctrl+C or SIGTERM.
pub async fn serve(store: Arc<dyn DocumentStore>, config: &Config) -> Result<(), std::io::Error> {
    let app = app(store, config.request_timeout).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.addr).await?;
    info!("vidzy listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
