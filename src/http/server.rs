//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, body limit)
//! - Serve page documents and static files from the base directory
//! - Relay POST bodies to the ingest endpoint and redirect to /
//!
//! # Design Decisions
//! - One file read per request; nothing else is buffered
//! - A missing page document answers 500, never a handler panic
//! - Relay failure is logged and swallowed: the browser still gets its 302

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::HttpConfig;
use crate::http::static_files::{guess_content_type, sanitize_request_path};
use crate::relay::RelayClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub base_dir: Arc<PathBuf>,
    pub relay: RelayClient,
}

/// HTTP server for the form front-end.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &HttpConfig, relay: RelayClient) -> Self {
        let state = AppState {
            base_dir: Arc::new(config.base_dir.clone()),
            relay,
        };
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &HttpConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(index).post(submit))
            .route("/message", get(message_page).post(submit))
            .fallback(dispatch)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// GET / — the index page.
async fn index(State(state): State<AppState>) -> Response {
    serve_page(&state.base_dir, "index.html", StatusCode::OK).await
}

/// GET /message — the form page.
async fn message_page(State(state): State<AppState>) -> Response {
    serve_page(&state.base_dir, "message.html", StatusCode::OK).await
}

/// POST on any path — relay the body, redirect home.
async fn submit(State(state): State<AppState>, body: Bytes) -> Response {
    relay_and_redirect(&state, body).await
}

/// Fallback for paths without an explicit route.
async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    match method {
        Method::GET => serve_static(&state, uri.path()).await,
        Method::POST => relay_and_redirect(&state, body).await,
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

async fn relay_and_redirect(state: &AppState, body: Bytes) -> Response {
    if body.is_empty() {
        tracing::warn!("POST without a body rejected");
        return StatusCode::BAD_REQUEST.into_response();
    }

    // Fire-and-forget: a lost datagram is an accepted mode, the client
    // is redirected either way.
    if let Err(e) = state.relay.send(&body).await {
        tracing::warn!(error = %e, "Relay send failed, submission dropped");
    }

    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

/// Serve one of the page documents with the given status.
async fn serve_page(base_dir: &Path, name: &str, status: StatusCode) -> Response {
    match tokio::fs::read(base_dir.join(name)).await {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, "text/html")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(page = name, error = %e, "Page document unreadable");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Resolve and serve a static file, or the 404 page.
async fn serve_static(state: &AppState, path: &str) -> Response {
    let Some(relative) = sanitize_request_path(path) else {
        return not_found(&state.base_dir).await;
    };
    let file = state.base_dir.join(relative);

    match tokio::fs::metadata(&file).await {
        Ok(meta) if meta.is_file() => match tokio::fs::read(&file).await {
            Ok(body) => {
                let content_type = guess_content_type(&file);
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, content_type)],
                    body,
                )
                    .into_response()
            }
            Err(e) => {
                tracing::error!(file = %file.display(), error = %e, "Static file unreadable");
                not_found(&state.base_dir).await
            }
        },
        _ => not_found(&state.base_dir).await,
    }
}

async fn not_found(base_dir: &Path) -> Response {
    serve_page(base_dir, "error.html", StatusCode::NOT_FOUND).await
}
