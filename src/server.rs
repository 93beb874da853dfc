//! HTTP server for the bookmarks API.
//!
//! Routes requests to `http_handler` and converts its replies into axum
//! responses. Bodies are read as raw bytes so malformed JSON still gets the
//! standard error envelope.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::http_handler::{self, ApiResponse};
use crate::services::BookmarkService;
use crate::types::errors::ConfigError;

/// Builds the router with every bookmark route.
pub fn router(service: BookmarkService, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/bookmarks", get(list).post(create).fallback(method_not_allowed))
        .route(
            "/bookmarks/:id",
            get(fetch).patch(update).delete(remove).fallback(method_not_allowed),
        )
        .fallback(unknown_route)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Binds the configured address and serves until Ctrl-C or SIGTERM.
pub async fn serve(app: App) -> Result<(), ConfigError> {
    let listener = tokio::net::TcpListener::bind(app.config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "bookmarks server listening");

    axum::serve(listener, router(app.service, app.config.max_body_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("bookmarks server stopped");
    Ok(())
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}

fn into_response(reply: ApiResponse) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = match reply.body {
        Some(body) => (status, Json(body)).into_response(),
        None => status.into_response(),
    };
    if let Some(location) = reply.location {
        if let Ok(value) = HeaderValue::from_str(&location) {
            response.headers_mut().insert(header::LOCATION, value);
        }
    }
    response
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn list(State(service): State<BookmarkService>) -> Response {
    into_response(http_handler::list_bookmarks(&service).await)
}

async fn fetch(State(service): State<BookmarkService>, Path(id): Path<String>) -> Response {
    into_response(http_handler::get_bookmark(&service, &id).await)
}

async fn create(
    State(service): State<BookmarkService>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejected(rejection),
    };
    let reply = match http_handler::parse_body(&body) {
        Ok(value) => http_handler::create_bookmark(&service, &value).await,
        Err(err) => ApiResponse::from_error(&err),
    };
    into_response(reply)
}

async fn update(
    State(service): State<BookmarkService>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejected(rejection),
    };
    let reply = match http_handler::parse_body(&body) {
        Ok(value) => http_handler::update_bookmark(&service, &id, &value).await,
        Err(err) => ApiResponse::from_error(&err),
    };
    into_response(reply)
}

async fn remove(State(service): State<BookmarkService>, Path(id): Path<String>) -> Response {
    into_response(http_handler::delete_bookmark(&service, &id).await)
}

async fn unknown_route() -> Response {
    (StatusCode::NOT_FOUND, Json(http_handler::error_body("Not found"))).into_response()
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(http_handler::error_body("Method not allowed")),
    )
        .into_response()
}

/// Body could not be read, usually because it exceeds the configured limit.
fn body_rejected(rejection: BytesRejection) -> Response {
    let status = rejection.status();
    let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "Request body is too large".to_string()
    } else {
        rejection.body_text()
    };
    tracing::warn!(status = %status, error = %rejection, "rejected request body");
    (status, Json(http_handler::error_body(&message))).into_response()
}
