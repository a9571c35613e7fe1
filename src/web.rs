//! HTTP hosting boundary
//!
//! Exposes the tool surface as `POST /tools/{name}` with a JSON argument
//! body and a plain-text response. Failing to bind or serve is the single
//! process-fatal condition; everything past startup degrades in-band.

use crate::service::WeatherService;
use crate::tools;
use crate::WeatherServerError;
use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Build the router for the tool surface
pub fn router(service: Arc<WeatherService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tools/{name}", post(call_tool))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(service)
}

/// Bind and serve until shutdown
pub async fn run(service: Arc<WeatherService>, addr: &str) -> Result<()> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("weather tool server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .with_context(|| "Server terminated unexpectedly")?;
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn call_tool(
    State(service): State<Arc<WeatherService>>,
    Path(name): Path<String>,
    body: Option<Json<Value>>,
) -> Response {
    let args = body.map_or_else(|| Value::Object(Default::default()), |Json(value)| value);

    match tools::dispatch(&service, &name, args).await {
        Ok(text) => text.into_response(),
        Err(err @ WeatherServerError::UnknownTool { .. }) => {
            (StatusCode::NOT_FOUND, err.user_message()).into_response()
        }
        Err(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.user_message()).into_response(),
    }
}
