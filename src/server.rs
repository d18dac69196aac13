//! HTTP surface for the forecast pipeline.
//!
//! The router is built here, separate from the binary, so tests can drive
//! it in-process. `POST /forecast` accepts a multipart form with a `file`
//! part and optional `period` and `interval` text parts; `GET /health` is a
//! fixed liveness probe.

use crate::error::Error;
use crate::models::{SeasonalTrend, SharedForecaster};
use crate::pipeline::{self, ForecastOptions, ForecastResult};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Largest accepted upload, in bytes.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Shared handler state: the forecasting capability behind the endpoint.
#[derive(Clone)]
pub struct AppState {
    forecaster: SharedForecaster,
}

impl AppState {
    pub fn new(forecaster: SharedForecaster) -> Self {
        Self { forecaster }
    }
}

impl Default for AppState {
    /// The production configuration: the in-crate seasonal-trend model.
    fn default() -> Self {
        Self::new(Arc::new(SeasonalTrend::new()))
    }
}

/// Build the service router with CORS open to any origin and request
/// tracing enabled.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/forecast", post(forecast))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

async fn forecast(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ForecastResult>, ApiError> {
    let mut file: Option<Vec<u8>> = None;
    let mut options = ForecastOptions::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(format!("malformed multipart body: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field.bytes().await.map_err(|err| {
                    ApiError::bad_request(format!("failed to read upload: {err}"))
                })?;
                file = Some(bytes.to_vec());
            }
            "period" => {
                let text = field.text().await.map_err(|err| {
                    ApiError::bad_request(format!("failed to read period: {err}"))
                })?;
                options.horizon = text.trim().parse().map_err(|_| {
                    ApiError::bad_request(format!(
                        "period must be a whole number of days, got {text:?}"
                    ))
                })?;
            }
            "interval" => {
                let text = field.text().await.map_err(|err| {
                    ApiError::bad_request(format!("failed to read interval: {err}"))
                })?;
                options.interval_width = text.trim().parse().map_err(|_| {
                    ApiError::bad_request(format!("interval must be a number, got {text:?}"))
                })?;
            }
            // Unknown parts are ignored.
            _ => {}
        }
    }

    let bytes = file.ok_or_else(|| ApiError::bad_request("missing file field".to_string()))?;

    // Model fitting is CPU-bound; keep it off the async workers.
    let forecaster = state.forecaster.clone();
    let outcome =
        tokio::task::spawn_blocking(move || pipeline::run_csv(&bytes, options, forecaster.as_ref()))
            .await
            .map_err(|err| ApiError::internal(format!("forecast task failed: {err}")))?;

    match outcome {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            tracing::warn!(error = %err, "forecast request failed");
            Err(ApiError::from(err))
        }
    }
}

/// Error envelope returned by every failing handler.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    fn internal(message: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl From<Error> for ApiError {
    /// Validation failures are the caller's problem; everything else is a
    /// server-side failure.
    fn from(err: Error) -> Self {
        let status = match err {
            Error::InsufficientHistory { .. }
            | Error::InvalidHorizon(_)
            | Error::InvalidIntervalWidth(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}
