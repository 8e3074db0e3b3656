//! HTTP request handlers and shared application state.

use crate::api::errors::ApiError;
use crate::api::metrics;
use crate::api::models::*;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use qstock_core::{config, Ohlc, PatternIndex};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state passed to every handler via Axum's `State` extractor.
///
/// The pattern index is built once before the server starts and is read-only
/// afterwards, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<PatternIndex>,
    pub prometheus_handle: PrometheusHandle,
    pub static_dir: PathBuf,
    pub start_time: Instant,
}

fn validate_top_k(top_k: usize) -> Result<(), ApiError> {
    if top_k > config::MAX_TOP_K {
        return Err(ApiError::BadRequest(format!(
            "top_k must be 0-{}",
            config::MAX_TOP_K
        )));
    }
    Ok(())
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        records: state.index.len(),
        qubits: state.index.n_qubits(),
        features: state.index.encoder().feature_names().to_vec(),
    })
}

/// `GET /metrics`
pub async fn metrics_endpoint(State(state): State<AppState>) -> String {
    state.prometheus_handle.render()
}

/// `GET /api/search/pattern`
pub async fn search_pattern(
    State(state): State<AppState>,
    query: Result<Query<PatternQuery>, QueryRejection>,
) -> Result<Json<Vec<MatchResponse>>, ApiError> {
    let Query(req) = query?;
    validate_top_k(req.top_k)?;

    let prices = Ohlc::new(req.open_price, req.high_price, req.low_price, req.close_price);
    if !prices.is_finite() {
        return Err(ApiError::BadRequest("Prices must be finite numbers".into()));
    }

    let matches = state.index.search_by_pattern(&prices, req.top_k)?;
    metrics::record_search_operation("pattern");
    tracing::info!(
        open = prices.open,
        high = prices.high,
        low = prices.low,
        close = prices.close,
        top_k = req.top_k,
        results = matches.len(),
        "Pattern search completed"
    );
    Ok(Json(matches.iter().map(MatchResponse::similarity).collect()))
}

/// `GET /api/search/date`
pub async fn search_date(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<Vec<MatchResponse>>, ApiError> {
    let Query(req) = query?;
    validate_top_k(req.top_k)?;

    let matches = state.index.search_by_date(&req.target_date, req.top_k)?;
    metrics::record_search_operation("date");
    tracing::info!(
        target_date = %req.target_date,
        top_k = req.top_k,
        results = matches.len(),
        "Date search completed"
    );
    Ok(Json(matches.iter().map(MatchResponse::similarity).collect()))
}

/// `GET /api/search/volatility`
pub async fn search_volatility(
    State(state): State<AppState>,
    query: Result<Query<VolatilityQuery>, QueryRejection>,
) -> Result<Json<Vec<MatchResponse>>, ApiError> {
    let Query(req) = query?;
    validate_top_k(req.top_k)?;

    let matches = state.index.search_by_volatility(req.top_k);
    metrics::record_search_operation("volatility");
    tracing::info!(
        top_k = req.top_k,
        results = matches.len(),
        "Volatility ranking completed"
    );
    Ok(Json(matches.iter().map(MatchResponse::variance).collect()))
}

/// `GET /api/dates`
pub async fn list_dates(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.index.dates().into_iter().map(str::to_owned).collect())
}
