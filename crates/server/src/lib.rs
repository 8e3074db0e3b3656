//! qstock-server — HTTP server for quantum-encoded stock pattern search.
//!
//! Provides the REST API and static front-end serving.
//! Encoding and ranking live in `qstock-core`.

/// REST API layer: Axum router, HTTP handlers, models, metrics.
pub mod api;
