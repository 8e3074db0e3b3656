//! # qstock-core
//!
//! Similarity search over precomputed "quantum-encoded" embeddings of daily
//! OHLC stock data.
//!
//! A fitted scaler and an embedding matrix aligned row-for-row with a table of
//! historical trading days are loaded once into an immutable [`PatternIndex`].
//! New price patterns are pushed through the same encoding pipeline that built
//! the matrix (scaling, `arctan` squashing, L2 normalization and a fixed
//! state-vector feature map) and ranked by cosine similarity.
//!
//! ```text
//! OHLC → raw features → scaler → arctan(x)+π/2 → L2 norm → feature map → query
//! query × embedding matrix → cosine scores → stable top-k → historical rows
//! ```
//!
//! This crate has no async dependencies; the HTTP layer lives in `qstock-server`.

/// Global configuration constants: defaults, limits, and circuit parameters.
pub mod config;
/// Error type shared by artifact loading, encoding, and search.
pub mod error;
/// OHLC encoding pipeline: raw features, scaler, and the state-vector feature map.
pub mod encoding;
/// Historical record type: one trading day with its original columns.
pub mod record;
/// Similarity primitives and stable top-k ranking.
pub mod search;
/// Artifact loading and the immutable in-memory pattern index.
pub mod storage;

pub use encoding::{Encoder, Ohlc};
pub use error::CoreError;
pub use record::HistoricalRecord;
pub use search::RankedMatch;
pub use storage::PatternIndex;
