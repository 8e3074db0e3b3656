//! Search primitives: cosine similarity, per-row variance, and stable top-k.

/// Stable descending ranking over a score array.
pub mod ranking;
/// Cosine similarity and variance over `f64` slices.
pub mod similarity;
/// Ranked result types.
pub mod types;

pub use ranking::{rank_descending, top_k_descending};
pub use types::{RankedMatch, ScoredIndex};
