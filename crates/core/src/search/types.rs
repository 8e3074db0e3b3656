//! Ranked result types.

use crate::record::HistoricalRecord;

/// A row index paired with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredIndex {
    pub index: usize,
    pub score: f64,
}

/// A historical record returned by a search, with its 1-based rank.
///
/// The `score` semantics depend on the search type:
/// - **Pattern / date search**: cosine similarity in \[-1, 1\]
/// - **Volatility ranking**: population variance of the embedding components
#[derive(Debug, Clone)]
pub struct RankedMatch<'a> {
    /// 1-based position in the result list.
    pub rank: usize,
    /// Row index into the historical table and the embedding matrix.
    pub index: usize,
    pub score: f64,
    pub record: &'a HistoricalRecord,
}
