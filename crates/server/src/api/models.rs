//! Query parameters and response bodies for the REST API.

use qstock_core::config;
use qstock_core::RankedMatch;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys appended to every result row; stored columns with these names are replaced.
const RESULT_KEYS: [&str; 3] = ["Rank", "Similarity", "Variance"];

/// Query string for `GET /api/search/pattern`.
#[derive(Debug, Deserialize)]
pub struct PatternQuery {
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

/// Query string for `GET /api/search/date`.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// Date in `YYYY-MM-DD` form.
    pub target_date: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

/// Query string for `GET /api/search/volatility`.
#[derive(Debug, Deserialize)]
pub struct VolatilityQuery {
    #[serde(default = "default_volatility_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    config::DEFAULT_TOP_K
}
fn default_volatility_top_k() -> usize {
    config::DEFAULT_VOLATILITY_TOP_K
}

/// One result row: every stored column of the matched day plus its rank and score.
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    #[serde(flatten)]
    pub columns: Map<String, Value>,
    #[serde(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Similarity", skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(rename = "Variance", skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
}

impl MatchResponse {
    fn base(m: &RankedMatch<'_>) -> Self {
        let mut columns = m.record.columns().clone();
        columns.retain(|k, _| !RESULT_KEYS.contains(&k.as_str()));
        Self {
            columns,
            rank: m.rank,
            similarity: None,
            variance: None,
        }
    }

    /// Row for pattern and date search.
    pub fn similarity(m: &RankedMatch<'_>) -> Self {
        Self {
            similarity: Some(m.score),
            ..Self::base(m)
        }
    }

    /// Row for the volatility ranking.
    pub fn variance(m: &RankedMatch<'_>) -> Self {
        Self {
            variance: Some(m.score),
            ..Self::base(m)
        }
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub records: usize,
    pub qubits: usize,
    pub features: Vec<String>,
}
