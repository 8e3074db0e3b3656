//! Immutable pattern index.
//!
//! Holds the historical table, the embedding matrix (a flat row-major arena,
//! `rows × n_qubits`), precomputed row norms, a date lookup and the encoder.
//! Row `i` of the table and row `i` of the matrix are the same trading day.

use crate::encoding::{Encoder, Ohlc, StandardScaler};
use crate::error::CoreError;
use crate::record::HistoricalRecord;
use crate::search::similarity::{cosine_prenorm, norm, variance};
use crate::search::{rank_descending, top_k_descending, RankedMatch, ScoredIndex};
use crate::storage::artifacts::{load_bundle, load_scaler, FeatureBundle};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug)]
pub struct PatternIndex {
    records: Vec<HistoricalRecord>,
    dimension: usize,
    vector_data: Vec<f64>,
    norms: Vec<f64>,
    date_index: HashMap<String, usize>,
    encoder: Encoder,
}

impl PatternIndex {
    /// Reads both artifact files and builds the index.
    pub fn open(scaler_path: &Path, features_path: &Path) -> Result<Self, CoreError> {
        let scaler = load_scaler(scaler_path)?;
        let bundle = load_bundle(features_path)?;
        Self::from_artifacts(scaler, bundle)
    }

    /// Validates parsed artifacts against each other and builds the index.
    pub fn from_artifacts(
        scaler: StandardScaler,
        bundle: FeatureBundle,
    ) -> Result<Self, CoreError> {
        let FeatureBundle {
            quantum_features,
            feature_names,
            n_qubits,
            records,
        } = bundle;

        let encoder = Encoder::new(feature_names, scaler, n_qubits)?;

        if quantum_features.len() != records.len() {
            return Err(CoreError::InvalidArtifact(format!(
                "{} embedding rows but {} historical records",
                quantum_features.len(),
                records.len()
            )));
        }

        let mut vector_data = Vec::with_capacity(quantum_features.len() * n_qubits);
        for (i, row) in quantum_features.iter().enumerate() {
            if row.len() != n_qubits {
                return Err(CoreError::InvalidArtifact(format!(
                    "embedding row {} has length {}, expected {}",
                    i,
                    row.len(),
                    n_qubits
                )));
            }
            vector_data.extend_from_slice(row);
        }
        let norms = quantum_features.iter().map(|r| norm(r)).collect();

        let records = records
            .into_iter()
            .map(HistoricalRecord::from_columns)
            .collect::<Result<Vec<_>, _>>()?;

        let mut date_index = HashMap::with_capacity(records.len());
        let mut duplicates = 0usize;
        for (i, rec) in records.iter().enumerate() {
            if date_index.contains_key(rec.date()) {
                duplicates += 1;
            } else {
                date_index.insert(rec.date().to_string(), i);
            }
        }
        if duplicates > 0 {
            tracing::warn!(
                duplicates,
                "Duplicate dates in historical table; lookups use the first row"
            );
        }

        let zero_filled = encoder.zero_filled_features();
        if !zero_filled.is_empty() {
            tracing::warn!(
                features = ?zero_filled,
                "Features without a single-day derivation are zero-filled for pattern queries"
            );
        }

        tracing::info!(
            records = records.len(),
            n_qubits,
            features = ?encoder.feature_names(),
            "Pattern index ready"
        );

        Ok(Self {
            records,
            dimension: n_qubits,
            vector_data,
            norms,
            date_index,
            encoder,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn n_qubits(&self) -> usize {
        self.dimension
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Stored embedding of row `index`.
    pub fn embedding(&self, index: usize) -> &[f64] {
        let start = index * self.dimension;
        &self.vector_data[start..start + self.dimension]
    }

    /// Row index of the first record with exactly this date.
    pub fn find_date(&self, date: &str) -> Option<usize> {
        self.date_index.get(date).copied()
    }

    /// Every date in table order.
    pub fn dates(&self) -> Vec<&str> {
        self.records.iter().map(HistoricalRecord::date).collect()
    }

    fn cosine_scores(&self, query: &[f64]) -> Vec<f64> {
        let query_norm = norm(query);
        (0..self.len())
            .map(|i| cosine_prenorm(query, query_norm, self.embedding(i), self.norms[i]))
            .collect()
    }

    fn attach(&self, scored: impl IntoIterator<Item = ScoredIndex>) -> Vec<RankedMatch<'_>> {
        scored
            .into_iter()
            .enumerate()
            .map(|(i, s)| RankedMatch {
                rank: i + 1,
                index: s.index,
                score: s.score,
                record: &self.records[s.index],
            })
            .collect()
    }

    /// Ranks every row by cosine similarity to `query`.
    pub fn search_by_vector(
        &self,
        query: &[f64],
        top_k: usize,
    ) -> Result<Vec<RankedMatch<'_>>, CoreError> {
        if query.len() != self.dimension {
            return Err(CoreError::Encoding(format!(
                "query has dimension {}, expected {}",
                query.len(),
                self.dimension
            )));
        }
        Ok(self.attach(top_k_descending(&self.cosine_scores(query), top_k)))
    }

    /// Encodes `prices` and returns the `top_k` most similar historical days.
    pub fn search_by_pattern(
        &self,
        prices: &Ohlc,
        top_k: usize,
    ) -> Result<Vec<RankedMatch<'_>>, CoreError> {
        let query = self.encoder.encode(prices)?;
        self.search_by_vector(&query, top_k)
    }

    /// Uses the stored embedding of `date` as the query and returns the
    /// `top_k` most similar other days. The query row itself is never returned.
    pub fn search_by_date(
        &self,
        date: &str,
        top_k: usize,
    ) -> Result<Vec<RankedMatch<'_>>, CoreError> {
        let target = self
            .find_date(date)
            .ok_or_else(|| CoreError::DateNotFound(date.to_string()))?;
        let scores = self.cosine_scores(self.embedding(target));
        let ranked = rank_descending(&scores)
            .into_iter()
            .filter(|s| s.index != target)
            .take(top_k);
        Ok(self.attach(ranked))
    }

    /// Days whose embedding components have the highest variance.
    pub fn search_by_volatility(&self, top_k: usize) -> Vec<RankedMatch<'_>> {
        let variances: Vec<f64> = (0..self.len())
            .map(|i| variance(self.embedding(i)))
            .collect();
        self.attach(top_k_descending(&variances, top_k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    const NAMES: [&str; 4] = ["Open", "High", "Low", "Close"];

    fn record(date: &str, o: f64, h: f64, l: f64, c: f64) -> Map<String, Value> {
        match json!({ "Date": date, "Open": o, "High": h, "Low": l, "Close": c }) {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    fn scaler() -> StandardScaler {
        StandardScaler::new(
            Some(vec![100.0, 103.0, 97.0, 100.0]),
            Some(vec![4.0, 4.0, 4.0, 4.0]),
        )
    }

    /// Builds a bundle whose matrix is the encoder's own output for each row.
    fn encoded_bundle(days: &[(&str, [f64; 4])]) -> FeatureBundle {
        let names: Vec<String> = NAMES.iter().map(|s| s.to_string()).collect();
        let encoder = Encoder::new(names.clone(), scaler(), 4).unwrap();
        FeatureBundle {
            quantum_features: days
                .iter()
                .map(|(_, p)| encoder.encode(&Ohlc::new(p[0], p[1], p[2], p[3])).unwrap())
                .collect(),
            feature_names: names,
            n_qubits: 4,
            records: days
                .iter()
                .map(|(d, p)| record(d, p[0], p[1], p[2], p[3]))
                .collect(),
        }
    }

    fn sample_index() -> PatternIndex {
        let days = [
            ("2023-01-03", [100.0, 105.0, 99.0, 103.0]),
            ("2023-01-04", [103.0, 104.0, 98.0, 99.0]),
            ("2023-01-05", [99.0, 101.0, 95.0, 96.0]),
            ("2023-01-06", [96.0, 102.0, 96.0, 101.0]),
            ("2023-01-09", [101.0, 108.0, 100.0, 107.0]),
            ("2023-01-10", [107.0, 107.5, 103.0, 104.0]),
            ("2023-01-11", [104.0, 104.0, 104.0, 104.0]),
        ];
        PatternIndex::from_artifacts(scaler(), encoded_bundle(&days)).unwrap()
    }

    #[test]
    fn test_pattern_search_finds_identical_day_first() {
        let idx = sample_index();
        let results = idx
            .search_by_pattern(&Ohlc::new(101.0, 108.0, 100.0, 107.0), 3)
            .unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].record.date(), "2023-01-09");
        assert!((results[0].score - 1.0).abs() < 1e-9);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn test_pattern_search_flat_day_top1() {
        let idx = sample_index();
        let results = idx
            .search_by_pattern(&Ohlc::new(100.0, 100.0, 100.0, 100.0), 1)
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].rank, 1);
        assert!((-1.0..=1.0).contains(&results[0].score));
    }

    #[test]
    fn test_pattern_search_top_k_bounds() {
        let idx = sample_index();
        let p = Ohlc::new(100.0, 101.0, 99.0, 100.0);
        assert!(idx.search_by_pattern(&p, 0).unwrap().is_empty());
        assert_eq!(idx.search_by_pattern(&p, 100).unwrap().len(), idx.len());
    }

    #[test]
    fn test_date_search_excludes_query_row() {
        let idx = sample_index();
        let results = idx.search_by_date("2023-01-03", 3).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.record.date() != "2023-01-03"));
        assert_eq!(results[0].rank, 1);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_date_search_all_others() {
        let idx = sample_index();
        let results = idx.search_by_date("2023-01-06", 50).unwrap();
        assert_eq!(results.len(), idx.len() - 1);
    }

    #[test]
    fn test_date_search_unknown_date() {
        let idx = sample_index();
        let err = idx.search_by_date("1999-12-31", 3).unwrap_err();
        assert!(matches!(err, CoreError::DateNotFound(ref d) if d == "1999-12-31"));
        assert_eq!(err.to_string(), "Date 1999-12-31 not found in dataset.");
    }

    #[test]
    fn test_date_search_excludes_self_even_with_identical_earlier_row() {
        let days = [
            ("2023-02-01", [100.0, 102.0, 98.0, 101.0]),
            ("2023-02-02", [100.0, 102.0, 98.0, 101.0]),
            ("2023-02-03", [90.0, 99.0, 88.0, 97.0]),
        ];
        let idx = PatternIndex::from_artifacts(scaler(), encoded_bundle(&days)).unwrap();
        let results = idx.search_by_date("2023-02-02", 2).unwrap();
        assert_eq!(results[0].record.date(), "2023-02-01");
        assert!(results.iter().all(|r| r.index != 1));
    }

    #[test]
    fn test_volatility_ranking() {
        let bundle = FeatureBundle {
            quantum_features: vec![
                vec![0.0, 0.0, 0.0, 0.0],
                vec![1.0, -1.0, 1.0, -1.0],
                vec![0.5, -0.5, 0.5, -0.5],
                vec![1.0, -1.0, 1.0, -1.0],
            ],
            feature_names: NAMES.iter().map(|s| s.to_string()).collect(),
            n_qubits: 4,
            records: vec![
                record("d0", 1.0, 1.0, 1.0, 1.0),
                record("d1", 1.0, 1.0, 1.0, 1.0),
                record("d2", 1.0, 1.0, 1.0, 1.0),
                record("d3", 1.0, 1.0, 1.0, 1.0),
            ],
        };
        let idx = PatternIndex::from_artifacts(scaler(), bundle).unwrap();
        let results = idx.search_by_volatility(3);
        let order: Vec<usize> = results.iter().map(|r| r.index).collect();
        assert_eq!(order, [1, 3, 2]);
        assert!((results[0].score - 1.0).abs() < 1e-12);
        assert!((results[2].score - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_dates_in_table_order() {
        let idx = sample_index();
        let dates = idx.dates();
        assert_eq!(dates.len(), idx.len());
        assert_eq!(dates[0], "2023-01-03");
        assert_eq!(dates[6], "2023-01-11");
    }

    #[test]
    fn test_duplicate_dates_resolve_to_first_row() {
        let bundle = encoded_bundle(&[
            ("2023-03-01", [1.0, 2.0, 0.5, 1.5]),
            ("2023-03-01", [2.0, 3.0, 1.5, 2.5]),
        ]);
        let idx = PatternIndex::from_artifacts(scaler(), bundle).unwrap();
        assert_eq!(idx.find_date("2023-03-01"), Some(0));
        assert_eq!(idx.dates().len(), 2);
    }

    #[test]
    fn test_rejects_misaligned_artifacts() {
        let mut bundle = encoded_bundle(&[("2023-01-03", [1.0, 2.0, 0.5, 1.5])]);
        bundle.records.push(record("2023-01-04", 1.0, 1.0, 1.0, 1.0));
        assert!(matches!(
            PatternIndex::from_artifacts(scaler(), bundle),
            Err(CoreError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_row_width() {
        let mut bundle = encoded_bundle(&[("2023-01-03", [1.0, 2.0, 0.5, 1.5])]);
        bundle.quantum_features[0].pop();
        let err = PatternIndex::from_artifacts(scaler(), bundle).unwrap_err();
        assert!(err.to_string().contains("length 3, expected 4"));
    }

    #[test]
    fn test_rejects_scaler_width_mismatch() {
        let bundle = encoded_bundle(&[("2023-01-03", [1.0, 2.0, 0.5, 1.5])]);
        let narrow = StandardScaler::new(Some(vec![0.0; 3]), Some(vec![1.0; 3]));
        assert!(PatternIndex::from_artifacts(narrow, bundle).is_err());
    }

    #[test]
    fn test_search_by_vector_dimension_check() {
        let idx = sample_index();
        assert!(idx.search_by_vector(&[1.0, 0.0], 1).is_err());
    }
}
