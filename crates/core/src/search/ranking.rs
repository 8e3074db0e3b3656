//! Stable descending ranking.
//!
//! Equal scores keep their original row order, so the first-occurring index
//! wins a tie. NaN scores sort after every number.

use crate::search::types::ScoredIndex;
use std::cmp::Ordering;

fn cmp_descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Every index of `scores`, highest score first.
pub fn rank_descending(scores: &[f64]) -> Vec<ScoredIndex> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // sort_by is stable
    order.sort_by(|&a, &b| cmp_descending(scores[a], scores[b]));
    order
        .into_iter()
        .map(|index| ScoredIndex {
            index,
            score: scores[index],
        })
        .collect()
}

/// The `k` highest-scoring indices, highest first.
pub fn top_k_descending(scores: &[f64], k: usize) -> Vec<ScoredIndex> {
    let mut ranked = rank_descending(scores);
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(r: &[ScoredIndex]) -> Vec<usize> {
        r.iter().map(|s| s.index).collect()
    }

    #[test]
    fn test_descending_order() {
        let r = rank_descending(&[0.1, 0.9, -0.5, 0.4]);
        assert_eq!(indices(&r), [1, 3, 0, 2]);
        assert!(r.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_first_index() {
        let r = rank_descending(&[0.5, 1.0, 0.5, 1.0, 0.5]);
        assert_eq!(indices(&r), [1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_negative_zero_ties_with_zero() {
        let r = rank_descending(&[-0.0, 0.0]);
        assert_eq!(indices(&r), [0, 1]);
    }

    #[test]
    fn test_nan_sorts_last() {
        let r = rank_descending(&[f64::NAN, 0.2, f64::NAN, -1.0]);
        assert_eq!(indices(&r), [1, 3, 0, 2]);
    }

    #[test]
    fn test_top_k_truncates() {
        let scores = [0.3, 0.2, 0.1];
        assert_eq!(top_k_descending(&scores, 2).len(), 2);
        assert_eq!(top_k_descending(&scores, 10).len(), 3);
        assert!(top_k_descending(&scores, 0).is_empty());
        assert!(top_k_descending(&[], 5).is_empty());
    }
}
