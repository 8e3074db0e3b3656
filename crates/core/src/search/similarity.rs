//! Similarity and dispersion measures over `f64` vectors.
//!
//! Cosine follows the convention of normalizing each side first: a zero-norm
//! vector has similarity 0 with everything, including itself.

/// Dot product of two equal-length slices.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm.
#[inline]
pub fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Cosine similarity in \[-1, 1\] with both norms precomputed.
#[inline]
pub fn cosine_prenorm(a: &[f64], a_norm: f64, b: &[f64], b_norm: f64) -> f64 {
    if a_norm == 0.0 || b_norm == 0.0 {
        return 0.0;
    }
    dot(a, b) / (a_norm * b_norm)
}

/// Population variance (`ddof = 0`); 0 for an empty slice.
pub fn variance(a: &[f64]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let n = a.len() as f64;
    let mean = a.iter().sum::<f64>() / n;
    a.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n
}
