//! Vector math for cosine similarity.

use thiserror::Error;

use crate::constants::MIN_EMBEDDING_NORM;

/// Why a vector could not be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VectorError {
    /// Norm is zero (or too small to divide by), or the vector holds NaN/inf.
    #[error("vector has zero or non-finite norm")]
    Degenerate,
    /// The two vectors have different lengths.
    #[error("vector length mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Euclidean norm, accumulated in f64.
pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|&x| f64::from(x))
        .fold(0.0_f64, |acc, x| x.mul_add(x, acc))
        .sqrt()
}

/// Returns `v / ||v||`. Fails instead of dividing by zero.
pub fn l2_normalize(v: &[f32]) -> Result<Vec<f32>, VectorError> {
    let norm = l2_norm(v);
    if !norm.is_finite() || norm <= f64::from(MIN_EMBEDDING_NORM) {
        return Err(VectorError::Degenerate);
    }
    Ok(v.iter().map(|&x| (f64::from(x) / norm) as f32).collect())
}

/// Dot product, accumulated in f64.
pub fn dot(a: &[f32], b: &[f32]) -> Result<f32, VectorError> {
    if a.len() != b.len() {
        return Err(VectorError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let sum = a
        .iter()
        .zip(b)
        .fold(0.0_f64, |acc, (&x, &y)| f64::from(x).mul_add(f64::from(y), acc));
    Ok(sum as f32)
}

/// Cosine similarity of two raw vectors, clamped to `[-1, 1]`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, VectorError> {
    if a.len() != b.len() {
        return Err(VectorError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let a = l2_normalize(a)?;
    let b = l2_normalize(b)?;
    Ok(dot(&a, &b)?.clamp(-1.0, 1.0))
}
