//! Non-Singularity Testing
//!
//! Decides whether a square matrix is invertible using its numerical rank.
//! The rank is the number of singular values above a relative tolerance,
//! which avoids the overflow/underflow a raw determinant runs into for
//! badly scaled matrices.

use ndarray::{ArrayBase, ArrayView2, Data, Dimension, Ix2};
use ndarray_linalg::SVD;

use crate::error::{into_sentinel, CompanionError, CompanionResult};

/// Default tolerance for the numerical rank of an m×n matrix.
///
/// ```text
/// tol = σ_max * max(m, n) * ε
/// ```
///
/// where ε is the machine precision of `f64`. This is the threshold used by
/// LAPACK-based rank routines (and by NumPy's `matrix_rank`).
pub fn default_rank_tolerance(sigma_max: f64, rows: usize, cols: usize) -> f64 {
    sigma_max * (rows.max(cols) as f64) * f64::EPSILON
}

fn validate_matrix<S, D>(a: &ArrayBase<S, D>) -> CompanionResult<ArrayView2<'_, f64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let found = a.ndim();
    let a = a
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| CompanionError::WrongDimensionality { expected: 2, found })?;

    if a.is_empty() {
        return Err(CompanionError::EmptyMatrix);
    }

    if let Some(index) = a.iter().position(|x| !x.is_finite()) {
        return Err(CompanionError::NonFiniteEntry { index });
    }

    Ok(a)
}

/// Computes the numerical rank of a matrix via SVD.
///
/// # Arguments
///
/// * `a` - Two-dimensional, non-empty, finite matrix (need not be square)
/// * `tol` - Singular values `<= tol` count as zero. If None, uses
///   [`default_rank_tolerance`]
///
/// # Returns
///
/// * `Ok(usize)` - Number of singular values strictly greater than the tolerance
/// * `Err(CompanionError)` - If the input is malformed or the SVD fails
///
/// # Examples
///
/// ```
/// use frobenius_rs::singular::matrix_rank;
/// use ndarray::arr2;
///
/// let a = arr2(&[[1.0, 2.0], [2.0, 4.0]]);
/// assert_eq!(matrix_rank(&a, None).unwrap(), 1);
///
/// let b = arr2(&[[1.0, 0.0, 0.0], [0.0, 1e-3, 0.0]]);
/// assert_eq!(matrix_rank(&b, None).unwrap(), 2);
/// assert_eq!(matrix_rank(&b, Some(1e-2)).unwrap(), 1);
/// ```
pub fn matrix_rank<S, D>(a: &ArrayBase<S, D>, tol: Option<f64>) -> CompanionResult<usize>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let a = validate_matrix(a)?;
    rank_of(a, tol)
}

/// Rank of a matrix that already passed [`validate_matrix`].
fn rank_of(a: ArrayView2<'_, f64>, tol: Option<f64>) -> CompanionResult<usize> {
    if let Some(t) = tol {
        if !t.is_finite() || t < 0.0 {
            return Err(CompanionError::InvalidConfig(format!(
                "rank tolerance must be finite and non-negative, got {}",
                t
            )));
        }
    }

    let (_, singular_values, _) = a
        .svd(false, false)
        .map_err(|e| CompanionError::SvdFailed(e.to_string()))?;

    let sigma_max = singular_values.iter().copied().fold(0.0, f64::max);
    let toldef = tol.unwrap_or_else(|| default_rank_tolerance(sigma_max, a.nrows(), a.ncols()));

    let rank = singular_values.iter().filter(|&&s| s > toldef).count();
    tracing::trace!(rank, sigma_max, tol = toldef, "numerical rank");
    Ok(rank)
}

/// Determines whether a square matrix is non-singular.
///
/// The matrix is non-singular iff its numerical rank (see [`matrix_rank`]
/// with the default tolerance) equals its order.
///
/// # Returns
///
/// * `Ok(true)` - Matrix is invertible
/// * `Ok(false)` - Matrix is rank deficient
/// * `Err(CompanionError)` - Input is not 2-D, is empty, is not square,
///   contains NaN/infinity, or the SVD failed
pub fn check_nonsingular<S, D>(a: &ArrayBase<S, D>) -> CompanionResult<bool>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let a = validate_matrix(a)?;

    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(CompanionError::NotSquare { rows, cols });
    }

    Ok(rank_of(a, None)? == rows)
}

/// Non-singularity test with a `None` sentinel for invalid input.
///
/// Sentinel form of [`check_nonsingular`].
///
/// # Examples
///
/// ```
/// use frobenius_rs::is_nonsingular;
/// use ndarray::{arr1, arr2};
///
/// assert_eq!(is_nonsingular(&arr2(&[[0.0, 1.0], [-2.0, 3.0]])), Some(true));
/// assert_eq!(is_nonsingular(&arr2(&[[1.0, 2.0], [2.0, 4.0]])), Some(false));
///
/// // Not square, not 2-D
/// assert_eq!(is_nonsingular(&arr2(&[[1.0, 2.0, 3.0]])), None);
/// assert_eq!(is_nonsingular(&arr1(&[1.0, 2.0])), None);
/// ```
pub fn is_nonsingular<S, D>(a: &ArrayBase<S, D>) -> Option<bool>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    into_sentinel("is_nonsingular", check_nonsingular(a))
}
