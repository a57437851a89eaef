//! Companion Matrices - Frobenius Form
//!
//! This module builds the Frobenius companion matrix of a real polynomial.
//! The eigenvalues of the companion matrix are exactly the zeros of the
//! polynomial, which is what the root estimator in [`crate::roots`] relies on.
//!
//! Coefficients are always given in **decreasing** powers of x:
//!
//! ```text
//! P(x) = c[0]*xⁿ + c[1]*xⁿ⁻¹ + ... + c[n-1]*x + c[n]
//! ```

use ndarray::{Array2, ArrayBase, ArrayView1, Data, Dimension, Ix1};

use crate::error::{into_sentinel, CompanionError, CompanionResult};

/// Checks that an array is a usable coefficient vector.
///
/// A usable vector is one-dimensional, has at least two entries (degree >= 1),
/// contains only finite values, and has a non-zero leading coefficient.
///
/// # Arguments
///
/// * `coef` - Array of any dimensionality holding the candidate coefficients
///
/// # Returns
///
/// * `Ok(ArrayView1<f64>)` - A 1-D view of the same data
/// * `Err(CompanionError)` - The first violated condition, checked in the
///   order dimensionality, length, finiteness, leading coefficient
///
/// # Examples
///
/// ```
/// use frobenius_rs::frobenius::validate_coefficients;
/// use frobenius_rs::CompanionError;
/// use ndarray::{arr1, arr2};
///
/// assert!(validate_coefficients(&arr1(&[1.0, -3.0, 2.0])).is_ok());
/// assert_eq!(
///     validate_coefficients(&arr1(&[0.0, 1.0, 2.0])),
///     Err(CompanionError::ZeroLeadingCoefficient)
/// );
/// assert!(validate_coefficients(&arr2(&[[1.0, 2.0]])).is_err());
/// ```
pub fn validate_coefficients<S, D>(coef: &ArrayBase<S, D>) -> CompanionResult<ArrayView1<'_, f64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let found = coef.ndim();
    let coef = coef
        .view()
        .into_dimensionality::<Ix1>()
        .map_err(|_| CompanionError::WrongDimensionality { expected: 1, found })?;

    if coef.len() < 2 {
        return Err(CompanionError::TooFewCoefficients(coef.len()));
    }

    if let Some(index) = coef.iter().position(|c| !c.is_finite()) {
        return Err(CompanionError::NonFiniteEntry { index });
    }

    if coef[0] == 0.0 {
        return Err(CompanionError::ZeroLeadingCoefficient);
    }

    Ok(coef)
}

/// Builds the Frobenius companion matrix of a polynomial.
///
/// For N coefficients (degree n = N-1) the result is the n×n matrix
///
/// ```text
/// [   0      1      0    ...    0   ]
/// [   0      0      1    ...    0   ]
/// [  ...                       ...  ]
/// [   0      0      0    ...    1   ]
/// [ -a[n] -a[n-1] -a[n-2] ... -a[1] ]
/// ```
///
/// where `a[k] = c[k] / c[0]` are the coefficients normalized to a monic
/// polynomial. Its characteristic polynomial is `P(x) / c[0]`.
///
/// # Arguments
///
/// * `coef` - Coefficients in decreasing powers of x
///
/// # Returns
///
/// * `Ok(Array2<f64>)` - The n×n companion matrix
/// * `Err(CompanionError)` - If [`validate_coefficients`] rejects the input,
///   or a ratio `c[k] / c[0]` overflows
///
/// # Examples
///
/// ```
/// use frobenius_rs::frobenius::companion_matrix;
/// use ndarray::{arr1, arr2};
///
/// // P(x) = x² - 3x + 2 = (x - 1)(x - 2)
/// let a = companion_matrix(&arr1(&[1.0, -3.0, 2.0])).unwrap();
/// assert_eq!(a, arr2(&[[0.0, 1.0], [-2.0, 3.0]]));
/// ```
pub fn companion_matrix<S, D>(coef: &ArrayBase<S, D>) -> CompanionResult<Array2<f64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let coef = validate_coefficients(coef)?;

    let n = coef.len() - 1;
    let lead = coef[0];
    let mut a = Array2::zeros((n, n));

    for i in 0..n - 1 {
        a[(i, i + 1)] = 1.0;
    }

    // Last row holds the trailing coefficients, lowest power first.
    for j in 0..n {
        let entry = -coef[n - j] / lead;
        if !entry.is_finite() {
            return Err(CompanionError::NormalizationOverflow { index: n - j });
        }
        a[(n - 1, j)] = entry;
    }

    Ok(a)
}

/// Frobenius companion matrix, or `None` for invalid coefficients.
///
/// Sentinel form of [`companion_matrix`]: malformed input (wrong
/// dimensionality, fewer than two entries, NaN/infinity, zero leading
/// coefficient, overflow when normalizing) returns `None` instead of an error.
///
/// # Examples
///
/// ```
/// use frobenius_rs::frob_a;
/// use ndarray::arr1;
///
/// let a = frob_a(&arr1(&[1.0, -3.0, 2.0])).unwrap();
/// assert_eq!(a.shape(), &[2, 2]);
///
/// assert_eq!(frob_a(&arr1(&[0.0, 1.0, 2.0])), None);
/// assert_eq!(frob_a(&arr1(&[5.0])), None);
/// ```
pub fn frob_a<S, D>(coef: &ArrayBase<S, D>) -> Option<Array2<f64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    into_sentinel("frob_a", companion_matrix(coef))
}
