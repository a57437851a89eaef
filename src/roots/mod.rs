//! Root Estimation - Perturbed Companion Eigenvalues
//!
//! Estimates the zeros of a real polynomial as the eigenvalues of its
//! Frobenius companion matrix, after applying a small random perturbation
//! to every coefficient, zero coefficients included. The perturbed coefficients are
//! returned with the roots so callers know which polynomial the roots
//! actually belong to.
//!
//! The random source is always passed in explicitly. Seeding it (or using
//! [`roots_20_seeded`]) makes the output bit-reproducible.

use ndarray::{Array1, ArrayBase, Data, Dimension, Ix1};
use ndarray_linalg::EigVals;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

use crate::error::{into_sentinel, CompanionError, CompanionResult};
use crate::frobenius::{companion_matrix, validate_coefficients};

/// Perturbation settings for the root estimator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerturbationConfig {
    /// Standard deviation of the perturbation: each coefficient `c` becomes
    /// `c + relative_scale * z * max(|c|, 1)` with `z ~ N(0, 1)`, so the
    /// change is relative for large coefficients and absolute for small or
    /// zero ones. Zero disables the perturbation.
    pub relative_scale: f64,
}

impl PerturbationConfig {
    /// Relative scale used by [`roots_20`].
    pub const DEFAULT_RELATIVE_SCALE: f64 = 1e-10;

    /// Create a config with the default relative scale.
    pub fn new() -> Self {
        Self {
            relative_scale: Self::DEFAULT_RELATIVE_SCALE,
        }
    }

    /// Config that leaves coefficients untouched.
    pub fn unperturbed() -> Self {
        Self { relative_scale: 0.0 }
    }

    /// Set the relative scale.
    pub fn with_relative_scale(mut self, relative_scale: f64) -> Self {
        self.relative_scale = relative_scale;
        self
    }

    /// Check that the scale is finite and non-negative.
    pub fn validate(&self) -> CompanionResult<()> {
        if !self.relative_scale.is_finite() || self.relative_scale < 0.0 {
            return Err(CompanionError::InvalidConfig(format!(
                "relative_scale must be finite and non-negative, got {}",
                self.relative_scale
            )));
        }
        Ok(())
    }
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Perturbed coefficients together with the zeros of the polynomial they define.
#[derive(Clone, Debug, PartialEq)]
pub struct RootEstimate {
    /// Perturbed coefficients, decreasing powers of x
    pub coefficients: Array1<f64>,
    /// Eigenvalues of the companion matrix of `coefficients`, in the order
    /// LAPACK returns them
    pub roots: Array1<Complex64>,
}

impl RootEstimate {
    /// Degree of the polynomial (equal to the number of roots).
    pub fn degree(&self) -> usize {
        self.roots.len()
    }

    /// Roots ordered by [`sort_roots`].
    pub fn sorted_roots(&self) -> Array1<Complex64> {
        let mut roots = self.roots.to_vec();
        sort_roots(&mut roots);
        Array1::from(roots)
    }

    /// Split into `(coefficients, roots)`.
    pub fn into_pair(self) -> (Array1<f64>, Array1<Complex64>) {
        (self.coefficients, self.roots)
    }
}

/// Sorts complex roots lexicographically by real part, then imaginary part.
///
/// Root sets carry no meaningful order; sorting both sides makes two sets
/// comparable element by element.
///
/// # Examples
///
/// ```
/// use frobenius_rs::sort_roots;
/// use num_complex::Complex64;
///
/// let mut roots = vec![
///     Complex64::new(2.0, 0.0),
///     Complex64::new(0.0, 1.0),
///     Complex64::new(0.0, -1.0),
/// ];
/// sort_roots(&mut roots);
/// assert_eq!(roots[0], Complex64::new(0.0, -1.0));
/// assert_eq!(roots[2], Complex64::new(2.0, 0.0));
/// ```
pub fn sort_roots(roots: &mut [Complex64]) {
    roots.sort_by(|a, b| a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im)));
}

/// Applies a small random perturbation to every coefficient.
///
/// Coefficients with `|c| >= 1` move by a relative amount, smaller ones
/// (including exact zeros) by an absolute amount, so sparse polynomials
/// such as `x²` still have their repeated roots split apart.
///
/// One standard normal sample is drawn per coefficient, in index order, so
/// a generator in the same state always yields the same output. With a
/// zero scale the coefficients are copied and no entropy is consumed.
pub fn perturb_coefficients<S, R>(
    coef: &ArrayBase<S, Ix1>,
    config: &PerturbationConfig,
    rng: &mut R,
) -> Array1<f64>
where
    S: Data<Elem = f64>,
    R: Rng + ?Sized,
{
    if config.relative_scale == 0.0 {
        return coef.to_owned();
    }

    coef.iter()
        .map(|&c| {
            let z: f64 = StandardNormal.sample(&mut *rng);
            c + config.relative_scale * z * c.abs().max(1.0)
        })
        .collect()
}

/// Estimates polynomial roots from a perturbed companion matrix.
///
/// # Arguments
///
/// * `coef` - Coefficients in decreasing powers of x
/// * `config` - Perturbation settings
/// * `rng` - Random source for the perturbation
///
/// # Returns
///
/// * `Ok(RootEstimate)` - Perturbed coefficients and their n roots
/// * `Err(CompanionError)` - Invalid coefficients or config, or LAPACK
///   `DGEEV` failed to converge
///
/// # Algorithm
///
/// 1. Validate the coefficients (see [`validate_coefficients`])
/// 2. Perturb every coefficient (see [`perturb_coefficients`])
/// 3. Build the companion matrix of the perturbed coefficients
/// 4. Compute its eigenvalues with LAPACK's DGEEV (via ndarray-linalg)
///
/// # Examples
///
/// ```
/// use frobenius_rs::roots::{estimate_roots, PerturbationConfig};
/// use ndarray::arr1;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let config = PerturbationConfig::unperturbed();
/// let estimate = estimate_roots(&arr1(&[1.0, -3.0, 2.0]), &config, &mut rng).unwrap();
///
/// let roots = estimate.sorted_roots();
/// assert!((roots[0].re - 1.0).abs() < 1e-12);
/// assert!((roots[1].re - 2.0).abs() < 1e-12);
/// ```
pub fn estimate_roots<S, D, R>(
    coef: &ArrayBase<S, D>,
    config: &PerturbationConfig,
    rng: &mut R,
) -> CompanionResult<RootEstimate>
where
    S: Data<Elem = f64>,
    D: Dimension,
    R: Rng + ?Sized,
{
    config.validate()?;
    let coef = validate_coefficients(coef)?;

    let coefficients = perturb_coefficients(&coef, config, rng);

    // A perturbation can in principle zero the leading term; the builder
    // rejects that like any other invalid input.
    let a = companion_matrix(&coefficients)?;

    let roots = a
        .eigvals()
        .map_err(|e| CompanionError::EigenFailed(e.to_string()))?;

    if roots.iter().any(|z| !z.re.is_finite() || !z.im.is_finite()) {
        return Err(CompanionError::EigenFailed(
            "DGEEV returned non-finite eigenvalues".to_string(),
        ));
    }

    tracing::debug!(
        degree = roots.len(),
        relative_scale = config.relative_scale,
        "estimated polynomial roots"
    );

    Ok(RootEstimate {
        coefficients,
        roots,
    })
}

/// Perturbs the coefficients and returns them with the roots, or `None`.
///
/// Uses [`PerturbationConfig::default`]. Returns `None` under the same
/// conditions as [`crate::frob_a`], and when the eigenvalue computation fails.
///
/// # Examples
///
/// ```
/// use frobenius_rs::roots_20;
/// use ndarray::arr1;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let (coef, roots) = roots_20(&arr1(&[2.0, 4.0]), &mut rng).unwrap();
/// assert_eq!(coef.len(), 2);
/// assert_eq!(roots.len(), 1);
/// assert!((roots[0].re + 2.0).abs() < 1e-8);
///
/// assert_eq!(roots_20(&arr1(&[0.0, 1.0, 2.0]), &mut rng), None);
/// ```
#[allow(clippy::type_complexity)]
pub fn roots_20<S, D, R>(
    coef: &ArrayBase<S, D>,
    rng: &mut R,
) -> Option<(Array1<f64>, Array1<Complex64>)>
where
    S: Data<Elem = f64>,
    D: Dimension,
    R: Rng + ?Sized,
{
    into_sentinel(
        "roots_20",
        estimate_roots(coef, &PerturbationConfig::default(), rng),
    )
    .map(RootEstimate::into_pair)
}

/// [`roots_20`] with a private generator seeded from `seed`.
///
/// Calls with the same seed and input return identical results, on any
/// thread.
#[allow(clippy::type_complexity)]
pub fn roots_20_seeded<S, D>(
    coef: &ArrayBase<S, D>,
    seed: u64,
) -> Option<(Array1<f64>, Array1<Complex64>)>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let mut rng = StdRng::seed_from_u64(seed);
    roots_20(coef, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, arr2};
    use rand::RngCore;

    /// Evaluate P(z) by Horner's rule, coefficients in decreasing powers.
    fn horner(coef: &Array1<f64>, z: Complex64) -> Complex64 {
        coef.iter()
            .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
    }

    #[test]
    fn test_roots_20_linear() {
        let (coef, roots) = roots_20_seeded(&arr1(&[2.0, 4.0]), 42).unwrap();
        assert_eq!(coef.len(), 2);
        assert_eq!(roots.len(), 1);
        assert_abs_diff_eq!(roots[0].re, -2.0, epsilon = 1e-8);
        assert_abs_diff_eq!(roots[0].im, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_roots_20_quadratic() {
        let (_, roots) = roots_20_seeded(&arr1(&[1.0, -3.0, 2.0]), 42).unwrap();
        let mut roots = roots.to_vec();
        sort_roots(&mut roots);
        assert_abs_diff_eq!(roots[0].re, 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(roots[1].re, 2.0, epsilon = 1e-8);
    }

    #[test]
    fn test_unperturbed_recovers_exact_roots() {
        let mut rng = StdRng::seed_from_u64(0);
        let estimate = estimate_roots(
            &arr1(&[1.0, -6.0, 11.0, -6.0]),
            &PerturbationConfig::unperturbed(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(estimate.coefficients, arr1(&[1.0, -6.0, 11.0, -6.0]));
        let roots = estimate.sorted_roots();
        for (k, z) in roots.iter().enumerate() {
            assert_abs_diff_eq!(z.re, (k + 1) as f64, epsilon = 1e-10);
            assert_abs_diff_eq!(z.im, 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_complex_conjugate_roots() {
        // x² + 1 = 0 -> ±i
        let mut rng = StdRng::seed_from_u64(0);
        let estimate = estimate_roots(
            &arr1(&[1.0, 0.0, 1.0]),
            &PerturbationConfig::unperturbed(),
            &mut rng,
        )
        .unwrap();

        let roots = estimate.sorted_roots();
        assert_abs_diff_eq!(roots[0].re, 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(roots[0].im, -1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(roots[1].re, 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(roots[1].im, 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_roots_solve_perturbed_polynomial() {
        let (coef, roots) = roots_20_seeded(&arr1(&[1.0, -2.0, -5.0, 6.0]), 9).unwrap();
        for &z in roots.iter() {
            assert!(horner(&coef, z).norm() < 1e-9, "P({}) not ~ 0", z);
        }
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let coef = arr1(&[1.0, -10.0, 35.0, -50.0, 24.0]);
        let first = roots_20_seeded(&coef, 42).unwrap();
        let second = roots_20_seeded(&coef, 42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_differ() {
        let coef = arr1(&[1.0, -3.0, 2.0]);
        let (a, _) = roots_20_seeded(&coef, 1).unwrap();
        let (b, _) = roots_20_seeded(&coef, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_perturbation_is_small_and_relative() {
        let coef = arr1(&[1.0, 0.0, -1e6, 3.5]);
        let mut rng = StdRng::seed_from_u64(123);
        let perturbed = perturb_coefficients(&coef, &PerturbationConfig::default(), &mut rng);

        assert_eq!(perturbed.len(), coef.len());
        for (p, c) in perturbed.iter().zip(coef.iter()) {
            let bound = 10.0 * PerturbationConfig::DEFAULT_RELATIVE_SCALE * c.abs().max(1.0);
            assert!((p - c).abs() <= bound, "{} vs {}", p, c);
        }
    }

    #[test]
    fn test_zero_coefficients_are_perturbed() {
        let coef = arr1(&[1.0, 0.0, 0.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(42);
        let perturbed = perturb_coefficients(&coef, &PerturbationConfig::default(), &mut rng);
        for (k, p) in perturbed.iter().enumerate().skip(1) {
            assert_ne!(*p, 0.0, "coefficient {} was not perturbed", k);
            assert!(p.abs() <= 10.0 * PerturbationConfig::DEFAULT_RELATIVE_SCALE);
        }
    }

    #[test]
    fn test_double_root_at_zero_is_split() {
        // x² has a double root at 0; the perturbed polynomial must not.
        let (coef, roots) = roots_20_seeded(&arr1(&[1.0, 0.0, 0.0]), 42).unwrap();
        assert_ne!(coef[1], 0.0);
        assert_ne!(coef[2], 0.0);

        assert_eq!(roots.len(), 2);
        assert_ne!(roots[0], roots[1]);
        for z in roots.iter() {
            assert!(z.norm() < 1e-3, "{} too far from 0", z);
        }
    }

    #[test]
    fn test_sparse_cubic_roots_are_distinct() {
        // x³ has a triple root at 0.
        let (_, roots) = roots_20_seeded(&arr1(&[1.0, 0.0, 0.0, 0.0]), 7).unwrap();
        let roots = roots.to_vec();
        for i in 0..roots.len() {
            for j in i + 1..roots.len() {
                assert_ne!(roots[i], roots[j]);
            }
        }
    }

    #[test]
    fn test_zero_scale_consumes_no_entropy() {
        let coef = arr1(&[1.0, 2.0, 3.0]);
        let mut rng = StdRng::seed_from_u64(5);
        let mut reference = StdRng::seed_from_u64(5);

        let out = perturb_coefficients(&coef, &PerturbationConfig::unperturbed(), &mut rng);
        assert_eq!(out, coef);
        assert_eq!(rng.next_u64(), reference.next_u64());
    }

    #[test]
    fn test_dyn_rng_source() {
        let mut rng = StdRng::seed_from_u64(42);
        let dyn_rng: &mut dyn RngCore = &mut rng;
        let (coef, roots) = roots_20(&arr1(&[1.0, -3.0, 2.0]), dyn_rng).unwrap();
        assert_eq!(coef, roots_20_seeded(&arr1(&[1.0, -3.0, 2.0]), 42).unwrap().0);
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn test_thread_rng_source() {
        let (_, roots) = roots_20(&arr1(&[1.0, 1.0, 1.0]), &mut rand::rng()).unwrap();
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(roots_20(&arr1(&[0.0, 1.0, 2.0]), &mut rng), None);
        assert_eq!(roots_20(&arr1(&[1.0]), &mut rng), None);
        assert_eq!(roots_20(&arr1(&[1.0, f64::NAN]), &mut rng), None);
        assert_eq!(roots_20(&arr2(&[[1.0, 2.0], [3.0, 4.0]]), &mut rng), None);
    }

    #[test]
    fn test_invalid_input_consumes_no_entropy() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut reference = StdRng::seed_from_u64(11);
        assert_eq!(roots_20(&arr1(&[0.0, 1.0]), &mut rng), None);
        assert_eq!(rng.next_u64(), reference.next_u64());
    }

    #[test]
    fn test_invalid_config() {
        let mut rng = StdRng::seed_from_u64(0);
        let coef = arr1(&[1.0, 2.0]);
        for scale in [-1e-3, f64::NAN, f64::INFINITY] {
            let config = PerturbationConfig::new().with_relative_scale(scale);
            assert!(matches!(
                estimate_roots(&coef, &config, &mut rng),
                Err(CompanionError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = PerturbationConfig::default();
        assert_eq!(config.relative_scale, 1e-10);
        assert!(config.validate().is_ok());
        assert_eq!(PerturbationConfig::unperturbed().relative_scale, 0.0);
    }

    #[test]
    fn test_root_estimate_accessors() {
        let mut rng = StdRng::seed_from_u64(3);
        let estimate = estimate_roots(
            &arr1(&[1.0, -3.0, 2.0]),
            &PerturbationConfig::unperturbed(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(estimate.degree(), 2);

        let (coef, roots) = estimate.clone().into_pair();
        assert_eq!(coef, estimate.coefficients);
        assert_eq!(roots, estimate.roots);
    }

    #[test]
    fn test_sort_roots_orders_by_real_then_imaginary() {
        let mut roots = vec![
            Complex64::new(1.0, 2.0),
            Complex64::new(-1.0, 0.0),
            Complex64::new(1.0, -2.0),
        ];
        sort_roots(&mut roots);
        assert_eq!(
            roots,
            vec![
                Complex64::new(-1.0, 0.0),
                Complex64::new(1.0, -2.0),
                Complex64::new(1.0, 2.0),
            ]
        );
    }
}
