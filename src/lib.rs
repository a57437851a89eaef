//! frobenius-rs: polynomial analysis through companion matrices
//!
//! This crate provides three small numerical routines built on `ndarray` and
//! LAPACK (through `ndarray-linalg`) that are used together to study a real
//! polynomial via its Frobenius companion matrix.
//!
//! # Organization
//!
//! - `frobenius`: Companion matrix construction (`frob_a`)
//! - `singular`: Non-singularity test by SVD rank (`is_nonsingular`)
//! - `roots`: Root estimation from a perturbed companion matrix (`roots_20`)
//! - `error`: The `CompanionError` type shared by all routines
//!
//! Coefficients are always given in **decreasing** powers of x, leading
//! coefficient first. Each routine comes in two forms: a sentinel form that
//! returns `None` for any invalid input, and a `Result` form that reports
//! the reason.
//!
//! # Example
//!
//! ```
//! use frobenius_rs::{frob_a, is_nonsingular, roots_20_seeded};
//! use ndarray::{arr1, arr2};
//!
//! let coef = arr1(&[1.0, -3.0, 2.0]);
//!
//! let a = frob_a(&coef).unwrap();
//! assert_eq!(a, arr2(&[[0.0, 1.0], [-2.0, 3.0]]));
//! assert_eq!(is_nonsingular(&a), Some(true));
//!
//! let (perturbed, roots) = roots_20_seeded(&coef, 42).unwrap();
//! assert_eq!(perturbed.len(), 3);
//! assert_eq!(roots.len(), 2);
//! ```

pub mod error;
pub mod frobenius;
pub mod roots;
pub mod singular;

pub use error::{CompanionError, CompanionResult};
pub use frobenius::{companion_matrix, frob_a};
pub use roots::{
    estimate_roots, roots_20, roots_20_seeded, sort_roots, PerturbationConfig, RootEstimate,
};
pub use singular::{check_nonsingular, is_nonsingular};
