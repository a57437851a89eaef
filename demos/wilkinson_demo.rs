//! Demonstration of perturbed root finding on Wilkinson's polynomial
//!
//! W(x) = (x - 1)(x - 2)...(x - 20). Its roots are well separated, yet a
//! relative coefficient perturbation of 1e-10 moves the larger ones far
//! away, several into complex conjugate pairs.

use frobenius_rs::{frob_a, is_nonsingular, roots_20_seeded, sort_roots};
use ndarray::Array1;

fn wilkinson_coefficients(n: usize) -> Array1<f64> {
    let mut coef = vec![1.0];
    for k in 1..=n {
        let r = k as f64;
        let mut next = vec![0.0; coef.len() + 1];
        for (i, &c) in coef.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= r * c;
        }
        coef = next;
    }
    Array1::from(coef)
}

fn main() {
    println!("=== Wilkinson Polynomial Demonstration ===\n");

    let coef = wilkinson_coefficients(20);
    println!("Degree: {}", coef.len() - 1);
    println!("Constant term: {:e}", coef[coef.len() - 1]);

    match frob_a(&coef) {
        Some(a) => {
            println!("\nCompanion matrix: {}×{}", a.nrows(), a.ncols());
            println!("Non-singular: {:?}", is_nonsingular(&a));
        }
        None => {
            println!("Invalid coefficients");
            return;
        }
    }

    let seed = 42;
    let Some((perturbed, roots)) = roots_20_seeded(&coef, seed) else {
        println!("Root estimation failed");
        return;
    };

    println!("\n=== Perturbed coefficients (seed {}) ===", seed);
    for (k, (p, c)) in perturbed.iter().zip(coef.iter()).enumerate() {
        println!("  x^{:<2}  {:>24.6e}  (relative change {:+.2e})", 20 - k, p, (p - c) / c);
    }

    let mut roots = roots.to_vec();
    sort_roots(&mut roots);

    println!("\n=== Estimated roots ===");
    for (k, z) in roots.iter().enumerate() {
        if z.im == 0.0 {
            println!("  {:2}: {:12.6}", k + 1, z.re);
        } else {
            println!("  {:2}: {:12.6} {:+12.6}i", k + 1, z.re, z.im);
        }
    }

    let complex_count = roots.iter().filter(|z| z.im != 0.0).count();
    println!("\n{} of 20 roots became complex", complex_count);
}
