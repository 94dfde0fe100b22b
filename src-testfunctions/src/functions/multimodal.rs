//! Multimodal test functions
//!
//! These functions have multiple local minima and are used to test the global
//! search capabilities and exploration of optimization algorithms.

use ndarray::Array1;

/// Offset making the Schwefel 2.26 minimum exactly zero (per dimension)
pub const SCHWEFEL_2_26_OFFSET: f64 = 418.982_887_272_433_7;

/// Schwefel 2.26 function - deceptive, second best far from the optimum
/// Global minimum: f(x) ~ 0 at x = (420.9687, ..., 420.9687)
/// Bounds: x_i in [-500, 500]
pub fn schwefel_2_26(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    let sum: f64 = x.iter().map(|&xi| xi * xi.abs().sqrt().sin()).sum();
    SCHWEFEL_2_26_OFFSET * n - sum
}

/// Rastrigin function - highly multimodal
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn rastrigin(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    let sum: f64 = x
        .iter()
        .map(|&xi| xi.powi(2) - 10.0 * (2.0 * std::f64::consts::PI * xi).cos())
        .sum();
    10.0 * n + sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rastrigin_origin() {
        assert!(rastrigin(&Array1::zeros(5)).abs() < 1e-12);
        assert!(rastrigin(&Array1::from_elem(2, 1.0)) > 1.0);
    }

    #[test]
    fn test_schwefel_2_26_optimum() {
        let x = Array1::from_elem(3, 420.968_746);
        assert!(schwefel_2_26(&x).abs() < 1e-3, "f = {}", schwefel_2_26(&x));
    }
}
