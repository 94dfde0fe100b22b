//! Unimodal test functions
//!
//! A single basin of attraction; used to check convergence speed and the
//! precision reached by the optimizer.

use ndarray::Array1;

/// Sphere function (sum of squares)
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-100, 100]
pub fn sphere(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi * xi).sum()
}

/// Schwefel 2.22: sum |x_i| + prod |x_i|
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-10, 10]
pub fn schwefel_2_22(x: &Array1<f64>) -> f64 {
    let sum: f64 = x.iter().map(|xi| xi.abs()).sum();
    let prod: f64 = x.iter().map(|xi| xi.abs()).product();
    sum + prod
}

/// Schwefel 1.2 (rotated hyper-ellipsoid): sum_i (sum_{j<=i} x_j)^2
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-100, 100]
pub fn schwefel_1_2(x: &Array1<f64>) -> f64 {
    let mut partial = 0.0;
    let mut total = 0.0;
    for &xi in x.iter() {
        partial += xi;
        total += partial * partial;
    }
    total
}

/// Schwefel 2.21: max |x_i|
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-100, 100]
pub fn schwefel_2_21(x: &Array1<f64>) -> f64 {
    x.iter().fold(0.0_f64, |acc, xi| acc.max(xi.abs()))
}

/// Rosenbrock function, N-dimensional chained form
/// Global minimum: f(x) = 0 at x = (1, 1, ..., 1)
/// Bounds: x_i in [-30, 30]
pub fn rosenbrock(x: &Array1<f64>) -> f64 {
    x.windows(2)
        .into_iter()
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (w[0] - 1.0).powi(2))
        .sum()
}

/// Step function: sum floor(x_i + 0.5)^2
/// Global minimum: f(x) = 0 for x_i in [-0.5, 0.5)
/// Bounds: x_i in [-100, 100]
pub fn step(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| (xi + 0.5).floor().powi(2)).sum()
}
