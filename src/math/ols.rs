//! Least squares for the demo chart's trend line.
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Solved via SVD so a degenerate design (all x equal) is reported instead of
//! producing garbage.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit `y = a + b x`; returns `(a, b)`.
pub fn fit_line(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let first_x = points[0].0;
    if points.iter().all(|&(x, _)| (x - first_x).abs() < 1e-12) {
        return None;
    }

    let x = DMatrix::from_fn(points.len(), 2, |r, c| if c == 0 { 1.0 } else { points[r].0 });
    let y = DVector::from_iterator(points.len(), points.iter().map(|&(_, y)| y));
    let beta = solve_least_squares(&x, &y)?;
    Some((beta[0], beta[1]))
}
