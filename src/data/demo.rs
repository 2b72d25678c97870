//! Static demo dataset for the Visualizations page.
//!
//! Five hand-picked rows relating margin, a predicted emission factor and the
//! reliability score. Placeholder data; nothing is loaded from disk.

use crate::math::fit_line;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoPoint {
    pub margin: f64,
    pub predicted_emission: f64,
    pub dq_reliability: f64,
}

pub const DEMO_POINTS: [DemoPoint; 5] = [
    DemoPoint { margin: 0.1, predicted_emission: 1.5, dq_reliability: 0.9 },
    DemoPoint { margin: 0.2, predicted_emission: 1.8, dq_reliability: 0.8 },
    DemoPoint { margin: 0.3, predicted_emission: 2.0, dq_reliability: 0.85 },
    DemoPoint { margin: 0.4, predicted_emission: 2.4, dq_reliability: 0.7 },
    DemoPoint { margin: 0.5, predicted_emission: 2.6, dq_reliability: 0.65 },
];

/// Chart-ready series derived from the demo rows.
#[derive(Debug, Clone)]
pub struct DemoSeries {
    /// `(margin, predicted_emission, dq_reliability)` per point.
    pub points: Vec<(f64, f64, f64)>,
    /// Least-squares trend line sampled across the x range.
    pub trend: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Reliability range, for the colour scale.
    pub dq_bounds: [f64; 2],
}

pub fn demo_series() -> DemoSeries {
    let points: Vec<(f64, f64, f64)> = DEMO_POINTS
        .iter()
        .map(|p| (p.margin, p.predicted_emission, p.dq_reliability))
        .collect();

    let (mut x0, mut x1) = bounds(points.iter().map(|p| p.0));
    let (mut y0, mut y1) = bounds(points.iter().map(|p| p.1));
    let (dq0, dq1) = bounds(points.iter().map(|p| p.2));

    let x_pad = ((x1 - x0) * 0.1).max(1e-6);
    x0 -= x_pad;
    x1 += x_pad;

    let xy: Vec<(f64, f64)> = points.iter().map(|p| (p.0, p.1)).collect();
    let trend = match fit_line(&xy) {
        Some((a, b)) => {
            let n = 50usize;
            (0..n)
                .map(|i| {
                    let x = x0 + (x1 - x0) * i as f64 / (n as f64 - 1.0);
                    (x, a + b * x)
                })
                .collect()
        }
        None => Vec::new(),
    };

    for &(_, y) in &trend {
        y0 = y0.min(y);
        y1 = y1.max(y);
    }
    let y_pad = ((y1 - y0) * 0.05).max(1e-6);

    DemoSeries {
        points,
        trend,
        x_bounds: [x0, x1],
        y_bounds: [y0 - y_pad, y1 + y_pad],
        dq_bounds: [dq0, dq1],
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
