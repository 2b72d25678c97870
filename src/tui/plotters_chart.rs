//! Plotters-powered demo scatter chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! Point colour (and marker size) follow the DQ Reliability score, so the third
//! dimension of the demo data stays visible in a terminal.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call so `render()`
/// only draws.
pub struct DemoPlottersChart<'a> {
    /// `(x, y, dq_reliability)` per point.
    pub points: &'a [(f64, f64, f64)],
    /// Least-squares trend line.
    pub trend: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Range mapped onto the colour scale.
    pub dq_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// Map a reliability score onto a red (low) to green (high) scale.
pub fn reliability_color(dq: f64, bounds: [f64; 2]) -> RGBColor {
    let t = normalized(dq, bounds);
    let r = (255.0 * (1.0 - t)).round() as u8;
    let g = (255.0 * t).round() as u8;
    RGBColor(r, g, 64)
}

/// Marker radius in pixel steps (1..=3), growing with reliability.
pub fn marker_radius(dq: f64, bounds: [f64; 2]) -> i32 {
    1 + (normalized(dq, bounds) * 2.0).round() as i32
}

fn normalized(v: f64, bounds: [f64; 2]) -> f64 {
    let span = bounds[1] - bounds[0];
    if !span.is_finite() || span <= 0.0 || !v.is_finite() {
        return 1.0;
    }
    ((v - bounds[0]) / span).clamp(0.0, 1.0)
}

impl<'a> Widget for DemoPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        // A marker is a small square of pixels; one pixel step is a fixed share
        // of each axis so markers look the same at any terminal size.
        let step_x = (x1 - x0) * 0.006;
        let step_y = (y1 - y0) * 0.012;
        let markers: Vec<(f64, f64, RGBColor, i32)> = self
            .points
            .iter()
            .map(|&(x, y, dq)| {
                (
                    x,
                    y,
                    reliability_color(dq, self.dq_bounds),
                    marker_radius(dq, self.dq_bounds),
                )
            })
            .collect();

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            let trend_color = RGBColor(0, 255, 255); // cyan
            chart.draw_series(LineSeries::new(self.trend.iter().copied(), &trend_color))?;

            // Colored `Pixel`s instead of `Circle`: the ratatui backend maps
            // circle radii in the wrong units.
            for &(x, y, color, radius) in &markers {
                chart.draw_series((-radius..=radius).flat_map(|dx| {
                    (-radius..=radius).map(move |dy| {
                        Pixel::new((x + dx as f64 * step_x, y + dy as f64 * step_y), color)
                    })
                }))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
