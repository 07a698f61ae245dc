//! Debt-to-GDP history drawn with Plotters inside a Ratatui buffer.
//!
//! Plotters gives axis ticks and labels for free; `plotters-ratatui-backend`
//! turns its primitives into Ratatui canvas cells.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Maastricht reference value for gross public debt, in percent of GDP.
pub const MAASTRICHT_LIMIT_PCT: f64 = 60.0;

const RATIO_COLOR: RGBColor = RGBColor(255, 80, 80);
const LIMIT_COLOR: RGBColor = RGBColor(255, 200, 0);

/// Points of the debt ratio, x in fractional years, plus precomputed bounds.
pub struct DebtHistoryChart<'a> {
    pub ratio: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl DebtHistoryChart<'_> {
    fn bounds_are_drawable(&self) -> bool {
        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        [x0, x1, y0, y1].iter().all(|v| v.is_finite()) && x1 > x0 && y1 > y0
    }

    /// The 60% line, when it falls inside the visible range.
    fn limit_segment(&self) -> Option<[(f64, f64); 2]> {
        let [y0, y1] = self.y_bounds;
        (y0..=y1).contains(&MAASTRICHT_LIMIT_PCT).then(|| {
            [
                (self.x_bounds[0], MAASTRICHT_LIMIT_PCT),
                (self.x_bounds[1], MAASTRICHT_LIMIT_PCT),
            ]
        })
    }
}

impl Widget for DebtHistoryChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters cannot lay out a chart in a few cells; show a hint instead.
        if area.width < 24 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Terminal too small for the history chart.",
                Style::default().fg(Color::Yellow),
            );
            return;
        }
        if !self.bounds_are_drawable() {
            return;
        }

        let limit = self.limit_segment();
        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        widget_fn(move |root| {
            // Terminal cells are coarse, so margins and label areas stay small.
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Mesh lines turn into noise at terminal resolution; axes and
            // labels are enough to read a yearly trajectory.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            // Reference line first so the debt line is drawn over it.
            if let Some(segment) = limit {
                chart.draw_series(LineSeries::new(segment, &LIMIT_COLOR))?;
            }
            chart.draw_series(LineSeries::new(self.ratio.iter().copied(), &RATIO_COLOR))?;
            // Quarterly points as `Pixel`s: the backend scales `Circle` radii as
            // canvas units, which draws huge circles.
            chart.draw_series(self.ratio.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;
            Ok(())
        })
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(y_bounds: [f64; 2]) -> DebtHistoryChart<'static> {
        DebtHistoryChart {
            ratio: &[],
            x_bounds: [2000.0, 2024.0],
            y_bounds,
            x_label: "year",
            y_label: "% PIB",
            fmt_x: |v| format!("{v:.0}"),
            fmt_y: |v| format!("{v:.0}"),
        }
    }

    #[test]
    fn limit_line_only_when_visible() {
        assert_eq!(
            chart([50.0, 120.0]).limit_segment(),
            Some([(2000.0, 60.0), (2024.0, 60.0)])
        );
        assert!(chart([90.0, 120.0]).limit_segment().is_none());
    }

    #[test]
    fn degenerate_bounds_are_not_drawn() {
        assert!(chart([50.0, 120.0]).bounds_are_drawable());
        assert!(!chart([120.0, 120.0]).bounds_are_drawable());
        assert!(!chart([f64::NAN, 120.0]).bounds_are_drawable());
    }
}
