// File: crates/capture-core/src/chart.rs
// Summary: Chart model that draws itself onto any Surface when printed.

use std::io;

use anyhow::Result;

use crate::expr::Plottable;
use crate::geometry::RectF;
use crate::grid::{linspace, ticks};
use crate::series::{Series, SeriesType};
use crate::surface::{Stroke, Surface};
use crate::theme::Theme;
use crate::Axis;

#[derive(Clone, Debug)]
pub struct Chart {
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub theme: Theme,
    /// Axis labels and tick text; off for pixel-stable output across font setups.
    pub draw_labels: bool,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            theme: Theme::default(),
            draw_labels: true,
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Fit both axes to the data, padding the Y range by `margin_frac` of its span.
    pub fn autoscale_axes(&mut self, margin_frac: f64) {
        let mut b: Option<(f64, f64, f64, f64)> = None;
        for s in &self.series {
            if let Some(sb) = s.bounds() {
                b = Some(match b {
                    None => sb,
                    Some(a) => (a.0.min(sb.0), a.1.max(sb.1), a.2.min(sb.2), a.3.max(sb.3)),
                });
            }
        }
        let Some((mut x_min, mut x_max, mut y_min, mut y_max)) = b else { return };
        if (x_max - x_min).abs() < 1e-9 { x_min -= 0.5; x_max += 0.5; }
        if (y_max - y_min).abs() < 1e-9 { y_min -= 0.5; y_max += 0.5; }
        let ym = (y_max - y_min) * margin_frac;
        self.x_axis.min = x_min;
        self.x_axis.max = x_max;
        self.y_axis.min = y_min - ym;
        self.y_axis.max = y_max + ym;
    }

    /// Draw onto the current page inside the surface's plot region.
    pub fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        let region = surface.plot_region()?;
        let scale = surface.scale();
        let (w, h) = surface.size();

        // Background
        surface.fill_rect(RectF::from_ltwh(0.0, 0.0, w as f32, h as f32), self.theme.background);

        draw_grid(surface, region, &self.theme, scale);
        draw_axes(surface, region, &self.theme, scale);
        if self.draw_labels {
            draw_labels(surface, region, &self.x_axis, &self.y_axis, &self.theme, scale);
        }

        for s in &self.series {
            match s.series_type {
                SeriesType::Line => draw_line_series(surface, region, &self.x_axis, &self.y_axis, s, &self.theme, scale),
                SeriesType::Candlestick => {
                    draw_candle_series(surface, region, &self.x_axis, &self.y_axis, s, &self.theme, scale)
                }
            }
        }
        Ok(())
    }
}

impl Plottable for Chart {
    /// Start a new page and draw; the text form is a one-line summary.
    fn print(&self, surface: &mut dyn Surface, out: &mut dyn io::Write) -> Result<()> {
        surface.new_page()?;
        self.draw(surface)?;
        writeln!(
            out,
            "<chart: {} series, x [{}, {}], y [{}, {}]>",
            self.series.len(),
            self.x_axis.min,
            self.x_axis.max,
            self.y_axis.min,
            self.y_axis.max
        )?;
        Ok(())
    }
}

// ---- helpers ----------------------------------------------------------------

/// Data-to-pixel mapping for one plot region.
struct Scaler<'a> {
    r: RectF,
    x: &'a Axis,
    y: &'a Axis,
}

impl Scaler<'_> {
    fn sx(&self, x: f64) -> f32 {
        self.r.left + ((x - self.x.min) / self.x.span()) as f32 * self.r.width()
    }
    fn sy(&self, y: f64) -> f32 {
        self.r.bottom - ((y - self.y.min) / self.y.span()) as f32 * self.r.height()
    }
}

fn draw_grid(surface: &mut dyn Surface, r: RectF, theme: &Theme, scale: f32) {
    let stroke = Stroke::new(theme.grid, 1.0 * scale);

    // verticals
    for x in linspace(r.left as f64, r.right as f64, 10) {
        surface.line((x as f32, r.top), (x as f32, r.bottom), &stroke);
    }
    // horizontals
    for y in linspace(r.top as f64, r.bottom as f64, 6) {
        surface.line((r.left, y as f32), (r.right, y as f32), &stroke);
    }
}

fn draw_axes(surface: &mut dyn Surface, r: RectF, theme: &Theme, scale: f32) {
    let stroke = Stroke::new(theme.axis_line, 1.5 * scale);
    surface.line((r.left, r.bottom), (r.right, r.bottom), &stroke);
    surface.line((r.left, r.top), (r.left, r.bottom), &stroke);
}

fn draw_labels(surface: &mut dyn Surface, r: RectF, x: &Axis, y: &Axis, theme: &Theme, scale: f32) {
    let size = 11.0 * scale;
    let sc = Scaler { r, x, y };
    for (v, label) in ticks(x.min, x.max, 5) {
        surface.draw_text(&label, (sc.sx(v) - 8.0 * scale, r.bottom + 16.0 * scale), size, theme.axis_label);
    }
    for (v, label) in ticks(y.min, y.max, 5) {
        surface.draw_text(&label, (r.left - 44.0 * scale, sc.sy(v) + 4.0 * scale), size, theme.axis_label);
    }
    let title = 14.0 * scale;
    surface.draw_text(&x.label, (r.right - 80.0 * scale, r.bottom + 40.0 * scale), title, theme.axis_label);
    surface.draw_text(&y.label, (r.left - 56.0 * scale, r.top - 6.0 * scale), title, theme.axis_label);
}

fn draw_line_series(
    surface: &mut dyn Surface,
    r: RectF,
    x_axis: &Axis,
    y_axis: &Axis,
    series: &Series,
    theme: &Theme,
    scale: f32,
) {
    let data = &series.data_xy;
    if data.len() < 2 {
        return;
    }
    let sc = Scaler { r, x: x_axis, y: y_axis };
    let points: Vec<(f32, f32)> = data.iter().map(|&(x, y)| (sc.sx(x), sc.sy(y))).collect();
    surface.stroke_polyline(&points, &Stroke::new(theme.line_stroke, 2.0 * scale));
}

fn draw_candle_series(
    surface: &mut dyn Surface,
    r: RectF,
    x_axis: &Axis,
    y_axis: &Axis,
    series: &Series,
    theme: &Theme,
    scale: f32,
) {
    if series.data_ohlc.is_empty() { return; }
    let sc = Scaler { r, x: x_axis, y: y_axis };

    // body width in pixels (roughly one "bar width" as fraction of plot)
    let n = series.data_ohlc.len() as f32;
    let bar_px = (r.width() / n).max(3.0 * scale) * 0.7;

    for c in &series.data_ohlc {
        let x = sc.sx(c.t);
        let y_o = sc.sy(c.o);
        let y_c = sc.sy(c.c);

        let color = if c.c >= c.o { theme.candle_up } else { theme.candle_down };

        // wick
        surface.line((x, sc.sy(c.h)), (x, sc.sy(c.l)), &Stroke::new(color, 1.0 * scale));

        // body rect
        let half = bar_px * 0.5;
        let top = y_o.min(y_c);
        let bot = y_o.max(y_c);
        surface.fill_rect(RectF::from_ltrb(x - half, top, x + half, bot.max(top + 1.0)), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Candle;

    #[test]
    fn autoscale_mixed_series() {
        let mut chart = Chart::new();
        chart.add_series(Series::line(vec![(0.0, 1.0), (5.0, 3.0)]));
        chart.add_series(Series::from_candles(vec![
            Candle { t: 2.0, o: 2.0, h: 6.0, l: 1.5, c: 4.0 },
            Candle { t: 3.0, o: 4.0, h: 5.5, l: 2.0, c: 2.5 },
        ]));

        chart.autoscale_axes(0.0);

        assert_eq!((chart.x_axis.min, chart.x_axis.max), (0.0, 5.0));
        assert_eq!((chart.y_axis.min, chart.y_axis.max), (1.0, 6.0));
    }

    #[test]
    fn autoscale_without_data_keeps_axes() {
        let mut chart = Chart::new();
        chart.autoscale_axes(0.05);
        assert_eq!(chart.x_axis, Axis::default_x());
    }
}
