/*
 *  chart.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Daily graph: axis autoscale, spline temperature curve, precipitation bars
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::pixelcolor::BinaryColor;
use log::{debug, warn};

use crate::canvas::Canvas;
use crate::font::{Align, Font, label};
use crate::spline::CubicSpline;

/// Gridline intervals used when nothing else is configured.
pub const DEFAULT_GRIDLINES: u32 = 4;

/// First step tried by the temperature autoscale.
const BASE_STEP: f32 = 5.0;

/// Bails out of step escalation on absurd input.
const MAX_ESCALATIONS: usize = 32;

/// Axis bounds and the distance between two gridlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub lower: f32,
    pub upper: f32,
    pub step: f32,
}

impl AxisScale {
    pub fn range(&self) -> f32 {
        self.upper - self.lower
    }

    /// Number of intervals between `lower` and `upper`.
    pub fn intervals(&self) -> u32 {
        (self.range() / self.step).round().max(0.0) as u32
    }

    /// Values of every gridline from `lower` up to and including `upper`.
    pub fn gridlines(&self) -> impl Iterator<Item = f32> + use<> {
        let (lower, step) = (self.lower, self.step);
        (0..=self.intervals()).map(move |i| lower + i as f32 * step)
    }
}

/// Next step of the 1-2-5 ladder: 5, 10, 20, 50, 100 ...
fn next_step(step: f32) -> f32 {
    let magnitude = 10f32.powf(step.log10().floor());
    let leading = (step / magnitude).round();
    if leading == 2.0 { magnitude * 5.0 } else { step * 2.0 }
}

fn snap(min: f32, max: f32, step: f32) -> (f32, f32, u32) {
    let lower = step * (min / step).floor();
    let upper = step * (max / step).ceil();
    (lower, upper, ((upper - lower) / step).round() as u32)
}

/// Pick axis bounds on multiples of a round step so that exactly
/// `gridlines` intervals cover `[min, max]`.
///
/// Starts at a step of 5 and widens it while the span needs more
/// intervals than available. Spare intervals are split between both ends,
/// the larger half going to the side with less headroom.
pub fn calculate_resolution(min: f32, max: f32, gridlines: u32) -> AxisScale {
    let lines = gridlines.max(1);
    if !min.is_finite() || !max.is_finite() {
        return AxisScale { lower: 0.0, upper: BASE_STEP * lines as f32, step: BASE_STEP };
    }
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    let mut step = BASE_STEP;
    let (mut lower, mut upper, mut steps) = snap(min, max, step);
    let mut escalations = 0;
    while steps > lines && escalations < MAX_ESCALATIONS {
        step = next_step(step);
        (lower, upper, steps) = snap(min, max, step);
        escalations += 1;
    }

    if steps > lines || !lower.is_finite() || !upper.is_finite() {
        warn!("no round scale for [{min}, {max}], using defaults");
        return AxisScale { lower: 0.0, upper: BASE_STEP * lines as f32, step: BASE_STEP };
    }

    let rest = lines.saturating_sub(steps);
    if rest > 0 {
        let rest_upper = if upper - max <= min - lower { rest.div_ceil(2) } else { rest / 2 };
        let rest_lower = rest - rest_upper;
        lower -= rest_lower as f32 * step;
        upper += rest_upper as f32 * step;
    }

    let scale = AxisScale { lower, upper, step };
    debug!("autoscale [{min}, {max}] -> {scale:?}");
    scale
}

/// Zero-based scale for precipitation, step `max(1, ceil(max / gridlines))`.
pub fn precipitation_scale(max: f32, gridlines: u32) -> AxisScale {
    let lines = gridlines.max(1);
    let step = if max.is_finite() { (max / lines as f32).ceil().max(1.0) } else { 1.0 };
    AxisScale { lower: 0.0, upper: step * lines as f32, step }
}

/// Pixel rectangle a chart is drawn into. `bottom` is the baseline row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotArea {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl PlotArea {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Row for `value`, clamped into the area.
    pub fn y_for(&self, value: f32, scale: &AxisScale) -> i32 {
        let range = scale.range();
        if range <= 0.0 || !value.is_finite() {
            return self.bottom();
        }
        let frac = ((value - scale.lower) / range).clamp(0.0, 1.0);
        self.bottom() - (frac * self.height as f32).round() as i32
    }

    /// Column for position `x` when `[first, last]` spans the full width.
    pub fn x_at(&self, x: f32, first: f32, last: f32) -> i32 {
        if !(last > first) || !x.is_finite() {
            return self.left;
        }
        let frac = ((x - first) / (last - first)).clamp(0.0, 1.0);
        self.left + (frac * (self.width - 1) as f32).round() as i32
    }
}

/// Chart renderer bound to one plot area.
#[derive(Debug, Clone, Copy)]
pub struct Chart {
    pub area: PlotArea,
    /// Blank columns between two precipitation bars.
    pub bar_gap: i32,
    span: Option<(f32, f32)>,
}

impl Chart {
    pub fn new(area: PlotArea) -> Self {
        Self { area, bar_gap: 1, span: None }
    }

    /// Sample positions that land on the left and right edge. Charts
    /// sharing a span share their columns. Without one every series
    /// stretches across the full width.
    pub fn with_span(mut self, first: f32, last: f32) -> Self {
        self.span = Some((first, last));
        self
    }

    pub fn span(&self) -> Option<(f32, f32)> {
        self.span
    }

    /// Dotted gridline per scale step, solid baseline, value labels right
    /// aligned against the left edge of the plot.
    pub fn draw_grid(&self, canvas: &mut Canvas, scale: &AxisScale, labels: Option<&Font<'_>>, color: BinaryColor) {
        let a = &self.area;
        for value in scale.gridlines() {
            let y = a.y_for(value, scale);
            if y == a.bottom() {
                canvas.draw_horizontal_line(a.left, y, a.width, color);
            } else {
                for x in (a.left..=a.right()).step_by(3) {
                    canvas.set_pixel(x, y, color);
                }
            }
            if let Some(font) = labels {
                let text = label::<12>(format_args!("{}", value.round() as i32));
                canvas.draw_text_aligned(a.left - 4, y - font.height() / 2, &text, font, Align::Right, color);
            }
        }
    }

    /// Smooth curve through the samples `(xs[i], ys[i])`, one evaluation
    /// per pixel column. `xs` must be strictly increasing.
    ///
    /// Falls back to straight segments when the series cannot be fitted.
    pub fn draw_curve(&self, canvas: &mut Canvas, xs: &[f32], ys: &[f32], scale: &AxisScale, color: BinaryColor) {
        let a = &self.area;
        match ys.len().min(xs.len()) {
            0 => return,
            1 => {
                let y = a.y_for(ys[0], scale);
                canvas.draw_horizontal_line(a.left, y, a.width, color);
                return;
            }
            _ => {}
        }

        let spline = match CubicSpline::natural(xs, ys) {
            Ok(s) => s,
            Err(e) => {
                warn!("temperature curve not fitted ({e}), drawing segments");
                self.draw_polyline(canvas, xs, ys, scale, color);
                return;
            }
        };

        let (lo, hi) = spline.domain();
        let (first, last) = self.span.unwrap_or((lo, hi));
        let columns = (a.width - 1).max(1) as f32;
        let mut cursor = spline.cursor();
        let mut prev: Option<(i32, i32)> = None;
        for x in a.x_at(lo, first, last)..=a.x_at(hi, first, last) {
            let t = (first + (x - a.left) as f32 * (last - first) / columns).clamp(lo, hi);
            let y = a.y_for(cursor.evaluate(t), scale);
            match prev {
                Some((x0, y0)) => canvas.draw_line(x0, y0, x, y, color),
                None => canvas.set_pixel(x, y, color),
            }
            prev = Some((x, y));
        }
    }

    /// Straight segments between consecutive samples.
    pub fn draw_polyline(&self, canvas: &mut Canvas, xs: &[f32], ys: &[f32], scale: &AxisScale, color: BinaryColor) {
        let a = &self.area;
        let (Some(&lo), Some(&hi)) = (xs.first(), xs.last()) else {
            return;
        };
        let (first, last) = self.span.unwrap_or((lo, hi));
        let points: Vec<(i32, i32)> = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (a.x_at(x, first, last), a.y_for(y, scale)))
            .collect();
        for pair in points.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            canvas.draw_line(x0, y0, x1, y1, color);
        }
    }

    /// One filled bar per sample, centred on the column of its index.
    /// Bars at the edges are cut at the area. Zero samples draw nothing.
    pub fn draw_bars(&self, canvas: &mut Canvas, values: &[f32], scale: &AxisScale, color: BinaryColor) {
        let a = &self.area;
        if values.is_empty() {
            return;
        }
        let (first, last) = self.span.unwrap_or((0.0, (values.len().max(2) - 1) as f32));
        let pitch = if last > first { (a.width - 1) as f32 / (last - first) } else { a.width as f32 };
        let bar_width = (pitch.floor() as i32 - self.bar_gap).max(1);
        let range = scale.range();
        for (i, &value) in values.iter().enumerate() {
            let at = i as f32;
            if value <= 0.0 || range <= 0.0 || !value.is_finite() || at < first || at > last {
                continue;
            }
            let frac = ((value - scale.lower) / range).clamp(0.0, 1.0);
            let h = ((frac * a.height as f32).round() as i32).max(1);
            let x0 = a.x_at(at, first, last) - bar_width / 2;
            let x1 = (x0 + bar_width - 1).min(a.right());
            canvas.draw_filled_rectangle(x0.max(a.left), a.bottom() - h, x1, a.bottom(), color);
        }
    }
}

/// Smallest and largest finite value of a series.
pub fn series_bounds(values: &[f32]) -> Option<(f32, f32)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
