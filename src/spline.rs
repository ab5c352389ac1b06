/*
 *  spline.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Natural cubic spline fitting and evaluation for the temperature curve
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

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplineError {
    #[error("need at least 2 knots, got {0}")]
    TooFewKnots(usize),

    #[error("{x} knot positions but {y} knot values")]
    LengthMismatch { x: usize, y: usize },

    /// Equal or decreasing neighbours, a zero-width interval has no slope.
    #[error("knots must be strictly increasing, x[{index}] = {value}")]
    NotIncreasing { index: usize, value: f32 },
}

/// Piecewise cubic through a strictly increasing knot sequence with zero
/// second derivative at both ends.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f32>,
    ys: Vec<f32>,
    y2: Vec<f32>,
}

impl CubicSpline {
    /// Solve the tridiagonal system for the second derivatives.
    pub fn natural(xs: &[f32], ys: &[f32]) -> Result<Self, SplineError> {
        if xs.len() != ys.len() {
            return Err(SplineError::LengthMismatch { x: xs.len(), y: ys.len() });
        }
        let n = xs.len();
        if n < 2 {
            return Err(SplineError::TooFewKnots(n));
        }
        if let Some(index) = (1..n).find(|&i| !(xs[i] > xs[i - 1])) {
            return Err(SplineError::NotIncreasing { index, value: xs[index] });
        }

        let mut y2 = vec![0.0f32; n];
        let mut u = vec![0.0f32; n];

        // forward sweep, natural start
        for i in 1..n - 1 {
            let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
            let p = sig * y2[i - 1] + 2.0;
            y2[i] = (sig - 1.0) / p;
            let slope = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]) - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
            u[i] = (6.0 * slope / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
        }

        // natural end, then back substitution
        y2[n - 1] = 0.0;
        for k in (0..n - 1).rev() {
            y2[k] = y2[k] * y2[k + 1] + u[k];
        }

        Ok(Self { xs: xs.to_vec(), ys: ys.to_vec(), y2 })
    }

    pub fn second_derivatives(&self) -> &[f32] {
        &self.y2
    }

    /// First and last knot position.
    pub fn domain(&self) -> (f32, f32) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Lower index of the interval bracketing `x`, by bisection. Queries
    /// outside the knots use the first or last interval.
    pub fn interval(&self, x: f32) -> usize {
        let (mut lo, mut hi) = (0, self.xs.len() - 1);
        while hi - lo > 1 {
            let k = (hi + lo) >> 1;
            if self.xs[k] > x {
                hi = k;
            } else {
                lo = k;
            }
        }
        lo
    }

    fn evaluate_in(&self, lo: usize, x: f32) -> f32 {
        let hi = lo + 1;
        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;
        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a * a * a - a) * self.y2[lo] + (b * b * b - b) * self.y2[hi]) * (h * h) / 6.0
    }

    /// Value at `x`, each call bisects from scratch.
    pub fn evaluate(&self, x: f32) -> f32 {
        self.evaluate_in(self.interval(x), x)
    }

    /// Evaluator that remembers the last interval, for left to right sweeps.
    pub fn cursor(&self) -> SplineCursor<'_> {
        SplineCursor { spline: self, lo: 0 }
    }
}

/// Sequential evaluator over one spline. Tries the previous interval first
/// and bisects only when `x` has left it.
#[derive(Debug)]
pub struct SplineCursor<'s> {
    spline: &'s CubicSpline,
    lo: usize,
}

impl SplineCursor<'_> {
    pub fn evaluate(&mut self, x: f32) -> f32 {
        let xs = &self.spline.xs;
        if !(xs[self.lo] <= x && xs[self.lo + 1] > x) {
            self.lo = self.spline.interval(x);
        }
        self.spline.evaluate_in(self.lo, x)
    }
}
