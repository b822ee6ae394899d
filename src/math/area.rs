//! Closed-form inverse area functions mapping ink coverage to tile radius
//!
//! Each solver answers one question: how large must a tile be so that its
//! area covers `want_rate` of one lattice cell? All solvers return 0 at
//! `want_rate == 0`, are non-decreasing on `[0, 1]` and never return NaN.

use std::f64::consts::PI;

const SQRT_2: f64 = std::f64::consts::SQRT_2;

// √3, not yet a stable constant in std
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Coverage at which circles in a hexagonal cell first touch their neighbours
pub const HEX_CIRCLE_THRESHOLD: f64 = PI / (2.0 * SQRT_3);

/// Coverage at which circles in a square cell first touch their neighbours
pub const SQUARE_CIRCLE_THRESHOLD: f64 = PI / 4.0;

/// Shape-family specific radius solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AreaSolver {
    /// Pointy-top hexagon in a hexagonal cell, radius is the circumradius
    Hexagon,
    /// Square or diamond in a square cell, radius is the side length
    Square,
    /// Equilateral triangle, radius is the triangle height
    Triangle,
    /// Circle in a hexagonal cell
    HexCircle,
    /// Circle in a square cell
    SquareCircle,
    /// Plus-shaped cross; radius is the bar thickness
    Cross {
        /// Cross bar length in lattice units, must be below `3A/4`
        bar_length: f64,
    },
}

impl AreaSolver {
    /// Radius giving `want_rate` coverage of a cell with lattice spacing `spacing`
    ///
    /// `want_rate` is clamped to `[0, 1]`; NaN is treated as 0.
    pub fn solve(self, want_rate: f64, spacing: f64) -> f64 {
        let w = if want_rate.is_nan() {
            0.0
        } else {
            want_rate.clamp(0.0, 1.0)
        };
        let a = spacing;
        if w <= 0.0 {
            return 0.0;
        }

        let radius = match self {
            Self::Hexagon => a * (w / 3.0).sqrt(),
            Self::Square => a * w.sqrt(),
            Self::Triangle => 1.5 * a * w.sqrt(),
            Self::HexCircle => hex_circle_radius(w, a),
            Self::SquareCircle => square_circle_radius(w, a),
            Self::Cross { bar_length } => cross_radius(w, a, bar_length),
        };

        if radius.is_finite() { radius.max(0.0) } else { 0.0 }
    }

    /// Radius at full coverage
    pub fn max_radius(self, spacing: f64) -> f64 {
        self.solve(1.0, spacing)
    }
}

/// Mean of accumulated samples as a fraction of full intensity
///
/// Returns `None` for a seed without samples, which is never emitted.
pub fn want_rate(samples: &[u8]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: u64 = samples.iter().map(|&s| u64::from(s)).sum();
    Some(total as f64 / samples.len() as f64 / 255.0)
}

// Below the threshold the circle lies inside its cell. Above it, coverage is
// modelled as a parabola saturating at the cell circumradius.
fn hex_circle_radius(w: f64, a: f64) -> f64 {
    if w < HEX_CIRCLE_THRESHOLD {
        let k = SQRT_3 * a * a / (2.0 * PI);
        (w * k).sqrt()
    } else {
        let d = 2.0 * SQRT_3 * (PI - 2.0 * SQRT_3) / (a * a * 4.0f64.mul_add(-SQRT_3, 7.0));
        a / SQRT_3 - ((w - 1.0) / d).max(0.0).sqrt()
    }
}

fn square_circle_radius(w: f64, a: f64) -> f64 {
    if w < SQUARE_CIRCLE_THRESHOLD {
        (w * a * a / PI).sqrt()
    } else {
        let d3 = (PI - 4.0) / (a * a * 2.0f64.mul_add(-SQRT_2, 3.0));
        a / SQRT_2 - ((w - 1.0) / d3).max(0.0).sqrt()
    }
}

fn cross_radius(w: f64, a: f64, c: f64) -> f64 {
    let denominator = 4.0f64.mul_add(-c, 3.0 * a);
    if denominator <= 0.0 {
        return 0.0;
    }
    let discriminant = (2.25 * a * a * w) - (3.0 * a * c * w) + c * c;
    (a * discriminant.max(0.0).sqrt() - a * c) / denominator
}
