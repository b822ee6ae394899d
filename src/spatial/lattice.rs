//! Seed lattice generation for each tiling strategy
//!
//! Row-major strategies walk rows top to bottom and columns left to right,
//! flagging the first seed of every row. Emission later replays seeds in
//! exactly this order, so the order is part of the contract: triangle
//! orientation is derived from it on both sides.

use crate::io::error::{Result, invalid_configuration};
use crate::math::area::want_rate;
use std::f64::consts::PI;

// √3, not yet a stable constant in std
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Golden angle in radians, `π(3 − √5)`
pub const GOLDEN_ANGLE: f64 = PI * (3.0 - 2.236_067_977_499_79);

/// A lattice point that accumulates samples and resolves to one tile
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    /// Horizontal position in working raster units
    pub x: f64,
    /// Vertical position in working raster units
    pub y: f64,
    /// Samples accumulated during the last sampling pass
    pub samples: Vec<u8>,
    /// Radius solved during the last render
    pub radius: f64,
    /// First seed of a lattice row (or ring)
    pub row_start: bool,
}

impl Seed {
    /// Create an empty seed at the given position
    pub const fn new(x: f64, y: f64, row_start: bool) -> Self {
        Self {
            x,
            y,
            samples: Vec::new(),
            radius: 0.0,
            row_start,
        }
    }

    /// Mean sample as a fraction of full intensity, `None` when unsampled
    pub fn want_rate(&self) -> Option<f64> {
        want_rate(&self.samples)
    }
}

/// Tiling strategy used to place seeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeStrategy {
    /// Rows offset by half a step, row height `A·√3/2`
    Hex,
    /// Plain square grid
    Square,
    /// Square grid with odd rows offset by half a step
    OffsetSquare,
    /// Square grid rotated by 45 degrees
    Diamond,
    /// Offset rows with row height `3A/4`
    Cross,
    /// Alternating up and down triangles in horizontal strips
    Triangle,
    /// Alternating left and right triangles in vertical strips
    AltTriangle,
    /// Square grid with rows displaced by `sin(x/4)`
    Wave,
    /// Concentric rings around the image center
    ConcentricRings,
    /// Golden-angle spiral around the image center
    Phyllotaxis,
}

impl LatticeStrategy {
    /// Generate seeds covering a `width × height` raster with spacing `spacing`
    ///
    /// # Errors
    ///
    /// Returns an error if `spacing` is not a positive finite number or the
    /// bounds are negative or not finite
    pub fn generate(self, width: f64, height: f64, spacing: f64) -> Result<Vec<Seed>> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(invalid_configuration(
                "spacing",
                &spacing,
                &"lattice spacing must be a positive finite number",
            ));
        }
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(invalid_configuration(
                "bounds",
                &format!("{width}x{height}"),
                &"lattice bounds must be finite and non-negative",
            ));
        }

        let a = spacing;
        let seeds = match self {
            Self::Hex => offset_rows(width, height, a, a * SQRT_3 / 2.0, a / 2.0),
            Self::Square => offset_rows(width, height, a, a, 0.0),
            Self::OffsetSquare => offset_rows(width, height, a, a, a / 2.0),
            Self::Diamond => {
                let half = a / std::f64::consts::SQRT_2;
                offset_rows(width, height, a * std::f64::consts::SQRT_2, half, half)
            }
            Self::Cross => offset_rows(width, height, a, a * 0.75, a / 2.0),
            Self::Triangle => triangle_rows(width, height, a),
            Self::AltTriangle => triangle_columns(width, height, a),
            Self::Wave => wave_rows(width, height, a),
            Self::ConcentricRings => concentric_rings(width, height, a),
            Self::Phyllotaxis => phyllotaxis(width, height, a),
        };

        Ok(seeds)
    }
}

fn offset_rows(width: f64, height: f64, step: f64, row_height: f64, odd_offset: f64) -> Vec<Seed> {
    let mut seeds = Vec::new();
    let mut row = 0_usize;
    let mut y = 0.0;

    while y <= height {
        let offset = if row % 2 == 1 { odd_offset } else { 0.0 };
        let mut col = 0_usize;
        let mut x = offset;
        while x <= width {
            seeds.push(Seed::new(x, y, col == 0));
            col += 1;
            x = (col as f64).mul_add(step, offset);
        }
        row += 1;
        y = row as f64 * row_height;
    }

    seeds
}

fn wave_rows(width: f64, height: f64, a: f64) -> Vec<Seed> {
    offset_rows(width, height, a, a, 0.0)
        .into_iter()
        .map(|seed| Seed::new(seed.x, seed.y + (seed.x / 4.0).sin(), seed.row_start))
        .collect()
}

// Centroids zig-zag inside each strip: up triangles sit low, down triangles high
fn triangle_rows(width: f64, height: f64, a: f64) -> Vec<Seed> {
    let column_step = a * SQRT_3 / 2.0;
    let strip = 1.5 * a;
    let mut seeds = Vec::new();
    let mut row = 0_usize;

    while row as f64 * strip <= height {
        let top = row as f64 * strip;
        let mut col = 0_usize;
        while col as f64 * column_step <= width {
            let up = (row + col) % 2 == 0;
            let y = top + if up { strip * 2.0 / 3.0 } else { strip / 3.0 };
            seeds.push(Seed::new(col as f64 * column_step, y, col == 0));
            col += 1;
        }
        row += 1;
    }

    seeds
}

fn triangle_columns(width: f64, height: f64, a: f64) -> Vec<Seed> {
    let row_step = a * SQRT_3 / 2.0;
    let strip = 1.5 * a;
    let mut seeds = Vec::new();
    let mut row = 0_usize;

    while row as f64 * row_step <= height {
        let y = row as f64 * row_step;
        let mut col = 0_usize;
        while col as f64 * strip <= width {
            let right = (row + col) % 2 == 0;
            let left_edge = col as f64 * strip;
            let x = left_edge + if right { strip / 3.0 } else { strip * 2.0 / 3.0 };
            seeds.push(Seed::new(x, y, col == 0));
            col += 1;
        }
        row += 1;
    }

    seeds
}

fn bounding_radius(width: f64, height: f64) -> f64 {
    width.hypot(height) / 2.0
}

fn concentric_rings(width: f64, height: f64, a: f64) -> Vec<Seed> {
    let (cx, cy) = (width / 2.0, height / 2.0);
    let limit = bounding_radius(width, height);
    let ring_step = a * SQRT_3 / 2.0;
    let mut seeds = vec![Seed::new(cx, cy, true)];

    let mut ring = 1_usize;
    while ring as f64 * ring_step <= limit {
        let radius = ring as f64 * ring_step;
        let points = 6 * ring;
        let angle_step = 2.0 * PI / points as f64;
        for i in 0..points {
            let angle = i as f64 * angle_step;
            seeds.push(Seed::new(
                radius.mul_add(angle.cos(), cx),
                radius.mul_add(angle.sin(), cy),
                i == 0,
            ));
        }
        ring += 1;
    }

    seeds
}

fn phyllotaxis(width: f64, height: f64, a: f64) -> Vec<Seed> {
    let (cx, cy) = (width / 2.0, height / 2.0);
    let limit = bounding_radius(width, height);
    let mut seeds = Vec::new();

    let mut n = 0_usize;
    loop {
        let radius = a / 2.0 * (n as f64).sqrt();
        if radius > limit {
            break;
        }
        let angle = n as f64 * GOLDEN_ANGLE;
        seeds.push(Seed::new(
            radius.mul_add(angle.cos(), cx),
            radius.mul_add(angle.sin(), cy),
            n == 0,
        ));
        n += 1;
    }

    seeds
}
