//! Backend-independent tile outlines
//!
//! Every shape is described once as an ordered list of [`PathOp`]s. The SVG
//! serializer and the canvas executor both consume that list, so the two
//! outputs share vertex geometry by construction.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

// √3, not yet a stable constant in std
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// One abstract vector drawing operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    /// Start a new subpath
    MoveTo {
        /// Target x
        x: f64,
        /// Target y
        y: f64,
    },
    /// Straight segment from the current point
    LineTo {
        /// Target x
        x: f64,
        /// Target y
        y: f64,
    },
    /// Clockwise (screen space) arc with increasing angle
    Arc {
        /// Center x
        cx: f64,
        /// Center y
        cy: f64,
        /// Arc radius
        radius: f64,
        /// Start angle in radians
        start: f64,
        /// End angle in radians
        end: f64,
    },
    /// Close the current subpath
    Close,
}

/// Direction a triangle's apex points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Apex above the base
    Up,
    /// Apex below the base
    Down,
    /// Apex left of the base
    Left,
    /// Apex right of the base
    Right,
}

/// Row and column counters replaying lattice parity during emission
///
/// A fresh tracker is created for every render. Call [`advance`] once per seed
/// in generation order, emitted or not; the column counter resets and the row
/// counter advances whenever a seed starts a new row.
///
/// [`advance`]: OrientationTracker::advance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrientationTracker {
    row: usize,
    col: usize,
    started: bool,
}

impl OrientationTracker {
    /// Tracker positioned before the first seed
    pub const fn new() -> Self {
        Self {
            row: 0,
            col: 0,
            started: false,
        }
    }

    /// Step to the next seed; `true` when `row + col` is even
    pub const fn advance(&mut self, row_start: bool) -> bool {
        if row_start {
            if self.started {
                self.row += 1;
            }
            self.col = 0;
        }
        self.started = true;
        let even = (self.row + self.col) % 2 == 0;
        self.col += 1;
        even
    }

    /// Current `(row, column)` of the next seed
    pub const fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// Shape of one emitted tile with its shape-specific parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileShape {
    /// Pointy-top hexagon, radius is the circumradius
    Hexagon,
    /// Circle, radius is the circle radius
    Circle,
    /// Axis-aligned square, radius is the side length
    Square,
    /// Square rotated 45 degrees, radius is the side length
    Diamond,
    /// Equilateral triangle centred on its centroid, radius is the height
    Triangle(Orientation),
    /// Plus sign, radius is the bar thickness
    Cross {
        /// Tip-to-tip length of each bar
        span: f64,
    },
}

/// A placed tile ready for emission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Center x
    pub cx: f64,
    /// Center y
    pub cy: f64,
    /// Shape size parameter
    pub radius: f64,
    /// Shape and its orientation or secondary size
    pub shape: TileShape,
}

impl Tile {
    /// Uniformly scale position and every size parameter
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        let shape = match self.shape {
            TileShape::Cross { span } => TileShape::Cross {
                span: span * factor,
            },
            other => other,
        };
        Self {
            cx: self.cx * factor,
            cy: self.cy * factor,
            radius: self.radius * factor,
            shape,
        }
    }

    /// Outline operations for this tile
    pub fn outline(&self) -> Vec<PathOp> {
        let (cx, cy, r) = (self.cx, self.cy, self.radius);
        match self.shape {
            TileShape::Hexagon => hexagon(cx, cy, r),
            TileShape::Circle => circle(cx, cy, r),
            TileShape::Square => square(cx, cy, r),
            TileShape::Diamond => diamond(cx, cy, r),
            TileShape::Triangle(orientation) => triangle(cx, cy, r, orientation),
            TileShape::Cross { span } => cross(cx, cy, r, span),
        }
    }
}

fn polygon(points: &[(f64, f64)]) -> Vec<PathOp> {
    let mut ops = Vec::with_capacity(points.len() + 1);
    for (i, &(x, y)) in points.iter().enumerate() {
        if i == 0 {
            ops.push(PathOp::MoveTo { x, y });
        } else {
            ops.push(PathOp::LineTo { x, y });
        }
    }
    ops.push(PathOp::Close);
    ops
}

/// Pointy-top hexagon with circumradius `r`
pub fn hexagon(cx: f64, cy: f64, r: f64) -> Vec<PathOp> {
    let points: Vec<(f64, f64)> = (0..6)
        .map(|k| {
            let angle = (f64::from(k) * 60.0 - 90.0).to_radians();
            (r.mul_add(angle.cos(), cx), r.mul_add(angle.sin(), cy))
        })
        .collect();
    polygon(&points)
}

/// Full circle of radius `r`
pub fn circle(cx: f64, cy: f64, r: f64) -> Vec<PathOp> {
    vec![
        PathOp::MoveTo { x: cx + r, y: cy },
        PathOp::Arc {
            cx,
            cy,
            radius: r,
            start: 0.0,
            end: 2.0 * PI,
        },
        PathOp::Close,
    ]
}

/// Axis-aligned square with side `side`
pub fn square(cx: f64, cy: f64, side: f64) -> Vec<PathOp> {
    let h = side / 2.0;
    polygon(&[
        (cx - h, cy - h),
        (cx + h, cy - h),
        (cx + h, cy + h),
        (cx - h, cy + h),
    ])
}

/// Square of side `side` standing on a corner
pub fn diamond(cx: f64, cy: f64, side: f64) -> Vec<PathOp> {
    let q = side * FRAC_1_SQRT_2;
    polygon(&[(cx, cy - q), (cx + q, cy), (cx, cy + q), (cx - q, cy)])
}

/// Equilateral triangle of height `height` centred on its centroid
pub fn triangle(cx: f64, cy: f64, height: f64, orientation: Orientation) -> Vec<PathOp> {
    let apex = height * 2.0 / 3.0;
    let base = height / 3.0;
    let half = height / SQRT_3;
    let points = match orientation {
        Orientation::Up => [
            (cx, cy - apex),
            (cx + half, cy + base),
            (cx - half, cy + base),
        ],
        Orientation::Down => [
            (cx, cy + apex),
            (cx - half, cy - base),
            (cx + half, cy - base),
        ],
        Orientation::Right => [
            (cx + apex, cy),
            (cx - base, cy + half),
            (cx - base, cy - half),
        ],
        Orientation::Left => [
            (cx - apex, cy),
            (cx + base, cy - half),
            (cx + base, cy + half),
        ],
    };
    polygon(&points)
}

/// Plus sign with bar thickness `thickness` and tip-to-tip length `span`
pub fn cross(cx: f64, cy: f64, thickness: f64, span: f64) -> Vec<PathOp> {
    let h = thickness / 2.0;
    let s = (span / 2.0).max(h);
    polygon(&[
        (cx - h, cy - s),
        (cx + h, cy - s),
        (cx + h, cy - h),
        (cx + s, cy - h),
        (cx + s, cy + h),
        (cx + h, cy + h),
        (cx + h, cy + s),
        (cx - h, cy + s),
        (cx - h, cy + h),
        (cx - s, cy + h),
        (cx - s, cy - h),
        (cx - h, cy - h),
    ])
}
