//! Shape registry bundling lattice, radius solver and outline per tiling
//!
//! [`ShapeKind`] is the closed set of supported tilings. [`Shape`] binds a
//! kind to the spacing and cross bar length of one configuration and is the
//! only interface the engine talks to.

use crate::emit::geometry::{Orientation, OrientationTracker, Tile, TileShape};
use crate::io::configuration::RenderConfig;
use crate::io::error::{HalftoneError, Result};
use crate::math::area::AreaSolver;
use crate::spatial::lattice::{LatticeStrategy, Seed};
use std::fmt;
use std::str::FromStr;

/// Supported halftone tilings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Hexagons on a hexagonal lattice
    Hexagon,
    /// Circles on a hexagonal lattice
    Circle,
    /// Circles on a square lattice
    AltCircle,
    /// Squares on a square lattice
    Square,
    /// Squares on a square lattice with offset rows
    OffsetSquare,
    /// Diamonds on a rotated square lattice
    Diamond,
    /// Up and down triangles in horizontal strips
    Triangle,
    /// Left and right triangles in vertical strips
    AltTriangle,
    /// Plus-shaped crosses on offset rows
    Cross,
    /// Circles on a square lattice with sinusoidal rows
    Wave,
    /// Circles on concentric rings around the image center
    ConcentricRings,
    /// Circles on a golden-angle spiral around the image center
    Phyllotaxis,
}

impl ShapeKind {
    /// Every supported shape in declaration order
    pub const ALL: [Self; 12] = [
        Self::Hexagon,
        Self::Circle,
        Self::AltCircle,
        Self::Square,
        Self::OffsetSquare,
        Self::Diamond,
        Self::Triangle,
        Self::AltTriangle,
        Self::Cross,
        Self::Wave,
        Self::ConcentricRings,
        Self::Phyllotaxis,
    ];

    /// Canonical kebab-case name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hexagon => "hexagon",
            Self::Circle => "circle",
            Self::AltCircle => "alt-circle",
            Self::Square => "square",
            Self::OffsetSquare => "offset-square",
            Self::Diamond => "diamond",
            Self::Triangle => "triangle",
            Self::AltTriangle => "alt-triangle",
            Self::Cross => "cross",
            Self::Wave => "wave",
            Self::ConcentricRings => "rings",
            Self::Phyllotaxis => "phyllotaxis",
        }
    }

    /// Seed placement strategy
    pub const fn lattice(self) -> LatticeStrategy {
        match self {
            Self::Hexagon | Self::Circle => LatticeStrategy::Hex,
            Self::AltCircle | Self::Square => LatticeStrategy::Square,
            Self::OffsetSquare => LatticeStrategy::OffsetSquare,
            Self::Diamond => LatticeStrategy::Diamond,
            Self::Triangle => LatticeStrategy::Triangle,
            Self::AltTriangle => LatticeStrategy::AltTriangle,
            Self::Cross => LatticeStrategy::Cross,
            Self::Wave => LatticeStrategy::Wave,
            Self::ConcentricRings => LatticeStrategy::ConcentricRings,
            Self::Phyllotaxis => LatticeStrategy::Phyllotaxis,
        }
    }

    /// Radius solver for a cross bar length given in lattice units
    pub const fn solver(self, bar_length: f64) -> AreaSolver {
        match self {
            Self::Hexagon => AreaSolver::Hexagon,
            Self::Square | Self::OffsetSquare | Self::Diamond => AreaSolver::Square,
            Self::Triangle | Self::AltTriangle => AreaSolver::Triangle,
            Self::Circle | Self::ConcentricRings | Self::Phyllotaxis => AreaSolver::HexCircle,
            Self::AltCircle | Self::Wave => AreaSolver::SquareCircle,
            Self::Cross => AreaSolver::Cross { bar_length },
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Longer names accepted besides the canonical ones, without separators
const SHAPE_ALIASES: [(&str, ShapeKind); 1] = [("concentricring", ShapeKind::ConcentricRings)];

impl FromStr for ShapeKind {
    type Err = HalftoneError;

    /// Parse a shape name, ignoring case, dashes, underscores and a plural `s`
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        let singular = normalized.strip_suffix('s').unwrap_or(&normalized);

        if let Some(&(_, kind)) = SHAPE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized || *alias == singular)
        {
            return Ok(kind);
        }

        Self::ALL
            .into_iter()
            .find(|kind| {
                let name = kind.name().replace('-', "");
                name == normalized || name == singular
            })
            .ok_or_else(|| HalftoneError::UnsupportedShape {
                name: s.to_string(),
            })
    }
}

/// A shape bound to one configuration's lattice spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    spacing: f64,
    bar_length: f64,
    solver: AreaSolver,
}

impl Shape {
    /// Bind a shape kind to a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid for this shape
    pub fn new(kind: ShapeKind, config: &RenderConfig) -> Result<Self> {
        config.validate(kind)?;
        let bar_length = config.lattice_cross_bar_length();
        Ok(Self {
            kind,
            spacing: config.spacing(),
            bar_length,
            solver: kind.solver(bar_length),
        })
    }

    /// Look up a shape by name and bind it to a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown or the configuration is invalid
    pub fn from_name(name: &str, config: &RenderConfig) -> Result<Self> {
        Self::new(name.parse()?, config)
    }

    /// Shape kind
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Seed spacing in working raster units
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Radius solver in use
    pub const fn solver(&self) -> AreaSolver {
        self.solver
    }

    /// Lay out seeds over a `width × height` working raster
    ///
    /// # Errors
    ///
    /// Returns an error if the lattice parameters are invalid
    pub fn generate_lattice(&self, width: f64, height: f64) -> Result<Vec<Seed>> {
        self.kind.lattice().generate(width, height, self.spacing)
    }

    /// Radius for a coverage fraction
    pub fn solve(&self, want_rate: f64) -> f64 {
        self.solver.solve(want_rate, self.spacing)
    }

    /// Cross tip-to-tip span for a bar thickness, both in lattice units
    ///
    /// Interpolates from the configured bar length at zero thickness to a full
    /// cell width at maximum thickness.
    pub fn cross_span(&self, thickness: f64) -> f64 {
        let shrink = 1.0 - 2.0 * thickness / self.spacing;
        self.bar_length.mul_add(shrink, 2.0 * thickness)
    }

    /// Tile for a seed in lattice units, advancing the orientation tracker
    ///
    /// The tracker advances for every seed so orientation stays in step with
    /// generation order even when unsampled or empty seeds are skipped.
    pub fn place(&self, seed: &Seed, tracker: &mut OrientationTracker) -> Option<Tile> {
        let even = tracker.advance(seed.row_start);
        if seed.samples.is_empty() || seed.radius <= 0.0 {
            return None;
        }

        let shape = match self.kind {
            ShapeKind::Hexagon => TileShape::Hexagon,
            ShapeKind::Square | ShapeKind::OffsetSquare => TileShape::Square,
            ShapeKind::Diamond => TileShape::Diamond,
            ShapeKind::Triangle => TileShape::Triangle(if even {
                Orientation::Up
            } else {
                Orientation::Down
            }),
            ShapeKind::AltTriangle => TileShape::Triangle(if even {
                Orientation::Right
            } else {
                Orientation::Left
            }),
            ShapeKind::Cross => TileShape::Cross {
                span: self.cross_span(seed.radius),
            },
            ShapeKind::Circle
            | ShapeKind::AltCircle
            | ShapeKind::Wave
            | ShapeKind::ConcentricRings
            | ShapeKind::Phyllotaxis => TileShape::Circle,
        };

        Some(Tile {
            cx: seed.x,
            cy: seed.y,
            radius: seed.radius,
            shape,
        })
    }
}
