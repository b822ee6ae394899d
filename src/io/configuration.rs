//! Engine constants and runtime render configuration

use crate::algorithm::shapes::ShapeKind;
use crate::io::error::{HalftoneError, Result, invalid_configuration};
use std::fmt;
use std::str::FromStr;

/// Default output-pixel spacing between tile centers
pub const DEFAULT_DISTANCE_BETWEEN: f64 = 7.0;

// The working raster is scaled so that tiles are always this many pixels apart
/// Divisor turning `distance_between` into the internal scale factor
pub const LATTICE_DIVISOR: f64 = 3.0;

// Sources larger than this are downsampled before the lattice is laid out
/// Maximum source dimension sampled at full resolution
pub const MAX_SOURCE_DIMENSION: f64 = 1000.0;

// Caps the per-pixel owner table and raster allocations
/// Largest working raster, in pixels, an engine will lay a lattice over
pub const MAX_WORKING_PIXELS: u64 = 4_000_000;

/// Side length of one spatial index bucket in lattice units
pub const BUCKET_SIZE: f64 = 10.0;

/// Default ink colour for raster output (opaque black)
pub const DEFAULT_FILL: [u8; 4] = [0, 0, 0, 255];

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_halftone";
/// Input extensions picked up when the CLI target is a directory
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Output backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Renderer {
    /// Bare SVG path data (`d` attribute contents)
    #[default]
    SvgPath,
    /// Complete SVG document wrapping the path data
    Svg,
    /// Raster surface filled through the canvas backend
    Canvas,
}

impl Renderer {
    /// Canonical lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SvgPath => "svgpath",
            Self::Svg => "svg",
            Self::Canvas => "canvas",
        }
    }

    /// Whether this renderer draws onto a raster surface
    pub const fn is_raster(self) -> bool {
        matches!(self, Self::Canvas)
    }

    /// File extension used when the CLI writes this renderer's output
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::SvgPath => "path",
            Self::Svg => "svg",
            Self::Canvas => "png",
        }
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Renderer {
    type Err = HalftoneError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svgpath" => Ok(Self::SvgPath),
            "svg" => Ok(Self::Svg),
            "canvas" => Ok(Self::Canvas),
            _ => Err(HalftoneError::UnsupportedRenderer {
                name: s.to_string(),
            }),
        }
    }
}

/// Pixel size of a raster output surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSize {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
}

/// Options recognised by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Spacing between tile centers in output pixels
    pub distance_between: f64,
    /// Output backend
    pub renderer: Renderer,
    /// Canvas surface size; source size when absent (canvas renderer only)
    pub output_size: Option<OutputSize>,
    /// Use the green channel directly instead of its complement
    pub inverse: bool,
    /// Record per-phase timing spans
    pub benchmark: bool,
    /// Cross bar length in output pixels (cross shape only)
    pub cross_bar_length: Option<f64>,
    /// Ink colour used by the canvas renderer
    pub fill: [u8; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            distance_between: DEFAULT_DISTANCE_BETWEEN,
            renderer: Renderer::default(),
            output_size: None,
            inverse: false,
            benchmark: false,
            cross_bar_length: None,
            fill: DEFAULT_FILL,
        }
    }
}

impl RenderConfig {
    /// Ratio between output pixels and working raster pixels
    pub fn scale(&self) -> f64 {
        self.distance_between / LATTICE_DIVISOR
    }

    /// Distance between seeds in the working raster
    pub fn spacing(&self) -> f64 {
        self.distance_between / self.scale()
    }

    /// Cross bar length in output pixels, defaulting to half the tile spacing
    pub fn cross_bar_length(&self) -> f64 {
        self.cross_bar_length.unwrap_or(self.distance_between / 2.0)
    }

    /// Cross bar length expressed in working raster units
    pub fn lattice_cross_bar_length(&self) -> f64 {
        self.cross_bar_length() / self.scale()
    }

    /// Check every option against the chosen shape
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `distance_between` is not a positive finite number
    /// - the shape is a cross and the bar length is not in `(0, 3A/4)`
    /// - `output_size` is zero-sized or given for a non-canvas renderer
    pub fn validate(&self, shape: ShapeKind) -> Result<()> {
        if !self.distance_between.is_finite() || self.distance_between <= 0.0 {
            return Err(invalid_configuration(
                "distance_between",
                &self.distance_between,
                &"must be a positive finite number",
            ));
        }

        if shape == ShapeKind::Cross {
            // Same bound as `3A/4` in lattice units, checked before scaling
            let bar = self.cross_bar_length();
            let limit = 0.75 * self.distance_between;
            if !bar.is_finite() || bar <= 0.0 || bar >= limit {
                return Err(invalid_configuration(
                    "cross_bar_length",
                    &bar,
                    &format!("must be greater than 0 and less than {limit}"),
                ));
            }
        } else if let Some(length) = self.cross_bar_length {
            log::warn!("cross_bar_length {length} ignored for shape {shape}");
        }

        if let Some(size) = self.output_size {
            if !self.renderer.is_raster() {
                return Err(invalid_configuration(
                    "output_size",
                    &format!("{}x{}", size.width, size.height),
                    &"only the canvas renderer has a sized output surface",
                ));
            }
            if size.width == 0 || size.height == 0 {
                return Err(invalid_configuration(
                    "output_size",
                    &format!("{}x{}", size.width, size.height),
                    &"width and height must be non-zero",
                ));
            }
        }

        Ok(())
    }
}
