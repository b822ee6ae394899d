//! Halftone stylization of raster images
//!
//! An image is downsampled, covered by a lattice of seeds for the chosen
//! tiling, and every pixel contributes its luminance to the nearest seed.
//! Each seed then becomes one tile whose area matches the ink coverage of
//! its neighbourhood, emitted as SVG path data or drawn onto a raster canvas.

#![forbid(unsafe_code)]

/// Engine orchestration, sampling and the shape registry
pub mod algorithm;
/// Tile outlines and SVG/canvas backends
pub mod emit;
/// Input/output operations, configuration and error handling
pub mod io;
/// Inverse area functions for tile sizing
pub mod math;
/// Lattices, spatial index and working raster
pub mod spatial;

pub use algorithm::engine::{HalftoneEngine, Rendered};
pub use algorithm::shapes::{Shape, ShapeKind};
pub use io::configuration::{OutputSize, RenderConfig, Renderer};
pub use io::error::{HalftoneError, Result};
