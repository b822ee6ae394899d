//! Tile outlines and the backends that draw them
//!
//! - Shape outlines as abstract path operations
//! - SVG path data serialization
//! - Canvas execution onto a raster surface

/// Canvas trait, outline executor and raster surface
pub mod canvas;
/// Backend-independent tile geometry and orientation tracking
pub mod geometry;
/// SVG path data and document output
pub mod svg;
