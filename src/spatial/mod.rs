//! Spatial data structures for seed placement and lookup
//!
//! This module contains spatial-related functionality including:
//! - Lattice generation for every tiling strategy
//! - Bucketed nearest-seed lookup
//! - The downsampled working raster

/// Bucket grid for approximate nearest-seed queries
pub mod index;
/// Seed lattices per tiling strategy
pub mod lattice;
/// Downsampled RGBA working raster
pub mod raster;

pub use index::SpatialIndex;
pub use lattice::{LatticeStrategy, Seed};
