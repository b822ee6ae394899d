//! Mathematical utilities for tile sizing

/// Inverse area functions converting coverage into tile radius
pub mod area;
