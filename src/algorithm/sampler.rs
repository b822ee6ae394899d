//! Pixel-to-seed assignment and luminance accumulation
//!
//! Every working raster pixel belongs to the seed nearest to it, an implicit
//! Voronoi partition of the raster. The partition only depends on the lattice,
//! so it is computed once per lattice and replayed on every sampling pass.

use crate::spatial::index::{BucketEntry, SpatialIndex, nearest_of};
use crate::spatial::lattice::Seed;
use crate::spatial::raster::WorkingRaster;
use bitvec::prelude::*;

/// Nearest-seed owner of every raster pixel
#[derive(Debug, Clone)]
pub struct Assignment {
    width: usize,
    height: usize,
    owners: Vec<usize>,
    covered: BitVec,
    fallbacks: usize,
}

impl Assignment {
    /// Assign each pixel of a `width × height` raster to its nearest seed
    ///
    /// Candidates come from the 3×3 bucket neighbourhood. When that
    /// neighbourhood is empty the pixel falls back to a linear search over
    /// all seeds; it stays unassigned only if there are no seeds at all.
    pub fn build(width: usize, height: usize, seeds: &[Seed], index: &SpatialIndex) -> Self {
        let pixel_count = width * height;
        let mut owners = vec![0; pixel_count];
        let mut covered = bitvec![0; pixel_count];
        let mut fallbacks = 0;

        let all_entries: Vec<BucketEntry> = seeds
            .iter()
            .enumerate()
            .map(|(seed_index, seed)| BucketEntry {
                x: seed.x,
                y: seed.y,
                seed_index,
            })
            .collect();

        for y in 0..height {
            for x in 0..width {
                let (qx, qy) = (x as f64, y as f64);
                let owner = index.nearest(qx, qy).or_else(|| {
                    fallbacks += 1;
                    nearest_of(all_entries.iter(), qx, qy)
                });

                if let Some(seed_index) = owner {
                    let pixel = y * width + x;
                    if let Some(slot) = owners.get_mut(pixel) {
                        *slot = seed_index;
                    }
                    covered.set(pixel, true);
                }
            }
        }

        if fallbacks > 0 {
            log::warn!(
                "{fallbacks} pixels had no seed in their bucket neighbourhood; used global search"
            );
        }

        Self {
            width,
            height,
            owners,
            covered,
            fallbacks,
        }
    }

    /// Owning seed of a pixel, `None` if out of bounds or unassigned
    pub fn owner(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let pixel = y * self.width + x;
        if self.covered.get(pixel).as_deref() == Some(&true) {
            self.owners.get(pixel).copied()
        } else {
            None
        }
    }

    /// Number of pixels that were assigned a seed
    pub fn covered_count(&self) -> usize {
        self.covered.count_ones()
    }

    /// Number of pixels in the raster
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Pixels resolved by the global fallback search
    pub const fn fallbacks(&self) -> usize {
        self.fallbacks
    }

    /// Raster dimensions `(width, height)` this assignment was built for
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Sample value for a green channel reading
///
/// Dark pixels carry more ink, so the channel is inverted unless `inverse`.
pub const fn sample_value(green: u8, inverse: bool) -> u8 {
    if inverse { green } else { 255 - green }
}

/// Refill every seed's samples from the raster using a precomputed assignment
///
/// Samples are appended in raster scan order. Previous samples are discarded.
pub fn accumulate(
    raster: &WorkingRaster,
    assignment: &Assignment,
    seeds: &mut [Seed],
    inverse: bool,
) {
    for seed in seeds.iter_mut() {
        seed.samples.clear();
    }

    for y in 0..raster.height() {
        for x in 0..raster.width() {
            let (Some(owner), Some(green)) = (assignment.owner(x, y), raster.green(x, y)) else {
                continue;
            };
            if let Some(seed) = seeds.get_mut(owner) {
                seed.samples.push(sample_value(green, inverse));
            }
        }
    }
}
