//! Coarse bucket grid for approximate nearest-seed lookup
//!
//! Seeds are filed into square buckets of [`BUCKET_SIZE`] units. A query
//! only inspects the bucket containing the query point and its eight
//! neighbours, so the result is the true nearest seed whenever the lattice
//! spacing does not exceed the bucket size. With wider spacings a query can
//! miss a closer seed two buckets away; callers accept that approximation.

use crate::io::configuration::BUCKET_SIZE;
use crate::spatial::lattice::Seed;
use std::collections::HashMap;

/// One seed reference stored in a bucket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketEntry {
    /// Seed horizontal position
    pub x: f64,
    /// Seed vertical position
    pub y: f64,
    /// Index of the seed in generation order
    pub seed_index: usize,
}

/// Bucket key for a position, `(ceil(x / size), ceil(y / size))`
pub fn bucket_key(x: f64, y: f64) -> (i32, i32) {
    (
        (x / BUCKET_SIZE).ceil() as i32,
        (y / BUCKET_SIZE).ceil() as i32,
    )
}

/// Spatial hash over seed positions
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    buckets: HashMap<(i32, i32), Vec<BucketEntry>>,
    len: usize,
}

impl SpatialIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over every seed, preserving generation order per bucket
    pub fn from_seeds(seeds: &[Seed]) -> Self {
        let mut index = Self::new();
        for (seed_index, seed) in seeds.iter().enumerate() {
            index.insert(seed.x, seed.y, seed_index);
        }
        index
    }

    /// File a seed into the bucket covering `(x, y)`
    pub fn insert(&mut self, x: f64, y: f64, seed_index: usize) {
        self.buckets
            .entry(bucket_key(x, y))
            .or_default()
            .push(BucketEntry { x, y, seed_index });
        self.len += 1;
    }

    /// Number of indexed seeds
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no seeds
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entries of one bucket
    pub fn bucket(&self, key: (i32, i32)) -> &[BucketEntry] {
        self.buckets.get(&key).map_or(&[], Vec::as_slice)
    }

    /// Entries in the 3×3 bucket neighbourhood around `(qx, qy)`
    ///
    /// Buckets are visited row by row from the top-left neighbour, so the
    /// iteration order is deterministic.
    pub fn candidates(&self, qx: f64, qy: f64) -> impl Iterator<Item = &BucketEntry> + '_ {
        let (bx, by) = bucket_key(qx, qy);
        (-1..=1)
            .flat_map(move |dy| (-1..=1).map(move |dx| (bx + dx, by + dy)))
            .flat_map(move |key| self.bucket(key).iter())
    }

    /// Nearest seed among the neighbourhood candidates
    ///
    /// Distances are compared squared; on ties the first candidate seen wins.
    /// Returns `None` when the neighbourhood is empty.
    pub fn nearest(&self, qx: f64, qy: f64) -> Option<usize> {
        nearest_of(self.candidates(qx, qy), qx, qy)
    }
}

/// Nearest entry by squared distance, first-seen wins ties
pub fn nearest_of<'a>(
    entries: impl Iterator<Item = &'a BucketEntry>,
    qx: f64,
    qy: f64,
) -> Option<usize> {
    let mut best: Option<(f64, usize)> = None;
    for entry in entries {
        let dx = entry.x - qx;
        let dy = entry.y - qy;
        let distance = dx.mul_add(dx, dy * dy);
        match best {
            Some((best_distance, _)) if distance >= best_distance => {}
            _ => best = Some((distance, entry.seed_index)),
        }
    }
    best.map(|(_, index)| index)
}
