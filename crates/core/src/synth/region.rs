//! Coarse region partition of the footprint into terrain types.
//!
//! The classifier scatters seed points uniformly over the footprint and
//! assigns every coarse cell the terrain type of its nearest seed, giving
//! blocky Voronoi-style regions for the blender to smooth. Type assignment
//! cycles through the canonical enumeration in seed-insertion order, so the
//! mix of types is a function of seed count alone.

use crate::footprint::TerrainFootprint;
use crate::terrain_types::TerrainType;
use nalgebra::{distance_squared, Point2};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

/// Dense coarse grid of terrain-type assignments.
///
/// Row-major order: `gz * dim + gx`. Carries its coarse divisor so the
/// full-resolution projection used by blending and weight mapping stays in
/// one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMap {
    types: Vec<TerrainType>,
    dim: usize,
    coarse_divisor: usize,
}

impl RegionMap {
    /// Create a map with every cell assigned the given type.
    #[must_use]
    pub fn new(dim: usize, coarse_divisor: usize, fill: TerrainType) -> Self {
        Self {
            types: vec![fill; dim * dim],
            dim,
            coarse_divisor,
        }
    }

    /// Coarse grid dimension per axis.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Full-resolution samples per coarse cell, per axis.
    #[must_use]
    pub fn coarse_divisor(&self) -> usize {
        self.coarse_divisor
    }

    /// Terrain type of cell `(gx, gz)`.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, gx: usize, gz: usize) -> TerrainType {
        assert!(gx < self.dim && gz < self.dim, "Coordinates out of bounds");
        self.types[gz * self.dim + gx]
    }

    /// Assign cell `(gx, gz)`.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, gx: usize, gz: usize, terrain_type: TerrainType) {
        assert!(gx < self.dim && gz < self.dim, "Coordinates out of bounds");
        self.types[gz * self.dim + gx] = terrain_type;
    }

    /// Coarse cell containing full-resolution sample `(x, z)`.
    ///
    /// Integer division clamped to the grid, so samples in a cropped last
    /// cell (or past it, for callers scaling from another resolution) land
    /// on the edge cell instead of out of bounds.
    #[must_use]
    pub fn cell_for_sample(&self, x: usize, z: usize) -> (usize, usize) {
        let gx = (x / self.coarse_divisor).min(self.dim - 1);
        let gz = (z / self.coarse_divisor).min(self.dim - 1);
        (gx, gz)
    }

    /// Distinct terrain types present, in canonical enumeration order.
    #[must_use]
    pub fn present_types(&self) -> Vec<TerrainType> {
        let mut present = [false; TerrainType::COUNT];
        for ty in &self.types {
            present[*ty as usize] = true;
        }
        TerrainType::ALL
            .into_iter()
            .filter(|ty| present[*ty as usize])
            .collect()
    }
}

/// Classify the coarse region grid by nearest seed point.
///
/// Draws `seed_count` points uniformly over the footprint (x then z per
/// point, in insertion order) from the caller-seeded generator, then assigns
/// each coarse cell the type of the seed nearest its world center. Exact
/// distance ties keep the earliest-drawn seed. Seed index `i` maps to
/// `TerrainType::ALL[i % TerrainType::COUNT]`.
///
/// With `seed_count` 0 the generator is never touched and every cell gets
/// `dominant_type`.
#[must_use]
pub fn classify(
    footprint: &TerrainFootprint,
    seed_count: usize,
    dominant_type: TerrainType,
    rng: &mut StdRng,
) -> RegionMap {
    let dim = footprint.coarse_dim();
    let mut map = RegionMap::new(dim, footprint.coarse_divisor, dominant_type);

    if seed_count == 0 {
        debug!("Region classification skipped: 0 seeds, all {dominant_type}");
        return map;
    }

    let seeds: Vec<Point2<f32>> = (0..seed_count)
        .map(|_| {
            let x = rng.random_range(0.0..footprint.size);
            let z = rng.random_range(0.0..footprint.size);
            Point2::new(x, z)
        })
        .collect();

    for gz in 0..dim {
        for gx in 0..dim {
            let center = footprint.coarse_cell_center(gx, gz);

            let mut best_index = 0_usize;
            let mut best_dist = f32::INFINITY;
            for (i, seed) in seeds.iter().enumerate() {
                // Squared distance preserves nearest ordering; strict <
                // keeps the earliest seed on exact ties
                let dist = distance_squared(seed, &center);
                if dist < best_dist {
                    best_dist = dist;
                    best_index = i;
                }
            }

            map.set(gx, gz, TerrainType::ALL[best_index % TerrainType::COUNT]);
        }
    }

    debug!(
        "Classified {dim}x{dim} region grid from {seed_count} seeds, types present: {:?}",
        map.present_types()
    );
    map
}
