//! Footprint geometry for a synthesized terrain patch
//!
//! A footprint describes the square patch of world being synthesized: its
//! physical side length, the full-resolution sample count, and the coarse
//! divisor that groups full-resolution samples into region cells. All
//! derived grid math (coarse dimensions, sample spacing, cell centers)
//! lives here so the classifier, blender, and weight generator agree on it.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Default number of full-resolution samples spanned by one coarse region
/// cell per axis.
pub const DEFAULT_COARSE_DIVISOR: usize = 16;

/// Square terrain patch descriptor.
///
/// Heightfields generated for this footprint are `resolution x resolution`
/// samples in row-major order; the region partition is
/// `coarse_dim x coarse_dim` cells. Parameters are validated by the
/// synthesis entry point before any buffer is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainFootprint {
    /// Physical side length in meters
    pub size: f32,
    /// Number of elevation samples per axis
    pub resolution: usize,
    /// Full-resolution samples per coarse region cell, per axis
    pub coarse_divisor: usize,
}

impl TerrainFootprint {
    /// Create a footprint with the default coarse divisor.
    #[must_use]
    pub fn new(size: f32, resolution: usize) -> Self {
        Self {
            size,
            resolution,
            coarse_divisor: DEFAULT_COARSE_DIVISOR,
        }
    }

    /// Override the coarse divisor.
    #[must_use]
    pub fn with_coarse_divisor(mut self, coarse_divisor: usize) -> Self {
        self.coarse_divisor = coarse_divisor;
        self
    }

    /// Coarse region grid dimension per axis.
    ///
    /// Rounds `resolution / coarse_divisor` up, never below one cell: a
    /// footprint smaller than a single coarse cell (e.g. resolution 4 with
    /// divisor 16) still classifies as one region.
    #[must_use]
    pub fn coarse_dim(&self) -> usize {
        self.resolution.div_ceil(self.coarse_divisor).max(1)
    }

    /// World-space distance between adjacent full-resolution samples, in
    /// meters.
    #[must_use]
    pub fn sample_spacing(&self) -> f32 {
        self.size / self.resolution as f32
    }

    /// World-space side length of one coarse region cell, in meters.
    ///
    /// Edge cells may be cropped when `coarse_divisor` does not divide
    /// `resolution`; this is the nominal (uncropped) size.
    #[must_use]
    pub fn coarse_cell_size(&self) -> f32 {
        self.coarse_divisor as f32 * self.sample_spacing()
    }

    /// World-space center of the coarse cell `(gx, gz)`.
    ///
    /// Uses the nominal cell size; the nominal center of a cropped edge
    /// cell can fall outside the footprint, which the nearest-seed
    /// classification tolerates (it only compares distances).
    #[must_use]
    pub fn coarse_cell_center(&self, gx: usize, gz: usize) -> Point2<f32> {
        let cell = self.coarse_cell_size();
        Point2::new((gx as f32 + 0.5) * cell, (gz as f32 + 0.5) * cell)
    }

    /// World-space position of the full-resolution sample `(x, z)`.
    #[must_use]
    pub fn sample_position(&self, x: usize, z: usize) -> (f32, f32) {
        let spacing = self.sample_spacing();
        (x as f32 * spacing, z as f32 * spacing)
    }
}

impl Default for TerrainFootprint {
    /// 1 km patch sampled at 513 per axis (a common heightmap resolution).
    fn default() -> Self {
        Self::new(1000.0, 513)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_coarse_divisor() {
        let fp = TerrainFootprint::new(500.0, 256);
        assert_eq!(fp.coarse_divisor, DEFAULT_COARSE_DIVISOR);
        assert_eq!(fp.coarse_dim(), 16);
    }

    #[test]
    fn test_coarse_dim_rounds_up() {
        let fp = TerrainFootprint::new(500.0, 100).with_coarse_divisor(16);
        // 100 / 16 = 6.25 -> 7 cells, last one cropped
        assert_eq!(fp.coarse_dim(), 7);
    }

    #[test]
    fn test_coarse_dim_floors_at_one_cell() {
        let fp = TerrainFootprint::new(500.0, 4).with_coarse_divisor(16);
        assert_eq!(fp.coarse_dim(), 1);
    }

    #[test]
    fn test_sample_spacing() {
        let fp = TerrainFootprint::new(1000.0, 250);
        assert_relative_eq!(fp.sample_spacing(), 4.0);
        assert_relative_eq!(fp.coarse_cell_size(), 64.0);
    }

    #[test]
    fn test_coarse_cell_center() {
        let fp = TerrainFootprint::new(1000.0, 250).with_coarse_divisor(25);
        // cell size = 25 * 4 m = 100 m
        let center = fp.coarse_cell_center(0, 0);
        assert_relative_eq!(center.x, 50.0);
        assert_relative_eq!(center.y, 50.0);

        let center = fp.coarse_cell_center(3, 7);
        assert_relative_eq!(center.x, 350.0);
        assert_relative_eq!(center.y, 750.0);
    }

    #[test]
    fn test_sample_position() {
        let fp = TerrainFootprint::new(512.0, 256);
        let (x, z) = fp.sample_position(128, 64);
        assert_relative_eq!(x, 256.0);
        assert_relative_eq!(z, 128.0);
    }
}
