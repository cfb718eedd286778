//! Dense heightfield containers.
//!
//! Heightfields are square full-resolution grids of normalized elevation
//! stored as flat `Vec<f32>` in row-major order. The per-type set holds one
//! field per terrain type present in the region partition, indexed by the
//! type's position in the canonical enumeration for cheap hot-loop lookup.

use crate::terrain_types::TerrainType;

/// Square normalized heightfield.
///
/// Values are elevations in [0, 1] (normalized against the elevation
/// ceiling before blending). Row-major order: `z * resolution + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    /// Height values in row-major order (z * resolution + x)
    pub data: Vec<f32>,
    /// Samples per axis
    pub resolution: usize,
}

impl Heightfield {
    /// Create a new heightfield with the given resolution, initialized to
    /// zero.
    #[must_use]
    pub fn new(resolution: usize) -> Self {
        Self {
            data: vec![0.0; resolution * resolution],
            resolution,
        }
    }

    /// Create a new heightfield initialized to a value.
    #[must_use]
    pub fn with_value(resolution: usize, value: f32) -> Self {
        Self {
            data: vec![value; resolution * resolution],
            resolution,
        }
    }

    /// Get reference to height data
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable reference to height data
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get height at sample position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, z: usize) -> f32 {
        assert!(
            x < self.resolution && z < self.resolution,
            "Coordinates out of bounds"
        );
        self.data[z * self.resolution + x]
    }

    /// Set height at sample position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, x: usize, z: usize, value: f32) {
        assert!(
            x < self.resolution && z < self.resolution,
            "Coordinates out of bounds"
        );
        self.data[z * self.resolution + x] = value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Minimum height in the field.
    #[must_use]
    pub fn min(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Maximum height in the field.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Bilinearly interpolated height at a world position.
    ///
    /// `spacing` is the world distance between adjacent samples (see the
    /// footprint). Positions outside the field clamp to the edge samples,
    /// so queries slightly past the border stay well-defined.
    #[must_use]
    pub fn sample_at(&self, wx: f32, wz: f32, spacing: f32) -> f32 {
        let max_idx = (self.resolution - 1) as f32;
        let gx = (wx / spacing).clamp(0.0, max_idx);
        let gz = (wz / spacing).clamp(0.0, max_idx);

        let x0 = gx.floor() as usize;
        let z0 = gz.floor() as usize;
        let x1 = (x0 + 1).min(self.resolution - 1);
        let z1 = (z0 + 1).min(self.resolution - 1);

        let fx = gx - x0 as f32;
        let fz = gz - z0 as f32;

        let h00 = self.get(x0, z0);
        let h10 = self.get(x1, z0);
        let h01 = self.get(x0, z1);
        let h11 = self.get(x1, z1);

        let h0 = h00 + (h10 - h00) * fx;
        let h1 = h01 + (h11 - h01) * fx;
        h0 + (h1 - h0) * fz
    }
}

/// One heightfield per terrain type present in the region partition.
///
/// Backed by a fixed array indexed by the type's enumeration position, the
/// same indexed-registry layout the rest of the crate uses for per-type
/// lookup in hot loops.
#[derive(Debug, Clone, Default)]
pub struct PerTypeHeightfields {
    fields: [Option<Heightfield>; TerrainType::COUNT],
}

impl PerTypeHeightfields {
    /// Create an empty per-type set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the heightfield for a terrain type, replacing any previous one.
    pub fn insert(&mut self, terrain_type: TerrainType, field: Heightfield) {
        self.fields[terrain_type as usize] = Some(field);
    }

    /// Heightfield for a terrain type, if generated.
    #[must_use]
    pub fn get(&self, terrain_type: TerrainType) -> Option<&Heightfield> {
        self.fields[terrain_type as usize].as_ref()
    }

    /// Terrain types with a generated field, in canonical enumeration order.
    pub fn types(&self) -> impl Iterator<Item = TerrainType> + '_ {
        TerrainType::ALL
            .into_iter()
            .filter(|ty| self.fields[*ty as usize].is_some())
    }

    /// Number of generated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.iter().filter(|f| f.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(Option::is_none)
    }
}
