//! Texture weight-map generation.
//!
//! Produces the per-layer splat weights a renderer needs to texture the
//! blended terrain. The weight grid lives at its own (alpha) resolution,
//! rescales proportionally onto the elevation sample grid, and then uses
//! the same clamped coarse projection as blending, so texture regions line
//! up with elevation regions even when the two resolutions differ.
//!
//! Weights are hard one-hot per pixel: the layer of the pixel's region type
//! gets 1.0 and every other layer 0.0. Types without a declared surface
//! layer own no slot; their pixels are all-zero columns for the renderer's
//! base layer to show through.

use crate::footprint::TerrainFootprint;
use crate::synth::region::RegionMap;
use crate::terrain_types::{LayerRef, TerrainType, TypeDefinitions};

/// One slot of the weight field's layer ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightLayer {
    /// Terrain type owning the slot
    pub terrain_type: TerrainType,
    /// The opaque renderer layer handle from the type's declared definition
    pub surface_layer: LayerRef,
}

/// Dense per-layer texture weights.
///
/// Flat layout: `(az * alpha_resolution + ax) * layer_count + layer`.
/// Every pixel column sums to exactly 1.0 (its type has a layer) or
/// exactly 0.0 (it does not).
#[derive(Debug, Clone, PartialEq)]
pub struct WeightField {
    data: Vec<f32>,
    alpha_resolution: usize,
    layers: Vec<WeightLayer>,
}

impl WeightField {
    /// Weight pixels per axis.
    #[must_use]
    pub fn alpha_resolution(&self) -> usize {
        self.alpha_resolution
    }

    /// Number of renderable layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layer ordering: declared layered types in canonical enumeration
    /// order, carrying their opaque renderer handles unchanged.
    #[must_use]
    pub fn layers(&self) -> &[WeightLayer] {
        &self.layers
    }

    /// Slot index of a terrain type's layer, if it owns one.
    #[must_use]
    pub fn layer_index(&self, terrain_type: TerrainType) -> Option<usize> {
        self.layers
            .iter()
            .position(|layer| layer.terrain_type == terrain_type)
    }

    /// Weight of one layer at pixel `(ax, az)`.
    ///
    /// # Panics
    ///
    /// Panics if the pixel or layer index is out of bounds
    #[must_use]
    pub fn weight(&self, ax: usize, az: usize, layer: usize) -> f32 {
        assert!(
            ax < self.alpha_resolution && az < self.alpha_resolution,
            "Coordinates out of bounds"
        );
        assert!(layer < self.layers.len(), "Layer index out of bounds");
        self.data[(az * self.alpha_resolution + ax) * self.layers.len() + layer]
    }

    /// All layer weights at pixel `(ax, az)`.
    ///
    /// # Panics
    ///
    /// Panics if the pixel is out of bounds
    #[must_use]
    pub fn column(&self, ax: usize, az: usize) -> &[f32] {
        assert!(
            ax < self.alpha_resolution && az < self.alpha_resolution,
            "Coordinates out of bounds"
        );
        let start = (az * self.alpha_resolution + ax) * self.layers.len();
        &self.data[start..start + self.layers.len()]
    }

    /// Get reference to weight data
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Generate the weight field for a region partition.
///
/// Only declared definitions claim layer slots; default-synthesized types
/// never appear in the ordering, so their pixels stay all-zero.
#[must_use]
pub fn generate_weight_field(
    footprint: &TerrainFootprint,
    regions: &RegionMap,
    definitions: &TypeDefinitions,
    alpha_resolution: usize,
) -> WeightField {
    let layers: Vec<WeightLayer> = TerrainType::ALL
        .into_iter()
        .filter_map(|terrain_type| {
            definitions
                .declared(terrain_type)
                .and_then(|def| def.surface_layer)
                .map(|surface_layer| WeightLayer {
                    terrain_type,
                    surface_layer,
                })
        })
        .collect();

    let mut index_by_type = [None; TerrainType::COUNT];
    for (index, layer) in layers.iter().enumerate() {
        index_by_type[layer.terrain_type as usize] = Some(index);
    }

    let layer_count = layers.len();
    let mut data = vec![0.0; alpha_resolution * alpha_resolution * layer_count];

    for az in 0..alpha_resolution {
        for ax in 0..alpha_resolution {
            // Proportional rescale onto the elevation sample grid, then the
            // shared coarse projection
            let ex = ax * footprint.resolution / alpha_resolution;
            let ez = az * footprint.resolution / alpha_resolution;
            let (gx, gz) = regions.cell_for_sample(ex, ez);
            let terrain_type = regions.get(gx, gz);

            if let Some(layer) = index_by_type[terrain_type as usize] {
                data[(az * alpha_resolution + ax) * layer_count + layer] = 1.0;
            }
        }
    }

    WeightField {
        data,
        alpha_resolution,
        layers,
    }
}
