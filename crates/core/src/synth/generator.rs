//! Per-type heightfield generation.
//!
//! Elevation for a terrain type at world position `p` is
//!
//! ```text
//! raw(p)    = base_elevation + octaves(p) + shaping(p)
//! octaves(p) = n(p*s)*100 + n(p*10s)*50 + n(p*100s)*25    s = noise_scale
//! height(p) = clamp(raw(p) / MAX_ELEVATION, 0, 1)
//! ```
//!
//! where `n` is the shared value-noise basis and `shaping` is the
//! category-specific relief term selected from a closed function table.
//! Normalization and clamping happen here, before blending: the blender
//! averages already-clamped heights and never re-clamps, so clipped peaks
//! and floors survive into the blended output exactly as generated.

use crate::footprint::TerrainFootprint;
use crate::synth::heightfield::{Heightfield, PerTypeHeightfields};
use crate::synth::noise::ValueNoise;
use crate::synth::region::RegionMap;
use crate::terrain_types::{TerrainCategory, TerrainTypeDefinition, TypeDefinitions};
use rayon::prelude::*;
use tracing::debug;

/// Elevation ceiling in meters. Raw per-type elevations are divided by
/// this and clamped to [0, 1]; anything taller clips.
pub const MAX_ELEVATION: f32 = 1000.0;

/// Octave frequency multipliers over the definition's base noise scale
/// (coarse, medium, fine).
const OCTAVE_FREQUENCIES: [f32; 3] = [1.0, 10.0, 100.0];

/// Octave amplitudes in meters, matched to `OCTAVE_FREQUENCIES`.
const OCTAVE_AMPLITUDES: [f32; 3] = [100.0, 50.0, 25.0];

/// Shaping-term frequency multipliers over the definition's base noise
/// scale, one per category.
const PLAIN_SHAPING_FREQUENCY: f32 = 1.0;
const HILL_SHAPING_FREQUENCY: f32 = 1.5;
const MOUNTAIN_SHAPING_FREQUENCY: f32 = 2.0;
const VALLEY_SHAPING_FREQUENCY: f32 = 1.2;
const PLATEAU_SHAPING_FREQUENCY: f32 = 25.0;

/// Category shaping term in meters at a world position.
type ShapingFn = fn(&ValueNoise, f32, f32, &TerrainTypeDefinition) -> f32;

/// Rising relief: non-negative noise scaled to the full variance.
fn shape_mountain(noise: &ValueNoise, x: f32, z: f32, def: &TerrainTypeDefinition) -> f32 {
    let s = def.noise_scale * MOUNTAIN_SHAPING_FREQUENCY;
    noise.sample01(x * s, z * s) * def.elevation_variance
}

fn shape_hill(noise: &ValueNoise, x: f32, z: f32, def: &TerrainTypeDefinition) -> f32 {
    let s = def.noise_scale * HILL_SHAPING_FREQUENCY;
    noise.sample01(x * s, z * s) * def.elevation_variance
}

fn shape_plain(noise: &ValueNoise, x: f32, z: f32, def: &TerrainTypeDefinition) -> f32 {
    let s = def.noise_scale * PLAIN_SHAPING_FREQUENCY;
    noise.sample01(x * s, z * s) * def.elevation_variance
}

/// Depression: negated non-negative noise carves below the base elevation.
fn shape_valley(noise: &ValueNoise, x: f32, z: f32, def: &TerrainTypeDefinition) -> f32 {
    let s = def.noise_scale * VALLEY_SHAPING_FREQUENCY;
    -noise.sample01(x * s, z * s) * def.elevation_variance
}

/// Tableland: small signed high-frequency texture over the (large) base
/// elevation the definition carries.
fn shape_plateau(noise: &ValueNoise, x: f32, z: f32, def: &TerrainTypeDefinition) -> f32 {
    let s = def.noise_scale * PLATEAU_SHAPING_FREQUENCY;
    noise.sample(x * s, z * s) * def.elevation_variance
}

/// Types outside the shaped category set contribute no relief term.
fn shape_none(_noise: &ValueNoise, _x: f32, _z: f32, _def: &TerrainTypeDefinition) -> f32 {
    0.0
}

/// Closed shaping table, indexed by `TerrainCategory` discriminant.
/// Built once; per-sample dispatch is a plain function-pointer call.
const SHAPING_TABLE: [ShapingFn; 5] = [
    shape_plain,
    shape_hill,
    shape_mountain,
    shape_valley,
    shape_plateau,
];

/// Shaping function for a type's category.
fn shaping_for(category: Option<TerrainCategory>) -> ShapingFn {
    match category {
        Some(category) => SHAPING_TABLE[category as usize],
        None => shape_none,
    }
}

/// Generate the normalized heightfield for one terrain type.
///
/// Rows are filled in parallel; the whole field is a pure function of the
/// footprint, the definition, and the noise basis.
#[must_use]
pub fn generate_type_heightfield(
    footprint: &TerrainFootprint,
    def: &TerrainTypeDefinition,
    noise: &ValueNoise,
) -> Heightfield {
    let resolution = footprint.resolution;
    let spacing = footprint.sample_spacing();
    let shaping = shaping_for(def.terrain_type.category());

    let mut field = Heightfield::new(resolution);
    field
        .as_mut_slice()
        .par_chunks_mut(resolution)
        .enumerate()
        .for_each(|(z, row)| {
            let wz = z as f32 * spacing;
            for (x, sample) in row.iter_mut().enumerate() {
                let wx = x as f32 * spacing;

                let mut elevation = def.base_elevation;
                for (&frequency, &amplitude) in
                    OCTAVE_FREQUENCIES.iter().zip(OCTAVE_AMPLITUDES.iter())
                {
                    let s = def.noise_scale * frequency;
                    elevation += noise.sample(wx * s, wz * s) * amplitude;
                }
                elevation += shaping(noise, wx, wz, def);

                *sample = (elevation / MAX_ELEVATION).clamp(0.0, 1.0);
            }
        });

    field
}

/// Generate heightfields for every terrain type present in the region map.
///
/// Types absent from the partition are skipped entirely. Definitions
/// resolve through [`TypeDefinitions::resolve`], so undeclared types
/// degrade to defaults instead of failing.
#[must_use]
pub fn generate_present_types(
    footprint: &TerrainFootprint,
    regions: &RegionMap,
    definitions: &TypeDefinitions,
    noise: &ValueNoise,
) -> PerTypeHeightfields {
    let mut fields = PerTypeHeightfields::new();
    for terrain_type in regions.present_types() {
        let def = definitions.resolve(terrain_type);
        debug!(
            "Generating {res}x{res} heightfield for {terrain_type}",
            res = footprint.resolution
        );
        fields.insert(
            terrain_type,
            generate_type_heightfield(footprint, &def, noise),
        );
    }
    fields
}
