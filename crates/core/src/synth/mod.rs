//! Terrain synthesis pipeline
//!
//! Runs the four synthesis stages in order over a validated footprint:
//!
//! 1. Region classification: coarse cells get terrain types by nearest
//!    seed point (seeded, deterministic).
//! 2. Per-type heightfield generation: one normalized field per type
//!    present in the partition.
//! 3. Blending: weighted 3x3 neighborhood average into the final
//!    heightfield.
//! 4. Weight mapping: one-hot texture weights at the alpha resolution.
//!
//! Every stage is a pure function of its inputs; the only randomness is
//! the classifier's explicitly seeded generator and the noise basis
//! derived from the same caller seed. Identical inputs reproduce identical
//! outputs bitwise.
//!
//! # Example
//!
//! ```rust,ignore
//! use terrain_synth_core::{synthesize, SynthesisParams, TerrainFootprint, TypeDefinitions};
//!
//! let footprint = TerrainFootprint::new(1000.0, 513);
//! let params = SynthesisParams {
//!     seed_count: 12,
//!     random_seed: 0xC0FFEE,
//!     ..SynthesisParams::default()
//! };
//! let output = synthesize(&footprint, &TypeDefinitions::standard(), &params)?;
//! ```

pub mod blend;
pub mod easing;
pub mod generator;
pub mod heightfield;
pub mod noise;
pub mod region;
pub mod weights;

// Re-exports
pub use blend::blend_heightfields;
pub use easing::{linear, smooth_step, EasingCurve};
pub use generator::{generate_present_types, generate_type_heightfield, MAX_ELEVATION};
pub use heightfield::{Heightfield, PerTypeHeightfields};
pub use noise::ValueNoise;
pub use region::{classify, RegionMap};
pub use weights::{generate_weight_field, WeightField, WeightLayer};

use crate::footprint::TerrainFootprint;
use crate::terrain_types::{TerrainType, TypeDefinitions};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Caller-facing synthesis parameters.
///
/// `alpha_resolution` 0 means "reuse the elevation resolution". The easing
/// curve is not serialized; deserialized parameter sets get the default
/// curve and hosts select presets by name on their side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SynthesisParams {
    /// Number of region seed points to scatter
    pub seed_count: usize,
    /// Seed for the classifier draw and the noise basis
    pub random_seed: u64,
    /// Type every cell gets when no seeds are scattered
    pub dominant_type: TerrainType,
    /// Blend-weight easing curve
    #[serde(skip, default = "default_easing")]
    pub easing: EasingCurve,
    /// Weight-map pixels per axis; 0 reuses the elevation resolution
    pub alpha_resolution: usize,
}

fn default_easing() -> EasingCurve {
    smooth_step
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            seed_count: 12,
            random_seed: 0,
            dominant_type: TerrainType::Plain,
            easing: smooth_step,
            alpha_resolution: 0,
        }
    }
}

/// Everything one synthesis run produces.
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    /// Final blended heightfield, normalized to [0, 1]
    pub heightfield: Heightfield,
    /// Per-layer texture weights at the alpha resolution
    pub weights: WeightField,
    /// The coarse region partition the outputs were built from
    pub regions: RegionMap,
}

/// Synthesis rejection reasons.
///
/// These are the only error conditions; everything else (missing
/// definitions, degenerate curves, absent types) degrades with a warning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SynthesisError {
    /// Footprint size is zero, negative, or not finite
    InvalidSize(f32),
    /// Footprint has zero samples per axis
    ZeroResolution,
    /// Footprint has a zero coarse divisor
    ZeroCoarseDivisor,
    /// No definitions were supplied and the dominant type has no category
    /// to infer defaults from
    UndefinableDominantType(TerrainType),
}

impl std::fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthesisError::InvalidSize(size) => {
                write!(f, "Footprint size must be positive and finite, got {size}")
            }
            SynthesisError::ZeroResolution => {
                write!(f, "Footprint resolution must be at least 1 sample")
            }
            SynthesisError::ZeroCoarseDivisor => {
                write!(f, "Coarse divisor must be at least 1 sample per cell")
            }
            SynthesisError::UndefinableDominantType(ty) => {
                write!(
                    f,
                    "Empty definition set and dominant type {ty} has no category to default from"
                )
            }
        }
    }
}

impl std::error::Error for SynthesisError {}

/// Validate footprint parameters.
///
/// # Errors
///
/// Returns an error for a non-finite or non-positive size, a zero
/// resolution, or a zero coarse divisor.
pub fn validate_footprint(footprint: &TerrainFootprint) -> Result<(), SynthesisError> {
    if !footprint.size.is_finite() || footprint.size <= 0.0 {
        return Err(SynthesisError::InvalidSize(footprint.size));
    }
    if footprint.resolution == 0 {
        return Err(SynthesisError::ZeroResolution);
    }
    if footprint.coarse_divisor == 0 {
        return Err(SynthesisError::ZeroCoarseDivisor);
    }
    Ok(())
}

/// Run the full synthesis pipeline.
///
/// Validation happens before any buffer is allocated. After that the run
/// cannot fail: configuration gaps degrade per the definition-resolution
/// ladder and the blend fallbacks.
///
/// # Errors
///
/// Returns an error for invalid footprint parameters, or when the
/// definition set is empty and the dominant type has no category to
/// synthesize defaults from.
pub fn synthesize(
    footprint: &TerrainFootprint,
    definitions: &TypeDefinitions,
    params: &SynthesisParams,
) -> Result<SynthesisOutput, SynthesisError> {
    validate_footprint(footprint)?;
    if definitions.is_empty() && params.dominant_type.category().is_none() {
        return Err(SynthesisError::UndefinableDominantType(params.dominant_type));
    }

    let resolution = footprint.resolution;
    let alpha_resolution = if params.alpha_resolution == 0 {
        resolution
    } else {
        params.alpha_resolution
    };
    info!(
        "Synthesizing {resolution}x{resolution} terrain: {} seeds, dominant {}, seed {:#x}",
        params.seed_count, params.dominant_type, params.random_seed
    );

    let mut rng = StdRng::seed_from_u64(params.random_seed);
    let regions = classify(footprint, params.seed_count, params.dominant_type, &mut rng);

    let noise = ValueNoise::new(params.random_seed);
    let fields = generate_present_types(footprint, &regions, definitions, &noise);

    let heightfield = blend_heightfields(footprint, &regions, &fields, params.easing);
    let weights = generate_weight_field(footprint, &regions, definitions, alpha_resolution);

    info!(
        "Synthesis complete: {} terrain types over {dim}x{dim} regions, {} weight layers",
        fields.len(),
        weights.layer_count(),
        dim = regions.dim()
    );

    Ok(SynthesisOutput {
        heightfield,
        weights,
        regions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_bad_footprints() {
        let negative = TerrainFootprint::new(-100.0, 64);
        assert_eq!(
            validate_footprint(&negative),
            Err(SynthesisError::InvalidSize(-100.0))
        );

        let nan = TerrainFootprint::new(f32::NAN, 64);
        assert!(matches!(
            validate_footprint(&nan),
            Err(SynthesisError::InvalidSize(_))
        ));

        let zero_res = TerrainFootprint::new(100.0, 0);
        assert_eq!(
            validate_footprint(&zero_res),
            Err(SynthesisError::ZeroResolution)
        );

        let zero_div = TerrainFootprint::new(100.0, 64).with_coarse_divisor(0);
        assert_eq!(
            validate_footprint(&zero_div),
            Err(SynthesisError::ZeroCoarseDivisor)
        );

        assert!(validate_footprint(&TerrainFootprint::new(100.0, 64)).is_ok());
    }

    #[test]
    fn test_synthesize_rejects_undefinable_dominant() {
        let footprint = TerrainFootprint::new(100.0, 32);
        let params = SynthesisParams {
            seed_count: 0,
            dominant_type: TerrainType::Lake,
            ..SynthesisParams::default()
        };

        let err = synthesize(&footprint, &TypeDefinitions::new(), &params).unwrap_err();
        assert_eq!(err, SynthesisError::UndefinableDominantType(TerrainType::Lake));

        // A categorized dominant type synthesizes defaults instead
        let params = SynthesisParams {
            seed_count: 0,
            dominant_type: TerrainType::Hill,
            ..SynthesisParams::default()
        };
        assert!(synthesize(&footprint, &TypeDefinitions::new(), &params).is_ok());

        // A declared lake is fine even as dominant
        let params = SynthesisParams {
            seed_count: 0,
            dominant_type: TerrainType::Lake,
            ..SynthesisParams::default()
        };
        assert!(synthesize(&footprint, &TypeDefinitions::standard(), &params).is_ok());
    }

    #[test]
    fn test_alpha_resolution_defaults_to_elevation_resolution() {
        let footprint = TerrainFootprint::new(100.0, 32);
        let output = synthesize(
            &footprint,
            &TypeDefinitions::standard(),
            &SynthesisParams::default(),
        )
        .unwrap();
        assert_eq!(output.weights.alpha_resolution(), 32);

        let params = SynthesisParams {
            alpha_resolution: 48,
            ..SynthesisParams::default()
        };
        let output = synthesize(&footprint, &TypeDefinitions::standard(), &params).unwrap();
        assert_eq!(output.weights.alpha_resolution(), 48);
    }

    #[test]
    fn test_output_dimensions_consistent() {
        let footprint = TerrainFootprint::new(250.0, 50);
        let output = synthesize(
            &footprint,
            &TypeDefinitions::standard(),
            &SynthesisParams::default(),
        )
        .unwrap();

        assert_eq!(output.heightfield.resolution, 50);
        assert_eq!(output.regions.dim(), footprint.coarse_dim());
        assert_eq!(output.weights.alpha_resolution(), 50);
    }

    #[test]
    fn test_error_messages_name_the_parameter() {
        let err = SynthesisError::InvalidSize(-3.0);
        assert!(err.to_string().contains("-3"));

        let err = SynthesisError::UndefinableDominantType(TerrainType::Lake);
        assert!(err.to_string().contains("Lake"));
    }
}
