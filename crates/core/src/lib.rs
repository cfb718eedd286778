//! Terrain Synthesis Core Library
//!
//! Deterministic multi-type terrain synthesis: partitions a square
//! footprint into terrain-type regions, generates one normalized
//! heightfield per type present, blends them across region borders, and
//! emits the per-layer texture weights a renderer needs to splat the
//! result.
//!
//! ## Pipeline
//!
//! - Region classification by seeded nearest-seed-point assignment
//! - Per-type elevation from multi-octave value noise plus category shaping
//! - 3x3 coarse-neighborhood weighted blending through an easing curve
//! - One-hot per-layer texture weight generation at the alpha resolution

// Footprint geometry and terrain type configuration
pub mod footprint;
pub mod terrain_types;

// Synthesis pipeline stages
pub mod synth;

// Re-export configuration types
pub use footprint::{TerrainFootprint, DEFAULT_COARSE_DIVISOR};
pub use terrain_types::{
    FeatureFlags, LayerRef, TerrainCategory, TerrainType, TerrainTypeDefinition, TypeDefinitions,
};

// Re-export pipeline types
pub use synth::{
    blend_heightfields, classify, generate_present_types, generate_type_heightfield,
    generate_weight_field, linear, smooth_step, synthesize, EasingCurve, Heightfield,
    PerTypeHeightfields, RegionMap, SynthesisError, SynthesisOutput, SynthesisParams, ValueNoise,
    WeightField, WeightLayer, MAX_ELEVATION,
};
