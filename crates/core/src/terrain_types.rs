//! Terrain type enumeration and per-type generation parameters
//!
//! Every coarse region cell is classified as exactly one `TerrainType`.
//! A `TerrainTypeDefinition` carries the static parameters the heightfield
//! generator needs for that type; declared definitions live in a
//! `TypeDefinitions` set, and gaps are filled with per-category defaults so
//! an incomplete configuration degrades instead of failing.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Closed terrain type enumeration.
///
/// Declaration order is canonical: the region classifier assigns types by
/// cycling through [`TerrainType::ALL`] in seed-insertion order, so
/// reordering variants changes every synthesized landscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerrainType {
    Plain,
    Hill,
    Mountain,
    Valley,
    Plateau,
    Lake,
}

impl TerrainType {
    /// All terrain types in canonical cycling order.
    pub const ALL: [TerrainType; 6] = [
        TerrainType::Plain,
        TerrainType::Hill,
        TerrainType::Mountain,
        TerrainType::Valley,
        TerrainType::Plateau,
        TerrainType::Lake,
    ];

    /// Number of distinct terrain types.
    pub const COUNT: usize = Self::ALL.len();

    /// Shaping category for this type, if it has one.
    ///
    /// `Lake` is outside the shaped set: it contributes a zero shaping term
    /// and has no category to infer default parameters from.
    #[must_use]
    pub fn category(self) -> Option<TerrainCategory> {
        match self {
            TerrainType::Plain => Some(TerrainCategory::Plain),
            TerrainType::Hill => Some(TerrainCategory::Hill),
            TerrainType::Mountain => Some(TerrainCategory::Mountain),
            TerrainType::Valley => Some(TerrainCategory::Valley),
            TerrainType::Plateau => Some(TerrainCategory::Plateau),
            TerrainType::Lake => None,
        }
    }

    /// Get terrain type name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TerrainType::Plain => "Plain",
            TerrainType::Hill => "Hill",
            TerrainType::Mountain => "Mountain",
            TerrainType::Valley => "Valley",
            TerrainType::Plateau => "Plateau",
            TerrainType::Lake => "Lake",
        }
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shaping categories recognized by the heightfield generator.
///
/// Each category selects one entry of the closed shaping-function table;
/// types without a category (see [`TerrainType::category`]) fall through to
/// the zero term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainCategory {
    Plain,
    Hill,
    Mountain,
    Valley,
    Plateau,
}

/// Opaque renderable surface-layer handle.
///
/// Assigned by the host's rendering side and passed through unchanged into
/// the weight field's layer ordering; synthesis never interprets the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerRef(pub u32);

/// Passthrough capability flags for downstream content generators.
///
/// Synthesis carries these opaquely; vegetation and water placement happen
/// outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub vegetation: bool,
    pub water: bool,
}

/// Static per-type generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainTypeDefinition {
    /// Which terrain type this definition describes
    pub terrain_type: TerrainType,
    /// Constant elevation offset in meters
    pub base_elevation: f32,
    /// Amplitude of the type's shaping term in meters
    pub elevation_variance: f32,
    /// Base spatial frequency in cycles per meter, shared by the
    /// multi-octave base term and the shaping term
    pub noise_scale: f32,
    /// Downstream generator flags, carried opaquely
    pub features: FeatureFlags,
    /// Renderable layer for the weight field; `None` omits the type from
    /// the layer ordering
    pub surface_layer: Option<LayerRef>,
}

impl TerrainTypeDefinition {
    /// Open grassland with gentle relief
    #[must_use]
    pub fn plains() -> Self {
        TerrainTypeDefinition {
            terrain_type: TerrainType::Plain,
            base_elevation: 150.0,
            elevation_variance: 60.0,
            noise_scale: 0.0008,
            features: FeatureFlags {
                vegetation: true,
                water: false,
            },
            surface_layer: Some(LayerRef(0)),
        }
    }

    /// Rolling hills
    #[must_use]
    pub fn hills() -> Self {
        TerrainTypeDefinition {
            terrain_type: TerrainType::Hill,
            base_elevation: 250.0,
            elevation_variance: 250.0,
            noise_scale: 0.0015,
            features: FeatureFlags {
                vegetation: true,
                water: false,
            },
            surface_layer: Some(LayerRef(1)),
        }
    }

    /// High-relief mountain terrain, clips against the elevation ceiling
    /// in its strongest spots
    #[must_use]
    pub fn mountains() -> Self {
        TerrainTypeDefinition {
            terrain_type: TerrainType::Mountain,
            base_elevation: 350.0,
            elevation_variance: 600.0,
            noise_scale: 0.003,
            features: FeatureFlags {
                vegetation: false,
                water: false,
            },
            surface_layer: Some(LayerRef(2)),
        }
    }

    /// Depressed basin terrain, bottoms out at zero in its deepest spots
    #[must_use]
    pub fn valleys() -> Self {
        TerrainTypeDefinition {
            terrain_type: TerrainType::Valley,
            base_elevation: 220.0,
            elevation_variance: 200.0,
            noise_scale: 0.0012,
            features: FeatureFlags {
                vegetation: true,
                water: false,
            },
            surface_layer: Some(LayerRef(3)),
        }
    }

    /// Elevated tableland: high base elevation with small high-frequency
    /// surface texture
    #[must_use]
    pub fn plateaus() -> Self {
        TerrainTypeDefinition {
            terrain_type: TerrainType::Plateau,
            base_elevation: 700.0,
            elevation_variance: 40.0,
            noise_scale: 0.002,
            features: FeatureFlags {
                vegetation: false,
                water: false,
            },
            surface_layer: Some(LayerRef(4)),
        }
    }

    /// Flat low-lying waterbed (no shaping category)
    #[must_use]
    pub fn lake() -> Self {
        TerrainTypeDefinition {
            terrain_type: TerrainType::Lake,
            base_elevation: 80.0,
            elevation_variance: 0.0,
            noise_scale: 0.0005,
            features: FeatureFlags {
                vegetation: false,
                water: true,
            },
            surface_layer: Some(LayerRef(5)),
        }
    }
}

impl TerrainCategory {
    /// Synthesize the default definition for a type of this category.
    ///
    /// Used when a terrain type appears in the region partition without a
    /// declared definition. Defaults mirror the standard presets but carry
    /// no surface layer and no feature flags, so default-synthesized types
    /// never claim a weight-field slot.
    #[must_use]
    pub fn default_definition(self, terrain_type: TerrainType) -> TerrainTypeDefinition {
        let (base_elevation, elevation_variance, noise_scale) = match self {
            TerrainCategory::Plain => (150.0, 60.0, 0.0008),
            TerrainCategory::Hill => (250.0, 250.0, 0.0015),
            TerrainCategory::Mountain => (350.0, 600.0, 0.003),
            TerrainCategory::Valley => (220.0, 200.0, 0.0012),
            TerrainCategory::Plateau => (700.0, 40.0, 0.002),
        };
        TerrainTypeDefinition {
            terrain_type,
            base_elevation,
            elevation_variance,
            noise_scale,
            features: FeatureFlags::default(),
            surface_layer: None,
        }
    }
}

/// Neutral last-resort parameters for an undeclared type with no category.
/// Mid base, moderate relief, mid frequency.
const FALLBACK_BASE_ELEVATION: f32 = 500.0;
const FALLBACK_ELEVATION_VARIANCE: f32 = 150.0;
const FALLBACK_NOISE_SCALE: f32 = 0.0015;

/// Declared terrain-type definitions with default synthesis for gaps.
///
/// Built from host configuration; any type the region classifier can emit
/// resolves to usable parameters, declared or not. An incomplete set warns
/// and degrades, it never fails synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeDefinitions {
    defs: FxHashMap<TerrainType, TerrainTypeDefinition>,
}

impl TypeDefinitions {
    /// Create an empty definition set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from declared definitions. Later entries for the same
    /// terrain type replace earlier ones.
    #[must_use]
    pub fn from_definitions(defs: impl IntoIterator<Item = TerrainTypeDefinition>) -> Self {
        let mut set = Self::new();
        for def in defs {
            set.insert(def);
        }
        set
    }

    /// The built-in preset covering every terrain type.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_definitions([
            TerrainTypeDefinition::plains(),
            TerrainTypeDefinition::hills(),
            TerrainTypeDefinition::mountains(),
            TerrainTypeDefinition::valleys(),
            TerrainTypeDefinition::plateaus(),
            TerrainTypeDefinition::lake(),
        ])
    }

    /// Declare or replace the definition for its terrain type.
    pub fn insert(&mut self, def: TerrainTypeDefinition) {
        self.defs.insert(def.terrain_type, def);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Declared definition for a type, without default synthesis.
    #[must_use]
    pub fn declared(&self, terrain_type: TerrainType) -> Option<&TerrainTypeDefinition> {
        self.defs.get(&terrain_type)
    }

    /// Resolve the definition to generate a type with.
    ///
    /// Resolution ladder: declared definition, then the category default,
    /// then neutral fallback parameters for types with no category. Each
    /// synthesized step logs a warning; none of them fail.
    #[must_use]
    pub fn resolve(&self, terrain_type: TerrainType) -> TerrainTypeDefinition {
        if let Some(def) = self.defs.get(&terrain_type) {
            return *def;
        }
        match terrain_type.category() {
            Some(category) => {
                warn!(
                    "No definition declared for terrain type {terrain_type}, \
                     using {category:?} category defaults"
                );
                category.default_definition(terrain_type)
            }
            None => {
                warn!(
                    "No definition declared for terrain type {terrain_type} \
                     and no category to infer from, using neutral fallback"
                );
                TerrainTypeDefinition {
                    terrain_type,
                    base_elevation: FALLBACK_BASE_ELEVATION,
                    elevation_variance: FALLBACK_ELEVATION_VARIANCE,
                    noise_scale: FALLBACK_NOISE_SCALE,
                    features: FeatureFlags::default(),
                    surface_layer: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycling_order_is_declaration_order() {
        assert_eq!(TerrainType::ALL[0], TerrainType::Plain);
        assert_eq!(TerrainType::ALL[1], TerrainType::Hill);
        assert_eq!(TerrainType::ALL[2], TerrainType::Mountain);
        assert_eq!(TerrainType::ALL[3], TerrainType::Valley);
        assert_eq!(TerrainType::ALL[4], TerrainType::Plateau);
        assert_eq!(TerrainType::ALL[5], TerrainType::Lake);
        assert_eq!(TerrainType::COUNT, 6);
    }

    #[test]
    fn test_only_lake_lacks_category() {
        for ty in TerrainType::ALL {
            match ty {
                TerrainType::Lake => assert!(ty.category().is_none()),
                _ => assert!(ty.category().is_some(), "{ty} should have a category"),
            }
        }
    }

    #[test]
    fn test_standard_set_covers_all_types() {
        let defs = TypeDefinitions::standard();
        assert_eq!(defs.len(), TerrainType::COUNT);
        for ty in TerrainType::ALL {
            let def = defs.declared(ty).unwrap();
            assert_eq!(def.terrain_type, ty);
            assert!(def.surface_layer.is_some());
        }
    }

    #[test]
    fn test_later_definition_replaces_earlier() {
        let mut custom = TerrainTypeDefinition::plains();
        custom.base_elevation = 42.0;
        let defs =
            TypeDefinitions::from_definitions([TerrainTypeDefinition::plains(), custom]);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs.declared(TerrainType::Plain).unwrap().base_elevation, 42.0);
    }

    #[test]
    fn test_resolve_prefers_declared() {
        let defs = TypeDefinitions::standard();
        let def = defs.resolve(TerrainType::Mountain);
        assert_eq!(def, TerrainTypeDefinition::mountains());
    }

    #[test]
    fn test_resolve_synthesizes_category_default() {
        let defs = TypeDefinitions::new();
        let def = defs.resolve(TerrainType::Mountain);
        assert_eq!(def.terrain_type, TerrainType::Mountain);
        assert_eq!(def.base_elevation, 350.0);
        assert_eq!(def.elevation_variance, 600.0);
        // Synthesized defaults never claim a render layer
        assert!(def.surface_layer.is_none());
        assert_eq!(def.features, FeatureFlags::default());
    }

    #[test]
    fn test_resolve_uncategorized_uses_fallback() {
        let defs = TypeDefinitions::new();
        let def = defs.resolve(TerrainType::Lake);
        assert_eq!(def.terrain_type, TerrainType::Lake);
        assert_eq!(def.base_elevation, FALLBACK_BASE_ELEVATION);
        assert!(def.surface_layer.is_none());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TerrainType::Plain.to_string(), "Plain");
        assert_eq!(TerrainType::Plateau.to_string(), "Plateau");
    }
}
