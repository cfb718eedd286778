//! Region-aware heightfield blending.
//!
//! The final heightfield is built sample by sample as a weighted average of
//! the per-type heightfields over the sample's 3x3 coarse-cell
//! neighborhood. Weights fall off with coarse-cell distance through the
//! easing curve and double for neighbors sharing the center cell's type, so
//! region interiors stay pure while borders cross-fade over roughly one
//! coarse cell.
//!
//! Every contribution is an already-clamped [0, 1] height and the result is
//! a convex combination, so the output needs no re-clamping: it can never
//! leave the range spanned by its contributing per-type heights.

use crate::footprint::TerrainFootprint;
use crate::synth::easing::EasingCurve;
use crate::synth::heightfield::{Heightfield, PerTypeHeightfields};
use crate::synth::region::RegionMap;
use rayon::prelude::*;

/// Blend per-type heightfields into the final heightfield.
///
/// For each full-resolution sample, walks the 3x3 coarse neighborhood of
/// the sample's cell (out-of-bounds neighbors skipped, no wrapping):
/// the center weighs 1, a neighbor at coarse distance `d` weighs
/// `easing(1 / (d + 1))`, and any cell matching the center's type weighs
/// double (the center included). Each neighbor contributes its *type's*
/// height at the output sample position.
///
/// A neighborhood whose usable contributions all come from the center's
/// own type yields the center height directly (exact identity). If no
/// positive weight survives (degenerate easing curve), the sample falls
/// back to the center type's height. Neighbors whose type has no generated
/// field are skipped; if the center type itself has none, the fallback is
/// zero.
#[must_use]
pub fn blend_heightfields(
    footprint: &TerrainFootprint,
    regions: &RegionMap,
    fields: &PerTypeHeightfields,
    easing: EasingCurve,
) -> Heightfield {
    let resolution = footprint.resolution;
    let dim = regions.dim() as i32;

    let mut blended = Heightfield::new(resolution);
    blended
        .as_mut_slice()
        .par_chunks_mut(resolution)
        .enumerate()
        .for_each(|(z, row)| {
            for (x, sample) in row.iter_mut().enumerate() {
                let (gx, gz) = regions.cell_for_sample(x, z);
                let center_type = regions.get(gx, gz);

                let mut sum = 0.0_f32;
                let mut total = 0.0_f32;
                let mut mixed = false;

                for dz in -1..=1_i32 {
                    for dx in -1..=1_i32 {
                        let ngx = gx as i32 + dx;
                        let ngz = gz as i32 + dz;
                        if ngx < 0 || ngx >= dim || ngz < 0 || ngz >= dim {
                            continue;
                        }

                        let neighbor_type = regions.get(ngx as usize, ngz as usize);
                        let height = match fields.get(neighbor_type) {
                            Some(field) => field.get(x, z),
                            None => continue,
                        };

                        let mut weight = if dx == 0 && dz == 0 {
                            1.0
                        } else {
                            let dist = f32::sqrt((dx * dx + dz * dz) as f32);
                            easing(1.0 / (dist + 1.0))
                        };
                        if neighbor_type == center_type {
                            weight *= 2.0;
                        } else {
                            mixed = true;
                        }

                        sum += weight * height;
                        total += weight;
                    }
                }

                *sample = if mixed && total > 0.0 {
                    sum / total
                } else {
                    fields
                        .get(center_type)
                        .map_or(0.0, |field| field.get(x, z))
                };
            }
        });

    blended
}
