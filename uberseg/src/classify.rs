// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The classifier interface and the shortcut pass shared by every strategy.

use ndarray::{ArrayView2, ArrayViewMut2};

use crate::error::{Error, Result};

/// Per-call accounting of what happened to each pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaskStats {
    /// Pixels labeled with the target object (never modified).
    pub target: usize,
    /// Pixels labeled with another object, zeroed without a search.
    pub zeroed_foreign: usize,
    /// Background pixels whose nearest labeled pixel belongs to the target.
    pub kept_nearest: usize,
    /// Background pixels whose nearest labeled pixel belongs to another object.
    pub zeroed_nearest: usize,
    /// Background pixels with no candidate at all (no seeds).
    pub unresolved: usize,
}

impl MaskStats {
    /// Total number of weights set to zero.
    pub fn zeroed(&self) -> usize {
        self.zeroed_foreign + self.zeroed_nearest
    }

    /// Number of pixels that needed a nearest-object search.
    pub fn searched(&self) -> usize {
        self.kept_nearest + self.zeroed_nearest + self.unresolved
    }
}

/// Zeroes the weight of every pixel whose nearest owning object is not the target.
///
/// Implementations differ only in how a background pixel finds its nearest
/// seed; labeled pixels are handled by the same shortcut pass everywhere.
pub trait NearestObjectClassifier {
    /// Mask `weight` in place for `target`, searching among `seeds`.
    ///
    /// `seeds` are pixel coordinates into `seg`; the label found at the
    /// nearest seed decides a background pixel. Weights are only ever set to
    /// exactly `0.0`. Argument errors are reported before anything is written.
    fn classify_and_mask(
        &self,
        seg: ArrayView2<'_, i32>,
        weight: ArrayViewMut2<'_, f32>,
        target: i32,
        seeds: &[(usize, usize)],
    ) -> Result<MaskStats>;
}

/// Check shapes, the target id, and seed bounds.
pub(crate) fn validate(
    seg: &ArrayView2<'_, i32>,
    weight: &ArrayViewMut2<'_, f32>,
    target: i32,
    seeds: &[(usize, usize)],
) -> Result<()> {
    let shape = seg.dim();
    if shape != weight.dim() {
        return Err(Error::ShapeMismatch {
            seg: shape,
            weight: weight.dim(),
        });
    }
    if target <= 0 {
        return Err(Error::InvalidTarget(target));
    }
    if let Some((index, &(x, y))) = seeds
        .iter()
        .enumerate()
        .find(|(_, (x, y))| *x >= shape.0 || *y >= shape.1)
    {
        return Err(Error::SeedOutOfBounds { index, x, y, shape });
    }
    Ok(())
}

/// Run the shortcut pass, calling `nearest_label` for background pixels only.
///
/// `nearest_label(x, y)` returns the label owning the nearest seed, or `None`
/// when there is no candidate (the pixel is then left untouched).
pub(crate) fn mask_with<F>(
    seg: ArrayView2<'_, i32>,
    mut weight: ArrayViewMut2<'_, f32>,
    target: i32,
    mut nearest_label: F,
) -> MaskStats
where
    F: FnMut(usize, usize) -> Option<i32>,
{
    let mut stats = MaskStats::default();
    let (nx, ny) = seg.dim();
    for x in 0..nx {
        for y in 0..ny {
            let label = seg[[x, y]];
            if label == target {
                stats.target += 1;
                continue;
            }
            if label > 0 {
                weight[[x, y]] = 0.0;
                stats.zeroed_foreign += 1;
                continue;
            }

            match nearest_label(x, y) {
                None => stats.unresolved += 1,
                Some(owner) if owner == target => stats.kept_nearest += 1,
                Some(_) => {
                    weight[[x, y]] = 0.0;
                    stats.zeroed_nearest += 1;
                }
            }
        }
    }
    stats
}
