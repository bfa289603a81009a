// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brute-force nearest-seed search.

use log::debug;
use ndarray::{ArrayView2, ArrayViewMut2};

use crate::classify::{MaskStats, NearestObjectClassifier, mask_with, validate};
use crate::error::Result;

/// Scans every seed for every background pixel.
///
/// Costs `O(Nx · Ny · N)`; use [`IndexedSearch`][crate::IndexedSearch] for
/// crowded fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectSearch;

/// Index of the seed closest to `(x, y)`, keeping the first on ties.
pub fn nearest_seed(seeds: &[(usize, usize)], x: usize, y: usize) -> Option<usize> {
    let mut best: Option<(usize, u128)> = None;
    for (k, &(sx, sy)) in seeds.iter().enumerate() {
        let dx = x.abs_diff(sx) as u128;
        let dy = y.abs_diff(sy) as u128;
        let d = dx * dx + dy * dy;
        if best.is_none_or(|(_, dmin)| d < dmin) {
            best = Some((k, d));
        }
    }
    best.map(|(k, _)| k)
}

impl NearestObjectClassifier for DirectSearch {
    fn classify_and_mask(
        &self,
        seg: ArrayView2<'_, i32>,
        weight: ArrayViewMut2<'_, f32>,
        target: i32,
        seeds: &[(usize, usize)],
    ) -> Result<MaskStats> {
        validate(&seg, &weight, target, seeds)?;
        debug!(
            "direct search: target {target}, grid {:?}, {} seeds",
            seg.dim(),
            seeds.len()
        );

        let stats = mask_with(seg, weight, target, |x, y| {
            let (sx, sy) = seeds[nearest_seed(seeds, x, y)?];
            // With target-only seeds this always reads back the target.
            Some(seg[[sx, sy]])
        });
        debug!("direct search done: {stats:?}");
        Ok(stats)
    }
}
