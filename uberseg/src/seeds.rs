// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seed coordinate extraction from a segmentation map.
//!
//! Seeds are returned in row-major `(x, y)` order, the order the search
//! strategies use to break distance ties.

use ndarray::ArrayView2;

/// Coordinates of every labeled (non-zero) pixel.
///
/// This is the seed set used by [`uberseg`][crate::uberseg]: with every
/// object's pixels present, the nearest seed tells which object's territory a
/// background pixel is closest to.
pub fn labeled_coords(seg: ArrayView2<'_, i32>) -> Vec<(usize, usize)> {
    seg.indexed_iter()
        .filter(|&(_, &label)| label != 0)
        .map(|(xy, _)| xy)
        .collect()
}

/// Coordinates of the pixels carrying `object`.
pub fn object_coords(seg: ArrayView2<'_, i32>, object: i32) -> Vec<(usize, usize)> {
    seg.indexed_iter()
        .filter(|&(_, &label)| label == object)
        .map(|(xy, _)| xy)
        .collect()
}
