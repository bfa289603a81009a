// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label-only weight masking, without any geometric search.

use log::debug;
use ndarray::{ArrayView2, ArrayViewMut2, Zip};

use crate::classify::validate;
use crate::error::Result;

/// Zero the weight of every pixel owned by an object other than `target`.
///
/// Background pixels keep their weight. This is the plain segmentation mask
/// used when composing a coadd weight cutout; [`uberseg`][crate::uberseg]
/// additionally assigns background pixels to their nearest object.
///
/// Returns the number of zeroed pixels.
pub fn mask_foreign_labels(
    seg: ArrayView2<'_, i32>,
    mut weight: ArrayViewMut2<'_, f32>,
    target: i32,
) -> Result<usize> {
    validate(&seg, &weight, target, &[])?;
    let mut zeroed = 0;
    Zip::from(&mut weight).and(&seg).for_each(|w, &label| {
        if label > 0 && label != target {
            *w = 0.0;
            zeroed += 1;
        }
    });
    debug!("foreign-label mask: target {target}, {zeroed} pixels zeroed");
    Ok(zeroed)
}
