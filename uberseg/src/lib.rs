// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uberseg: nearest-object weight masking for segmented images.
//!
//! In a crowded astronomical field a measurement of one object should not see
//! light from its neighbors. Given a segmentation map (each pixel labeled with
//! the id of the object owning it, or `0` for background) and a target object,
//! this crate zeroes the weight of every pixel whose *nearest* owning object is
//! not the target:
//!
//! - pixels labeled with the target keep their weight,
//! - pixels labeled with another object are zeroed outright,
//! - background pixels are assigned to the object owning the closest labeled
//!   pixel, and zeroed unless that object is the target.
//!
//! Two strategies implement [`NearestObjectClassifier`] and produce the same
//! mask bit for bit:
//!
//! - [`DirectSearch`] scans every seed for every background pixel.
//! - [`IndexedSearch`] builds an [`uberseg_index`] index over the seeds once and
//!   answers each pixel with an expanding-radius query.
//!
//! Among equally distant seeds the first in seed order wins. Seeds produced by
//! [`labeled_coords`] are in row-major order.
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use uberseg::{UbersegParams, uberseg};
//!
//! let seg = array![[1, 1, 0], [1, 1, 0], [0, 0, 2]];
//! let mut weight = array![[1.0_f32, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]];
//!
//! let stats = uberseg(seg.view(), weight.view_mut(), 1, &UbersegParams::default()).unwrap();
//!
//! // Only the pixel owned by object 2 is zeroed; every background pixel is
//! // at least as close to object 1.
//! assert_eq!(weight[[2, 2]], 0.0);
//! assert_eq!(stats.zeroed(), 1);
//! ```
//!
//! Choosing a strategy explicitly, with caller-provided seeds:
//!
//! ```rust
//! use ndarray::array;
//! use uberseg::{DirectSearch, NearestObjectClassifier, object_coords};
//!
//! let seg = array![[3, 0, 0, 0, 5]];
//! let mut weight = array![[1.0_f32, 1.0, 1.0, 1.0, 1.0]];
//! let seeds = object_coords(seg.view(), 3);
//!
//! // With only the target's pixels as seeds every background pixel is kept.
//! DirectSearch.classify_and_mask(seg.view(), weight.view_mut(), 3, &seeds).unwrap();
//! assert_eq!(weight, array![[1.0, 1.0, 1.0, 1.0, 0.0]]);
//! ```
//!
//! # Logging
//!
//! Calls report their configuration and a [`MaskStats`] summary through the
//! [`log`] facade at `debug` level, and radius growth at `trace` level. No
//! logger is installed by this crate.

mod classify;
mod composite;
mod direct;
mod error;
mod indexed;
mod params;
mod seeds;

pub use classify::{MaskStats, NearestObjectClassifier};
pub use composite::mask_foreign_labels;
pub use direct::{DirectSearch, nearest_seed};
pub use error::{Error, Result};
pub use indexed::IndexedSearch;
pub use params::{IndexBackend, SearchParams, Strategy, UbersegParams};
pub use seeds::{labeled_coords, object_coords};

use ndarray::{ArrayView2, ArrayViewMut2};

/// Mask `weight` for `target`, deriving seeds from every labeled pixel.
///
/// This is the usual entry point: seeds are [`labeled_coords`] of `seg`, so a
/// background pixel keeps its weight only when the closest labeled pixel
/// belongs to `target`.
pub fn uberseg(
    seg: ArrayView2<'_, i32>,
    weight: ArrayViewMut2<'_, f32>,
    target: i32,
    params: &UbersegParams,
) -> Result<MaskStats> {
    let seeds = labeled_coords(seg);
    match params.strategy {
        Strategy::Direct => DirectSearch.classify_and_mask(seg, weight, target, &seeds),
        Strategy::Indexed(backend) => {
            IndexedSearch::new(backend, params.search).classify_and_mask(seg, weight, target, &seeds)
        }
    }
}
