// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::collections::TryReserveError;

use crate::types::{Point2D, Scalar};

/// Spatial backend abstraction used by [`IndexGeneric`][crate::IndexGeneric].
///
/// Slots are the positions of the points in the slice passed to [`build`][Backend::build].
/// All backends must agree on query results: [`nearest`][Backend::nearest] returns the
/// smallest squared distance, breaking ties by the smallest slot, and
/// [`visit_within`][Backend::visit_within] visits exactly the slots within the radius
/// (in a backend-dependent order).
pub trait Backend<T: Scalar> {
    /// Rebuild the spatial structure from scratch over `points`.
    fn build(&mut self, points: &[Point2D<T>]) -> Result<(), TryReserveError>;

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// The slot closest to the point and its squared distance, or `None` when empty.
    fn nearest(&self, x: T, y: T) -> Option<(usize, T::Acc)>;

    /// Visit slots whose point lies within `radius` of `(x, y)` (inclusive).
    fn visit_within<F: FnMut(usize)>(&self, x: T, y: T, radius: f64, f: F);
}

/// Whether `candidate` beats the current best under the (distance, slot) ordering.
#[inline]
pub(crate) fn is_closer<A: PartialOrd>(candidate: (usize, A), best: Option<&(usize, A)>) -> bool {
    match best {
        None => true,
        Some((slot, d)) => candidate.1 < *d || (candidate.1 == *d && candidate.0 < *slot),
    }
}

/// Whether a squared distance lies inside an inclusive query radius.
#[inline]
pub(crate) fn within_radius(distance_sq: f64, radius: f64) -> bool {
    radius >= 0.0 && distance_sq <= radius * radius
}
