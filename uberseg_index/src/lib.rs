// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uberseg Index: a generic, static 2D point index.
//!
//! Uberseg Index is the spatial building block behind nearest-object masking:
//!
//! - Bulk-build an index from `(position, payload)` pairs (for example pixel
//!   coordinates tagged with their segmentation label).
//! - Ask for the single nearest point with [`IndexGeneric::nearest_one`].
//! - Collect every point inside a radius with [`IndexGeneric::query_within`],
//!   reusing one caller-owned buffer across queries.
//!
//! Coordinates are any [`Scalar`] (`i64`, `f32`, `f64`) and payloads any `Copy` value.
//! Squared distances are accumulated in a widened type (`i64`→`i128`,
//! `f32`→`f64`) so integer pixel coordinates compare exactly.
//!
//! Queries go through the [`Backend`] trait, so the search structure can change
//! without touching callers. The default backend is a flat vector (linear scan). Additional backends are a static
//! k-d tree and a uniform grid (feature `backend_grid`).
//!
//! ## Features
//!
//! - `backend_grid` *(default)*: enables a uniform grid backend backed by `hashbrown` and
//!   `smallvec`. Disable this feature to avoid those dependencies and the grid types.
//!
//! # Example
//!
//! ```rust
//! use uberseg_index::{Index, Point2D};
//!
//! // Pixel coordinates tagged with the label of the object that owns them.
//! let labeled = [
//!     (Point2D::new(0_i64, 0), 1),
//!     (Point2D::new(0, 1), 1),
//!     (Point2D::new(4, 4), 2),
//! ];
//! let idx = Index::with_kdtree(&labeled).unwrap();
//!
//! // Which object is closest to pixel (3, 3)?
//! let nearest = idx.nearest_one(3, 3).unwrap();
//! assert_eq!(nearest.payload, 2);
//! assert_eq!(nearest.distance_sq, 2.0);
//!
//! // Everything within 1.5 pixels of (0, 0), collected into a reusable buffer.
//! let mut hits = Vec::new();
//! idx.query_within(0, 0, 1.5, &mut hits);
//! assert_eq!(hits.len(), 2);
//! ```
//!
//! A uniform grid needs a cell size up front:
//!
//! ```rust
//! # #[cfg(feature = "backend_grid")]
//! # {
//! use uberseg_index::{Index, Point2D};
//!
//! // Use a grid backend (f64) with an 8-unit cell size.
//! let idx = Index::with_grid(8.0, &[(Point2D::new(1.0, 2.0), 'a'), (Point2D::new(30.0, 2.0), 'b')])
//!     .unwrap();
//! assert_eq!(idx.nearest_one(20.0, 0.0).map(|n| n.payload), Some('b'));
//! # }
//! ```
//!
//! ## Choosing a backend
//!
//! - `FlatVec` (default): a linear scan over every point. Fine for a handful of
//!   seeds, and the reference answer in tests.
//! - `KdTreeF32`/`KdTreeF64`/`KdTreeI64`: balanced static tree; a good general-purpose
//!   choice when the point distribution is irregular (clumpy object footprints).
//! - `GridF32`/`GridF64`/`GridI64` *(feature `backend_grid`)*: hashed uniform cells
//!   of a fixed size. Works best when points are spread roughly evenly and the cell size is close
//!   to the typical point spacing.
//!
//! ### Tie semantics
//!
//! [`IndexGeneric::nearest_one`] returns the first point in build order among equally
//! distant candidates, whichever backend is used.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Debug builds may assert.

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;
mod index;
mod types;
#[cfg(feature = "backend_grid")]
pub(crate) mod util;

pub use backend::Backend;
pub use index::{Index, IndexGeneric, Neighbor};
pub use types::{Aabb2D, Point2D, Scalar};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn entries() -> Vec<(Point2D<i64>, i32)> {
        let mut out = Vec::new();
        for x in 0..6 {
            for y in 0..6 {
                let label = if x < 3 { 1 } else { 2 };
                out.push((Point2D::new(x * 4, y * 4), label));
            }
        }
        out
    }

    #[test]
    fn backends_agree_on_nearest_and_radius() {
        let flat: Index<i64, i32> = Index::try_build(&entries()).unwrap();
        let tree = Index::with_kdtree(&entries()).unwrap();
        for x in -4..26 {
            for y in -4..26 {
                let a = flat.nearest_one(x, y).unwrap();
                let b = tree.nearest_one(x, y).unwrap();
                assert_eq!(a, b, "at ({x}, {y})");

                for radius in [0.0, 2.0, 2.9, 6.0] {
                    let mut ra = Vec::new();
                    let mut rb = Vec::new();
                    flat.query_within(x, y, radius, &mut ra);
                    tree.query_within(x, y, radius, &mut rb);
                    ra.sort_by_key(|n| n.slot);
                    rb.sort_by_key(|n| n.slot);
                    assert_eq!(ra, rb, "radius {radius} at ({x}, {y})");
                }
            }
        }
    }
}
