// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::{Aabb2D, Point2D, Scalar};

/// A query result: one indexed point with its payload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor<T, P> {
    /// Position of the point in the build order.
    pub slot: usize,
    /// The indexed position.
    pub point: Point2D<T>,
    /// The payload stored with the point.
    pub payload: P,
    /// Squared Euclidean distance from the query position.
    pub distance_sq: f64,
}

/// A static point index parameterized by a spatial backend.
///
/// The index is built once from a slice of `(position, payload)` pairs and is
/// read-only afterwards. Dropping it releases the backend storage.
#[derive(Debug)]
pub struct IndexGeneric<T: Scalar, P: Copy + Debug, B: Backend<T>> {
    points: Vec<Point2D<T>>,
    payloads: Vec<P>,
    backend: B,
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Scalar,
    P: Copy + Debug,
    B: Backend<T> + Default,
{
    /// Build an index with the backend's default configuration.
    pub fn try_build(entries: &[(Point2D<T>, P)]) -> Result<Self, TryReserveError> {
        Self::try_build_with(B::default(), entries)
    }
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Scalar,
    P: Copy + Debug,
    B: Backend<T>,
{
    /// Build an index using an explicit backend instance.
    ///
    /// This is useful when the backend needs configuration (for example a
    /// grid cell size) before it is filled.
    pub fn try_build_with(mut backend: B, entries: &[(Point2D<T>, P)]) -> Result<Self, TryReserveError> {
        let mut points = Vec::new();
        points.try_reserve_exact(entries.len())?;
        let mut payloads = Vec::new();
        payloads.try_reserve_exact(entries.len())?;
        for &(point, payload) in entries {
            points.push(point);
            payloads.push(payload);
        }
        backend.build(&points)?;
        Ok(Self {
            points,
            payloads,
            backend,
        })
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Indexed positions in slot order.
    pub fn points(&self) -> &[Point2D<T>] {
        &self.points
    }

    /// The point and payload stored at `slot`.
    pub fn get(&self, slot: usize) -> Option<(Point2D<T>, P)> {
        Some((*self.points.get(slot)?, *self.payloads.get(slot)?))
    }

    /// Bounding box of all indexed points, or `None` when empty.
    pub fn bounds(&self) -> Option<Aabb2D<T>> {
        Aabb2D::enclosing(self.points.iter().copied())
    }

    fn neighbor(&self, slot: usize, query: &Point2D<T>) -> Neighbor<T, P> {
        let point = self.points[slot];
        Neighbor {
            slot,
            point,
            payload: self.payloads[slot],
            distance_sq: point.distance_sq_f64(query),
        }
    }

    /// The point closest to `(x, y)`.
    ///
    /// Among equally distant points the one built first wins.
    pub fn nearest_one(&self, x: T, y: T) -> Option<Neighbor<T, P>> {
        let (slot, _) = self.backend.nearest(x, y)?;
        Some(self.neighbor(slot, &Point2D::new(x, y)))
    }

    /// Append every point within `radius` of `(x, y)` (inclusive) to `out`.
    ///
    /// The buffer is not cleared first, so callers can reuse one allocation
    /// across queries. Returns the number of appended results. The order is
    /// backend-dependent.
    pub fn query_within(&self, x: T, y: T, radius: f64, out: &mut Vec<Neighbor<T, P>>) -> usize {
        let before = out.len();
        self.visit_within(x, y, radius, |n| out.push(n));
        out.len() - before
    }

    /// Visit every point within `radius` of `(x, y)` (does not allocate result storage).
    ///
    /// Calls `f(neighbor)` for each match. The order is backend-dependent.
    pub fn visit_within<F: FnMut(Neighbor<T, P>)>(&self, x: T, y: T, radius: f64, mut f: F) {
        let q = Point2D::new(x, y);
        self.backend
            .visit_within(x, y, radius, |slot| f(self.neighbor(slot, &q)));
    }
}

/// Default index using a flat vector backend.
pub type Index<T, P> = IndexGeneric<T, P, crate::backends::flatvec::FlatVec<T>>;

impl<T: Scalar, P: Copy + Debug> Index<T, P> {
    /// Build a k-d tree backed index.
    pub fn with_kdtree(
        entries: &[(Point2D<T>, P)],
    ) -> Result<IndexGeneric<T, P, crate::backends::kdtree::KdTree<T>>, TryReserveError> {
        IndexGeneric::try_build(entries)
    }
}

#[cfg(feature = "backend_grid")]
impl<T: crate::backends::grid::GridScalar, P: Copy + Debug> Index<T, P> {
    /// Build a uniform-grid backed index with the given cell size.
    pub fn with_grid(
        cell_size: T,
        entries: &[(Point2D<T>, P)],
    ) -> Result<IndexGeneric<T, P, crate::backends::grid::Grid<T>>, TryReserveError> {
        IndexGeneric::try_build_with(crate::backends::grid::Grid::new(cell_size), entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn labeled() -> Vec<(Point2D<i64>, u32)> {
        vec![
            (Point2D::new(0, 0), 1),
            (Point2D::new(0, 1), 1),
            (Point2D::new(2, 2), 2),
            (Point2D::new(5, 0), 3),
        ]
    }

    #[test]
    fn nearest_one_reports_payload_and_distance() {
        let idx: Index<i64, u32> = Index::try_build(&labeled()).unwrap();
        let n = idx.nearest_one(4, 0).unwrap();
        assert_eq!(n.slot, 3);
        assert_eq!(n.payload, 3);
        assert_eq!(n.point, Point2D::new(5, 0));
        assert_eq!(idx.points()[n.slot], n.point);
        assert_eq!(n.distance_sq, 1.0);
    }

    #[test]
    fn ties_resolve_to_first_built() {
        let idx = Index::with_kdtree(&labeled()).unwrap();
        // (2, 0) is at squared distance 4 from both (0, 0) and (2, 2).
        let n = idx.nearest_one(2, 0).unwrap();
        assert_eq!((n.slot, n.payload), (0, 1));
        assert_eq!(n.distance_sq, 4.0);
    }

    #[test]
    fn query_within_appends_without_clearing() {
        let idx = Index::with_kdtree(&labeled()).unwrap();
        let mut out = Vec::new();
        assert_eq!(idx.query_within(0, 0, 1.0, &mut out), 2);
        assert_eq!(idx.query_within(5, 0, 0.0, &mut out), 1);
        assert_eq!(out.len(), 3);

        out.clear();
        assert_eq!(idx.query_within(10, 10, 2.0, &mut out), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn visit_and_query_counts_match() {
        let idx = Index::with_kdtree(&labeled()).unwrap();
        let mut out = Vec::new();
        let n = idx.query_within(1, 1, 2.0, &mut out);
        let mut visited = 0;
        idx.visit_within(1, 1, 2.0, |_| visited += 1);
        assert_eq!(visited, n);
    }

    #[test]
    fn empty_index_has_no_answers() {
        let idx: Index<f64, ()> = Index::try_build(&[]).unwrap();
        assert!(idx.is_empty());
        assert!(idx.points().is_empty());
        assert_eq!(idx.bounds(), None);
        assert!(idx.nearest_one(0.0, 0.0).is_none());
    }

    #[test]
    fn accessors_reflect_build_order() {
        let idx: Index<i64, u32> = Index::try_build(&labeled()).unwrap();
        assert_eq!(idx.len(), 4);
        assert_eq!(idx.get(2), Some((Point2D::new(2, 2), 2)));
        assert_eq!(idx.get(4), None);
        assert_eq!(idx.bounds(), Some(Aabb2D::new(0, 0, 5, 2)));
    }

    #[cfg(feature = "backend_grid")]
    #[test]
    fn grid_index_agrees_with_flat_index() {
        let flat: Index<i64, u32> = Index::try_build(&labeled()).unwrap();
        let grid = Index::with_grid(2, &labeled()).unwrap();
        for x in -3..8 {
            for y in -3..6 {
                let a = flat.nearest_one(x, y).map(|n| n.slot);
                let b = grid.nearest_one(x, y).map(|n| n.slot);
                assert_eq!(a, b, "at ({x}, {y})");
            }
        }
    }
}
