// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial-index nearest-seed search with expanding-radius range queries.

use log::{debug, trace};
use ndarray::{ArrayView2, ArrayViewMut2};
use uberseg_index::backends::{FlatVec, Grid, KdTree, suggested_cell_size};
use uberseg_index::{Backend, IndexGeneric, Neighbor, Point2D};

use crate::classify::{MaskStats, NearestObjectClassifier, mask_with, validate};
use crate::error::Result;
use crate::params::{IndexBackend, SearchParams};

/// Seeds tagged with the segmentation label at their position.
type SeedIndex<B> = IndexGeneric<i64, i32, B>;

/// Builds a spatial index over the seeds once per call, then resolves each
/// background pixel with an expanding-radius query.
///
/// Produces exactly the same mask as [`DirectSearch`][crate::DirectSearch]
/// for the same seeds: among equally distant seeds the first one wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndexedSearch {
    backend: IndexBackend,
    search: SearchParams,
}

#[allow(
    clippy::cast_possible_wrap,
    reason = "Array extents never exceed isize::MAX."
)]
fn coord(v: usize) -> i64 {
    v as i64
}

impl IndexedSearch {
    /// Search with the given backend and radius tuning.
    pub fn new(backend: IndexBackend, search: SearchParams) -> Self {
        Self { backend, search }
    }

    fn entries(
        seg: &ArrayView2<'_, i32>,
        seeds: &[(usize, usize)],
    ) -> Result<Vec<(Point2D<i64>, i32)>> {
        let mut out = Vec::new();
        out.try_reserve_exact(seeds.len())?;
        out.extend(
            seeds
                .iter()
                .map(|&(x, y)| (Point2D::new(coord(x), coord(y)), seg[[x, y]])),
        );
        Ok(out)
    }

    fn run<B: Backend<i64>>(
        &self,
        index: &SeedIndex<B>,
        seg: ArrayView2<'_, i32>,
        weight: ArrayViewMut2<'_, f32>,
        target: i32,
    ) -> Result<MaskStats> {
        let (nx, ny) = seg.dim();
        let max_radius = self.search.max_radius(nx, ny);
        let mut results = Vec::new();
        results.try_reserve(16)?;

        Ok(mask_with(seg, weight, target, |x, y| {
            nearest_label(
                index,
                &mut results,
                coord(x),
                coord(y),
                self.search.growth,
                max_radius,
            )
        }))
    }
}

/// Label of the seed nearest to `(x, y)`.
///
/// The radius starts at the distance reported by the index's nearest-point
/// query and grows geometrically until a range query returns something or the
/// radius passes `max_radius`. `results` is cleared before every query.
pub(crate) fn nearest_label<B: Backend<i64>>(
    index: &SeedIndex<B>,
    results: &mut Vec<Neighbor<i64, i32>>,
    x: i64,
    y: i64,
    growth: f64,
    max_radius: f64,
) -> Option<i32> {
    let r = index.nearest_one(x, y)?.distance_sq.sqrt();
    let mut fac = 1.0 / growth;
    loop {
        fac *= growth;
        let radius = r * fac;
        results.clear();
        index.query_within(x, y, radius, results);
        // A zero radius never grows.
        if !results.is_empty() || radius > max_radius || radius == 0.0 {
            break;
        }
        trace!("empty range query at ({x}, {y}) radius {radius}, growing");
    }

    results
        .iter()
        .min_by(|a, b| {
            a.distance_sq
                .total_cmp(&b.distance_sq)
                .then(a.slot.cmp(&b.slot))
        })
        .map(|n| n.payload)
}

impl NearestObjectClassifier for IndexedSearch {
    fn classify_and_mask(
        &self,
        seg: ArrayView2<'_, i32>,
        weight: ArrayViewMut2<'_, f32>,
        target: i32,
        seeds: &[(usize, usize)],
    ) -> Result<MaskStats> {
        validate(&seg, &weight, target, seeds)?;
        self.search.validate()?;
        self.backend.validate()?;
        debug!(
            "indexed search ({:?}): target {target}, grid {:?}, {} seeds",
            self.backend,
            seg.dim(),
            seeds.len()
        );

        let entries = Self::entries(&seg, seeds)?;
        let stats = match self.backend {
            IndexBackend::FlatVec => {
                let index = SeedIndex::<FlatVec<i64>>::try_build(&entries)?;
                self.run(&index, seg, weight, target)?
            }
            IndexBackend::KdTree => {
                let index = SeedIndex::<KdTree<i64>>::try_build(&entries)?;
                self.run(&index, seg, weight, target)?
            }
            IndexBackend::Grid { cell_size } => {
                let (nx, ny) = seg.dim();
                let cell_size = cell_size.unwrap_or_else(|| {
                    coord(suggested_cell_size(nx.saturating_mul(ny), seeds.len()))
                });
                let index = SeedIndex::try_build_with(Grid::new(cell_size), &entries)?;
                self.run(&index, seg, weight, target)?
            }
        };
        debug!("indexed search done: {stats:?}");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};
    use uberseg_index::Index;

    fn seed_index(points: &[(i64, i64, i32)]) -> SeedIndex<KdTree<i64>> {
        let entries: Vec<_> = points
            .iter()
            .map(|&(x, y, label)| (Point2D::new(x, y), label))
            .collect();
        Index::with_kdtree(&entries).unwrap()
    }

    #[test]
    fn nearest_label_breaks_ties_by_seed_order() {
        let index = seed_index(&[(0, 0, 1), (0, 4, 2), (4, 0, 3)]);
        let mut results = Vec::new();
        // (0, 2) is two pixels from both of the first two seeds.
        assert_eq!(
            nearest_label(&index, &mut results, 0, 2, 1.1, 100.0),
            Some(1)
        );
        // Irrational distances still land in the first range query or the next.
        assert_eq!(
            nearest_label(&index, &mut results, 3, 2, 1.1, 100.0),
            Some(3)
        );
        assert_eq!(
            nearest_label(&index, &mut results, 0, 3, 1.1, 100.0),
            Some(2)
        );
    }

    #[test]
    fn nearest_label_clears_previous_results() {
        let index = seed_index(&[(0, 0, 1), (9, 9, 2)]);
        let mut results = Vec::new();
        assert_eq!(nearest_label(&index, &mut results, 1, 1, 1.1, 100.0), Some(1));
        assert_eq!(nearest_label(&index, &mut results, 8, 8, 1.1, 100.0), Some(2));
        assert!(results.iter().all(|n| n.payload == 2));
    }

    #[test]
    fn empty_index_resolves_nothing() {
        let index = seed_index(&[]);
        let mut results = Vec::new();
        assert_eq!(nearest_label(&index, &mut results, 0, 0, 1.1, 10.0), None);
    }

    #[test]
    fn every_backend_masks_the_same_way() {
        let seg = array![
            [1, 1, 0, 0, 0],
            [1, 0, 0, 0, 3],
            [0, 0, 0, 3, 3],
            [0, 2, 0, 0, 0],
        ];
        let seeds = crate::labeled_coords(seg.view());
        let mut reference = Array2::<f32>::ones((4, 5));
        crate::DirectSearch
            .classify_and_mask(seg.view(), reference.view_mut(), 1, &seeds)
            .unwrap();

        for backend in [
            IndexBackend::FlatVec,
            IndexBackend::KdTree,
            IndexBackend::Grid { cell_size: None },
            IndexBackend::Grid { cell_size: Some(2) },
        ] {
            let mut weight = Array2::<f32>::ones((4, 5));
            IndexedSearch::new(backend, SearchParams::default())
                .classify_and_mask(seg.view(), weight.view_mut(), 1, &seeds)
                .unwrap();
            assert_eq!(weight, reference, "{backend:?}");
        }
    }

    #[test]
    fn invalid_growth_is_rejected_before_masking() {
        let seg = array![[1, 2]];
        let mut weight = Array2::<f32>::ones((1, 2));
        let search = SearchParams {
            growth: 1.0,
            ..SearchParams::default()
        };
        let err = IndexedSearch::new(IndexBackend::KdTree, search)
            .classify_and_mask(seg.view(), weight.view_mut(), 1, &[(0, 0)])
            .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidGrowth(_)));
        assert_eq!(weight, array![[1.0, 1.0]]);
    }

    #[test]
    fn non_positive_cell_size_is_rejected_before_masking() {
        let seg = array![[1, 0, 2]];
        for cell_size in [0, -5] {
            let mut weight = Array2::<f32>::ones((1, 3));
            let err = IndexedSearch::new(
                IndexBackend::Grid {
                    cell_size: Some(cell_size),
                },
                SearchParams::default(),
            )
            .classify_and_mask(seg.view(), weight.view_mut(), 1, &[(0, 0), (0, 2)])
            .unwrap_err();
            assert!(matches!(err, crate::Error::InvalidCellSize(c) if c == cell_size));
            assert_eq!(weight, array![[1.0, 1.0, 1.0]]);
        }
    }

    #[test]
    fn empty_seeds_zero_only_foreign_labels() {
        let seg = array![[1, 0, 2], [0, 3, 0], [1, 0, 2]];
        for backend in [
            IndexBackend::FlatVec,
            IndexBackend::KdTree,
            IndexBackend::Grid { cell_size: None },
        ] {
            let mut weight = Array2::<f32>::ones((3, 3));
            let stats = IndexedSearch::new(backend, SearchParams::default())
                .classify_and_mask(seg.view(), weight.view_mut(), 1, &[])
                .unwrap();
            assert_eq!(
                weight,
                array![[1.0, 1.0, 0.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]],
                "{backend:?}"
            );
            assert_eq!(stats.zeroed_foreign, 3, "{backend:?}");
            assert_eq!(stats.unresolved, 4, "{backend:?}");
        }
    }
}
