// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend for 2D points.
//!
//! This backend buckets points into fixed-size grid cells and answers queries
//! by touching only the cells that can hold an answer:
//! - nearest-neighbor queries walk square rings of cells outward from the
//!   query cell and stop once the next ring cannot beat the current best,
//! - radius queries visit the square block of cells covering the query disk.
//!
//! It works best when points are roughly uniformly distributed and the cell
//! size is close to the mean point spacing (see [`suggested_cell_size`]).

use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::backend::{Backend, is_closer, within_radius};
use crate::types::{Point2D, Scalar};
use crate::util::isqrt_ceil;

/// Scalar types supported by the grid backend.
///
/// This is kept separate from [`Scalar`] so that the grid implementation can
/// use type-specific logic (e.g., Euclidean division for integers).
pub trait GridScalar: Scalar {
    /// Map a scalar coordinate to a grid coordinate along one axis.
    ///
    /// Implementations round towards -∞ and saturate to the `i32` range, so the
    /// mapping is monotonic in `value` for fixed `origin` and `cell_size`.
    fn cell_coord(value: Self, origin: Self, cell_size: Self) -> i32;
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Grid cell indices are intentionally i32; out-of-range values are saturated."
)]
#[inline]
fn floor_to_cell(t: f64) -> i32 {
    // `as` saturates and truncates towards zero.
    let coord = t as i32;
    if t < 0.0 && f64::from(coord) > t {
        coord.saturating_sub(1)
    } else {
        coord
    }
}

impl GridScalar for f32 {
    #[inline]
    fn cell_coord(value: Self, origin: Self, cell_size: Self) -> i32 {
        debug_assert!(cell_size > 0.0, "grid cell_size must be strictly positive");
        floor_to_cell(f64::from((value - origin) / cell_size))
    }
}

impl GridScalar for f64 {
    #[inline]
    fn cell_coord(value: Self, origin: Self, cell_size: Self) -> i32 {
        debug_assert!(cell_size > 0.0, "grid cell_size must be strictly positive");
        floor_to_cell((value - origin) / cell_size)
    }
}

impl GridScalar for i64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The value is clamped to the i32 range first."
    )]
    #[inline]
    fn cell_coord(value: Self, origin: Self, cell_size: Self) -> i32 {
        debug_assert!(cell_size > 0, "grid cell_size must be strictly positive");
        // Euclidean division rounds toward -∞ for a positive divisor.
        let coord = value.saturating_sub(origin).div_euclid(cell_size);
        coord.clamp(Self::from(i32::MIN), Self::from(i32::MAX)) as i32
    }
}

/// A cell size giving roughly one point per cell for `count` points spread
/// over `area` square units. Never less than 1.
pub fn suggested_cell_size(area: usize, count: usize) -> usize {
    if count == 0 {
        return isqrt_ceil(area).max(1);
    }
    isqrt_ceil(area.div_ceil(count)).max(1)
}

/// Inclusive range of occupied cell coordinates.
#[derive(Copy, Clone, Debug)]
struct Extent {
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
}

impl Extent {
    fn include(&mut self, ix: i64, iy: i64) {
        self.min_x = self.min_x.min(ix);
        self.min_y = self.min_y.min(iy);
        self.max_x = self.max_x.max(ix);
        self.max_y = self.max_y.max(iy);
    }
}

#[derive(Default)]
struct Cell {
    slots: SmallVec<[usize; 8]>,
}

/// Uniform grid backend with fixed cell size.
pub struct Grid<T: GridScalar> {
    cell_size: T,
    origin_x: T,
    origin_y: T,
    cells: HashMap<(i32, i32), Cell>,
    points: Vec<Point2D<T>>,
    extent: Option<Extent>,
}

impl<T: GridScalar> Debug for Grid<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Grid")
            .field("cell_size", &self.cell_size)
            .field("origin_x", &self.origin_x)
            .field("origin_y", &self.origin_y)
            .field("points", &self.points.len())
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

impl<T: GridScalar> Grid<T> {
    /// Create a new grid backend with the given cell size and origin at (0, 0).
    pub fn new(cell_size: T) -> Self {
        Self::with_origin(cell_size, T::zero(), T::zero())
    }

    /// Create a new grid backend with the given cell size and origin.
    pub fn with_origin(cell_size: T, origin_x: T, origin_y: T) -> Self {
        debug_assert!(cell_size > T::zero(), "cell_size must be strictly positive");
        Self {
            cell_size,
            origin_x,
            origin_y,
            cells: HashMap::new(),
            points: Vec::new(),
            extent: None,
        }
    }

    fn cell_of(&self, x: T, y: T) -> (i64, i64) {
        (
            i64::from(T::cell_coord(x, self.origin_x, self.cell_size)),
            i64::from(T::cell_coord(y, self.origin_y, self.cell_size)),
        )
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Cell coordinates are always clamped to the occupied extent, which fits in i32."
    )]
    fn visit_cell<F: FnMut(usize)>(&self, ix: i64, iy: i64, f: &mut F) {
        if let Some(cell) = self.cells.get(&(ix as i32, iy as i32)) {
            for &slot in &cell.slots {
                f(slot);
            }
        }
    }

    /// Visit the occupied cells at Chebyshev distance exactly `k` from `(qx, qy)`.
    fn visit_ring<F: FnMut(usize)>(&self, qx: i64, qy: i64, k: i64, ext: &Extent, f: &mut F) {
        let x0 = (qx - k).max(ext.min_x);
        let x1 = (qx + k).min(ext.max_x);
        let top = qy - k;
        let bottom = qy + k;
        for ix in x0..=x1 {
            if (ext.min_y..=ext.max_y).contains(&top) {
                self.visit_cell(ix, top, f);
            }
            if k > 0 && (ext.min_y..=ext.max_y).contains(&bottom) {
                self.visit_cell(ix, bottom, f);
            }
        }

        let y0 = (qy - k + 1).max(ext.min_y);
        let y1 = (qy + k - 1).min(ext.max_y);
        let left = qx - k;
        let right = qx + k;
        for iy in y0..=y1 {
            if (ext.min_x..=ext.max_x).contains(&left) {
                self.visit_cell(left, iy, f);
            }
            if k > 0 && (ext.min_x..=ext.max_x).contains(&right) {
                self.visit_cell(right, iy, f);
            }
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "The ratio is capped at u32::MAX before the cast."
    )]
    fn cell_span(&self, radius: f64) -> i64 {
        let t = radius / T::to_f64(self.cell_size);
        // Round up; spans past the extent are clipped anyway.
        let s = t.min(f64::from(u32::MAX)) as i64;
        if (s as f64) < t { s + 1 } else { s }
    }
}

impl<T: GridScalar> Backend<T> for Grid<T> {
    fn build(&mut self, points: &[Point2D<T>]) -> Result<(), TryReserveError> {
        self.clear();
        self.points.try_reserve_exact(points.len())?;
        self.points.extend_from_slice(points);

        for (slot, p) in points.iter().enumerate() {
            let key = (
                T::cell_coord(p.x, self.origin_x, self.cell_size),
                T::cell_coord(p.y, self.origin_y, self.cell_size),
            );
            let (ix, iy) = (i64::from(key.0), i64::from(key.1));
            match &mut self.extent {
                Some(ext) => ext.include(ix, iy),
                None => {
                    self.extent = Some(Extent {
                        min_x: ix,
                        min_y: iy,
                        max_x: ix,
                        max_y: iy,
                    });
                }
            }
            self.cells.entry(key).or_default().slots.push(slot);
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.points.clear();
        self.extent = None;
    }

    fn nearest(&self, x: T, y: T) -> Option<(usize, T::Acc)> {
        let ext = self.extent?;
        let q = Point2D::new(x, y);
        let (qx, qy) = self.cell_of(x, y);
        let cell = T::to_f64(self.cell_size);

        let mut best: Option<(usize, T::Acc)> = None;
        let mut k = 0_i64;
        loop {
            self.visit_ring(qx, qy, k, &ext, &mut |slot| {
                let candidate = (slot, self.points[slot].distance_sq(&q));
                if is_closer(candidate, best.as_ref()) {
                    best = Some(candidate);
                }
            });

            let covered = qx - k <= ext.min_x
                && qx + k >= ext.max_x
                && qy - k <= ext.min_y
                && qy + k >= ext.max_y;
            if covered {
                break;
            }
            // Every point in ring k + 1 or beyond is strictly farther than k cells.
            if let Some((_, d)) = best {
                let reach = k as f64 * cell;
                if T::acc_to_f64(d) <= reach * reach {
                    break;
                }
            }
            k += 1;
        }
        best
    }

    fn visit_within<F: FnMut(usize)>(&self, x: T, y: T, radius: f64, mut f: F) {
        let Some(ext) = self.extent else {
            return;
        };
        if radius.is_nan() || radius < 0.0 {
            return;
        }
        let q = Point2D::new(x, y);
        let (qx, qy) = self.cell_of(x, y);
        let span = self.cell_span(radius);

        let x0 = (qx - span).max(ext.min_x);
        let x1 = (qx + span).min(ext.max_x);
        let y0 = (qy - span).max(ext.min_y);
        let y1 = (qy + span).min(ext.max_y);
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                self.visit_cell(ix, iy, &mut |slot| {
                    if within_radius(self.points[slot].distance_sq_f64(&q), radius) {
                        f(slot);
                    }
                });
            }
        }
    }
}

/// Grid backend over `f32` coordinates.
pub type GridF32 = Grid<f32>;
/// Grid backend over `f64` coordinates.
pub type GridF64 = Grid<f64>;
/// Grid backend over `i64` coordinates.
pub type GridI64 = Grid<i64>;
