// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend: linear scans over every point.

use alloc::collections::TryReserveError;
use alloc::vec::Vec;

use crate::backend::{Backend, is_closer, within_radius};
use crate::types::{Point2D, Scalar};

/// Linear-scan backend. Every query touches every point.
#[derive(Clone, Debug)]
pub struct FlatVec<T> {
    points: Vec<Point2D<T>>,
}

impl<T> Default for FlatVec<T> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<T: Scalar> Backend<T> for FlatVec<T> {
    fn build(&mut self, points: &[Point2D<T>]) -> Result<(), TryReserveError> {
        self.points.clear();
        self.points.try_reserve_exact(points.len())?;
        self.points.extend_from_slice(points);
        Ok(())
    }

    fn clear(&mut self) {
        self.points.clear();
    }

    fn nearest(&self, x: T, y: T) -> Option<(usize, T::Acc)> {
        let q = Point2D::new(x, y);
        let mut best: Option<(usize, T::Acc)> = None;
        for (slot, p) in self.points.iter().enumerate() {
            let candidate = (slot, p.distance_sq(&q));
            if is_closer(candidate, best.as_ref()) {
                best = Some(candidate);
            }
        }
        best
    }

    fn visit_within<F: FnMut(usize)>(&self, x: T, y: T, radius: f64, mut f: F) {
        let q = Point2D::new(x, y);
        for (slot, p) in self.points.iter().enumerate() {
            if within_radius(p.distance_sq_f64(&q), radius) {
                f(slot);
            }
        }
    }
}
