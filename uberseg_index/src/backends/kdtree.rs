// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static 2-d tree backend.
//!
//! The tree is bulk-built by median selection, splitting each subtree along
//! its wider axis. Every node keeps the bounding box of its subtree, so both
//! query kinds prune whole subtrees whose box cannot hold an answer.

use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::backend::{Backend, is_closer, within_radius};
use crate::types::{Aabb2D, Point2D, Scalar};

#[derive(Clone, Debug)]
struct Node<T> {
    slot: usize,
    point: Point2D<T>,
    split_x: bool,
    bounds: Aabb2D<T>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Static k-d tree over 2D points.
#[derive(Clone, Debug)]
pub struct KdTree<T> {
    nodes: Vec<Node<T>>,
    root: Option<usize>,
}

impl<T> Default for KdTree<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

fn axis_order<T: Scalar>(a: &(usize, Point2D<T>), b: &(usize, Point2D<T>), split_x: bool) -> Ordering {
    let (va, vb) = if split_x { (a.1.x, b.1.x) } else { (a.1.y, b.1.y) };
    va.partial_cmp(&vb)
        .unwrap_or(Ordering::Equal)
        .then(a.0.cmp(&b.0))
}

impl<T: Scalar> KdTree<T> {
    /// Number of levels on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn walk<T>(nodes: &[Node<T>], id: Option<usize>) -> usize {
            match id {
                None => 0,
                Some(i) => 1 + walk(nodes, nodes[i].left).max(walk(nodes, nodes[i].right)),
            }
        }
        walk(&self.nodes, self.root)
    }

    fn build_rec(&mut self, items: &mut [(usize, Point2D<T>)]) -> Option<usize> {
        let bounds = Aabb2D::enclosing(items.iter().map(|(_, p)| *p))?;
        let split_x = bounds.wider_in_x();
        let mid = items.len() / 2;
        let (left, pivot, right) =
            items.select_nth_unstable_by(mid, |a, b| axis_order(a, b, split_x));
        let (slot, point) = *pivot;

        let id = self.nodes.len();
        self.nodes.push(Node {
            slot,
            point,
            split_x,
            bounds,
            left: None,
            right: None,
        });
        let l = self.build_rec(left);
        let r = self.build_rec(right);
        self.nodes[id].left = l;
        self.nodes[id].right = r;
        Some(id)
    }

    fn nearest_rec(&self, id: usize, q: &Point2D<T>, best: &mut Option<(usize, T::Acc)>) {
        let node = &self.nodes[id];
        // Strict comparison keeps equally distant subtrees reachable for the slot tie-break.
        if let Some((_, d)) = best.as_ref()
            && node.bounds.distance_sq(q) > *d
        {
            return;
        }

        let candidate = (node.slot, node.point.distance_sq(q));
        if is_closer(candidate, best.as_ref()) {
            *best = Some(candidate);
        }

        let goes_left = if node.split_x {
            q.x <= node.point.x
        } else {
            q.y <= node.point.y
        };
        let (near, far) = if goes_left {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        if let Some(n) = near {
            self.nearest_rec(n, q, best);
        }
        if let Some(f) = far {
            self.nearest_rec(f, q, best);
        }
    }

    fn within_rec<F: FnMut(usize)>(&self, id: usize, q: &Point2D<T>, radius: f64, f: &mut F) {
        let node = &self.nodes[id];
        if !within_radius(T::acc_to_f64(node.bounds.distance_sq(q)), radius) {
            return;
        }
        if within_radius(node.point.distance_sq_f64(q), radius) {
            f(node.slot);
        }
        if let Some(l) = node.left {
            self.within_rec(l, q, radius, f);
        }
        if let Some(r) = node.right {
            self.within_rec(r, q, radius, f);
        }
    }
}

impl<T: Scalar> Backend<T> for KdTree<T> {
    fn build(&mut self, points: &[Point2D<T>]) -> Result<(), TryReserveError> {
        self.clear();
        self.nodes.try_reserve_exact(points.len())?;
        let mut items = Vec::new();
        items.try_reserve_exact(points.len())?;
        items.extend(points.iter().copied().enumerate());
        self.root = self.build_rec(&mut items);
        Ok(())
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    fn nearest(&self, x: T, y: T) -> Option<(usize, T::Acc)> {
        let root = self.root?;
        let mut best = None;
        self.nearest_rec(root, &Point2D::new(x, y), &mut best);
        best
    }

    fn visit_within<F: FnMut(usize)>(&self, x: T, y: T, radius: f64, mut f: F) {
        if let Some(root) = self.root {
            self.within_rec(root, &Point2D::new(x, y), radius, &mut f);
        }
    }
}

/// k-d tree backend over `f32` coordinates.
pub type KdTreeF32 = KdTree<f32>;
/// k-d tree backend over `f64` coordinates.
pub type KdTreeF64 = KdTree<f64>;
/// k-d tree backend over `i64` coordinates.
pub type KdTreeI64 = KdTree<i64>;
