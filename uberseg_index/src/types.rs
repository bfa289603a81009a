// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// A point in 2D.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point2D<T> {
    /// Horizontal coordinate (first array axis for pixel grids).
    pub x: T,
    /// Vertical coordinate (second array axis for pixel grids).
    pub y: T,
}

impl<T> Point2D<T> {
    /// Create a new point.
    #[inline(always)]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Scalar> Point2D<T> {
    /// Squared Euclidean distance to `other`, in the widened accumulator type.
    ///
    /// Coordinates are widened before subtracting, so `i64` points never overflow.
    #[inline]
    pub fn distance_sq(&self, other: &Self) -> T::Acc {
        let dx = T::widen(self.x) - T::widen(other.x);
        let dy = T::widen(self.y) - T::widen(other.y);
        dx * dx + dy * dy
    }

    /// Squared Euclidean distance to `other` as `f64`.
    #[inline]
    pub fn distance_sq_f64(&self, other: &Self) -> f64 {
        T::acc_to_f64(self.distance_sq(other))
    }
}

/// Axis-aligned bounding box in 2D.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x
    pub min_x: T,
    /// Minimum y
    pub min_y: T,
    /// Maximum x
    pub max_x: T,
    /// Maximum y
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    #[inline(always)]
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// The degenerate AABB containing only `p`.
    #[inline]
    pub fn from_point(p: Point2D<T>) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// Whether this AABB contains the point. Edges are inclusive.
    #[inline]
    pub fn contains_point(&self, x: T, y: T) -> bool {
        self.min_x <= x && self.min_y <= y && x <= self.max_x && y <= self.max_y
    }

    /// Grow this AABB to include `p`.
    #[inline]
    pub fn include(&mut self, p: Point2D<T>) {
        self.min_x = min_t(self.min_x, p.x);
        self.min_y = min_t(self.min_y, p.y);
        self.max_x = max_t(self.max_x, p.x);
        self.max_y = max_t(self.max_y, p.y);
    }

    /// The bounding box of a set of points, or `None` if there are none.
    pub fn enclosing(points: impl IntoIterator<Item = Point2D<T>>) -> Option<Self> {
        let mut it = points.into_iter();
        let mut out = Self::from_point(it.next()?);
        for p in it {
            out.include(p);
        }
        Some(out)
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// Squared distance from `p` to the nearest point of this AABB (zero when inside).
    #[inline]
    pub fn distance_sq(&self, p: &Point2D<T>) -> T::Acc {
        let dx = axis_gap(p.x, self.min_x, self.max_x);
        let dy = axis_gap(p.y, self.min_y, self.max_y);
        dx * dx + dy * dy
    }

    /// Whether the x extent is at least as wide as the y extent.
    #[inline]
    pub(crate) fn wider_in_x(&self) -> bool {
        let w = T::widen(self.max_x) - T::widen(self.min_x);
        let h = T::widen(self.max_y) - T::widen(self.min_y);
        w >= h
    }
}

fn axis_gap<T: Scalar>(v: T, min: T, max: T) -> T::Acc {
    if v < min {
        T::widen(min) - T::widen(v)
    } else if v > max {
        T::widen(v) - T::widen(max)
    } else {
        T::widen(T::zero())
    }
}

/// Numeric scalar abstraction for point coordinates.
///
/// Distances are accumulated in a widened type (f32→f64, i64→i128) so that
/// squared distances of integer pixel coordinates are exact, and are compared
/// against query radii as `f64`.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for squared distances.
    type Acc: Copy
        + PartialOrd
        + core::ops::Add<Output = Self::Acc>
        + core::ops::Sub<Output = Self::Acc>
        + core::ops::Mul<Output = Self::Acc>
        + Debug;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;

    /// Convert an accumulated value to `f64` for comparisons against radii.
    fn acc_to_f64(v: Self::Acc) -> f64;

    /// Convert a scalar to `f64`.
    fn to_f64(v: Self) -> f64;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }

    #[inline(always)]
    fn acc_to_f64(v: Self::Acc) -> f64 {
        v
    }

    #[inline]
    fn to_f64(v: Self) -> f64 {
        v as f64
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline(always)]
    fn widen(v: Self) -> Self::Acc {
        v
    }

    #[inline(always)]
    fn acc_to_f64(v: Self::Acc) -> f64 {
        v
    }

    #[inline(always)]
    fn to_f64(v: Self) -> f64 {
        v
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline(always)]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }

    #[inline]
    fn acc_to_f64(v: Self::Acc) -> f64 {
        v as f64
    }

    #[inline]
    fn to_f64(v: Self) -> f64 {
        v as f64
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}
