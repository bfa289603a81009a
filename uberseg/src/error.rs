// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for masking calls.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by a masking call.
///
/// Argument errors are detected before any weight is written. Having no seed
/// points is not an error: unresolved pixels are simply left untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// Segmentation and weight grids differ in shape.
    #[error("segmentation shape {seg:?} does not match weight shape {weight:?}")]
    ShapeMismatch {
        /// Shape of the segmentation grid.
        seg: (usize, usize),
        /// Shape of the weight grid.
        weight: (usize, usize),
    },
    /// The target object id is not a positive label.
    #[error("target object id must be positive, got {0}")]
    InvalidTarget(i32),
    /// A seed coordinate lies outside the grid.
    #[error("seed {index} at ({x}, {y}) lies outside the {shape:?} grid")]
    SeedOutOfBounds {
        /// Position of the offending seed in the seed list.
        index: usize,
        /// Seed x coordinate.
        x: usize,
        /// Seed y coordinate.
        y: usize,
        /// Shape of the grid.
        shape: (usize, usize),
    },
    /// The radius growth factor would never enlarge the search radius.
    #[error("radius growth factor must be finite and greater than 1, got {0}")]
    InvalidGrowth(f64),
    /// An explicit grid cell size is not positive.
    #[error("grid cell size must be positive, got {0}")]
    InvalidCellSize(i64),
    /// The spatial index or a query buffer could not be allocated.
    #[error("failed to allocate search structures")]
    Allocation(#[from] TryReserveError),
}

/// Result alias for masking calls.
pub type Result<T, E = Error> = core::result::Result<T, E>;
