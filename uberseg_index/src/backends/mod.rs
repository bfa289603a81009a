// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple, the reference answer).
//! - `kdtree`: static 2-d tree with per-subtree bounds (aliases: `KdTreeI64`, `KdTreeF32`, `KdTreeF64`).
//! - `grid` (feature `backend_grid`): uniform hashed grid with configurable cell size.
//!
//! Tie note
//! --------
//! All backends order nearest candidates by `(squared distance, slot)`, so the
//! nearest point is the *first* of several equally distant points in build
//! order. Radius queries return the same set of slots for every backend; only
//! the visiting order differs.

pub(crate) mod flatvec;
#[cfg(feature = "backend_grid")]
pub(crate) mod grid;
pub(crate) mod kdtree;

pub use flatvec::FlatVec;
#[cfg(feature = "backend_grid")]
pub use grid::{Grid, GridF32, GridF64, GridI64, GridScalar, suggested_cell_size};
pub use kdtree::{KdTree, KdTreeF32, KdTreeF64, KdTreeI64};
