// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strategy selection and search tuning.

use crate::error::{Error, Result};

/// Spatial index used by the indexed strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexBackend {
    /// Linear scan behind the index interface. Mostly useful for testing.
    FlatVec,
    /// Uniform grid. `None` picks a cell size giving about one seed per cell.
    Grid {
        /// Cell edge length in pixels, strictly positive when given.
        cell_size: Option<i64>,
    },
    /// Static k-d tree.
    #[default]
    KdTree,
}

impl IndexBackend {
    pub(crate) fn validate(&self) -> Result<()> {
        match *self {
            Self::Grid {
                cell_size: Some(c),
            } if c <= 0 => Err(Error::InvalidCellSize(c)),
            _ => Ok(()),
        }
    }
}

/// How background pixels find their nearest labeled pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Scan every seed for every background pixel.
    Direct,
    /// Build a spatial index over the seeds once and run expanding-radius queries.
    Indexed(IndexBackend),
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Indexed(IndexBackend::default())
    }
}

/// Tuning for the expanding-radius search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchParams {
    /// Factor the search radius is multiplied by after an empty range query.
    pub growth: f64,
    /// Hard bound on the search radius, as a multiple of the grid diagonal.
    pub max_radius_scale: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            growth: 1.1,
            max_radius_scale: 1.1,
        }
    }
}

impl SearchParams {
    /// The largest radius tried for an `nx` × `ny` grid.
    pub fn max_radius(&self, nx: usize, ny: usize) -> f64 {
        let (nx, ny) = (nx as f64, ny as f64);
        self.max_radius_scale * (nx * nx + ny * ny).sqrt()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.growth.is_finite() && self.growth > 1.0 {
            Ok(())
        } else {
            Err(Error::InvalidGrowth(self.growth))
        }
    }
}

/// Parameters for [`uberseg`][crate::uberseg].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UbersegParams {
    /// Search strategy.
    pub strategy: Strategy,
    /// Expanding-radius tuning (indexed strategy only).
    pub search: SearchParams,
}

impl UbersegParams {
    /// Parameters selecting the brute-force strategy.
    pub fn direct() -> Self {
        Self {
            strategy: Strategy::Direct,
            ..Self::default()
        }
    }

    /// Parameters selecting the indexed strategy with the given backend.
    pub fn indexed(backend: IndexBackend) -> Self {
        Self {
            strategy: Strategy::Indexed(backend),
            ..Self::default()
        }
    }
}
