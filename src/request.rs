//! Interpolation requests and their parameters.

use std::path::{Path, PathBuf};

use crate::scheduler::Chunk;
use crate::types::{BinaryType, GridView};

/// Parameters forwarded to the exporter's field reconstruction.
///
/// The neutron star binary exporter ignores them; the black hole exporters
/// use them to regularise fields near the excised horizons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpolationParams {
    /// Offset of the interpolation stencil from the excision surface
    pub stencil_offset: f64,
    /// Order of the radial interpolation polynomial
    pub order: usize,
    /// Radial spacing of the stencil relative to the excision radius
    pub relative_dr_spacing: f64,
}

impl Default for InterpolationParams {
    fn default() -> Self {
        Self {
            stencil_offset: 0.0,
            order: 8,
            relative_dr_spacing: 0.3,
        }
    }
}

impl InterpolationParams {
    /// Set the stencil offset.
    pub fn with_stencil_offset(mut self, offset: f64) -> Self {
        self.stencil_offset = offset;
        self
    }

    /// Set the interpolation order.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Set the relative radial spacing.
    pub fn with_relative_dr_spacing(mut self, spacing: f64) -> Self {
        self.relative_dr_spacing = spacing;
        self
    }
}

/// One interpolation of initial data onto a grid.
///
/// Immutable once built. Chunk requests are derived with [`for_chunk`](Self::for_chunk),
/// which keeps everything but the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct InterpolationRequest<'a> {
    grid: GridView<'a>,
    binary_type: BinaryType,
    config_path: PathBuf,
    params: InterpolationParams,
}

impl<'a> InterpolationRequest<'a> {
    /// Create a request with default interpolation parameters.
    pub fn new(grid: GridView<'a>, binary_type: BinaryType, config_path: impl Into<PathBuf>) -> Self {
        Self {
            grid,
            binary_type,
            config_path: config_path.into(),
            params: InterpolationParams::default(),
        }
    }

    /// Replace the interpolation parameters.
    pub fn with_params(mut self, params: InterpolationParams) -> Self {
        self.params = params;
        self
    }

    /// Points to evaluate.
    #[inline]
    pub fn grid(&self) -> GridView<'a> {
        self.grid
    }

    /// Binary type of the initial data.
    #[inline]
    pub fn binary_type(&self) -> BinaryType {
        self.binary_type
    }

    /// Solver configuration file describing the solution.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Interpolation parameters.
    #[inline]
    pub fn params(&self) -> &InterpolationParams {
        &self.params
    }

    /// Same request restricted to the points of `chunk`.
    ///
    /// # Panics
    /// If the chunk extends past the end of the grid.
    pub fn for_chunk(&self, chunk: &Chunk) -> InterpolationRequest<'a> {
        Self {
            grid: self.grid.slice(chunk.offset, chunk.len),
            binary_type: self.binary_type,
            config_path: self.config_path.clone(),
            params: self.params,
        }
    }
}
