//! # fuka-export
//!
//! Export of binary compact object initial data onto Cartesian grids.
//!
//! A spectral initial-data solver describes a neutron star or black hole
//! binary on its own domain decomposition. Evolution codes need the
//! metric, extrinsic curvature and hydrodynamic fields at their own grid
//! points instead. This crate drives that export:
//!
//! - Grid chunking and fork-join dispatch over a worker pool
//! - Per-chunk calls into the solver's exporter for the binary type
//! - Merging of chunk results into one per-field buffer
//! - Component masses and positions from the solver configuration
//! - Level file I/O for grids and exported fields
//!
//! The solver itself stays behind traits: [`SchemaExporter`] for field
//! reconstruction and [`SolverBackend`](backend::SolverBackend) for
//! configuration and solution files.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use fuka_export::types::{BinaryType, Field, Grid, GridView, Schema};
//! use fuka_export::{
//!     ExportedValues, ExporterSet, InterpolationParams, InterpolationRequest, Result,
//!     SchedulerConfig, interpolate,
//! };
//!
//! // Stand-in for the solver's BH-BH exporter
//! let flat_space = |grid: GridView<'_>, _: &Path, _: &InterpolationParams| -> Result<ExportedValues> {
//!     let mut values = ExportedValues::filled(Schema::Vacuum, grid.len(), 0.0);
//!     for field in [Field::Alpha, Field::GammaXx, Field::GammaYy, Field::GammaZz] {
//!         values.get_mut(field).unwrap().fill(1.0);
//!     }
//!     Ok(values)
//! };
//!
//! let exporters = ExporterSet::new().with(BinaryType::Bbh, flat_space);
//! let grid = Grid::line_x(-50.0, 50.0, 1001);
//! let request = InterpolationRequest::new(grid.view(), BinaryType::Bbh, "bbh.info");
//!
//! let fields = interpolate(&exporters, &request, &SchedulerConfig::new()).unwrap();
//! assert!(fields.field(Field::Alpha).iter().all(|&a| a == 1.0));
//! assert!(fields.field(Field::Rho).iter().all(|&r| r == 0.0));
//! ```

pub mod adapter;
pub mod backend;
pub mod binary_info;
pub mod buffer;
pub mod error;
pub mod io;
pub mod request;
pub mod scheduler;
pub mod types;

// Re-export main types for convenience
pub use adapter::{ExportedValues, ExporterSet, SchemaExporter, interpolate_chunk};
pub use binary_info::{BinaryInfo, read_binary_info};
pub use buffer::{FieldBuffer, FieldSliceMut};
pub use error::{ExportError, Result};
pub use request::{InterpolationParams, InterpolationRequest};
pub use scheduler::{Chunk, ChunkPlan, SchedulerConfig, interpolate};
pub use types::{BinaryType, ChunkIndex, Field, Grid, GridView, Schema};

// I/O types
pub use io::{LevelFile, LevelFileError, read_level_file, write_level_file};
