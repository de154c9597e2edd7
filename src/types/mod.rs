//! Strongly-typed domain types.
//!
//! - [`BinaryType`]: which compact binary the initial data describes
//! - [`Field`] and [`Schema`]: exported quantities and the vacuum/matter field sets
//! - [`Grid`] and [`GridView`]: Cartesian evaluation points
//! - [`ChunkIndex`]: chunk numbers in a scheduling plan
//!
//! # Example
//!
//! ```
//! use fuka_export::types::{BinaryType, Field, Grid, Schema};
//!
//! let bt: BinaryType = "bbh".parse().unwrap();
//! assert_eq!(bt.schema(), Schema::Vacuum);
//! assert!(!bt.schema().contains(Field::Rho));
//!
//! let grid = Grid::line_x(-10.0, 10.0, 21);
//! assert_eq!(grid.view().slice(5, 3).len(), 3);
//! ```

mod binary;
mod field;
mod grid;
mod indices;

pub use binary::BinaryType;
pub use field::{Field, N_FIELDS, N_VACUUM_FIELDS, Schema};
pub use grid::{Grid, GridView};
pub use indices::ChunkIndex;
