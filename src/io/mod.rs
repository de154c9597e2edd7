//! I/O utilities for reading and writing data files.
//!
//! This module provides:
//! - **Level files**: named little-endian `f64` arrays used to exchange
//!   evaluation grids and exported fields with the evolution code
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fuka_export::io::{LevelFile, read_level_file, write_level_file};
//! use fuka_export::types::Schema;
//!
//! // Evaluation points come in as variables x, y, z
//! let grid = read_level_file(Path::new("grid.0"))?.grid()?;
//!
//! // ... interpolate ...
//!
//! // Exported fields go out under their field names
//! write_level_file(Path::new("fields.0"), &LevelFile::from_fields(&fields, Schema::Matter))?;
//! ```

mod level_file;

pub use level_file::{
    LEVEL_FILE_HEADER, LevelFile, LevelFileError, parse_level_file, read_level_file,
    write_level_file,
};
