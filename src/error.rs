//! Error type for configuration, dispatch and export failures.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{BinaryType, ChunkIndex, Field, Schema};

/// Errors raised while reading binary metadata or interpolating fields.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Solver configuration could not be read
    #[error("cannot read solver configuration {path}: {source}")]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Solver configuration was read but could not be parsed
    #[error("malformed solver configuration {path}: {message}")]
    ConfigMalformed { path: PathBuf, message: String },

    /// A required configuration value is absent
    #[error("configuration has no value for {key}")]
    MissingConfigKey { key: String },

    /// Spectral solution file could not be opened or decoded
    #[error("cannot open spectral solution {path}: {message}")]
    SolutionUnreadable { path: PathBuf, message: String },

    /// Binary type code or name not recognised
    #[error("unknown binary type: {0}")]
    UnknownBinaryType(String),

    /// No exporter is registered for the requested binary type
    #[error("no exporter registered for binary type {0}")]
    NoExporter(BinaryType),

    /// Grid coordinate arrays differ in length
    #[error("grid coordinate lengths differ: x={x}, y={y}, z={z}")]
    GridLengthMismatch { x: usize, y: usize, z: usize },

    /// Chunk count of zero
    #[error("chunk count must be at least 1")]
    InvalidChunkCount,

    /// Exporter returned a different schema than its binary type requires
    #[error("exporter for {binary_type} returned the {got} schema, expected {expected}")]
    SchemaMismatch {
        binary_type: BinaryType,
        expected: Schema,
        got: Schema,
    },

    /// Exporter returned the wrong number of arrays for its schema
    #[error("exporter returned {got} arrays, schema has {expected}")]
    ArrayCount { expected: usize, got: usize },

    /// Exporter array length differs from the chunk size
    #[error("exporter array for {field} has {got} values, chunk has {expected} points")]
    ArrayLength {
        field: Field,
        expected: usize,
        got: usize,
    },

    /// Failure reported by the external exporter itself
    #[error("exporter for {binary_type} failed: {message}")]
    Exporter {
        binary_type: BinaryType,
        message: String,
    },

    /// A chunk failed; wraps the underlying error
    #[error("{chunk} (offset {offset}, {len} points) failed: {source}")]
    Chunk {
        chunk: ChunkIndex,
        offset: usize,
        len: usize,
        #[source]
        source: Box<ExportError>,
    },

    /// Dedicated worker pool could not be created
    #[cfg(feature = "parallel")]
    #[error("cannot build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ExportError {
    /// Innermost error, looking through chunk wrappers.
    pub fn root_cause(&self) -> &ExportError {
        match self {
            ExportError::Chunk { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
