//! Per-chunk interpolation through the external exporters.
//!
//! Each binary type has one exporter. An exporter evaluates the spectral
//! solution at the points of a [`GridView`] and returns one array per field
//! of its [`Schema`]. The adapter checks the returned shape and copies the
//! arrays into a [`FieldBuffer`] sized to the chunk:
//!
//! - BH-BH: 16 vacuum arrays, hydrodynamic fields left at zero
//! - NS-NS and BH-NS: 22 matter arrays, every field filled
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use fuka_export::adapter::{ExportedValues, ExporterSet, interpolate_chunk};
//! use fuka_export::types::{BinaryType, Field, Grid, GridView, Schema};
//! use fuka_export::{InterpolationParams, InterpolationRequest, Result};
//!
//! let exporters = ExporterSet::new().with(
//!     BinaryType::Bbh,
//!     |grid: GridView<'_>, _: &Path, _: &InterpolationParams| -> Result<ExportedValues> {
//!         Ok(ExportedValues::filled(Schema::Vacuum, grid.len(), 1.0))
//!     },
//! );
//!
//! let grid = Grid::line_x(0.0, 1.0, 4);
//! let request = InterpolationRequest::new(grid.view(), BinaryType::Bbh, "bbh.info");
//! let fields = interpolate_chunk(&exporters, &request).unwrap();
//! assert_eq!(fields.field(Field::Alpha), &[1.0; 4]);
//! assert_eq!(fields.field(Field::Rho), &[0.0; 4]);
//! ```

use std::fmt;
use std::path::Path;

use tracing::error;

use crate::buffer::FieldBuffer;
use crate::error::{ExportError, Result};
use crate::request::{InterpolationParams, InterpolationRequest};
use crate::types::{BinaryType, Field, GridView, Schema};

/// Raw per-field arrays returned by an exporter.
///
/// Arrays are in [`Schema::fields`] order.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportedValues {
    schema: Schema,
    arrays: Vec<Vec<f64>>,
}

impl ExportedValues {
    /// Wrap exporter output for `schema`.
    pub fn new(schema: Schema, arrays: Vec<Vec<f64>>) -> Self {
        Self { schema, arrays }
    }

    /// Every field of `schema` set to `value` at `n_points` points.
    pub fn filled(schema: Schema, n_points: usize, value: f64) -> Self {
        Self {
            schema,
            arrays: vec![vec![value; n_points]; schema.len()],
        }
    }

    /// Schema the arrays belong to.
    #[inline]
    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Arrays in schema order.
    pub fn arrays(&self) -> &[Vec<f64>] {
        &self.arrays
    }

    /// Values of one field, if present.
    pub fn get(&self, field: Field) -> Option<&[f64]> {
        self.schema
            .fields()
            .iter()
            .position(|&f| f == field)
            .and_then(|i| self.arrays.get(i))
            .map(Vec::as_slice)
    }

    /// Mutable values of one field, if present.
    pub fn get_mut(&mut self, field: Field) -> Option<&mut Vec<f64>> {
        let i = self.schema.fields().iter().position(|&f| f == field)?;
        self.arrays.get_mut(i)
    }
}

/// Field reconstruction for one binary type.
///
/// Implementations are called concurrently from several chunk tasks, each
/// with its own grid range, and must set up any solver state they need per
/// call.
pub trait SchemaExporter: Send + Sync {
    /// Evaluate every field of the exporter's schema at the points of `grid`.
    fn export(
        &self,
        grid: GridView<'_>,
        config_path: &Path,
        params: &InterpolationParams,
    ) -> Result<ExportedValues>;
}

impl<F> SchemaExporter for F
where
    F: Fn(GridView<'_>, &Path, &InterpolationParams) -> Result<ExportedValues> + Send + Sync,
{
    fn export(
        &self,
        grid: GridView<'_>,
        config_path: &Path,
        params: &InterpolationParams,
    ) -> Result<ExportedValues> {
        self(grid, config_path, params)
    }
}

/// Exporters registered per binary type.
#[derive(Default)]
pub struct ExporterSet {
    slots: [Option<Box<dyn SchemaExporter>>; 3],
}

impl ExporterSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `exporter` for `binary_type`, replacing any previous one.
    pub fn with(mut self, binary_type: BinaryType, exporter: impl SchemaExporter + 'static) -> Self {
        self.register(binary_type, exporter);
        self
    }

    /// Register `exporter` for `binary_type`, replacing any previous one.
    pub fn register(&mut self, binary_type: BinaryType, exporter: impl SchemaExporter + 'static) {
        self.slots[binary_type.slot()] = Some(Box::new(exporter));
    }

    /// Exporter for `binary_type`, if registered.
    pub fn get(&self, binary_type: BinaryType) -> Option<&dyn SchemaExporter> {
        self.slots[binary_type.slot()].as_deref()
    }

    /// Exporter for `binary_type`, logging and returning `NoExporter` if absent.
    pub fn require(&self, binary_type: BinaryType) -> Result<&dyn SchemaExporter> {
        self.get(binary_type).ok_or_else(|| {
            error!(%binary_type, "no exporter registered for binary type");
            ExportError::NoExporter(binary_type)
        })
    }

    /// Binary types with a registered exporter.
    pub fn registered(&self) -> impl Iterator<Item = BinaryType> + '_ {
        BinaryType::ALL
            .into_iter()
            .filter(move |bt| self.slots[bt.slot()].is_some())
    }
}

impl fmt::Debug for ExporterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.registered()).finish()
    }
}

/// Interpolate the request's grid with the exporter for its binary type.
///
/// Returns a buffer of `request.grid().len()` points. No exporter is called
/// when none is registered for the binary type.
pub fn interpolate_chunk(exporters: &ExporterSet, request: &InterpolationRequest<'_>) -> Result<FieldBuffer> {
    let exporter = exporters.require(request.binary_type())?;
    export_with(exporter, request)
}

/// Run `exporter` on the request's grid and copy its arrays into a new buffer.
pub(crate) fn export_with(exporter: &dyn SchemaExporter, request: &InterpolationRequest<'_>) -> Result<FieldBuffer> {
    let grid = request.grid();
    let values = exporter.export(grid, request.config_path(), request.params())?;
    fill_buffer(request.binary_type(), values, grid.len())
}

/// Copy exporter arrays into a zeroed buffer, checking their shape.
fn fill_buffer(binary_type: BinaryType, values: ExportedValues, n_points: usize) -> Result<FieldBuffer> {
    let schema = binary_type.schema();
    if values.schema() != schema {
        return Err(ExportError::SchemaMismatch {
            binary_type,
            expected: schema,
            got: values.schema(),
        });
    }
    if values.arrays().len() != schema.len() {
        return Err(ExportError::ArrayCount {
            expected: schema.len(),
            got: values.arrays().len(),
        });
    }

    let mut fields = FieldBuffer::zeroed(n_points);
    for (&field, array) in schema.fields().iter().zip(values.arrays()) {
        if array.len() != n_points {
            return Err(ExportError::ArrayLength {
                field,
                expected: n_points,
                got: array.len(),
            });
        }
        fields.field_mut(field).copy_from_slice(array);
    }

    Ok(fields)
}
