//! Fork-join interpolation over grid chunks.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, info, warn};

use crate::adapter::{ExporterSet, SchemaExporter, export_with};
use crate::buffer::{FieldBuffer, FieldSliceMut};
use crate::error::{ExportError, Result};
use crate::request::InterpolationRequest;
use crate::scheduler::{Chunk, ChunkPlan};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How a request is split and where the chunks run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Number of chunks; defaults to the worker count
    pub n_chunks: Option<usize>,
    /// Size of a dedicated worker pool; defaults to the global rayon pool
    pub threads: Option<usize>,
}

impl SchedulerConfig {
    /// Configuration using the global pool and one chunk per worker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of chunks.
    pub fn with_chunks(mut self, n_chunks: usize) -> Self {
        self.n_chunks = Some(n_chunks);
        self
    }

    /// Run chunks on a dedicated pool of `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Chunk count this configuration resolves to.
    pub fn chunk_count(&self) -> usize {
        self.n_chunks
            .or(self.threads)
            .unwrap_or_else(default_parallelism)
    }
}

#[cfg(feature = "parallel")]
fn default_parallelism() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Interpolate every point of the request's grid.
///
/// The grid is split per [`ChunkPlan`]; each non-empty chunk is exported
/// independently and written into its own window of the result. The
/// result is returned once every chunk has finished. Chunk failures are
/// reported for the first failing chunk in grid order.
///
/// An empty grid yields an empty buffer without calling the exporter. A
/// binary type with no registered exporter fails before any buffer is
/// allocated.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use fuka_export::adapter::{ExportedValues, ExporterSet};
/// use fuka_export::types::{BinaryType, Field, Grid, GridView, Schema};
/// use fuka_export::{InterpolationParams, InterpolationRequest, Result, SchedulerConfig, interpolate};
///
/// let exporters = ExporterSet::new().with(
///     BinaryType::Bns,
///     |grid: GridView<'_>, _: &Path, _: &InterpolationParams| -> Result<ExportedValues> {
///         Ok(ExportedValues::filled(Schema::Matter, grid.len(), 1.0))
///     },
/// );
///
/// let grid = Grid::line_x(-20.0, 20.0, 100);
/// let request = InterpolationRequest::new(grid.view(), BinaryType::Bns, "bns.info");
/// let fields = interpolate(&exporters, &request, &SchedulerConfig::new().with_chunks(4)).unwrap();
/// assert_eq!(fields.field(Field::Pressure).len(), 100);
/// ```
pub fn interpolate(
    exporters: &ExporterSet,
    request: &InterpolationRequest<'_>,
    config: &SchedulerConfig,
) -> Result<FieldBuffer> {
    let binary_type = request.binary_type();
    let exporter = exporters.require(binary_type)?;

    let n_points = request.grid().len();
    if n_points == 0 {
        debug!(%binary_type, "empty grid, nothing to interpolate");
        return Ok(FieldBuffer::zeroed(0));
    }

    let plan = ChunkPlan::new(n_points, config.chunk_count())?;
    let skipped = plan.n_chunks() - plan.non_empty().count();
    if skipped > 0 {
        warn!(skipped, n_points, n_chunks = plan.n_chunks(), "more chunks than points, skipping empty chunks");
    }
    info!(
        %binary_type,
        n_points,
        n_chunks = plan.n_chunks(),
        config = %request.config_path().display(),
        "interpolating initial data"
    );

    let mut fields = FieldBuffer::zeroed(n_points);
    let work: Vec<(Chunk, FieldSliceMut<'_>)> = plan
        .chunks()
        .iter()
        .copied()
        .zip(fields.partition_mut(&plan))
        .filter(|(chunk, _)| !chunk.is_empty())
        .collect();

    let progress = Progress::new(work.len());
    let task = |(chunk, mut window): (Chunk, FieldSliceMut<'_>)| -> Result<()> {
        run_chunk(exporter, request, &chunk, &mut window, &progress)
    };

    dispatch(config, work, task)?;

    info!(%binary_type, n_points, "interpolation complete");
    Ok(fields)
}

/// Export one chunk and write it into its window of the result.
fn run_chunk(
    exporter: &dyn SchemaExporter,
    request: &InterpolationRequest<'_>,
    chunk: &Chunk,
    window: &mut FieldSliceMut<'_>,
    progress: &Progress,
) -> Result<()> {
    debug!(chunk = %chunk.index, size = chunk.len, offset = chunk.offset, "chunk started");

    let chunk_fields = export_with(exporter, &request.for_chunk(chunk)).map_err(|source| ExportError::Chunk {
        chunk: chunk.index,
        offset: chunk.offset,
        len: chunk.len,
        source: Box::new(source),
    })?;
    window.copy_from(&chunk_fields);
    chunk_fields.release();

    let done = progress.finish_one();
    debug!(chunk = %chunk.index, done, total = progress.total, "chunk merged");
    Ok(())
}

/// Run every task, returning the first error in task order.
#[cfg(feature = "parallel")]
fn dispatch<T, F>(config: &SchedulerConfig, work: Vec<T>, task: F) -> Result<()>
where
    T: Send,
    F: Fn(T) -> Result<()> + Sync + Send,
{
    let run = move || -> Result<()> {
        let outcomes: Vec<Result<()>> = work.into_par_iter().map(&task).collect();
        outcomes.into_iter().collect()
    };

    match config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
            pool.install(run)
        }
        None => run(),
    }
}

/// Run every task in order, returning the first error.
#[cfg(not(feature = "parallel"))]
fn dispatch<T, F>(_config: &SchedulerConfig, work: Vec<T>, task: F) -> Result<()>
where
    F: Fn(T) -> Result<()>,
{
    let outcomes: Vec<Result<()>> = work.into_iter().map(task).collect();
    outcomes.into_iter().collect()
}

/// Completed-chunk counter shared by the chunk tasks.
struct Progress {
    completed: AtomicUsize,
    total: usize,
}

impl Progress {
    fn new(total: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
        }
    }

    /// Record a finished chunk and return the running count.
    fn finish_one(&self) -> usize {
        self.completed.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::ExportedValues;
    use crate::request::InterpolationParams;
    use crate::types::{BinaryType, Field, Grid, GridView, Schema};
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    /// Exporter filling each chunk with the chunk's first x coordinate.
    fn first_x_exporter() -> impl SchemaExporter {
        |grid: GridView<'_>, _: &Path, _: &InterpolationParams| -> Result<ExportedValues> {
            let value = grid.x()[0];
            Ok(ExportedValues::filled(Schema::Matter, grid.len(), value))
        }
    }

    #[test]
    fn test_chunk_count_resolution() {
        assert_eq!(SchedulerConfig::new().with_chunks(5).chunk_count(), 5);
        assert_eq!(SchedulerConfig::new().with_threads(3).chunk_count(), 3);
        assert_eq!(
            SchedulerConfig::new().with_threads(3).with_chunks(7).chunk_count(),
            7
        );
        assert!(SchedulerConfig::new().chunk_count() >= 1);
    }

    #[test]
    fn test_every_chunk_is_processed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let exporters = ExporterSet::new().with(
            BinaryType::Bhns,
            move |grid: GridView<'_>, _: &Path, _: &InterpolationParams| -> Result<ExportedValues> {
                recorder.lock().unwrap().push((grid.x()[0], grid.len()));
                Ok(ExportedValues::filled(Schema::Matter, grid.len(), 1.0))
            },
        );

        let grid = Grid::line_x(0.0, 9.0, 10);
        let request = InterpolationRequest::new(grid.view(), BinaryType::Bhns, "bhns.info");
        let fields = interpolate(&exporters, &request, &SchedulerConfig::new().with_chunks(4)).unwrap();

        let mut calls = seen.lock().unwrap().clone();
        calls.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        assert_eq!(calls, vec![(0.0, 2), (2.0, 2), (4.0, 2), (6.0, 4)]);
        assert!(fields.field(Field::VelY).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_chunks_land_at_their_offsets() {
        let exporters = ExporterSet::new().with(BinaryType::Bns, first_x_exporter());
        let grid = Grid::line_x(0.0, 9.0, 10);
        let request = InterpolationRequest::new(grid.view(), BinaryType::Bns, "bns.info");

        let fields = interpolate(&exporters, &request, &SchedulerConfig::new().with_chunks(3)).unwrap();
        let expected = [0.0, 0.0, 0.0, 3.0, 3.0, 3.0, 6.0, 6.0, 6.0, 6.0];
        for (_, values) in fields.fields() {
            assert_eq!(values, &expected);
        }
    }

    #[test]
    fn test_empty_chunks_are_not_dispatched() {
        let exporters = ExporterSet::new().with(
            BinaryType::Bns,
            |grid: GridView<'_>, _: &Path, _: &InterpolationParams| -> Result<ExportedValues> {
                assert!(!grid.is_empty(), "exporter called with an empty chunk");
                Ok(ExportedValues::filled(Schema::Matter, grid.len(), 2.0))
            },
        );
        let grid = Grid::line_x(0.0, 1.0, 3);
        let request = InterpolationRequest::new(grid.view(), BinaryType::Bns, "bns.info");

        let fields = interpolate(&exporters, &request, &SchedulerConfig::new().with_chunks(8)).unwrap();
        assert_eq!(fields.field(Field::Alpha), &[2.0; 3]);
    }

    #[test]
    fn test_first_failing_chunk_reported() {
        let exporters = ExporterSet::new().with(
            BinaryType::Bbh,
            |grid: GridView<'_>, _: &Path, _: &InterpolationParams| -> Result<ExportedValues> {
                if grid.x()[0] >= 4.0 {
                    return Err(ExportError::Exporter {
                        binary_type: BinaryType::Bbh,
                        message: "point inside excision".into(),
                    });
                }
                Ok(ExportedValues::filled(Schema::Vacuum, grid.len(), 0.5))
            },
        );
        let grid = Grid::line_x(0.0, 9.0, 10);
        let request = InterpolationRequest::new(grid.view(), BinaryType::Bbh, "bbh.info");

        let err = interpolate(&exporters, &request, &SchedulerConfig::new().with_chunks(5)).unwrap_err();
        match err {
            ExportError::Chunk { chunk, offset, .. } => {
                assert_eq!(chunk.get(), 2);
                assert_eq!(offset, 4);
            }
            other => panic!("expected chunk error, got {other}"),
        }
    }

    #[test]
    fn test_zero_chunks_rejected() {
        let exporters = ExporterSet::new().with(BinaryType::Bns, first_x_exporter());
        let grid = Grid::line_x(0.0, 1.0, 4);
        let request = InterpolationRequest::new(grid.view(), BinaryType::Bns, "bns.info");
        assert!(matches!(
            interpolate(&exporters, &request, &SchedulerConfig::new().with_chunks(0)),
            Err(ExportError::InvalidChunkCount)
        ));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_dedicated_pool() {
        let exporters = ExporterSet::new().with(BinaryType::Bns, first_x_exporter());
        let grid = Grid::line_x(0.0, 99.0, 100);
        let request = InterpolationRequest::new(grid.view(), BinaryType::Bns, "bns.info");

        let config = SchedulerConfig::new().with_threads(2);
        let fields = interpolate(&exporters, &request, &config).unwrap();
        assert_eq!(fields.field(Field::Alpha)[0], 0.0);
        assert_eq!(fields.field(Field::Alpha)[99], 50.0);
    }

    #[test]
    fn test_progress_counter() {
        let progress = Progress::new(3);
        assert_eq!(progress.finish_one(), 1);
        assert_eq!(progress.finish_one(), 2);
        assert_eq!(progress.total, 3);
    }
}
