//! Partitioning of a point grid into contiguous chunks.
//!
//! With `n` points and `C` chunks every chunk gets `n / C` points and the
//! last one also takes the remainder `n % C`:
//!
//! ```text
//! n = 10, C = 3:   [0 1 2][3 4 5][6 7 8 9]
//!                   chunk0 chunk1 chunk2
//! ```
//!
//! When `C > n` the leading chunks are empty and the last chunk holds
//! every point.

use std::ops::Range;

use crate::error::ExportError;
use crate::types::ChunkIndex;

/// One contiguous range of grid points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// Position in the plan
    pub index: ChunkIndex,
    /// First point covered
    pub offset: usize,
    /// Number of points covered
    pub len: usize,
}

impl Chunk {
    /// Point range covered by this chunk.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// Check if the chunk covers no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Ordered, gap-free partition of `n_points` into chunks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkPlan {
    n_points: usize,
    chunks: Vec<Chunk>,
}

impl ChunkPlan {
    /// Partition `n_points` into `n_chunks` chunks.
    ///
    /// # Errors
    /// `InvalidChunkCount` if `n_chunks` is zero.
    pub fn new(n_points: usize, n_chunks: usize) -> Result<Self, ExportError> {
        if n_chunks == 0 {
            return Err(ExportError::InvalidChunkCount);
        }

        let base = n_points / n_chunks;
        let remainder = n_points % n_chunks;

        let mut chunks = Vec::with_capacity(n_chunks);
        let mut index = ChunkIndex::ZERO;
        for i in 0..n_chunks {
            let len = if i == n_chunks - 1 { base + remainder } else { base };
            chunks.push(Chunk {
                index,
                offset: i * base,
                len,
            });
            index = index.next();
        }

        Ok(Self { n_points, chunks })
    }

    /// Total number of points covered.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Number of chunks, including empty ones.
    #[inline]
    pub fn n_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// All chunks in offset order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunks that cover at least one point.
    pub fn non_empty(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|c| !c.is_empty())
    }

    /// Chunk sizes in order.
    pub fn sizes(&self) -> Vec<usize> {
        self.chunks.iter().map(|c| c.len).collect()
    }

    /// Chunk offsets in order.
    pub fn offsets(&self) -> Vec<usize> {
        self.chunks.iter().map(|c| c.offset).collect()
    }
}
