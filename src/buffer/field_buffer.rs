//! Per-field storage for exported values.

use crate::scheduler::ChunkPlan;
use crate::types::{Field, N_FIELDS};

/// Exported values for every field at every grid point.
///
/// Stores one contiguous array per field, with layout
/// `data[field.index() * n_points + i]` for point `i`. All 22 fields are
/// always allocated; fields outside the exporter's schema stay zero.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldBuffer {
    data: Vec<f64>,
    n_points: usize,
}

impl FieldBuffer {
    /// Allocate a buffer of `n_points` points with every field zeroed.
    ///
    /// Allocation failure aborts the process.
    pub fn zeroed(n_points: usize) -> Self {
        Self {
            data: vec![0.0; N_FIELDS * n_points],
            n_points,
        }
    }

    /// Number of points per field.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_points
    }

    /// Check if the buffer holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_points == 0
    }

    /// Values of one field.
    pub fn field(&self, field: Field) -> &[f64] {
        let start = field.index() * self.n_points;
        &self.data[start..start + self.n_points]
    }

    /// Mutable values of one field.
    pub fn field_mut(&mut self, field: Field) -> &mut [f64] {
        let start = field.index() * self.n_points;
        &mut self.data[start..start + self.n_points]
    }

    /// Iterate over `(field, values)` in storage order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &[f64])> {
        Field::ALL.iter().map(move |&f| (f, self.field(f)))
    }

    /// Copy the first `count` points of every field of `src` into this
    /// buffer starting at point `offset`.
    ///
    /// Only `[offset, offset + count)` of each field is written.
    ///
    /// # Panics
    /// If `offset + count` exceeds this buffer's length or `count` exceeds
    /// `src.len()`.
    pub fn copy_into(&mut self, src: &FieldBuffer, offset: usize, count: usize) {
        debug_assert!(
            offset + count <= self.n_points,
            "copy of {} points at offset {} overruns buffer of {}",
            count,
            offset,
            self.n_points
        );
        debug_assert!(
            count <= src.n_points,
            "copy of {} points from buffer of {}",
            count,
            src.n_points
        );

        for field in Field::ALL {
            self.field_mut(field)[offset..offset + count].copy_from_slice(&src.field(field)[..count]);
        }
    }

    /// Split the buffer into one disjoint mutable window per chunk of `plan`.
    ///
    /// Windows can be filled concurrently; together they cover the buffer
    /// exactly once.
    ///
    /// # Panics
    /// If the plan does not cover exactly this buffer's points.
    pub fn partition_mut(&mut self, plan: &ChunkPlan) -> Vec<FieldSliceMut<'_>> {
        assert_eq!(
            plan.n_points(),
            self.n_points,
            "chunk plan covers {} points, buffer has {}",
            plan.n_points(),
            self.n_points
        );

        let mut windows: Vec<FieldSliceMut<'_>> = plan
            .chunks()
            .iter()
            .map(|c| FieldSliceMut {
                offset: c.offset,
                len: c.len,
                columns: Vec::with_capacity(N_FIELDS),
            })
            .collect();

        if self.n_points == 0 {
            for window in &mut windows {
                window.columns.resize_with(N_FIELDS, Default::default);
            }
            return windows;
        }

        for column in self.data.chunks_exact_mut(self.n_points) {
            let mut rest = column;
            for window in &mut windows {
                let (head, tail) = std::mem::take(&mut rest).split_at_mut(window.len);
                window.columns.push(head);
                rest = tail;
            }
        }

        windows
    }

    /// Release the buffer's storage.
    pub fn release(self) {
        drop(self);
    }
}

/// Mutable window over a contiguous point range of a [`FieldBuffer`].
///
/// Holds one slice per field, all covering the same points.
#[derive(Debug)]
pub struct FieldSliceMut<'a> {
    offset: usize,
    len: usize,
    columns: Vec<&'a mut [f64]>,
}

impl FieldSliceMut<'_> {
    /// First point of the window in the parent buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of points in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the window covers no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mutable values of one field within the window.
    pub fn field_mut(&mut self, field: Field) -> &mut [f64] {
        &mut *self.columns[field.index()]
    }

    /// Copy the first `self.len()` points of every field of `src` into the window.
    ///
    /// # Panics
    /// If `src` holds fewer points than the window.
    pub fn copy_from(&mut self, src: &FieldBuffer) {
        debug_assert!(
            src.len() >= self.len,
            "window of {} points filled from buffer of {}",
            self.len,
            src.len()
        );

        let n = self.len;
        for (field, column) in Field::ALL.iter().zip(self.columns.iter_mut()) {
            column.copy_from_slice(&src.field(*field)[..n]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n_points: usize, value: f64) -> FieldBuffer {
        let mut buf = FieldBuffer::zeroed(n_points);
        for field in Field::ALL {
            buf.field_mut(field).fill(value);
        }
        buf
    }

    #[test]
    fn test_zeroed_allocation() {
        let buf = FieldBuffer::zeroed(5);
        assert_eq!(buf.len(), 5);
        for (_, values) in buf.fields() {
            assert_eq!(values, &[0.0; 5]);
        }
    }

    #[test]
    fn test_fields_are_independent() {
        let mut buf = FieldBuffer::zeroed(3);
        buf.field_mut(Field::GammaYz)[1] = 4.0;
        assert_eq!(buf.field(Field::GammaYz), &[0.0, 4.0, 0.0]);
        assert_eq!(buf.field(Field::GammaYy), &[0.0; 3]);
        assert_eq!(buf.field(Field::GammaZz), &[0.0; 3]);
    }

    #[test]
    fn test_copy_into_writes_only_target_range() {
        let mut dst = filled(10, -1.0);
        let src = filled(4, 7.0);
        dst.copy_into(&src, 3, 2);

        for (_, values) in dst.fields() {
            assert_eq!(
                values,
                &[-1.0, -1.0, -1.0, 7.0, 7.0, -1.0, -1.0, -1.0, -1.0, -1.0]
            );
        }
    }

    #[test]
    fn test_copy_into_zero_count() {
        let mut dst = filled(4, 1.0);
        let src = FieldBuffer::zeroed(0);
        dst.copy_into(&src, 4, 0);
        assert_eq!(dst, filled(4, 1.0));
    }

    #[test]
    #[should_panic]
    fn test_copy_into_overrun_panics() {
        let mut dst = FieldBuffer::zeroed(4);
        let src = FieldBuffer::zeroed(4);
        dst.copy_into(&src, 2, 4);
    }

    #[test]
    fn test_partition_windows_cover_buffer() {
        let plan = ChunkPlan::new(10, 3).unwrap();
        let mut buf = FieldBuffer::zeroed(10);

        {
            let mut windows = buf.partition_mut(&plan);
            assert_eq!(windows.len(), 3);
            for (k, window) in windows.iter_mut().enumerate() {
                window.copy_from(&filled(window.len(), (k + 1) as f64));
            }
        }

        let expected = [1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0];
        for (_, values) in buf.fields() {
            assert_eq!(values, &expected);
        }
    }

    #[test]
    fn test_partition_with_empty_chunks() {
        let plan = ChunkPlan::new(2, 4).unwrap();
        let mut buf = FieldBuffer::zeroed(2);
        let windows = buf.partition_mut(&plan);
        let lens: Vec<_> = windows.iter().map(|w| w.len()).collect();
        assert_eq!(lens, vec![0, 0, 0, 2]);
        assert_eq!(windows[3].offset(), 0);
    }

    #[test]
    fn test_partition_empty_buffer() {
        let plan = ChunkPlan::new(0, 3).unwrap();
        let mut buf = FieldBuffer::zeroed(0);
        let mut windows = buf.partition_mut(&plan);
        assert_eq!(windows.len(), 3);
        assert!(windows.iter().all(|w| w.is_empty()));
        assert!(windows[0].field_mut(Field::VelZ).is_empty());
    }

    #[test]
    fn test_window_field_mut() {
        let plan = ChunkPlan::new(6, 2).unwrap();
        let mut buf = FieldBuffer::zeroed(6);
        {
            let mut windows = buf.partition_mut(&plan);
            windows[1].field_mut(Field::Rho).fill(2.5);
        }
        assert_eq!(buf.field(Field::Rho), &[0.0, 0.0, 0.0, 2.5, 2.5, 2.5]);
        assert_eq!(buf.field(Field::Epsilon), &[0.0; 6]);
    }

    #[test]
    #[should_panic(expected = "chunk plan covers")]
    fn test_partition_plan_mismatch_panics() {
        let plan = ChunkPlan::new(5, 2).unwrap();
        let mut buf = FieldBuffer::zeroed(6);
        let _ = buf.partition_mut(&plan);
    }
}
