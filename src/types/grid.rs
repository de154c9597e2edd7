//! Cartesian evaluation grids.
//!
//! A grid is an unstructured list of points stored as three parallel
//! coordinate arrays. [`Grid`] owns them; [`GridView`] borrows a contiguous
//! range, which is what each chunk hands to its exporter.

use crate::error::ExportError;

/// Owned evaluation grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl Grid {
    /// Create a grid from coordinate arrays.
    ///
    /// # Errors
    /// `GridLengthMismatch` if the arrays differ in length.
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self, ExportError> {
        check_lengths(x.len(), y.len(), z.len())?;
        Ok(Self { x, y, z })
    }

    /// Create a grid from a list of points.
    pub fn from_points(points: &[[f64; 3]]) -> Self {
        let mut grid = Self {
            x: Vec::with_capacity(points.len()),
            y: Vec::with_capacity(points.len()),
            z: Vec::with_capacity(points.len()),
        };
        for p in points {
            grid.x.push(p[0]);
            grid.y.push(p[1]);
            grid.z.push(p[2]);
        }
        grid
    }

    /// Evenly spaced points along the x axis from `x_min` to `x_max` inclusive,
    /// with y = z = 0.
    pub fn line_x(x_min: f64, x_max: f64, n_points: usize) -> Self {
        let x: Vec<f64> = match n_points {
            0 => Vec::new(),
            1 => vec![x_min],
            n => {
                let dx = (x_max - x_min) / (n - 1) as f64;
                (0..n).map(|i| x_min + i as f64 * dx).collect()
            }
        };
        Self {
            y: vec![0.0; x.len()],
            z: vec![0.0; x.len()],
            x,
        }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the grid has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// x coordinates.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// y coordinates.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// z coordinates.
    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Borrow the whole grid.
    pub fn view(&self) -> GridView<'_> {
        GridView {
            x: &self.x,
            y: &self.y,
            z: &self.z,
        }
    }
}

/// Borrowed, contiguous range of grid points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridView<'a> {
    x: &'a [f64],
    y: &'a [f64],
    z: &'a [f64],
}

impl<'a> GridView<'a> {
    /// Borrow coordinate slices as a grid.
    ///
    /// # Errors
    /// `GridLengthMismatch` if the slices differ in length.
    pub fn new(x: &'a [f64], y: &'a [f64], z: &'a [f64]) -> Result<Self, ExportError> {
        check_lengths(x.len(), y.len(), z.len())?;
        Ok(Self { x, y, z })
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the view has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// x coordinates.
    pub fn x(&self) -> &'a [f64] {
        self.x
    }

    /// y coordinates.
    pub fn y(&self) -> &'a [f64] {
        self.y
    }

    /// z coordinates.
    pub fn z(&self) -> &'a [f64] {
        self.z
    }

    /// Sub-view of `len` points starting at `offset`.
    ///
    /// # Panics
    /// If `offset + len` exceeds the view length.
    pub fn slice(&self, offset: usize, len: usize) -> GridView<'a> {
        let range = offset..offset + len;
        GridView {
            x: &self.x[range.clone()],
            y: &self.y[range.clone()],
            z: &self.z[range],
        }
    }

    /// Iterate over points as `[x, y, z]`.
    pub fn points(self) -> impl Iterator<Item = [f64; 3]> + 'a {
        let (x, y, z) = (self.x, self.y, self.z);
        (0..x.len()).map(move |i| [x[i], y[i], z[i]])
    }
}

fn check_lengths(x: usize, y: usize, z: usize) -> Result<(), ExportError> {
    if x != y || x != z {
        return Err(ExportError::GridLengthMismatch { x, y, z });
    }
    Ok(())
}
