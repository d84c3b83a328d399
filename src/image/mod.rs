//! Dense numeric matrices and image preprocessing.
//!
//! `Matrix` is an owned, row-major grid of `f32` values. It holds grayscale
//! intensities or Sobel edge magnitudes and is never mutated once handed to a
//! matcher. Zero-sized matrices are valid and represent degenerate inputs.

use crate::util::{TriFindError, TriFindResult};

#[cfg(feature = "image-io")]
pub mod io;
pub mod preprocess;

/// Owned row-major 2D grid of `f32` values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl Matrix {
    /// Creates a matrix from a row-major buffer of exactly `width * height` values.
    ///
    /// A zero width or height is accepted only together with an empty buffer.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> TriFindResult<Self> {
        let needed = width
            .checked_mul(height)
            .ok_or(TriFindError::InvalidDimensions { width, height })?;
        if data.len() != needed {
            return Err(TriFindError::BufferSizeMismatch {
                needed,
                got: data.len(),
            });
        }
        if needed == 0 {
            return Ok(Self::empty());
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a matrix from nested rows, rejecting ragged input.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> TriFindResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(width * height);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(TriFindError::RaggedRows {
                    row: idx,
                    expected: width,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::new(data, width, height)
    }

    /// Creates a zero-filled matrix.
    pub fn zeros(width: usize, height: usize) -> Self {
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self {
            data: vec![0.0; width * height],
            width,
            height,
        }
    }

    /// Returns the 0x0 matrix.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` when the matrix holds no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the backing row-major slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns row `y`, or `None` if it is out of bounds.
    pub fn row(&self, y: usize) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Returns the value at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::Matrix;
    use crate::util::TriFindError;

    #[test]
    fn new_rejects_mismatched_buffer() {
        let err = Matrix::new(vec![0.0; 5], 2, 3).unwrap_err();
        assert_eq!(err, TriFindError::BufferSizeMismatch { needed: 6, got: 5 });
    }

    #[test]
    fn zero_sized_matrix_is_empty() {
        let m = Matrix::new(Vec::new(), 0, 7).unwrap();
        assert!(m.is_empty());
        assert_eq!((m.width(), m.height()), (0, 0));
        assert!(Matrix::zeros(3, 0).is_empty());
    }

    #[test]
    fn rows_and_cells_are_row_major() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.row(1).unwrap(), &[4.0, 5.0, 6.0]);
        assert_eq!(m.get(2, 0), Some(3.0));
        assert_eq!(m.get(3, 0), None);
        assert!(m.row(2).is_none());
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            TriFindError::RaggedRows {
                row: 1,
                expected: 2,
                got: 1,
            }
        );
    }
}
