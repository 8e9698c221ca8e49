//! Mapping between multi-dimensional indices and byte offsets.

use std::fmt::{Display, Formatter};

use smallvec::SmallVec;

use crate::errors::{FromShapeError, IndexError};
use crate::index_iterator::Indices;

/// Maximum number of dimensions an array can have.
///
/// Shapes with more dimensions are rejected at construction rather than
/// silently truncated.
pub const MAX_RANK: usize = 32;

/// Memory order used when laying out a shape.
///
/// Only [`RowMajor`](Order::RowMajor) is implemented. The other orders are
/// reserved and rejected by
/// [`reshape_with_order`](crate::NdArray::reshape_with_order).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Order {
    /// C order: the last dimension varies fastest.
    #[default]
    RowMajor,
    /// Fortran order: the first dimension varies fastest.
    ColumnMajor,
    /// Whichever order the source array already has.
    Auto,
}

impl Order {
    /// Return the conventional name of this order, eg. "row_major".
    pub const fn name(self) -> &'static str {
        match self {
            Order::RowMajor => "row_major",
            Order::ColumnMajor => "column_major",
            Order::Auto => "auto",
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Defines the valid indices of an array and how they map to byte offsets
/// in its storage.
///
/// A layout holds the size of each dimension and the byte stride between
/// consecutive indices along that dimension. Every layout this crate
/// constructs is contiguous row-major: the innermost stride is the element
/// width and each outer stride spans the whole extent of the dimensions
/// inside it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    /// Sizes of each dimension, followed by the byte stride of each
    /// dimension. The lengths always match, so both fit one buffer with a
    /// single stored length.
    shape_and_strides: SmallVec<[usize; 8]>,
}

impl Layout {
    /// Construct a row-major layout for a shape of elements `item_size`
    /// bytes wide.
    ///
    /// Fails if the shape has more than [`MAX_RANK`] dimensions or if the
    /// total byte size overflows `usize`.
    pub fn from_shape(shape: &[usize], item_size: usize) -> Result<Layout, FromShapeError> {
        let ndim = shape.len();
        if ndim > MAX_RANK {
            return Err(FromShapeError::RankTooLarge { ndim });
        }

        let mut shape_and_strides = SmallVec::with_capacity(ndim * 2);
        shape_and_strides.extend_from_slice(shape);
        shape_and_strides.extend(std::iter::repeat(0).take(ndim));

        // The innermost dimension steps one element at a time and each
        // outer stride spans the extent of everything inside it. The final
        // product is the full byte size, so the checked multiply also
        // rejects shapes too large to address.
        let mut stride = item_size;
        for dim in (0..ndim).rev() {
            shape_and_strides[ndim + dim] = stride;
            stride = stride
                .checked_mul(shape[dim])
                .ok_or(FromShapeError::SizeOverflow)?;
        }

        Ok(Layout { shape_and_strides })
    }

    /// Return the number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape_and_strides.len() / 2
    }

    /// Return the number of elements: the product of the dimension sizes.
    ///
    /// A rank-0 layout holds one element, the empty product.
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    /// Return true if the layout addresses no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the sizes of each dimension.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape_and_strides[..self.ndim()]
    }

    /// Return the size of dimension `dim`.
    ///
    /// Panics if `dim` is out of range.
    #[inline]
    pub fn size(&self, dim: usize) -> usize {
        self.shape_and_strides[dim]
    }

    /// Return the byte strides of each dimension.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.shape_and_strides[self.ndim()..]
    }

    /// Return the byte stride of dimension `dim`.
    ///
    /// Panics if `dim` is out of range.
    #[inline]
    pub fn stride(&self, dim: usize) -> usize {
        self.shape_and_strides[self.ndim() + dim]
    }

    /// Map an index to a byte offset, checking it against the shape.
    pub fn offset(&self, index: &[usize]) -> Result<usize, IndexError> {
        if index.len() != self.ndim() {
            return Err(IndexError::DimensionMismatch {
                got: index.len(),
                expected: self.ndim(),
            });
        }
        let shape = self.shape();
        let strides = self.strides();
        let mut offset = 0;
        for axis in 0..index.len() {
            if index[axis] >= shape[axis] {
                return Err(IndexError::OutOfBounds {
                    axis,
                    index: index[axis],
                    size: shape[axis],
                });
            }
            offset += index[axis] * strides[axis];
        }
        Ok(offset)
    }

    /// Map an index to a byte offset without checking it against the shape.
    ///
    /// This is not itself unsafe because the offset is only computed, not
    /// used to access storage. Callers pass indices produced by
    /// [`indices`](Layout::indices), which are valid by construction.
    pub fn offset_unchecked(&self, index: &[usize]) -> usize {
        let strides = self.strides();
        let mut offset = 0;
        for axis in 0..index.len() {
            offset += index[axis] * strides[axis];
        }
        offset
    }

    /// Return an iterator over all valid indices, in row-major order.
    pub fn indices(&self) -> Indices {
        Indices::from_shape(self.shape())
    }
}
