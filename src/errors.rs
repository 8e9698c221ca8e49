//! Error types that are reported by various array operations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::dtype::DType;
use crate::layout::{Order, MAX_RANK};
use crate::scalar::Scalar;

/// Error when a dtype name does not resolve to a known tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownDTypeError {
    name: String,
}

impl UnknownDTypeError {
    pub(crate) fn new(name: impl Into<String>) -> UnknownDTypeError {
        UnknownDTypeError { name: name.into() }
    }

    /// Return the name that failed to resolve.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for UnknownDTypeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown dtype: {:?}", self.name)
    }
}

impl Error for UnknownDTypeError {}

/// Errors that can occur when building a layout from a shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FromShapeError {
    /// The shape has more dimensions than [`MAX_RANK`].
    RankTooLarge {
        /// Number of dimensions requested.
        ndim: usize,
    },

    /// The byte size spanned by the shape does not fit in `usize`.
    SizeOverflow,
}

impl Display for FromShapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FromShapeError::RankTooLarge { ndim } => {
                write!(f, "rank {} exceeds the maximum of {}", ndim, MAX_RANK)
            }
            FromShapeError::SizeOverflow => write!(f, "shape byte size overflows usize"),
        }
    }
}

impl Error for FromShapeError {}

/// Errors that can occur when constructing an array from existing values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FromDataError {
    /// The shape itself was rejected.
    Shape(FromShapeError),

    /// The number of values does not match the element count of the shape.
    LengthMismatch { expected: usize, got: usize },

    /// Two values have dtypes with no common promotion, eg. a same-width
    /// signed and unsigned integer.
    NoCommonDType { a: DType, b: DType },
}

impl Display for FromDataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FromDataError::Shape(err) => err.fmt(f),
            FromDataError::LengthMismatch { expected, got } => {
                write!(f, "shape needs {} values but {} were given", expected, got)
            }
            FromDataError::NoCommonDType { a, b } => {
                write!(f, "no automatic promotion between {} and {}", a, b)
            }
        }
    }
}

impl Error for FromDataError {}

impl From<FromShapeError> for FromDataError {
    fn from(err: FromShapeError) -> FromDataError {
        FromDataError::Shape(err)
    }
}

/// Errors addressing an element from a multi-index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexError {
    /// The index count does not match the array's rank.
    DimensionMismatch { got: usize, expected: usize },

    /// An index is past the end of its axis.
    OutOfBounds {
        axis: usize,
        index: usize,
        size: usize,
    },
}

impl Display for IndexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexError::DimensionMismatch { got, expected } => {
                write!(f, "index has {} dims but the array has {}", got, expected)
            }
            IndexError::OutOfBounds { axis, index, size } => {
                write!(
                    f,
                    "index {} is out of bounds for axis {} with size {}",
                    index, axis, size
                )
            }
        }
    }
}

impl Error for IndexError {}

/// Error when a value does not fit the range of a dtype.
#[derive(Clone, Debug, PartialEq)]
pub struct NarrowingError {
    value: Scalar,
    dtype: DType,
}

impl NarrowingError {
    pub(crate) fn new(value: Scalar, dtype: DType) -> NarrowingError {
        NarrowingError { value, dtype }
    }

    /// The rejected value.
    pub fn value(&self) -> Scalar {
        self.value
    }

    /// The dtype the value did not fit.
    pub fn dtype(&self) -> DType {
        self.dtype
    }
}

impl Display for NarrowingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "value {} is out of range for {}", self.value, self.dtype)
    }
}

impl Error for NarrowingError {}

/// Errors that can occur when storing an element.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreError {
    /// The array handle has been frozen.
    Immutable,

    /// The element address was invalid.
    Index(IndexError),

    /// The value does not fit the array's dtype.
    Narrow(NarrowingError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Immutable => write!(f, "array is frozen"),
            StoreError::Index(err) => err.fmt(f),
            StoreError::Narrow(err) => err.fmt(f),
        }
    }
}

impl Error for StoreError {}

impl From<IndexError> for StoreError {
    fn from(err: IndexError) -> StoreError {
        StoreError::Index(err)
    }
}

impl From<NarrowingError> for StoreError {
    fn from(err: NarrowingError) -> StoreError {
        StoreError::Narrow(err)
    }
}

/// Errors that can occur while reshaping an array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReshapeError {
    /// The requested order is reserved but not implemented.
    UnsupportedOrder(Order),

    /// The new shape contains a zero extent.
    InvalidShape { axis: usize, size: usize },

    /// The new shape spans a different number of bytes than the array.
    IncompatibleShape { requested: usize, actual: usize },

    /// The new shape was rejected outright.
    Shape(FromShapeError),
}

impl Display for ReshapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReshapeError::UnsupportedOrder(order) => {
                write!(f, "order {} is not implemented", order)
            }
            ReshapeError::InvalidShape { axis, size } => {
                write!(f, "axis {} has non-positive size {}", axis, size)
            }
            ReshapeError::IncompatibleShape { requested, actual } => {
                write!(
                    f,
                    "requested shape spans {} bytes but the array has {}",
                    requested, actual
                )
            }
            ReshapeError::Shape(err) => err.fmt(f),
        }
    }
}

impl Error for ReshapeError {}

impl From<FromShapeError> for ReshapeError {
    fn from(err: FromShapeError) -> ReshapeError {
        ReshapeError::Shape(err)
    }
}
