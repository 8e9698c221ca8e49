//! ndview provides a small N-dimensional array whose element type is
//! chosen at runtime and whose storage can be viewed under several shapes
//! at once without copying.
//!
//! ## Key types
//!
//! The main type is [`NdArray`], a handle combining three pieces:
//!
//! - A reference-counted byte [`Storage`], shared by every view of the
//!   same allocation and freed when the last handle is dropped.
//! - A [`Layout`] mapping multi-dimensional indices to byte offsets.
//!   Every layout is contiguous row-major.
//! - A [`DType`] tag naming one of the ten supported element types,
//!   `"int8"` through `"float64"`. Tags can be resolved from their names
//!   with `str::parse`.
//!
//! Elements move in and out as [`Scalar`] values. A read widens the cell
//! to a 64-bit carrier; a write narrows with a range check and fails
//! rather than wrapping. Scalars of different carriers compare
//! numerically, so an `int32` array can equal a `float64` one.
//!
//! ## Views
//!
//! [`NdArray::reshape`] reinterprets the same bytes under a new shape of
//! equal byte size. No data is copied: a write through any handle is
//! visible through all of them. Handles are reference counted rather than
//! borrow checked, and are confined to a single thread.
//!
//! ```
//! use ndview::{DType, NdArray, Scalar};
//!
//! // A 2 x 3 array of 32-bit integers, zero filled.
//! let mut a = NdArray::zeros(&[2, 3], DType::Int32)?;
//! a.set(&[0, 2], 7)?;
//!
//! // A view of the same storage under another shape.
//! let flat = a.reshape(&[6])?;
//! assert_eq!(flat.get(&[2])?, Scalar::Int(7));
//!
//! // Equality is structural: shape and values, not dtype.
//! let b = NdArray::from_slice(&[0.0f64, 0.0, 7.0, 0.0, 0.0, 0.0]);
//! assert_eq!(flat, b);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod array;
mod dtype;
pub mod errors;
mod index_iterator;
mod layout;
mod scalar;
mod storage;

pub use array::{Iter, NdArray};
pub use dtype::{DType, Element};
pub use index_iterator::{DynIndex, Indices};
pub use layout::{Layout, Order, MAX_RANK};
pub use scalar::Scalar;
pub use storage::Storage;
