//! The [`NdArray`] type and its operations.

use std::fmt;
use std::rc::Rc;

use crate::dtype::{DType, Element};
use crate::errors::{FromDataError, FromShapeError, IndexError, ReshapeError, StoreError};
use crate::layout::{Layout, Order};
use crate::scalar::{decode, encode, Scalar};
use crate::storage::Storage;

/// An N-dimensional array of elements of one of the [`DType`] types,
/// stored contiguously in row-major order.
///
/// An array is a handle onto a byte buffer: [`reshape`](NdArray::reshape)
/// returns a second handle onto the same buffer under a different shape,
/// without copying. Writes through any handle are visible through all of
/// them, and the buffer lives until the last handle is dropped. Handles are
/// confined to one thread.
///
/// Elements are read and written as generic [`Scalar`] values. Reads widen
/// to the dtype's carrier; writes narrow with a range check and fail rather
/// than wrap.
///
/// ```
/// use ndview::{DType, NdArray, Scalar};
///
/// let mut array = NdArray::zeros(&[2, 3], DType::Int32)?;
/// array.set(&[0, 1], 7)?;
///
/// let flat = array.reshape(&[6])?;
/// assert_eq!(flat.get(&[1])?, Scalar::Int(7));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct NdArray {
    storage: Rc<Storage>,
    layout: Layout,
    dtype: DType,
    frozen: bool,
}

impl NdArray {
    /// Allocate a zero-filled array of the given shape and dtype.
    ///
    /// A dimension may have size zero, giving an array with no elements,
    /// and the shape may be empty, giving a rank-0 array with one element.
    pub fn zeros(shape: &[usize], dtype: DType) -> Result<NdArray, FromShapeError> {
        let layout = Layout::from_shape(shape, dtype.size())?;
        Ok(NdArray::alloc(layout, dtype))
    }

    /// Build an array of `T::DTYPE` elements from values in row-major
    /// order.
    pub fn from_data<T: Element>(shape: &[usize], data: &[T]) -> Result<NdArray, FromDataError> {
        let layout = Layout::from_shape(shape, T::DTYPE.size())?;
        if data.len() != layout.len() {
            return Err(FromDataError::LengthMismatch {
                expected: layout.len(),
                got: data.len(),
            });
        }
        let array = NdArray::alloc(layout, T::DTYPE);
        for (i, value) in data.iter().enumerate() {
            // Encoding a value into its own dtype cannot fail.
            encode(
                &array.storage,
                i * array.item_size(),
                array.dtype,
                value.to_scalar(),
            )
            .expect("value fits its own dtype");
        }
        Ok(array)
    }

    /// Build a 1-D array from a slice.
    pub fn from_slice<T: Element>(data: &[T]) -> NdArray {
        NdArray::from_data(&[data.len()], data).expect("1-D layout of a slice is always valid")
    }

    /// Build an array from generic values, inferring the dtype.
    ///
    /// Each value contributes its natural dtype (`int64`, `uint64` or
    /// `float64`) and the dtypes are folded with
    /// [`DType::promote`](crate::DType::promote). Any float value makes the
    /// array `float64`. Mixing the `Int` and `UInt` variants always fails,
    /// whatever the values, because `int64` and `uint64` have no common
    /// promotion. An empty input defaults to `float64`.
    pub fn from_scalars(shape: &[usize], values: &[Scalar]) -> Result<NdArray, FromDataError> {
        let mut dtype: Option<DType> = None;
        for value in values {
            dtype = Some(match dtype {
                None => value.dtype(),
                Some(current) => current.promote(value.dtype()).ok_or(
                    FromDataError::NoCommonDType {
                        a: current,
                        b: value.dtype(),
                    },
                )?,
            });
        }
        let dtype = dtype.unwrap_or(DType::Float64);

        let layout = Layout::from_shape(shape, dtype.size())?;
        if values.len() != layout.len() {
            return Err(FromDataError::LengthMismatch {
                expected: layout.len(),
                got: values.len(),
            });
        }
        let array = NdArray::alloc(layout, dtype);
        for (i, &value) in values.iter().enumerate() {
            encode(&array.storage, i * array.item_size(), dtype, value)
                .expect("promoted dtype holds every input value");
        }
        Ok(array)
    }

    fn alloc(layout: Layout, dtype: DType) -> NdArray {
        // Cannot overflow: Layout::from_shape checked the full product.
        let byte_len = layout.len() * dtype.size();
        NdArray {
            storage: Rc::new(Storage::zeroed(byte_len)),
            layout,
            dtype,
            frozen: false,
        }
    }

    /// Return the element type tag.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Return the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Return the size of each dimension.
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Return the byte stride of each dimension.
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Return the number of elements.
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    /// Return true if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Return the width of one element in bytes.
    pub fn item_size(&self) -> usize {
        self.dtype.size()
    }

    /// Return the total size of the storage in bytes.
    pub fn byte_size(&self) -> usize {
        self.storage.len()
    }

    /// Read the element at `index`, widened to a [`Scalar`].
    pub fn get(&self, index: &[usize]) -> Result<Scalar, IndexError> {
        let offset = self.element_offset(index)?;
        Ok(decode(&self.storage, offset, self.dtype))
    }

    /// Store `value` at `index` and return it as accepted.
    ///
    /// The store is all-or-nothing: if `value` does not fit the array's
    /// dtype, the cell keeps its previous contents. Fails on a frozen
    /// handle before the index is even looked at.
    pub fn set<V: Into<Scalar>>(
        &mut self,
        index: &[usize],
        value: V,
    ) -> Result<Scalar, StoreError> {
        if self.frozen {
            return Err(StoreError::Immutable);
        }
        let value = value.into();
        let offset = self.element_offset(index)?;
        encode(&self.storage, offset, self.dtype, value)?;
        Ok(value)
    }

    /// Map an index to a byte offset, with a direct path for 1-D arrays.
    fn element_offset(&self, index: &[usize]) -> Result<usize, IndexError> {
        if self.ndim() == 1 && index.len() == 1 {
            // One bounds check and one multiply; the stride of a 1-D array
            // is always the element width.
            let i = index[0];
            let size = self.layout.size(0);
            if i >= size {
                return Err(IndexError::OutOfBounds {
                    axis: 0,
                    index: i,
                    size,
                });
            }
            return Ok(i * self.item_size());
        }
        self.layout.offset(index)
    }

    /// Make this handle read-only.
    ///
    /// Later `set` calls through this handle fail with
    /// [`StoreError::Immutable`]. Freezing is a property of the handle, not
    /// the storage: existing and future views of the same buffer stay
    /// writable.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Return true if [`freeze`](NdArray::freeze) has been called on this
    /// handle.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Return a new handle onto this array's storage under a different
    /// shape.
    ///
    /// The new shape must span exactly the same number of bytes at the same
    /// element width, and must not contain zero-sized dimensions. No bytes
    /// are copied or moved: writes through either handle are visible
    /// through the other, and the storage stays alive until every handle is
    /// dropped. The new handle is not frozen, whatever the state of `self`.
    pub fn reshape(&self, shape: &[usize]) -> Result<NdArray, ReshapeError> {
        self.reshape_with_order(shape, Order::RowMajor)
    }

    /// Variant of [`reshape`](NdArray::reshape) taking a memory [`Order`].
    ///
    /// Only [`Order::RowMajor`] is implemented; the reserved orders fail
    /// with [`ReshapeError::UnsupportedOrder`].
    pub fn reshape_with_order(
        &self,
        shape: &[usize],
        order: Order,
    ) -> Result<NdArray, ReshapeError> {
        if order != Order::RowMajor {
            return Err(ReshapeError::UnsupportedOrder(order));
        }
        for (axis, &size) in shape.iter().enumerate() {
            if size == 0 {
                return Err(ReshapeError::InvalidShape { axis, size });
            }
        }
        let layout = Layout::from_shape(shape, self.item_size())?;
        let requested = layout.len() * self.item_size();
        if requested != self.byte_size() {
            return Err(ReshapeError::IncompatibleShape {
                requested,
                actual: self.byte_size(),
            });
        }
        Ok(NdArray {
            storage: Rc::clone(&self.storage),
            layout,
            dtype: self.dtype,
            frozen: false,
        })
    }

    /// Return an iterator over the elements in row-major order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            array: self,
            offset: 0,
            end: self.len() * self.item_size(),
        }
    }

    /// Decode every element into a vector, in row-major order.
    pub fn to_scalars(&self) -> Vec<Scalar> {
        self.iter().collect()
    }
}

impl PartialEq for NdArray {
    /// Arrays are equal when their ranks, shapes and element values all
    /// match.
    ///
    /// Dtype is not part of the comparison: an `int32` array equals a
    /// `float64` array holding the same numbers. Values compare with
    /// [`Scalar`] equality, so an array containing NaN never equals
    /// anything, itself included.
    fn eq(&self, other: &NdArray) -> bool {
        if self.ndim() != other.ndim() || self.shape() != other.shape() {
            return false;
        }
        if self.ndim() == 1 {
            // Walk both buffers directly rather than materializing index
            // tuples.
            return self.iter().eq(other.iter());
        }
        for index in self.layout.indices() {
            let a = decode(&self.storage, self.layout.offset_unchecked(&index), self.dtype);
            let b = decode(
                &other.storage,
                other.layout.offset_unchecked(&index),
                other.dtype,
            );
            if a != b {
                return false;
            }
        }
        true
    }
}

impl fmt::Debug for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Elide the tail of large arrays.
        const MAX_ELEMENTS: usize = 12;
        write!(f, "NdArray {{ dtype: {}, shape: {:?}, data: [", self.dtype, self.shape())?;
        for (i, value) in self.iter().take(MAX_ELEMENTS).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        if self.len() > MAX_ELEMENTS {
            write!(f, ", ...")?;
        }
        write!(f, "] }}")
    }
}

/// Iterator over the elements of an [`NdArray`] in row-major order.
///
/// Every layout in this crate is contiguous, so iteration steps a flat byte
/// offset instead of carrying an index per dimension.
pub struct Iter<'a> {
    array: &'a NdArray,
    offset: usize,
    end: usize,
}

impl Iterator for Iter<'_> {
    type Item = Scalar;

    fn next(&mut self) -> Option<Scalar> {
        if self.offset == self.end {
            return None;
        }
        let value = decode(&self.array.storage, self.offset, self.array.dtype);
        self.offset += self.array.item_size();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.offset) / self.array.item_size();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl std::iter::FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a NdArray {
    type Item = Scalar;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
