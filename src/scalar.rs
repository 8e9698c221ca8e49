//! Generic element values and conversions between them and raw cells.

use std::fmt::{Display, Formatter};

use crate::dtype::DType;
use crate::errors::NarrowingError;
use crate::storage::Storage;

/// A decoded element value.
///
/// Reads widen every cell to one of three carriers: signed integers to
/// `i64`, unsigned integers to `u64` and floats to `f64`. The `PartialEq`
/// impl compares numerically across carriers, so `Scalar::Int(3)` equals
/// both `Scalar::UInt(3)` and `Scalar::Float(3.0)`. Comparisons involving
/// integers are exact: a wide integer is never rounded through `f64` first.
#[derive(Copy, Clone, Debug)]
pub enum Scalar {
    /// A signed integer, decoded from the `int*` dtypes.
    Int(i64),
    /// An unsigned integer, decoded from the `uint*` dtypes.
    UInt(u64),
    /// A float, decoded from the `float*` dtypes.
    Float(f64),
}

macro_rules! impl_scalar_from {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Scalar {
            fn from(value: $type) -> Scalar {
                Scalar::$variant(value.into())
            }
        }
    };
}

impl_scalar_from!(i8, Int);
impl_scalar_from!(i16, Int);
impl_scalar_from!(i32, Int);
impl_scalar_from!(i64, Int);
impl_scalar_from!(u8, UInt);
impl_scalar_from!(u16, UInt);
impl_scalar_from!(u32, UInt);
impl_scalar_from!(u64, UInt);
impl_scalar_from!(f32, Float);
impl_scalar_from!(f64, Float);

impl Scalar {
    /// Return the natural dtype of a freestanding value: the widest tag of
    /// the value's carrier.
    pub fn dtype(self) -> DType {
        match self {
            Scalar::Int(_) => DType::Int64,
            Scalar::UInt(_) => DType::UInt64,
            Scalar::Float(_) => DType::Float64,
        }
    }

    /// Return the value as an `f64`. Integers above 2^53 lose precision.
    pub fn to_f64(self) -> f64 {
        match self {
            Scalar::Int(value) => value as f64,
            Scalar::UInt(value) => value as f64,
            Scalar::Float(value) => value,
        }
    }

    /// Return the value as an `i64` if it fits.
    ///
    /// Floats are truncated towards zero; a non-finite or out-of-range
    /// float is `None`.
    fn as_i64(self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(value),
            Scalar::UInt(value) => i64::try_from(value).ok(),
            Scalar::Float(value) => {
                if !value.is_finite() {
                    return None;
                }
                let truncated = value.trunc();
                // `i64::MIN as f64` is exactly -2^63, so its negation is
                // the exclusive upper bound.
                if truncated >= i64::MIN as f64 && truncated < -(i64::MIN as f64) {
                    Some(truncated as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Return the value as a `u64` if it fits. Floats truncate as in
    /// [`as_i64`](Scalar::as_i64).
    fn as_u64(self) -> Option<u64> {
        match self {
            Scalar::Int(value) => u64::try_from(value).ok(),
            Scalar::UInt(value) => Some(value),
            Scalar::Float(value) => {
                if !value.is_finite() {
                    return None;
                }
                let truncated = value.trunc();
                // `u64::MAX as f64` rounds up to exactly 2^64.
                if truncated >= 0.0 && truncated < u64::MAX as f64 {
                    Some(truncated as u64)
                } else {
                    None
                }
            }
        }
    }
}

/// Test whether a float exactly equals a signed integer.
fn float_eq_i64(float: f64, int: i64) -> bool {
    float >= i64::MIN as f64
        && float < -(i64::MIN as f64)
        && float.trunc() == float
        && float as i64 == int
}

/// Test whether a float exactly equals an unsigned integer.
fn float_eq_u64(float: f64, int: u64) -> bool {
    float >= 0.0 && float < u64::MAX as f64 && float.trunc() == float && float as u64 == int
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        use Scalar::*;
        match (*self, *other) {
            (Int(a), Int(b)) => a == b,
            (UInt(a), UInt(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), UInt(b)) | (UInt(b), Int(a)) => a >= 0 && a as u64 == b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => float_eq_i64(b, a),
            (UInt(a), Float(b)) | (Float(b), UInt(a)) => float_eq_u64(b, a),
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Int(value) => write!(f, "{}", value),
            Scalar::UInt(value) => write!(f, "{}", value),
            Scalar::Float(value) => write!(f, "{}", value),
        }
    }
}

/// Decode the cell at `offset` into a [`Scalar`], widening to the dtype's
/// carrier.
pub(crate) fn decode(storage: &Storage, offset: usize, dtype: DType) -> Scalar {
    match dtype {
        DType::Int8 => Scalar::Int(i8::from_ne_bytes(storage.read_bytes(offset)) as i64),
        DType::UInt8 => Scalar::UInt(u8::from_ne_bytes(storage.read_bytes(offset)) as u64),
        DType::Int16 => Scalar::Int(i16::from_ne_bytes(storage.read_bytes(offset)) as i64),
        DType::UInt16 => Scalar::UInt(u16::from_ne_bytes(storage.read_bytes(offset)) as u64),
        DType::Int32 => Scalar::Int(i32::from_ne_bytes(storage.read_bytes(offset)) as i64),
        DType::UInt32 => Scalar::UInt(u32::from_ne_bytes(storage.read_bytes(offset)) as u64),
        DType::Int64 => Scalar::Int(i64::from_ne_bytes(storage.read_bytes(offset))),
        DType::UInt64 => Scalar::UInt(u64::from_ne_bytes(storage.read_bytes(offset))),
        DType::Float32 => Scalar::Float(f32::from_ne_bytes(storage.read_bytes(offset)) as f64),
        DType::Float64 => Scalar::Float(f64::from_ne_bytes(storage.read_bytes(offset))),
    }
}

/// Encode `value` into the cell at `offset`, narrowing to `dtype`.
///
/// The check happens before any byte is written, so a failed store leaves
/// the cell unchanged. Integer targets accept floats by truncating towards
/// zero after the range check; non-finite floats never fit an integer. A
/// `float32` target rejects finite values whose magnitude exceeds
/// `f32::MAX` rather than quietly storing an infinity.
pub(crate) fn encode(
    storage: &Storage,
    offset: usize,
    dtype: DType,
    value: Scalar,
) -> Result<(), NarrowingError> {
    let narrow = || NarrowingError::new(value, dtype);
    match dtype {
        DType::Int8 => {
            let value: i8 = value
                .as_i64()
                .and_then(|v| v.try_into().ok())
                .ok_or_else(narrow)?;
            storage.write_bytes(offset, value.to_ne_bytes());
        }
        DType::UInt8 => {
            let value: u8 = value
                .as_u64()
                .and_then(|v| v.try_into().ok())
                .ok_or_else(narrow)?;
            storage.write_bytes(offset, value.to_ne_bytes());
        }
        DType::Int16 => {
            let value: i16 = value
                .as_i64()
                .and_then(|v| v.try_into().ok())
                .ok_or_else(narrow)?;
            storage.write_bytes(offset, value.to_ne_bytes());
        }
        DType::UInt16 => {
            let value: u16 = value
                .as_u64()
                .and_then(|v| v.try_into().ok())
                .ok_or_else(narrow)?;
            storage.write_bytes(offset, value.to_ne_bytes());
        }
        DType::Int32 => {
            let value: i32 = value
                .as_i64()
                .and_then(|v| v.try_into().ok())
                .ok_or_else(narrow)?;
            storage.write_bytes(offset, value.to_ne_bytes());
        }
        DType::UInt32 => {
            let value: u32 = value
                .as_u64()
                .and_then(|v| v.try_into().ok())
                .ok_or_else(narrow)?;
            storage.write_bytes(offset, value.to_ne_bytes());
        }
        DType::Int64 => {
            let value = value.as_i64().ok_or_else(narrow)?;
            storage.write_bytes(offset, value.to_ne_bytes());
        }
        DType::UInt64 => {
            let value = value.as_u64().ok_or_else(narrow)?;
            storage.write_bytes(offset, value.to_ne_bytes());
        }
        DType::Float32 => {
            let value = value.to_f64();
            // Non-finite values pass through; f32 can represent them.
            if value.is_finite() && value.abs() > f32::MAX as f64 {
                return Err(narrow());
            }
            storage.write_bytes(offset, (value as f32).to_ne_bytes());
        }
        DType::Float64 => {
            storage.write_bytes(offset, value.to_f64().to_ne_bytes());
        }
    }
    Ok(())
}
