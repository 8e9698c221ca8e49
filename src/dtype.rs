//! Element type tags and their properties.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::UnknownDTypeError;
use crate::scalar::Scalar;

/// Tag identifying the binary representation of an array element.
///
/// The set of tags is closed: each one has a fixed byte width and a
/// canonical lowercase name (`"int8"` through `"float64"`) under which it
/// can be resolved with [`FromStr`]. Elements are stored native-endian.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum DType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl DType {
    /// All tags, in width order.
    pub const ALL: [DType; 10] = [
        DType::Int8,
        DType::UInt8,
        DType::Int16,
        DType::UInt16,
        DType::Int32,
        DType::UInt32,
        DType::Int64,
        DType::UInt64,
        DType::Float32,
        DType::Float64,
    ];

    /// Return the size of elements of this type in bytes.
    pub const fn size(self) -> usize {
        match self {
            DType::Int8 | DType::UInt8 => 1,
            DType::Int16 | DType::UInt16 => 2,
            DType::Int32 | DType::UInt32 | DType::Float32 => 4,
            DType::Int64 | DType::UInt64 | DType::Float64 => 8,
        }
    }

    /// Return the canonical name of this type, eg. "int32".
    pub const fn name(self) -> &'static str {
        match self {
            DType::Int8 => "int8",
            DType::UInt8 => "uint8",
            DType::Int16 => "int16",
            DType::UInt16 => "uint16",
            DType::Int32 => "int32",
            DType::UInt32 => "uint32",
            DType::Int64 => "int64",
            DType::UInt64 => "uint64",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
        }
    }

    /// Return true if this is a signed or unsigned integer type.
    pub const fn is_int(self) -> bool {
        !self.is_float()
    }

    /// Return true if this is a float type.
    pub const fn is_float(self) -> bool {
        matches!(self, DType::Float32 | DType::Float64)
    }

    /// Return the dtype that `self` and `other` promote to, or `None` if
    /// there is no automatic promotion between them.
    ///
    /// A float wins over any integer, a wider type wins over a narrower one
    /// of the same class, and integers of equal width but different
    /// signedness do not promote.
    pub fn promote(self, other: DType) -> Option<DType> {
        if self == other {
            return Some(self);
        }
        match (self.is_float(), other.is_float()) {
            (true, false) => Some(self),
            (false, true) => Some(other),
            _ => {
                if self.size() > other.size() {
                    Some(self)
                } else if other.size() > self.size() {
                    Some(other)
                } else {
                    // Same width, same class, different tags: a signed and
                    // an unsigned integer. Neither can hold the other.
                    None
                }
            }
        }
    }
}

impl Display for DType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DType {
    type Err = UnknownDTypeError;

    /// Resolve a canonical name to a tag by scanning the registry.
    fn from_str(s: &str) -> Result<DType, UnknownDTypeError> {
        DType::ALL
            .iter()
            .find(|dtype| dtype.name() == s)
            .copied()
            .ok_or_else(|| UnknownDTypeError::new(s))
    }
}

/// Trait for primitives that can be stored as array elements.
pub trait Element: Copy {
    /// Tag describing this type's binary representation.
    const DTYPE: DType;

    /// Widen this value into a generic [`Scalar`].
    fn to_scalar(self) -> Scalar;
}

macro_rules! impl_element {
    ($type:ty, $dtype:ident) => {
        impl Element for $type {
            const DTYPE: DType = DType::$dtype;

            fn to_scalar(self) -> Scalar {
                self.into()
            }
        }
    };
}

impl_element!(i8, Int8);
impl_element!(u8, UInt8);
impl_element!(i16, Int16);
impl_element!(u16, UInt16);
impl_element!(i32, Int32);
impl_element!(u32, UInt32);
impl_element!(i64, Int64);
impl_element!(u64, UInt64);
impl_element!(f32, Float32);
impl_element!(f64, Float64);

#[cfg(test)]
mod tests {
    use ndview_testing::TestCases;

    use super::DType;

    #[test]
    fn test_size() {
        #[derive(Debug)]
        struct Case {
            dtype: DType,
            size: usize,
        }

        let cases = [
            Case {
                dtype: DType::Int8,
                size: 1,
            },
            Case {
                dtype: DType::UInt8,
                size: 1,
            },
            Case {
                dtype: DType::Int16,
                size: 2,
            },
            Case {
                dtype: DType::UInt16,
                size: 2,
            },
            Case {
                dtype: DType::Int32,
                size: 4,
            },
            Case {
                dtype: DType::UInt32,
                size: 4,
            },
            Case {
                dtype: DType::Int64,
                size: 8,
            },
            Case {
                dtype: DType::UInt64,
                size: 8,
            },
            Case {
                dtype: DType::Float32,
                size: 4,
            },
            Case {
                dtype: DType::Float64,
                size: 8,
            },
        ];

        cases.test_each(|case| {
            assert_eq!(case.dtype.size(), case.size);
        })
    }

    #[test]
    fn test_name_round_trip() {
        for dtype in DType::ALL {
            assert_eq!(dtype.name().parse::<DType>(), Ok(dtype));
            assert_eq!(dtype.to_string(), dtype.name());
        }
    }

    #[test]
    fn test_is_int() {
        // Every tag is exactly one of integer or float.
        for dtype in DType::ALL {
            assert_ne!(dtype.is_int(), dtype.is_float());
        }
        assert!(DType::Int8.is_int());
        assert!(DType::UInt64.is_int());
        assert!(!DType::Float32.is_int());
        assert!(DType::Float64.is_float());
    }

    #[test]
    fn test_from_str_unknown() {
        let cases = ["Int32", "int33", "float", ""];

        cases.test_each(|&name| {
            let err = name.parse::<DType>().err().unwrap();
            assert_eq!(err.name(), name);
            assert_eq!(err.to_string(), format!("unknown dtype: {:?}", name));
        })
    }

    #[test]
    fn test_promote() {
        #[derive(Debug)]
        struct Case {
            a: DType,
            b: DType,
            expected: Option<DType>,
        }

        let cases = [
            // Same tag.
            Case {
                a: DType::Int8,
                b: DType::Int8,
                expected: Some(DType::Int8),
            },
            // Wider integer wins, even across signedness.
            Case {
                a: DType::Int8,
                b: DType::Int32,
                expected: Some(DType::Int32),
            },
            Case {
                a: DType::UInt16,
                b: DType::Int8,
                expected: Some(DType::UInt16),
            },
            Case {
                a: DType::Int64,
                b: DType::UInt8,
                expected: Some(DType::Int64),
            },
            // Same width, mixed signedness: no promotion.
            Case {
                a: DType::Int8,
                b: DType::UInt8,
                expected: None,
            },
            Case {
                a: DType::UInt64,
                b: DType::Int64,
                expected: None,
            },
            // Float wins over any integer, even a wider one.
            Case {
                a: DType::Int64,
                b: DType::Float32,
                expected: Some(DType::Float32),
            },
            Case {
                a: DType::Float64,
                b: DType::UInt8,
                expected: Some(DType::Float64),
            },
            // Wider float wins.
            Case {
                a: DType::Float32,
                b: DType::Float64,
                expected: Some(DType::Float64),
            },
        ];

        cases.test_each(|case| {
            assert_eq!(case.a.promote(case.b), case.expected);
            assert_eq!(case.b.promote(case.a), case.expected);
        })
    }
}
