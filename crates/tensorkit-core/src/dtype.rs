use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Runtime tag for the element type of a tensor.
///
/// The set is closed: every variant maps to exactly one Rust type
/// implementing [`Element`], and there is no catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F16,
    F32,
    F64,
}

impl DataType {
    /// Size of one element in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 | Self::F16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    /// Returns true for the floating-point variants.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F16 | Self::F32 | Self::F64)
    }

    /// Returns true for the signed integer variants.
    #[inline]
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Returns true for the unsigned integer variants.
    #[inline]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    /// Returns true for any integer variant, signed or unsigned.
    #[inline]
    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    /// Lowercase name used in display output, e.g. `"f32"`.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F16 => "f16",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Trait bound for types storable in a tensor.
///
/// Connects a Rust numeric type to its [`DataType`] tag. Implemented for
/// the eight primitive integer types, `half::f16`, `f32` and `f64`.
pub trait Element:
    Copy
    + Clone
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + 'static
{
    const DTYPE: DataType;

    fn zero() -> Self;
    fn one() -> Self;
    fn to_f64(self) -> f64;
    fn from_f64(v: f64) -> Self;

    /// Convert a value of any element type into this one.
    /// Transits through `f64`, so 64-bit integers above 2^53 lose precision.
    #[inline]
    fn from_elem<U: Element>(v: U) -> Self {
        Self::from_f64(v.to_f64())
    }
}

impl Element for i8 {
    const DTYPE: DataType = DataType::I8;

    #[inline] fn zero() -> Self { 0 }
    #[inline] fn one() -> Self { 1 }
    #[inline] fn to_f64(self) -> f64 { self as f64 }
    #[inline] fn from_f64(v: f64) -> Self { v as i8 }
}

impl Element for i16 {
    const DTYPE: DataType = DataType::I16;

    #[inline] fn zero() -> Self { 0 }
    #[inline] fn one() -> Self { 1 }
    #[inline] fn to_f64(self) -> f64 { self as f64 }
    #[inline] fn from_f64(v: f64) -> Self { v as i16 }
}

impl Element for i32 {
    const DTYPE: DataType = DataType::I32;

    #[inline] fn zero() -> Self { 0 }
    #[inline] fn one() -> Self { 1 }
    #[inline] fn to_f64(self) -> f64 { self as f64 }
    #[inline] fn from_f64(v: f64) -> Self { v as i32 }
}

impl Element for i64 {
    const DTYPE: DataType = DataType::I64;

    #[inline] fn zero() -> Self { 0 }
    #[inline] fn one() -> Self { 1 }
    #[inline] fn to_f64(self) -> f64 { self as f64 }
    #[inline] fn from_f64(v: f64) -> Self { v as i64 }
}

impl Element for u8 {
    const DTYPE: DataType = DataType::U8;

    #[inline] fn zero() -> Self { 0 }
    #[inline] fn one() -> Self { 1 }
    #[inline] fn to_f64(self) -> f64 { self as f64 }
    #[inline] fn from_f64(v: f64) -> Self { v as u8 }
}

impl Element for u16 {
    const DTYPE: DataType = DataType::U16;

    #[inline] fn zero() -> Self { 0 }
    #[inline] fn one() -> Self { 1 }
    #[inline] fn to_f64(self) -> f64 { self as f64 }
    #[inline] fn from_f64(v: f64) -> Self { v as u16 }
}

impl Element for u32 {
    const DTYPE: DataType = DataType::U32;

    #[inline] fn zero() -> Self { 0 }
    #[inline] fn one() -> Self { 1 }
    #[inline] fn to_f64(self) -> f64 { self as f64 }
    #[inline] fn from_f64(v: f64) -> Self { v as u32 }
}

impl Element for u64 {
    const DTYPE: DataType = DataType::U64;

    #[inline] fn zero() -> Self { 0 }
    #[inline] fn one() -> Self { 1 }
    #[inline] fn to_f64(self) -> f64 { self as f64 }
    #[inline] fn from_f64(v: f64) -> Self { v as u64 }
}

impl Element for half::f16 {
    const DTYPE: DataType = DataType::F16;

    #[inline] fn zero() -> Self { half::f16::ZERO }
    #[inline] fn one() -> Self { half::f16::ONE }
    #[inline] fn to_f64(self) -> f64 { self.to_f64() }
    #[inline] fn from_f64(v: f64) -> Self { half::f16::from_f64(v) }
}

impl Element for f32 {
    const DTYPE: DataType = DataType::F32;

    #[inline] fn zero() -> Self { 0.0 }
    #[inline] fn one() -> Self { 1.0 }
    #[inline] fn to_f64(self) -> f64 { self as f64 }
    #[inline] fn from_f64(v: f64) -> Self { v as f32 }
}

impl Element for f64 {
    const DTYPE: DataType = DataType::F64;

    #[inline] fn zero() -> Self { 0.0 }
    #[inline] fn one() -> Self { 1.0 }
    #[inline] fn to_f64(self) -> f64 { self }
    #[inline] fn from_f64(v: f64) -> Self { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_in_bytes() {
        assert_eq!(DataType::I8.size_in_bytes(), 1);
        assert_eq!(DataType::U8.size_in_bytes(), 1);
        assert_eq!(DataType::I16.size_in_bytes(), 2);
        assert_eq!(DataType::F16.size_in_bytes(), 2);
        assert_eq!(DataType::I32.size_in_bytes(), 4);
        assert_eq!(DataType::F32.size_in_bytes(), 4);
        assert_eq!(DataType::U64.size_in_bytes(), 8);
        assert_eq!(DataType::F64.size_in_bytes(), 8);
    }

    #[test]
    fn test_classification() {
        assert!(DataType::F32.is_float());
        assert!(!DataType::F32.is_int());
        assert!(DataType::I16.is_signed_int());
        assert!(!DataType::I16.is_unsigned_int());
        assert!(DataType::U64.is_unsigned_int());
        assert!(DataType::U64.is_int());
    }

    #[test]
    fn test_display_uses_short_name() {
        assert_eq!(DataType::F32.to_string(), "f32");
        assert_eq!(DataType::I64.to_string(), "i64");
        assert_eq!(format!("{}", DataType::F16), "f16");
    }

    #[test]
    fn test_element_dtype_mapping() {
        assert_eq!(f32::DTYPE, DataType::F32);
        assert_eq!(f64::DTYPE, DataType::F64);
        assert_eq!(half::f16::DTYPE, DataType::F16);
        assert_eq!(i8::DTYPE, DataType::I8);
        assert_eq!(u32::DTYPE, DataType::U32);
    }

    #[test]
    fn test_zero_one() {
        assert_eq!(i32::zero(), 0);
        assert_eq!(i32::one(), 1);
        assert_eq!(f64::zero(), 0.0);
        assert_eq!(half::f16::one().to_f64(), 1.0);
    }

    #[test]
    fn test_from_elem_crosses_types() {
        assert_eq!(i32::from_elem(7.9f32), 7);
        assert_eq!(f64::from_elem(42u8), 42.0);
        assert_eq!(u8::from_elem(-1i32), 0);
        let h = half::f16::from_elem(2.5f64);
        assert_eq!(h.to_f64(), 2.5);
    }
}
