//! Value representations on both sides of the boundary.
//!
//! - [`NativeType`]: the shape a value takes in the foreign calling
//!   convention (primitive word widths and pointers)
//! - [`NativeValue`]: a value in that raw form
//! - [`ManagedValue`]: a value in the managed object model
//!
//! Converters transform between [`NativeValue`] and [`ManagedValue`];
//! [`NativeType`] is what a converter declares so the call dispatcher can
//! lay out the call frame before any conversion happens.

use std::any::Any;
use std::fmt;

/// A native-side representation type.
///
/// This is the vocabulary of the foreign calling convention: fixed-width
/// integer words, IEEE floats, and untyped pointers. It deliberately says
/// nothing about what the bits mean in the managed world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    /// No value (void return).
    Void,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// IEEE 754 single-precision float.
    F32,
    /// IEEE 754 double-precision float.
    F64,
    /// Untyped pointer-sized word.
    Pointer,
}

impl NativeType {
    /// Get a human-readable name for this native type.
    pub fn type_name(self) -> &'static str {
        match self {
            NativeType::Void => "void",
            NativeType::I8 => "i8",
            NativeType::I16 => "i16",
            NativeType::I32 => "i32",
            NativeType::I64 => "i64",
            NativeType::U8 => "u8",
            NativeType::U16 => "u16",
            NativeType::U32 => "u32",
            NativeType::U64 => "u64",
            NativeType::F32 => "f32",
            NativeType::F64 => "f64",
            NativeType::Pointer => "pointer",
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A value in the foreign calling convention's raw form.
///
/// One variant per [`NativeType`]; all variants are plain scalars, so the
/// type is `Copy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeValue {
    /// No value.
    Void,
    /// Signed 8-bit integer.
    I8(i8),
    /// Signed 16-bit integer.
    I16(i16),
    /// Signed 32-bit integer.
    I32(i32),
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// Single-precision float.
    F32(f32),
    /// Double-precision float.
    F64(f64),
    /// Pointer-sized word. The core never dereferences it.
    Pointer(usize),
}

impl NativeValue {
    /// The [`NativeType`] this value inhabits.
    pub fn native_type(self) -> NativeType {
        match self {
            NativeValue::Void => NativeType::Void,
            NativeValue::I8(_) => NativeType::I8,
            NativeValue::I16(_) => NativeType::I16,
            NativeValue::I32(_) => NativeType::I32,
            NativeValue::I64(_) => NativeType::I64,
            NativeValue::U8(_) => NativeType::U8,
            NativeValue::U16(_) => NativeType::U16,
            NativeValue::U32(_) => NativeType::U32,
            NativeValue::U64(_) => NativeType::U64,
            NativeValue::F32(_) => NativeType::F32,
            NativeValue::F64(_) => NativeType::F64,
            NativeValue::Pointer(_) => NativeType::Pointer,
        }
    }

    /// Get a human-readable name for this value's type.
    pub fn type_name(self) -> &'static str {
        self.native_type().type_name()
    }
}

/// A value in the managed object model.
///
/// Primitive values use widened storage (all integer widths as `i64`, both
/// float widths as `f64`); `u64` round-trips through `i64` by bit
/// reinterpretation. User-defined managed values travel as [`ManagedValue::Opaque`].
///
/// `ManagedValue` does not implement `Clone` because opaque values may not be
/// cloneable. Use [`ManagedValue::clone_if_possible`] where a copy is needed.
pub enum ManagedValue {
    /// No value.
    Void,
    /// Boolean value.
    Bool(bool),
    /// Integer value (all widths stored as i64; u64 bit-reinterpreted).
    Int(i64),
    /// Floating point value (f32 and f64 both stored as f64).
    Float(f64),
    /// Owned string value.
    Str(String),
    /// Pointer-sized handle the managed side treats as opaque.
    Pointer(usize),
    /// User-defined managed value. Uses `Box<dyn Any>` for type safety.
    Opaque(Box<dyn Any + Send + Sync>),
}

impl ManagedValue {
    /// Get a human-readable name for this value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            ManagedValue::Void => "void",
            ManagedValue::Bool(_) => "bool",
            ManagedValue::Int(_) => "int",
            ManagedValue::Float(_) => "float",
            ManagedValue::Str(_) => "string",
            ManagedValue::Pointer(_) => "pointer",
            ManagedValue::Opaque(_) => "opaque",
        }
    }

    /// Check if this value is void.
    pub fn is_void(&self) -> bool {
        matches!(self, ManagedValue::Void)
    }

    /// Clone the value if it doesn't contain an opaque payload.
    ///
    /// Returns `None` for [`ManagedValue::Opaque`] since the payload may not
    /// be cloneable.
    pub fn clone_if_possible(&self) -> Option<Self> {
        match self {
            ManagedValue::Void => Some(ManagedValue::Void),
            ManagedValue::Bool(v) => Some(ManagedValue::Bool(*v)),
            ManagedValue::Int(v) => Some(ManagedValue::Int(*v)),
            ManagedValue::Float(v) => Some(ManagedValue::Float(*v)),
            ManagedValue::Str(s) => Some(ManagedValue::Str(s.clone())),
            ManagedValue::Pointer(p) => Some(ManagedValue::Pointer(*p)),
            ManagedValue::Opaque(_) => None,
        }
    }

    /// Downcast an opaque payload to a concrete type.
    ///
    /// Returns `None` if this is not an opaque value or the type doesn't match.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            ManagedValue::Opaque(v) => v.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for ManagedValue {
    /// Structural equality for transparent variants; opaque payloads never
    /// compare equal.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ManagedValue::Void, ManagedValue::Void) => true,
            (ManagedValue::Bool(a), ManagedValue::Bool(b)) => a == b,
            (ManagedValue::Int(a), ManagedValue::Int(b)) => a == b,
            (ManagedValue::Float(a), ManagedValue::Float(b)) => a == b,
            (ManagedValue::Str(a), ManagedValue::Str(b)) => a == b,
            (ManagedValue::Pointer(a), ManagedValue::Pointer(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for ManagedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagedValue::Void => write!(f, "Void"),
            ManagedValue::Bool(v) => write!(f, "Bool({})", v),
            ManagedValue::Int(v) => write!(f, "Int({})", v),
            ManagedValue::Float(v) => write!(f, "Float({})", v),
            ManagedValue::Str(s) => write!(f, "Str({:?})", s),
            ManagedValue::Pointer(p) => write!(f, "Pointer({:#x})", p),
            ManagedValue::Opaque(_) => write!(f, "Opaque(...)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_value_types() {
        assert_eq!(NativeValue::Void.native_type(), NativeType::Void);
        assert_eq!(NativeValue::I32(5).native_type(), NativeType::I32);
        assert_eq!(NativeValue::U64(0).native_type(), NativeType::U64);
        assert_eq!(NativeValue::F32(1.0).native_type(), NativeType::F32);
        assert_eq!(NativeValue::Pointer(0xdead).native_type(), NativeType::Pointer);
    }

    #[test]
    fn managed_value_type_names() {
        assert_eq!(ManagedValue::Void.type_name(), "void");
        assert_eq!(ManagedValue::Int(0).type_name(), "int");
        assert_eq!(ManagedValue::Float(0.0).type_name(), "float");
        assert_eq!(ManagedValue::Bool(false).type_name(), "bool");
        assert_eq!(ManagedValue::Str("".into()).type_name(), "string");
        assert_eq!(ManagedValue::Opaque(Box::new(7u8)).type_name(), "opaque");
    }

    #[test]
    fn managed_value_is_void() {
        assert!(ManagedValue::Void.is_void());
        assert!(!ManagedValue::Int(0).is_void());
    }

    #[test]
    fn clone_if_possible() {
        assert_eq!(
            ManagedValue::Int(9).clone_if_possible(),
            Some(ManagedValue::Int(9))
        );
        assert!(ManagedValue::Opaque(Box::new(7u8)).clone_if_possible().is_none());
    }

    #[test]
    fn opaque_never_compares_equal() {
        let a = ManagedValue::Opaque(Box::new(1u8));
        let b = ManagedValue::Opaque(Box::new(1u8));
        assert_ne!(a, b);
    }

    #[test]
    fn opaque_downcast() {
        let v = ManagedValue::Opaque(Box::new(42u16));
        assert_eq!(v.downcast_ref::<u16>(), Some(&42));
        assert!(v.downcast_ref::<u32>().is_none());
        assert!(ManagedValue::Int(42).downcast_ref::<u16>().is_none());
    }
}
