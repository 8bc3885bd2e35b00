//! Platform default conversions for the built-in managed types.
//!
//! When the registry resolves no converter for a managed type, the call-site
//! adapters fall back here. Primitive types convert by widening into the
//! managed representation (all integers as `i64`, both float widths as
//! `f64`) and by bounds-checked narrowing on the way back out.
//!
//! ## Supported types
//!
//! - Integers: `int8`/`int16`/`int32`/`int64`, `uint8`/`uint16`/`uint32`/`uint64`
//! - Floats: `float32`, `float64`
//! - `bool` (native `i32`, 0 = false)
//! - `pointer` (passed through)
//! - `void`
//!
//! `string` and every user-defined type have no default: crossing them
//! requires memory management the core deliberately does not do, so a custom
//! converter must be registered. Absence here surfaces as
//! [`ConversionError::Unsupported`].

use crate::error::ConversionError;
use crate::managed_type::ManagedType;
use crate::type_key::keys;
use crate::value::{ManagedValue, NativeType, NativeValue};

/// The native representation a managed type defaults to, absent a converter.
///
/// Returns `None` for types with no platform default.
pub fn default_native_type(ty: &ManagedType) -> Option<NativeType> {
    match ty.key() {
        keys::VOID => Some(NativeType::Void),
        keys::BOOL => Some(NativeType::I32),
        keys::INT8 => Some(NativeType::I8),
        keys::INT16 => Some(NativeType::I16),
        keys::INT32 => Some(NativeType::I32),
        keys::INT64 => Some(NativeType::I64),
        keys::UINT8 => Some(NativeType::U8),
        keys::UINT16 => Some(NativeType::U16),
        keys::UINT32 => Some(NativeType::U32),
        keys::UINT64 => Some(NativeType::U64),
        keys::FLOAT32 => Some(NativeType::F32),
        keys::FLOAT64 => Some(NativeType::F64),
        keys::POINTER => Some(NativeType::Pointer),
        _ => None,
    }
}

/// Default native → managed conversion.
///
/// Expects the value in the type's default native representation (what
/// [`default_native_type`] reports); anything else is a `TypeMismatch`.
pub fn from_native(ty: &ManagedType, value: NativeValue) -> Result<ManagedValue, ConversionError> {
    match ty.key() {
        keys::VOID => match value {
            NativeValue::Void => Ok(ManagedValue::Void),
            other => mismatch("void", other),
        },
        keys::BOOL => match value {
            NativeValue::I32(v) => Ok(ManagedValue::Bool(v != 0)),
            other => mismatch("i32", other),
        },
        keys::INT8 => match value {
            NativeValue::I8(v) => Ok(ManagedValue::Int(v as i64)),
            other => mismatch("i8", other),
        },
        keys::INT16 => match value {
            NativeValue::I16(v) => Ok(ManagedValue::Int(v as i64)),
            other => mismatch("i16", other),
        },
        keys::INT32 => match value {
            NativeValue::I32(v) => Ok(ManagedValue::Int(v as i64)),
            other => mismatch("i32", other),
        },
        keys::INT64 => match value {
            NativeValue::I64(v) => Ok(ManagedValue::Int(v)),
            other => mismatch("i64", other),
        },
        keys::UINT8 => match value {
            NativeValue::U8(v) => Ok(ManagedValue::Int(v as i64)),
            other => mismatch("u8", other),
        },
        keys::UINT16 => match value {
            NativeValue::U16(v) => Ok(ManagedValue::Int(v as i64)),
            other => mismatch("u16", other),
        },
        keys::UINT32 => match value {
            NativeValue::U32(v) => Ok(ManagedValue::Int(v as i64)),
            other => mismatch("u32", other),
        },
        keys::UINT64 => match value {
            // Reinterpret the bits - this allows full u64 range via i64
            NativeValue::U64(v) => Ok(ManagedValue::Int(v as i64)),
            other => mismatch("u64", other),
        },
        keys::FLOAT32 => match value {
            NativeValue::F32(v) => Ok(ManagedValue::Float(v as f64)),
            other => mismatch("f32", other),
        },
        keys::FLOAT64 => match value {
            NativeValue::F64(v) => Ok(ManagedValue::Float(v)),
            other => mismatch("f64", other),
        },
        keys::POINTER => match value {
            NativeValue::Pointer(p) => Ok(ManagedValue::Pointer(p)),
            other => mismatch("pointer", other),
        },
        _ => Err(ConversionError::Unsupported {
            type_name: ty.name().to_string(),
        }),
    }
}

/// Default managed → native conversion.
///
/// Narrowing integer conversions are bounds-checked; out-of-range values fail
/// with `IntegerOverflow` rather than wrapping.
pub fn to_native(ty: &ManagedType, value: ManagedValue) -> Result<NativeValue, ConversionError> {
    match ty.key() {
        keys::VOID => match value {
            ManagedValue::Void => Ok(NativeValue::Void),
            other => managed_mismatch("void", &other),
        },
        keys::BOOL => match value {
            ManagedValue::Bool(b) => Ok(NativeValue::I32(if b { 1 } else { 0 })),
            other => managed_mismatch("bool", &other),
        },
        keys::INT8 => narrow_int(value, "i8", |v| {
            (v >= i8::MIN as i64 && v <= i8::MAX as i64).then(|| NativeValue::I8(v as i8))
        }),
        keys::INT16 => narrow_int(value, "i16", |v| {
            (v >= i16::MIN as i64 && v <= i16::MAX as i64).then(|| NativeValue::I16(v as i16))
        }),
        keys::INT32 => narrow_int(value, "i32", |v| {
            (v >= i32::MIN as i64 && v <= i32::MAX as i64).then(|| NativeValue::I32(v as i32))
        }),
        keys::INT64 => narrow_int(value, "i64", |v| Some(NativeValue::I64(v))),
        keys::UINT8 => narrow_int(value, "u8", |v| {
            (v >= 0 && v <= u8::MAX as i64).then(|| NativeValue::U8(v as u8))
        }),
        keys::UINT16 => narrow_int(value, "u16", |v| {
            (v >= 0 && v <= u16::MAX as i64).then(|| NativeValue::U16(v as u16))
        }),
        keys::UINT32 => narrow_int(value, "u32", |v| {
            (v >= 0 && v <= u32::MAX as i64).then(|| NativeValue::U32(v as u32))
        }),
        // Reinterpret bits - this preserves full u64 range
        keys::UINT64 => narrow_int(value, "u64", |v| Some(NativeValue::U64(v as u64))),
        keys::FLOAT32 => match value {
            ManagedValue::Float(v) => {
                if v.is_finite() && (v < f32::MIN as f64 || v > f32::MAX as f64) {
                    Err(ConversionError::FloatConversion {
                        value: v,
                        target_type: "f32",
                    })
                } else {
                    // Infinities and NaN are preserved
                    Ok(NativeValue::F32(v as f32))
                }
            }
            ManagedValue::Int(v) => Ok(NativeValue::F32(v as f32)),
            other => managed_mismatch("float", &other),
        },
        keys::FLOAT64 => match value {
            ManagedValue::Float(v) => Ok(NativeValue::F64(v)),
            ManagedValue::Int(v) => Ok(NativeValue::F64(v as f64)),
            other => managed_mismatch("float", &other),
        },
        keys::POINTER => match value {
            ManagedValue::Pointer(p) => Ok(NativeValue::Pointer(p)),
            other => managed_mismatch("pointer", &other),
        },
        _ => Err(ConversionError::Unsupported {
            type_name: ty.name().to_string(),
        }),
    }
}

fn mismatch(expected: &'static str, actual: NativeValue) -> Result<ManagedValue, ConversionError> {
    Err(ConversionError::TypeMismatch {
        expected,
        actual: actual.type_name(),
    })
}

fn managed_mismatch(
    expected: &'static str,
    actual: &ManagedValue,
) -> Result<NativeValue, ConversionError> {
    Err(ConversionError::TypeMismatch {
        expected,
        actual: actual.type_name(),
    })
}

fn narrow_int(
    value: ManagedValue,
    target_type: &'static str,
    narrow: impl FnOnce(i64) -> Option<NativeValue>,
) -> Result<NativeValue, ConversionError> {
    match value {
        ManagedValue::Int(v) => narrow(v).ok_or(ConversionError::IntegerOverflow {
            value: v,
            target_type,
        }),
        other => Err(ConversionError::TypeMismatch {
            expected: "int",
            actual: other.type_name(),
        }),
    }
}
