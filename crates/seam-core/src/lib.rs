//! Core types for the `seam` value-marshalling layer.
//!
//! This crate defines the pieces a boundary crossing is made of:
//!
//! - [`TypeKey`] / [`ManagedType`]: deterministic identity for managed types
//! - [`NativeValue`] / [`ManagedValue`]: the two value representations
//! - [`MethodDesc`] / [`FieldDesc`] / [`FunctionHandle`]: comparable member
//!   descriptors standing in for live reflection
//! - [`FromNativeContext`] / [`ToNativeContext`]: immutable call-site
//!   metadata handed to every conversion
//! - [`FromNativeConverter`] / [`ToNativeConverter`]: the capability pair a
//!   type-mapping registry resolves per managed type
//! - [`intrinsic`]: the platform default conversions applied when no
//!   converter is registered
//!
//! The crate performs no native calls, computes no memory layout, and manages
//! no native memory; it only decides how a value is transformed and what
//! context is visible at each transformation point.

pub mod context;
pub mod converter;
pub mod descriptor;
pub mod error;
pub mod intrinsic;
pub mod managed_type;
pub mod type_key;
pub mod value;

pub use context::{
    CallSiteKind, CallbackParameterContext, CallbackResultContext, FromNativeContext,
    FunctionParameterContext, FunctionResultContext, MethodParameterContext, MethodResultContext,
    StructureReadContext, StructureWriteContext, ToNativeContext,
};
pub use converter::{
    FromNativeConverter, FromNativeFn, ToNativeConverter, ToNativeFn, TypeConverter,
};
pub use descriptor::{FieldDesc, FunctionHandle, MethodDesc};
pub use error::{ConversionError, MarshalError};
pub use managed_type::{ManagedType, primitives};
pub use type_key::{TypeKey, keys};
pub use value::{ManagedValue, NativeType, NativeValue};
