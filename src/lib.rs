//! `seam` - a pluggable value-marshalling layer between a managed object
//! model and a foreign calling convention.
//!
//! Given a call site (a function invocation, a callback invocation, or a
//! structure field access), `seam` decides how values crossing the boundary
//! are transformed in each direction, using caller-supplied converters keyed
//! by managed type and carrying call-site context (which call, which
//! argument, which method) so a converter can make position-sensitive
//! decisions.
//!
//! The core never initiates a conversion; it only responds when one of the
//! external collaborators (call dispatcher, callback trampoline, structure
//! layout engine) invokes a [`Marshaller`] adapter method at a boundary
//! crossing.
//!
//! ```
//! use std::sync::Arc;
//! use seam::prelude::*;
//!
//! // Register a custom conversion for the managed bool type.
//! let mut mapper = DefaultTypeMapper::new();
//! mapper.add_to_native_converter(
//!     &primitives::boolean(),
//!     ToNativeFn::new(NativeType::I32, |value, _ctx| match value {
//!         ManagedValue::Bool(b) => Ok(NativeValue::I32(if b { 1 } else { 0 })),
//!         other => Err(ConversionError::TypeMismatch {
//!             expected: "bool",
//!             actual: other.type_name(),
//!         }),
//!     }),
//! );
//!
//! let marshaller = Marshaller::new(Arc::new(mapper));
//! let args = [ManagedValue::Bool(true)];
//! let native = marshaller
//!     .function_argument(
//!         ManagedValue::Bool(true),
//!         &primitives::boolean(),
//!         FunctionHandle::from_symbol("set_flag"),
//!         &args,
//!         0,
//!     )
//!     .unwrap();
//! assert_eq!(native, NativeValue::I32(1));
//! ```

mod call;
mod callback;
mod marshaller;
mod structure;

pub use marshaller::Marshaller;

pub use seam_core::{
    CallSiteKind, CallbackParameterContext, CallbackResultContext, ConversionError, FieldDesc,
    FromNativeContext, FromNativeConverter, FromNativeFn, FunctionHandle,
    FunctionParameterContext, FunctionResultContext, ManagedType, ManagedValue, MarshalError,
    MethodDesc, MethodParameterContext, MethodResultContext, NativeType, NativeValue,
    StructureReadContext, StructureWriteContext, ToNativeContext, ToNativeConverter, ToNativeFn,
    TypeConverter, TypeKey, intrinsic, keys, primitives,
};
pub use seam_registry::{CompositeTypeMapper, DefaultTypeMapper, TypeMapper};

/// Everything an embedding application needs to configure and drive the
/// marshalling layer.
pub mod prelude {
    pub use crate::Marshaller;
    pub use seam_core::{
        CallSiteKind, ConversionError, FieldDesc, FromNativeContext, FromNativeConverter,
        FromNativeFn, FunctionHandle, ManagedType, ManagedValue, MarshalError, MethodDesc,
        NativeType, NativeValue, ToNativeContext, ToNativeConverter, ToNativeFn, TypeConverter,
        TypeKey, primitives,
    };
    pub use seam_registry::{CompositeTypeMapper, DefaultTypeMapper, TypeMapper};
}
