//! Converter capability pair.
//!
//! The extension point of the marshalling layer: a type-mapping registry
//! resolves, per managed type, an optional [`FromNativeConverter`] and an
//! optional [`ToNativeConverter`]. Each is a pure function of
//! `(value, context) → value`.
//!
//! Converters declare the native-side type they operate on via
//! [`FromNativeConverter::native_type`] / [`ToNativeConverter::native_type`],
//! so the call dispatcher can lay out the call frame before invoking the
//! conversion.
//!
//! Converters are expected to be side-effect-free with respect to state
//! outside the two argument values; a context may reference live objects
//! (e.g. the owning structure) whose state a converter is allowed to read.

use crate::context::{FromNativeContext, ToNativeContext};
use crate::error::ConversionError;
use crate::value::{ManagedValue, NativeType, NativeValue};

/// Converts a native value to its managed representation.
///
/// Implementations must accept any context whose `managed_type()` matches
/// the converter's declared target; resolution against the wrong type is the
/// caller's bug, not a condition a converter needs to handle gracefully.
pub trait FromNativeConverter: Send + Sync {
    /// The native-side type this converter expects as input.
    fn native_type(&self) -> NativeType;

    /// Transform a native value into a managed value.
    ///
    /// Fails with a [`ConversionError`] when the input value's shape does not
    /// match what the managed type requires. The failure is recoverable at
    /// the boundary-crossing layer; it is never silently coerced.
    fn from_native(
        &self,
        value: NativeValue,
        context: &FromNativeContext<'_>,
    ) -> Result<ManagedValue, ConversionError>;
}

/// Converts a managed value to its native representation.
pub trait ToNativeConverter: Send + Sync {
    /// The native-side type this converter produces.
    fn native_type(&self) -> NativeType;

    /// Transform a managed value into a native value.
    fn to_native(
        &self,
        value: ManagedValue,
        context: &ToNativeContext<'_>,
    ) -> Result<NativeValue, ConversionError>;
}

/// A bidirectional converter, usable in both directions for one managed type.
///
/// Blanket-implemented for anything that implements both capability traits,
/// so a single registration can cover both directions.
pub trait TypeConverter: FromNativeConverter + ToNativeConverter {}

impl<T: FromNativeConverter + ToNativeConverter> TypeConverter for T {}

/// Closure-backed [`FromNativeConverter`].
///
/// Lets embedders register a conversion without writing an impl block:
///
/// ```
/// use seam_core::{FromNativeFn, ManagedValue, NativeType, NativeValue};
///
/// let conv = FromNativeFn::new(NativeType::I32, |value, _ctx| match value {
///     NativeValue::I32(v) => Ok(ManagedValue::Bool(v != 0)),
///     other => Err(seam_core::ConversionError::TypeMismatch {
///         expected: "i32",
///         actual: other.type_name(),
///     }),
/// });
/// ```
pub struct FromNativeFn {
    native_type: NativeType,
    #[allow(clippy::type_complexity)]
    f: Box<
        dyn Fn(NativeValue, &FromNativeContext<'_>) -> Result<ManagedValue, ConversionError>
            + Send
            + Sync,
    >,
}

impl FromNativeFn {
    /// Wrap a closure together with the native type it expects.
    pub fn new<F>(native_type: NativeType, f: F) -> Self
    where
        F: Fn(NativeValue, &FromNativeContext<'_>) -> Result<ManagedValue, ConversionError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            native_type,
            f: Box::new(f),
        }
    }
}

impl FromNativeConverter for FromNativeFn {
    fn native_type(&self) -> NativeType {
        self.native_type
    }

    fn from_native(
        &self,
        value: NativeValue,
        context: &FromNativeContext<'_>,
    ) -> Result<ManagedValue, ConversionError> {
        (self.f)(value, context)
    }
}

/// Closure-backed [`ToNativeConverter`].
pub struct ToNativeFn {
    native_type: NativeType,
    #[allow(clippy::type_complexity)]
    f: Box<
        dyn Fn(ManagedValue, &ToNativeContext<'_>) -> Result<NativeValue, ConversionError>
            + Send
            + Sync,
    >,
}

impl ToNativeFn {
    /// Wrap a closure together with the native type it produces.
    pub fn new<F>(native_type: NativeType, f: F) -> Self
    where
        F: Fn(ManagedValue, &ToNativeContext<'_>) -> Result<NativeValue, ConversionError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            native_type,
            f: Box::new(f),
        }
    }
}

impl ToNativeConverter for ToNativeFn {
    fn native_type(&self) -> NativeType {
        self.native_type
    }

    fn to_native(
        &self,
        value: ManagedValue,
        context: &ToNativeContext<'_>,
    ) -> Result<NativeValue, ConversionError> {
        (self.f)(value, context)
    }
}
