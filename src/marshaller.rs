//! Converter dispatch shared by all call-site adapters.
//!
//! [`Marshaller`] owns the resolved [`TypeMapper`] and centralizes the
//! conversion protocol: resolve the converter for the managed type, invoke it
//! with the call-site context, fall back to the platform default when no
//! converter is registered, and annotate any failure with the managed type
//! and call-site kind. The per-call-site entry points live in the sibling
//! modules ([`crate::call`], [`crate::callback`], [`crate::structure`]) and
//! all funnel through here.

use std::sync::Arc;

use seam_core::intrinsic;
use seam_core::{
    ConversionError, FromNativeContext, ManagedType, ManagedValue, MarshalError, NativeType,
    NativeValue, ToNativeContext,
};
use seam_registry::{DefaultTypeMapper, TypeMapper};

/// Entry point for boundary-crossing conversions.
///
/// A `Marshaller` never initiates a conversion on its own; an external
/// collaborator (call dispatcher, callback trampoline, structure layout
/// engine) invokes the appropriate adapter method at the moment a value
/// crosses. The marshaller performs no native call, computes no layout, and
/// owns no native memory.
///
/// Cloning is cheap; clones share the same mapper, so a marshaller can be
/// handed to native-spawned callback threads.
#[derive(Clone)]
pub struct Marshaller {
    mapper: Arc<dyn TypeMapper>,
}

impl Marshaller {
    /// Create a marshaller over the given type mapper.
    pub fn new(mapper: Arc<dyn TypeMapper>) -> Self {
        Self { mapper }
    }

    /// Create a marshaller with no custom converters; every conversion uses
    /// the platform defaults.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(DefaultTypeMapper::new()))
    }

    /// The mapper this marshaller resolves converters from.
    pub fn mapper(&self) -> &Arc<dyn TypeMapper> {
        &self.mapper
    }

    /// The native type a native → managed conversion of `ty` expects as
    /// input: the registered converter's declared type, or the platform
    /// default.
    ///
    /// The call dispatcher uses this to lay out the call frame before
    /// invoking any conversion. `None` means the type cannot cross without a
    /// converter being registered first.
    pub fn native_type_for_result(&self, ty: &ManagedType) -> Option<NativeType> {
        match self.mapper.from_native_converter(ty) {
            Some(conv) => Some(conv.native_type()),
            None => intrinsic::default_native_type(ty),
        }
    }

    /// The native type a managed → native conversion of `ty` produces.
    pub fn native_type_for_argument(&self, ty: &ManagedType) -> Option<NativeType> {
        match self.mapper.to_native_converter(ty) {
            Some(conv) => Some(conv.native_type()),
            None => intrinsic::default_native_type(ty),
        }
    }

    /// Resolve and run the native → managed conversion for `ty`.
    pub(crate) fn run_from_native(
        &self,
        ty: &ManagedType,
        value: NativeValue,
        context: &FromNativeContext<'_>,
    ) -> Result<ManagedValue, MarshalError> {
        let result = match self.mapper.from_native_converter(ty) {
            Some(conv) => conv.from_native(value, context),
            None => intrinsic::from_native(ty, value),
        };
        result.map_err(|source| annotate(ty, context.call_site(), source))
    }

    /// Resolve and run the managed → native conversion for `ty`.
    pub(crate) fn run_to_native(
        &self,
        ty: &ManagedType,
        value: ManagedValue,
        context: &ToNativeContext<'_>,
    ) -> Result<NativeValue, MarshalError> {
        let result = match self.mapper.to_native_converter(ty) {
            Some(conv) => conv.to_native(value, context),
            None => intrinsic::to_native(ty, value),
        };
        result.map_err(|source| annotate(ty, context.call_site(), source))
    }
}

/// Attach managed type and call-site kind to a converter failure.
///
/// `Unsupported` means no converter and no platform default existed, which
/// gets its own error variant; everything else propagates as a conversion
/// failure.
fn annotate(
    ty: &ManagedType,
    site: seam_core::CallSiteKind,
    source: ConversionError,
) -> MarshalError {
    match source {
        ConversionError::Unsupported { .. } => MarshalError::UnsupportedType {
            managed_type: ty.name().to_string(),
            site,
        },
        source => MarshalError::Conversion {
            managed_type: ty.name().to_string(),
            site,
            source,
        },
    }
}
