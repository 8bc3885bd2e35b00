//! Conversion context hierarchy.
//!
//! Every boundary crossing hands its converter an immutable context
//! describing the call site: which function returned, which callback
//! parameter is being converted, which structure field is being written.
//! Contexts are split by direction and by call-site kind, one variant per
//! kind, so a converter pattern-matches on exactly the data relevant to its
//! call site with no downcasting.
//!
//! Contexts borrow everything they carry. They are constructed on the stack
//! by the call-site adapter that triggers the conversion and dropped when
//! that crossing returns; the borrow checker enforces that a converter
//! cannot retain one beyond the call.
//!
//! ## Variants
//!
//! Native → managed ([`FromNativeContext`]):
//! - [`FunctionResultContext`] - a raw native call returned
//! - [`MethodResultContext`] - an interface-dispatched call returned
//! - [`CallbackParameterContext`] - one inbound callback argument
//! - [`StructureReadContext`] - a field deserialized from native memory
//!
//! Managed → native ([`ToNativeContext`]):
//! - [`FunctionParameterContext`] - one outbound call argument
//! - [`MethodParameterContext`] - one outbound interface-call argument
//! - [`CallbackResultContext`] - a callback's return value heading back out
//! - [`StructureWriteContext`] - a field serialized to native memory

use std::any::Any;
use std::fmt;

use crate::descriptor::{FieldDesc, FunctionHandle, MethodDesc};
use crate::managed_type::ManagedType;
use crate::value::{ManagedValue, NativeValue};

/// The kind of call site a conversion belongs to.
///
/// Carried in error annotations so a failed conversion names the crossing
/// that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallSiteKind {
    /// Result of a raw native function call.
    FunctionResult,
    /// Result of an interface-dispatched native call.
    MethodResult,
    /// Argument of a raw native function call.
    FunctionParameter,
    /// Argument of an interface-dispatched native call.
    MethodParameter,
    /// Parameter of an inbound callback invocation.
    CallbackParameter,
    /// Return value of an inbound callback invocation.
    CallbackResult,
    /// Structure field read from native memory.
    StructureRead,
    /// Structure field written to native memory.
    StructureWrite,
}

impl fmt::Display for CallSiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallSiteKind::FunctionResult => "function result",
            CallSiteKind::MethodResult => "method result",
            CallSiteKind::FunctionParameter => "function parameter",
            CallSiteKind::MethodParameter => "method parameter",
            CallSiteKind::CallbackParameter => "callback parameter",
            CallSiteKind::CallbackResult => "callback result",
            CallSiteKind::StructureRead => "structure read",
            CallSiteKind::StructureWrite => "structure write",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Native -> managed contexts
// ============================================================================

/// Context for converting the result of a raw native function call.
#[derive(Debug)]
pub struct FunctionResultContext<'a> {
    managed_type: &'a ManagedType,
    function: FunctionHandle,
    arguments: &'a [ManagedValue],
}

impl<'a> FunctionResultContext<'a> {
    /// Create a function-result context.
    ///
    /// `arguments` is a read-only snapshot of the managed argument values
    /// supplied to the invocation.
    pub fn new(
        managed_type: &'a ManagedType,
        function: FunctionHandle,
        arguments: &'a [ManagedValue],
    ) -> Self {
        Self {
            managed_type,
            function,
            arguments,
        }
    }

    /// The managed type the result converts to.
    #[inline]
    pub fn managed_type(&self) -> &ManagedType {
        self.managed_type
    }

    /// Handle of the native function that was invoked.
    #[inline]
    pub fn function(&self) -> FunctionHandle {
        self.function
    }

    /// The managed arguments the invocation was made with.
    #[inline]
    pub fn arguments(&self) -> &[ManagedValue] {
        self.arguments
    }
}

/// Context for converting the result of an interface-dispatched call.
///
/// Extends the function-result data with the declared method that triggered
/// the call.
#[derive(Debug)]
pub struct MethodResultContext<'a> {
    result: FunctionResultContext<'a>,
    method: &'a MethodDesc,
}

impl<'a> MethodResultContext<'a> {
    /// Create a method-result context.
    pub fn new(
        managed_type: &'a ManagedType,
        function: FunctionHandle,
        arguments: &'a [ManagedValue],
        method: &'a MethodDesc,
    ) -> Self {
        Self {
            result: FunctionResultContext::new(managed_type, function, arguments),
            method,
        }
    }

    /// The managed type the result converts to.
    #[inline]
    pub fn managed_type(&self) -> &ManagedType {
        self.result.managed_type()
    }

    /// Handle of the native function that was invoked.
    #[inline]
    pub fn function(&self) -> FunctionHandle {
        self.result.function()
    }

    /// The managed arguments the invocation was made with.
    #[inline]
    pub fn arguments(&self) -> &[ManagedValue] {
        self.result.arguments()
    }

    /// The interface method the call was dispatched through.
    #[inline]
    pub fn method(&self) -> &MethodDesc {
        self.method
    }
}

/// Context for converting one parameter of an inbound callback invocation.
#[derive(Debug)]
pub struct CallbackParameterContext<'a> {
    managed_type: &'a ManagedType,
    method: &'a MethodDesc,
    arguments: &'a [NativeValue],
    index: usize,
}

impl<'a> CallbackParameterContext<'a> {
    /// Create a callback-parameter context for the parameter at `index`.
    ///
    /// `arguments` is the full native argument snapshot of the inbound
    /// invocation.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for `arguments`. An invalid index
    /// means the callback trampoline and this core disagree about the
    /// signature, which is an integration bug with no safe recovery.
    pub fn new(
        managed_type: &'a ManagedType,
        method: &'a MethodDesc,
        arguments: &'a [NativeValue],
        index: usize,
    ) -> Self {
        assert!(
            index < arguments.len(),
            "callback parameter index {} out of range for {} argument(s) of {}",
            index,
            arguments.len(),
            method.name(),
        );
        Self {
            managed_type,
            method,
            arguments,
            index,
        }
    }

    /// The managed type the parameter converts to.
    #[inline]
    pub fn managed_type(&self) -> &ManagedType {
        self.managed_type
    }

    /// The callback's declared method signature.
    #[inline]
    pub fn method(&self) -> &MethodDesc {
        self.method
    }

    /// The full native argument snapshot of the inbound invocation.
    #[inline]
    pub fn arguments(&self) -> &[NativeValue] {
        self.arguments
    }

    /// Zero-based position of the parameter being converted.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Context for converting a structure field read back from native memory.
pub struct StructureReadContext<'a> {
    managed_type: &'a ManagedType,
    structure: &'a dyn Any,
    field: &'a FieldDesc,
}

impl<'a> StructureReadContext<'a> {
    /// Create a structure-read context.
    ///
    /// `structure` identifies the owning structure instance; a converter may
    /// downcast it to read state but must not hold it past the call.
    pub fn new(structure: &'a dyn Any, field: &'a FieldDesc) -> Self {
        Self {
            managed_type: field.managed_type(),
            structure,
            field,
        }
    }

    /// The managed type of the field being read.
    #[inline]
    pub fn managed_type(&self) -> &ManagedType {
        self.managed_type
    }

    /// The owning structure instance.
    #[inline]
    pub fn structure(&self) -> &dyn Any {
        self.structure
    }

    /// The field being read.
    #[inline]
    pub fn field(&self) -> &FieldDesc {
        self.field
    }
}

impl fmt::Debug for StructureReadContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureReadContext")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// Call-site metadata for a native → managed conversion.
///
/// One variant per call-site kind; a context never mixes attributes from two
/// kinds.
#[derive(Debug)]
pub enum FromNativeContext<'a> {
    /// A raw native call returned.
    FunctionResult(FunctionResultContext<'a>),
    /// An interface-dispatched native call returned.
    MethodResult(MethodResultContext<'a>),
    /// An inbound callback parameter needs conversion.
    CallbackParameter(CallbackParameterContext<'a>),
    /// A structure field was deserialized from native memory.
    StructureRead(StructureReadContext<'a>),
}

impl FromNativeContext<'_> {
    /// The managed type this conversion targets.
    pub fn managed_type(&self) -> &ManagedType {
        match self {
            FromNativeContext::FunctionResult(ctx) => ctx.managed_type(),
            FromNativeContext::MethodResult(ctx) => ctx.managed_type(),
            FromNativeContext::CallbackParameter(ctx) => ctx.managed_type(),
            FromNativeContext::StructureRead(ctx) => ctx.managed_type(),
        }
    }

    /// The kind of call site this context describes.
    pub fn call_site(&self) -> CallSiteKind {
        match self {
            FromNativeContext::FunctionResult(_) => CallSiteKind::FunctionResult,
            FromNativeContext::MethodResult(_) => CallSiteKind::MethodResult,
            FromNativeContext::CallbackParameter(_) => CallSiteKind::CallbackParameter,
            FromNativeContext::StructureRead(_) => CallSiteKind::StructureRead,
        }
    }
}

impl<'a> From<FunctionResultContext<'a>> for FromNativeContext<'a> {
    fn from(ctx: FunctionResultContext<'a>) -> Self {
        FromNativeContext::FunctionResult(ctx)
    }
}

impl<'a> From<MethodResultContext<'a>> for FromNativeContext<'a> {
    fn from(ctx: MethodResultContext<'a>) -> Self {
        FromNativeContext::MethodResult(ctx)
    }
}

impl<'a> From<CallbackParameterContext<'a>> for FromNativeContext<'a> {
    fn from(ctx: CallbackParameterContext<'a>) -> Self {
        FromNativeContext::CallbackParameter(ctx)
    }
}

impl<'a> From<StructureReadContext<'a>> for FromNativeContext<'a> {
    fn from(ctx: StructureReadContext<'a>) -> Self {
        FromNativeContext::StructureRead(ctx)
    }
}

// ============================================================================
// Managed -> native contexts
// ============================================================================

/// Context for converting one argument of an outbound native call.
#[derive(Debug)]
pub struct FunctionParameterContext<'a> {
    managed_type: &'a ManagedType,
    function: FunctionHandle,
    arguments: &'a [ManagedValue],
    index: usize,
}

impl<'a> FunctionParameterContext<'a> {
    /// Create a function-parameter context for the argument at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for `arguments` (integration bug,
    /// same policy as [`CallbackParameterContext::new`]).
    pub fn new(
        managed_type: &'a ManagedType,
        function: FunctionHandle,
        arguments: &'a [ManagedValue],
        index: usize,
    ) -> Self {
        assert!(
            index < arguments.len(),
            "function parameter index {} out of range for {} argument(s) of {}",
            index,
            arguments.len(),
            function,
        );
        Self {
            managed_type,
            function,
            arguments,
            index,
        }
    }

    /// The managed type the argument converts from.
    #[inline]
    pub fn managed_type(&self) -> &ManagedType {
        self.managed_type
    }

    /// Handle of the native function being invoked.
    #[inline]
    pub fn function(&self) -> FunctionHandle {
        self.function
    }

    /// The full managed argument snapshot of the invocation.
    #[inline]
    pub fn arguments(&self) -> &[ManagedValue] {
        self.arguments
    }

    /// Zero-based position of the argument being converted.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Context for converting one argument of an interface-dispatched call.
#[derive(Debug)]
pub struct MethodParameterContext<'a> {
    parameter: FunctionParameterContext<'a>,
    method: &'a MethodDesc,
}

impl<'a> MethodParameterContext<'a> {
    /// Create a method-parameter context.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for `arguments`.
    pub fn new(
        managed_type: &'a ManagedType,
        function: FunctionHandle,
        arguments: &'a [ManagedValue],
        index: usize,
        method: &'a MethodDesc,
    ) -> Self {
        Self {
            parameter: FunctionParameterContext::new(managed_type, function, arguments, index),
            method,
        }
    }

    /// The managed type the argument converts from.
    #[inline]
    pub fn managed_type(&self) -> &ManagedType {
        self.parameter.managed_type()
    }

    /// Handle of the native function being invoked.
    #[inline]
    pub fn function(&self) -> FunctionHandle {
        self.parameter.function()
    }

    /// The full managed argument snapshot of the invocation.
    #[inline]
    pub fn arguments(&self) -> &[ManagedValue] {
        self.parameter.arguments()
    }

    /// Zero-based position of the argument being converted.
    #[inline]
    pub fn index(&self) -> usize {
        self.parameter.index()
    }

    /// The interface method the call is dispatched through.
    #[inline]
    pub fn method(&self) -> &MethodDesc {
        self.method
    }
}

/// Context for converting a callback's return value back to native form.
#[derive(Debug)]
pub struct CallbackResultContext<'a> {
    managed_type: &'a ManagedType,
    method: &'a MethodDesc,
}

impl<'a> CallbackResultContext<'a> {
    /// Create a callback-result context.
    ///
    /// The managed type is the callback's declared return type.
    pub fn new(method: &'a MethodDesc) -> Self {
        Self {
            managed_type: method.return_type(),
            method,
        }
    }

    /// The managed type the return value converts from.
    #[inline]
    pub fn managed_type(&self) -> &ManagedType {
        self.managed_type
    }

    /// The callback's declared method signature.
    #[inline]
    pub fn method(&self) -> &MethodDesc {
        self.method
    }
}

/// Context for converting a structure field on its way to native memory.
pub struct StructureWriteContext<'a> {
    managed_type: &'a ManagedType,
    structure: &'a dyn Any,
    field: &'a FieldDesc,
}

impl<'a> StructureWriteContext<'a> {
    /// Create a structure-write context.
    ///
    /// `structure` identifies the owning structure instance; a converter may
    /// downcast it to read state but must not hold it past the call.
    pub fn new(structure: &'a dyn Any, field: &'a FieldDesc) -> Self {
        Self {
            managed_type: field.managed_type(),
            structure,
            field,
        }
    }

    /// The managed type of the field being written.
    #[inline]
    pub fn managed_type(&self) -> &ManagedType {
        self.managed_type
    }

    /// The owning structure instance.
    #[inline]
    pub fn structure(&self) -> &dyn Any {
        self.structure
    }

    /// The field being written.
    #[inline]
    pub fn field(&self) -> &FieldDesc {
        self.field
    }
}

impl fmt::Debug for StructureWriteContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureWriteContext")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// Call-site metadata for a managed → native conversion.
#[derive(Debug)]
pub enum ToNativeContext<'a> {
    /// An argument of a raw native call needs conversion.
    FunctionParameter(FunctionParameterContext<'a>),
    /// An argument of an interface-dispatched call needs conversion.
    MethodParameter(MethodParameterContext<'a>),
    /// A callback's return value heads back to the native caller.
    CallbackResult(CallbackResultContext<'a>),
    /// A structure field is serialized to native memory.
    StructureWrite(StructureWriteContext<'a>),
}

impl ToNativeContext<'_> {
    /// The managed type this conversion originates from.
    pub fn managed_type(&self) -> &ManagedType {
        match self {
            ToNativeContext::FunctionParameter(ctx) => ctx.managed_type(),
            ToNativeContext::MethodParameter(ctx) => ctx.managed_type(),
            ToNativeContext::CallbackResult(ctx) => ctx.managed_type(),
            ToNativeContext::StructureWrite(ctx) => ctx.managed_type(),
        }
    }

    /// The kind of call site this context describes.
    pub fn call_site(&self) -> CallSiteKind {
        match self {
            ToNativeContext::FunctionParameter(_) => CallSiteKind::FunctionParameter,
            ToNativeContext::MethodParameter(_) => CallSiteKind::MethodParameter,
            ToNativeContext::CallbackResult(_) => CallSiteKind::CallbackResult,
            ToNativeContext::StructureWrite(_) => CallSiteKind::StructureWrite,
        }
    }
}

impl<'a> From<FunctionParameterContext<'a>> for ToNativeContext<'a> {
    fn from(ctx: FunctionParameterContext<'a>) -> Self {
        ToNativeContext::FunctionParameter(ctx)
    }
}

impl<'a> From<MethodParameterContext<'a>> for ToNativeContext<'a> {
    fn from(ctx: MethodParameterContext<'a>) -> Self {
        ToNativeContext::MethodParameter(ctx)
    }
}

impl<'a> From<CallbackResultContext<'a>> for ToNativeContext<'a> {
    fn from(ctx: CallbackResultContext<'a>) -> Self {
        ToNativeContext::CallbackResult(ctx)
    }
}

impl<'a> From<StructureWriteContext<'a>> for ToNativeContext<'a> {
    fn from(ctx: StructureWriteContext<'a>) -> Self {
        ToNativeContext::StructureWrite(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managed_type::primitives;
    use crate::type_key::TypeKey;

    fn tick_method() -> MethodDesc {
        MethodDesc::new(
            TypeKey::from_name("Callbacks"),
            "on_tick",
            vec![primitives::int32(), primitives::int32()],
            primitives::void(),
        )
    }

    #[test]
    fn function_result_context_accessors() {
        let ty = primitives::int32();
        let function = FunctionHandle::from_symbol("add");
        let args = [ManagedValue::Int(2), ManagedValue::Int(3)];
        let ctx = FunctionResultContext::new(&ty, function, &args);

        assert_eq!(ctx.managed_type(), &ty);
        assert_eq!(ctx.function(), function);
        assert_eq!(ctx.arguments(), &args);
    }

    #[test]
    fn method_result_context_adds_method() {
        let ty = primitives::void();
        let method = tick_method();
        let args = [ManagedValue::Int(1)];
        let ctx = MethodResultContext::new(&ty, FunctionHandle::from_symbol("cb"), &args, &method);

        assert_eq!(ctx.managed_type(), &ty);
        assert_eq!(ctx.method(), &method);
        assert_eq!(ctx.arguments().len(), 1);
    }

    #[test]
    fn callback_parameter_context_in_range() {
        let ty = primitives::int32();
        let method = tick_method();
        let args = [NativeValue::I32(7), NativeValue::I32(9)];
        let ctx = CallbackParameterContext::new(&ty, &method, &args, 1);

        assert_eq!(ctx.index(), 1);
        assert_eq!(ctx.arguments(), &args);
        assert_eq!(ctx.managed_type(), &ty);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn callback_parameter_context_rejects_out_of_range_index() {
        let ty = primitives::int32();
        let method = tick_method();
        let args = [NativeValue::I32(7), NativeValue::I32(9)];
        let _ = CallbackParameterContext::new(&ty, &method, &args, 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn function_parameter_context_rejects_out_of_range_index() {
        let ty = primitives::int32();
        let args = [ManagedValue::Int(1)];
        let _ =
            FunctionParameterContext::new(&ty, FunctionHandle::from_symbol("add"), &args, 1);
    }

    #[test]
    fn callback_result_context_uses_declared_return_type() {
        let method = MethodDesc::new(
            TypeKey::from_name("Callbacks"),
            "compute",
            vec![primitives::int32()],
            primitives::int64(),
        );
        let ctx = CallbackResultContext::new(&method);
        assert_eq!(ctx.managed_type(), &primitives::int64());
    }

    #[test]
    fn structure_contexts_expose_structure_and_field() {
        struct Stats {
            count: i64,
        }
        let stats = Stats { count: 42 };
        let field = FieldDesc::new(TypeKey::from_name("Stats"), "count", primitives::int64());

        let write = StructureWriteContext::new(&stats, &field);
        assert_eq!(write.managed_type(), &primitives::int64());
        assert_eq!(write.field(), &field);
        let owner = write.structure().downcast_ref::<Stats>().unwrap();
        assert_eq!(owner.count, 42);

        let read = StructureReadContext::new(&stats, &field);
        assert_eq!(read.managed_type(), &primitives::int64());
        assert_eq!(read.field().name(), "count");
    }

    #[test]
    fn from_native_union_reports_call_site() {
        let ty = primitives::int32();
        let args = [ManagedValue::Int(2), ManagedValue::Int(3)];
        let ctx: FromNativeContext =
            FunctionResultContext::new(&ty, FunctionHandle::from_symbol("add"), &args).into();
        assert_eq!(ctx.call_site(), CallSiteKind::FunctionResult);
        assert_eq!(ctx.managed_type(), &ty);
    }

    #[test]
    fn to_native_union_reports_call_site() {
        let method = tick_method();
        let ctx: ToNativeContext = CallbackResultContext::new(&method).into();
        assert_eq!(ctx.call_site(), CallSiteKind::CallbackResult);
        assert_eq!(ctx.managed_type(), &primitives::void());
    }

    #[test]
    fn call_site_kind_display() {
        assert_eq!(CallSiteKind::FunctionResult.to_string(), "function result");
        assert_eq!(CallSiteKind::StructureWrite.to_string(), "structure write");
    }
}
