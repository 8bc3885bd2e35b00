//! Call-site adapters for inbound callback invocations.
//!
//! Invoked by the callback trampoline: the parameter adapter once per
//! inbound argument that needs conversion (constructed lazily, only when a
//! position's value actually crosses), and the result adapter when the
//! managed callback's return value heads back to the native caller.
//!
//! Callbacks may arrive on native-spawned threads; the adapters take `&self`
//! and build all context on the current stack, so no synchronization is
//! needed beyond sharing the marshaller itself.

use seam_core::{
    CallbackParameterContext, CallbackResultContext, ManagedType, ManagedValue, MarshalError,
    MethodDesc, NativeValue,
};

use crate::marshaller::Marshaller;

impl Marshaller {
    /// Convert one parameter of an inbound callback invocation.
    ///
    /// `arguments` is the full native argument snapshot of the invocation
    /// and `index` the zero-based position of the parameter being converted.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for `arguments`: that means the
    /// trampoline and the declared signature disagree, which is an
    /// integration bug with no safe recovery.
    pub fn callback_parameter(
        &self,
        param_type: &ManagedType,
        method: &MethodDesc,
        arguments: &[NativeValue],
        index: usize,
    ) -> Result<ManagedValue, MarshalError> {
        let context = CallbackParameterContext::new(param_type, method, arguments, index).into();
        let value = arguments[index];
        self.run_from_native(param_type, value, &context)
    }

    /// Convert a managed callback's return value to a native-compatible
    /// value.
    ///
    /// The managed type is the callback's declared return type.
    pub fn callback_result(
        &self,
        value: ManagedValue,
        method: &MethodDesc,
    ) -> Result<NativeValue, MarshalError> {
        let result_type = method.return_type();
        let context = CallbackResultContext::new(method).into();
        self.run_to_native(result_type, value, &context)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use seam_core::{
        CallSiteKind, ConversionError, FromNativeContext, FromNativeFn, NativeType, TypeKey,
        primitives,
    };
    use seam_registry::DefaultTypeMapper;

    use super::*;

    fn cb_method() -> MethodDesc {
        MethodDesc::new(
            TypeKey::from_name("Callbacks"),
            "cb",
            vec![primitives::int32(), primitives::int32()],
            primitives::void(),
        )
    }

    #[test]
    fn callback_parameter_sees_position_and_snapshot() {
        let mut mapper = DefaultTypeMapper::new();
        mapper.add_from_native_converter(
            &primitives::int32(),
            FromNativeFn::new(NativeType::I32, |value, ctx| {
                let FromNativeContext::CallbackParameter(p) = ctx else {
                    panic!("wrong context variant");
                };
                assert_eq!(p.index(), 1);
                assert_eq!(p.arguments(), &[NativeValue::I32(7), NativeValue::I32(9)]);
                match value {
                    NativeValue::I32(v) => Ok(ManagedValue::Int(v as i64)),
                    other => Err(ConversionError::TypeMismatch {
                        expected: "i32",
                        actual: other.type_name(),
                    }),
                }
            }),
        );
        let marshaller = Marshaller::new(Arc::new(mapper));

        let method = cb_method();
        let args = [NativeValue::I32(7), NativeValue::I32(9)];
        let result = marshaller
            .callback_parameter(&primitives::int32(), &method, &args, 1)
            .unwrap();
        assert_eq!(result, ManagedValue::Int(9));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn callback_parameter_index_past_arguments_is_fatal() {
        let marshaller = Marshaller::with_defaults();
        let method = cb_method();
        let args = [NativeValue::I32(7), NativeValue::I32(9)];
        let _ = marshaller.callback_parameter(&primitives::int32(), &method, &args, 2);
    }

    #[test]
    fn callback_parameter_intrinsic_fallback() {
        let marshaller = Marshaller::with_defaults();
        let method = cb_method();
        let args = [NativeValue::I32(7), NativeValue::I32(9)];
        let result = marshaller
            .callback_parameter(&primitives::int32(), &method, &args, 0)
            .unwrap();
        assert_eq!(result, ManagedValue::Int(7));
    }

    #[test]
    fn callback_result_uses_declared_return_type() {
        let marshaller = Marshaller::with_defaults();
        let method = MethodDesc::new(
            TypeKey::from_name("Callbacks"),
            "compute",
            vec![primitives::int32()],
            primitives::int16(),
        );
        let native = marshaller
            .callback_result(ManagedValue::Int(1000), &method)
            .unwrap();
        assert_eq!(native, NativeValue::I16(1000));
    }

    #[test]
    fn callback_result_failure_is_annotated() {
        let marshaller = Marshaller::with_defaults();
        let method = MethodDesc::new(
            TypeKey::from_name("Callbacks"),
            "compute",
            vec![],
            primitives::int16(),
        );
        let err = marshaller
            .callback_result(ManagedValue::Int(1_000_000), &method)
            .unwrap_err();
        assert_eq!(err.call_site(), CallSiteKind::CallbackResult);
        assert_eq!(err.managed_type(), "int16");
    }
}
