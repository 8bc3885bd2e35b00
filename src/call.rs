//! Call-site adapters for native function calls.
//!
//! Invoked by the call dispatcher: result adapters when a native call
//! returns, parameter adapters for each outbound argument that needs
//! conversion. Each adapter assembles the one correct context for its
//! call-site kind and hands control to the registry-resolved converter; no
//! adapter performs the conversion itself.

use seam_core::{
    FunctionHandle, FunctionParameterContext, FunctionResultContext, ManagedType, ManagedValue,
    MarshalError, MethodDesc, MethodParameterContext, MethodResultContext, NativeValue,
};

use crate::marshaller::Marshaller;

impl Marshaller {
    /// Convert the result of a raw native function call.
    ///
    /// `arguments` is the read-only snapshot of the managed arguments the
    /// invocation was made with.
    pub fn function_result(
        &self,
        value: NativeValue,
        result_type: &ManagedType,
        function: FunctionHandle,
        arguments: &[ManagedValue],
    ) -> Result<ManagedValue, MarshalError> {
        let context = FunctionResultContext::new(result_type, function, arguments).into();
        self.run_from_native(result_type, value, &context)
    }

    /// Convert the result of an interface-dispatched native call.
    ///
    /// Same as [`Marshaller::function_result`] but the context additionally
    /// carries the interface method the call was dispatched through.
    pub fn method_result(
        &self,
        value: NativeValue,
        result_type: &ManagedType,
        function: FunctionHandle,
        arguments: &[ManagedValue],
        method: &MethodDesc,
    ) -> Result<ManagedValue, MarshalError> {
        let context =
            MethodResultContext::new(result_type, function, arguments, method).into();
        self.run_from_native(result_type, value, &context)
    }

    /// Convert one argument of an outbound native function call.
    ///
    /// `index` is the argument's position in `arguments`; the value to
    /// convert is passed separately because the dispatcher may have already
    /// consumed it from its own argument storage.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for `arguments`.
    pub fn function_argument(
        &self,
        value: ManagedValue,
        param_type: &ManagedType,
        function: FunctionHandle,
        arguments: &[ManagedValue],
        index: usize,
    ) -> Result<NativeValue, MarshalError> {
        let context =
            FunctionParameterContext::new(param_type, function, arguments, index).into();
        self.run_to_native(param_type, value, &context)
    }

    /// Convert one argument of an interface-dispatched native call.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for `arguments`.
    pub fn method_argument(
        &self,
        value: ManagedValue,
        param_type: &ManagedType,
        function: FunctionHandle,
        arguments: &[ManagedValue],
        index: usize,
        method: &MethodDesc,
    ) -> Result<NativeValue, MarshalError> {
        let context =
            MethodParameterContext::new(param_type, function, arguments, index, method).into();
        self.run_to_native(param_type, value, &context)
    }
}
