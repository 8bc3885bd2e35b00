//! Call-site adapters for structure field serialization.
//!
//! Invoked by the structure layout engine: the write adapter when a single
//! field is serialized to native memory, the read adapter when a field comes
//! back. The layout engine computes offsets and performs the actual memory
//! access; this core only supplies `(value, context)` to the resolved
//! converter.

use std::any::Any;

use seam_core::{
    FieldDesc, ManagedValue, MarshalError, NativeValue, StructureReadContext,
    StructureWriteContext,
};

use crate::marshaller::Marshaller;

impl Marshaller {
    /// Convert one structure field's managed value for serialization to
    /// native memory.
    ///
    /// `structure` is the owning structure instance; the converter may
    /// downcast it to read state. The field's managed type comes from the
    /// descriptor.
    pub fn field_write(
        &self,
        value: ManagedValue,
        structure: &dyn Any,
        field: &FieldDesc,
    ) -> Result<NativeValue, MarshalError> {
        let context = StructureWriteContext::new(structure, field).into();
        self.run_to_native(field.managed_type(), value, &context)
    }

    /// Convert one structure field's native value after deserialization from
    /// native memory.
    pub fn field_read(
        &self,
        value: NativeValue,
        structure: &dyn Any,
        field: &FieldDesc,
    ) -> Result<ManagedValue, MarshalError> {
        let context = StructureReadContext::new(structure, field).into();
        self.run_from_native(field.managed_type(), value, &context)
    }
}
