//! Member descriptors and function handles.
//!
//! Converters sometimes need to know *which* declared member a crossing
//! belongs to (which callback signature, which structure field). Instead of
//! live reflective objects, the core uses small comparable descriptors:
//! equality and hashing are structural, and every descriptor carries a
//! deterministic [`TypeKey`] computed from its signature.

use std::fmt;

use crate::managed_type::ManagedType;
use crate::type_key::TypeKey;

/// Opaque handle identifying a native function symbol.
///
/// The core never calls through it; it only travels in result contexts so a
/// converter can distinguish call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionHandle(TypeKey);

impl FunctionHandle {
    /// Create a handle from the function's symbol name.
    #[inline]
    pub fn from_symbol(symbol: &str) -> Self {
        Self(TypeKey::from_function(symbol))
    }

    /// The identity key of this handle.
    #[inline]
    pub const fn key(self) -> TypeKey {
        self.0
    }
}

impl fmt::Display for FunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn@{}", self.0)
    }
}

/// Descriptor of a declared method signature.
///
/// Used for interface-dispatched calls and callback signatures. Equality is
/// structural: two descriptors with the same declaring type, name, parameter
/// list and return type are the same method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDesc {
    name: String,
    declaring: TypeKey,
    params: Vec<ManagedType>,
    ret: ManagedType,
    key: TypeKey,
}

impl MethodDesc {
    /// Create a method descriptor.
    ///
    /// The identity key is computed from the declaring type, name, and
    /// ordered parameter types.
    pub fn new(
        declaring: TypeKey,
        name: impl Into<String>,
        params: Vec<ManagedType>,
        ret: ManagedType,
    ) -> Self {
        let name = name.into();
        let param_keys: Vec<TypeKey> = params.iter().map(|p| p.key()).collect();
        let key = TypeKey::from_method(declaring, &name, &param_keys);
        Self {
            name,
            declaring,
            params,
            ret,
            key,
        }
    }

    /// The method's declared name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the declaring interface/type.
    #[inline]
    pub fn declaring_type(&self) -> TypeKey {
        self.declaring
    }

    /// The ordered parameter types.
    #[inline]
    pub fn parameter_types(&self) -> &[ManagedType] {
        &self.params
    }

    /// The declared return type.
    #[inline]
    pub fn return_type(&self) -> &ManagedType {
        &self.ret
    }

    /// Number of declared parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The structural identity key of this signature.
    #[inline]
    pub fn key(&self) -> TypeKey {
        self.key
    }
}

impl fmt::Display for MethodDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

/// Descriptor of a structure field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDesc {
    name: String,
    declaring: TypeKey,
    ty: ManagedType,
    key: TypeKey,
}

impl FieldDesc {
    /// Create a field descriptor for a field of the given managed type.
    pub fn new(declaring: TypeKey, name: impl Into<String>, ty: ManagedType) -> Self {
        let name = name.into();
        let key = TypeKey::from_field(declaring, &name);
        Self {
            name,
            declaring,
            ty,
            key,
        }
    }

    /// The field's declared name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the declaring structure type.
    #[inline]
    pub fn declaring_type(&self) -> TypeKey {
        self.declaring
    }

    /// The field's managed type.
    #[inline]
    pub fn managed_type(&self) -> &ManagedType {
        &self.ty
    }

    /// The structural identity key of this field.
    #[inline]
    pub fn key(&self) -> TypeKey {
        self.key
    }
}

impl fmt::Display for FieldDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managed_type::primitives;

    #[test]
    fn function_handle_identity() {
        let a = FunctionHandle::from_symbol("add");
        let b = FunctionHandle::from_symbol("add");
        let c = FunctionHandle::from_symbol("sub");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn method_desc_structural_equality() {
        let owner = TypeKey::from_name("Callbacks");
        let m1 = MethodDesc::new(
            owner,
            "on_tick",
            vec![primitives::int32(), primitives::int32()],
            primitives::void(),
        );
        let m2 = MethodDesc::new(
            owner,
            "on_tick",
            vec![primitives::int32(), primitives::int32()],
            primitives::void(),
        );
        assert_eq!(m1, m2);
        assert_eq!(m1.key(), m2.key());
    }

    #[test]
    fn method_desc_signature_distinction() {
        let owner = TypeKey::from_name("Callbacks");
        let m1 = MethodDesc::new(owner, "on_tick", vec![primitives::int32()], primitives::void());
        let m2 = MethodDesc::new(owner, "on_tick", vec![primitives::int64()], primitives::void());
        assert_ne!(m1.key(), m2.key());
    }

    #[test]
    fn method_desc_accessors() {
        let owner = TypeKey::from_name("Callbacks");
        let m = MethodDesc::new(
            owner,
            "on_tick",
            vec![primitives::int32(), primitives::float64()],
            primitives::boolean(),
        );
        assert_eq!(m.name(), "on_tick");
        assert_eq!(m.arity(), 2);
        assert_eq!(m.declaring_type(), owner);
        assert_eq!(m.return_type(), &primitives::boolean());
        assert_eq!(format!("{}", m), "on_tick(int32, float64) -> bool");
    }

    #[test]
    fn field_desc_identity() {
        let owner = TypeKey::from_name("Stats");
        let f1 = FieldDesc::new(owner, "count", primitives::int64());
        let f2 = FieldDesc::new(owner, "count", primitives::int64());
        assert_eq!(f1, f2);
        assert_eq!(format!("{}", f1), "count: int64");
    }
}
