//! Managed type descriptors.
//!
//! A [`ManagedType`] names a type in the managed object model. It is the
//! lookup key for converter resolution: two descriptors are equal when they
//! describe the same type, regardless of how either instance was obtained.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::type_key::{TypeKey, keys};

/// A description of a type in the managed world.
///
/// Carries a human-readable name and a deterministic [`TypeKey`]. Equality
/// and hashing go through the key only, so a `ManagedType` built in one
/// compilation unit matches one built elsewhere for the same type name.
///
/// # Examples
///
/// ```
/// use seam_core::ManagedType;
///
/// let a = ManagedType::named("gui::Window");
/// let b = ManagedType::named("gui::Window");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct ManagedType {
    name: String,
    key: TypeKey,
}

impl ManagedType {
    /// Create a managed type descriptor from its qualified name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = TypeKey::from_name(&name);
        Self { name, key }
    }

    /// The qualified name of the described type.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The identity key of the described type.
    #[inline]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Check whether this is one of the built-in primitive types.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self.key,
            keys::VOID
                | keys::BOOL
                | keys::INT8
                | keys::INT16
                | keys::INT32
                | keys::INT64
                | keys::UINT8
                | keys::UINT16
                | keys::UINT32
                | keys::UINT64
                | keys::FLOAT32
                | keys::FLOAT64
                | keys::STRING
                | keys::POINTER
        )
    }
}

impl PartialEq for ManagedType {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ManagedType {}

impl Hash for ManagedType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for ManagedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Constructors for the built-in managed types.
///
/// These correspond to the keys in [`crate::type_key::keys`].
pub mod primitives {
    use super::ManagedType;

    /// The `void` type.
    pub fn void() -> ManagedType {
        ManagedType::named("void")
    }

    /// The `bool` type.
    pub fn boolean() -> ManagedType {
        ManagedType::named("bool")
    }

    /// The `int8` type.
    pub fn int8() -> ManagedType {
        ManagedType::named("int8")
    }

    /// The `int16` type.
    pub fn int16() -> ManagedType {
        ManagedType::named("int16")
    }

    /// The `int32` type.
    pub fn int32() -> ManagedType {
        ManagedType::named("int32")
    }

    /// The `int64` type.
    pub fn int64() -> ManagedType {
        ManagedType::named("int64")
    }

    /// The `uint8` type.
    pub fn uint8() -> ManagedType {
        ManagedType::named("uint8")
    }

    /// The `uint16` type.
    pub fn uint16() -> ManagedType {
        ManagedType::named("uint16")
    }

    /// The `uint32` type.
    pub fn uint32() -> ManagedType {
        ManagedType::named("uint32")
    }

    /// The `uint64` type.
    pub fn uint64() -> ManagedType {
        ManagedType::named("uint64")
    }

    /// The `float32` type.
    pub fn float32() -> ManagedType {
        ManagedType::named("float32")
    }

    /// The `float64` type.
    pub fn float64() -> ManagedType {
        ManagedType::named("float64")
    }

    /// The `string` type.
    pub fn string() -> ManagedType {
        ManagedType::named("string")
    }

    /// The `pointer` type.
    pub fn pointer() -> ManagedType {
        ManagedType::named("pointer")
    }
}
