//! Deterministic hash-based identity for managed types and members.
//!
//! This module provides [`TypeKey`], a 64-bit hash that identifies managed
//! types, native function symbols, methods, and structure fields. Keys are
//! computed deterministically from names and signatures, enabling:
//!
//! - Registry lookups with no registration-order dependencies
//! - Forward references (a key can be computed before anything is registered)
//! - Structural equality for member descriptors (same signature = same key)
//!
//! # Hash Computation
//!
//! Uses XXHash64 with domain-specific mixing constants so that a type named
//! `count`, a function named `count`, and a field named `count` never collide.
//!
//! # Examples
//!
//! ```
//! use seam_core::TypeKey;
//!
//! let a = TypeKey::from_name("int32");
//! let b = TypeKey::from_name("int32");
//! assert_eq!(a, b);  // Deterministic
//!
//! let m1 = TypeKey::from_method(a, "resize", &[TypeKey::from_name("int32")]);
//! let m2 = TypeKey::from_method(a, "resize", &[TypeKey::from_name("int64")]);
//! assert_ne!(m1, m2);  // Different signatures = different keys
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for key computation.
///
/// Each member kind gets its own domain marker so that identically named
/// entities of different kinds produce distinct keys.
pub mod key_constants {
    /// Separator constant used to chain signature components.
    pub const SEP: u64 = 0x6d1c3f9a84e2b075;

    /// Domain marker for managed type keys.
    pub const TYPE: u64 = 0x51c2a7e08b4d39f6;

    /// Domain marker for native function symbols.
    pub const FUNCTION: u64 = 0x8e4f6a1d27c5b083;

    /// Domain marker for method descriptors.
    pub const METHOD: u64 = 0xa36b9e5c41d8f217;

    /// Domain marker for structure field descriptors.
    pub const FIELD: u64 = 0xc75d20b8f3a1964e;

    /// Parameter position mixing constants.
    /// Each position gets a unique constant so that parameter order matters.
    pub const PARAM_MARKERS: [u64; 8] = [
        0xb4c1d2e3f6a59788,
        0x1f83d9abfb41bd6b,
        0x5be0cd19137e2179,
        0x243f6a8885a308d3,
        0x13198a2e03707344,
        0xa4093822299f31d0,
        0x082efa98ec4e6c89,
        0x452821e664738910,
    ];
}

/// A deterministic 64-bit key identifying a managed type, function, method,
/// or field.
///
/// The same input always produces the same key, so keys can be computed
/// anywhere without consulting a registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeKey(pub u64);

impl TypeKey {
    /// Empty/invalid key constant.
    pub const EMPTY: TypeKey = TypeKey(0);

    /// Create a type key from a managed type name.
    ///
    /// # Examples
    ///
    /// ```
    /// use seam_core::TypeKey;
    ///
    /// let k1 = TypeKey::from_name("Window");
    /// let k2 = TypeKey::from_name("Window");
    /// assert_eq!(k1, k2);
    /// ```
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeKey(key_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a key for a native function symbol.
    ///
    /// Functions are keyed by symbol name alone; the foreign side has no
    /// overloading.
    #[inline]
    pub fn from_function(symbol: &str) -> Self {
        TypeKey(key_constants::FUNCTION ^ xxh64(symbol.as_bytes(), 0))
    }

    /// Create a method key from declaring type, method name, and parameter
    /// type keys.
    ///
    /// Parameter order matters - `(int32, float64)` produces a different key
    /// than `(float64, int32)`.
    #[inline]
    pub fn from_method(declaring: TypeKey, name: &str, param_keys: &[TypeKey]) -> Self {
        let mut key = key_constants::METHOD ^ declaring.0 ^ xxh64(name.as_bytes(), 0);
        for (i, param) in param_keys.iter().enumerate() {
            let marker = key_constants::PARAM_MARKERS
                .get(i)
                .copied()
                .unwrap_or_else(|| key_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
            // wrapping_mul makes parameter order matter (not commutative like XOR)
            key = key.wrapping_mul(key_constants::SEP).wrapping_add(marker ^ param.0);
        }
        TypeKey(key)
    }

    /// Create a field key from declaring type and field name.
    #[inline]
    pub fn from_field(declaring: TypeKey, name: &str) -> Self {
        TypeKey(key_constants::FIELD ^ declaring.0 ^ xxh64(name.as_bytes(), 0))
    }

    /// Check if this is an empty/invalid key.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({:#018x})", self.0)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Well-known constant keys for the built-in managed types.
///
/// These are pre-computed from `TypeKey::from_name()` so they can be used in
/// `match` patterns and const contexts. A test below verifies each value
/// against the computed form.
pub mod keys {
    use super::TypeKey;

    /// Key for the `void` type.
    pub const VOID: TypeKey = TypeKey(0x9addce2b6dd87560);

    /// Key for the `bool` type.
    pub const BOOL: TypeKey = TypeKey(0x606238f27dcc654b);

    /// Key for the `int8` type.
    pub const INT8: TypeKey = TypeKey(0x552aae4623c6bf02);

    /// Key for the `int16` type.
    pub const INT16: TypeKey = TypeKey(0xebc0089f34c84d9f);

    /// Key for the `int32` type.
    pub const INT32: TypeKey = TypeKey(0xb18291c3d83c5ade);

    /// Key for the `int64` type.
    pub const INT64: TypeKey = TypeKey(0x0302e25b44bbe5ae);

    /// Key for the `uint8` type.
    pub const UINT8: TypeKey = TypeKey(0x70e59a677cdb6b9c);

    /// Key for the `uint16` type.
    pub const UINT16: TypeKey = TypeKey(0x58f3df896f4452f5);

    /// Key for the `uint32` type.
    pub const UINT32: TypeKey = TypeKey(0x8053f040c3029d57);

    /// Key for the `uint64` type.
    pub const UINT64: TypeKey = TypeKey(0x4cd4ef87cefb7e57);

    /// Key for the `float32` type.
    pub const FLOAT32: TypeKey = TypeKey(0x6c8a40a6653a6881);

    /// Key for the `float64` type.
    pub const FLOAT64: TypeKey = TypeKey(0x3cc620d8039092b5);

    /// Key for the `string` type.
    pub const STRING: TypeKey = TypeKey(0x04e3e8e70b48a5f2);

    /// Key for the `pointer` type.
    pub const POINTER: TypeKey = TypeKey(0xc2e2169cace88833);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_key_determinism() {
        let k1 = TypeKey::from_name("int32");
        let k2 = TypeKey::from_name("int32");
        assert_eq!(k1, k2);

        let k3 = TypeKey::from_name("gui::Window");
        let k4 = TypeKey::from_name("gui::Window");
        assert_eq!(k3, k4);
    }

    #[test]
    fn type_key_uniqueness() {
        let int_key = TypeKey::from_name("int32");
        let float_key = TypeKey::from_name("float64");
        let string_key = TypeKey::from_name("string");

        assert_ne!(int_key, float_key);
        assert_ne!(int_key, string_key);
        assert_ne!(float_key, string_key);
    }

    #[test]
    fn domain_separation() {
        // A type, a function, a method and a field with the same name must
        // all produce distinct keys.
        let ty = TypeKey::from_name("count");
        let func = TypeKey::from_function("count");
        let method = TypeKey::from_method(ty, "count", &[]);
        let field = TypeKey::from_field(ty, "count");

        assert_ne!(ty, func);
        assert_ne!(ty, method);
        assert_ne!(ty, field);
        assert_ne!(func, method);
        assert_ne!(func, field);
        assert_ne!(method, field);
    }

    #[test]
    fn method_key_parameter_order_matters() {
        let declaring = TypeKey::from_name("Widget");
        let int_key = TypeKey::from_name("int32");
        let float_key = TypeKey::from_name("float64");

        let m1 = TypeKey::from_method(declaring, "configure", &[int_key, float_key]);
        let m2 = TypeKey::from_method(declaring, "configure", &[float_key, int_key]);
        assert_ne!(m1, m2);
    }

    #[test]
    fn method_key_includes_declaring_type() {
        let int_key = TypeKey::from_name("int32");
        let widget = TypeKey::from_name("Widget");
        let panel = TypeKey::from_name("Panel");

        let m1 = TypeKey::from_method(widget, "update", &[int_key]);
        let m2 = TypeKey::from_method(panel, "update", &[int_key]);
        assert_ne!(m1, m2);
    }

    #[test]
    fn field_key_includes_declaring_type() {
        let widget = TypeKey::from_name("Widget");
        let panel = TypeKey::from_name("Panel");

        assert_ne!(
            TypeKey::from_field(widget, "count"),
            TypeKey::from_field(panel, "count")
        );
    }

    #[test]
    fn well_known_keys_match_computed() {
        assert_eq!(keys::VOID, TypeKey::from_name("void"));
        assert_eq!(keys::BOOL, TypeKey::from_name("bool"));
        assert_eq!(keys::INT8, TypeKey::from_name("int8"));
        assert_eq!(keys::INT16, TypeKey::from_name("int16"));
        assert_eq!(keys::INT32, TypeKey::from_name("int32"));
        assert_eq!(keys::INT64, TypeKey::from_name("int64"));
        assert_eq!(keys::UINT8, TypeKey::from_name("uint8"));
        assert_eq!(keys::UINT16, TypeKey::from_name("uint16"));
        assert_eq!(keys::UINT32, TypeKey::from_name("uint32"));
        assert_eq!(keys::UINT64, TypeKey::from_name("uint64"));
        assert_eq!(keys::FLOAT32, TypeKey::from_name("float32"));
        assert_eq!(keys::FLOAT64, TypeKey::from_name("float64"));
        assert_eq!(keys::STRING, TypeKey::from_name("string"));
        assert_eq!(keys::POINTER, TypeKey::from_name("pointer"));
    }

    #[test]
    fn empty_key() {
        assert!(TypeKey::EMPTY.is_empty());
        assert!(!TypeKey::from_name("int32").is_empty());
    }

    #[test]
    fn display_format() {
        let key = TypeKey(0x1234);
        assert_eq!(format!("{}", key), "0x0000000000001234");
    }
}
