//! Type-mapping registry.
//!
//! This module provides [`TypeMapper`], the two-method lookup surface every
//! boundary-crossing call site queries, and [`DefaultTypeMapper`], the
//! standard map-backed implementation. Lookups are total: absence of a
//! mapping is not an error, it signals "use the platform default conversion
//! for this type".
//!
//! # Thread Safety
//!
//! A mapper is process-wide shared state queried concurrently from arbitrary
//! threads (native callbacks may arrive on native-spawned threads). The
//! typical usage pattern:
//!
//! - **Registration phase**: converters are installed single-threaded during
//!   setup, before the first boundary crossing that depends on them.
//! - **Crossing phase**: the mapper is shared behind `Arc<dyn TypeMapper>`
//!   and only read.
//!
//! Registration takes `&mut self` while lookup takes `&self`, so the
//! borrow checker already rules out a registration racing a lookup; callers
//! that must mutate after sharing wrap the mapper in their own lock.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use seam_core::{FromNativeConverter, ManagedType, ToNativeConverter, TypeKey};

/// Resolves the converter pair applicable to a managed type.
///
/// Both lookups are pure: no conversion occurs inside the registry, and two
/// consecutive lookups for the same type with no intervening registration
/// return the same converter (`Arc::ptr_eq` holds).
pub trait TypeMapper: Send + Sync {
    /// The converter that turns native values into the given managed type,
    /// if one is registered.
    fn from_native_converter(&self, ty: &ManagedType) -> Option<Arc<dyn FromNativeConverter>>;

    /// The converter that turns values of the given managed type into native
    /// form, if one is registered.
    fn to_native_converter(&self, ty: &ManagedType) -> Option<Arc<dyn ToNativeConverter>>;
}

/// Map-backed [`TypeMapper`] keyed by managed type identity.
///
/// Registering a converter for an already-mapped type replaces the previous
/// mapping.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use seam_core::{FromNativeFn, ManagedValue, NativeType, NativeValue, primitives};
/// use seam_registry::{DefaultTypeMapper, TypeMapper};
///
/// let mut mapper = DefaultTypeMapper::new();
/// mapper.add_from_native_converter(
///     &primitives::boolean(),
///     FromNativeFn::new(NativeType::I32, |value, _ctx| match value {
///         NativeValue::I32(v) => Ok(ManagedValue::Bool(v != 0)),
///         other => Err(seam_core::ConversionError::TypeMismatch {
///             expected: "i32",
///             actual: other.type_name(),
///         }),
///     }),
/// );
///
/// assert!(mapper.from_native_converter(&primitives::boolean()).is_some());
/// assert!(mapper.from_native_converter(&primitives::int32()).is_none());
/// ```
#[derive(Default)]
pub struct DefaultTypeMapper {
    from_native: FxHashMap<TypeKey, Arc<dyn FromNativeConverter>>,
    to_native: FxHashMap<TypeKey, Arc<dyn ToNativeConverter>>,
}

impl DefaultTypeMapper {
    /// Create a new empty mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a converter from native values into the given managed type.
    pub fn add_from_native_converter(
        &mut self,
        ty: &ManagedType,
        converter: impl FromNativeConverter + 'static,
    ) {
        self.from_native.insert(ty.key(), Arc::new(converter));
    }

    /// Register a converter from the given managed type into native form.
    pub fn add_to_native_converter(
        &mut self,
        ty: &ManagedType,
        converter: impl ToNativeConverter + 'static,
    ) {
        self.to_native.insert(ty.key(), Arc::new(converter));
    }

    /// Register a bidirectional converter for both directions at once.
    ///
    /// The same instance serves both lookups.
    pub fn add_type_converter<C>(&mut self, ty: &ManagedType, converter: Arc<C>)
    where
        C: FromNativeConverter + ToNativeConverter + 'static,
    {
        self.from_native.insert(ty.key(), converter.clone());
        self.to_native.insert(ty.key(), converter);
    }

    /// Remove any converters registered for the given managed type.
    pub fn remove(&mut self, ty: &ManagedType) {
        self.from_native.remove(&ty.key());
        self.to_native.remove(&ty.key());
    }

    /// Number of managed types with at least one converter registered.
    pub fn len(&self) -> usize {
        let mut types: Vec<TypeKey> = self.from_native.keys().copied().collect();
        types.extend(self.to_native.keys().copied());
        types.sort_unstable();
        types.dedup();
        types.len()
    }

    /// Check whether no converters are registered.
    pub fn is_empty(&self) -> bool {
        self.from_native.is_empty() && self.to_native.is_empty()
    }
}

impl TypeMapper for DefaultTypeMapper {
    fn from_native_converter(&self, ty: &ManagedType) -> Option<Arc<dyn FromNativeConverter>> {
        self.from_native.get(&ty.key()).cloned()
    }

    fn to_native_converter(&self, ty: &ManagedType) -> Option<Arc<dyn ToNativeConverter>> {
        self.to_native.get(&ty.key()).cloned()
    }
}

/// Ordered chain of mappers; the first mapper with a mapping wins.
///
/// This is the composition hook for embedders that layer per-interface or
/// per-structure overrides over a process-wide default: push the most
/// specific mapper first and the default last.
#[derive(Default)]
pub struct CompositeTypeMapper {
    mappers: Vec<Arc<dyn TypeMapper>>,
}

impl CompositeTypeMapper {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mapper to the end of the chain (lowest precedence so far).
    pub fn push(&mut self, mapper: Arc<dyn TypeMapper>) {
        self.mappers.push(mapper);
    }

    /// Number of mappers in the chain.
    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    /// Check whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }
}

impl TypeMapper for CompositeTypeMapper {
    fn from_native_converter(&self, ty: &ManagedType) -> Option<Arc<dyn FromNativeConverter>> {
        self.mappers
            .iter()
            .find_map(|m| m.from_native_converter(ty))
    }

    fn to_native_converter(&self, ty: &ManagedType) -> Option<Arc<dyn ToNativeConverter>> {
        self.mappers.iter().find_map(|m| m.to_native_converter(ty))
    }
}
