//! Type-mapping registry for the `seam` value-marshalling layer.
//!
//! Exposes the [`TypeMapper`] lookup surface, the map-backed
//! [`DefaultTypeMapper`], and [`CompositeTypeMapper`] for layering
//! per-scope overrides over a process-wide default.

mod registry;

pub use registry::{CompositeTypeMapper, DefaultTypeMapper, TypeMapper};
