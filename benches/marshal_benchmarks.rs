//! Performance benchmarks for converter resolution and boundary crossings.
//!
//! Measures the per-crossing overhead of the marshalling layer:
//! - Registry lookup (registered vs unregistered types)
//! - Full function-result crossing through a registered converter
//! - Intrinsic fallback crossing

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};

use seam::prelude::*;

fn registered_marshaller() -> Marshaller {
    let mut mapper = DefaultTypeMapper::new();
    mapper.add_from_native_converter(
        &primitives::int32(),
        FromNativeFn::new(NativeType::I32, |value, _ctx| match value {
            NativeValue::I32(v) => Ok(ManagedValue::Int(v as i64)),
            other => Err(ConversionError::TypeMismatch {
                expected: "i32",
                actual: other.type_name(),
            }),
        }),
    );
    Marshaller::new(Arc::new(mapper))
}

fn registry_lookup(c: &mut Criterion) {
    let marshaller = registered_marshaller();
    let int32 = primitives::int32();
    let unmapped = ManagedType::named("Color");

    c.bench_function("registry/lookup_hit", |b| {
        b.iter(|| marshaller.mapper().from_native_converter(black_box(&int32)))
    });
    c.bench_function("registry/lookup_miss", |b| {
        b.iter(|| marshaller.mapper().from_native_converter(black_box(&unmapped)))
    });
}

fn function_result_crossing(c: &mut Criterion) {
    let marshaller = registered_marshaller();
    let int32 = primitives::int32();
    let function = FunctionHandle::from_symbol("add");
    let args = [ManagedValue::Int(2), ManagedValue::Int(3)];

    c.bench_function("crossing/function_result_converter", |b| {
        b.iter(|| {
            marshaller
                .function_result(black_box(NativeValue::I32(5)), &int32, function, &args)
                .unwrap()
        })
    });

    let plain = Marshaller::with_defaults();
    c.bench_function("crossing/function_result_intrinsic", |b| {
        b.iter(|| {
            plain
                .function_result(black_box(NativeValue::I32(5)), &int32, function, &args)
                .unwrap()
        })
    });
}

fn type_key_hashing(c: &mut Criterion) {
    c.bench_function("type_key/from_name", |b| {
        b.iter(|| TypeKey::from_name(black_box("gui::Window")))
    });
}

criterion_group!(
    benches,
    registry_lookup,
    function_result_crossing,
    type_key_hashing
);
criterion_main!(benches);
