//! # SceneKit Benchmarks
//!
//! Throughput of the round-trip stages against the in-memory scene:
//!
//! | Stage | What is measured |
//! |-------|------------------|
//! | create | record -> live satellite or facility |
//! | describe | live object -> tagged readings |
//! | normalize | readings -> replayable record |
//! | snapshot | full scene -> normalized records |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::{ComponentKind, ComponentRecord, ConstraintSpec, OrbitSpec, PositionSpec};
use sk_01_constraint_registry::ConstraintRegistry;
use sk_02_components::{simulated_context, Component};
use sk_03_component_factory::{ComponentFactory, ComponentRegistry};
use sk_05_exporter::{normalize, ExportOptions, SceneExporter};
use std::sync::Arc;

// ============================================================================
// FIXTURES
// ============================================================================

fn satellite(index: usize) -> ComponentRecord {
    ComponentRecord::satellite(format!("Sat{index}"))
        .with_orbit(OrbitSpec {
            semi_major_axis: Some(7000.0 + index as f64),
            eccentricity: Some(0.001),
            inclination: Some((index % 180) as f64),
            raan: Some((index * 7 % 360) as f64),
            arg_of_perigee: Some(0.0),
            true_anomaly: Some((index * 13 % 360) as f64),
        })
        .with_constraint(ConstraintSpec::named("Range").with_max(40_000.0))
}

fn facility(index: usize) -> ComponentRecord {
    ComponentRecord::facility(format!("Site{index}"))
        .with_position(PositionSpec::new(
            (index % 180) as f64 - 90.0,
            (index % 360) as f64,
            0.1,
        ))
        .with_constraint(ConstraintSpec::named("ElevationAngle").with_min(10.0))
}

fn populated_factory(count: usize) -> ComponentFactory {
    let (context, _scene) = simulated_context(ConstraintRegistry::builtin());
    let mut factory = ComponentFactory::new(context, Arc::new(ComponentRegistry::builtin()));
    let records: Vec<ComponentRecord> = (0..count)
        .flat_map(|i| [satellite(i), facility(i)])
        .collect();
    factory.create_many(&records);
    factory
}

// ============================================================================
// CREATE
// ============================================================================

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");

    group.bench_function("satellite", |b| {
        b.iter_with_setup(
            || simulated_context(ConstraintRegistry::builtin()),
            |(context, _scene)| {
                let mut component = Component::satellite(context, "Sat0");
                black_box(component.create(&satellite(0)).is_ok())
            },
        )
    });

    group.bench_function("facility", |b| {
        b.iter_with_setup(
            || simulated_context(ConstraintRegistry::builtin()),
            |(context, _scene)| {
                let mut component = Component::facility(context, "Site0");
                black_box(component.create(&facility(0)).is_ok())
            },
        )
    });

    for size in [10usize, 100] {
        let records: Vec<ComponentRecord> = (0..size).map(satellite).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("batch", size), &records, |b, records| {
            b.iter_with_setup(
                || {
                    let (context, _scene) = simulated_context(ConstraintRegistry::builtin());
                    ComponentFactory::new(context, Arc::new(ComponentRegistry::builtin()))
                },
                |mut factory| black_box(factory.create_many(records).created.len()),
            )
        });
    }

    group.finish();
}

// ============================================================================
// DESCRIBE / NORMALIZE
// ============================================================================

fn bench_describe_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("describe-normalize");
    let factory = populated_factory(1);
    let components = factory.created_components();

    for component in components {
        let label = match component.kind() {
            ComponentKind::Satellite => "satellite",
            ComponentKind::Facility => "facility",
        };
        group.bench_function(BenchmarkId::new("describe", label), |b| {
            b.iter(|| black_box(component.describe().is_ok()))
        });

        let description = match component.describe() {
            Ok(description) => description,
            Err(_) => continue,
        };
        group.bench_function(BenchmarkId::new("normalize", label), |b| {
            b.iter(|| black_box(normalize(black_box(&description))))
        });
    }

    group.finish();
}

// ============================================================================
// SNAPSHOT
// ============================================================================

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for size in [10usize, 100] {
        let factory = populated_factory(size);
        let exporter = SceneExporter::new(
            factory.context().clone(),
            Arc::new(ComponentRegistry::builtin()),
        )
        .with_options(ExportOptions::flat());

        group.throughput(Throughput::Elements(2 * size as u64));
        group.bench_with_input(BenchmarkId::new("scene", 2 * size), &exporter, |b, exporter| {
            b.iter(|| black_box(exporter.snapshot().map(|s| s.components.len())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_create, bench_describe_normalize, bench_snapshot);
criterion_main!(benches);
