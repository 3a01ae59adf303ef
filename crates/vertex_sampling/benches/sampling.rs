mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{DMat3, DVec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use vertex_sampling::geometry::random::isotropic_direction;
use vertex_sampling::sampling::{
    BoxPointSampler, CylinderPointSampler, HexagonNavigator, PolygonPointSampler, RayIntersection,
    Region, SpherePointSampler, VertexSampling,
};

fn bench_regions(c: &mut Criterion, group_name: &str, sampler: &dyn VertexSampling, regions: &[Region]) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(common::vertices_throughput(common::BATCH));

    for &region in regions {
        let mut rng = StdRng::seed_from_u64(0x5EED ^ region as u64);
        group.bench_with_input(BenchmarkId::from_parameter(region), &region, |b, &region| {
            b.iter(|| {
                let mut acc = DVec3::ZERO;
                for _ in 0..common::BATCH {
                    if let Ok(p) = sampler.generate_vertex(region, &mut rng) {
                        acc += p;
                    }
                }
                black_box(acc);
            });
        });
    }

    group.finish();
}

fn box_benches(c: &mut Criterion) {
    let sampler = BoxPointSampler::new(10.0, 20.0, 30.0, 5.0)
        .with_rotation(DMat3::from_rotation_y(0.3))
        .with_origin(DVec3::new(1.0, 2.0, 3.0));
    bench_regions(
        c,
        "sampling/box",
        &sampler,
        &[
            Region::Inside,
            Region::InnerSurface,
            Region::OuterSurface,
            Region::WholeVolume,
        ],
    );
}

fn cylinder_benches(c: &mut Criterion) {
    let sampler = CylinderPointSampler::new(200.0, 220.0, 500.0).with_endcap_thickness(10.0);
    bench_regions(
        c,
        "sampling/cylinder",
        &sampler,
        &[
            Region::Inside,
            Region::BodySurface,
            Region::EndcapsVolume,
            Region::WholeVolume,
            Region::WholeSurface,
        ],
    );
}

fn sphere_benches(c: &mut Criterion) {
    let sampler = SpherePointSampler::new(100.0, 10.0);
    bench_regions(
        c,
        "sampling/sphere",
        &sampler,
        &[Region::Inside, Region::Surface, Region::Volume],
    );
}

fn hexagon_benches(c: &mut Criterion) {
    let sampler = HexagonNavigator::new(100.0, 50.0, 5.0);
    bench_regions(c, "sampling/hexagon", &sampler, &[Region::Inside, Region::Plane]);

    let mut group = c.benchmark_group("sampling/hexagon/table");
    for &binning in &[4.0, 2.0, 1.0] {
        let len = sampler.triangle_walk(binning, 0.0).map_or(0, |v| v.len());
        group.throughput(common::vertices_throughput(len));
        group.bench_with_input(BenchmarkId::from_parameter(binning), &binning, |b, &binning| {
            b.iter(|| {
                let table = sampler.vertex_table(binning, 0.0, usize::MAX);
                black_box(table.map(|t| t.count()).unwrap_or(0));
            });
        });
    }
    group.finish();
}

fn polygon_benches(c: &mut Criterion) {
    let sampler = PolygonPointSampler::new(100.0, 110.0, 500.0, 8);
    bench_regions(
        c,
        "sampling/polygon",
        &sampler,
        &[
            Region::Inside,
            Region::Volume,
            Region::InnerSurface,
            Region::OuterSurface,
        ],
    );
}

fn intersect_benches(c: &mut Criterion) {
    let boxed = BoxPointSampler::new(50.0, 50.0, 50.0, 0.0).with_rotation(DMat3::from_rotation_x(0.7));
    let tube = CylinderPointSampler::new(200.0, 220.0, 500.0).with_rotation(DMat3::from_rotation_x(0.7));

    let mut rng = StdRng::seed_from_u64(0x1A7E);
    let directions: Vec<DVec3> = (0..common::BATCH)
        .map(|_| isotropic_direction(&mut rng))
        .collect();

    let mut group = c.benchmark_group("sampling/intersect");
    group.throughput(common::vertices_throughput(directions.len()));

    let solids: [(&str, &dyn RayIntersection); 2] = [("box", &boxed), ("cylinder", &tube)];
    for (name, solid) in solids {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut acc = DVec3::ZERO;
                for &d in &directions {
                    if let Ok(p) = solid.intersect(DVec3::ZERO, d) {
                        acc += p;
                    }
                }
                black_box(acc);
            });
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = box_benches, cylinder_benches, sphere_benches, hexagon_benches, polygon_benches,
        intersect_benches
}
criterion_main!(benches);
