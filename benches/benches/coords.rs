// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Point};
use understory_affine::{ComposeOptions, compose, invert, qr_decompose};
use understory_manipulate::{InteractiveObject, TransformProps};

fn object(i: usize) -> InteractiveObject {
    let f = i as f64;
    let mut props = TransformProps::new(f * 3.0, f * 2.0, 40.0 + f % 17.0, 30.0 + f % 11.0);
    props.angle = (f * 7.0) % 360.0;
    props.skew_x = f % 13.0;
    props.scale_x = 1.0 + (f % 5.0) * 0.25;
    let mut object = InteractiveObject::new(props);
    object.set_viewport_transform(Affine::scale(1.5));
    object
}

fn bench_set_coords(c: &mut Criterion) {
    let mut group = c.benchmark_group("coords/set_coords");
    for len in [16usize, 256, 4_096] {
        let mut objects: Vec<_> = (0..len).map(object).collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("with_controls", len), &len, |b, _| {
            b.iter(|| {
                for o in &mut objects {
                    o.set_coords(false);
                }
                black_box(&objects);
            });
        });
        group.bench_with_input(BenchmarkId::new("skip_controls", len), &len, |b, _| {
            b.iter(|| {
                for o in &mut objects {
                    o.set_coords(true);
                }
                black_box(&objects);
            });
        });
    }
    group.finish();
}

fn bench_hit_testing(c: &mut Criterion) {
    let mut group = c.benchmark_group("coords/hit");
    let mut target = object(3);
    target.set_coords(false);
    let probes: Vec<Point> = (0..64)
        .map(|i| Point::new(f64::from(i) * 4.0, f64::from(i % 8) * 12.0))
        .collect();
    group.bench_function("contains_point", |b| {
        b.iter(|| {
            probes
                .iter()
                .filter(|p| target.contains_point(black_box(**p)))
                .count()
        });
    });
    group.bench_function("find_target_corner", |b| {
        b.iter(|| {
            probes
                .iter()
                .filter_map(|p| target.find_target_corner(black_box(*p), false, true))
                .count()
        });
    });
    group.finish();
}

fn bench_matrix(c: &mut Criterion) {
    let options = ComposeOptions {
        translate_x: 120.0,
        translate_y: -35.0,
        angle: 33.0,
        scale_x: 2.0,
        scale_y: 0.75,
        skew_x: 12.0,
        skew_y: 0.0,
        flip_x: false,
        flip_y: true,
    };
    c.bench_function("affine/compose", |b| b.iter(|| compose(black_box(&options))));
    let m = compose(&options);
    c.bench_function("affine/qr_decompose", |b| b.iter(|| qr_decompose(black_box(m))));
    c.bench_function("affine/invert", |b| b.iter(|| invert(black_box(m))));
}

criterion_group!(benches, bench_set_coords, bench_hit_testing, bench_matrix);
criterion_main!(benches);
