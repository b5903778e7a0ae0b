// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_manipulate::{Canvas, InteractiveObject, ObjectId, PointerInput, TransformProps};

fn armed_canvas(handle: Point) -> (Canvas, ObjectId) {
    let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 1024.0, 768.0));
    for i in 0..64 {
        let f = f64::from(i);
        canvas.add(InteractiveObject::new(TransformProps::new(
            300.0 + f * 5.0,
            300.0 + f * 3.0,
            50.0,
            50.0,
        )));
    }
    let id = canvas.add(InteractiveObject::new(TransformProps::new(
        0.0, 0.0, 100.0, 100.0,
    )));
    canvas.set_active_object(id);
    canvas.on_pointer_down(&PointerInput::mouse(handle));
    canvas.take_events();
    (canvas, id)
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("gestures/move");
    let path: Vec<PointerInput> = (0..256)
        .map(|i| {
            let t = f64::from(i);
            PointerInput::mouse(Point::new(100.0 + t * 0.5, 100.0 + (t * 0.1).sin() * 40.0))
        })
        .collect();
    for (name, handle) in [
        ("scale_corner", Point::new(100.0, 100.0)),
        ("scale_side", Point::new(100.0, 50.0)),
        ("rotate", Point::new(50.0, -40.0)),
        ("drag", Point::new(50.0, 50.0)),
    ] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || armed_canvas(handle),
                |(mut canvas, id)| {
                    for input in &path {
                        canvas.on_pointer_move(input);
                    }
                    black_box(canvas.drain_events().count());
                    black_box(canvas.get(id).map(|o| *o.props()));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_hover(c: &mut Criterion) {
    let (mut canvas, _) = armed_canvas(Point::new(900.0, 700.0));
    let probe = PointerInput::mouse(Point::new(420.0, 400.0));
    c.bench_function("gestures/hover", |b| {
        b.iter(|| {
            canvas.on_pointer_move(black_box(&probe));
            canvas.drain_events().count()
        });
    });
}

criterion_group!(benches, bench_moves, bench_hover);
criterion_main!(benches);
