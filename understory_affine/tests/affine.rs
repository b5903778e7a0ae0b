// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Algebraic properties of the matrix helpers.

use kurbo::{Affine, Point};
use understory_affine::{
    ComposeOptions, PointExt, compose, cos_deg, invert, multiply, qr_decompose, sin_deg,
    transform_point,
};

const EPS: f64 = 1e-9;

fn assert_identity(m: Affine) {
    let c = m.as_coeffs();
    let id = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
    for (got, want) in c.iter().zip(id.iter()) {
        assert!((got - want).abs() < EPS, "{c:?} is not the identity");
    }
}

#[test]
fn inverse_times_matrix_is_identity() {
    let samples = [
        Affine::new([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        Affine::new([2.0, 0.0, 0.0, 0.5, 10.0, -20.0]),
        Affine::new([0.0, 1.0, -1.0, 0.0, 3.0, 4.0]),
        Affine::new([1.3, -0.7, 0.2, 2.1, -55.0, 12.5]),
        compose(&ComposeOptions {
            translate_x: 100.0,
            translate_y: -40.0,
            angle: 33.0,
            scale_x: 0.25,
            scale_y: 4.0,
            skew_x: 12.0,
            skew_y: -7.0,
            flip_x: true,
            flip_y: false,
        }),
    ];
    for t in samples {
        assert_identity(multiply(invert(t), t, false));
    }
}

#[test]
fn quadrant_trig_is_exact() {
    for (deg, c, s) in [
        (0.0, 1.0, 0.0),
        (90.0, 0.0, 1.0),
        (180.0, -1.0, 0.0),
        (270.0, 0.0, -1.0),
        (360.0, 1.0, 0.0),
        (-90.0, 0.0, -1.0),
        (-270.0, 0.0, 1.0),
        (720.0, 1.0, 0.0),
    ] {
        assert_eq!(cos_deg(deg), c);
        assert_eq!(sin_deg(deg), s);
    }
}

#[test]
fn decompose_reproduces_compose_without_skew() {
    for angle in [0.0, 15.0, 90.0, 135.0, -60.0] {
        for (sx, sy) in [(1.0, 1.0), (2.0, 0.5), (0.1, 7.0)] {
            let opts = ComposeOptions {
                translate_x: 12.0,
                translate_y: -8.0,
                angle,
                scale_x: sx,
                scale_y: sy,
                ..ComposeOptions::default()
            };
            let d = qr_decompose(compose(&opts));
            assert!((d.angle - angle).abs() < EPS, "angle {angle}: {d:?}");
            assert!((d.scale_x - sx).abs() < EPS);
            assert!((d.scale_y - sy).abs() < EPS);
            assert!((d.translate_x - 12.0).abs() < EPS);
            assert!((d.translate_y + 8.0).abs() < EPS);
            assert!(d.skew_x.abs() < EPS);
            assert_eq!(d.skew_y, 0.0);
        }
    }
}

#[test]
fn decompose_reproduces_horizontal_skew() {
    for angle in [0.0, 30.0, -120.0] {
        for skew_x in [20.0, -35.0, 60.0] {
            let opts = ComposeOptions {
                translate_x: -3.0,
                translate_y: 9.0,
                angle,
                scale_x: 1.5,
                scale_y: 0.75,
                skew_x,
                ..ComposeOptions::default()
            };
            let d = qr_decompose(compose(&opts));
            assert!((d.angle - angle).abs() < EPS, "angle {angle}: {d:?}");
            assert!((d.skew_x - skew_x).abs() < EPS, "skew {skew_x}: {d:?}");
            assert!((d.scale_x - 1.5).abs() < EPS, "{d:?}");
            assert!((d.scale_y - 0.75).abs() < EPS, "{d:?}");
            assert!((d.translate_x + 3.0).abs() < EPS, "{d:?}");
            assert!((d.translate_y - 9.0).abs() < EPS, "{d:?}");
            assert_eq!(d.skew_y, 0.0);
        }
    }
}

#[test]
fn composed_matrix_places_local_origin_at_translation() {
    let m = compose(&ComposeOptions {
        translate_x: 5.0,
        translate_y: 6.0,
        angle: 45.0,
        scale_x: 3.0,
        ..ComposeOptions::default()
    });
    let p = transform_point(Point::ORIGIN, m, false);
    assert!((p.x - 5.0).abs() < EPS && (p.y - 6.0).abs() < EPS);
    let q = Point::new(1.0, 1.0);
    assert_eq!(q.transform_by(m, true), transform_point(q, m, true));
}
