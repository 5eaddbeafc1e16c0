/// The built-in teapot point cloud.
///
/// Body and lid are surfaces of revolution around +Y, spout and handle are
/// tubes swept along curves in the XY plane. All curves are cubic Béziers
/// given as control points, in the proportions of the Newell teapot: base at
/// `y = 0`, knob at `y = 3.15`, spout tip near `x = 3.2`, handle out to
/// `x = -3`.
use std::f64::consts::TAU;

use nalgebra::Vector2;

use crate::geometry::{point, Vec4};

type Curve = [(f64, f64); 4];

/// Body profile as `(radius, height)`, rim first
const BODY: [Curve; 4] = [
    [(1.4, 2.25), (1.3375, 2.38125), (1.4375, 2.38125), (1.5, 2.25)],
    [(1.5, 2.25), (1.75, 1.725), (2.0, 1.2), (2.0, 0.75)],
    [(2.0, 0.75), (2.0, 0.3), (1.5, 0.075), (1.5, 0.0)],
    [(1.5, 0.0), (1.0, 0.0), (0.5, 0.0), (0.0, 0.0)],
];

/// Lid profile as `(radius, height)`, knob first
const LID: [Curve; 2] = [
    [(0.0, 3.15), (0.8, 3.15), (0.0, 2.7), (0.2, 2.55)],
    [(0.2, 2.55), (0.4, 2.4), (1.3, 2.4), (1.3, 2.25)],
];

/// Spout centerline `(x, y)` and its radius at the base and the tip
const SPOUT: Curve = [(1.7, 0.8), (2.6, 0.8), (2.3, 1.9), (3.1, 2.35)];
const SPOUT_RADIUS: (f64, f64) = (0.4, 0.15);

/// Handle centerline `(x, y)`, top joint first
const HANDLE: [Curve; 2] = [
    [(-1.5, 2.1), (-2.5, 2.1), (-3.0, 2.1), (-3.0, 1.65)],
    [(-3.0, 1.65), (-3.0, 1.2), (-2.65, 0.9), (-1.9, 0.6)],
];
const HANDLE_RADIUS: f64 = 0.12;

const PROFILE_STEPS: usize = 10;
const REVOLVE_STEPS: usize = 32;
const SWEEP_STEPS: usize = 24;
const RING_STEPS: usize = 10;

/// Generate every vertex of the teapot
pub fn vertices() -> Vec<Vec4> {
    let mut out = Vec::new();

    for curve in BODY.iter().chain(LID.iter()) {
        revolve(curve, &mut out);
    }

    let (base, tip) = SPOUT_RADIUS;
    sweep(&SPOUT, |t| base + (tip - base) * t, &mut out);

    for curve in &HANDLE {
        sweep(curve, |_| HANDLE_RADIUS, &mut out);
    }

    out
}

fn bezier(curve: &Curve, t: f64) -> Vector2<f64> {
    let [p0, p1, p2, p3] = curve.map(|(x, y)| Vector2::new(x, y));
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

fn bezier_tangent(curve: &Curve, t: f64) -> Vector2<f64> {
    let [p0, p1, p2, p3] = curve.map(|(x, y)| Vector2::new(x, y));
    let u = 1.0 - t;
    (p1 - p0) * (3.0 * u * u) + (p2 - p1) * (6.0 * u * t) + (p3 - p2) * (3.0 * t * t)
}

/// Spin a `(radius, height)` profile curve around the Y axis
fn revolve(profile: &Curve, out: &mut Vec<Vec4>) {
    for i in 0..PROFILE_STEPS {
        let p = bezier(profile, i as f64 / PROFILE_STEPS as f64);
        let (radius, height) = (p.x, p.y);

        // The axis itself is a single point.
        if radius.abs() < 1e-9 {
            out.push(point(0.0, height, 0.0));
            continue;
        }

        for j in 0..REVOLVE_STEPS {
            let (sin, cos) = (TAU * j as f64 / REVOLVE_STEPS as f64).sin_cos();
            out.push(point(radius * cos, height, radius * sin));
        }
    }
}

/// Sweep a circle along a centerline lying in the XY plane
fn sweep(centerline: &Curve, radius: impl Fn(f64) -> f64, out: &mut Vec<Vec4>) {
    for i in 0..=SWEEP_STEPS {
        let t = i as f64 / SWEEP_STEPS as f64;
        let center = bezier(centerline, t);
        let tangent = bezier_tangent(centerline, t);
        let Some(tangent) = tangent.try_normalize(1e-12) else {
            continue;
        };

        // In-plane normal; the other ring axis is +Z.
        let normal = Vector2::new(-tangent.y, tangent.x);
        let r = radius(t);

        for j in 0..RING_STEPS {
            let (sin, cos) = (TAU * j as f64 / RING_STEPS as f64).sin_cos();
            out.push(point(
                center.x + r * cos * normal.x,
                center.y + r * cos * normal.y,
                r * sin,
            ));
        }
    }
}
