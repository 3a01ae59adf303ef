//! Random draws shared by the shape samplers.
//!
//! Every helper consumes uniform variates from the caller's RNG in a fixed
//! order, so a seeded stream reproduces the same vertices.
use std::f64::consts::TAU;

use glam::DVec3;
use rand::RngCore;

const UNIT_53: f64 = 1.0 / ((1u64 << 53) as f64);

/// Generate a random float in the range [0, 1).
#[inline]
pub fn rand01(rng: &mut dyn RngCore) -> f64 {
    ((rng.next_u64() >> 11) as f64) * UNIT_53
}

/// A coordinate of width `full_length` centred on `origin`.
#[inline]
pub fn length(rng: &mut dyn RngCore, origin: f64, full_length: f64) -> f64 {
    origin + (rand01(rng) - 0.5) * full_length
}

/// A coordinate in `[-half, half)`.
#[inline]
pub fn symmetric(rng: &mut dyn RngCore, half: f64) -> f64 {
    (rand01(rng) * 2.0 - 1.0) * half
}

/// Radius whose induced points are uniform in area over the annulus `[inner, outer]`.
#[inline]
pub fn radius(rng: &mut dyn RngCore, inner: f64, outer: f64) -> f64 {
    let u = rand01(rng);
    ((1.0 - u) * inner * inner + u * outer * outer).sqrt()
}

/// Angle in `[start, start + span)`.
#[inline]
pub fn angle(rng: &mut dyn RngCore, start: f64, span: f64) -> f64 {
    start + rand01(rng) * span
}

/// Uniform value in `[min, max)`. Degenerate ranges return `min` without drawing.
pub fn uniform_in_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    if max == min {
        min
    } else {
        rand01(rng) * (max - min) + min
    }
}

/// Unit vector with `cos(theta)` uniform in `[cos_theta_min, cos_theta_max)` and
/// `phi` uniform in `[phi_min, phi_max)`.
pub fn random_direction_in_range(
    rng: &mut dyn RngCore,
    cos_theta_min: f64,
    cos_theta_max: f64,
    phi_min: f64,
    phi_max: f64,
) -> DVec3 {
    let cos_theta = uniform_in_range(rng, cos_theta_min, cos_theta_max);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = uniform_in_range(rng, phi_min, phi_max);

    DVec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta).normalize()
}

/// Isotropic unit vector.
pub fn isotropic_direction(rng: &mut dyn RngCore) -> DVec3 {
    random_direction_in_range(rng, -1.0, 1.0, 0.0, TAU)
}
