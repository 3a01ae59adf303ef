//! Random vertices in a spherical shell.
//!
//! The polar angle defaults to `[0, π/2]`: with the default window every
//! vertex lies in the `z >= 0` hemisphere. Use [`SpherePointSampler::with_theta_range`]
//! to cover the full sphere.
use std::f64::consts::{FRAC_PI_2, TAU};

use glam::{DMat3, DVec3};
use rand::RngCore;

use crate::error::{Error, Result};
use crate::geometry::random::{angle, radius, rand01};
use crate::geometry::Placement;
use crate::sampling::{unknown_region, Region, VertexSampling};

const NAME: &str = "SpherePointSampler";

/// Spherical shell sampler.
#[derive(Debug, Clone)]
pub struct SpherePointSampler {
    inner_radius: f64,
    outer_radius: f64,
    start_phi: f64,
    delta_phi: f64,
    cos_start_theta: f64,
    diff_cos_theta: f64,
    placement: Placement,
}

impl SpherePointSampler {
    pub fn new(inner_radius: f64, thickness: f64) -> Self {
        debug_assert!(inner_radius >= 0.0, "inner radius must be >= 0");
        debug_assert!(thickness >= 0.0, "thickness must be >= 0");

        Self {
            inner_radius,
            outer_radius: inner_radius + thickness,
            start_phi: 0.0,
            delta_phi: TAU,
            cos_start_theta: 1.0,
            diff_cos_theta: 1.0,
            placement: Placement::IDENTITY,
        }
        .with_theta_range(0.0, FRAC_PI_2)
    }

    pub fn try_new(inner_radius: f64, thickness: f64) -> Result<Self> {
        if !inner_radius.is_finite() || !thickness.is_finite() || inner_radius < 0.0 || thickness < 0.0
        {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: radius and thickness must be finite and >= 0, got {inner_radius}, {thickness}"
            )));
        }
        Ok(Self::new(inner_radius, thickness))
    }

    /// Azimuth window `[start, start + delta)`.
    pub fn with_phi_range(mut self, start: f64, delta: f64) -> Self {
        self.start_phi = start;
        self.delta_phi = delta;
        self
    }

    /// Polar window `[start, start + delta]`, uniform in solid angle.
    pub fn with_theta_range(mut self, start: f64, delta: f64) -> Self {
        self.cos_start_theta = start.cos();
        self.diff_cos_theta = self.cos_start_theta - (start + delta).cos();
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_rotation(mut self, rotation: DMat3) -> Self {
        self.placement.rotation = Some(rotation);
        self
    }

    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.placement.origin = origin;
        self
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Vertex in the local frame.
    pub fn generate_local(&self, region: Region, rng: &mut dyn RngCore) -> Result<DVec3> {
        let r = match region {
            Region::Center => return Ok(DVec3::ZERO),
            Region::Surface => self.inner_radius,
            // Same annulus draw as the cylinder sampler, kept for compatibility
            // with existing productions.
            Region::Volume => radius(rng, self.inner_radius, self.outer_radius),
            Region::Inside => radius(rng, 0.0, self.inner_radius),
            other => return Err(unknown_region(NAME, other)),
        };
        let phi = angle(rng, self.start_phi, self.delta_phi);
        let theta = self.theta(rng);

        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();
        Ok(DVec3::new(r * sin_t * cos_p, r * sin_t * sin_p, r * cos_t))
    }

    fn theta(&self, rng: &mut dyn RngCore) -> f64 {
        (self.cos_start_theta - rand01(rng) * self.diff_cos_theta)
            .clamp(-1.0, 1.0)
            .acos()
    }
}

impl VertexSampling for SpherePointSampler {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate_vertex(&self, region: Region, rng: &mut dyn RngCore) -> Result<DVec3> {
        match region {
            // CENTER is the local origin and ignores the placement.
            Region::Center => Ok(DVec3::ZERO),
            _ => self
                .generate_local(region, rng)
                .map(|p| self.placement.apply(p)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::sampling::testing::SequenceRng;

    const EPS: f64 = 1e-9;

    #[test]
    fn volume_points_stay_in_the_shell() {
        let mut rng = StdRng::seed_from_u64(21);
        let s = SpherePointSampler::new(10.0, 2.0);
        for _ in 0..2000 {
            let r = s.generate_vertex(Region::Volume, &mut rng).unwrap().length();
            assert!(r >= 10.0 - EPS && r <= 12.0 + EPS);
        }
    }

    #[test]
    fn inside_and_surface_respect_inner_radius() {
        let mut rng = StdRng::seed_from_u64(22);
        let s = SpherePointSampler::new(10.0, 2.0);
        for _ in 0..2000 {
            assert!(s.generate_vertex(Region::Inside, &mut rng).unwrap().length() <= 10.0 + EPS);
            let surf = s.generate_vertex(Region::Surface, &mut rng).unwrap().length();
            assert!((surf - 10.0).abs() < EPS);
        }
    }

    /// The default polar window only covers the upper hemisphere.
    #[test]
    fn default_window_is_the_upper_hemisphere() {
        let mut rng = StdRng::seed_from_u64(23);
        let s = SpherePointSampler::new(5.0, 1.0);
        for region in [Region::Surface, Region::Volume, Region::Inside] {
            for _ in 0..2000 {
                assert!(s.generate_vertex(region, &mut rng).unwrap().z >= -EPS);
            }
        }
    }

    #[test]
    fn full_theta_range_reaches_both_hemispheres() {
        let mut rng = StdRng::seed_from_u64(24);
        let s = SpherePointSampler::new(5.0, 1.0).with_theta_range(0.0, PI);
        let below = (0..4000)
            .filter(|_| s.generate_vertex(Region::Surface, &mut rng).unwrap().z < 0.0)
            .count();
        assert!((below as f64 / 4000.0 - 0.5).abs() < 0.03);
    }

    #[test]
    fn draw_order_is_radius_phi_theta() {
        // r: u = 0 -> inner radius, phi: u = 0.25 -> pi/2, theta: u = 0.5 -> acos(0.5).
        let mut rng = SequenceRng::new(&[0.0, 0.25, 0.5]);
        let s = SpherePointSampler::new(4.0, 1.0);
        let v = s.generate_vertex(Region::Volume, &mut rng).unwrap();
        assert_eq!(rng.draws(), 3);
        let theta = 0.5_f64.acos();
        assert!(v.abs_diff_eq(DVec3::new(0.0, 4.0 * theta.sin(), 4.0 * theta.cos()), 1e-12));
    }

    #[test]
    fn center_and_unknown_regions() {
        let mut rng = StdRng::seed_from_u64(0);
        let s = SpherePointSampler::new(1.0, 1.0).with_origin(DVec3::splat(2.0));
        assert_eq!(s.generate_vertex(Region::Center, &mut rng).unwrap(), DVec3::ZERO);
        // Other regions still go through the placement.
        let surf = s.generate_vertex(Region::Surface, &mut rng).unwrap();
        assert!(((surf - DVec3::splat(2.0)).length() - 1.0).abs() < EPS);
        assert!(matches!(
            s.generate_vertex(Region::OuterSurface, &mut rng),
            Err(Error::UnknownRegion { sampler: NAME, .. })
        ));
    }

    #[test]
    fn placement_composes_with_local_sampling() {
        let rotation = DMat3::from_rotation_x(PI);
        let s = SpherePointSampler::new(3.0, 0.5);
        let flipped = s.clone().with_rotation(rotation);
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let p = s.generate_vertex(Region::Volume, &mut a).unwrap();
            let q = flipped.generate_vertex(Region::Volume, &mut b).unwrap();
            assert!(q.abs_diff_eq(rotation * p, 1e-12));
            assert!(q.z <= EPS);
        }
    }
}
