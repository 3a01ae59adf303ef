//! Random vertices in a cylindrical shell following the Geant4 tube
//! convention: inner and outer radius, half-length and an angular span, plus
//! optional endcaps closing the barrel.
use std::f64::consts::TAU;

use glam::{DMat3, DVec3};
use rand::RngCore;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::random::{angle, length, radius, rand01, symmetric};
use crate::geometry::Placement;
use crate::sampling::{unknown_region, RayIntersection, Region, VertexSampling};

const NAME: &str = "CylinderPointSampler";

/// Cylindrical shell sampler.
#[derive(Debug, Clone)]
pub struct CylinderPointSampler {
    inner_radius: f64,
    outer_radius: f64,
    half_length: f64,
    start_phi: f64,
    delta_phi: f64,
    endcap_thickness: f64,
    body_volume_fraction: f64,
    body_surface_fraction: f64,
    placement: Placement,
}

impl CylinderPointSampler {
    /// Full-azimuth tube without endcaps.
    pub fn new(inner_radius: f64, outer_radius: f64, half_length: f64) -> Self {
        debug_assert!(inner_radius >= 0.0, "inner radius must be >= 0");
        debug_assert!(outer_radius > inner_radius, "outer radius must be > inner radius");
        debug_assert!(half_length > 0.0, "half length must be > 0");

        let mut sampler = Self {
            inner_radius,
            outer_radius,
            half_length,
            start_phi: 0.0,
            delta_phi: TAU,
            endcap_thickness: 0.0,
            body_volume_fraction: 1.0,
            body_surface_fraction: 1.0,
            placement: Placement::IDENTITY,
        };
        sampler.update_fractions();
        sampler
    }

    /// Validated constructor.
    pub fn try_new(inner_radius: f64, outer_radius: f64, half_length: f64) -> Result<Self> {
        let values = [inner_radius, outer_radius, half_length];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: dimensions must be finite, got {values:?}"
            )));
        }
        if inner_radius < 0.0 || outer_radius <= inner_radius {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: radii must satisfy 0 <= inner ({inner_radius}) < outer ({outer_radius})"
            )));
        }
        if half_length <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: half length must be > 0, got {half_length}"
            )));
        }
        Ok(Self::new(inner_radius, outer_radius, half_length))
    }

    /// Restrict the azimuth to `[start, start + delta)`. A zero `delta` means the full turn.
    pub fn with_angular_span(mut self, start: f64, delta: f64) -> Self {
        self.start_phi = start;
        self.delta_phi = if delta == 0.0 { TAU } else { delta };
        self.update_fractions();
        self
    }

    /// Close the barrel with two disks of the given thickness beyond `z = ±L`.
    pub fn with_endcap_thickness(mut self, thickness: f64) -> Self {
        debug_assert!(thickness >= 0.0, "endcap thickness must be >= 0");
        self.endcap_thickness = thickness;
        self.update_fractions();
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

    fn update_fractions(&mut self) {
        let (r_in, r_out, l) = (self.inner_radius, self.outer_radius, self.half_length);
        let sector = 0.5 * self.delta_phi;

        let body_vol = sector * (r_out * r_out - r_in * r_in) * 2.0 * l;
        let caps_vol = 2.0 * sector * r_out * r_out * self.endcap_thickness;
        self.body_volume_fraction = fraction(body_vol, caps_vol);

        let body_surf = self.delta_phi * r_in * 2.0 * l;
        let caps_surf = 2.0 * sector * r_in * r_in;
        self.body_surface_fraction = fraction(body_surf, caps_surf);

        debug!(
            body_volume_fraction = self.body_volume_fraction,
            body_surface_fraction = self.body_surface_fraction,
            "cylinder sampler weights"
        );
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    pub fn endcap_thickness(&self) -> f64 {
        self.endcap_thickness
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Share of the composite volume held by the barrel; the endcaps hold the rest.
    pub fn body_volume_fraction(&self) -> f64 {
        self.body_volume_fraction
    }

    /// Share of the composite inner surface held by the barrel.
    pub fn body_surface_fraction(&self) -> f64 {
        self.body_surface_fraction
    }

    /// Vertex in the local frame.
    pub fn generate_local(&self, region: Region, rng: &mut dyn RngCore) -> Result<DVec3> {
        let point = match region {
            Region::Center => DVec3::ZERO,
            Region::Inside | Region::BodyVolume => self.barrel_volume_point(rng),
            Region::Surface | Region::InnerSurface | Region::BodySurface => {
                self.barrel_surface_point(rng, self.inner_radius)
            }
            Region::OuterSurface => self.barrel_surface_point(rng, self.outer_radius),
            Region::EndcapsVolume => self.endcap_volume_point(rng),
            Region::EndcapsSurface => self.endcap_surface_point(rng),
            Region::Volume | Region::WholeVolume => {
                if rand01(rng) < self.body_volume_fraction {
                    self.barrel_volume_point(rng)
                } else {
                    self.endcap_volume_point(rng)
                }
            }
            Region::WholeSurface => {
                if rand01(rng) < self.body_surface_fraction {
                    self.barrel_surface_point(rng, self.inner_radius)
                } else {
                    self.endcap_surface_point(rng)
                }
            }
            other => return Err(unknown_region(NAME, other)),
        };
        Ok(point)
    }

    fn phi(&self, rng: &mut dyn RngCore) -> f64 {
        angle(rng, self.start_phi, self.delta_phi)
    }

    fn barrel_volume_point(&self, rng: &mut dyn RngCore) -> DVec3 {
        let phi = self.phi(rng);
        let r = radius(rng, self.inner_radius, self.outer_radius);
        let z = symmetric(rng, self.half_length);
        polar(r, phi, z)
    }

    fn barrel_surface_point(&self, rng: &mut dyn RngCore, r: f64) -> DVec3 {
        let phi = self.phi(rng);
        let z = symmetric(rng, self.half_length);
        polar(r, phi, z)
    }

    fn endcap_volume_point(&self, rng: &mut dyn RngCore) -> DVec3 {
        let side = if rand01(rng) < 0.5 { -1.0 } else { 1.0 };
        let phi = self.phi(rng);
        let r = radius(rng, 0.0, self.outer_radius);
        let t = self.endcap_thickness;
        let z = length(rng, side * (self.half_length + 0.5 * t), t);
        polar(r, phi, z)
    }

    fn endcap_surface_point(&self, rng: &mut dyn RngCore) -> DVec3 {
        let side = if rand01(rng) < 0.5 { -1.0 } else { 1.0 };
        let phi = self.phi(rng);
        let r = radius(rng, 0.0, self.inner_radius);
        polar(r, phi, side * self.half_length)
    }
}

fn fraction(part: f64, rest: f64) -> f64 {
    let total = part + rest;
    if total > 0.0 {
        part / total
    } else {
        1.0
    }
}

#[inline]
fn polar(r: f64, phi: f64, z: f64) -> DVec3 {
    let (sin, cos) = phi.sin_cos();
    DVec3::new(r * cos, r * sin, z)
}

impl VertexSampling for CylinderPointSampler {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate_vertex(&self, region: Region, rng: &mut dyn RngCore) -> Result<DVec3> {
        self.generate_local(region, rng)
            .map(|p| self.placement.apply(p))
    }
}

impl RayIntersection for CylinderPointSampler {
    fn intersect(&self, point: DVec3, direction: DVec3) -> Result<DVec3> {
        let p = self.placement.invert(point);
        let d = self.placement.invert_direction(direction);
        let l = self.half_length;

        let mut candidates: Vec<f64> = Vec::with_capacity(3);

        // End-cap planes z = ±L.
        if d.z != 0.0 {
            candidates.push(((l - p.z) / d.z).max((-l - p.z) / d.z));
        }

        // Barrel: |p_xy + t d_xy|^2 = r_in^2.
        let a = d.x * d.x + d.y * d.y;
        if a > 0.0 {
            let r = self.inner_radius;
            let b = 2.0 * (p.x * d.x + p.y * d.y);
            let c = p.x * p.x + p.y * p.y - r * r;
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let sq = disc.sqrt();
                let (t0, t1) = ((-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a));
                candidates.push(if t0 >= 0.0 { t0 } else { t1 });
            }
        }

        let t = candidates
            .into_iter()
            .filter(|t| *t >= 0.0)
            .min_by(f64::total_cmp)
            .ok_or_else(|| Error::DegenerateQuery {
                sampler: NAME,
                reason: format!(
                    "no forward intersection from {point:?} along {direction:?}; point outside or null direction"
                ),
            })?;

        Ok(self.placement.apply(p + t * d))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::geometry::random::isotropic_direction;
    use crate::sampling::testing::SequenceRng;

    const EPS: f64 = 1e-9;

    fn rho(v: DVec3) -> f64 {
        v.truncate().length()
    }

    #[test]
    fn try_new_rejects_inverted_radii() {
        assert!(matches!(
            CylinderPointSampler::try_new(3.0, 2.0, 1.0),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            CylinderPointSampler::try_new(1.0, 2.0, 0.0),
            Err(Error::InvalidConfig(_))
        ));
        assert!(CylinderPointSampler::try_new(0.0, 2.0, 1.0).is_ok());
    }

    #[test]
    fn try_new_rejects_a_shell_without_thickness() {
        assert!(matches!(
            CylinderPointSampler::try_new(2.0, 2.0, 1.0),
            Err(Error::InvalidConfig(_))
        ));
        assert!(CylinderPointSampler::try_new(2.0, 2.0 + 1e-9, 1.0).is_ok());
    }

    #[test]
    fn barrel_volume_points_stay_between_radii() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..20 {
            let min_rad = rand01(&mut rng);
            let max_rad = min_rad + rand01(&mut rng) + 1e-3;
            let half_length = rand01(&mut rng) + 1e-3;
            let s = CylinderPointSampler::new(min_rad, max_rad, half_length);

            for region in [Region::Volume, Region::BodyVolume, Region::Inside] {
                for _ in 0..100 {
                    let v = s.generate_vertex(region, &mut rng).unwrap();
                    let r = rho(v);
                    assert!(r >= min_rad - EPS && r <= max_rad + EPS);
                    assert!(v.z.abs() <= half_length);
                }
            }
        }
    }

    #[test]
    fn surfaces_sit_on_their_radius() {
        let mut rng = StdRng::seed_from_u64(4);
        let s = CylinderPointSampler::new(2.0, 3.0, 5.0);
        for _ in 0..500 {
            let inner = s.generate_vertex(Region::Surface, &mut rng).unwrap();
            assert!((rho(inner) - 2.0).abs() < EPS && inner.z.abs() <= 5.0);
            let outer = s.generate_vertex(Region::OuterSurface, &mut rng).unwrap();
            assert!((rho(outer) - 3.0).abs() < EPS);
            let cap = s.generate_vertex(Region::EndcapsSurface, &mut rng).unwrap();
            assert!(rho(cap) <= 2.0 + EPS && (cap.z.abs() - 5.0).abs() < EPS);
        }
    }

    #[test]
    fn endcap_volume_points_lie_in_the_cap_slabs() {
        let mut rng = StdRng::seed_from_u64(8);
        let s = CylinderPointSampler::new(2.0, 3.0, 5.0).with_endcap_thickness(0.5);
        let mut positive = 0;
        for _ in 0..2000 {
            let v = s.generate_vertex(Region::EndcapsVolume, &mut rng).unwrap();
            assert!(rho(v) <= 3.0 + EPS);
            assert!(v.z.abs() >= 5.0 - EPS && v.z.abs() <= 5.5 + EPS);
            if v.z > 0.0 {
                positive += 1;
            }
        }
        assert!((positive as f64 / 2000.0 - 0.5).abs() < 0.05);
    }

    #[test]
    fn whole_volume_reproduces_body_fraction() {
        let mut rng = StdRng::seed_from_u64(31);
        let s = CylinderPointSampler::new(10.0, 12.0, 20.0).with_endcap_thickness(3.0);
        // Barrel 2*pi/2*(144-100)*40 vs caps 2*pi*144*3: 1760 / (1760 + 864).
        assert!((s.body_volume_fraction() - 1760.0 / 2624.0).abs() < 1e-12);

        let n = 10_000;
        let body = (0..n)
            .map(|_| s.generate_vertex(Region::WholeVolume, &mut rng).unwrap())
            .filter(|v| v.z.abs() <= 20.0)
            .count();
        assert!((body as f64 / n as f64 - s.body_volume_fraction()).abs() < 0.02);
    }

    #[test]
    fn whole_surface_reproduces_body_fraction() {
        let mut rng = StdRng::seed_from_u64(32);
        let s = CylinderPointSampler::new(10.0, 12.0, 20.0);
        // Barrel 2*pi*10*40 vs caps 2*pi*100: 400 / 500.
        assert!((s.body_surface_fraction() - 0.8).abs() < 1e-12);

        let n = 10_000;
        let body = (0..n)
            .map(|_| s.generate_vertex(Region::WholeSurface, &mut rng).unwrap())
            .filter(|v| (rho(*v) - 10.0).abs() < EPS && v.z.abs() < 20.0)
            .count();
        assert!((body as f64 / n as f64 - 0.8).abs() < 0.02);
    }

    #[test]
    fn volume_without_endcaps_is_the_barrel() {
        let s = CylinderPointSampler::new(1.0, 2.0, 3.0);
        assert_eq!(s.body_volume_fraction(), 1.0);
        let mut a = SequenceRng::new(&[0.3, 0.6, 0.9, 0.1]);
        let mut b = SequenceRng::new(&[0.6, 0.9, 0.1]);
        let whole = s.generate_vertex(Region::Volume, &mut a).unwrap();
        let body = s.generate_vertex(Region::BodyVolume, &mut b).unwrap();
        assert_eq!(whole, body);
    }

    #[test]
    fn angular_span_limits_phi() {
        let mut rng = StdRng::seed_from_u64(12);
        let s = CylinderPointSampler::new(1.0, 2.0, 1.0)
            .with_angular_span(0.0, std::f64::consts::FRAC_PI_2);
        for _ in 0..500 {
            let v = s.generate_vertex(Region::Inside, &mut rng).unwrap();
            assert!(v.x >= -EPS && v.y >= -EPS);
        }
        // Span does not change the barrel/endcap balance.
        let full = CylinderPointSampler::new(1.0, 2.0, 1.0).with_endcap_thickness(0.2);
        let quarter = full.clone().with_angular_span(0.0, std::f64::consts::FRAC_PI_2);
        assert!((full.body_volume_fraction() - quarter.body_volume_fraction()).abs() < 1e-12);
    }

    #[test]
    fn unsupported_region_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let s = CylinderPointSampler::new(1.0, 2.0, 3.0);
        assert!(matches!(
            s.generate_vertex(Region::Table, &mut rng),
            Err(Error::UnknownRegion { sampler: NAME, .. })
        ));
        assert!(matches!(
            s.generate_vertex_named("CORNER", &mut rng),
            Err(Error::UnknownRegion { sampler: NAME, .. })
        ));
    }

    #[test]
    fn axis_rays_hit_caps_and_barrel() {
        let s = CylinderPointSampler::new(200.0, 220.0, 500.0);
        let cases = [
            (DVec3::Z, DVec3::new(0.0, 0.0, 500.0)),
            (DVec3::NEG_Z, DVec3::new(0.0, 0.0, -500.0)),
            (DVec3::X, DVec3::new(200.0, 0.0, 0.0)),
            (DVec3::NEG_X, DVec3::new(-200.0, 0.0, 0.0)),
            (DVec3::Y, DVec3::new(0.0, 200.0, 0.0)),
            (DVec3::NEG_Y, DVec3::new(0.0, -200.0, 0.0)),
        ];
        for (dir, expected) in cases {
            let hit = s.intersect(DVec3::ZERO, dir).unwrap();
            assert!(hit.abs_diff_eq(expected, 1e-9), "{dir:?} -> {hit:?}");
        }
    }

    #[test]
    fn oblique_ray_takes_the_nearest_surface() {
        let s = CylinderPointSampler::new(200.0, 220.0, 500.0);
        // Along (1, 0, 1) the barrel (t = 200) comes before the cap (t = 500).
        let dir = DVec3::new(1.0, 0.0, 1.0).normalize();
        let hit = s.intersect(DVec3::ZERO, dir).unwrap();
        assert!(hit.abs_diff_eq(DVec3::new(200.0, 0.0, 200.0), 1e-9));
    }

    #[test]
    fn arbitrary_rays_pass_through_the_start_point() {
        let mut rng = StdRng::seed_from_u64(123);
        let (min_rad, max_rad, half_len) = (200.0, 220.0, 500.0);
        for _ in 0..50 {
            let origin = DVec3::new(
                max_rad * rand01(&mut rng),
                max_rad * rand01(&mut rng),
                half_len * rand01(&mut rng),
            );
            let rotation = DMat3::from_rotation_x(TAU * rand01(&mut rng))
                * DMat3::from_rotation_y(TAU * rand01(&mut rng))
                * DMat3::from_rotation_z(TAU * rand01(&mut rng));
            let s = CylinderPointSampler::new(min_rad, max_rad, half_len)
                .with_angular_span(0.0, TAU)
                .with_rotation(rotation)
                .with_origin(origin);

            // Inside the square inscribed in the cavity section.
            let local = DVec3::new(
                symmetric(&mut rng, min_rad / 2.0_f64.sqrt()),
                symmetric(&mut rng, min_rad / 2.0_f64.sqrt()),
                symmetric(&mut rng, half_len),
            );
            let point = rotation * local + origin;
            let dir = isotropic_direction(&mut rng);

            let hit = s.intersect(point, dir).unwrap();
            let offset = hit - point;
            assert!((offset.dot(dir) - offset.length()).abs() < 1e-9);

            let hit_local = s.placement().invert(hit);
            let on_barrel = (rho(hit_local) - min_rad).abs() < 1e-6;
            let on_cap = (hit_local.z.abs() - half_len).abs() < 1e-6;
            assert!(on_barrel || on_cap, "{hit_local:?}");
        }
    }

    #[test]
    fn ray_from_outside_is_degenerate() {
        let s = CylinderPointSampler::new(1.0, 2.0, 1.0);
        assert!(matches!(
            s.intersect(DVec3::new(0.0, 0.0, 5.0), DVec3::Z),
            Err(Error::DegenerateQuery { .. })
        ));
        assert!(matches!(
            s.intersect(DVec3::ZERO, DVec3::ZERO),
            Err(Error::DegenerateQuery { .. })
        ));
    }

    #[test]
    fn placement_composes_with_local_sampling() {
        let rotation = DMat3::from_rotation_y(0.9);
        let origin = DVec3::new(1.0, 2.0, 3.0);
        let local = CylinderPointSampler::new(1.0, 2.0, 3.0).with_endcap_thickness(0.5);
        let placed = local.clone().with_rotation(rotation).with_origin(origin);
        for region in [Region::WholeVolume, Region::WholeSurface, Region::OuterSurface] {
            let mut a = StdRng::seed_from_u64(77);
            let mut b = StdRng::seed_from_u64(77);
            let p = local.generate_vertex(region, &mut a).unwrap();
            let w = placed.generate_vertex(region, &mut b).unwrap();
            assert!(w.abs_diff_eq(rotation * p + origin, 1e-12));
        }
    }
}
