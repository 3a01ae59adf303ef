//! Random vertices in a regular-polygon tube: the prism between an inner and
//! an outer regular n-gon sharing centre and orientation, such as the
//! n-sided light tube around a drift region.
use std::f64::consts::{PI, TAU};

use glam::{DMat3, DVec2, DVec3};
use rand::RngCore;

use crate::error::{Error, Result};
use crate::geometry::random::{rand01, symmetric};
use crate::geometry::Placement;
use crate::sampling::{unknown_region, Region, VertexSampling};

const NAME: &str = "PolygonPointSampler";

/// Upper bound on rejection rounds per vertex.
const MAX_REJECTION_ATTEMPTS: usize = 1 << 20;

/// Regular polygon centred on the origin with its first vertex on +X.
#[derive(Debug, Clone, Copy)]
struct RegularPolygon {
    radius: f64,
    sides: u32,
    apothem: f64,
}

impl RegularPolygon {
    fn new(radius: f64, sides: u32) -> Self {
        Self {
            radius,
            sides,
            apothem: radius * (PI / f64::from(sides)).cos(),
        }
    }

    fn vertex(&self, k: u32) -> DVec2 {
        let angle = TAU * f64::from(k % self.sides) / f64::from(self.sides);
        self.radius * DVec2::from_angle(angle)
    }

    /// Largest projection of `p` on the edge normals; `<= apothem` inside.
    fn support(&self, p: DVec2) -> f64 {
        (0..self.sides)
            .map(|k| {
                let normal = PI * f64::from(2 * k + 1) / f64::from(self.sides);
                p.dot(DVec2::from_angle(normal))
            })
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn contains(&self, p: DVec2) -> bool {
        self.support(p) <= self.apothem
    }

    /// Uniform point on the boundary: edge, then position along it.
    fn edge_point(&self, rng: &mut dyn RngCore) -> DVec2 {
        let edge = ((rand01(rng) * f64::from(self.sides)).floor() as u32).min(self.sides - 1);
        let (a, b) = (self.vertex(edge), self.vertex(edge + 1));
        a.lerp(b, rand01(rng))
    }
}

/// Regular-polygon tube sampler.
///
/// `min_radius` and `max_radius` are circumradii. Regions: `CENTER`,
/// `INSIDE` (the inner polygon), `VOLUME` (between the polygons),
/// `INNER_SURF` and `OUTER_SURF`.
#[derive(Debug, Clone)]
pub struct PolygonPointSampler {
    inner: RegularPolygon,
    outer: RegularPolygon,
    half_length: f64,
    placement: Placement,
}

impl PolygonPointSampler {
    pub fn new(min_radius: f64, max_radius: f64, half_length: f64, sides: u32) -> Self {
        debug_assert!(min_radius >= 0.0, "min radius must be >= 0");
        debug_assert!(max_radius > min_radius, "max radius must be > min radius");
        debug_assert!(half_length > 0.0, "half length must be > 0");
        debug_assert!(sides >= 3, "a polygon needs at least 3 sides");

        Self {
            inner: RegularPolygon::new(min_radius, sides),
            outer: RegularPolygon::new(max_radius, sides),
            half_length,
            placement: Placement::IDENTITY,
        }
    }

    pub fn try_new(min_radius: f64, max_radius: f64, half_length: f64, sides: u32) -> Result<Self> {
        let values = [min_radius, max_radius, half_length];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: dimensions must be finite, got {values:?}"
            )));
        }
        if min_radius < 0.0 || max_radius <= min_radius {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: radii must satisfy 0 <= min ({min_radius}) < max ({max_radius})"
            )));
        }
        if half_length <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: half length must be > 0, got {half_length}"
            )));
        }
        if sides < 3 {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: a polygon needs at least 3 sides, got {sides}"
            )));
        }
        Ok(Self::new(min_radius, max_radius, half_length, sides))
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

    pub fn min_radius(&self) -> f64 {
        self.inner.radius
    }

    pub fn max_radius(&self) -> f64 {
        self.outer.radius
    }

    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    pub fn sides(&self) -> u32 {
        self.inner.sides
    }

    /// Apothems of the inner and outer polygons.
    pub fn apothems(&self) -> (f64, f64) {
        (self.inner.apothem, self.outer.apothem)
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Vertex in the local frame.
    pub fn generate_local(&self, region: Region, rng: &mut dyn RngCore) -> Result<DVec3> {
        let xy = match region {
            Region::Center => return Ok(DVec3::ZERO),
            Region::Inside => {
                let r = self.inner.radius;
                self.rejection(rng, r, |p| self.inner.contains(p))?
            }
            Region::Volume => {
                let r = self.outer.radius;
                self.rejection(rng, r, |p| self.outer.contains(p) && !self.inner.contains(p))?
            }
            Region::InnerSurface => self.inner.edge_point(rng),
            Region::OuterSurface => self.outer.edge_point(rng),
            other => return Err(unknown_region(NAME, other)),
        };
        Ok(xy.extend(symmetric(rng, self.half_length)))
    }

    /// Draw x, y in the square `[-half, half)²` until `accept` holds.
    fn rejection(
        &self,
        rng: &mut dyn RngCore,
        half: f64,
        accept: impl Fn(DVec2) -> bool,
    ) -> Result<DVec2> {
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let x = symmetric(rng, half);
            let y = symmetric(rng, half);
            let p = DVec2::new(x, y);
            if accept(p) {
                return Ok(p);
            }
        }
        Err(Error::DegenerateQuery {
            sampler: NAME,
            reason: format!("no accepted point after {MAX_REJECTION_ATTEMPTS} rejection rounds"),
        })
    }
}

impl VertexSampling for PolygonPointSampler {
    fn name(&self) -> &'static str {
        NAME
    }

    fn generate_vertex(&self, region: Region, rng: &mut dyn RngCore) -> Result<DVec3> {
        self.generate_local(region, rng)
            .map(|p| self.placement.apply(p))
    }
}
