//! Random vertices in a rectangular shell: a box cavity surrounded by walls of
//! uniform thickness.
use glam::{DMat3, DVec3};
use rand::RngCore;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::random::{length, rand01, symmetric};
use crate::geometry::Placement;
use crate::sampling::{pick_weighted, unknown_region, RayIntersection, Region, VertexSampling};

const NAME: &str = "BoxPointSampler";

/// Relative share of the three face pairs of a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFractions {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AxisFractions {
    fn normalized(x: f64, y: f64, z: f64) -> Self {
        let total = x + y + z;
        Self {
            x: x / total,
            y: y / total,
            z: z / total,
        }
    }

    /// Cumulative selection order: Z pair, then Y pair, then X pair.
    fn ordered(&self) -> [f64; 3] {
        [self.z, self.y, self.x]
    }
}

/// Box-shaped shell sampler.
///
/// Regions: `CENTER`, `INSIDE` (cavity), `INNER_SURF`/`WHOLE_SURF`,
/// `OUTER_SURF`, and `VOLUME`/`WHOLE_VOL` (the walls).
#[derive(Debug, Clone)]
pub struct BoxPointSampler {
    half_inner: DVec3,
    half_outer: DVec3,
    thickness: f64,
    wall_volumes: AxisFractions,
    inner_faces: AxisFractions,
    outer_faces: AxisFractions,
    placement: Placement,
}

impl BoxPointSampler {
    /// Create a sampler from the cavity half-extents and the wall thickness.
    pub fn new(half_x: f64, half_y: f64, half_z: f64, thickness: f64) -> Self {
        debug_assert!(
            half_x > 0.0 && half_y > 0.0 && half_z > 0.0,
            "half extents must be > 0"
        );
        debug_assert!(thickness >= 0.0, "thickness must be >= 0");

        let half_inner = DVec3::new(half_x, half_y, half_z);
        let half_outer = half_inner + DVec3::splat(thickness);

        // Z walls cover the full outer X-Y section, Y walls the outer X and the
        // inner Z, X walls only the inner Y-Z section. The common factor of the
        // thickness is dropped so a zero thickness keeps finite weights.
        let wall_volumes = AxisFractions::normalized(
            half_inner.y * half_inner.z,
            half_outer.x * half_inner.z,
            half_outer.x * half_outer.y,
        );
        let inner_faces = face_fractions(half_inner);
        let outer_faces = face_fractions(half_outer);

        debug!(
            ?half_inner,
            thickness,
            ?wall_volumes,
            ?inner_faces,
            "box sampler weights"
        );

        Self {
            half_inner,
            half_outer,
            thickness,
            wall_volumes,
            inner_faces,
            outer_faces,
            placement: Placement::IDENTITY,
        }
    }

    /// Validated constructor.
    pub fn try_new(half_x: f64, half_y: f64, half_z: f64, thickness: f64) -> Result<Self> {
        let halves = [half_x, half_y, half_z];
        if halves.iter().any(|h| !h.is_finite() || *h <= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: half extents must be finite and > 0, got {halves:?}"
            )));
        }
        if !thickness.is_finite() || thickness < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "{NAME}: thickness must be finite and >= 0, got {thickness}"
            )));
        }
        Ok(Self::new(half_x, half_y, half_z, thickness))
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

    pub fn half_inner(&self) -> DVec3 {
        self.half_inner
    }

    pub fn half_outer(&self) -> DVec3 {
        self.half_outer
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Share of the wall volume held by each wall pair.
    pub fn wall_volume_fractions(&self) -> AxisFractions {
        self.wall_volumes
    }

    /// Share of the cavity surface held by each face pair.
    pub fn inner_surface_fractions(&self) -> AxisFractions {
        self.inner_faces
    }

    /// Vertex in the local frame.
    pub fn generate_local(&self, region: Region, rng: &mut dyn RngCore) -> Result<DVec3> {
        let point = match region {
            Region::Center => DVec3::ZERO,
            Region::Inside => DVec3::new(
                symmetric(rng, self.half_inner.x),
                symmetric(rng, self.half_inner.y),
                symmetric(rng, self.half_inner.z),
            ),
            Region::InnerSurface | Region::WholeSurface => {
                surface_point(rng, self.half_inner, &self.inner_faces)
            }
            Region::OuterSurface => surface_point(rng, self.half_outer, &self.outer_faces),
            Region::Volume | Region::WholeVolume => self.wall_point(rng),
            other => return Err(unknown_region(NAME, other)),
        };
        Ok(point)
    }

    fn wall_point(&self, rng: &mut dyn RngCore) -> DVec3 {
        let roll = rand01(rng);
        let side = if rand01(rng) < 0.5 { -1.0 } else { 1.0 };
        let t = self.thickness;
        let (inner, outer) = (self.half_inner, self.half_outer);

        match pick_weighted(roll, &self.wall_volumes.ordered()) {
            0 => {
                let x = symmetric(rng, outer.x);
                let y = symmetric(rng, outer.y);
                let z = length(rng, side * (inner.z + 0.5 * t), t);
                DVec3::new(x, y, z)
            }
            1 => {
                let x = symmetric(rng, outer.x);
                let y = length(rng, side * (inner.y + 0.5 * t), t);
                let z = symmetric(rng, inner.z);
                DVec3::new(x, y, z)
            }
            _ => {
                let x = length(rng, side * (inner.x + 0.5 * t), t);
                let y = symmetric(rng, inner.y);
                let z = symmetric(rng, inner.z);
                DVec3::new(x, y, z)
            }
        }
    }
}

fn face_fractions(half: DVec3) -> AxisFractions {
    AxisFractions::normalized(half.y * half.z, half.x * half.z, half.x * half.y)
}

/// Point on the faces of the box with half-extents `half`.
fn surface_point(rng: &mut dyn RngCore, half: DVec3, faces: &AxisFractions) -> DVec3 {
    let roll = rand01(rng);
    let side = if rand01(rng) < 0.5 { 1.0 } else { -1.0 };

    match pick_weighted(roll, &faces.ordered()) {
        0 => {
            let x = symmetric(rng, half.x);
            let y = symmetric(rng, half.y);
            DVec3::new(x, y, side * half.z)
        }
        1 => {
            let x = symmetric(rng, half.x);
            let z = symmetric(rng, half.z);
            DVec3::new(x, side * half.y, z)
        }
        _ => {
            let y = symmetric(rng, half.y);
            let z = symmetric(rng, half.z);
            DVec3::new(side * half.x, y, z)
        }
    }
}

impl VertexSampling for BoxPointSampler {
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

impl RayIntersection for BoxPointSampler {
    fn intersect(&self, point: DVec3, direction: DVec3) -> Result<DVec3> {
        let p = self.placement.invert(point);
        let d = self.placement.invert_direction(direction);
        let h = self.half_inner;

        let mut best: Option<f64> = None;
        for axis in 0..3 {
            if d[axis] == 0.0 {
                continue;
            }
            // Of the two faces of this pair, keep the one the ray travels towards.
            let t = ((h[axis] - p[axis]) / d[axis]).max((-h[axis] - p[axis]) / d[axis]);
            if t >= 0.0 && best.is_none_or(|b| t < b) {
                best = Some(t);
            }
        }

        let t = best.ok_or_else(|| Error::DegenerateQuery {
            sampler: NAME,
            reason: format!(
                "no forward intersection from {point:?} along {direction:?}; point outside or null direction"
            ),
        })?;

        Ok(self.placement.apply(p + t * d))
    }
}
