//! Region-aware vertex samplers for detector solids.
//!
//! Every sampler owns fixed shape parameters and a [`Placement`], and draws a
//! fresh point per call from the caller's RNG. Region tags are a closed set
//! shared by all shapes; each sampler accepts only the subset it knows and
//! reports anything else as [`Error::UnknownRegion`].
//!
//! [`Placement`]: crate::geometry::Placement
use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod box_sampler;
pub mod cylinder;
pub mod hexagon;
pub mod polygon;
pub mod segment;
pub mod sphere;

pub use box_sampler::BoxPointSampler;
pub use cylinder::CylinderPointSampler;
pub use hexagon::{HexagonNavigator, VertexTable};
pub use polygon::PolygonPointSampler;
pub use segment::{SegmentPointSampler, SpaceTimePoint};
pub use sphere::SpherePointSampler;

/// Named sub-region of a solid in which vertices are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Region {
    Center,
    Inside,
    Volume,
    WholeVolume,
    InnerSurface,
    OuterSurface,
    Surface,
    WholeSurface,
    BodyVolume,
    EndcapsVolume,
    BodySurface,
    EndcapsSurface,
    Plane,
    Table,
}

impl Region {
    pub const ALL: [Region; 14] = [
        Region::Center,
        Region::Inside,
        Region::Volume,
        Region::WholeVolume,
        Region::InnerSurface,
        Region::OuterSurface,
        Region::Surface,
        Region::WholeSurface,
        Region::BodyVolume,
        Region::EndcapsVolume,
        Region::BodySurface,
        Region::EndcapsSurface,
        Region::Plane,
        Region::Table,
    ];

    /// Canonical configuration name of the region.
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Center => "CENTER",
            Region::Inside => "INSIDE",
            Region::Volume => "VOLUME",
            Region::WholeVolume => "WHOLE_VOL",
            Region::InnerSurface => "INNER_SURF",
            Region::OuterSurface => "OUTER_SURF",
            Region::Surface => "SURFACE",
            Region::WholeSurface => "WHOLE_SURF",
            Region::BodyVolume => "BODY_VOL",
            Region::EndcapsVolume => "ENDCAPS_VOL",
            Region::BodySurface => "BODY_SURF",
            Region::EndcapsSurface => "ENDCAPS_SURF",
            Region::Plane => "PLANE",
            Region::Table => "TABLE",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let region = match s.trim().to_ascii_uppercase().as_str() {
            "CENTER" => Region::Center,
            "INSIDE" => Region::Inside,
            "VOLUME" => Region::Volume,
            "WHOLE_VOL" | "WHOLE_VOLUME" => Region::WholeVolume,
            "INNER_SURF" | "INNER_SURFACE" => Region::InnerSurface,
            "OUTER_SURF" | "OUTER_SURFACE" => Region::OuterSurface,
            "SURFACE" => Region::Surface,
            "WHOLE_SURF" | "WHOLE_SURFACE" => Region::WholeSurface,
            "BODY_VOL" | "BODY_VOLUME" => Region::BodyVolume,
            "ENDCAPS_VOL" | "ENDCAPS_VOLUME" | "ENDCAP_VOL" => Region::EndcapsVolume,
            "BODY_SURF" | "BODY_SURFACE" => Region::BodySurface,
            "ENDCAPS_SURF" | "ENDCAPS_SURFACE" | "ENDCAP_SURF" => Region::EndcapsSurface,
            "PLANE" => Region::Plane,
            "TABLE" => Region::Table,
            _ => {
                return Err(Error::UnknownRegion {
                    sampler: "Region",
                    region: s.to_owned(),
                })
            }
        };
        Ok(region)
    }
}

/// Trait for region-aware vertex generation.
pub trait VertexSampling: Send + Sync {
    /// Sampler name used in error messages.
    fn name(&self) -> &'static str;

    /// Generate a vertex in `region`, in the world frame.
    fn generate_vertex(&self, region: Region, rng: &mut dyn RngCore) -> Result<DVec3>;

    /// Parse `region` and generate a vertex in it.
    fn generate_vertex_named(&self, region: &str, rng: &mut dyn RngCore) -> Result<DVec3> {
        let region = region.parse::<Region>().map_err(|_| Error::UnknownRegion {
            sampler: self.name(),
            region: region.to_owned(),
        })?;
        self.generate_vertex(region, rng)
    }
}

/// Boundary intersection of a ray starting inside a solid.
pub trait RayIntersection {
    /// Point where the ray from `point` along `direction` leaves the solid's
    /// inner boundary. Both inputs and the result are in the world frame.
    fn intersect(&self, point: DVec3, direction: DVec3) -> Result<DVec3>;
}

pub(crate) fn unknown_region(sampler: &'static str, region: Region) -> Error {
    Error::UnknownRegion {
        sampler,
        region: region.to_string(),
    }
}

/// Pick the sub-region of a composite region given the uniform `roll` and
/// cumulative `weights` (the last sub-region takes the remainder).
#[inline]
pub(crate) fn pick_weighted(roll: f64, weights: &[f64]) -> usize {
    let mut acc = 0.0;
    for (i, w) in weights.iter().enumerate() {
        acc += w;
        if roll < acc {
            return i;
        }
    }
    weights.len().saturating_sub(1)
}
