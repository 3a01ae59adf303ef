//! Declarative sampler descriptions.
//!
//! [`SamplerConfig`] names one shape with its parameters and placement, checks
//! them with [`SamplerConfig::validate`] and builds a boxed [`VertexSampling`]
//! with [`SamplerConfig::build`]. With the `serde` feature the same structs
//! load from any serde format, tagged by `shape`.
use glam::{DMat3, DVec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Placement;
use crate::sampling::{
    hexagon::DEFAULT_PLANE_DEPTH, BoxPointSampler, CylinderPointSampler, HexagonNavigator,
    PolygonPointSampler, SpherePointSampler, VertexSampling,
};

const ORTHOGONALITY_TOLERANCE: f64 = 1e-9;

/// Placement of a sampler in the world frame.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlacementConfig {
    /// Translation applied after rotation.
    pub origin: [f64; 3],
    /// Rotation matrix given row by row. `None` means identity.
    pub rotation: Option<[[f64; 3]; 3]>,
}

impl PlacementConfig {
    pub fn new(origin: [f64; 3]) -> Self {
        Self {
            origin,
            rotation: None,
        }
    }

    pub fn with_rotation_rows(mut self, rows: [[f64; 3]; 3]) -> Self {
        self.rotation = Some(rows);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let mut entries = self.origin.iter().chain(self.rotation.iter().flatten().flatten());
        if entries.any(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig(
                "placement origin and rotation must be finite".into(),
            ));
        }
        if !self.to_placement().is_orthogonal(ORTHOGONALITY_TOLERANCE) {
            return Err(Error::InvalidConfig("placement rotation must be orthogonal".into()));
        }
        Ok(())
    }

    pub fn to_placement(&self) -> Placement {
        Placement::new(
            self.rotation
                .map(|rows| DMat3::from_cols_array_2d(&rows).transpose()),
            DVec3::from_array(self.origin),
        )
    }
}

/// Rectangular shell parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConfig {
    /// Cavity half-extents along X, Y and Z.
    pub half_extents: [f64; 3],
    pub thickness: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub placement: PlacementConfig,
}

impl BoxConfig {
    pub fn new(half_extents: [f64; 3], thickness: f64) -> Self {
        Self {
            half_extents,
            thickness,
            placement: PlacementConfig::default(),
        }
    }

    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    pub fn build(&self) -> Result<BoxPointSampler> {
        self.placement.validate()?;
        let [hx, hy, hz] = self.half_extents;
        Ok(BoxPointSampler::try_new(hx, hy, hz, self.thickness)?
            .with_placement(self.placement.to_placement()))
    }
}

/// Tube parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderConfig {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub half_length: f64,
    /// Azimuth window `[start, start + delta)`; `None` is the full turn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub phi_range: Option<[f64; 2]>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub endcap_thickness: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub placement: PlacementConfig,
}

impl CylinderConfig {
    pub fn new(inner_radius: f64, outer_radius: f64, half_length: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
            half_length,
            phi_range: None,
            endcap_thickness: 0.0,
            placement: PlacementConfig::default(),
        }
    }

    pub fn with_phi_range(mut self, start: f64, delta: f64) -> Self {
        self.phi_range = Some([start, delta]);
        self
    }

    pub fn with_endcap_thickness(mut self, thickness: f64) -> Self {
        self.endcap_thickness = thickness;
        self
    }

    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    pub fn build(&self) -> Result<CylinderPointSampler> {
        self.placement.validate()?;
        check_angles("cylinder phi_range", self.phi_range)?;
        if !(self.endcap_thickness.is_finite() && self.endcap_thickness >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "cylinder endcap_thickness must be finite and >= 0, got {}",
                self.endcap_thickness
            )));
        }

        let mut sampler =
            CylinderPointSampler::try_new(self.inner_radius, self.outer_radius, self.half_length)?
                .with_endcap_thickness(self.endcap_thickness)
                .with_placement(self.placement.to_placement());
        if let Some([start, delta]) = self.phi_range {
            sampler = sampler.with_angular_span(start, delta);
        }
        Ok(sampler)
    }
}

/// Spherical shell parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereConfig {
    pub inner_radius: f64,
    pub thickness: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub phi_range: Option<[f64; 2]>,
    /// Polar window `[start, start + delta]`; `None` keeps the upper hemisphere.
    #[cfg_attr(feature = "serde", serde(default))]
    pub theta_range: Option<[f64; 2]>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub placement: PlacementConfig,
}

impl SphereConfig {
    pub fn new(inner_radius: f64, thickness: f64) -> Self {
        Self {
            inner_radius,
            thickness,
            phi_range: None,
            theta_range: None,
            placement: PlacementConfig::default(),
        }
    }

    pub fn with_phi_range(mut self, start: f64, delta: f64) -> Self {
        self.phi_range = Some([start, delta]);
        self
    }

    pub fn with_theta_range(mut self, start: f64, delta: f64) -> Self {
        self.theta_range = Some([start, delta]);
        self
    }

    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    pub fn build(&self) -> Result<SpherePointSampler> {
        self.placement.validate()?;
        check_angles("sphere phi_range", self.phi_range)?;
        check_angles("sphere theta_range", self.theta_range)?;

        let mut sampler = SpherePointSampler::try_new(self.inner_radius, self.thickness)?
            .with_placement(self.placement.to_placement());
        if let Some([start, delta]) = self.phi_range {
            sampler = sampler.with_phi_range(start, delta);
        }
        if let Some([start, delta]) = self.theta_range {
            sampler = sampler.with_theta_range(start, delta);
        }
        Ok(sampler)
    }
}

/// Hexagonal prism parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexagonConfig {
    pub outer_radius: f64,
    pub half_length: f64,
    /// Requested cell radius; the grid stretches it to fill the apothem.
    pub element_radius: f64,
    /// Depth under the top face covered by the `PLANE` region.
    #[cfg_attr(feature = "serde", serde(default = "default_plane_depth"))]
    pub plane_depth: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub placement: PlacementConfig,
}

#[cfg(feature = "serde")]
fn default_plane_depth() -> f64 {
    DEFAULT_PLANE_DEPTH
}

impl HexagonConfig {
    pub fn new(outer_radius: f64, half_length: f64, element_radius: f64) -> Self {
        Self {
            outer_radius,
            half_length,
            element_radius,
            plane_depth: DEFAULT_PLANE_DEPTH,
            placement: PlacementConfig::default(),
        }
    }

    pub fn with_plane_depth(mut self, depth: f64) -> Self {
        self.plane_depth = depth;
        self
    }

    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    pub fn build(&self) -> Result<HexagonNavigator> {
        self.placement.validate()?;
        if !(self.plane_depth.is_finite() && self.plane_depth >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "hexagon plane_depth must be finite and >= 0, got {}",
                self.plane_depth
            )));
        }
        Ok(
            HexagonNavigator::try_new(self.outer_radius, self.half_length, self.element_radius)?
                .with_plane_depth(self.plane_depth)
                .with_placement(self.placement.to_placement()),
        )
    }
}

/// Regular-polygon tube parameters. Radii are circumradii.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonConfig {
    pub min_radius: f64,
    pub max_radius: f64,
    pub half_length: f64,
    pub sides: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub placement: PlacementConfig,
}

impl PolygonConfig {
    pub fn new(min_radius: f64, max_radius: f64, half_length: f64, sides: u32) -> Self {
        Self {
            min_radius,
            max_radius,
            half_length,
            sides,
            placement: PlacementConfig::default(),
        }
    }

    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    pub fn build(&self) -> Result<PolygonPointSampler> {
        self.placement.validate()?;
        Ok(PolygonPointSampler::try_new(
            self.min_radius,
            self.max_radius,
            self.half_length,
            self.sides,
        )?
        .with_placement(self.placement.to_placement()))
    }
}

/// Any supported sampler.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum SamplerConfig {
    Box(BoxConfig),
    Cylinder(CylinderConfig),
    Sphere(SphereConfig),
    Hexagon(HexagonConfig),
    Polygon(PolygonConfig),
}

impl SamplerConfig {
    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.build().map(drop)
    }

    pub fn build(&self) -> Result<Box<dyn VertexSampling>> {
        let sampler: Box<dyn VertexSampling> = match self {
            SamplerConfig::Box(c) => Box::new(c.build()?),
            SamplerConfig::Cylinder(c) => Box::new(c.build()?),
            SamplerConfig::Sphere(c) => Box::new(c.build()?),
            SamplerConfig::Hexagon(c) => Box::new(c.build()?),
            SamplerConfig::Polygon(c) => Box::new(c.build()?),
        };
        Ok(sampler)
    }
}

impl From<BoxConfig> for SamplerConfig {
    fn from(value: BoxConfig) -> Self {
        SamplerConfig::Box(value)
    }
}

impl From<CylinderConfig> for SamplerConfig {
    fn from(value: CylinderConfig) -> Self {
        SamplerConfig::Cylinder(value)
    }
}

impl From<SphereConfig> for SamplerConfig {
    fn from(value: SphereConfig) -> Self {
        SamplerConfig::Sphere(value)
    }
}

impl From<HexagonConfig> for SamplerConfig {
    fn from(value: HexagonConfig) -> Self {
        SamplerConfig::Hexagon(value)
    }
}

impl From<PolygonConfig> for SamplerConfig {
    fn from(value: PolygonConfig) -> Self {
        SamplerConfig::Polygon(value)
    }
}

fn check_angles(field: &str, range: Option<[f64; 2]>) -> Result<()> {
    match range {
        Some(values) if values.iter().any(|v| !v.is_finite()) => Err(Error::InvalidConfig(
            format!("{field} must be finite, got {values:?}"),
        )),
        _ => Ok(()),
    }
}
