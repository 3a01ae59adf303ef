#![forbid(unsafe_code)]
//! vertex_sampling: Region-aware random vertex generation for detector solids.
//!
//! Modules:
//! - geometry: placement (rotation + origin), interpolation, shared random draws
//! - sampling: box, cylinder, sphere, hexagon and polygon samplers, segment sampler, ray intersection
//! - config: declarative sampler descriptions that build any sampler
//!
//! All randomness is injected per call through `&mut dyn rand::RngCore`, so a
//! seeded RNG reproduces the same vertices.
pub mod config;
pub mod error;
pub mod geometry;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use vertex_sampling::prelude::*;`.
pub mod prelude {
    pub use crate::config::{
        BoxConfig, CylinderConfig, HexagonConfig, PlacementConfig, PolygonConfig, SamplerConfig,
        SphereConfig,
    };
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{bilinear_interpolation, linear_interpolation, Placement};
    pub use crate::sampling::{
        BoxPointSampler, CylinderPointSampler, HexagonNavigator, PolygonPointSampler,
        RayIntersection, Region, SegmentPointSampler, SpaceTimePoint, SpherePointSampler,
        VertexSampling, VertexTable,
    };
}
