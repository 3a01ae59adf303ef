//! Geometric primitives used by the samplers: placement composition,
//! interpolation, and the shared random draws.
use glam::{DMat3, DVec3};

pub mod interpolation;
pub mod random;

pub use interpolation::{bilinear_interpolation, linear_interpolation};

/// Rigid placement of a sampler's local frame inside the world frame.
///
/// A local point `p` maps to `rotation * p + origin`. The rotation must be
/// orthogonal; it is inverted by transposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Rotation applied before translation. `None` means identity.
    pub rotation: Option<DMat3>,
    /// Translation applied after rotation.
    pub origin: DVec3,
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Placement {
    pub const IDENTITY: Self = Self {
        rotation: None,
        origin: DVec3::ZERO,
    };

    pub fn new(rotation: Option<DMat3>, origin: DVec3) -> Self {
        Self { rotation, origin }
    }

    /// Build a placement from `mint` types, for callers using another math library.
    pub fn from_mint(
        rotation: Option<mint::ColumnMatrix3<f64>>,
        origin: mint::Vector3<f64>,
    ) -> Self {
        Self {
            rotation: rotation.map(DMat3::from),
            origin: DVec3::from(origin),
        }
    }

    pub fn with_rotation(mut self, rotation: DMat3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.origin = origin;
        self
    }

    /// Local point to world frame.
    #[inline]
    pub fn apply(&self, local: DVec3) -> DVec3 {
        self.apply_to_direction(local) + self.origin
    }

    /// Local direction to world frame (rotation only).
    #[inline]
    pub fn apply_to_direction(&self, local: DVec3) -> DVec3 {
        match self.rotation {
            Some(rotation) => rotation * local,
            None => local,
        }
    }

    /// World point to local frame.
    #[inline]
    pub fn invert(&self, world: DVec3) -> DVec3 {
        self.invert_direction(world - self.origin)
    }

    /// World direction to local frame.
    #[inline]
    pub fn invert_direction(&self, world: DVec3) -> DVec3 {
        match self.rotation {
            Some(rotation) => rotation.transpose() * world,
            None => world,
        }
    }

    /// Whether the rotation, if any, is orthogonal within `tolerance`.
    pub fn is_orthogonal(&self, tolerance: f64) -> bool {
        match self.rotation {
            Some(rotation) => (rotation.transpose() * rotation).abs_diff_eq(DMat3::IDENTITY, tolerance),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_leaves_points_untouched() {
        let p = DVec3::new(1.0, -2.0, 3.5);
        assert_eq!(Placement::IDENTITY.apply(p), p);
        assert_eq!(Placement::IDENTITY.invert(p), p);
    }

    #[test]
    fn rotation_is_applied_before_translation() {
        let placement = Placement::new(
            Some(DMat3::from_rotation_z(std::f64::consts::FRAC_PI_2)),
            DVec3::new(10.0, 0.0, 0.0),
        );
        let world = placement.apply(DVec3::X);
        assert!(world.abs_diff_eq(DVec3::new(10.0, 1.0, 0.0), 1e-12));
    }

    #[test]
    fn invert_undoes_apply() {
        let rotation = DMat3::from_rotation_x(0.3) * DMat3::from_rotation_y(1.1) * DMat3::from_rotation_z(2.4);
        let placement = Placement::new(Some(rotation), DVec3::new(4.0, -7.0, 12.0));
        assert!(placement.is_orthogonal(1e-12));

        let p = DVec3::new(3.0, 2.0, -1.0);
        assert!(placement.invert(placement.apply(p)).abs_diff_eq(p, 1e-12));
        let d = DVec3::new(0.0, 0.6, 0.8);
        assert!(placement
            .invert_direction(placement.apply_to_direction(d))
            .abs_diff_eq(d, 1e-12));
    }

    #[test]
    fn from_mint_matches_glam_construction() {
        let rotation = DMat3::from_rotation_y(0.7);
        let a = Placement::from_mint(Some(rotation.into()), DVec3::new(1.0, 2.0, 3.0).into());
        let b = Placement::new(Some(rotation), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(a, b);
    }

    #[test]
    fn non_orthogonal_matrix_is_detected() {
        let placement = Placement::IDENTITY.with_rotation(DMat3::from_diagonal(DVec3::new(2.0, 1.0, 1.0)));
        assert!(!placement.is_orthogonal(1e-9));
    }
}
