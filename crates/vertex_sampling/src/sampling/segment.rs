//! Random points along a straight space-time segment.
use glam::DVec3;
use rand::RngCore;

use crate::geometry::random::rand01;

/// A position with a time coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpaceTimePoint {
    pub position: DVec3,
    pub time: f64,
}

impl SpaceTimePoint {
    pub const fn new(position: DVec3, time: f64) -> Self {
        Self { position, time }
    }

    /// Linear interpolation towards `other`; `u = 0` is `self`.
    pub fn lerp(self, other: Self, u: f64) -> Self {
        Self {
            position: self.position + u * (other.position - self.position),
            time: self.time + u * (other.time - self.time),
        }
    }
}

impl From<DVec3> for SpaceTimePoint {
    fn from(position: DVec3) -> Self {
        Self::new(position, 0.0)
    }
}

/// Uniform sampler along the segment between a pre and a post point.
///
/// Position and time share the same variate, so a sampled point lies on the
/// world line joining the two end points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentPointSampler {
    pre: SpaceTimePoint,
    post: SpaceTimePoint,
}

impl SegmentPointSampler {
    pub fn new(pre: SpaceTimePoint, post: SpaceTimePoint) -> Self {
        Self { pre, post }
    }

    /// Segment between two positions, both at time zero.
    pub fn from_points(pre: DVec3, post: DVec3) -> Self {
        Self::new(pre.into(), post.into())
    }

    pub fn set_points(&mut self, pre: SpaceTimePoint, post: SpaceTimePoint) {
        self.pre = pre;
        self.post = post;
    }

    pub fn pre_point(&self) -> SpaceTimePoint {
        self.pre
    }

    pub fn post_point(&self) -> SpaceTimePoint {
        self.post
    }

    /// Draw one point uniformly along the segment.
    pub fn shoot(&self, rng: &mut dyn RngCore) -> SpaceTimePoint {
        self.pre.lerp(self.post, rand01(rng))
    }

    /// Spatial part of [`Self::shoot`].
    pub fn shoot_position(&self, rng: &mut dyn RngCore) -> DVec3 {
        self.shoot(rng).position
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::sampling::testing::SequenceRng;

    #[test]
    fn shoot_interpolates_position_and_time_together() {
        let sampler = SegmentPointSampler::new(
            SpaceTimePoint::new(DVec3::new(0.0, 0.0, 0.0), 10.0),
            SpaceTimePoint::new(DVec3::new(4.0, -8.0, 2.0), 30.0),
        );
        let mut rng = SequenceRng::new(&[0.25]);
        let p = sampler.shoot(&mut rng);
        assert_eq!(rng.draws(), 1);
        assert!(p.position.abs_diff_eq(DVec3::new(1.0, -2.0, 0.5), 1e-12));
        assert!((p.time - 15.0).abs() < 1e-12);
    }

    #[test]
    fn shot_points_stay_on_the_world_line() {
        let pre = SpaceTimePoint::new(DVec3::new(-1.0, 2.0, 3.0), 0.5);
        let post = SpaceTimePoint::new(DVec3::new(5.0, 2.0, -3.0), 2.5);
        let sampler = SegmentPointSampler::new(pre, post);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1_000 {
            let p = sampler.shoot(&mut rng);
            let u = (p.time - pre.time) / (post.time - pre.time);
            assert!((0.0..1.0).contains(&u));
            assert!(p.position.abs_diff_eq(pre.lerp(post, u).position, 1e-9));
        }
    }

    #[test]
    fn points_without_time_start_at_zero() {
        let mut sampler = SegmentPointSampler::from_points(DVec3::ZERO, DVec3::X);
        assert_eq!(sampler.pre_point().time, 0.0);
        assert_eq!(sampler.post_point().position, DVec3::X);

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sampler.shoot(&mut rng).time, 0.0);

        let moved = SpaceTimePoint::new(DVec3::Y, 1.0);
        sampler.set_points(moved, moved);
        assert_eq!(sampler.shoot(&mut rng), moved);
        assert_eq!(sampler.shoot_position(&mut rng), DVec3::Y);
    }
}
