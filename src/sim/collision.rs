//! Axis-aligned collision helpers
//!
//! Screen space: origin top-left, y down. Boxes are `[min, min + size)`.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Square box of side `side` with its top-left at `min`
    pub fn square(min: Vec2, side: f32) -> Self {
        Self::new(min, Vec2::splat(side))
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Point strictly inside the box (edges don't count)
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }

    /// Overlap on both axes at once (touching edges don't count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Clamp a point into `[min, max]` on both axes
#[inline]
pub fn clamp_point(p: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    // max() first so an inverted range collapses to `min` instead of panicking
    p.max(min).min(max.max(min))
}

/// Move `from` toward `to` by at most `step`, landing exactly on `to` when close
#[inline]
pub fn step_toward(from: Vec2, to: Vec2, step: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist > step {
        from + delta / dist * step
    } else {
        to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_inside_is_strict() {
        let b = Aabb::square(Vec2::new(10.0, 10.0), 30.0);
        assert!(b.contains_point(Vec2::new(25.0, 25.0)));
        assert!(!b.contains_point(Vec2::new(10.0, 25.0)));
        assert!(!b.contains_point(Vec2::new(40.0, 25.0)));
        assert!(!b.contains_point(Vec2::new(25.0, 40.0)));
        assert!(!b.contains_point(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        let a = Aabb::square(Vec2::ZERO, 10.0);
        assert!(a.overlaps(&Aabb::square(Vec2::new(5.0, 5.0), 10.0)));
        // x overlaps, y doesn't
        assert!(!a.overlaps(&Aabb::square(Vec2::new(5.0, 20.0), 10.0)));
        // touching edge
        assert!(!a.overlaps(&Aabb::square(Vec2::new(10.0, 0.0), 10.0)));
        // containment
        assert!(a.overlaps(&Aabb::square(Vec2::new(2.0, 2.0), 2.0)));
    }

    #[test]
    fn test_clamp_point() {
        let min = Vec2::new(0.0, 100.0);
        let max = Vec2::new(50.0, 200.0);
        assert_eq!(clamp_point(Vec2::new(-5.0, 300.0), min, max), Vec2::new(0.0, 200.0));
        assert_eq!(clamp_point(Vec2::new(25.0, 150.0), min, max), Vec2::new(25.0, 150.0));
        // inverted range collapses to min
        assert_eq!(clamp_point(Vec2::new(25.0, 150.0), max, min), max);
    }

    #[test]
    fn test_step_toward() {
        let p = step_toward(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.5);
        assert!((p.x - 2.5).abs() < 1e-5);
        assert_eq!(step_toward(Vec2::ZERO, Vec2::new(1.0, 1.0), 2.5), Vec2::new(1.0, 1.0));
    }
}
