//! Geometry utilities of the client.

use ultraviolet::{Rotor3, Vec3};

/// Axis aligned bounding box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Creates bounding box from two opposite corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min_by_component(b),
            max: a.max_by_component(b),
        }
    }

    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self::new(center - extents, center + extents)
    }

    /// Bounds of the full block which contains the position.
    pub fn block(position: Vec3) -> Self {
        let center = Vec3::new(
            position.x.round(),
            position.y.round(),
            position.z.round(),
        );
        Self::from_center_extents(center, Vec3::broadcast(0.5))
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half of the size along every axis.
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ]
    }

    /// Twelve edges of the box as pairs of corners.
    pub fn edges(&self) -> [(Vec3, Vec3); 12] {
        let c = self.corners();
        [
            (c[0], c[1]),
            (c[1], c[2]),
            (c[2], c[3]),
            (c[3], c[0]),
            (c[4], c[5]),
            (c[5], c[6]),
            (c[6], c[7]),
            (c[7], c[4]),
            (c[0], c[4]),
            (c[1], c[5]),
            (c[2], c[6]),
            (c[3], c[7]),
        ]
    }

    /// Bounds of this box after scaling, rotation and translation of its space.
    pub fn transform(&self, rotation: Rotor3, offset: Vec3, scale: f32) -> Self {
        let corners = self.corners().map(|corner| rotation * (corner * scale) + offset);
        let (min, max) = corners.iter().fold((corners[0], corners[0]), |(min, max), &corner| {
            (min.min_by_component(corner), max.max_by_component(corner))
        });
        Self { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).mag() < 1e-5
    }

    #[test]
    fn test_block_bounds() {
        let aabb = Aabb::block(Vec3::new(1.2, -0.4, 3.6));
        assert_eq!(aabb.center(), Vec3::new(1.0, 0.0, 4.0));
        assert_eq!(aabb.extents(), Vec3::broadcast(0.5));
        assert!(aabb.contains(Vec3::new(1.4, 0.5, 3.5)));
    }

    #[test]
    fn test_transform() {
        let aabb = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.min(), Vec3::broadcast(-1.0));

        let moved = aabb.transform(Rotor3::identity(), Vec3::new(0.0, 5.0, 0.0), 2.0);
        assert!(approx(moved.min(), Vec3::new(-2.0, 3.0, -2.0)));
        assert!(approx(moved.max(), Vec3::new(2.0, 7.0, 2.0)));

        let flat = Aabb::new(Vec3::new(-2.0, -0.5, -0.5), Vec3::new(2.0, 0.5, 0.5));
        let turned = flat.transform(Rotor3::from_rotation_xz(std::f32::consts::FRAC_PI_2), Vec3::zero(), 1.0);
        assert!(approx(turned.extents(), Vec3::new(0.5, 0.5, 2.0)));
    }

    #[test]
    fn test_edges_connect_corners() {
        let aabb = Aabb::from_center_extents(Vec3::zero(), Vec3::one());
        for (a, b) in aabb.edges() {
            assert!(((a - b).mag() - 2.0).abs() < 1e-5);
        }
    }
}
