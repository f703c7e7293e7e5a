/// Plane3 and Ray3: half-space boundaries and parametric lines.
///
/// A plane is stored as a unit normal and the signed distance of the
/// plane from the origin along that normal:
/// - `distance_to(p) = dot(p, normal) - distance`
/// - positive on the side the normal points to
///
/// A degenerate plane (built from collinear points or a zero normal)
/// has a zero normal; every distance to it is `-distance`.

use std::ops::Neg;
use glam::{DVec3, Mat4, Vec3};

/// Infinite plane `dot(p, normal) == distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3 {
    /// Unit normal
    pub normal: Vec3,
    /// Signed distance from the origin along `normal`
    pub distance: f32,
}

impl Plane3 {
    /// Plane from a normal (normalized here) and a distance from the origin.
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            distance,
        }
    }

    /// Plane through `point` with the given normal.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            distance: normal.dot(point),
        }
    }

    /// Plane through three points.
    ///
    /// The normal is `(b - a) x (c - a)`: counter-clockwise points seen
    /// from the side the normal points to.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self {
            normal,
            distance: normal.dot(a),
        }
    }

    /// Same as `from_points`, computed in double precision.
    pub(crate) fn from_dpoints(a: DVec3, b: DVec3, c: DVec3) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self {
            normal: normal.as_vec3(),
            distance: normal.dot(a) as f32,
        }
    }

    /// Signed distance from `point` to the plane.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        point.dot(self.normal) - self.distance
    }

    /// Mirror image of a point.
    pub fn reflect_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * (2.0 * self.distance_to(point))
    }

    /// Mirror image of a direction (the plane is treated as through the origin).
    pub fn reflect_vector(&self, vector: Vec3) -> Vec3 {
        self.normal * (2.0 * self.normal.dot(vector)) - vector
    }

    /// Ray parameter of the intersection, `None` when the ray is parallel.
    pub fn intersect_t(&self, ray: &Ray3) -> Option<f32> {
        let d = self.normal.dot(ray.direction);
        if d == 0.0 {
            return None;
        }
        Some(-self.distance_to(ray.origin) / d)
    }

    /// Intersection point, `None` when the ray is parallel.
    ///
    /// The ray is treated as an infinite line: a negative parameter is
    /// still a hit.
    pub fn intersect(&self, ray: &Ray3) -> Option<Vec3> {
        self.intersect_t(ray).map(|t| ray.at(t))
    }

    /// The plane after transforming space by `matrix`.
    ///
    /// Three points of the plane are transformed and the plane rebuilt
    /// from them, so any invertible affine matrix maps the plane to the
    /// right set of points. The normal side is kept only when the matrix
    /// preserves orientation (positive determinant).
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        // Two in-plane directions from the world axis least aligned with the normal.
        let dir1 = [Vec3::X, Vec3::Y, Vec3::Z]
            .into_iter()
            .map(|axis| axis.cross(self.normal))
            .fold(Vec3::ZERO, |best, v| {
                if v.length_squared() > best.length_squared() { v } else { best }
            });
        let dir2 = dir1.cross(self.normal);
        let point = self.normal * self.distance;

        Self::from_points(
            matrix.transform_point3(point),
            matrix.transform_point3(point + dir2),
            matrix.transform_point3(point + dir1),
        )
    }
}

impl Neg for Plane3 {
    type Output = Plane3;

    /// Same plane, facing the other way.
    fn neg(self) -> Plane3 {
        Plane3 {
            normal: -self.normal,
            distance: -self.distance,
        }
    }
}

/// Ray (or infinite line) with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray3 {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray3 {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from `from` through `to`.
    pub fn from_points(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to - from)
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Point of the line closest to `point`.
    pub fn closest_point_to(&self, point: Vec3) -> Vec3 {
        self.at((point - self.origin).dot(self.direction))
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        (point - self.closest_point_to(point)).length()
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
