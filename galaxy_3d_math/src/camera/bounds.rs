/// Axis-aligned bounding boxes for frustum culling.

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box
///
/// Boxes are usually kept in local space and moved into the frustum's
/// space with `transformed()` at culling time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Smallest box holding every point. `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<AABB> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(AABB { min: *first, max: *first }, |b, p| AABB {
            min: b.min.min(*p),
            max: b.max.max(*p),
        }))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Corner furthest along `direction` (the "positive vertex").
    pub fn positive_vertex(&self, direction: Vec3) -> Vec3 {
        Vec3::new(
            if direction.x >= 0.0 { self.max.x } else { self.min.x },
            if direction.y >= 0.0 { self.max.y } else { self.min.y },
            if direction.z >= 0.0 { self.max.z } else { self.min.z },
        )
    }

    /// Corner furthest against `direction` (the "negative vertex").
    pub fn negative_vertex(&self, direction: Vec3) -> Vec3 {
        self.positive_vertex(-direction)
    }

    /// Transform this AABB by a matrix, returning the enclosing AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Test if this AABB fully contains another AABB.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// Test if this AABB intersects (overlaps or touches) another AABB.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
