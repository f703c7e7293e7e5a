//! Camera module: viewing frustum, planes and culling volumes.
//!
//! Provides passive value types: a `Frustum` is a set of seven
//! parameters from which projection matrices, boundary planes and depth
//! conversions are derived on demand. Nothing is cached.

mod bounds;
mod frustum;
mod plane;

pub use bounds::AABB;
pub use frustum::{
    Frustum, FrustumTest,
    PLANE_TOP, PLANE_RIGHT, PLANE_BOTTOM, PLANE_LEFT, PLANE_NEAR, PLANE_FAR,
};
pub use plane::{Plane3, Ray3};
