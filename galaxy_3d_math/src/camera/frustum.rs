/// Frustum: viewing volume of a camera looking down -Z.
///
/// The volume is described by seven parameters: the near and far clip
/// distances, the left/right/top/bottom extents of the near rectangle,
/// and a projection mode flag.
///
/// Everything else is derived on demand from those parameters:
/// - the OpenGL-style projection matrix
/// - six boundary planes, in eye space or in any rigid view space
/// - conversions between eye depth, normalized Z and integer depth buffer values
/// - screen projection and culling queries
///
/// Most queries come in two flavors. The plain one computes the formula
/// and may produce Inf/NaN for a degenerate frustum. The `try_` one checks
/// the parameters (and every division it performs) first, logs the problem
/// and returns `Error::Domain` instead.

use glam::{DVec3, Mat4, Vec2, Vec3, Vec4};
use crate::error::{Error, Result};
use crate::galaxy3d::Diagnostics;
use super::bounds::AABB;
use super::plane::{Plane3, Ray3};

const SOURCE: &str = "galaxy3d::Frustum";

/// Result of a 3-way frustum/AABB classification.
///
/// Used for hierarchical culling:
/// - `Outside` → skip the entire subtree
/// - `Inside` → collect all objects without further testing
/// - `Partial` → test individual objects and recurse into children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside the frustum
    Outside,
    /// AABB is entirely inside the frustum
    Inside,
    /// AABB partially overlaps the frustum
    Partial,
}

/// Frustum plane indices, in the order returned by `planes()`
pub const PLANE_TOP: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_LEFT: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Viewing frustum parameters.
///
/// Valid when `near != far`, `left != right`, `top != bottom`, and, for a
/// perspective frustum, `near > 0` and `far > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    near: f32,
    far: f32,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    orthographic: bool,
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new(0.1, 1000.0, -1.0, 1.0, 1.0, -1.0, false)
    }
}

impl Frustum {
    // ===== CONSTRUCTION =====

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        near: f32,
        far: f32,
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        orthographic: bool,
    ) -> Self {
        Self { near, far, left, right, top, bottom, orthographic }
    }

    /// Perspective frustum from a field of view.
    ///
    /// Exactly one of `fovx` / `fovy` is expected to be non-zero; the
    /// other extent follows from `aspect` (width / height). When both
    /// are set, `fovx` wins.
    pub fn from_fov(near: f32, far: f32, fovx: f32, fovy: f32, aspect: f32) -> Self {
        let (left, right, top, bottom) = if fovx != 0.0 {
            let right = near * (fovx / 2.0).tan();
            let left = -right;
            let top = ((right - left) / aspect) / 2.0;
            (left, right, top, -top)
        } else {
            let top = near * (fovy / 2.0).tan();
            let bottom = -top;
            let right = (top - bottom) * aspect / 2.0;
            (-right, right, top, bottom)
        };

        Self::new(near, far, left, right, top, bottom, false)
    }

    /// Replace every parameter, without validation.
    #[allow(clippy::too_many_arguments)]
    pub fn set(
        &mut self,
        near: f32,
        far: f32,
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        orthographic: bool,
    ) {
        *self = Self::new(near, far, left, right, top, bottom, orthographic);
    }

    /// Replace every parameter. On error the frustum is left unchanged.
    #[allow(clippy::too_many_arguments)]
    pub fn try_set(
        &mut self,
        near: f32,
        far: f32,
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        orthographic: bool,
    ) -> Result<()> {
        let candidate = Self::new(near, far, left, right, top, bottom, orthographic);
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    /// Switch to a perspective frustum built with `from_fov`.
    pub fn set_fov(&mut self, near: f32, far: f32, fovx: f32, fovy: f32, aspect: f32) {
        if fovx != 0.0 && fovy != 0.0 {
            crate::math_warn!(SOURCE, "Both fovx and fovy are non-zero, fovy is ignored");
        }
        *self = Self::from_fov(near, far, fovx, fovy, aspect);
    }

    /// Checked `set_fov`: rejects two non-zero fields of view and an
    /// invalid result. On error the frustum is left unchanged.
    pub fn try_set_fov(&mut self, near: f32, far: f32, fovx: f32, fovy: f32, aspect: f32) -> Result<()> {
        if fovx != 0.0 && fovy != 0.0 {
            return Err(domain_error("fovx and fovy cannot both be non-zero"));
        }
        let candidate = Self::from_fov(near, far, fovx, fovy, aspect);
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    pub fn set_orthographic(&mut self, orthographic: bool) {
        self.orthographic = orthographic;
    }

    /// Move the clip planes.
    ///
    /// A perspective frustum keeps its field of view: the near rectangle
    /// is scaled by `near / self.near()`.
    pub fn modify_near_and_far(&mut self, near: f32, far: f32) {
        if !self.orthographic {
            let s = near / self.near;
            self.left *= s;
            self.right *= s;
            self.top *= s;
            self.bottom *= s;
        }
        self.near = near;
        self.far = far;
    }

    // ===== ACCESSORS =====

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn is_orthographic(&self) -> bool {
        self.orthographic
    }

    /// Horizontal field of view in radians.
    pub fn fovx(&self) -> f32 {
        self.right.atan2(self.near) - self.left.atan2(self.near)
    }

    /// Vertical field of view in radians.
    pub fn fovy(&self) -> f32 {
        self.top.atan2(self.near) - self.bottom.atan2(self.near)
    }

    /// Width / height of the near rectangle.
    pub fn aspect(&self) -> f32 {
        (self.right - self.left) / (self.top - self.bottom)
    }

    pub fn try_aspect(&self) -> Result<f32> {
        self.validate()?;
        check_ratio(self.right - self.left, self.top - self.bottom, "aspect ratio cannot be computed")?;
        Ok(self.aspect())
    }

    // ===== VALIDATION =====

    /// Check the frustum invariant.
    #[track_caller]
    pub fn validate(&self) -> Result<()> {
        let values = [self.near, self.far, self.left, self.right, self.top, self.bottom];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(domain_error("Bad viewing frustum: parameters must be finite"));
        }
        if self.near == self.far {
            return Err(domain_error("Bad viewing frustum: near and far clipping planes coincide"));
        }
        if self.left == self.right {
            return Err(domain_error("Bad viewing frustum: left and right clipping planes coincide"));
        }
        if self.top == self.bottom {
            return Err(domain_error("Bad viewing frustum: top and bottom clipping planes coincide"));
        }
        if !self.orthographic && (self.near <= 0.0 || self.far <= 0.0) {
            return Err(domain_error(
                "Bad viewing frustum: perspective clipping planes must be in front of the eye",
            ));
        }
        Ok(())
    }

    // ===== PROJECTION =====

    /// Projection matrix mapping the frustum to the [-1, 1] clip cube.
    pub fn projection_matrix(&self) -> Mat4 {
        let (n, f) = (self.near, self.far);
        let (l, r, t, b) = (self.left, self.right, self.top, self.bottom);

        if self.orthographic {
            Mat4::from_cols(
                Vec4::new(2.0 / (r - l), 0.0, 0.0, 0.0),
                Vec4::new(0.0, 2.0 / (t - b), 0.0, 0.0),
                Vec4::new(0.0, 0.0, -2.0 / (f - n), 0.0),
                Vec4::new(-(r + l) / (r - l), -(t + b) / (t - b), -(f + n) / (f - n), 1.0),
            )
        } else {
            Mat4::from_cols(
                Vec4::new(2.0 * n / (r - l), 0.0, 0.0, 0.0),
                Vec4::new(0.0, 2.0 * n / (t - b), 0.0, 0.0),
                Vec4::new((r + l) / (r - l), (t + b) / (t - b), -(f + n) / (f - n), -1.0),
                Vec4::new(0.0, 0.0, -2.0 * f * n / (f - n), 0.0),
            )
        }
    }

    pub fn try_projection_matrix(&self) -> Result<Mat4> {
        self.validate()?;

        let (n, f) = (self.near, self.far);
        let (l, r, t, b) = (self.left, self.right, self.top, self.bottom);
        const REASON: &str = "Bad viewing frustum: projection matrix cannot be computed";

        check_ratio(r + l, r - l, REASON)?;
        check_ratio(t + b, t - b, REASON)?;
        check_ratio(f + n, f - n, REASON)?;
        if self.orthographic {
            check_ratio(2.0, r - l, REASON)?;
            check_ratio(2.0, t - b, REASON)?;
            check_ratio(2.0, f - n, REASON)?;
        } else {
            check_ratio(2.0 * f * n, f - n, REASON)?;
            check_ratio(2.0 * n, r - l, REASON)?;
            check_ratio(2.0 * n, t - b, REASON)?;
        }

        Ok(self.projection_matrix())
    }

    // ===== PLANES =====

    /// Boundary planes in eye space (top, right, bottom, left, near, far).
    ///
    /// Normals point out of the volume: a point is inside when its
    /// distance to every plane is `<= 0`.
    pub fn planes(&self) -> [Plane3; 6] {
        self.planes_in(&Mat4::IDENTITY)
    }

    /// Boundary planes after moving the frustum by `view`.
    ///
    /// The frustum corners are transformed and the planes rebuilt from
    /// them, so the planes go through the right points for any affine
    /// `view`. Outward orientation is only kept by rigid (rotation +
    /// translation) views; no inverse-transpose is applied.
    pub fn planes_in(&self, view: &Mat4) -> [Plane3; 6] {
        let m = view.as_dmat4();
        let (n, f) = (self.near as f64, self.far as f64);
        let (l, r, t, b) = (self.left as f64, self.right as f64, self.top as f64, self.bottom as f64);
        let point = |x: f64, y: f64, z: f64| m.transform_point3(DVec3::new(x, y, z));

        // Far rectangle: the near one pushed back along the eye rays.
        let s = if self.orthographic { 1.0 } else { f / n };

        let near_lb = point(l, b, -n);
        let near_lt = point(l, t, -n);
        let near_rt = point(r, t, -n);
        let near_rb = point(r, b, -n);
        let far_lb = point(l * s, b * s, -f);
        let far_lt = point(l * s, t * s, -f);
        let far_rt = point(r * s, t * s, -f);
        let far_rb = point(r * s, b * s, -f);

        let [top, right, bottom, left] = if self.orthographic {
            [
                Plane3::from_dpoints(near_rt, far_rt, near_lt),
                Plane3::from_dpoints(near_rb, far_rb, near_rt),
                Plane3::from_dpoints(near_lb, far_lb, near_rb),
                Plane3::from_dpoints(near_lt, far_lt, near_lb),
            ]
        } else {
            let eye = point(0.0, 0.0, 0.0);
            [
                Plane3::from_dpoints(eye, near_rt, near_lt),
                Plane3::from_dpoints(eye, near_rb, near_rt),
                Plane3::from_dpoints(eye, near_lb, near_rb),
                Plane3::from_dpoints(eye, near_lt, near_lb),
            ]
        };

        [
            top,
            right,
            bottom,
            left,
            Plane3::from_dpoints(near_lb, near_rb, near_rt),
            Plane3::from_dpoints(far_lb, far_rt, far_rb),
        ]
    }

    // ===== DEPTH =====

    /// Eye-space depth of an integer depth buffer value in `[zmin, zmax]`.
    pub fn z_to_depth(&self, z: i64, zmin: i64, zmax: i64) -> f32 {
        self.normalized_z_to_depth(normalize_z(z, zmin, zmax))
    }

    pub fn try_z_to_depth(&self, z: i64, zmin: i64, zmax: i64) -> Result<f32> {
        self.validate()?;
        if zmax == zmin {
            return Err(domain_error("Bad call to z_to_depth: zmax == zmin"));
        }
        if zmax.checked_sub(zmin).is_none() {
            return Err(domain_error("Bad call to z_to_depth: zmax - zmin overflows"));
        }
        self.try_normalized_z_to_depth(normalize_z(z, zmin, zmax))
    }

    /// Eye-space depth (negative in front of the eye) of a depth value in `[0, 1]`.
    pub fn normalized_z_to_depth(&self, z: f32) -> f32 {
        let (n, f) = (self.near, self.far);
        let zp = z * 2.0 - 1.0;

        if self.orthographic {
            -(zp * (f - n) + (f + n)) / 2.0
        } else {
            2.0 * f * n / (zp * (f - n) - f - n)
        }
    }

    pub fn try_normalized_z_to_depth(&self, z: f32) -> Result<f32> {
        self.validate()?;
        if !self.orthographic {
            let (n, f) = (self.near, self.far);
            let zp = z * 2.0 - 1.0;
            check_ratio(
                2.0 * f * n,
                zp * (f - n) - f - n,
                "normalized_z_to_depth cannot be computed: near and far clipping planes may be too close to each other",
            )?;
        }
        Ok(self.normalized_z_to_depth(z))
    }

    /// Integer depth buffer value in `[zmin, zmax]` of an eye-space depth.
    pub fn depth_to_z(&self, depth: f32, zmin: i64, zmax: i64) -> i64 {
        let (n, f) = (self.near, self.far);
        let zp = if self.orthographic {
            -(2.0 * depth + f + n) / (f - n)
        } else {
            (2.0 * f * n / depth + f + n) / (f - n)
        };

        denormalize_z(zp, zmin, zmax)
    }

    pub fn try_depth_to_z(&self, depth: f32, zmin: i64, zmax: i64) -> Result<i64> {
        self.validate()?;

        let (n, f) = (self.near, self.far);
        const TOO_CLOSE: &str = "Bad viewing frustum: near and far clipping planes are too close to each other";

        if self.orthographic {
            check_ratio(2.0 * depth + f + n, f - n, TOO_CLOSE)?;
        } else {
            check_ratio(2.0 * f * n, depth, "Bad call to depth_to_z: value of depth is too small")?;
            check_ratio(2.0 * f * n / depth + f + n, f - n, TOO_CLOSE)?;
        }

        Ok(self.depth_to_z(depth, zmin, zmax))
    }

    // ===== RADII =====

    /// Size at `point`'s depth of something `radius` wide on the near plane.
    pub fn world_radius(&self, point: Vec3, radius: f32) -> f32 {
        radius * (point.z / -self.near)
    }

    pub fn try_world_radius(&self, point: Vec3, radius: f32) -> Result<f32> {
        self.validate()?;
        check_ratio(point.z, self.near, "Bad call to world_radius")?;
        Ok(self.world_radius(point, radius))
    }

    /// Size on the near plane of something `radius` wide at `point`'s depth.
    pub fn screen_radius(&self, point: Vec3, radius: f32) -> f32 {
        radius * (-self.near / point.z)
    }

    pub fn try_screen_radius(&self, point: Vec3, radius: f32) -> Result<f32> {
        self.validate()?;
        check_ratio(self.near, point.z, "Bad call to screen_radius")?;
        Ok(self.screen_radius(point, radius))
    }

    // ===== SCREEN =====

    /// Screen coordinates (near rectangle mapped to [-1, 1]²) to a point
    /// of the near rectangle.
    pub fn screen_to_local(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            self.left + (self.right - self.left) * (1.0 + screen.x) / 2.0,
            self.bottom + (self.top - self.bottom) * (1.0 + screen.y) / 2.0,
        )
    }

    /// Point of the near rectangle to screen coordinates.
    pub fn local_to_screen(&self, local: Vec2) -> Vec2 {
        Vec2::new(
            (self.left - 2.0 * local.x + self.right) / (self.left - self.right),
            (self.bottom - 2.0 * local.y + self.top) / (self.bottom - self.top),
        )
    }

    pub fn try_local_to_screen(&self, local: Vec2) -> Result<Vec2> {
        self.validate()?;
        const REASON: &str = "Bad viewing frustum: local-to-screen transformation cannot be computed";
        check_ratio(self.left - 2.0 * local.x + self.right, self.left - self.right, REASON)?;
        check_ratio(self.bottom - 2.0 * local.y + self.top, self.bottom - self.top, REASON)?;
        Ok(self.local_to_screen(local))
    }

    /// Screen coordinates of an eye-space point.
    ///
    /// Points in the eye plane (`z == 0`) are not divided.
    pub fn project_point_to_screen(&self, point: Vec3) -> Vec2 {
        self.local_to_screen(self.project_to_near(point))
    }

    pub fn try_project_point_to_screen(&self, point: Vec3) -> Result<Vec2> {
        self.validate()?;
        if !self.orthographic && point.z != 0.0 {
            const REASON: &str = "Bad point passed to project_point_to_screen";
            check_ratio(self.near * point.x, point.z, REASON)?;
            check_ratio(self.near * point.y, point.z, REASON)?;
        }
        self.try_local_to_screen(self.project_to_near(point))
    }

    fn project_to_near(&self, point: Vec3) -> Vec2 {
        if self.orthographic || point.z == 0.0 {
            Vec2::new(point.x, point.y)
        } else {
            Vec2::new(self.near * point.x / -point.z, self.near * point.y / -point.z)
        }
    }

    /// Eye-space ray through a screen point.
    pub fn project_screen_to_ray(&self, screen: Vec2) -> Ray3 {
        let local = self.screen_to_local(screen);

        if self.orthographic {
            Ray3::new(local.extend(0.0), Vec3::NEG_Z)
        } else {
            Ray3::from_points(Vec3::ZERO, local.extend(-self.near))
        }
    }

    /// Sub-frustum seen through a screen-space rectangle.
    pub fn window(&self, left: f32, right: f32, top: f32, bottom: f32) -> Frustum {
        let bl = self.screen_to_local(Vec2::new(left, bottom));
        let tr = self.screen_to_local(Vec2::new(right, top));

        Frustum::new(self.near, self.far, bl.x, tr.x, tr.y, bl.y, self.orthographic)
    }

    // ===== CULLING =====

    /// Test if an eye-space point is inside the frustum (boundary included).
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes().iter().all(|plane| plane.distance_to(point) <= 0.0)
    }

    /// Test if an eye-space AABB intersects this frustum.
    ///
    /// For each plane, the AABB corner most against the outward normal is
    /// tested. If that corner is outside, the AABB is fully outside.
    ///
    /// May return false positives (conservative), never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes()
            .iter()
            .all(|plane| plane.distance_to(aabb.negative_vertex(plane.normal)) <= 0.0)
    }

    /// Classify an eye-space AABB against the frustum (3-way test).
    ///
    /// - If the innermost corner is outside any plane → `Outside` (early out)
    /// - If the outermost corner is outside any plane → at least `Partial`
    /// - Otherwise → `Inside`
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.planes() {
            if plane.distance_to(aabb.negative_vertex(plane.normal)) > 0.0 {
                return FrustumTest::Outside;
            }
            if plane.distance_to(aabb.positive_vertex(plane.normal)) > 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }
}

// ===== HELPERS =====

#[track_caller]
fn domain_error(reason: &str) -> Error {
    Diagnostics::log_and_return_error(SOURCE, Error::Domain(reason.to_string()))
}

/// `num / den` is finite.
#[track_caller]
fn check_ratio(num: f32, den: f32, reason: &str) -> Result<()> {
    if den == 0.0 || (den.abs() < 1.0 && num.abs() > f32::MAX * den.abs()) {
        return Err(domain_error(reason));
    }
    Ok(())
}

/// Depth buffer value to `[0, 1]`. Values past `zmax + 1` wrap back by one range.
fn normalize_z(z: i64, zmin: i64, zmax: i64) -> f32 {
    let zdiff = zmax.wrapping_sub(zmin);
    let z = if z > zmax.saturating_add(1) { z.wrapping_sub(zdiff) } else { z };
    (z as f32 - zmin as f32) / zdiff as f32
}

/// Clip-space Z in `[-1, 1]` to a depth buffer value.
fn denormalize_z(zp: f32, zmin: i64, zmax: i64) -> i64 {
    let zdiff = zmax.wrapping_sub(zmin) as f64;
    ((0.5 * (zp as f64 + 1.0) * zdiff) as i64).saturating_add(zmin)
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
