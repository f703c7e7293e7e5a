/// SHRT: scale, shear, rotation, translation decomposition.
///
/// An affine matrix is split as `M = T * R * H * S` (column vectors:
/// scale is applied first, translation last):
/// - `S` scale, one factor per axis, sign included
/// - `H` shear, see `shear_matrix_2d` / `shear_matrix_3d`
/// - `R` rotation, an angle (2D) or XYZ Euler angles (3D)
/// - `T` translation, read from the last column
///
/// The linear block is orthogonalized column by column (Gram-Schmidt).
/// The norm of each column after removing its projections on the
/// previous ones is that axis' scale, and the projection coefficients
/// are the shear factors. If the orthonormal basis left over is a
/// reflection, the first axis is negated (scale, basis column, and the
/// shear factors coupled to it) so that `R` is always a proper rotation.
///
/// The bottom row of a 3x3/4x4 matrix (projective part) is ignored.

use glam::{DVec2, DVec3, Mat3, Mat4, Vec2, Vec3};
use crate::error::{Error, Result};
use crate::galaxy3d::Diagnostics;
use super::elementary::{
    angle_from_axes, euler_xyz_from_axes, euler_xyz_matrix, shear_matrix_2d, shear_matrix_3d,
};
use super::singular::singular_values;

const SOURCE: &str = "galaxy3d::Shrt";

/// Largest `|M - compose(extract(M))|` entry expected for well-formed f32 input.
pub const ROUND_TRIP_TOLERANCE: f32 = 1.0e-5;

/// Ratio `σ_min / σ_max` at or below which `Extraction::Robust` treats
/// the linear block as singular.
pub const RANK_TOLERANCE: f64 = 1.0e-9;

/// How the scale/shear/rotation split is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extraction {
    /// Closed-form Gram-Schmidt. Fails only when a column collapses to
    /// exactly zero length; nearly singular input yields huge shears.
    #[default]
    Fast,

    /// Checks the singular values first and rejects numerically singular
    /// or non-finite blocks, then orthogonalizes with a second
    /// correction pass so the rotation stays orthonormal.
    Robust,
}

/// Components of a 2D affine matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shrt2 {
    pub scale: Vec2,
    /// XY shear: `x' = x + shear * y`
    pub shear: f32,
    /// Counter-clockwise angle in radians
    pub rotation: f32,
    pub translation: Vec2,
}

/// Components of a 3D affine matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shrt3 {
    pub scale: Vec3,
    /// (XY, XZ, YZ) shear factors
    pub shear: Vec3,
    /// XYZ Euler angles in radians
    pub rotation: Vec3,
    pub translation: Vec3,
}

impl Shrt2 {
    /// Canonical recomposition: `T * R * H * S`.
    pub fn to_matrix(&self) -> Mat3 {
        Mat3::from_translation(self.translation)
            * Mat3::from_angle(self.rotation)
            * shear_matrix_2d(self.shear)
            * Mat3::from_scale(self.scale)
    }
}

impl Shrt3 {
    /// Canonical recomposition: `T * R * H * S`.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * euler_xyz_matrix(self.rotation)
            * shear_matrix_3d(self.shear)
            * Mat4::from_scale(self.scale)
    }
}

/// Affine matrices that can be split into scale, shear, rotation and
/// translation. Implemented for `Mat3` (2D) and `Mat4` (3D).
pub trait Affine: Sized + Copy {
    /// Per-axis scale (`Vec2` / `Vec3`)
    type Scale;
    /// Shear factors (`f32` / `Vec3`)
    type Shear;
    /// Full decomposition (`Shrt2` / `Shrt3`)
    type Parts;

    /// Split the matrix into its components.
    fn extract_shrt(&self, method: Extraction) -> Result<Self::Parts>;

    /// Rebuild a matrix from its components (`T * R * H * S`).
    fn compose_shrt(parts: &Self::Parts) -> Self;

    /// Scale and shear, leaving the matrix untouched.
    fn extract_scaling_and_shear(&self) -> Result<(Self::Scale, Self::Shear)>;

    /// Strip scale and shear in place, keeping rotation and translation.
    fn remove_scaling_and_shear(&mut self) -> Result<(Self::Scale, Self::Shear)>;

    /// Strip scale in place, keeping shear, rotation and translation.
    fn remove_scaling(&mut self) -> Result<Self::Scale>;

    fn extract_scaling(&self) -> Result<Self::Scale> {
        self.extract_scaling_and_shear().map(|(scale, _)| scale)
    }

    /// Copy of the matrix without scale and shear.
    fn sans_scaling_and_shear(&self) -> Result<Self> {
        let mut m = *self;
        m.remove_scaling_and_shear()?;
        Ok(m)
    }

    /// Copy of the matrix without scale.
    fn sans_scaling(&self) -> Result<Self> {
        let mut m = *self;
        m.remove_scaling()?;
        Ok(m)
    }
}

// ===== 2D =====

impl Affine for Mat3 {
    type Scale = Vec2;
    type Shear = f32;
    type Parts = Shrt2;

    fn extract_shrt(&self, method: Extraction) -> Result<Shrt2> {
        let factors = split_linear(linear_columns_2d(self), method)?;
        let rotation = angle_from_axes(factors.axes[0].truncate(), factors.axes[1].truncate());

        Ok(Shrt2 {
            scale: factors.scale.truncate().as_vec2(),
            shear: factors.shear.x as f32,
            rotation: rotation as f32,
            translation: self.z_axis.truncate(),
        })
    }

    fn compose_shrt(parts: &Shrt2) -> Mat3 {
        parts.to_matrix()
    }

    fn extract_scaling_and_shear(&self) -> Result<(Vec2, f32)> {
        let factors = split_linear(linear_columns_2d(self), Extraction::Fast)?;
        Ok((factors.scale.truncate().as_vec2(), factors.shear.x as f32))
    }

    fn remove_scaling_and_shear(&mut self) -> Result<(Vec2, f32)> {
        let factors = split_linear(linear_columns_2d(self), Extraction::Fast)?;
        let [i, j, _] = factors.axes;

        self.x_axis = i.truncate().as_vec2().extend(self.x_axis.z);
        self.y_axis = j.truncate().as_vec2().extend(self.y_axis.z);
        Ok((factors.scale.truncate().as_vec2(), factors.shear.x as f32))
    }

    fn remove_scaling(&mut self) -> Result<Vec2> {
        let parts = self.extract_shrt(Extraction::Fast)?;
        *self = Mat3::from_translation(parts.translation)
            * Mat3::from_angle(parts.rotation)
            * shear_matrix_2d(parts.shear);
        Ok(parts.scale)
    }
}

// ===== 3D =====

impl Affine for Mat4 {
    type Scale = Vec3;
    type Shear = Vec3;
    type Parts = Shrt3;

    fn extract_shrt(&self, method: Extraction) -> Result<Shrt3> {
        let factors = split_linear(linear_columns_3d(self), method)?;
        let [i, j, k] = factors.axes;

        Ok(Shrt3 {
            scale: factors.scale.as_vec3(),
            shear: factors.shear.as_vec3(),
            rotation: euler_xyz_from_axes(i, j, k).as_vec3(),
            translation: self.w_axis.truncate(),
        })
    }

    fn compose_shrt(parts: &Shrt3) -> Mat4 {
        parts.to_matrix()
    }

    fn extract_scaling_and_shear(&self) -> Result<(Vec3, Vec3)> {
        let factors = split_linear(linear_columns_3d(self), Extraction::Fast)?;
        Ok((factors.scale.as_vec3(), factors.shear.as_vec3()))
    }

    fn remove_scaling_and_shear(&mut self) -> Result<(Vec3, Vec3)> {
        let factors = split_linear(linear_columns_3d(self), Extraction::Fast)?;
        let [i, j, k] = factors.axes;

        self.x_axis = i.as_vec3().extend(self.x_axis.w);
        self.y_axis = j.as_vec3().extend(self.y_axis.w);
        self.z_axis = k.as_vec3().extend(self.z_axis.w);
        Ok((factors.scale.as_vec3(), factors.shear.as_vec3()))
    }

    fn remove_scaling(&mut self) -> Result<Vec3> {
        let parts = self.extract_shrt(Extraction::Fast)?;
        *self = Mat4::from_translation(parts.translation)
            * euler_xyz_matrix(parts.rotation)
            * shear_matrix_3d(parts.shear);
        Ok(parts.scale)
    }
}

/// Free-function form of `Affine::extract_shrt`.
pub fn extract_shrt<M: Affine>(mat: &M, method: Extraction) -> Result<M::Parts> {
    mat.extract_shrt(method)
}

/// Free-function form of `Affine::compose_shrt`.
///
/// ```
/// use galaxy_3d_math::glam::{Mat4, Vec3};
/// use galaxy_3d_math::galaxy3d::transform::{compose_shrt, extract_shrt, Extraction};
///
/// let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::from_rotation_z(0.5);
/// let parts = extract_shrt(&m, Extraction::Fast)?;
/// let back: Mat4 = compose_shrt(&parts);
/// assert!(back.abs_diff_eq(m, 1e-5));
/// # Ok::<(), galaxy_3d_math::galaxy3d::Error>(())
/// ```
pub fn compose_shrt<M: Affine>(parts: &M::Parts) -> M {
    M::compose_shrt(parts)
}

// ===== GRAM-SCHMIDT CORE =====

/// Scale, shear and orthonormal axes of a linear block.
///
/// 2D blocks use `z == 0` throughout and only `shear.x` (XY); their
/// third axis is left zero.
struct LinearFactors {
    scale: DVec3,
    shear: DVec3,
    axes: [DVec3; 3],
}

/// Linear block columns of a 2D matrix, padded to three.
fn linear_columns_2d(mat: &Mat3) -> ([DVec3; 3], usize) {
    let column = |v: Vec3| DVec2::new(v.x as f64, v.y as f64).extend(0.0);
    ([column(mat.x_axis), column(mat.y_axis), DVec3::ZERO], 2)
}

fn linear_columns_3d(mat: &Mat4) -> ([DVec3; 3], usize) {
    let columns = [
        mat.x_axis.truncate().as_dvec3(),
        mat.y_axis.truncate().as_dvec3(),
        mat.z_axis.truncate().as_dvec3(),
    ];
    (columns, 3)
}

#[track_caller]
fn fail(reason: &str) -> Error {
    Diagnostics::log_and_return_error(SOURCE, Error::DecompositionFailed(reason.to_string()))
}

/// A column of length `scale` can be divided by it without overflow.
#[track_caller]
fn check_for_zero_scale(scale: f64, column: DVec3) -> Result<()> {
    if scale.abs() < 1.0 && column.abs().max_element() >= f64::MAX * scale.abs() {
        return Err(fail("Cannot remove zero scaling from matrix"));
    }
    Ok(())
}

#[track_caller]
fn check_rank(cols: &[DVec3; 3], dimension: usize) -> Result<()> {
    let (largest, smallest) = if dimension == 2 {
        let sigma = singular_values([cols[0], cols[1]]);
        (sigma[0], sigma[1])
    } else {
        let sigma = singular_values(*cols);
        (sigma[0], sigma[2])
    };
    crate::math_trace!(SOURCE, "Rank check: singular values {:e} / {:e}", smallest, largest);

    if smallest <= largest * RANK_TOLERANCE {
        return Err(fail(&format!(
            "Matrix is singular (singular values {:e} / {:e})",
            smallest, largest
        )));
    }
    Ok(())
}

fn split_linear(
    (mut cols, dimension): ([DVec3; 3], usize),
    method: Extraction,
) -> Result<LinearFactors> {
    if cols.iter().any(|c| !c.is_finite()) {
        return Err(fail("Matrix has non-finite entries"));
    }

    // Normalizing by the largest entry keeps near-zero blocks well
    // scaled; it is multiplied back into the scale at the end.
    let max_value = cols.iter().map(|c| c.abs().max_element()).fold(0.0, f64::max);
    if max_value != 0.0 {
        for c in cols.iter_mut().take(dimension) {
            check_for_zero_scale(max_value, *c)?;
            *c /= max_value;
        }
    }

    let robust = method == Extraction::Robust;
    if robust {
        check_rank(&cols, dimension)?;
    }

    let [mut x, mut y, mut z] = cols;
    let mut scale = DVec3::ZERO;
    let mut shear = DVec3::ZERO;

    scale.x = x.length();
    check_for_zero_scale(scale.x, x)?;
    x /= scale.x;

    // XY shear, then make y orthogonal to x.
    shear.x = x.dot(y);
    y -= shear.x * x;
    if robust {
        let correction = x.dot(y);
        y -= correction * x;
        shear.x += correction;
    }

    scale.y = y.length();
    check_for_zero_scale(scale.y, y)?;
    y /= scale.y;
    shear.x /= scale.y;

    if dimension == 3 {
        // XZ and YZ shears, then make z orthogonal to x and y.
        shear.y = x.dot(z);
        z -= shear.y * x;
        shear.z = y.dot(z);
        z -= shear.z * y;
        if robust {
            let cx = x.dot(z);
            z -= cx * x;
            let cy = y.dot(z);
            z -= cy * y;
            shear.y += cx;
            shear.z += cy;
        }

        scale.z = z.length();
        check_for_zero_scale(scale.z, z)?;
        z /= scale.z;
        shear.y /= scale.z;
        shear.z /= scale.z;
    }

    let reflected = if dimension == 3 {
        x.dot(y.cross(z)) < 0.0
    } else {
        x.x * y.y - x.y * y.x < 0.0
    };

    if reflected {
        crate::math_debug!(SOURCE, "Reflection detected, negating the X axis");
        scale.x = -scale.x;
        x = -x;
        // XY and XZ couple to the X axis; YZ does not.
        shear.x = -shear.x;
        shear.y = -shear.y;
    }

    scale *= max_value;

    Ok(LinearFactors { scale, shear, axes: [x, y, z] })
}

#[cfg(test)]
#[path = "shrt_tests.rs"]
mod tests;
