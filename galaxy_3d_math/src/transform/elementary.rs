/// Elementary transforms: shear and Euler rotation builders, and the
/// inverse angle extraction.
///
/// Conventions (column vectors, `p' = M * p`):
/// - 2D shear `h` maps `x' = x + h * y`
/// - 3D shear `(xy, xz, yz)` maps `x' = x + xy * y + xz * z`, `y' = y + yz * z`
/// - XYZ Euler angles rotate about X first, then Y, then Z:
///   `R = Rz(r.z) * Ry(r.y) * Rx(r.x)`

use glam::{DVec2, DVec3, Mat3, Mat4, Vec2, Vec3};

/// 2D affine shear matrix.
pub fn shear_matrix_2d(h: f32) -> Mat3 {
    Mat3::from_cols(Vec3::X, Vec3::new(h, 1.0, 0.0), Vec3::Z)
}

/// 3D affine shear matrix. `h = (xy, xz, yz)`.
pub fn shear_matrix_3d(h: Vec3) -> Mat4 {
    Mat4::from_cols(
        glam::Vec4::X,
        glam::Vec4::new(h.x, 1.0, 0.0, 0.0),
        glam::Vec4::new(h.y, h.z, 1.0, 0.0),
        glam::Vec4::W,
    )
}

/// Rotation matrix for XYZ Euler angles (radians).
pub fn euler_xyz_matrix(r: Vec3) -> Mat4 {
    Mat4::from_rotation_z(r.z) * Mat4::from_rotation_y(r.y) * Mat4::from_rotation_x(r.x)
}

/// Rotation angle of a 2D affine matrix.
///
/// The X and Y axes are normalized first, so uniform or per-axis scale
/// does not disturb the result.
pub fn extract_angle(mat: &Mat3) -> f32 {
    let i = Vec2::new(mat.x_axis.x, mat.x_axis.y).as_dvec2();
    let j = Vec2::new(mat.y_axis.x, mat.y_axis.y).as_dvec2();
    angle_from_axes(i.normalize_or_zero(), j.normalize_or_zero()) as f32
}

/// XYZ Euler angles of the rotation part of a 3D affine matrix.
///
/// Each axis is normalized first. The returned Y angle lies in
/// `[-π/2, π/2]`; X and Z lie in `[-π, π]`.
pub fn extract_euler_xyz(mat: &Mat4) -> Vec3 {
    let i = mat.x_axis.truncate().as_dvec3().normalize_or_zero();
    let j = mat.y_axis.truncate().as_dvec3().normalize_or_zero();
    let k = mat.z_axis.truncate().as_dvec3().normalize_or_zero();
    euler_xyz_from_axes(i, j, k).as_vec3()
}

pub(crate) fn angle_from_axes(i: DVec2, j: DVec2) -> f64 {
    -j.x.atan2(i.x)
}

/// Angles from the three (unit) columns of a rotation matrix.
pub(crate) fn euler_xyz_from_axes(i: DVec3, j: DVec3, k: DVec3) -> DVec3 {
    let rx = j.z.atan2(k.z);

    // Undo the X rotation: the remaining Rz * Ry cannot gimbal-lock.
    let (sin_x, cos_x) = rx.sin_cos();
    let n1 = j * cos_x - k * sin_x;

    let cos_y = (i.x * i.x + i.y * i.y).sqrt();
    let ry = (-i.z).atan2(cos_y);
    let rz = (-n1.x).atan2(n1.y);

    DVec3::new(rx, ry, rz)
}

#[cfg(test)]
#[path = "elementary_tests.rs"]
mod tests;
