//! Transform module: affine matrix decomposition.
//!
//! Splits 2D (`Mat3`) and 3D (`Mat4`) affine matrices into scale, shear,
//! rotation and translation, and rebuilds them in the canonical
//! `T * R * H * S` order.

mod elementary;
mod shrt;
mod singular;

pub use elementary::{
    shear_matrix_2d, shear_matrix_3d, euler_xyz_matrix, extract_angle, extract_euler_xyz,
};
pub use shrt::{
    Affine, Extraction, Shrt2, Shrt3,
    extract_shrt, compose_shrt,
    ROUND_TRIP_TOLERANCE, RANK_TOLERANCE,
};
