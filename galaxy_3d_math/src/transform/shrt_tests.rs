use glam::{Mat3, Mat4, Vec2, Vec3};
use crate::error::Error;
use super::*;

fn max_diff3(a: &Mat3, b: &Mat3) -> f32 {
    (*a - *b).to_cols_array().iter().fold(0.0, |m, v| m.max(v.abs()))
}

fn max_diff4(a: &Mat4, b: &Mat4) -> f32 {
    (*a - *b).to_cols_array().iter().fold(0.0, |m, v| m.max(v.abs()))
}

fn near(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn vec3_near(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-5
}

const METHODS: [Extraction; 2] = [Extraction::Fast, Extraction::Robust];

// ============================================================================
// Identity and known components
// ============================================================================

#[test]
fn test_identity_2d() {
    for method in METHODS {
        let parts = Mat3::IDENTITY.extract_shrt(method).unwrap();

        assert_eq!(parts.scale, Vec2::ONE);
        assert_eq!(parts.shear, 0.0);
        assert_eq!(parts.rotation, 0.0);
        assert_eq!(parts.translation, Vec2::ZERO);
    }
}

#[test]
fn test_identity_3d() {
    for method in METHODS {
        let parts = Mat4::IDENTITY.extract_shrt(method).unwrap();

        assert_eq!(parts.scale, Vec3::ONE);
        assert_eq!(parts.shear, Vec3::ZERO);
        assert_eq!(parts.rotation, Vec3::ZERO);
        assert_eq!(parts.translation, Vec3::ZERO);
    }
}

#[test]
fn test_recovers_known_parts_2d() {
    let original = Shrt2 {
        scale: Vec2::new(1.5, 0.25),
        shear: -0.75,
        rotation: 0.6,
        translation: Vec2::new(-3.0, 8.0),
    };

    for method in METHODS {
        let parts = extract_shrt(&original.to_matrix(), method).unwrap();

        assert!((parts.scale - original.scale).abs().max_element() < 1e-5);
        assert!(near(parts.shear, original.shear));
        assert!(near(parts.rotation, original.rotation));
        assert_eq!(parts.translation, original.translation);
    }
}

#[test]
fn test_recovers_known_parts_3d() {
    let original = Shrt3 {
        scale: Vec3::new(0.5, 1.25, 2.0),
        shear: Vec3::new(0.3, -1.1, 0.7),
        rotation: Vec3::new(0.4, -0.9, 2.2),
        translation: Vec3::new(1.0, -2.0, 3.0),
    };

    for method in METHODS {
        let parts = extract_shrt(&original.to_matrix(), method).unwrap();

        assert!(vec3_near(parts.scale, original.scale), "{:?}", parts.scale);
        assert!(vec3_near(parts.shear, original.shear), "{:?}", parts.shear);
        assert!(vec3_near(parts.rotation, original.rotation), "{:?}", parts.rotation);
        assert_eq!(parts.translation, original.translation);
    }
}

// ============================================================================
// Reflections
// ============================================================================

#[test]
fn test_negative_first_scale_is_recovered_2d() {
    let original = Shrt2 {
        scale: Vec2::new(-2.0, 3.0),
        shear: 0.5,
        rotation: -1.0,
        translation: Vec2::ZERO,
    };

    let parts = original.to_matrix().extract_shrt(Extraction::Fast).unwrap();

    assert!(near(parts.scale.x, -2.0));
    assert!(near(parts.scale.y, 3.0));
    assert!(near(parts.shear, 0.5));
    assert!(near(parts.rotation, -1.0));
}

#[test]
fn test_negative_first_scale_is_recovered_3d() {
    let original = Shrt3 {
        scale: Vec3::new(-1.0, 2.0, 0.5),
        shear: Vec3::new(0.2, 0.4, -0.6),
        rotation: Vec3::new(0.1, 0.2, 0.3),
        translation: Vec3::ZERO,
    };

    let parts = original.to_matrix().extract_shrt(Extraction::Fast).unwrap();

    assert!(vec3_near(parts.scale, original.scale));
    assert!(vec3_near(parts.shear, original.shear));
    assert!(vec3_near(parts.rotation, original.rotation));
}

#[test]
fn test_reflection_moves_to_first_axis() {
    // Mirror in Y: the sign ends up on X and the rotation absorbs a half turn.
    let m = Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0));

    for method in METHODS {
        let parts = m.extract_shrt(method).unwrap();

        assert!(parts.scale.x < 0.0);
        assert!(parts.scale.y > 0.0 && parts.scale.z > 0.0);
        assert!(max_diff4(&parts.to_matrix(), &m) < ROUND_TRIP_TOLERANCE);
    }
}

#[test]
fn test_rotation_part_is_proper() {
    let m = Shrt3 {
        scale: Vec3::new(1.0, -2.0, -3.0),
        shear: Vec3::new(0.5, 0.0, 0.25),
        rotation: Vec3::new(1.0, 0.5, -2.0),
        translation: Vec3::new(1.0, 1.0, 1.0),
    }
    .to_matrix();

    let rotation = m.sans_scaling_and_shear().unwrap();
    let det = Mat3::from_mat4(rotation).determinant();

    assert!((det - 1.0).abs() < 1e-5);
    assert_eq!(rotation.w_axis, m.w_axis);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_zero_scale_fails() {
    let m = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));

    for method in METHODS {
        assert!(matches!(m.extract_shrt(method), Err(Error::DecompositionFailed(_))));
    }

    let m2 = Mat3::from_scale(Vec2::new(0.0, 4.0));
    assert!(m2.extract_shrt(Extraction::Fast).is_err());
}

#[test]
fn test_zero_matrix_fails() {
    assert!(Mat4::ZERO.extract_shrt(Extraction::Fast).is_err());
    assert!(Mat4::ZERO.extract_shrt(Extraction::Robust).is_err());
    assert!(Mat3::ZERO.extract_shrt(Extraction::Robust).is_err());
}

#[test]
fn test_robust_rejects_singular_block() {
    // Second column is twice the first.
    let m = Mat3::from_cols(
        Vec3::new(1.0, 2.0, 0.0),
        Vec3::new(2.0, 4.0, 0.0),
        Vec3::new(5.0, 6.0, 1.0),
    );

    let err = m.extract_shrt(Extraction::Robust).unwrap_err();
    assert!(err.to_string().contains("singular"));

    let m = Mat4::from_cols(
        glam::Vec4::new(1.0, 2.0, 3.0, 0.0),
        glam::Vec4::new(4.0, 5.0, 6.0, 0.0),
        glam::Vec4::new(7.0, 8.0, 9.0, 0.0),
        glam::Vec4::W,
    );
    assert!(m.extract_shrt(Extraction::Robust).is_err());
}

#[test]
fn test_non_finite_fails() {
    let mut m = Mat4::IDENTITY;
    m.y_axis.x = f32::NAN;

    for method in METHODS {
        assert!(m.extract_shrt(method).is_err());
    }
}

// ============================================================================
// Scaling helpers
// ============================================================================

#[test]
fn test_extract_scaling() {
    let m = Mat4::from_translation(Vec3::new(9.0, 9.0, 9.0))
        * Mat4::from_rotation_y(0.7)
        * Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));

    assert!(vec3_near(m.extract_scaling().unwrap(), Vec3::new(2.0, 3.0, 4.0)));

    let (scale, shear) = m.extract_scaling_and_shear().unwrap();
    assert!(vec3_near(scale, Vec3::new(2.0, 3.0, 4.0)));
    assert!(vec3_near(shear, Vec3::ZERO));
}

#[test]
fn test_sans_scaling_keeps_shear() {
    let original = Shrt3 {
        scale: Vec3::new(2.0, 0.5, 3.0),
        shear: Vec3::new(0.25, -0.5, 1.0),
        rotation: Vec3::new(-0.3, 0.6, 1.2),
        translation: Vec3::new(4.0, 5.0, -6.0),
    };

    let unscaled = original.to_matrix().sans_scaling().unwrap();
    let parts = unscaled.extract_shrt(Extraction::Fast).unwrap();

    assert!(vec3_near(parts.scale, Vec3::ONE));
    assert!(vec3_near(parts.shear, original.shear));
    assert!(vec3_near(parts.rotation, original.rotation));
    assert!(vec3_near(parts.translation, original.translation));
}

#[test]
fn test_remove_scaling_2d() {
    let original = Shrt2 {
        scale: Vec2::new(3.0, 0.5),
        shear: 0.4,
        rotation: 2.0,
        translation: Vec2::new(1.0, 2.0),
    };

    let mut m = original.to_matrix();
    let scale = m.remove_scaling().unwrap();

    assert!((scale - original.scale).abs().max_element() < 1e-5);

    let expected = Shrt2 { scale: Vec2::ONE, ..original }.to_matrix();
    assert!(max_diff3(&m, &expected) < 1e-5);
}

#[test]
fn test_remove_scaling_and_shear_2d_is_rigid() {
    let mut m = Shrt2 {
        scale: Vec2::new(0.5, 4.0),
        shear: -1.5,
        rotation: -2.5,
        translation: Vec2::new(7.0, -1.0),
    }
    .to_matrix();

    let (scale, shear) = m.remove_scaling_and_shear().unwrap();

    assert!((scale - Vec2::new(0.5, 4.0)).abs().max_element() < 1e-5);
    assert!(near(shear, -1.5));
    assert!((m.x_axis.truncate().length() - 1.0).abs() < 1e-6);
    assert!(m.x_axis.truncate().dot(m.y_axis.truncate()).abs() < 1e-6);
    assert_eq!(m.z_axis.truncate(), Vec2::new(7.0, -1.0));
}
