/// Scalar functions: rounding, integer division, tolerant comparison.
///
/// All functions are generic over `Float` (implemented for `f32` and
/// `f64`) or operate on `i32`.

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Floating-point scalar usable by the helpers of this module.
pub trait Float:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;
    /// Largest finite value.
    const MAX: Self;

    fn abs(self) -> Self;

    fn floor(self) -> Self;

    fn ceil(self) -> Self;

    /// Conversion toward zero (saturating at the `i32` range).
    fn to_i32(self) -> i32;

    fn from_i32(value: i32) -> Self;
}

macro_rules! impl_float {
    ($t:ty) => {
        impl Float for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }

            #[inline]
            fn floor(self) -> Self {
                <$t>::floor(self)
            }

            #[inline]
            fn ceil(self) -> Self {
                <$t>::ceil(self)
            }

            #[inline]
            fn to_i32(self) -> i32 {
                self as i32
            }

            #[inline]
            fn from_i32(value: i32) -> Self {
                value as $t
            }
        }
    };
}

impl_float!(f32);
impl_float!(f64);

// ===== ROUNDING =====
//
// Results saturate at the i32 range; NaN maps to 0.

/// Largest integer not greater than `x`.
pub fn floor<T: Float>(x: T) -> i32 {
    x.floor().to_i32()
}

/// Smallest integer not less than `x`.
pub fn ceil<T: Float>(x: T) -> i32 {
    x.ceil().to_i32()
}

/// `x` rounded toward zero.
pub fn trunc<T: Float>(x: T) -> i32 {
    x.to_i32()
}

// ===== INTEGER DIVISION =====
//
// divs/mods truncate toward zero: the remainder takes the sign of x.
// divp/modp floor so that the remainder is always in [0, |y|).
// y == 0 panics like the built-in operators. i32::MIN / -1 wraps to i32::MIN.

/// Integer division rounding toward zero.
pub fn divs(x: i32, y: i32) -> i32 {
    x.wrapping_div(y)
}

/// Remainder of `divs`; has the sign of `x`.
pub fn mods(x: i32, y: i32) -> i32 {
    x.wrapping_rem(y)
}

/// Integer division whose remainder is non-negative.
pub fn divp(x: i32, y: i32) -> i32 {
    x.wrapping_div_euclid(y)
}

/// Remainder of `divp`, always in `[0, |y|)`.
pub fn modp(x: i32, y: i32) -> i32 {
    x.wrapping_rem_euclid(y)
}

// ===== INTERPOLATION AND COMPARISON =====

/// Linear interpolation: `a` at `t == 0`, `b` at `t == 1`.
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a * (T::ONE - t) + b * t
}

/// Inverse of `lerp`: the `t` for which `lerp(a, b, t) == m`.
///
/// Returns zero instead of overflowing when `a` and `b` are too close.
pub fn lerp_factor<T: Float>(m: T, a: T, b: T) -> T {
    let d = b - a;
    let n = m - a;

    if d.abs() > T::ONE || n.abs() < T::MAX * d.abs() {
        n / d
    } else {
        T::ZERO
    }
}

pub fn clamp<T: Float>(a: T, low: T, high: T) -> T {
    if a < low {
        low
    } else if a > high {
        high
    } else {
        a
    }
}

/// -1, 0 or 1.
pub fn sign<T: Float>(a: T) -> i32 {
    if a > T::ZERO {
        1
    } else if a < T::ZERO {
        -1
    } else {
        0
    }
}

/// Three-way comparison: `sign(a - b)`.
pub fn cmp<T: Float>(a: T, b: T) -> i32 {
    sign(a - b)
}

/// Three-way comparison treating values within `t` of each other as equal.
pub fn cmpt<T: Float>(a: T, b: T, t: T) -> i32 {
    if is_zero(a - b, t) {
        0
    } else {
        cmp(a, b)
    }
}

/// `true` if `a` lies strictly inside `(-t, t)`.
pub fn is_zero<T: Float>(a: T, t: T) -> bool {
    a > -t && a < t
}

/// `true` if `|a - b| <= t`.
pub fn equal<T: Float>(a: T, b: T, t: T) -> bool {
    (a - b).abs() <= t
}

#[cfg(test)]
#[path = "fun_tests.rs"]
mod tests;
