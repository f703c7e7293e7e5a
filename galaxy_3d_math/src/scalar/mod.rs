//! Scalar module: low-level floating-point and integer helpers.
//!
//! Rounding to integers, sign-aware integer division, tolerance
//! comparisons, and bit-exact successor/predecessor stepping. Used by the
//! frustum checks and by the tests of the transform module.

mod fun;
mod ulp;

pub use fun::{
    Float,
    floor, ceil, trunc,
    divs, mods, divp, modp,
    lerp, lerp_factor, clamp, sign, cmp, cmpt, is_zero, equal,
};
pub use ulp::{FloatStep, successor, predecessor, succf, predf, succd, predd};
