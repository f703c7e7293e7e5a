/// Successor / predecessor: step a float by one unit in the last place.
///
/// Stepping works on the IEEE-754 bit pattern rather than on the value:
/// - `±0` step to the smallest subnormal of the matching sign
/// - positive values step by incrementing the bits, negative values by
///   decrementing them (the largest finite value steps to infinity)
/// - NaN and `±∞` are returned unchanged

/// Floating-point types that can be stepped by one representable value.
pub trait FloatStep: Copy {
    /// Next representable value toward +∞.
    fn successor(self) -> Self;

    /// Next representable value toward -∞.
    fn predecessor(self) -> Self;
}

macro_rules! impl_float_step {
    ($t:ty, $bits:ty) => {
        impl FloatStep for $t {
            fn successor(self) -> Self {
                if self.is_nan() || self.is_infinite() {
                    return self;
                }

                let bits: $bits = self.to_bits();
                if self == 0.0 {
                    // Both zeros step to the smallest positive subnormal.
                    return <$t>::from_bits(1);
                }

                if self > 0.0 {
                    <$t>::from_bits(bits + 1)
                } else {
                    <$t>::from_bits(bits - 1)
                }
            }

            fn predecessor(self) -> Self {
                if self.is_nan() || self.is_infinite() {
                    return self;
                }

                let bits: $bits = self.to_bits();
                if self == 0.0 {
                    return -<$t>::from_bits(1);
                }

                if self > 0.0 {
                    <$t>::from_bits(bits - 1)
                } else {
                    <$t>::from_bits(bits + 1)
                }
            }
        }
    };
}

impl_float_step!(f32, u32);
impl_float_step!(f64, u64);

/// Next representable value after `x` toward +∞.
pub fn successor<T: FloatStep>(x: T) -> T {
    x.successor()
}

/// Next representable value before `x` toward -∞.
pub fn predecessor<T: FloatStep>(x: T) -> T {
    x.predecessor()
}

pub fn succf(x: f32) -> f32 {
    x.successor()
}

pub fn predf(x: f32) -> f32 {
    x.predecessor()
}

pub fn succd(x: f64) -> f64 {
    x.successor()
}

pub fn predd(x: f64) -> f64 {
    x.predecessor()
}

#[cfg(test)]
#[path = "ulp_tests.rs"]
mod tests;
