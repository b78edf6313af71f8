use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Numeric type every formula in the crate is written against.
///
/// Implemented for `f32` and `f64`. Kernels only ever see `S: Scalar`, so a
/// formula written once runs unchanged for single values and for each row of
/// a columnar array.
pub trait Scalar:
    Copy
    + Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + PartialOrd
    + Default
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const HALF: Self;
    const PI: Self;
    const TAU: Self;
    const EPSILON: Self;
    const INFINITY: Self;
    const NEG_INFINITY: Self;

    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn sin_cos(self) -> (Self, Self);
    fn exp(self) -> Self;
    fn ln(self) -> Self;
    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn asinh(self) -> Self;
    fn floor(self) -> Self;
    fn copysign(self, sign: Self) -> Self;

    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    fn clamp(self, lo: Self, hi: Self) -> Self;
    fn recip(self) -> Self;
    fn signum(self) -> Self;
    fn is_nan(self) -> bool;

    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;

    /// `self * self`
    #[inline]
    fn sq(self) -> Self {
        self * self
    }

    /// Square root that keeps the sign of its argument: `sign(v) * sqrt(|v|)`.
    ///
    /// Used wherever a squared quantity may dip below zero through
    /// cancellation (invariant mass of a near-lightlike vector).
    #[inline]
    fn signed_sqrt(self) -> Self {
        self.abs().sqrt().copysign(self)
    }
}

// In std mode, use inherent float methods. In no_std, use libm.
#[cfg(feature = "std")]
mod float_ops {
    macro_rules! inherent {
        ($($name:ident($($arg:ident),*);)*) => {
            ::paste::paste! {
                $(
                    #[inline(always)]
                    pub fn [<$name _f32>](x: f32 $(, $arg: f32)*) -> f32 { x.$name($($arg),*) }
                    #[inline(always)]
                    pub fn [<$name _f64>](x: f64 $(, $arg: f64)*) -> f64 { x.$name($($arg),*) }
                )*
            }
        };
    }

    inherent! {
        sqrt();
        abs();
        sin();
        cos();
        tan();
        acos();
        atan();
        atan2(other);
        exp();
        ln();
        sinh();
        cosh();
        asinh();
        floor();
        copysign(sign);
    }

    #[inline(always)]
    pub fn sin_cos_f32(x: f32) -> (f32, f32) {
        x.sin_cos()
    }
    #[inline(always)]
    pub fn sin_cos_f64(x: f64) -> (f64, f64) {
        x.sin_cos()
    }
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
mod float_ops {
    macro_rules! forward {
        ($($name:ident($($arg:ident),*) => $f64:ident, $f32:ident;)*) => {
            ::paste::paste! {
                $(
                    #[inline(always)]
                    pub fn [<$name _f32>](x: f32 $(, $arg: f32)*) -> f32 { libm::$f32(x $(, $arg)*) }
                    #[inline(always)]
                    pub fn [<$name _f64>](x: f64 $(, $arg: f64)*) -> f64 { libm::$f64(x $(, $arg)*) }
                )*
            }
        };
    }

    forward! {
        sqrt() => sqrt, sqrtf;
        abs() => fabs, fabsf;
        sin() => sin, sinf;
        cos() => cos, cosf;
        tan() => tan, tanf;
        acos() => acos, acosf;
        atan() => atan, atanf;
        atan2(other) => atan2, atan2f;
        exp() => exp, expf;
        ln() => log, logf;
        sinh() => sinh, sinhf;
        cosh() => cosh, coshf;
        asinh() => asinh, asinhf;
        floor() => floor, floorf;
        copysign(sign) => copysign, copysignf;
    }

    #[inline(always)]
    pub fn sin_cos_f32(x: f32) -> (f32, f32) {
        libm::sincosf(x)
    }
    #[inline(always)]
    pub fn sin_cos_f64(x: f64) -> (f64, f64) {
        libm::sincos(x)
    }
}

macro_rules! impl_scalar_float {
    ($t:ident) => {
        ::paste::paste! {
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const HALF: Self = 0.5;
            const PI: Self = core::$t::consts::PI;
            const TAU: Self = core::$t::consts::TAU;
            const EPSILON: Self = $t::EPSILON;
            const INFINITY: Self = $t::INFINITY;
            const NEG_INFINITY: Self = $t::NEG_INFINITY;

            #[inline] fn sqrt(self) -> Self { float_ops::[<sqrt_ $t>](self) }
            #[inline] fn abs(self) -> Self { float_ops::[<abs_ $t>](self) }
            #[inline] fn sin(self) -> Self { float_ops::[<sin_ $t>](self) }
            #[inline] fn cos(self) -> Self { float_ops::[<cos_ $t>](self) }
            #[inline] fn tan(self) -> Self { float_ops::[<tan_ $t>](self) }
            #[inline] fn acos(self) -> Self { float_ops::[<acos_ $t>](self) }
            #[inline] fn atan(self) -> Self { float_ops::[<atan_ $t>](self) }
            #[inline] fn atan2(self, other: Self) -> Self { float_ops::[<atan2_ $t>](self, other) }
            #[inline] fn sin_cos(self) -> (Self, Self) { float_ops::[<sin_cos_ $t>](self) }
            #[inline] fn exp(self) -> Self { float_ops::[<exp_ $t>](self) }
            #[inline] fn ln(self) -> Self { float_ops::[<ln_ $t>](self) }
            #[inline] fn sinh(self) -> Self { float_ops::[<sinh_ $t>](self) }
            #[inline] fn cosh(self) -> Self { float_ops::[<cosh_ $t>](self) }
            #[inline] fn asinh(self) -> Self { float_ops::[<asinh_ $t>](self) }
            #[inline] fn floor(self) -> Self { float_ops::[<floor_ $t>](self) }
            #[inline] fn copysign(self, sign: Self) -> Self { float_ops::[<copysign_ $t>](self, sign) }

            #[inline] fn min(self, other: Self) -> Self { if self < other { self } else { other } }
            #[inline] fn max(self, other: Self) -> Self { if self > other { self } else { other } }
            #[inline] fn clamp(self, lo: Self, hi: Self) -> Self {
                if self < lo { lo } else if self > hi { hi } else { self }
            }
            #[inline] fn recip(self) -> Self { 1.0 / self }
            #[inline] fn signum(self) -> Self {
                if self > 0.0 { 1.0 } else if self < 0.0 { -1.0 } else { 0.0 }
            }
            #[inline] fn is_nan(self) -> bool { $t::is_nan(self) }

            #[inline] fn from_f64(v: f64) -> Self { v as $t }
            #[inline] fn to_f64(self) -> f64 { self as f64 }
        }
        }
    };
}

impl_scalar_float!(f32);
impl_scalar_float!(f64);
