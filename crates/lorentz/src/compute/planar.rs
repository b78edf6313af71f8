//! Azimuthal-plane formulas.

use super::{Args, Components};
use crate::Scalar;

/// `sqrt(x^2 + y^2)`
#[inline]
pub fn rho_of<S: Scalar>(x: S, y: S) -> S {
    (x * x + y * y).sqrt()
}

/// `atan2(y, x)`, defined as 0 at the origin.
#[inline]
pub fn phi_of<S: Scalar>(x: S, y: S) -> S {
    if x == S::ZERO && y == S::ZERO {
        S::ZERO
    } else {
        y.atan2(x)
    }
}

#[inline]
pub fn xy_of<S: Scalar>(rho: S, phi: S) -> (S, S) {
    let (s, c) = phi.sin_cos();
    (rho * c, rho * s)
}

/// Wrap an angle into `[-pi, pi)`.
#[inline]
pub fn wrap_phi<S: Scalar>(phi: S) -> S {
    let shifted = phi + S::PI;
    shifted - S::TAU * (shifted / S::TAU).floor() - S::PI
}

pub fn x<S: Scalar>(a: &Args<'_, S>) -> S {
    a.lhs[0]
}

pub fn y<S: Scalar>(a: &Args<'_, S>) -> S {
    a.lhs[1]
}

pub fn rho<S: Scalar>(a: &Args<'_, S>) -> S {
    rho_of(a.lhs[0], a.lhs[1])
}

pub fn rho2<S: Scalar>(a: &Args<'_, S>) -> S {
    a.lhs[0] * a.lhs[0] + a.lhs[1] * a.lhs[1]
}

pub fn phi<S: Scalar>(a: &Args<'_, S>) -> S {
    phi_of(a.lhs[0], a.lhs[1])
}

// Direct reads from (rho, phi) storage.

pub fn rho_polar<S: Scalar>(a: &Args<'_, S>) -> S {
    a.lhs[0]
}

pub fn rho2_polar<S: Scalar>(a: &Args<'_, S>) -> S {
    a.lhs[0] * a.lhs[0]
}

pub fn phi_polar<S: Scalar>(a: &Args<'_, S>) -> S {
    a.lhs[1]
}

/// Rotate `(x, y)` by `params[0]`; remaining components pass through.
pub fn rotate_z<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let (s, c) = a.param(0).sin_cos();
    let mut out = super::components(a.lhs);
    let (x, y) = (a.lhs[0], a.lhs[1]);
    out[0] = c * x - s * y;
    out[1] = s * x + c * y;
    out
}

/// Rotation of `(rho, phi)` storage only touches `phi`.
pub fn rotate_z_polar<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let mut out = super::components(a.lhs);
    out[1] = wrap_phi(a.lhs[1] + a.param(0));
    out
}

/// `phi1 - phi2` wrapped into `[-pi, pi)`.
pub fn deltaphi<S: Scalar>(a: &Args<'_, S>) -> S {
    let p1 = phi_of(a.lhs[0], a.lhs[1]);
    let p2 = phi_of(a.rhs[0], a.rhs[1]);
    wrap_phi(p1 - p2)
}
