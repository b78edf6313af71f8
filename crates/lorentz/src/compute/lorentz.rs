//! Four-vector formulas. Operands are canonical `[x, y, z, t]`.

use super::{euclid, planar, Args, Components};
use crate::Scalar;

/// Signed invariant mass: `sign(t^2 - p^2) * sqrt(|t^2 - p^2|)`.
///
/// Near-lightlike vectors may produce a slightly negative `t^2 - p^2`
/// through cancellation; the sign is kept instead of producing NaN.
#[inline]
pub fn tau_of<S: Scalar>(t: S, p2: S) -> S {
    (t * t - p2).signed_sqrt()
}

/// Inverse of [`tau_of`]; a negative `tau` encodes a spacelike vector.
#[inline]
pub fn t_of<S: Scalar>(tau: S, p2: S) -> S {
    (tau * tau.abs() + p2).max(S::ZERO).sqrt()
}

#[inline]
fn p2<S: Scalar>(v: &[S]) -> S {
    euclid(v, v, 3)
}

#[inline]
fn tau2_of<S: Scalar>(v: &[S]) -> S {
    v[3] * v[3] - p2(v)
}

pub fn t<S: Scalar>(a: &Args<'_, S>) -> S {
    a.lhs[3]
}

pub fn t2<S: Scalar>(a: &Args<'_, S>) -> S {
    a.lhs[3] * a.lhs[3]
}

pub fn tau<S: Scalar>(a: &Args<'_, S>) -> S {
    tau2_of(a.lhs).signed_sqrt()
}

pub fn tau2<S: Scalar>(a: &Args<'_, S>) -> S {
    tau2_of(a.lhs)
}

// Direct reads from tau storage.

pub fn tau_stored<S: Scalar>(a: &Args<'_, S>) -> S {
    a.lhs[3]
}

pub fn tau2_stored<S: Scalar>(a: &Args<'_, S>) -> S {
    let tau = a.lhs[3];
    tau * tau.abs()
}

/// `|p| / t`
pub fn beta<S: Scalar>(a: &Args<'_, S>) -> S {
    let mag = p2(a.lhs).sqrt();
    let t = a.lhs[3];
    if t == S::ZERO {
        if mag == S::ZERO {
            S::ZERO
        } else {
            S::INFINITY
        }
    } else {
        mag / t
    }
}

/// `t / tau`
pub fn gamma<S: Scalar>(a: &Args<'_, S>) -> S {
    let t = a.lhs[3];
    let tau = tau(a);
    if tau == S::ZERO {
        S::INFINITY.copysign(t)
    } else {
        t / tau
    }
}

/// `0.5 ln((t + z) / (t - z))`
pub fn rapidity<S: Scalar>(a: &Args<'_, S>) -> S {
    let (z, t) = (a.lhs[2], a.lhs[3]);
    S::HALF * ((t + z) / (t - z)).ln()
}

/// Transverse energy squared, `t^2 rho^2 / |p|^2`.
pub fn et2<S: Scalar>(a: &Args<'_, S>) -> S {
    let mag2 = p2(a.lhs);
    if mag2 == S::ZERO {
        return S::ZERO;
    }
    let t = a.lhs[3];
    t * t * planar::rho2(a) / mag2
}

pub fn et<S: Scalar>(a: &Args<'_, S>) -> S {
    let mag = p2(a.lhs).sqrt();
    if mag == S::ZERO {
        return S::ZERO;
    }
    a.lhs[3] * planar::rho(a) / mag
}

/// Transverse mass squared, `t^2 - z^2`.
pub fn mt2<S: Scalar>(a: &Args<'_, S>) -> S {
    let (z, t) = (a.lhs[2], a.lhs[3]);
    t * t - z * z
}

pub fn mt<S: Scalar>(a: &Args<'_, S>) -> S {
    mt2(a).signed_sqrt()
}

pub fn is_timelike<S: Scalar>(a: &Args<'_, S>) -> bool {
    tau2_of(a.lhs) > a.param(0)
}

pub fn is_spacelike<S: Scalar>(a: &Args<'_, S>) -> bool {
    tau2_of(a.lhs) < -a.param(0)
}

pub fn is_lightlike<S: Scalar>(a: &Args<'_, S>) -> bool {
    tau2_of(a.lhs).abs() <= a.param(0)
}

/// Boost along one axis given `gamma` and `beta * gamma`.
#[inline]
fn boost_along<S: Scalar>(v: &[S], axis: usize, gam: S, bgam: S) -> Components<S> {
    let mut out = super::components(v);
    let (p, t) = (v[axis], v[3]);
    out[axis] = gam * p + bgam * t;
    out[3] = bgam * p + gam * t;
    out
}

#[inline]
fn from_beta<S: Scalar>(v: &[S], axis: usize, beta: S) -> Components<S> {
    let gam = (S::ONE - beta * beta).sqrt().recip();
    boost_along(v, axis, gam, beta * gam)
}

/// A negative `gamma` boosts towards the negative axis. `|gamma| < 1` is not
/// a boost and yields NaN components.
#[inline]
fn from_gamma<S: Scalar>(v: &[S], axis: usize, gamma: S) -> Components<S> {
    let bgam = (gamma * gamma - S::ONE).sqrt().copysign(gamma);
    boost_along(v, axis, gamma.abs(), bgam)
}

pub fn boost_x_beta<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    from_beta(a.lhs, 0, a.param(0))
}

pub fn boost_y_beta<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    from_beta(a.lhs, 1, a.param(0))
}

pub fn boost_z_beta<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    from_beta(a.lhs, 2, a.param(0))
}

pub fn boost_x_gamma<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    from_gamma(a.lhs, 0, a.param(0))
}

pub fn boost_y_gamma<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    from_gamma(a.lhs, 1, a.param(0))
}

pub fn boost_z_gamma<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    from_gamma(a.lhs, 2, a.param(0))
}

/// General boost by the velocity `b`.
fn boost_by<S: Scalar>(v: &[S], b: [S; 3]) -> Components<S> {
    let b2 = euclid(&b, &b, 3);
    let gam = (S::ONE - b2).sqrt().recip();
    let bgam = gam * gam / (S::ONE + gam);
    let bp = euclid(&b, v, 3);
    let t = v[3];
    let shift = bgam * bp + gam * t;
    [
        v[0] + b[0] * shift,
        v[1] + b[1] * shift,
        v[2] + b[2] * shift,
        gam * (t + bp),
    ]
}

/// Boost by the velocity held in `rhs` (a three-vector).
pub fn boost_beta3<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    boost_by(a.lhs, [a.rhs[0], a.rhs[1], a.rhs[2]])
}

/// Boost by the velocity of the four-vector in `rhs`.
pub fn boost_p4<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let t = a.rhs[3];
    boost_by(a.lhs, [a.rhs[0] / t, a.rhs[1] / t, a.rhs[2] / t])
}

/// Boost into the rest frame of the four-vector in `rhs`.
pub fn boost_cm_of_p4<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let t = a.rhs[3];
    boost_by(a.lhs, [-a.rhs[0] / t, -a.rhs[1] / t, -a.rhs[2] / t])
}

/// General linear map of `[x, y, z, t]` by the row-major 4x4 matrix in
/// `params`.
pub fn transform4d<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let mut out = [S::ZERO; 4];
    for (o, row) in out.iter_mut().zip(a.params.chunks_exact(4)) {
        *o = row.iter().zip(a.lhs).fold(S::ZERO, |acc, (&m, &v)| acc + m * v);
    }
    out
}

/// Velocity `p / t` as a three-vector.
pub fn to_beta3<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let t = a.lhs[3];
    [a.lhs[0] / t, a.lhs[1] / t, a.lhs[2] / t, S::ZERO]
}
