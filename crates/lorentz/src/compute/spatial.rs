//! Longitudinal and three-dimensional formulas.
//!
//! Kernels here read `[x, y, z]` from the first three components and leave
//! any fourth component untouched.

use super::{euclid, planar, Args, Components};
use crate::Scalar;

/// Polar angle from the beam axis, `atan2(rho, z)`.
#[inline]
pub fn theta_of<S: Scalar>(rho: S, z: S) -> S {
    rho.atan2(z)
}

/// Pseudorapidity `asinh(z / rho)`; `0` at the origin and `+-inf` on the
/// beam axis.
#[inline]
pub fn eta_of<S: Scalar>(rho: S, z: S) -> S {
    if rho == S::ZERO {
        if z == S::ZERO {
            S::ZERO
        } else {
            S::INFINITY.copysign(z)
        }
    } else {
        (z / rho).asinh()
    }
}

/// `rho / tan(theta)`. On the beam axis (`rho = 0`, `theta` of 0 or pi)
/// the length along z is lost and the result is NaN.
#[inline]
pub fn z_of_theta<S: Scalar>(rho: S, theta: S) -> S {
    let (s, c) = theta.sin_cos();
    rho * c / s
}

/// `rho * sinh(eta)`; NaN for `rho = 0` with infinite `eta`.
#[inline]
pub fn z_of_eta<S: Scalar>(rho: S, eta: S) -> S {
    rho * eta.sinh()
}

#[inline]
fn rho_z<S: Scalar>(v: &[S]) -> (S, S) {
    (planar::rho_of(v[0], v[1]), v[2])
}

pub fn z<S: Scalar>(a: &Args<'_, S>) -> S {
    a.lhs[2]
}

pub fn theta<S: Scalar>(a: &Args<'_, S>) -> S {
    let (rho, z) = rho_z(a.lhs);
    theta_of(rho, z)
}

pub fn eta<S: Scalar>(a: &Args<'_, S>) -> S {
    let (rho, z) = rho_z(a.lhs);
    eta_of(rho, z)
}

/// Stored `theta` or `eta`, read directly.
pub fn longitudinal_stored<S: Scalar>(a: &Args<'_, S>) -> S {
    a.lhs[2]
}

pub fn costheta<S: Scalar>(a: &Args<'_, S>) -> S {
    let mag = euclid(a.lhs, a.lhs, 3).sqrt();
    if mag == S::ZERO {
        S::ONE
    } else {
        a.lhs[2] / mag
    }
}

pub fn cottheta<S: Scalar>(a: &Args<'_, S>) -> S {
    let (rho, z) = rho_z(a.lhs);
    if rho == S::ZERO {
        if z < S::ZERO {
            S::NEG_INFINITY
        } else {
            S::INFINITY
        }
    } else {
        z / rho
    }
}

pub fn mag<S: Scalar>(a: &Args<'_, S>) -> S {
    euclid(a.lhs, a.lhs, 3).sqrt()
}

pub fn mag2<S: Scalar>(a: &Args<'_, S>) -> S {
    euclid(a.lhs, a.lhs, 3)
}

/// Cross product of the spatial parts; the result is three-dimensional.
pub fn cross<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let (l, r) = (a.lhs, a.rhs);
    [
        l[1] * r[2] - l[2] * r[1],
        l[2] * r[0] - l[0] * r[2],
        l[0] * r[1] - l[1] * r[0],
        S::ZERO,
    ]
}

/// Angle between the spatial parts; `0` if either is zero.
pub fn deltaangle<S: Scalar>(a: &Args<'_, S>) -> S {
    let norms = (euclid(a.lhs, a.lhs, 3) * euclid(a.rhs, a.rhs, 3)).sqrt();
    if norms == S::ZERO {
        return S::ZERO;
    }
    (euclid(a.lhs, a.rhs, 3) / norms).clamp(-S::ONE, S::ONE).acos()
}

pub fn deltaeta<S: Scalar>(a: &Args<'_, S>) -> S {
    let (rho1, z1) = rho_z(a.lhs);
    let (rho2, z2) = rho_z(a.rhs);
    eta_of(rho1, z1) - eta_of(rho2, z2)
}

pub fn delta_r2<S: Scalar>(a: &Args<'_, S>) -> S {
    let dphi = planar::deltaphi(a);
    let deta = deltaeta(a);
    dphi * dphi + deta * deta
}

pub fn delta_r<S: Scalar>(a: &Args<'_, S>) -> S {
    delta_r2(a).sqrt()
}

/// Rotation about the x axis by `params[0]`.
pub fn rotate_x<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let (s, c) = a.param(0).sin_cos();
    let mut out = super::components(a.lhs);
    let (y, z) = (a.lhs[1], a.lhs[2]);
    out[1] = c * y - s * z;
    out[2] = s * y + c * z;
    out
}

/// Rotation about the y axis by `params[0]`.
pub fn rotate_y<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let (s, c) = a.param(0).sin_cos();
    let mut out = super::components(a.lhs);
    let (x, z) = (a.lhs[0], a.lhs[2]);
    out[0] = c * x + s * z;
    out[2] = -s * x + c * z;
    out
}

/// Rodrigues rotation about the axis in `rhs` by `params[0]`. A zero axis
/// leaves the vector unchanged.
pub fn rotate_axis<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let norm = euclid(a.rhs, a.rhs, 3).sqrt();
    let mut out = super::components(a.lhs);
    if norm == S::ZERO {
        return out;
    }
    let k = [a.rhs[0] / norm, a.rhs[1] / norm, a.rhs[2] / norm];
    let v = [a.lhs[0], a.lhs[1], a.lhs[2]];
    let (s, c) = a.param(0).sin_cos();
    let kv = euclid(&k, &v, 3) * (S::ONE - c);
    let kxv = [
        k[1] * v[2] - k[2] * v[1],
        k[2] * v[0] - k[0] * v[2],
        k[0] * v[1] - k[1] * v[0],
    ];
    for i in 0..3 {
        out[i] = v[i] * c + kxv[i] * s + k[i] * kv;
    }
    out
}

/// Rotation by the quaternion `params = [u, i, j, k]`, assumed unit length.
pub fn rotate_quaternion<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let two = S::TWO;
    let (w, x, y, z) = (a.param(0), a.param(1), a.param(2), a.param(3));
    let m = [
        [
            S::ONE - two * (y * y + z * z),
            two * (x * y - w * z),
            two * (x * z + w * y),
        ],
        [
            two * (x * y + w * z),
            S::ONE - two * (x * x + z * z),
            two * (y * z - w * x),
        ],
        [
            two * (x * z - w * y),
            two * (y * z + w * x),
            S::ONE - two * (x * x + y * y),
        ],
    ];
    let mut out = super::components(a.lhs);
    for (o, row) in out.iter_mut().zip(&m) {
        *o = euclid(row, a.lhs, 3);
    }
    out
}
