//! Formula library.
//!
//! Every kernel is a plain function over [`Scalar`] values laid out by the
//! coordinate system the dispatch table selected for it. Kernels never look at
//! tags; the plan that invokes them guarantees the layout. The functions in
//! this module work for any dimensionality by reading the operand length:
//! components are always `[x, y, z, t]` in canonical order.

pub mod lorentz;
pub mod planar;
pub mod spatial;

use crate::Scalar;

/// Operand values handed to a kernel.
#[derive(Clone, Copy, Debug)]
pub struct Args<'a, S> {
    /// Components of the first operand.
    pub lhs: &'a [S],
    /// Components of the second operand, empty for unary operations.
    pub rhs: &'a [S],
    /// Numeric parameters (angle, factor, tolerance, ...).
    pub params: &'a [S],
}

impl<'a, S: Scalar> Args<'a, S> {
    #[inline]
    pub fn unary(lhs: &'a [S], params: &'a [S]) -> Self {
        Self { lhs, rhs: &[], params }
    }

    #[inline]
    pub fn binary(lhs: &'a [S], rhs: &'a [S], params: &'a [S]) -> Self {
        Self { lhs, rhs, params }
    }

    #[inline]
    pub(crate) fn param(&self, i: usize) -> S {
        self.params[i]
    }
}

/// Formula producing an `O` from operand values.
pub type Kernel<S, O> = fn(&Args<'_, S>) -> O;

/// Output buffer for vector-valued kernels; only the first `len` slots are
/// meaningful.
pub type Components<S> = [S; 4];

#[inline]
pub(crate) fn components<S: Scalar>(values: &[S]) -> Components<S> {
    let mut out = [S::ZERO; 4];
    out[..values.len()].copy_from_slice(values);
    out
}

/// Euclidean dot product of the first `n` components.
#[inline]
pub(crate) fn euclid<S: Scalar>(a: &[S], b: &[S], n: usize) -> S {
    a[..n].iter().zip(&b[..n]).fold(S::ZERO, |acc, (&p, &q)| acc + p * q)
}

/// Spatial part length: planar vectors have two, everything else three.
#[inline]
fn spatial_len<S>(v: &[S]) -> usize {
    v.len().min(3)
}

/// Euclidean in 2D/3D, Minkowski `(+, -, -, -)` in 4D.
pub fn dot<S: Scalar>(a: &Args<'_, S>) -> S {
    let (l, r) = (a.lhs, a.rhs);
    if l.len() == 4 {
        l[3] * r[3] - euclid(l, r, 3)
    } else {
        euclid(l, r, l.len())
    }
}

pub fn add<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let mut out = [S::ZERO; 4];
    for (o, (&p, &q)) in out.iter_mut().zip(a.lhs.iter().zip(a.rhs)) {
        *o = p + q;
    }
    out
}

pub fn subtract<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let mut out = [S::ZERO; 4];
    for (o, (&p, &q)) in out.iter_mut().zip(a.lhs.iter().zip(a.rhs)) {
        *o = p - q;
    }
    out
}

/// Multiply every component by `params[0]`.
pub fn scale<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let factor = a.param(0);
    let mut out = components(a.lhs);
    for o in &mut out[..a.lhs.len()] {
        *o *= factor;
    }
    out
}

/// Divide by `rho` (2D), `mag` (3D) or `|tau|` (4D). Zero-norm vectors are
/// returned unchanged.
pub fn unit<S: Scalar>(a: &Args<'_, S>) -> Components<S> {
    let v = a.lhs;
    let norm = if v.len() == 4 {
        lorentz::tau_of(v[3], euclid(v, v, 3)).abs()
    } else {
        euclid(v, v, v.len()).sqrt()
    };
    let mut out = components(v);
    if norm != S::ZERO {
        for o in &mut out[..v.len()] {
            *o /= norm;
        }
    }
    out
}

pub fn equal<S: Scalar>(a: &Args<'_, S>) -> bool {
    a.lhs == a.rhs
}

pub fn not_equal<S: Scalar>(a: &Args<'_, S>) -> bool {
    a.lhs != a.rhs
}

/// `sum |lhs_i - rhs_i| < params[0]`.
pub fn is_close<S: Scalar>(a: &Args<'_, S>) -> bool {
    let total = a
        .lhs
        .iter()
        .zip(a.rhs)
        .fold(S::ZERO, |acc, (&p, &q)| acc + (p - q).abs());
    total < a.param(0)
}

/// Cosine of the angle between the spatial parts, `None` if either is zero.
fn cos_between<S: Scalar>(a: &Args<'_, S>) -> Option<S> {
    let n = spatial_len(a.lhs);
    let norms = euclid(a.lhs, a.lhs, n) * euclid(a.rhs, a.rhs, n);
    if norms == S::ZERO {
        return None;
    }
    Some(euclid(a.lhs, a.rhs, n) / norms.sqrt())
}

pub fn is_parallel<S: Scalar>(a: &Args<'_, S>) -> bool {
    cos_between(a).is_some_and(|c| c > S::ONE - a.param(0))
}

pub fn is_antiparallel<S: Scalar>(a: &Args<'_, S>) -> bool {
    cos_between(a).is_some_and(|c| c < -S::ONE + a.param(0))
}

/// A zero vector counts as perpendicular to everything.
pub fn is_perpendicular<S: Scalar>(a: &Args<'_, S>) -> bool {
    cos_between(a).map_or(true, |c| c.abs() < a.param(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_is_minkowski_in_4d() {
        let l = [1.0, 2.0, 3.0, 10.0];
        let r = [1.0, 1.0, 1.0, 2.0];
        assert_eq!(dot(&Args::binary(&l, &r, &[])), 20.0 - 6.0);
        assert_eq!(dot(&Args::binary(&l[..3], &r[..3], &[])), 6.0);
    }

    #[test]
    fn add_and_subtract() {
        let l = [1.0, 2.0];
        let r = [3.0, -5.0];
        assert_eq!(add(&Args::binary(&l, &r, &[])), [4.0, -3.0, 0.0, 0.0]);
        assert_eq!(subtract(&Args::binary(&l, &r, &[])), [-2.0, 7.0, 0.0, 0.0]);
    }

    #[test]
    fn unit_of_zero_is_zero() {
        let z = [0.0; 3];
        assert_eq!(unit(&Args::unary(&z, &[])), [0.0; 4]);
    }

    #[test]
    fn unit_4d_divides_by_mass() {
        let v = [3.0, 0.0, 4.0, 13.0];
        let u = unit(&Args::unary(&v, &[]));
        // tau = sqrt(169 - 25) = 12
        assert!((u[3] - 13.0 / 12.0).abs() < 1e-12);
        assert!((u[0] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn closeness_sums_absolute_differences() {
        let l = [1.0, 1.0, 1.0];
        let r = [1.0004, 0.9996, 1.0];
        assert!(is_close(&Args::binary(&l, &r, &[1e-3])));
        assert!(!is_close(&Args::binary(&l, &r, &[5e-4])));
    }

    #[test]
    fn parallel_family() {
        let l = [1.0, 1.0, 0.0];
        let same = [2.0, 2.0, 0.0];
        let opposite = [-3.0, -3.0, 0.0];
        let across = [1.0, -1.0, 5.0];
        let tol = [1e-9];
        assert!(is_parallel(&Args::binary(&l, &same, &tol)));
        assert!(is_antiparallel(&Args::binary(&l, &opposite, &tol)));
        assert!(is_perpendicular(&Args::binary(&l, &across, &tol)));
        assert!(!is_parallel(&Args::binary(&l, &[0.0; 3], &tol)));
    }
}
