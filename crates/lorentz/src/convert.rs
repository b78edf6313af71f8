//! Conversion engine.
//!
//! Every tag converts only to and from its group's canonical form (`XY`, `Z`,
//! `T`). Converting between two arbitrary systems copies groups whose tags
//! already agree and routes the others through canonical form, so adding a
//! tag means adding exactly one `to_*` and one `from_*` arm.

use crate::compute::{lorentz, planar, spatial, Components};
use crate::coords::{AzimuthalKind, LongitudinalKind, System, TemporalKind};
use crate::dispatch::Op;
use crate::error::{Result, VectorError};
use crate::Scalar;

#[inline]
pub fn to_xy<S: Scalar>(kind: AzimuthalKind, a: S, b: S) -> (S, S) {
    match kind {
        AzimuthalKind::XY => (a, b),
        AzimuthalKind::RhoPhi => planar::xy_of(a, b),
    }
}

#[inline]
pub fn from_xy<S: Scalar>(kind: AzimuthalKind, x: S, y: S) -> (S, S) {
    match kind {
        AzimuthalKind::XY => (x, y),
        AzimuthalKind::RhoPhi => (planar::rho_of(x, y), planar::phi_of(x, y)),
    }
}

/// `rho` straight from stored azimuthal values.
#[inline]
pub fn rho<S: Scalar>(kind: AzimuthalKind, a: S, b: S) -> S {
    match kind {
        AzimuthalKind::XY => planar::rho_of(a, b),
        AzimuthalKind::RhoPhi => a,
    }
}

#[inline]
pub fn to_z<S: Scalar>(kind: LongitudinalKind, value: S, rho: S) -> S {
    match kind {
        LongitudinalKind::Z => value,
        LongitudinalKind::Theta => spatial::z_of_theta(rho, value),
        LongitudinalKind::Eta => spatial::z_of_eta(rho, value),
    }
}

#[inline]
pub fn from_z<S: Scalar>(kind: LongitudinalKind, z: S, rho: S) -> S {
    match kind {
        LongitudinalKind::Z => z,
        LongitudinalKind::Theta => spatial::theta_of(rho, z),
        LongitudinalKind::Eta => spatial::eta_of(rho, z),
    }
}

/// `p2` is the squared spatial magnitude.
#[inline]
pub fn to_t<S: Scalar>(kind: TemporalKind, value: S, p2: S) -> S {
    match kind {
        TemporalKind::T => value,
        TemporalKind::Tau => lorentz::t_of(value, p2),
    }
}

#[inline]
pub fn from_t<S: Scalar>(kind: TemporalKind, t: S, p2: S) -> S {
    match kind {
        TemporalKind::T => t,
        TemporalKind::Tau => lorentz::tau_of(t, p2),
    }
}

fn arity<S>(system: System, values: &[S]) -> Result<()> {
    if values.len() == system.len() {
        Ok(())
    } else {
        Err(VectorError::WrongArity {
            system,
            expected: system.len(),
            got: values.len(),
        })
    }
}

/// Re-express `values` (laid out per `from`) in `to`.
///
/// Both systems must have the same dimensionality and `values` must hold
/// exactly `from.len()` entries. On the beam axis (`rho = 0`) a `theta` of
/// 0 or pi, or an infinite `eta`, does not determine `z`; converting such a
/// value back to `z` gives NaN.
pub fn convert<S: Scalar>(from: System, to: System, values: &[S]) -> Result<Components<S>> {
    arity(from, values)?;
    if from.dim() != to.dim() {
        return Err(VectorError::DimensionMismatch {
            op: Op::Convert,
            lhs: from.dim(),
            rhs: to.dim(),
        });
    }
    Ok(convert_values(from, to, values))
}

/// [`convert`] for callers that already validated the layout.
pub(crate) fn convert_values<S: Scalar>(from: System, to: System, values: &[S]) -> Components<S> {
    let mut out = [S::ZERO; 4];
    if from == to {
        out[..from.len()].copy_from_slice(&values[..from.len()]);
        return out;
    }

    let (az_from, az_to) = (from.azimuthal(), to.azimuthal());
    let (x, y) = to_xy(az_from, values[0], values[1]);
    let (a, b) = if az_from == az_to {
        (values[0], values[1])
    } else {
        from_xy(az_to, x, y)
    };
    out[0] = a;
    out[1] = b;

    let (Some(lon_from), Some(lon_to)) = (from.longitudinal(), to.longitudinal()) else {
        return out;
    };
    let rho = rho(az_from, values[0], values[1]);
    let z = to_z(lon_from, values[2], rho);
    out[2] = if lon_from == lon_to {
        values[2]
    } else {
        from_z(lon_to, z, rho)
    };

    let (Some(tem_from), Some(tem_to)) = (from.temporal(), to.temporal()) else {
        return out;
    };
    out[3] = if tem_from == tem_to {
        values[3]
    } else {
        let p2 = rho * rho + z * z;
        from_t(tem_to, to_t(tem_from, values[3], p2), p2)
    };
    out
}

#[inline]
pub fn to_canonical<S: Scalar>(from: System, values: &[S]) -> Result<Components<S>> {
    convert(from, from.canonical(), values)
}

/// Change dimensionality and tags at once.
///
/// Dropped groups are discarded; added groups start at `z = 0` and `t = 0`
/// before being expressed in `to`'s tags.
pub fn reshape<S: Scalar>(from: System, to: System, values: &[S]) -> Result<Components<S>> {
    arity(from, values)?;
    Ok(reshape_values(from, to, values))
}

pub(crate) fn reshape_values<S: Scalar>(from: System, to: System, values: &[S]) -> Components<S> {
    if from.dim() == to.dim() {
        return convert_values(from, to, values);
    }
    let az = from.azimuthal();
    let lon = from.longitudinal().unwrap_or(LongitudinalKind::Z);
    let tem = from.temporal().unwrap_or(TemporalKind::T);
    let bridge = match to {
        System::Planar(_) => System::Planar(az),
        System::Spatial(..) => System::Spatial(az, lon),
        System::Lorentz(..) => System::Lorentz(az, lon, tem),
    };
    // Keep what both share; the padding is zero.
    let shared = from.len().min(to.len());
    let mut staged = [S::ZERO; 4];
    staged[..shared].copy_from_slice(&values[..shared]);
    convert_values(bridge, to, &staged)
}
