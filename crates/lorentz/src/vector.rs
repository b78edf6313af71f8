//! Scalar backend: one vector, one value per coordinate.

use core::fmt;

use alloc::vec::Vec;

use crate::compute::Components;
use crate::config::Tolerances;
use crate::convert;
use crate::coords::{self, AzimuthalKind, Dim, LongitudinalKind, System, TemporalKind};
use crate::dispatch::{self, Op, PredicateOp, ScalarOp, TransformOp};
use crate::error::{Result, VectorError};
use crate::Scalar;

/// Azimuthal pair with its representation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Azimuthal<S> {
    XY { x: S, y: S },
    RhoPhi { rho: S, phi: S },
}

impl<S: Copy> Azimuthal<S> {
    pub const fn kind(&self) -> AzimuthalKind {
        match self {
            Self::XY { .. } => AzimuthalKind::XY,
            Self::RhoPhi { .. } => AzimuthalKind::RhoPhi,
        }
    }

    fn values(self) -> [S; 2] {
        match self {
            Self::XY { x, y } => [x, y],
            Self::RhoPhi { rho, phi } => [rho, phi],
        }
    }

    fn from_values(kind: AzimuthalKind, [a, b]: [S; 2]) -> Self {
        match kind {
            AzimuthalKind::XY => Self::XY { x: a, y: b },
            AzimuthalKind::RhoPhi => Self::RhoPhi { rho: a, phi: b },
        }
    }
}

/// Longitudinal coordinate with its representation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Longitudinal<S> {
    Z { z: S },
    Theta { theta: S },
    Eta { eta: S },
}

impl<S: Copy> Longitudinal<S> {
    pub const fn kind(&self) -> LongitudinalKind {
        match self {
            Self::Z { .. } => LongitudinalKind::Z,
            Self::Theta { .. } => LongitudinalKind::Theta,
            Self::Eta { .. } => LongitudinalKind::Eta,
        }
    }

    fn value(self) -> S {
        match self {
            Self::Z { z } => z,
            Self::Theta { theta } => theta,
            Self::Eta { eta } => eta,
        }
    }

    fn from_value(kind: LongitudinalKind, v: S) -> Self {
        match kind {
            LongitudinalKind::Z => Self::Z { z: v },
            LongitudinalKind::Theta => Self::Theta { theta: v },
            LongitudinalKind::Eta => Self::Eta { eta: v },
        }
    }
}

/// Temporal coordinate with its representation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Temporal<S> {
    T { t: S },
    Tau { tau: S },
}

impl<S: Copy> Temporal<S> {
    pub const fn kind(&self) -> TemporalKind {
        match self {
            Self::T { .. } => TemporalKind::T,
            Self::Tau { .. } => TemporalKind::Tau,
        }
    }

    fn value(self) -> S {
        match self {
            Self::T { t } => t,
            Self::Tau { tau } => tau,
        }
    }

    fn from_value(kind: TemporalKind, v: S) -> Self {
        match kind {
            TemporalKind::T => Self::T { t: v },
            TemporalKind::Tau => Self::Tau { tau: v },
        }
    }
}

/// An immutable physics vector: stored coordinate values tagged with the
/// system they are expressed in.
///
/// `PartialEq` compares storage (system and raw values). Use [`Vector::equal`]
/// to compare the geometric vectors across systems.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector<S = f64> {
    system: System,
    values: Components<S>,
}

macro_rules! scalar_ops {
    ($($(#[$meta:meta])* $name:ident => $op:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self) -> Result<S> {
                self.scalar(ScalarOp::$op, None, &[])
            }
        )*
    };
}

macro_rules! binary_scalar_ops {
    ($($(#[$meta:meta])* $name:ident => $op:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self, other: &Self) -> Result<S> {
                self.scalar(ScalarOp::$op, Some(other), &[])
            }
        )*
    };
}

macro_rules! angle_ops {
    ($($(#[$meta:meta])* $name:ident => $op:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self, param: S) -> Result<Self> {
                self.transform(TransformOp::$op, None, &[param])
            }
        )*
    };
}

impl<S: Scalar> Vector<S> {
    /// Vector from values laid out in `system`'s storage order.
    pub fn new(system: System, values: &[S]) -> Result<Self> {
        if values.len() != system.len() {
            return Err(VectorError::WrongArity {
                system,
                expected: system.len(),
                got: values.len(),
            });
        }
        let mut buf = [S::ZERO; 4];
        buf[..values.len()].copy_from_slice(values);
        Ok(Self { system, values: buf })
    }

    /// Vector from a full component buffer; slots past `system.len()` are
    /// cleared.
    pub fn from_components(system: System, mut values: Components<S>) -> Self {
        for v in &mut values[system.len()..] {
            *v = S::ZERO;
        }
        Self { system, values }
    }

    #[inline]
    pub fn xy(x: S, y: S) -> Self {
        Self::planar(Azimuthal::XY { x, y })
    }

    #[inline]
    pub fn rhophi(rho: S, phi: S) -> Self {
        Self::planar(Azimuthal::RhoPhi { rho, phi })
    }

    #[inline]
    pub fn xyz(x: S, y: S, z: S) -> Self {
        Self::spatial(Azimuthal::XY { x, y }, Longitudinal::Z { z })
    }

    #[inline]
    pub fn xyzt(x: S, y: S, z: S, t: S) -> Self {
        Self::lorentz(Azimuthal::XY { x, y }, Longitudinal::Z { z }, Temporal::T { t })
    }

    /// Momentum four-vector from `(pt, eta, phi, mass)`.
    #[inline]
    pub fn ptetaphim(pt: S, eta: S, phi: S, mass: S) -> Self {
        Self::lorentz(
            Azimuthal::RhoPhi { rho: pt, phi },
            Longitudinal::Eta { eta },
            Temporal::Tau { tau: mass },
        )
    }

    pub fn planar(az: Azimuthal<S>) -> Self {
        let [a, b] = az.values();
        Self::from_components(System::Planar(az.kind()), [a, b, S::ZERO, S::ZERO])
    }

    pub fn spatial(az: Azimuthal<S>, lon: Longitudinal<S>) -> Self {
        let [a, b] = az.values();
        let system = System::Spatial(az.kind(), lon.kind());
        Self::from_components(system, [a, b, lon.value(), S::ZERO])
    }

    pub fn lorentz(az: Azimuthal<S>, lon: Longitudinal<S>, tem: Temporal<S>) -> Self {
        let [a, b] = az.values();
        let system = System::Lorentz(az.kind(), lon.kind(), tem.kind());
        Self::from_components(system, [a, b, lon.value(), tem.value()])
    }

    /// Infer the coordinate system from field names.
    ///
    /// ```
    /// use lorentz::Vector;
    ///
    /// let p = Vector::from_fields(&[("pt", 10.0), ("eta", 0.5), ("phi", 1.0), ("mass", 0.1)])?;
    /// assert_eq!(p.rho()?, 10.0);
    /// # Ok::<(), lorentz::VectorError>(())
    /// ```
    pub fn from_fields(fields: &[(&str, S)]) -> Result<Self> {
        let names: Vec<&str> = fields.iter().map(|&(name, _)| name).collect();
        let layout = coords::classify(&names)?;
        let mut values = [S::ZERO; 4];
        for (slot, &i) in values.iter_mut().zip(&layout.order[..layout.system.len()]) {
            *slot = fields[i].1;
        }
        Ok(Self::from_components(layout.system, values))
    }

    #[inline]
    pub fn system(&self) -> System {
        self.system
    }

    #[inline]
    pub fn dim(&self) -> Dim {
        self.system.dim()
    }

    /// Stored values, in storage order.
    #[inline]
    pub fn values(&self) -> &[S] {
        &self.values[..self.system.len()]
    }

    /// Stored values padded with zeros to four slots.
    #[inline]
    pub fn components(&self) -> Components<S> {
        self.values
    }

    pub fn azimuthal(&self) -> Azimuthal<S> {
        Azimuthal::from_values(self.system.azimuthal(), [self.values[0], self.values[1]])
    }

    pub fn longitudinal(&self) -> Option<Longitudinal<S>> {
        let kind = self.system.longitudinal()?;
        Some(Longitudinal::from_value(kind, self.values[2]))
    }

    pub fn temporal(&self) -> Option<Temporal<S>> {
        let kind = self.system.temporal()?;
        Some(Temporal::from_value(kind, self.values[3]))
    }

    /// Re-express in another system of the same dimensionality.
    ///
    /// On the beam axis (`rho = 0`) a stored `theta` of 0 or pi, or an
    /// infinite `eta`, carries no length along z: converting it back gives a
    /// NaN `z` (and NaN `t` for `tau` storage) rather than a made-up zero.
    pub fn to_system(&self, to: System) -> Result<Self> {
        if to.dim() != self.dim() {
            return Err(VectorError::DimensionMismatch {
                op: Op::Convert,
                lhs: self.dim(),
                rhs: to.dim(),
            });
        }
        let values = convert::convert_values(self.system, to, self.values());
        Ok(Self::from_components(to, values))
    }

    #[inline]
    pub fn to_canonical(&self) -> Self {
        let to = self.system.canonical();
        Self::from_components(to, convert::convert_values(self.system, to, self.values()))
    }

    #[inline]
    pub fn is_canonical(&self) -> bool {
        self.system.is_canonical()
    }

    fn reshape(&self, to: System) -> Self {
        Self::from_components(to, convert::reshape_values(self.system, to, self.values()))
    }

    /// Drop the longitudinal and temporal parts.
    pub fn to_planar(&self) -> Self {
        self.reshape(System::Planar(self.system.azimuthal()))
    }

    /// Drop the temporal part, or add `z = 0` to a planar vector.
    pub fn to_spatial(&self) -> Self {
        let lon = self.system.longitudinal().unwrap_or(LongitudinalKind::Z);
        self.reshape(System::Spatial(self.system.azimuthal(), lon))
    }

    /// Add `t = 0`, and `z = 0` to a planar vector.
    pub fn to_lorentz(&self) -> Self {
        if self.dim() == Dim::D4 {
            return *self;
        }
        let lon = self.system.longitudinal().unwrap_or(LongitudinalKind::Z);
        self.reshape(System::Lorentz(self.system.azimuthal(), lon, TemporalKind::T))
    }

    fn scalar(&self, op: ScalarOp, rhs: Option<&Self>, params: &[S]) -> Result<S> {
        let plan = dispatch::scalar::<S>(op, self.system, rhs.map(|r| r.system))?;
        plan.eval(self.values(), rhs.map(Self::values), params)
    }

    fn predicate(&self, op: PredicateOp, rhs: Option<&Self>, params: &[S]) -> Result<bool> {
        let plan = dispatch::predicate::<S>(op, self.system, rhs.map(|r| r.system))?;
        plan.eval(self.values(), rhs.map(Self::values), params)
    }

    fn transform(&self, op: TransformOp, rhs: Option<&Self>, params: &[S]) -> Result<Self> {
        let plan = dispatch::transform::<S>(op, self.system, rhs.map(|r| r.system))?;
        let values = plan.eval(self.values(), rhs.map(Self::values), params)?;
        Ok(Self::from_components(plan.output(), values))
    }

    scalar_ops! {
        x => X;
        y => Y;
        /// Transverse magnitude.
        rho => Rho;
        rho2 => Rho2;
        /// Azimuthal angle in `[-pi, pi]`; `0` at the origin.
        phi => Phi;
        z => Z;
        /// Polar angle from the z axis.
        theta => Theta;
        /// Pseudorapidity.
        eta => Eta;
        costheta => CosTheta;
        cottheta => CotTheta;
        mag => Mag;
        mag2 => Mag2;
        t => T;
        t2 => T2;
        /// Invariant mass, negative for spacelike vectors.
        tau => Tau;
        tau2 => Tau2;
        beta => Beta;
        gamma => Gamma;
        rapidity => Rapidity;
        et => Et;
        et2 => Et2;
        mt => Mt;
        mt2 => Mt2;
    }

    binary_scalar_ops! {
        /// Euclidean in 2D and 3D, Minkowski in 4D.
        dot => Dot;
        /// `phi1 - phi2` wrapped into `[-pi, pi)`.
        deltaphi => DeltaPhi;
        deltaangle => DeltaAngle;
        deltaeta => DeltaEta;
        delta_r => DeltaR;
        delta_r2 => DeltaR2;
    }

    angle_ops! {
        rotate_z => RotateZ;
        rotate_x => RotateX;
        rotate_y => RotateY;
        boost_x_beta => BoostXBeta;
        boost_y_beta => BoostYBeta;
        boost_z_beta => BoostZBeta;
        boost_x_gamma => BoostXGamma;
        boost_y_gamma => BoostYGamma;
        boost_z_gamma => BoostZGamma;
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.transform(TransformOp::Add, Some(other), &[])
    }

    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.transform(TransformOp::Subtract, Some(other), &[])
    }

    pub fn scale(&self, factor: S) -> Result<Self> {
        self.transform(TransformOp::Scale, None, &[factor])
    }

    pub fn unit(&self) -> Result<Self> {
        self.transform(TransformOp::Unit, None, &[])
    }

    /// Spatial cross product; the result is three-dimensional.
    pub fn cross(&self, other: &Self) -> Result<Self> {
        self.transform(TransformOp::Cross, Some(other), &[])
    }

    /// Rotate about `axis` (any three-vector) by `angle`.
    pub fn rotate_axis(&self, axis: &Self, angle: S) -> Result<Self> {
        self.transform(TransformOp::RotateAxis, Some(axis), &[angle])
    }

    /// Rotate by the unit quaternion `u + i I + j J + k K`.
    pub fn rotate_quaternion(&self, u: S, i: S, j: S, k: S) -> Result<Self> {
        self.transform(TransformOp::RotateQuaternion, None, &[u, i, j, k])
    }

    /// Boost by the velocity three-vector `beta`.
    pub fn boost_beta3(&self, beta: &Self) -> Result<Self> {
        self.transform(TransformOp::BoostBeta3, Some(beta), &[])
    }

    /// Boost by the velocity of the four-vector `p4`.
    pub fn boost_p4(&self, p4: &Self) -> Result<Self> {
        self.transform(TransformOp::BoostP4, Some(p4), &[])
    }

    /// Boost into the rest frame of `p4`.
    pub fn boost_cm_of_p4(&self, p4: &Self) -> Result<Self> {
        self.transform(TransformOp::BoostCmOfP4, Some(p4), &[])
    }

    pub fn to_beta3(&self) -> Result<Self> {
        self.transform(TransformOp::ToBeta3, None, &[])
    }

    /// Apply a general 4x4 matrix to `[x, y, z, t]`; `matrix[row][col]`.
    pub fn transform4d(&self, matrix: &[[S; 4]; 4]) -> Result<Self> {
        self.transform(TransformOp::Transform4D, None, &flatten(matrix))
    }

    /// Exact comparison of canonical components.
    pub fn equal(&self, other: &Self) -> Result<bool> {
        self.predicate(PredicateOp::Equal, Some(other), &[])
    }

    pub fn not_equal(&self, other: &Self) -> Result<bool> {
        self.predicate(PredicateOp::NotEqual, Some(other), &[])
    }

    pub fn is_close(&self, other: &Self) -> Result<bool> {
        self.is_close_with(other, &Tolerances::DEFAULT)
    }

    pub fn is_close_with(&self, other: &Self, tol: &Tolerances) -> Result<bool> {
        let eps = S::from_f64(tol.close);
        self.predicate(PredicateOp::IsClose, Some(other), &[eps])
    }

    pub fn is_parallel(&self, other: &Self) -> Result<bool> {
        self.is_parallel_with(other, &Tolerances::DEFAULT)
    }

    pub fn is_parallel_with(&self, other: &Self, tol: &Tolerances) -> Result<bool> {
        let eps = S::from_f64(tol.parallel);
        self.predicate(PredicateOp::IsParallel, Some(other), &[eps])
    }

    pub fn is_antiparallel(&self, other: &Self) -> Result<bool> {
        self.is_antiparallel_with(other, &Tolerances::DEFAULT)
    }

    pub fn is_antiparallel_with(&self, other: &Self, tol: &Tolerances) -> Result<bool> {
        let eps = S::from_f64(tol.parallel);
        self.predicate(PredicateOp::IsAntiparallel, Some(other), &[eps])
    }

    pub fn is_perpendicular(&self, other: &Self) -> Result<bool> {
        self.is_perpendicular_with(other, &Tolerances::DEFAULT)
    }

    pub fn is_perpendicular_with(&self, other: &Self, tol: &Tolerances) -> Result<bool> {
        let eps = S::from_f64(tol.parallel);
        self.predicate(PredicateOp::IsPerpendicular, Some(other), &[eps])
    }

    pub fn is_timelike(&self) -> Result<bool> {
        self.is_timelike_with(&Tolerances::DEFAULT)
    }

    pub fn is_timelike_with(&self, tol: &Tolerances) -> Result<bool> {
        self.predicate(PredicateOp::IsTimelike, None, &[S::from_f64(tol.timelike)])
    }

    pub fn is_spacelike(&self) -> Result<bool> {
        self.is_spacelike_with(&Tolerances::DEFAULT)
    }

    pub fn is_spacelike_with(&self, tol: &Tolerances) -> Result<bool> {
        self.predicate(PredicateOp::IsSpacelike, None, &[S::from_f64(tol.timelike)])
    }

    pub fn is_lightlike(&self) -> Result<bool> {
        self.is_lightlike_with(&Tolerances::DEFAULT)
    }

    pub fn is_lightlike_with(&self, tol: &Tolerances) -> Result<bool> {
        self.predicate(PredicateOp::IsLightlike, None, &[S::from_f64(tol.lightlike)])
    }
}

/// Row-major parameters of a 4x4 matrix.
fn flatten<S: Scalar>(matrix: &[[S; 4]; 4]) -> [S; 16] {
    let mut out = [S::ZERO; 16];
    for (chunk, row) in out.chunks_exact_mut(4).zip(matrix) {
        chunk.copy_from_slice(row);
    }
    out
}

impl<S: Scalar> fmt::Display for Vector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Vector(")?;
        for (i, (field, value)) in self.system.fields().zip(self.values()).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", field.name(), value)?;
        }
        f.write_str(")")
    }
}
