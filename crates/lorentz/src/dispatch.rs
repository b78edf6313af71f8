//! Dispatch table.
//!
//! An operation plus the coordinate systems of its operands resolves to
//! exactly one [`Plan`]: the systems the kernel reads its operands in, the
//! kernel itself, and (for vector-valued operations) the output system.
//! Resolution is an explicit `match` over enumerated keys. Entries that read
//! a non-canonical layout directly are listed one by one; every other
//! combination converts the groups the operation needs into canonical form
//! first. A plan knows nothing about whether it will be evaluated once or
//! once per row of a column.

use core::fmt;

use crate::compute::{self, lorentz, planar, spatial, Args, Components, Kernel};
use crate::convert;
use crate::coords::{AzimuthalKind, Dim, LongitudinalKind, Needs, System, TemporalKind};
use crate::error::{Result, VectorError};
use crate::Scalar;

/// Role of the second operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// No second operand.
    Unary,
    /// Second operand of the same dimensionality.
    SameDim,
    /// Second operand of a fixed dimensionality (boost velocity, axis).
    Fixed(Dim),
}

/// Static description of an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    pub min_dim: Dim,
    pub operand: Operand,
    pub params: usize,
    pub needs: Needs,
}

const fn sig(min_dim: Dim, operand: Operand, params: usize, needs: Needs) -> Signature {
    Signature {
        min_dim,
        operand,
        params,
        needs,
    }
}

/// Output system of a vector-valued operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    /// The system the kernel read the operand in; untouched groups keep
    /// their tags.
    PassThrough,
    /// Canonical system of the operand's dimensionality.
    Canonical,
    /// Canonical three-dimensional system.
    Spatial,
}

/// Any operation, for keys and error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Scalar(ScalarOp),
    Predicate(PredicateOp),
    Transform(TransformOp),
    /// Coordinate conversion.
    Convert,
}

impl Op {
    /// Every operation with a dispatch entry.
    pub fn all() -> impl Iterator<Item = Op> {
        let scalars = ScalarOp::ALL.iter().map(|&op| Op::Scalar(op));
        let predicates = PredicateOp::ALL.iter().map(|&op| Op::Predicate(op));
        let transforms = TransformOp::ALL.iter().map(|&op| Op::Transform(op));
        scalars.chain(predicates).chain(transforms)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar(op) => op.name(),
            Self::Predicate(op) => op.name(),
            Self::Transform(op) => op.name(),
            Self::Convert => "convert",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! operations {
    ($umbrella:ident: $(#[$meta:meta])* pub enum $name:ident {
        $($variant:ident => $label:literal,)*
    }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl From<$name> for Op {
            fn from(op: $name) -> Self {
                Op::$umbrella(op)
            }
        }
    };
}

operations! { Scalar:
    /// Operations producing one number per vector.
    pub enum ScalarOp {
        X => "x",
        Y => "y",
        Rho => "rho",
        Rho2 => "rho2",
        Phi => "phi",
        Z => "z",
        Theta => "theta",
        Eta => "eta",
        CosTheta => "costheta",
        CotTheta => "cottheta",
        Mag => "mag",
        Mag2 => "mag2",
        T => "t",
        T2 => "t2",
        Tau => "tau",
        Tau2 => "tau2",
        Beta => "beta",
        Gamma => "gamma",
        Rapidity => "rapidity",
        Et => "et",
        Et2 => "et2",
        Mt => "mt",
        Mt2 => "mt2",
        Dot => "dot",
        DeltaPhi => "deltaphi",
        DeltaAngle => "deltaangle",
        DeltaEta => "deltaeta",
        DeltaR => "delta_r",
        DeltaR2 => "delta_r2",
    }
}

operations! { Predicate:
    /// Operations producing a boolean.
    pub enum PredicateOp {
        Equal => "equal",
        NotEqual => "not_equal",
        IsClose => "is_close",
        IsParallel => "is_parallel",
        IsAntiparallel => "is_antiparallel",
        IsPerpendicular => "is_perpendicular",
        IsTimelike => "is_timelike",
        IsSpacelike => "is_spacelike",
        IsLightlike => "is_lightlike",
    }
}

operations! { Transform:
    /// Operations producing a new vector.
    pub enum TransformOp {
        Add => "add",
        Subtract => "subtract",
        Scale => "scale",
        Unit => "unit",
        RotateZ => "rotate_z",
        Cross => "cross",
        RotateX => "rotate_x",
        RotateY => "rotate_y",
        RotateAxis => "rotate_axis",
        RotateQuaternion => "rotate_quaternion",
        BoostXBeta => "boost_x_beta",
        BoostYBeta => "boost_y_beta",
        BoostZBeta => "boost_z_beta",
        BoostXGamma => "boost_x_gamma",
        BoostYGamma => "boost_y_gamma",
        BoostZGamma => "boost_z_gamma",
        BoostBeta3 => "boost_beta3",
        BoostP4 => "boost_p4",
        BoostCmOfP4 => "boost_cm_of_p4",
        ToBeta3 => "to_beta3",
        Transform4D => "transform4d",
    }
}

impl ScalarOp {
    pub const fn signature(self) -> Signature {
        use Dim::*;
        use Operand::*;
        use ScalarOp::*;
        match self {
            X | Y | Rho | Rho2 | Phi => sig(D2, Unary, 0, Needs::Azimuthal),
            Z | Theta | Eta | CosTheta | CotTheta | Mag | Mag2 => sig(D3, Unary, 0, Needs::Spatial),
            T | T2 | Tau | Tau2 | Beta | Gamma | Rapidity | Et | Et2 | Mt | Mt2 => {
                sig(D4, Unary, 0, Needs::All)
            }
            Dot => sig(D2, SameDim, 0, Needs::All),
            DeltaPhi => sig(D2, SameDim, 0, Needs::Azimuthal),
            DeltaAngle | DeltaEta | DeltaR | DeltaR2 => sig(D3, SameDim, 0, Needs::Spatial),
        }
    }
}

impl PredicateOp {
    pub const fn signature(self) -> Signature {
        use Dim::*;
        use Operand::*;
        use PredicateOp::*;
        match self {
            Equal | NotEqual => sig(D2, SameDim, 0, Needs::All),
            IsClose => sig(D2, SameDim, 1, Needs::All),
            IsParallel | IsAntiparallel | IsPerpendicular => sig(D2, SameDim, 1, Needs::Spatial),
            IsTimelike | IsSpacelike | IsLightlike => sig(D4, Unary, 1, Needs::All),
        }
    }
}

impl TransformOp {
    pub const fn signature(self) -> Signature {
        use Dim::*;
        use Operand::*;
        use TransformOp::*;
        match self {
            Add | Subtract => sig(D2, SameDim, 0, Needs::All),
            Scale => sig(D2, Unary, 1, Needs::All),
            Unit => sig(D2, Unary, 0, Needs::All),
            RotateZ => sig(D2, Unary, 1, Needs::Azimuthal),
            Cross => sig(D3, SameDim, 0, Needs::Spatial),
            RotateX | RotateY => sig(D3, Unary, 1, Needs::Spatial),
            RotateAxis => sig(D3, Fixed(D3), 1, Needs::Spatial),
            RotateQuaternion => sig(D3, Unary, 4, Needs::Spatial),
            BoostXBeta | BoostYBeta | BoostZBeta | BoostXGamma | BoostYGamma | BoostZGamma => {
                sig(D4, Unary, 1, Needs::All)
            }
            BoostBeta3 => sig(D4, Fixed(D3), 0, Needs::All),
            BoostP4 | BoostCmOfP4 => sig(D4, Fixed(D4), 0, Needs::All),
            ToBeta3 => sig(D4, Unary, 0, Needs::All),
            Transform4D => sig(D4, Unary, 16, Needs::All),
        }
    }

    pub const fn output(self) -> Output {
        use TransformOp::*;
        match self {
            RotateZ | RotateX | RotateY | RotateAxis | RotateQuaternion => Output::PassThrough,
            Cross | ToBeta3 => Output::Spatial,
            _ => Output::Canonical,
        }
    }
}

/// Identity of a dispatch entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DispatchKey {
    pub op: Op,
    pub lhs: System,
    pub rhs: Option<System>,
}

/// A resolved dispatch entry, reusable for any number of evaluations.
#[derive(Clone, Copy)]
pub struct Plan<S, O> {
    key: DispatchKey,
    lhs: System,
    rhs: Option<System>,
    params: usize,
    kernel: Kernel<S, O>,
    output: Option<System>,
}

impl<S, O> fmt::Debug for Plan<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("key", &self.key)
            .field("lhs", &self.lhs)
            .field("rhs", &self.rhs)
            .field("params", &self.params)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl<S: Scalar, O> Plan<S, O> {
    #[inline]
    pub fn key(&self) -> DispatchKey {
        self.key
    }

    /// Systems the kernel reads its operands in.
    #[inline]
    pub fn input(&self) -> (System, Option<System>) {
        (self.lhs, self.rhs)
    }

    #[inline]
    pub fn params(&self) -> usize {
        self.params
    }

    /// True when no operand needs converting before the kernel runs.
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.lhs == self.key.lhs && self.rhs == self.key.rhs
    }

    /// Evaluate on one set of operand values, laid out per the key's systems.
    pub fn eval(&self, lhs: &[S], rhs: Option<&[S]>, params: &[S]) -> Result<O> {
        let op = self.key.op;
        arity(self.key.lhs, lhs)?;
        if params.len() != self.params {
            return Err(VectorError::Parameters {
                op,
                expected: self.params,
                got: params.len(),
            });
        }

        let l = convert::convert_values(self.key.lhs, self.lhs, lhs);
        let r = match (self.key.rhs.zip(self.rhs), rhs) {
            (Some((from, to)), Some(values)) => {
                arity(from, values)?;
                convert::convert_values(from, to, values)
            }
            (None, None) => [S::ZERO; 4],
            (Some(_), None) => return Err(VectorError::OperandCount { op, expected: 2, got: 1 }),
            (None, Some(_)) => return Err(VectorError::OperandCount { op, expected: 1, got: 2 }),
        };

        let args = Args::binary(
            &l[..self.lhs.len()],
            &r[..self.rhs.map_or(0, System::len)],
            params,
        );
        Ok((self.kernel)(&args))
    }
}

impl<S: Scalar> Plan<S, Components<S>> {
    /// System the produced components are laid out in.
    #[inline]
    pub fn output(&self) -> System {
        self.output.unwrap_or(self.lhs)
    }
}

#[inline]
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

/// Reject operand signatures the operation cannot accept.
fn check(op: Op, sig: Signature, lhs: System, rhs: Option<System>) -> Result<()> {
    if lhs.dim() < sig.min_dim {
        return Err(VectorError::Domain {
            op,
            dim: lhs.dim(),
            required: sig.min_dim,
        });
    }
    match (sig.operand, rhs) {
        (Operand::Unary, None) => Ok(()),
        (Operand::Unary, Some(_)) => Err(VectorError::OperandCount { op, expected: 1, got: 2 }),
        (_, None) => Err(VectorError::OperandCount { op, expected: 2, got: 1 }),
        (Operand::SameDim, Some(r)) if r.dim() != lhs.dim() => Err(VectorError::DimensionMismatch {
            op,
            lhs: lhs.dim(),
            rhs: r.dim(),
        }),
        (Operand::Fixed(dim), Some(r)) if r.dim() != dim => Err(VectorError::DimensionMismatch {
            op,
            lhs: lhs.dim(),
            rhs: r.dim(),
        }),
        _ => Ok(()),
    }
}

fn build<S: Scalar, O>(
    op: Op,
    sig: Signature,
    lhs: System,
    rhs: Option<System>,
    input: System,
    kernel: Kernel<S, O>,
    output: Option<System>,
) -> Plan<S, O> {
    let plan = Plan {
        key: DispatchKey { op, lhs, rhs },
        lhs: input,
        rhs: rhs.map(|r| r.canonicalize(sig.needs)),
        params: sig.params,
        kernel,
        output,
    };
    tracing::trace!(
        op = %op,
        lhs = %lhs,
        input = %input,
        direct = plan.is_direct(),
        "resolved dispatch plan"
    );
    plan
}

/// Resolve a number-valued operation.
pub fn scalar<S: Scalar>(op: ScalarOp, lhs: System, rhs: Option<System>) -> Result<Plan<S, S>> {
    let sig = op.signature();
    check(op.into(), sig, lhs, rhs)?;
    let (input, kernel) = match native_scalar(op, lhs) {
        Some(kernel) => (lhs, kernel),
        None => (lhs.canonicalize(sig.needs), scalar_kernel(op)),
    };
    Ok(build(op.into(), sig, lhs, rhs, input, kernel, None))
}

/// Resolve a boolean-valued operation.
pub fn predicate<S: Scalar>(
    op: PredicateOp,
    lhs: System,
    rhs: Option<System>,
) -> Result<Plan<S, bool>> {
    let sig = op.signature();
    check(op.into(), sig, lhs, rhs)?;
    let input = lhs.canonicalize(sig.needs);
    Ok(build(op.into(), sig, lhs, rhs, input, predicate_kernel(op), None))
}

/// Resolve a vector-valued operation.
pub fn transform<S: Scalar>(
    op: TransformOp,
    lhs: System,
    rhs: Option<System>,
) -> Result<Plan<S, Components<S>>> {
    let sig = op.signature();
    check(op.into(), sig, lhs, rhs)?;
    let (input, kernel) = match native_transform(op, lhs) {
        Some(kernel) => (lhs, kernel),
        None => (lhs.canonicalize(sig.needs), transform_kernel(op)),
    };
    let output = match op.output() {
        Output::PassThrough => input,
        Output::Canonical => lhs.canonical(),
        Output::Spatial => System::canonical_of(Dim::D3),
    };
    Ok(build(op.into(), sig, lhs, rhs, input, kernel, Some(output)))
}

/// Entries that read stored non-canonical coordinates directly.
fn native_scalar<S: Scalar>(op: ScalarOp, lhs: System) -> Option<Kernel<S, S>> {
    use AzimuthalKind::RhoPhi;
    match (op, lhs.azimuthal(), lhs.longitudinal(), lhs.temporal()) {
        (ScalarOp::Rho, RhoPhi, _, _) => Some(planar::rho_polar),
        (ScalarOp::Rho2, RhoPhi, _, _) => Some(planar::rho2_polar),
        (ScalarOp::Phi, RhoPhi, _, _) => Some(planar::phi_polar),
        (ScalarOp::Theta, _, Some(LongitudinalKind::Theta), _) => Some(spatial::longitudinal_stored),
        (ScalarOp::Eta, _, Some(LongitudinalKind::Eta), _) => Some(spatial::longitudinal_stored),
        (ScalarOp::Tau, _, _, Some(TemporalKind::Tau)) => Some(lorentz::tau_stored),
        (ScalarOp::Tau2, _, _, Some(TemporalKind::Tau)) => Some(lorentz::tau2_stored),
        _ => None,
    }
}

fn native_transform<S: Scalar>(op: TransformOp, lhs: System) -> Option<Kernel<S, Components<S>>> {
    match (op, lhs.azimuthal()) {
        (TransformOp::RotateZ, AzimuthalKind::RhoPhi) => Some(planar::rotate_z_polar),
        _ => None,
    }
}

fn scalar_kernel<S: Scalar>(op: ScalarOp) -> Kernel<S, S> {
    use ScalarOp::*;
    match op {
        X => planar::x,
        Y => planar::y,
        Rho => planar::rho,
        Rho2 => planar::rho2,
        Phi => planar::phi,
        Z => spatial::z,
        Theta => spatial::theta,
        Eta => spatial::eta,
        CosTheta => spatial::costheta,
        CotTheta => spatial::cottheta,
        Mag => spatial::mag,
        Mag2 => spatial::mag2,
        T => lorentz::t,
        T2 => lorentz::t2,
        Tau => lorentz::tau,
        Tau2 => lorentz::tau2,
        Beta => lorentz::beta,
        Gamma => lorentz::gamma,
        Rapidity => lorentz::rapidity,
        Et => lorentz::et,
        Et2 => lorentz::et2,
        Mt => lorentz::mt,
        Mt2 => lorentz::mt2,
        Dot => compute::dot,
        DeltaPhi => planar::deltaphi,
        DeltaAngle => spatial::deltaangle,
        DeltaEta => spatial::deltaeta,
        DeltaR => spatial::delta_r,
        DeltaR2 => spatial::delta_r2,
    }
}

fn predicate_kernel<S: Scalar>(op: PredicateOp) -> Kernel<S, bool> {
    use PredicateOp::*;
    match op {
        Equal => compute::equal,
        NotEqual => compute::not_equal,
        IsClose => compute::is_close,
        IsParallel => compute::is_parallel,
        IsAntiparallel => compute::is_antiparallel,
        IsPerpendicular => compute::is_perpendicular,
        IsTimelike => lorentz::is_timelike,
        IsSpacelike => lorentz::is_spacelike,
        IsLightlike => lorentz::is_lightlike,
    }
}

fn transform_kernel<S: Scalar>(op: TransformOp) -> Kernel<S, Components<S>> {
    use TransformOp::*;
    match op {
        Add => compute::add,
        Subtract => compute::subtract,
        Scale => compute::scale,
        Unit => compute::unit,
        RotateZ => planar::rotate_z,
        Cross => spatial::cross,
        RotateX => spatial::rotate_x,
        RotateY => spatial::rotate_y,
        RotateAxis => spatial::rotate_axis,
        RotateQuaternion => spatial::rotate_quaternion,
        BoostXBeta => lorentz::boost_x_beta,
        BoostYBeta => lorentz::boost_y_beta,
        BoostZBeta => lorentz::boost_z_beta,
        BoostXGamma => lorentz::boost_x_gamma,
        BoostYGamma => lorentz::boost_y_gamma,
        BoostZGamma => lorentz::boost_z_gamma,
        BoostBeta3 => lorentz::boost_beta3,
        BoostP4 => lorentz::boost_p4,
        BoostCmOfP4 => lorentz::boost_cm_of_p4,
        ToBeta3 => lorentz::to_beta3,
        Transform4D => lorentz::transform4d,
    }
}
