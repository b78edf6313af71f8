use alloc::vec::Vec;

use lorentz::dispatch::{self, Plan};
use lorentz::{
    classify, convert, Components, Dim, LongitudinalKind, Op, PredicateOp, Scalar, ScalarOp,
    System, TemporalKind, Tolerances, TransformOp, Vector, VectorError,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::column::Column;
use crate::error::{ArrayError, Result};

/// Columnar array of vectors sharing one coordinate system.
///
/// Holds one [`Column`] per stored coordinate, all of the same length. Every
/// operation resolves its dispatch plan once and evaluates it per row, so the
/// results match [`Vector`] element for element.
///
/// Deserialization goes through [`VectorArrayParts`] and
/// [`VectorArray::new`], so malformed payloads are rejected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "VectorArrayParts<S>",
        bound(deserialize = "S: Scalar + serde::Deserialize<'de>")
    )
)]
pub struct VectorArray<S> {
    system: System,
    columns: Vec<Column<S>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    len: usize,
}

/// Unvalidated pieces of a [`VectorArray`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct VectorArrayParts<S> {
    pub system: System,
    pub columns: Vec<Column<S>>,
}

impl<S: Scalar> TryFrom<VectorArrayParts<S>> for VectorArray<S> {
    type Error = ArrayError;

    fn try_from(parts: VectorArrayParts<S>) -> Result<Self> {
        Self::new(parts.system, parts.columns)
    }
}

impl<S> From<VectorArray<S>> for VectorArrayParts<S> {
    fn from(array: VectorArray<S>) -> Self {
        Self {
            system: array.system,
            columns: array.columns,
        }
    }
}

macro_rules! scalar_ops {
    ($($name:ident => $op:ident;)*) => {
        $(
            pub fn $name(&self) -> Result<Column<S>> {
                self.scalar(ScalarOp::$op, None, &[])
            }
        )*
    };
}

macro_rules! binary_scalar_ops {
    ($($name:ident => $op:ident;)*) => {
        $(
            pub fn $name(&self, other: &Self) -> Result<Column<S>> {
                self.scalar(ScalarOp::$op, Some(other), &[])
            }
        )*
    };
}

macro_rules! angle_ops {
    ($($name:ident => $op:ident;)*) => {
        $(
            pub fn $name(&self, param: S) -> Result<Self> {
                self.transform(TransformOp::$op, None, &[param])
            }
        )*
    };
}

macro_rules! tolerance_ops {
    (@rhs $rhs:ident) => { Some($rhs) };
    (@rhs) => { None };
    ($($name:ident, $with:ident => $op:ident, $field:ident $(, $rhs:ident)?;)*) => {
        $(
            pub fn $name(&self $(, $rhs: &Self)?) -> Result<Column<bool>> {
                self.$with($($rhs,)? &Tolerances::DEFAULT)
            }

            pub fn $with(&self $(, $rhs: &Self)?, tol: &Tolerances) -> Result<Column<bool>> {
                let eps = S::from_f64(tol.$field);
                self.predicate(PredicateOp::$op, tolerance_ops!(@rhs $($rhs)?), &[eps])
            }
        )*
    };
}

impl<S: Scalar> VectorArray<S> {
    /// Array from one column per stored coordinate, in `system`'s storage
    /// order.
    pub fn new(system: System, columns: Vec<Column<S>>) -> Result<Self> {
        if columns.len() != system.len() {
            return Err(VectorError::WrongArity {
                system,
                expected: system.len(),
                got: columns.len(),
            }
            .into());
        }
        let len = columns.first().map_or(0, Column::len);
        if let Some(ragged) = columns.iter().find(|c| c.len() != len) {
            return Err(ArrayError::LengthMismatch {
                expected: len,
                got: ragged.len(),
            });
        }
        Ok(Self {
            system,
            columns,
            len,
        })
    }

    /// Infer the coordinate system from column names, exactly as
    /// [`Vector::from_fields`] does.
    pub fn from_fields(fields: Vec<(&str, Column<S>)>) -> Result<Self> {
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        let layout = classify(&names)?;
        let mut slots: Vec<Option<Column<S>>> = fields.into_iter().map(|(_, c)| Some(c)).collect();
        let columns = layout.order[..layout.system.len()]
            .iter()
            .map(|&i| slots[i].take().unwrap_or_default())
            .collect();
        Self::new(layout.system, columns)
    }

    /// Array of `vectors`, each converted into `system`.
    pub fn from_vectors(system: System, vectors: &[Vector<S>]) -> Result<Self> {
        let mut columns: Vec<Vec<S>> = (0..system.len())
            .map(|_| Vec::with_capacity(vectors.len()))
            .collect();
        for v in vectors {
            let v = v.to_system(system)?;
            for (column, &value) in columns.iter_mut().zip(v.values()) {
                column.push(value);
            }
        }
        Ok(Self {
            system,
            columns: columns.into_iter().map(Column::new).collect(),
            len: vectors.len(),
        })
    }

    /// `n` copies of `v`.
    pub fn repeat(v: &Vector<S>, n: usize) -> Self {
        Self {
            system: v.system(),
            columns: v.values().iter().map(|&value| Column::repeat(value, n)).collect(),
            len: n,
        }
    }

    #[inline]
    pub fn system(&self) -> System {
        self.system
    }

    #[inline]
    pub fn dim(&self) -> Dim {
        self.system.dim()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Columns in storage order.
    #[inline]
    pub fn columns(&self) -> &[Column<S>] {
        &self.columns
    }

    #[inline]
    fn row(&self, i: usize) -> Components<S> {
        let mut out = [S::ZERO; 4];
        for (o, c) in out.iter_mut().zip(&self.columns) {
            *o = c[i];
        }
        out
    }

    /// Row `i` as a vector.
    pub fn get(&self, i: usize) -> Option<Vector<S>> {
        (i < self.len).then(|| Vector::from_components(self.system, self.row(i)))
    }

    pub fn iter(&self) -> impl Iterator<Item = Vector<S>> + '_ {
        (0..self.len).map(|i| Vector::from_components(self.system, self.row(i)))
    }

    fn from_rows(system: System, rows: Vec<Components<S>>) -> Self {
        let len = rows.len();
        let columns = (0..system.len())
            .map(|k| Column::from_fn(len, |i| rows[i][k]))
            .collect();
        Self {
            system,
            columns,
            len,
        }
    }

    fn map_rows<O, F>(&self, f: F) -> Vec<O>
    where
        O: Send,
        F: Fn(usize) -> O + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        {
            (0..self.len).into_par_iter().map(f).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            (0..self.len).map(f).collect()
        }
    }

    /// Re-express every row in another system of the same dimensionality.
    pub fn to_system(&self, to: System) -> Result<Self> {
        if to.dim() != self.dim() {
            return Err(VectorError::DimensionMismatch {
                op: Op::Convert,
                lhs: self.dim(),
                rhs: to.dim(),
            }
            .into());
        }
        let n = self.system.len();
        let rows = self
            .map_rows(|i| convert::convert(self.system, to, &self.row(i)[..n]))
            .into_iter()
            .collect::<core::result::Result<Vec<_>, VectorError>>()?;
        Ok(Self::from_rows(to, rows))
    }

    pub fn to_canonical(&self) -> Self {
        self.reshape(self.system.canonical(), Vector::to_canonical)
    }

    /// Apply a per-row change of system whose target is `to`.
    fn reshape(&self, to: System, f: fn(&Vector<S>) -> Vector<S>) -> Self {
        if to == self.system {
            return self.clone();
        }
        let rows = self.map_rows(|i| {
            f(&Vector::from_components(self.system, self.row(i))).components()
        });
        Self::from_rows(to, rows)
    }

    pub fn to_planar(&self) -> Self {
        self.reshape(System::Planar(self.system.azimuthal()), Vector::to_planar)
    }

    pub fn to_spatial(&self) -> Self {
        let lon = self.system.longitudinal().unwrap_or(LongitudinalKind::Z);
        self.reshape(System::Spatial(self.system.azimuthal(), lon), Vector::to_spatial)
    }

    pub fn to_lorentz(&self) -> Self {
        let lon = self.system.longitudinal().unwrap_or(LongitudinalKind::Z);
        let tem = self.system.temporal().unwrap_or(TemporalKind::T);
        self.reshape(System::Lorentz(self.system.azimuthal(), lon, tem), Vector::to_lorentz)
    }

    /// Run `plan` on every row.
    fn evaluate<O: Send>(&self, plan: &Plan<S, O>, rhs: Option<&Self>, params: &[S]) -> Result<Vec<O>> {
        if let Some(other) = rhs {
            if other.len != self.len {
                return Err(ArrayError::LengthMismatch {
                    expected: self.len,
                    got: other.len,
                });
            }
        }
        tracing::debug!(
            op = %plan.key().op,
            rows = self.len,
            direct = plan.is_direct(),
            "evaluating plan over columns"
        );
        let n = self.system.len();
        let m = rhs.map_or(0, |r| r.system.len());
        let rows = self.map_rows(|i| {
            let l = self.row(i);
            let r = rhs.map(|other| other.row(i));
            plan.eval(&l[..n], r.as_ref().map(|r| &r[..m]), params)
        });
        rows.into_iter()
            .collect::<core::result::Result<Vec<O>, VectorError>>()
            .map_err(ArrayError::from)
    }

    fn scalar(&self, op: ScalarOp, rhs: Option<&Self>, params: &[S]) -> Result<Column<S>> {
        let plan = dispatch::scalar::<S>(op, self.system, rhs.map(|r| r.system))?;
        Ok(Column::new(self.evaluate(&plan, rhs, params)?))
    }

    fn predicate(&self, op: PredicateOp, rhs: Option<&Self>, params: &[S]) -> Result<Column<bool>> {
        let plan = dispatch::predicate::<S>(op, self.system, rhs.map(|r| r.system))?;
        Ok(Column::new(self.evaluate(&plan, rhs, params)?))
    }

    fn transform(&self, op: TransformOp, rhs: Option<&Self>, params: &[S]) -> Result<Self> {
        let plan = dispatch::transform::<S>(op, self.system, rhs.map(|r| r.system))?;
        let rows = self.evaluate(&plan, rhs, params)?;
        Ok(Self::from_rows(plan.output(), rows))
    }

    scalar_ops! {
        x => X;
        y => Y;
        rho => Rho;
        rho2 => Rho2;
        phi => Phi;
        z => Z;
        theta => Theta;
        eta => Eta;
        costheta => CosTheta;
        cottheta => CotTheta;
        mag => Mag;
        mag2 => Mag2;
        t => T;
        t2 => T2;
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
        dot => Dot;
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

    tolerance_ops! {
        is_close, is_close_with => IsClose, close, other;
        is_parallel, is_parallel_with => IsParallel, parallel, other;
        is_antiparallel, is_antiparallel_with => IsAntiparallel, parallel, other;
        is_perpendicular, is_perpendicular_with => IsPerpendicular, parallel, other;
        is_timelike, is_timelike_with => IsTimelike, timelike;
        is_spacelike, is_spacelike_with => IsSpacelike, timelike;
        is_lightlike, is_lightlike_with => IsLightlike, lightlike;
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

    pub fn cross(&self, other: &Self) -> Result<Self> {
        self.transform(TransformOp::Cross, Some(other), &[])
    }

    /// Rotate row `i` about `axes` row `i` by `angle`.
    pub fn rotate_axis(&self, axes: &Self, angle: S) -> Result<Self> {
        self.transform(TransformOp::RotateAxis, Some(axes), &[angle])
    }

    pub fn rotate_quaternion(&self, u: S, i: S, j: S, k: S) -> Result<Self> {
        self.transform(TransformOp::RotateQuaternion, None, &[u, i, j, k])
    }

    pub fn boost_beta3(&self, beta: &Self) -> Result<Self> {
        self.transform(TransformOp::BoostBeta3, Some(beta), &[])
    }

    pub fn boost_p4(&self, p4: &Self) -> Result<Self> {
        self.transform(TransformOp::BoostP4, Some(p4), &[])
    }

    pub fn boost_cm_of_p4(&self, p4: &Self) -> Result<Self> {
        self.transform(TransformOp::BoostCmOfP4, Some(p4), &[])
    }

    pub fn to_beta3(&self) -> Result<Self> {
        self.transform(TransformOp::ToBeta3, None, &[])
    }

    /// Apply one 4x4 matrix (`matrix[row][col]`) to every row.
    pub fn transform4d(&self, matrix: &[[S; 4]; 4]) -> Result<Self> {
        let mut params = [S::ZERO; 16];
        for (chunk, row) in params.chunks_exact_mut(4).zip(matrix) {
            chunk.copy_from_slice(row);
        }
        self.transform(TransformOp::Transform4D, None, &params)
    }

    pub fn equal(&self, other: &Self) -> Result<Column<bool>> {
        self.predicate(PredicateOp::Equal, Some(other), &[])
    }

    pub fn not_equal(&self, other: &Self) -> Result<Column<bool>> {
        self.predicate(PredicateOp::NotEqual, Some(other), &[])
    }
}
