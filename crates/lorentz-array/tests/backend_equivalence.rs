//! Scalar and columnar evaluation agree.
//!
//! For a vector `v` and the array of `n` copies of `v` (including `n = 0`),
//! every operation produces `n` copies of the scalar result, or the same
//! error.

use lorentz::{Dim, PredicateOp, ScalarOp, System, TransformOp, Vector, VectorError};
use lorentz_array::{ArrayError, Column, VectorArray};
use proptest::prelude::*;

fn component() -> impl Strategy<Value = f64> {
    -20.0..20.0_f64
}

fn system() -> impl Strategy<Value = System> {
    prop::sample::select(System::ALL.to_vec())
}

fn system_of(dim: Dim) -> impl Strategy<Value = System> {
    let systems: Vec<System> = System::ALL.iter().copied().filter(|s| s.dim() == dim).collect();
    prop::sample::select(systems)
}

/// A timelike vector expressed in `sys`.
fn vector_in(sys: System) -> impl Strategy<Value = Vector> {
    (component(), component(), component(), 0.5..10.0_f64).prop_map(move |(x, y, z, m)| {
        let t = (x * x + y * y + z * z + m * m).sqrt();
        let v = Vector::xyzt(x, y, z, t);
        let v = match sys.dim() {
            Dim::D2 => v.to_planar(),
            Dim::D3 => v.to_spatial(),
            Dim::D4 => v,
        };
        v.to_system(sys).unwrap()
    })
}

/// Everything one round of comparisons needs.
#[derive(Debug, Clone)]
struct Operands {
    v: Vector,
    /// Same dimensionality as `v`, any system.
    w: Vector,
    /// Any 3D system; doubles as a rotation axis.
    axis: Vector,
    /// Subluminal velocity in any 3D system.
    beta: Vector,
    /// Timelike momentum in any 4D system.
    p4: Vector,
    angle: f64,
}

fn operands() -> impl Strategy<Value = Operands> {
    let v_and_w = system().prop_flat_map(|a| (vector_in(a), system_of(a.dim()).prop_flat_map(vector_in)));
    (
        v_and_w,
        system_of(Dim::D3).prop_flat_map(vector_in),
        system_of(Dim::D3),
        system_of(Dim::D4).prop_flat_map(vector_in),
        -3.0..3.0_f64,
    )
        .prop_map(|((v, w), axis, beta_sys, p4, angle)| Operands {
            v,
            w,
            axis,
            beta: Vector::xyz(0.1, -0.2, 0.3).to_system(beta_sys).unwrap(),
            p4,
            angle,
        })
}

fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn check_scalar(
    n: usize,
    name: &str,
    scalar: Result<f64, VectorError>,
    column: Result<Column<f64>, ArrayError>,
) -> Result<(), TestCaseError> {
    match (scalar, column) {
        (Ok(s), Ok(c)) => {
            prop_assert_eq!(c.len(), n, "{}", name);
            for value in c.iter() {
                prop_assert!(same_value(value, s), "{}: {} vs {}", name, value, s);
            }
        }
        (Err(e), Err(ae)) => prop_assert_eq!(ArrayError::from(e), ae, "{}", name),
        (s, c) => prop_assert!(false, "{}: scalar {:?} vs array {:?}", name, s, c),
    }
    Ok(())
}

fn check_flag(
    n: usize,
    name: &str,
    scalar: Result<bool, VectorError>,
    column: Result<Column<bool>, ArrayError>,
) -> Result<(), TestCaseError> {
    let expected = scalar.map(|s| Column::repeat(s, n)).map_err(ArrayError::from);
    prop_assert_eq!(expected, column, "{}", name);
    Ok(())
}

fn check_vector(
    n: usize,
    name: &str,
    scalar: Result<Vector, VectorError>,
    array: Result<VectorArray<f64>, ArrayError>,
) -> Result<(), TestCaseError> {
    match (scalar, array) {
        (Ok(s), Ok(a)) => {
            prop_assert_eq!(a.len(), n, "{}", name);
            prop_assert_eq!(a.system(), s.system(), "{}", name);
            for row in a.iter() {
                prop_assert_eq!(row.system(), s.system(), "{}", name);
                for (r, e) in row.values().iter().zip(s.values()) {
                    prop_assert!(same_value(*r, *e), "{}: {:?} vs {:?}", name, row, s);
                }
            }
        }
        (Err(e), Err(ae)) => prop_assert_eq!(ArrayError::from(e), ae, "{}", name),
        (s, a) => prop_assert!(false, "{}: scalar {:?} vs array {:?}", name, s, a),
    }
    Ok(())
}

/// `$check(n, name, v.name(scalar args), a.name(array args))` per line,
/// recording each compared name in `$seen`.
macro_rules! compare {
    ($seen:ident, $n:expr, $check:ident, $v:ident, $a:ident;
     $($name:ident ( $($sarg:expr),* ) ( $($aarg:expr),* );)*) => {
        $(
            $check($n, stringify!($name), $v.$name($($sarg),*), $a.$name($($aarg),*))?;
            $seen.push(stringify!($name));
        )*
    };
}

/// Compare every public operation and return the names compared.
fn compare_all(ops: &Operands, n: usize) -> Result<Vec<&'static str>, TestCaseError> {
    let Operands { v, w, axis, beta, p4, angle } = ops;
    let angle = *angle;
    let a = VectorArray::repeat(v, n);
    let b = VectorArray::repeat(w, n);
    let axes = VectorArray::repeat(axis, n);
    let betas = VectorArray::repeat(beta, n);
    let p4s = VectorArray::repeat(p4, n);

    let gamma = 1.0 + angle.abs();
    let (s, c) = (angle / 2.0).sin_cos();
    let (sin, cos) = angle.sin_cos();
    let matrix = [
        [cos, -sin, 0.0, 0.0],
        [sin, cos, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.5],
        [0.0, 0.0, 0.5, 1.0],
    ];

    let mut seen = Vec::new();
    compare! { seen, n, check_scalar, v, a;
        x()() ; y()() ; rho()() ; rho2()() ; phi()() ;
        z()() ; theta()() ; eta()() ; costheta()() ; cottheta()() ; mag()() ; mag2()() ;
        t()() ; t2()() ; tau()() ; tau2()() ; beta()() ; gamma()() ; rapidity()() ;
        et()() ; et2()() ; mt()() ; mt2()() ;
        dot(w)(&b) ; deltaphi(w)(&b) ; deltaangle(w)(&b) ; deltaeta(w)(&b) ;
        delta_r(w)(&b) ; delta_r2(w)(&b) ;
    }
    compare! { seen, n, check_flag, v, a;
        equal(w)(&b) ; not_equal(w)(&b) ; is_close(w)(&b) ;
        is_parallel(w)(&b) ; is_antiparallel(w)(&b) ; is_perpendicular(w)(&b) ;
        is_timelike()() ; is_spacelike()() ; is_lightlike()() ;
    }
    compare! { seen, n, check_vector, v, a;
        add(w)(&b) ; subtract(w)(&b) ; scale(angle)(angle) ; unit()() ;
        rotate_z(angle)(angle) ; cross(w)(&b) ; rotate_x(angle)(angle) ; rotate_y(angle)(angle) ;
        rotate_axis(axis, angle)(&axes, angle) ;
        rotate_quaternion(c, 0.6 * s, 0.0, 0.8 * s)(c, 0.6 * s, 0.0, 0.8 * s) ;
        boost_x_beta(angle / 4.0)(angle / 4.0) ;
        boost_y_beta(angle / 4.0)(angle / 4.0) ;
        boost_z_beta(angle / 4.0)(angle / 4.0) ;
        boost_x_gamma(gamma)(gamma) ; boost_y_gamma(gamma)(gamma) ; boost_z_gamma(gamma)(gamma) ;
        boost_beta3(beta)(&betas) ; boost_p4(p4)(&p4s) ; boost_cm_of_p4(p4)(&p4s) ;
        to_beta3()() ; transform4d(&matrix)(&matrix) ;
    }
    Ok(seen)
}

proptest! {
    #[test]
    fn every_operation_matches(ops in operands(), n in 0usize..6) {
        compare_all(&ops, n)?;
    }

    #[test]
    fn conversions_match(v in system().prop_flat_map(vector_in), to in system(), n in 0usize..6) {
        let a = VectorArray::repeat(&v, n);
        check_vector(n, "to_system", v.to_system(to), a.to_system(to))?;
        check_vector(n, "to_canonical", Ok(v.to_canonical()), Ok(a.to_canonical()))?;
        check_vector(n, "to_planar", Ok(v.to_planar()), Ok(a.to_planar()))?;
        check_vector(n, "to_spatial", Ok(v.to_spatial()), Ok(a.to_spatial()))?;
        check_vector(n, "to_lorentz", Ok(v.to_lorentz()), Ok(a.to_lorentz()))?;
    }
}

#[test]
fn every_operation_is_compared() {
    let ops = Operands {
        v: Vector::ptetaphim(30.0, 0.4, 1.2, 5.0),
        w: Vector::xyzt(1.0, 2.0, 3.0, 10.0),
        axis: Vector::xyz(0.0, 0.0, 1.0),
        beta: Vector::xyz(0.1, -0.2, 0.3),
        p4: Vector::xyzt(0.3, 2.0, -1.0, 4.0),
        angle: 0.7,
    };
    let mut compared = compare_all(&ops, 2).unwrap();
    compared.sort_unstable();

    let mut names: Vec<&str> = ScalarOp::ALL
        .iter()
        .map(|op| op.name())
        .chain(PredicateOp::ALL.iter().map(|op| op.name()))
        .chain(TransformOp::ALL.iter().map(|op| op.name()))
        .collect();
    names.sort_unstable();
    assert_eq!(compared, names);
}

#[test]
fn from_vectors_matches_get() {
    let vs = [
        Vector::ptetaphim(30.0, 0.1, 0.2, 5.0),
        Vector::ptetaphim(12.0, -1.4, 2.9, 0.1),
        Vector::ptetaphim(7.5, 2.2, -0.7, 1.0),
    ];
    let a = VectorArray::from_vectors(vs[0].system(), &vs).unwrap();
    for (i, v) in vs.iter().enumerate() {
        assert_eq!(a.get(i).unwrap(), *v);
        assert_eq!(a.tau().unwrap()[i], v.tau().unwrap());
    }
}

#[test]
fn from_vectors_converts_mixed_systems() {
    let vs = [Vector::xy(1.0, 0.0), Vector::rhophi(2.0, 0.0)];
    let a = VectorArray::from_vectors(System::canonical_of(Dim::D2), &vs).unwrap();
    assert_eq!(a.x().unwrap().data(), &[1.0, 2.0]);
}

#[test]
fn from_vectors_rejects_other_dims() {
    let vs = [Vector::xy(1.0, 0.0), Vector::xyz(2.0, 0.0, 1.0)];
    let err = VectorArray::from_vectors(System::canonical_of(Dim::D2), &vs).unwrap_err();
    assert_eq!(err.kind(), lorentz::ErrorKind::DimensionMismatch);
}
