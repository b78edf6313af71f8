//! Totality of the dispatch table.
//!
//! Every operation is resolved for every coordinate system. Where the
//! operand is too small the resolution must fail with a domain error;
//! everywhere else the plan must evaluate to the same result as the plan
//! for canonical operands.

use approx::assert_relative_eq;
use lorentz::dispatch::{self, Operand, Signature};
use lorentz::{Dim, ErrorKind, PredicateOp, ScalarOp, System, TransformOp, Vector};

fn sample(system: System) -> Vector {
    let canonical = match system.dim() {
        Dim::D2 => Vector::xy(1.5, -0.5),
        Dim::D3 => Vector::xyz(1.5, -0.5, 2.0),
        Dim::D4 => Vector::xyzt(1.5, -0.5, 2.0, 7.0),
    };
    canonical.to_system(system).unwrap()
}

fn other(system: System) -> Vector {
    let canonical = match system.dim() {
        Dim::D2 => Vector::xy(0.3, 2.0),
        Dim::D3 => Vector::xyz(0.3, 2.0, -1.0),
        Dim::D4 => Vector::xyzt(0.3, 2.0, -1.0, 4.0),
    };
    canonical.to_system(system).unwrap()
}

/// Second operands accepted by `sig` next to `lhs`.
fn partners(sig: Signature, lhs: System) -> Vec<Option<Vector>> {
    match sig.operand {
        Operand::Unary => vec![None],
        Operand::SameDim => System::ALL
            .iter()
            .filter(|s| s.dim() == lhs.dim())
            .map(|&s| Some(other(s)))
            .collect(),
        // A velocity must stay below one; the same vector serves as an axis.
        Operand::Fixed(Dim::D3) => vec![Some(Vector::xyz(0.1, -0.2, 0.3))],
        Operand::Fixed(dim) => vec![Some(other(System::canonical_of(dim)))],
    }
}

fn params(sig: Signature) -> Vec<f64> {
    vec![0.1; sig.params]
}

/// Like [`params`], but a Lorentz factor must be at least one.
fn transform_params(op: TransformOp) -> Vec<f64> {
    match op {
        TransformOp::BoostXGamma | TransformOp::BoostYGamma | TransformOp::BoostZGamma => vec![1.1],
        _ => params(op.signature()),
    }
}

fn assert_same(a: f64, b: f64) {
    assert_relative_eq!(a, b, epsilon = 1e-9, max_relative = 1e-9);
}

#[test]
fn scalar_ops_agree_with_canonical_route() {
    for &op in ScalarOp::ALL {
        let sig = op.signature();
        for lhs in System::ALL {
            let v = sample(lhs);
            for rhs in partners(sig, lhs) {
                let resolved = dispatch::scalar::<f64>(op, lhs, rhs.map(|r| r.system()));
                if lhs.dim() < sig.min_dim {
                    assert_eq!(resolved.unwrap_err().kind(), ErrorKind::Domain, "{op} on {lhs}");
                    continue;
                }
                let plan = resolved.unwrap();
                let got = plan
                    .eval(v.values(), rhs.as_ref().map(Vector::values), &params(sig))
                    .unwrap();

                let (cv, cr) = (v.to_canonical(), rhs.map(|r| r.to_canonical()));
                let reference = dispatch::scalar::<f64>(op, cv.system(), cr.map(|r| r.system()))
                    .unwrap()
                    .eval(cv.values(), cr.as_ref().map(Vector::values), &params(sig))
                    .unwrap();
                assert_same(got, reference);
            }
        }
    }
}

#[test]
fn predicates_agree_with_canonical_route() {
    for &op in PredicateOp::ALL {
        let sig = op.signature();
        for lhs in System::ALL {
            let v = sample(lhs);
            for rhs in partners(sig, lhs) {
                let resolved = dispatch::predicate::<f64>(op, lhs, rhs.map(|r| r.system()));
                if lhs.dim() < sig.min_dim {
                    assert_eq!(resolved.unwrap_err().kind(), ErrorKind::Domain, "{op} on {lhs}");
                    continue;
                }
                let got = resolved
                    .unwrap()
                    .eval(v.values(), rhs.as_ref().map(Vector::values), &params(sig))
                    .unwrap();

                let (cv, cr) = (v.to_canonical(), rhs.map(|r| r.to_canonical()));
                let reference = dispatch::predicate::<f64>(op, cv.system(), cr.map(|r| r.system()))
                    .unwrap()
                    .eval(cv.values(), cr.as_ref().map(Vector::values), &params(sig))
                    .unwrap();
                assert_eq!(got, reference, "{op} on {lhs}");
            }
        }
    }
}

#[test]
fn transforms_agree_with_canonical_route() {
    for &op in TransformOp::ALL {
        let sig = op.signature();
        for lhs in System::ALL {
            let v = sample(lhs);
            for rhs in partners(sig, lhs) {
                let resolved = dispatch::transform::<f64>(op, lhs, rhs.map(|r| r.system()));
                if lhs.dim() < sig.min_dim {
                    assert_eq!(resolved.unwrap_err().kind(), ErrorKind::Domain, "{op} on {lhs}");
                    continue;
                }
                let plan = resolved.unwrap();
                let out = plan
                    .eval(v.values(), rhs.as_ref().map(Vector::values), &transform_params(op))
                    .unwrap();
                let got = Vector::from_components(plan.output(), out).to_canonical();

                let (cv, cr) = (v.to_canonical(), rhs.map(|r| r.to_canonical()));
                let reference_plan =
                    dispatch::transform::<f64>(op, cv.system(), cr.map(|r| r.system())).unwrap();
                let reference = reference_plan
                    .eval(cv.values(), cr.as_ref().map(Vector::values), &transform_params(op))
                    .unwrap();

                assert_eq!(got.system(), reference_plan.output(), "{op} on {lhs}");
                for (a, b) in got.values().iter().zip(&reference) {
                    assert_same(*a, *b);
                }
            }
        }
    }
}

#[test]
fn same_dim_ops_reject_other_dims() {
    for &op in TransformOp::ALL {
        let sig = op.signature();
        if sig.operand != Operand::SameDim {
            continue;
        }
        for lhs in System::ALL.iter().filter(|s| s.dim() >= sig.min_dim) {
            for rhs in System::ALL.iter().filter(|s| s.dim() != lhs.dim()) {
                let err = dispatch::transform::<f64>(op, *lhs, Some(*rhs)).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::DimensionMismatch, "{op}: {lhs} with {rhs}");
            }
        }
    }
}

#[test]
fn azimuthal_reads_convert_only_when_needed() {
    for lhs in System::ALL {
        for op in [ScalarOp::X, ScalarOp::Rho, ScalarOp::Rho2, ScalarOp::Phi] {
            let plan = dispatch::scalar::<f64>(op, lhs, None).unwrap();
            let polar = lhs.azimuthal() == lorentz::AzimuthalKind::RhoPhi;
            assert_eq!(plan.is_direct(), !(polar && op == ScalarOp::X), "{op} on {lhs}");
        }
    }
}

#[test]
fn op_names_round_out_the_table() {
    let ops: Vec<_> = lorentz::Op::all().collect();
    assert_eq!(
        ops.len(),
        ScalarOp::ALL.len() + PredicateOp::ALL.len() + TransformOp::ALL.len()
    );
    assert!(ops.iter().any(|op| op.name() == "boost_cm_of_p4"));
}
