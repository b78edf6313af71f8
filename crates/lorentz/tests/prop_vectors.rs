//! Property-based tests for lorentz using proptest.
//!
//! Covers: conversion round trips over every system, addition
//! commutativity and associativity, invariance of mass under boosts and
//! rotations.

use lorentz::{Dim, System, Vector};
use proptest::prelude::*;

fn component() -> impl Strategy<Value = f64> {
    -50.0..50.0_f64
}

fn canonical(dim: Dim) -> impl Strategy<Value = Vector> {
    prop::collection::vec(component(), dim.len())
        .prop_map(move |v| Vector::new(System::canonical_of(dim), &v).unwrap())
}

fn system() -> impl Strategy<Value = System> {
    prop::sample::select(System::ALL.to_vec())
}

/// A timelike four-vector with positive energy. Energies stored as `tau`
/// are always reconstructed positive, so only these round-trip exactly.
fn timelike() -> impl Strategy<Value = Vector> {
    (component(), component(), component(), 0.1..20.0_f64).prop_map(|(x, y, z, m)| {
        let t = (x * x + y * y + z * z + m * m).sqrt();
        Vector::xyzt(x, y, z, t)
    })
}

/// A timelike vector projected to `sys`'s dimensionality and stored in it.
fn vector_in(sys: System) -> impl Strategy<Value = Vector> {
    timelike().prop_map(move |v| {
        let v = match sys.dim() {
            Dim::D2 => v.to_planar(),
            Dim::D3 => v.to_spatial(),
            Dim::D4 => v,
        };
        v.to_system(sys).unwrap()
    })
}

/// `k` vectors sharing a dimensionality, each in its own independently
/// drawn system.
fn same_dim(k: usize) -> impl Strategy<Value = Vec<Vector>> {
    prop::sample::select(vec![Dim::D2, Dim::D3, Dim::D4]).prop_flat_map(move |dim| {
        let systems: Vec<System> = System::ALL.iter().copied().filter(|s| s.dim() == dim).collect();
        let one = prop::sample::select(systems).prop_flat_map(vector_in);
        prop::collection::vec(one, k)
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    /// Converting to any system and back to canonical recovers the input.
    #[test]
    fn conversion_round_trips(sys in system(), seed in timelike()) {
        let start = match sys.dim() {
            Dim::D2 => seed.to_planar(),
            Dim::D3 => seed.to_spatial(),
            Dim::D4 => seed,
        };
        let there = start.to_system(sys).unwrap();
        prop_assert_eq!(there.system(), sys);
        let back = there.to_canonical();
        for (a, b) in back.values().iter().zip(start.values()) {
            prop_assert!(close(*a, *b), "{} -> {} -> {}", start, there, back);
        }
    }

    /// Every same-dimension pair of systems converts losslessly.
    #[test]
    fn conversion_between_any_two_systems(from in system(), to in system(), seed in timelike()) {
        prop_assume!(from.dim() == to.dim());
        let start = match from.dim() {
            Dim::D2 => seed.to_planar(),
            Dim::D3 => seed.to_spatial(),
            Dim::D4 => seed,
        };
        let a = start.to_system(from).unwrap();
        let b = a.to_system(to).unwrap().to_system(from).unwrap();
        prop_assert!(a.is_close(&b).unwrap());
    }

    /// Operands may sit in different systems of the same dimensionality.
    #[test]
    fn addition_commutes((a, b) in same_dim(2).prop_map(|vs| (vs[0], vs[1]))) {
        let ab = a.add(&b).unwrap();
        let ba = b.add(&a).unwrap();
        prop_assert_eq!(ab.system(), ba.system());
        prop_assert!(ab.is_close(&ba).unwrap(), "{} + {}", a, b);
    }

    #[test]
    fn addition_associates(vs in same_dim(3)) {
        let (a, b, c) = (vs[0], vs[1], vs[2]);
        let left = a.add(&b).unwrap().add(&c).unwrap();
        let right = a.add(&b.add(&c).unwrap()).unwrap();
        prop_assert!(left.is_close(&right).unwrap(), "({} + {}) + {}", a, b, c);
    }

    #[test]
    fn mass_is_boost_invariant(p in timelike(), beta in -0.9..0.9_f64) {
        let boosted = p.boost_z_beta(beta).unwrap();
        prop_assert!(close(boosted.tau().unwrap(), p.tau().unwrap()));
    }

    #[test]
    fn rotations_preserve_magnitude(v in canonical(Dim::D3), angle in -6.0..6.0_f64) {
        let mag = v.mag().unwrap();
        for r in [v.rotate_x(angle), v.rotate_y(angle), v.rotate_z(angle)] {
            prop_assert!(close(r.unwrap().mag().unwrap(), mag));
        }
    }

    #[test]
    fn deltaphi_stays_in_range(a in canonical(Dim::D2), b in canonical(Dim::D2)) {
        let d = a.deltaphi(&b).unwrap();
        prop_assert!(d.abs() <= std::f64::consts::PI);
    }
}

#[test]
fn phi_of_origin_in_every_system() {
    for sys in System::ALL {
        let zero = Vector::new(System::canonical_of(sys.dim()), &vec![0.0; sys.len()]).unwrap();
        assert_eq!(zero.to_system(sys).unwrap().phi().unwrap(), 0.0);
    }
}
