//! Shared inputs for lorentz benchmarks: seeded jet generator.

use std::f64::consts::PI;

use lorentz::{System, Vector};
use lorentz_array::VectorArray;

/// Fixed so every bench run sees the same jets.
const SEED: u64 = 0x6A45_7453_0BEE_F0D5;

/// xoshiro256** stream of collider-like jets.
pub struct JetSource {
    state: [u64; 4],
}

impl JetSource {
    /// Seeds the four state words from one `u64` with SplitMix64.
    pub fn new(seed: u64) -> Self {
        let mut z = seed;
        let state = core::array::from_fn(|_| {
            z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut w = z;
            w = (w ^ (w >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            w = (w ^ (w >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            w ^ (w >> 31)
        });
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = &mut self.state;
        let out = s1.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let shifted = *s1 << 17;
        *s2 ^= *s0;
        *s3 ^= *s1;
        *s1 ^= *s2;
        *s0 ^= *s3;
        *s2 ^= shifted;
        *s3 = s3.rotate_left(45);
        out
    }

    /// Uniform in `[lo, hi)` from the top 53 bits.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + unit * (hi - lo)
    }

    /// `pt` in [1, 100], `|eta| < 2.5`, any `phi`, mass in [0, 10].
    pub fn jet(&mut self) -> Vector {
        let pt = self.uniform(1.0, 100.0);
        let eta = self.uniform(-2.5, 2.5);
        let phi = self.uniform(-PI, PI);
        let mass = self.uniform(0.0, 10.0);
        Vector::ptetaphim(pt, eta, phi, mass)
    }
}

impl Default for JetSource {
    fn default() -> Self {
        Self::new(SEED)
    }
}

/// `n` jets from the default seed, stored as `(pt, eta, phi, tau)`.
pub fn random_jets(n: usize) -> Vec<Vector> {
    let mut source = JetSource::default();
    (0..n).map(|_| source.jet()).collect()
}

/// Same jets, re-expressed in `system`.
pub fn random_jets_in(system: System, n: usize) -> Vec<Vector> {
    random_jets(n)
        .into_iter()
        .map(|v| v.to_system(system).expect("jets are four-vectors"))
        .collect()
}

pub fn random_jet_array(system: System, n: usize) -> VectorArray<f64> {
    VectorArray::from_vectors(system, &random_jets(n)).expect("jets are four-vectors")
}
