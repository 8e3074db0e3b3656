//! Fixed feature map as an exact state-vector simulation.
//!
//! The circuit on `n` wires is:
//!
//! ```text
//! RX(x[i]) on wire i                      angle embedding, one per input value
//! repeat ENTANGLER_LAYERS times:
//!     RX(ENTANGLER_WEIGHT) on every wire
//!     CNOT ring (none for n=1, CNOT(0,1) for n=2, CNOT(i, i+1 mod n) otherwise)
//! RY(0.1 * x[i mod len(x)]) on wire i     readout rotation
//! measure ⟨Z_i⟩ on every wire
//! ```
//!
//! Wire 0 is the most significant bit of the basis index. Amplitudes are kept
//! as separate real and imaginary `f64` arrays; only RX introduces imaginary
//! parts, and every other gate acts on both arrays identically.

use crate::config::{ENTANGLER_LAYERS, ENTANGLER_WEIGHT, MAX_QUBITS, READOUT_ROTATION_SCALE};
use crate::error::CoreError;

/// `2^n` complex amplitudes over `n` qubits.
#[derive(Debug, Clone)]
pub struct StateVector {
    n_qubits: usize,
    re: Vec<f64>,
    im: Vec<f64>,
}

impl StateVector {
    /// The all-zero basis state `|0…0⟩`.
    pub fn zero(n_qubits: usize) -> Self {
        let dim = 1usize << n_qubits;
        let mut re = vec![0.0; dim];
        re[0] = 1.0;
        Self {
            n_qubits,
            re,
            im: vec![0.0; dim],
        }
    }

    #[inline]
    fn mask(&self, wire: usize) -> usize {
        1 << (self.n_qubits - 1 - wire)
    }

    /// Rotation about X by `theta`.
    pub fn rx(&mut self, wire: usize, theta: f64) {
        let (s, c) = (theta / 2.0).sin_cos();
        let mask = self.mask(wire);
        for i in 0..self.re.len() {
            if i & mask != 0 {
                continue;
            }
            let j = i | mask;
            let (ar, ai, br, bi) = (self.re[i], self.im[i], self.re[j], self.im[j]);
            // [[c, -is], [-is, c]]
            self.re[i] = c * ar + s * bi;
            self.im[i] = c * ai - s * br;
            self.re[j] = c * br + s * ai;
            self.im[j] = c * bi - s * ar;
        }
    }

    /// Rotation about Y by `theta`.
    pub fn ry(&mut self, wire: usize, theta: f64) {
        let (s, c) = (theta / 2.0).sin_cos();
        let mask = self.mask(wire);
        for i in 0..self.re.len() {
            if i & mask != 0 {
                continue;
            }
            let j = i | mask;
            for amp in [&mut self.re, &mut self.im] {
                let (a, b) = (amp[i], amp[j]);
                amp[i] = c * a - s * b;
                amp[j] = s * a + c * b;
            }
        }
    }

    /// Controlled-NOT with `control` and `target` wires.
    pub fn cnot(&mut self, control: usize, target: usize) {
        let cmask = self.mask(control);
        let tmask = self.mask(target);
        for i in 0..self.re.len() {
            if i & cmask != 0 && i & tmask == 0 {
                let j = i | tmask;
                self.re.swap(i, j);
                self.im.swap(i, j);
            }
        }
    }

    /// Expectation value of Pauli-Z on `wire`.
    pub fn expval_z(&self, wire: usize) -> f64 {
        let mask = self.mask(wire);
        self.re
            .iter()
            .zip(&self.im)
            .enumerate()
            .map(|(i, (r, im))| {
                let p = r * r + im * im;
                if i & mask == 0 {
                    p
                } else {
                    -p
                }
            })
            .sum()
    }
}

/// The fixed feature map producing one `⟨Z⟩` per qubit.
#[derive(Debug, Clone, Copy)]
pub struct FeatureMap {
    n_qubits: usize,
}

impl FeatureMap {
    pub fn new(n_qubits: usize) -> Result<Self, CoreError> {
        if n_qubits == 0 || n_qubits > MAX_QUBITS {
            return Err(CoreError::InvalidArtifact(format!(
                "n_qubits must be 1-{}, got {}",
                MAX_QUBITS, n_qubits
            )));
        }
        Ok(Self { n_qubits })
    }

    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    fn entangle(&self, state: &mut StateVector) {
        match self.n_qubits {
            1 => {}
            2 => state.cnot(0, 1),
            n => {
                for i in 0..n {
                    state.cnot(i, (i + 1) % n);
                }
            }
        }
    }

    /// Runs the circuit on `x` and returns `⟨Z_i⟩` for every wire.
    pub fn apply(&self, x: &[f64]) -> Result<Vec<f64>, CoreError> {
        let n = self.n_qubits;
        if x.is_empty() || x.len() > n {
            return Err(CoreError::Encoding(format!(
                "feature map takes 1-{} values, got {}",
                n,
                x.len()
            )));
        }

        let mut state = StateVector::zero(n);
        for (wire, &v) in x.iter().enumerate() {
            state.rx(wire, v);
        }
        for _ in 0..ENTANGLER_LAYERS {
            for wire in 0..n {
                state.rx(wire, ENTANGLER_WEIGHT);
            }
            self.entangle(&mut state);
        }
        for wire in 0..n {
            state.ry(wire, READOUT_ROTATION_SCALE * x[wire % x.len()]);
        }

        Ok((0..n).map(|wire| state.expval_z(wire)).collect())
    }
}
