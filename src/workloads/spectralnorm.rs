//! Spectral norm of the infinite matrix `A(i, j) = 1 / ((i+j)(i+j+1)/2 + i + 1)`,
//! truncated to `size x size`, by power iteration.
//!
//! The vectors carry over between runs, so warmup and measured runs keep
//! refining the same estimate.

use crate::checksum::checksum_f64;
use crate::error::Result;
use crate::prng::Prng;
use crate::suite_config::ConfigEntry;
use crate::workload::Workload;

#[inline]
fn eval_a(i: usize, j: usize) -> f64 {
    let ij = (i + j) as f64;
    1.0 / (ij * (ij + 1.0) / 2.0 + i as f64 + 1.0)
}

fn a_times_u(u: &[f64]) -> Vec<f64> {
    (0..u.len())
        .map(|i| {
            let mut sum = 0.0;
            for (j, &uj) in u.iter().enumerate() {
                sum += eval_a(i, j) * uj;
            }
            sum
        })
        .collect()
}

fn at_times_u(u: &[f64]) -> Vec<f64> {
    (0..u.len())
        .map(|i| {
            let mut sum = 0.0;
            for (j, &uj) in u.iter().enumerate() {
                sum += eval_a(j, i) * uj;
            }
            sum
        })
        .collect()
}

fn ata_times_u(u: &[f64]) -> Vec<f64> {
    at_times_u(&a_times_u(u))
}

pub struct Spectralnorm {
    u: Vec<f64>,
    v: Vec<f64>,
}

impl Spectralnorm {
    pub fn new(size: usize) -> Self {
        Self {
            u: vec![1.0; size],
            v: vec![1.0; size],
        }
    }

    pub fn from_config(entry: &ConfigEntry) -> Result<Self> {
        Ok(Self::new(entry.size("size")?))
    }

    /// Current estimate `sqrt(<u, v> / <v, v>)`.
    pub fn norm(&self) -> f64 {
        let mut vbv = 0.0;
        let mut vv = 0.0;
        for (&ui, &vi) in self.u.iter().zip(&self.v) {
            vbv += ui * vi;
            vv += vi * vi;
        }
        (vbv / vv).sqrt()
    }
}

impl Workload for Spectralnorm {
    fn name(&self) -> String {
        "CLBG::Spectralnorm".to_string()
    }

    fn run(&mut self, _rng: &mut Prng, _iteration: u64) {
        self.v = ata_times_u(&self.u);
        self.u = ata_times_u(&self.v);
    }

    fn checksum(&self) -> u32 {
        checksum_f64(self.norm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workloads::test_support::{drive, entry};

    #[test]
    fn test_converges_to_known_norm() {
        // reference output for n = 100 after 10 iterations
        let mut w = Spectralnorm::new(100);
        let mut rng = Prng::new();
        for i in 0..10 {
            w.run(&mut rng, i);
        }
        assert_eq!(format!("{:.9}", w.norm()), "1.274219991");
    }

    #[test]
    fn test_smoke_checksum() {
        let e = entry("CLBG::Spectralnorm", r#"{"checksum": 1052168784, "size": 45, "iterations": 10}"#);
        let mut w = Spectralnorm::from_config(&e).unwrap();
        assert_eq!(drive(&mut w, &e), 1052168784);
    }
}
