//! Dense `n x n` matrix multiply.
//!
//! The multi-threaded variants split the result rows into one contiguous band
//! per thread; every band is written by exactly one thread, so the product is
//! identical to the single-threaded one.

use std::thread;

use crate::checksum::checksum_f64;
use crate::error::{HarnessError, Result};
use crate::prng::Prng;
use crate::suite_config::ConfigEntry;
use crate::workload::Workload;

/// Row-major square matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// `a[i][j] = (i - j) * (i + j) / n^2`
    pub fn generate(n: usize) -> Self {
        let tmp = 1.0 / (n as f64) / (n as f64);
        let mut m = Self::zeros(n);
        for i in 0..n {
            for j in 0..n {
                let (fi, fj) = (i as f64, j as f64);
                m.data[i * n + j] = tmp * (fi - fj) * (fi + fj);
            }
        }
        m
    }

    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    pub fn transpose(&self) -> Self {
        let n = self.n;
        let mut t = Self::zeros(n);
        for i in 0..n {
            for j in 0..n {
                t.data[j * n + i] = self.data[i * n + j];
            }
        }
        t
    }

    fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}

/// Fill `rows` (starting at row `first`) of `a * b`, given `bt = b^T`.
fn multiply_rows(a: &Matrix, bt: &Matrix, first: usize, rows: &mut [f64]) {
    let n = a.n;
    for (offset, out) in rows.chunks_mut(n).enumerate() {
        let ai = a.row(first + offset);
        for (j, cell) in out.iter_mut().enumerate() {
            let bj = bt.row(j);
            let mut sum = 0.0;
            for k in 0..n {
                sum += ai[k] * bj[k];
            }
            *cell = sum;
        }
    }
}

/// `a * b` on `threads` worker threads (1 means the calling thread).
pub fn multiply(a: &Matrix, b: &Matrix, threads: usize) -> Matrix {
    let n = a.n;
    let bt = b.transpose();
    let mut c = Matrix::zeros(n);
    if n == 0 {
        return c;
    }

    if threads <= 1 {
        multiply_rows(a, &bt, 0, &mut c.data);
        return c;
    }

    let rows_per_band = n.div_ceil(threads);
    let bt = &bt;
    thread::scope(|s| {
        for (band, rows) in c.data.chunks_mut(rows_per_band * n).enumerate() {
            s.spawn(move || multiply_rows(a, bt, band * rows_per_band, rows));
        }
    });
    c
}

pub struct MatmulBench {
    threads: usize,
    a: Matrix,
    b: Matrix,
    result: u32,
}

impl MatmulBench {
    pub fn new(n: usize, threads: usize) -> Self {
        Self {
            threads: threads.max(1),
            a: Matrix::generate(n),
            b: Matrix::generate(n),
            result: 0,
        }
    }

    pub fn from_config(entry: &ConfigEntry, threads: usize) -> Result<Self> {
        let n = entry.size("n")?;
        if n == 0 {
            return Err(HarnessError::invalid_field(entry.name(), "n", "positive integer"));
        }
        Ok(Self::new(n, threads))
    }
}

impl Workload for MatmulBench {
    fn name(&self) -> String {
        match self.threads {
            1 => "Matmul::Single".to_string(),
            t => format!("Matmul::T{t}"),
        }
    }

    fn run(&mut self, _rng: &mut Prng, _iteration: u64) {
        let c = multiply(&self.a, &self.b, self.threads);
        let mid = c.size() >> 1;
        self.result = self.result.wrapping_add(checksum_f64(c.get(mid, mid)));
    }

    fn checksum(&self) -> u32 {
        self.result
    }
}
