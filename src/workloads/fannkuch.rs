//! Fannkuch-redux: count prefix reversals ("pancake flips") over all
//! permutations of `0..n`.
//!
//! Every run folds `checksum * 100 + max_flips` into the register.

use crate::error::{HarnessError, Result};
use crate::prng::Prng;
use crate::suite_config::ConfigEntry;
use crate::workload::Workload;

const MAX_N: usize = 32;

pub struct Fannkuchredux {
    n: usize,
    result: u32,
}

impl Fannkuchredux {
    pub fn new(n: usize) -> Self {
        Self { n, result: 0 }
    }

    pub fn from_config(entry: &ConfigEntry) -> Result<Self> {
        let n = entry.size("n")?;
        if !(1..MAX_N).contains(&n) {
            return Err(HarnessError::invalid_field(entry.name(), "n", "integer in 1..32"));
        }
        Ok(Self::new(n))
    }
}

/// Returns `(checksum, max_flips)` for permutations of `0..n`.
pub fn fannkuch(n: usize) -> (i32, i32) {
    let mut perm1 = [0i32; MAX_N];
    for (i, p) in perm1.iter_mut().enumerate() {
        *p = i as i32;
    }
    let mut perm = [0i32; MAX_N];
    let mut count = [0i32; MAX_N];
    let mut max_flips = 0;
    let mut perm_count = 0;
    let mut checksum = 0;
    let mut r = n;

    loop {
        while r > 1 {
            count[r - 1] = r as i32;
            r -= 1;
        }

        perm[..n].copy_from_slice(&perm1[..n]);

        let mut flips = 0;
        let mut k = perm[0] as usize;
        while k != 0 {
            perm[..=k].reverse();
            flips += 1;
            k = perm[0] as usize;
        }

        max_flips = max_flips.max(flips);
        if perm_count % 2 == 0 {
            checksum += flips;
        } else {
            checksum -= flips;
        }

        // next permutation: rotate the first r+1 elements until a counter survives
        loop {
            if r == n {
                return (checksum, max_flips);
            }
            perm1[..=r].rotate_left(1);
            count[r] -= 1;
            if count[r] > 0 {
                break;
            }
            r += 1;
        }

        perm_count += 1;
    }
}

impl Workload for Fannkuchredux {
    fn name(&self) -> String {
        "CLBG::Fannkuchredux".to_string()
    }

    fn run(&mut self, _rng: &mut Prng, _iteration: u64) {
        let (checksum, max_flips) = fannkuch(self.n);
        self.result = self
            .result
            .wrapping_add((checksum as u32).wrapping_mul(100).wrapping_add(max_flips as u32));
    }

    fn checksum(&self) -> u32 {
        self.result
    }
}
