//! Pi digits via the unbounded spigot algorithm.
//!
//! Digits are emitted in lines of ten, `"3141592653\t:10\n"`, appended to a
//! transcript that keeps growing across runs; the checksum hashes the whole
//! transcript.

use num_bigint::BigInt;
use num_integer::Integer;

use crate::checksum::checksum_str;
use crate::error::Result;
use crate::prng::Prng;
use crate::suite_config::ConfigEntry;
use crate::workload::Workload;

pub struct Pidigits {
    amount: usize,
    transcript: String,
}

impl Pidigits {
    pub fn new(amount: usize) -> Self {
        Self {
            amount,
            transcript: String::new(),
        }
    }

    pub fn from_config(entry: &ConfigEntry) -> Result<Self> {
        Ok(Self::new(entry.size("amount")?))
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    fn spigot(&mut self) {
        if self.amount == 0 {
            return;
        }
        let mut digits = 0usize;
        let mut k = 0u32;
        let mut k1 = 1u32;
        let mut ns = BigInt::from(0u32);
        let mut a = BigInt::from(0u32);
        let mut n = BigInt::from(1u32);
        let mut d = BigInt::from(1u32);

        loop {
            k += 1;
            let t: BigInt = &n << 1usize;
            n *= k;
            k1 += 2;
            a = (&a + &t) * k1;
            d *= k1;

            if a >= n {
                let (q, r) = (&n * 3u32 + &a).div_rem(&d);
                if d > r + &n {
                    ns = &ns * 10u32 + &q;
                    digits += 1;

                    if digits % 10 == 0 {
                        self.transcript
                            .push_str(&format!("{:0>10}\t:{}\n", ns.to_string(), digits));
                        ns = BigInt::from(0u32);
                    }

                    if digits >= self.amount {
                        break;
                    }

                    a = (&a - &d * &q) * 10u32;
                    n *= 10u32;
                }
            }
        }
    }
}

impl Workload for Pidigits {
    fn name(&self) -> String {
        "CLBG::Pidigits".to_string()
    }

    fn run(&mut self, _rng: &mut Prng, _iteration: u64) {
        self.spigot();
    }

    fn checksum(&self) -> u32 {
        checksum_str(&self.transcript)
    }
}
