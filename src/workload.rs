//! Workload contract.
//!
//! A workload is one benchmarked algorithm. The runner drives every workload
//! through the same lifecycle:
//!
//! ```text
//! construct(entry) -> prepare(rng) -> warmup(rng, n) -> [rng reset] -> run(rng, 0..iterations) -> checksum()
//! ```
//!
//! `run` folds its result into an accumulating 32-bit register that
//! `checksum` reads. Because the register is never cleared, the final value
//! depends on the exact number and order of calls.

use crate::prng::Prng;

pub trait Workload {
    /// Configuration key of this workload.
    ///
    /// Defaults to the implementing type's name without its module path.
    fn name(&self) -> String {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }

    /// One-time setup, e.g. generating input data from `rng`.
    fn prepare(&mut self, _rng: &mut Prng) {}

    /// Unmeasured repetitions before timing starts.
    ///
    /// Overriding is allowed, for instance to warm up on a smaller input.
    fn warmup(&mut self, rng: &mut Prng, iterations: u64) {
        for i in 0..iterations {
            self.run(rng, i);
        }
    }

    /// One unit of work; updates the result register.
    fn run(&mut self, rng: &mut Prng, iteration: u64);

    /// Current value of the result register.
    fn checksum(&self) -> u32;
}
