//! Reference workloads.
//!
//! Each workload reproduces a kernel shared by every port of the suite, so
//! its checksum can be compared against the configured value bit for bit.
//!
//! - [`pidigits`] - Spigot digits of pi (big integers)
//! - [`fannkuch`] - Fannkuch-redux permutation flips
//! - [`nbody`] - Jovian planets simulation
//! - [`spectralnorm`] - Spectral norm by power iteration
//! - [`brainfuck`] - Tape interpreter with a separate warmup program
//! - [`matmul`] - Dense matrix multiply, single and multi-threaded
//! - [`base64`] - Encode/decode throughput
//! - [`primes`] - Sieve plus prefix trie lookup
//! - [`sort`] - Quick/merge/std sort over shared input
//! - [`hash`] - CRC32 and a SHA256-shaped mixing hash over shared input

pub mod base64;
pub mod brainfuck;
pub mod fannkuch;
pub mod hash;
pub mod matmul;
pub mod nbody;
pub mod pidigits;
pub mod primes;
pub mod sort;
pub mod spectralnorm;

use crate::error::Result;
use crate::registry::Registry;
use crate::suite_config::ConfigEntry;
use crate::workload::Workload;

use self::base64::{Base64Decode, Base64Encode};
use self::brainfuck::BrainfuckArray;
use self::fannkuch::Fannkuchredux;
use self::hash::{HashAlgorithm, HashBench};
use self::matmul::MatmulBench;
use self::nbody::Nbody;
use self::pidigits::Pidigits;
use self::primes::Primes;
use self::sort::{SortAlgorithm, SortBench};
use self::spectralnorm::Spectralnorm;

fn boxed<W: Workload + 'static>(workload: W) -> Box<dyn Workload> {
    Box::new(workload)
}

/// Every shipped workload, in execution order.
pub fn standard_registry() -> Result<Registry> {
    let mut registry = Registry::new();
    registry
        .register("CLBG::Pidigits", |e: &ConfigEntry| Ok(boxed(Pidigits::from_config(e)?)))?
        .register("CLBG::Fannkuchredux", |e: &ConfigEntry| {
            Ok(boxed(Fannkuchredux::from_config(e)?))
        })?
        .register("CLBG::Nbody", |_: &ConfigEntry| Ok(boxed(Nbody::new())))?
        .register("CLBG::Spectralnorm", |e: &ConfigEntry| {
            Ok(boxed(Spectralnorm::from_config(e)?))
        })?
        .register("Brainfuck::Array", |e: &ConfigEntry| {
            Ok(boxed(BrainfuckArray::from_config(e)?))
        })?
        .register("Matmul::Single", |e: &ConfigEntry| {
            Ok(boxed(MatmulBench::from_config(e, 1)?))
        })?
        .register("Matmul::T4", |e: &ConfigEntry| Ok(boxed(MatmulBench::from_config(e, 4)?)))?
        .register("Matmul::T8", |e: &ConfigEntry| Ok(boxed(MatmulBench::from_config(e, 8)?)))?
        .register("Matmul::T16", |e: &ConfigEntry| {
            Ok(boxed(MatmulBench::from_config(e, 16)?))
        })?
        .register("Base64::Encode", |e: &ConfigEntry| {
            Ok(boxed(Base64Encode::from_config(e)?))
        })?
        .register("Base64::Decode", |e: &ConfigEntry| {
            Ok(boxed(Base64Decode::from_config(e)?))
        })?
        .register("Etc::Primes", |e: &ConfigEntry| Ok(boxed(Primes::from_config(e)?)))?
        .register("Sort::Quick", |e: &ConfigEntry| {
            Ok(boxed(SortBench::from_config(e, SortAlgorithm::Quick)?))
        })?
        .register("Sort::Merge", |e: &ConfigEntry| {
            Ok(boxed(SortBench::from_config(e, SortAlgorithm::Merge)?))
        })?
        .register("Sort::Self", |e: &ConfigEntry| {
            Ok(boxed(SortBench::from_config(e, SortAlgorithm::Std)?))
        })?
        .register("Hash::SHA256", |e: &ConfigEntry| {
            Ok(boxed(HashBench::from_config(e, HashAlgorithm::Sha256)?))
        })?
        .register("Hash::CRC32", |e: &ConfigEntry| {
            Ok(boxed(HashBench::from_config(e, HashAlgorithm::Crc32)?))
        })?;
    Ok(registry)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::prng::Prng;
    use crate::suite_config::{ConfigEntry, SuiteConfig};
    use crate::workload::Workload;

    pub fn entry(name: &str, json: &str) -> ConfigEntry {
        let config = SuiteConfig::from_json_str(&format!(r#"{{ "{}": {} }}"#, name, json)).unwrap();
        config.entry(name).unwrap().clone()
    }

    /// Runner lifecycle without timing or reporting.
    pub fn drive(workload: &mut dyn Workload, entry: &ConfigEntry) -> u32 {
        let mut rng = Prng::new();
        workload.prepare(&mut rng);
        workload.warmup(&mut rng, entry.warmup_iterations().unwrap());
        rng.reset();
        for i in 0..entry.iterations().unwrap() {
            workload.run(&mut rng, i);
        }
        workload.checksum()
    }
}
