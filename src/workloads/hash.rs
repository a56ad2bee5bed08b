//! Hashing throughput over a buffer of `size` pseudo-random bytes.
//!
//! `Sha256` is not the real SHA-256: it seeds eight lanes with the SHA-256
//! initial hash values and folds bytes round-robin into them. It only needs
//! to be cheap to port and identical everywhere.

use crate::error::Result;
use crate::prng::Prng;
use crate::suite_config::ConfigEntry;
use crate::workload::Workload;

const LANE_SEEDS: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// 32-byte digest of the lane hash, lanes written big-endian.
pub fn lane_digest(data: &[u8]) -> [u8; 32] {
    let mut lanes = LANE_SEEDS;
    for (i, &byte) in data.iter().enumerate() {
        let lane = &mut lanes[i % 8];
        let mut h = lane.wrapping_shl(5).wrapping_add(*lane).wrapping_add(byte as u32);
        h = h.wrapping_add(h << 10) ^ (h >> 6);
        *lane = h;
    }

    let mut digest = [0u8; 32];
    for (out, lane) in digest.chunks_exact_mut(4).zip(lanes) {
        out.copy_from_slice(&lane.to_be_bytes());
    }
    digest
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Crc32,
}

impl HashAlgorithm {
    pub fn label(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Crc32 => "CRC32",
        }
    }

    /// One 32-bit value per pass over `data`.
    pub fn hash(self, data: &[u8]) -> u32 {
        match self {
            HashAlgorithm::Sha256 => {
                let digest = lane_digest(data);
                u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
            }
            HashAlgorithm::Crc32 => crc32fast::hash(data),
        }
    }
}

pub struct HashBench {
    algorithm: HashAlgorithm,
    size: usize,
    data: Vec<u8>,
    result: u32,
}

impl HashBench {
    pub fn new(size: usize, algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            size,
            data: Vec::new(),
            result: 0,
        }
    }

    pub fn from_config(entry: &ConfigEntry, algorithm: HashAlgorithm) -> Result<Self> {
        Ok(Self::new(entry.size("size")?, algorithm))
    }
}

impl Workload for HashBench {
    fn name(&self) -> String {
        format!("Hash::{}", self.algorithm.label())
    }

    fn prepare(&mut self, rng: &mut Prng) {
        self.data = (0..self.size).map(|_| rng.next_int(256) as u8).collect();
    }

    fn run(&mut self, _rng: &mut Prng, _iteration: u64) {
        self.result = self.result.wrapping_add(self.algorithm.hash(&self.data));
    }

    fn checksum(&self) -> u32 {
        self.result
    }
}
