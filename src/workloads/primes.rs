//! Sieve of Eratosthenes, then a decimal-digit trie to find every prime
//! starting with a given prefix.

use std::collections::VecDeque;

use crate::error::{HarnessError, Result};
use crate::prng::Prng;
use crate::suite_config::ConfigEntry;
use crate::workload::Workload;

const RESULT_SEED: u32 = 5432;

/// All primes `<= limit`, ascending.
pub fn sieve(limit: usize) -> Vec<u32> {
    if limit < 2 {
        return Vec::new();
    }
    let mut is_prime = vec![true; limit + 1];
    is_prime[0] = false;
    is_prime[1] = false;

    let mut p = 2;
    while p * p <= limit {
        if is_prime[p] {
            for multiple in (p * p..=limit).step_by(p) {
                is_prime[multiple] = false;
            }
        }
        p += 1;
    }

    is_prime
        .iter()
        .enumerate()
        .filter_map(|(n, &prime)| prime.then_some(n as u32))
        .collect()
}

#[derive(Default)]
struct TrieNode {
    children: [Option<Box<TrieNode>>; 10],
    terminal: bool,
}

fn digits(n: u64) -> impl Iterator<Item = usize> {
    n.to_string().into_bytes().into_iter().map(|b| (b - b'0') as usize)
}

/// Decimal-digit trie of a set of numbers.
#[derive(Default)]
pub struct DigitTrie {
    root: TrieNode,
}

impl DigitTrie {
    pub fn build(numbers: &[u32]) -> Self {
        let mut trie = Self::default();
        for &n in numbers {
            let mut node = &mut trie.root;
            for d in digits(n as u64) {
                node = &mut **node.children[d].get_or_insert_with(Default::default);
            }
            node.terminal = true;
        }
        trie
    }

    /// Every stored number whose decimal form starts with `prefix`, ascending.
    pub fn with_prefix(&self, prefix: u64) -> Vec<u64> {
        let mut node = &self.root;
        for d in digits(prefix) {
            match &node.children[d] {
                Some(child) => node = child.as_ref(),
                None => return Vec::new(),
            }
        }

        let mut found = Vec::new();
        let mut queue = VecDeque::from([(node, prefix)]);
        while let Some((node, number)) = queue.pop_front() {
            if node.terminal {
                found.push(number);
            }
            for (d, child) in node.children.iter().enumerate() {
                if let Some(child) = child {
                    queue.push_back((child.as_ref(), number * 10 + d as u64));
                }
            }
        }
        found.sort_unstable();
        found
    }
}

pub struct Primes {
    limit: usize,
    prefix: u64,
    result: u32,
}

impl Primes {
    pub fn new(limit: usize, prefix: u64) -> Self {
        Self {
            limit,
            prefix,
            result: RESULT_SEED,
        }
    }

    pub fn from_config(entry: &ConfigEntry) -> Result<Self> {
        let limit = entry.size("limit")?;
        let prefix = u64::try_from(entry.int("prefix")?).map_err(|_| {
            HarnessError::invalid_field(entry.name(), "prefix", "non-negative integer")
        })?;
        Ok(Self::new(limit, prefix))
    }
}

impl Workload for Primes {
    fn name(&self) -> String {
        "Etc::Primes".to_string()
    }

    fn run(&mut self, _rng: &mut Prng, _iteration: u64) {
        let trie = DigitTrie::build(&sieve(self.limit));
        let found = trie.with_prefix(self.prefix);
        self.result = self.result.wrapping_add(found.len() as u32);
        for p in found {
            self.result = self.result.wrapping_add(p as u32);
        }
    }

    fn checksum(&self) -> u32 {
        self.result
    }
}
