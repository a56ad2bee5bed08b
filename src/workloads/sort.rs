//! Sorting over `size` pseudo-random integers.
//!
//! All three variants share one input and one run shape; they differ only in
//! the sort routine, so their checksums must agree.

use crate::error::{HarnessError, Result};
use crate::prng::Prng;
use crate::suite_config::ConfigEntry;
use crate::workload::Workload;

const VALUE_RANGE: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAlgorithm {
    Quick,
    Merge,
    /// The standard library's stable sort.
    Std,
}

impl SortAlgorithm {
    pub fn label(self) -> &'static str {
        match self {
            SortAlgorithm::Quick => "Quick",
            SortAlgorithm::Merge => "Merge",
            SortAlgorithm::Std => "Self",
        }
    }

    pub fn sort(self, data: &mut [i32]) {
        match self {
            SortAlgorithm::Quick => quick_sort(data),
            SortAlgorithm::Merge => merge_sort(data),
            SortAlgorithm::Std => data.sort(),
        }
    }
}

/// Hoare partitioning around the middle element.
pub fn quick_sort(data: &mut [i32]) {
    if data.len() <= 1 {
        return;
    }
    let pivot = data[(data.len() - 1) / 2];
    let mut i = 0;
    let mut j = data.len() - 1;
    loop {
        while data[i] < pivot {
            i += 1;
        }
        while data[j] > pivot {
            j -= 1;
        }
        if i >= j {
            break;
        }
        data.swap(i, j);
        i += 1;
        j -= 1;
    }
    // j is the last index of the left partition
    let (left, right) = data.split_at_mut(j + 1);
    quick_sort(left);
    quick_sort(right);
}

/// Top-down merge sort with one scratch buffer.
pub fn merge_sort(data: &mut [i32]) {
    let mut scratch = data.to_vec();
    merge_sort_into(data, &mut scratch);
}

fn merge_sort_into(data: &mut [i32], scratch: &mut [i32]) {
    let len = data.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    {
        let (left, right) = data.split_at_mut(mid);
        let (sl, sr) = scratch.split_at_mut(mid);
        merge_sort_into(left, sl);
        merge_sort_into(right, sr);
    }

    scratch[..len].copy_from_slice(data);
    let (left, right) = scratch[..len].split_at(mid);
    let (mut i, mut j) = (0, 0);
    for slot in data.iter_mut() {
        if j >= right.len() || (i < left.len() && left[i] <= right[j]) {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}

pub struct SortBench {
    algorithm: SortAlgorithm,
    size: i32,
    data: Vec<i32>,
    result: u32,
}

impl SortBench {
    pub fn new(size: i32, algorithm: SortAlgorithm) -> Self {
        Self {
            algorithm,
            size,
            data: Vec::new(),
            result: 0,
        }
    }

    pub fn from_config(entry: &ConfigEntry, algorithm: SortAlgorithm) -> Result<Self> {
        let size = entry.int("size")?;
        match i32::try_from(size) {
            Ok(size) if size > 0 => Ok(Self::new(size, algorithm)),
            _ => Err(HarnessError::invalid_field(entry.name(), "size", "positive 32-bit integer")),
        }
    }

    fn pick(&self, data: &[i32], rng: &mut Prng) -> u32 {
        data[rng.next_int(self.size) as usize] as u32
    }
}

impl Workload for SortBench {
    fn name(&self) -> String {
        format!("Sort::{}", self.algorithm.label())
    }

    fn prepare(&mut self, rng: &mut Prng) {
        self.data = (0..self.size).map(|_| rng.next_int(VALUE_RANGE)).collect();
    }

    fn run(&mut self, rng: &mut Prng, _iteration: u64) {
        let before = self.pick(&self.data, rng);
        self.result = self.result.wrapping_add(before);

        let mut sorted = self.data.clone();
        self.algorithm.sort(&mut sorted);
        let after = self.pick(&sorted, rng);
        self.result = self.result.wrapping_add(after);
    }

    fn checksum(&self) -> u32 {
        self.result
    }
}
