//! Benchmark runner.
//!
//! Drives every selected workload through the measurement protocol:
//!
//! 1. reset PRNG
//! 2. construct from the configuration entry, `prepare`
//! 3. `warmup` (unmeasured)
//! 4. reset PRNG again
//! 5. time exactly `iterations` calls to `run(0..iterations)`
//! 6. compare `checksum()` with the configured value
//! 7. report
//!
//! A checksum mismatch is recorded and the run continues. Configuration errors
//! abort the run; panics inside a workload are not caught.

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Instant;

use serde::Serialize;

use crate::error::{HarnessError, Result};
use crate::prng::Prng;
use crate::registry::{Registration, Registry};
use crate::report::Reporter;
use crate::suite_config::{ConfigEntry, SuiteConfig};

/// Case-insensitive substring filter over workload names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    needle: Option<String>,
}

impl Selector {
    /// Select every workload.
    pub fn all() -> Self {
        Self { needle: None }
    }

    pub fn new(pattern: Option<&str>) -> Self {
        Self {
            needle: pattern
                .filter(|p| !p.is_empty())
                .map(|p| p.to_lowercase()),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => name.to_lowercase().contains(needle.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Ok,
    Mismatch { actual: u32, expected: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub name: String,
    pub elapsed_secs: f64,
    pub verdict: Verdict,
}

impl RunResult {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Ok
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub results: Vec<RunResult>,
    /// Selected workloads without a configuration entry
    pub skipped: Vec<String>,
    /// Sum of measured time, warmup excluded
    pub total_secs: f64,
    pub ok: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, result: RunResult) {
        if result.passed() {
            self.ok += 1;
        } else {
            self.failed += 1;
        }
        self.total_secs += result.elapsed_secs;
        self.results.push(result);
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// 0 when every executed workload matched, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.all_passed() { 0 } else { 1 }
    }

    /// Measured seconds per workload, the shape the orchestrator aggregates.
    pub fn timings(&self) -> BTreeMap<&str, f64> {
        self.results
            .iter()
            .map(|r| (r.name.as_str(), r.elapsed_secs))
            .collect()
    }
}

pub struct Runner<'a, W: Write> {
    registry: &'a Registry,
    config: &'a SuiteConfig,
    reporter: Reporter<W>,
    rng: Prng,
}

impl<'a, W: Write> Runner<'a, W> {
    pub fn new(registry: &'a Registry, config: &'a SuiteConfig, reporter: Reporter<W>) -> Self {
        Self {
            registry,
            config,
            reporter,
            rng: Prng::new(),
        }
    }

    /// Run every registered workload accepted by `selector`, in registration order.
    pub fn run_all(&mut self, selector: &Selector) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for registration in self.registry.iter() {
            let name = registration.name();
            if !selector.matches(name) {
                continue;
            }
            let Some(entry) = self.config.entry(name) else {
                tracing::warn!(workload = name, "No configuration entry, skipping");
                summary.skipped.push(name.to_string());
                continue;
            };

            let result = self.run_one(registration, entry)?;
            summary.record(result);
        }

        self.reporter.summary(&summary)?;
        tracing::info!(
            ok = summary.ok,
            failed = summary.failed,
            skipped = summary.skipped.len(),
            total_secs = summary.total_secs,
            "Run finished"
        );
        Ok(summary)
    }

    /// Execute the full lifecycle for one workload.
    pub fn run_one(&mut self, registration: &Registration, entry: &ConfigEntry) -> Result<RunResult> {
        let name = registration.name();
        let iterations = entry.iterations()?;
        let warmup_iterations = entry.warmup_iterations()?;
        let expected = entry.expected_checksum()?;

        self.rng.reset();
        let mut workload = registration.build(entry)?;
        let reported = workload.name();
        if reported != name {
            return Err(HarnessError::NameMismatch {
                registered: name.to_string(),
                reported,
            });
        }

        // stdout stays line-aligned when construction fails
        self.reporter.begin(name)?;

        workload.prepare(&mut self.rng);
        tracing::debug!(workload = name, warmup_iterations, "Warmup");
        workload.warmup(&mut self.rng, warmup_iterations);

        self.rng.reset();
        tracing::debug!(workload = name, iterations, "Measuring");
        let start = Instant::now();
        for i in 0..iterations {
            workload.run(&mut self.rng, i);
        }
        let elapsed_secs = start.elapsed().as_secs_f64();

        let actual = workload.checksum();
        let verdict = if actual == expected {
            Verdict::Ok
        } else {
            tracing::warn!(workload = name, actual, expected, "Checksum mismatch");
            Verdict::Mismatch { actual, expected }
        };

        let result = RunResult {
            name: name.to_string(),
            elapsed_secs,
            verdict,
        };
        self.reporter.finish(&result)?;
        Ok(result)
    }

    pub fn reporter(&self) -> &Reporter<W> {
        &self.reporter
    }

    pub fn into_reporter(self) -> Reporter<W> {
        self.reporter
    }
}
