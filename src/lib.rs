//! xbench - cross-implementation micro-benchmark harness
//!
//! Runs small deterministic workloads under one protocol shared by every port
//! of the suite, and verifies each against a configured checksum.
//!
//! # Modules
//!
//! - [`prng`] - Linear congruential generator shared by all ports
//! - [`checksum`] - djb2 string/byte/float checksums
//! - [`suite_config`] - Workload parameters from the suite JSON
//! - [`config`] - Harness settings (YAML)
//! - [`workload`] - The `Workload` lifecycle trait
//! - [`registry`] - Name to factory mapping, in execution order
//! - [`runner`] - Warmup/measure/verify driver and selection filter
//! - [`report`] - Stdout protocol lines and results file
//! - [`workloads`] - Shipped reference workloads
//! - [`cli`] - Command-line parsing
//! - [`logging`] - tracing subscriber setup

pub mod checksum;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod prng;
pub mod registry;
pub mod report;
pub mod runner;
pub mod suite_config;
pub mod workload;
pub mod workloads;

// Convenient re-exports at crate root
pub use config::HarnessConfig;
pub use error::{HarnessError, Result};
pub use prng::Prng;
pub use registry::{Registration, Registry};
pub use report::Reporter;
pub use runner::{RunResult, RunSummary, Runner, Selector, Verdict};
pub use suite_config::{ConfigEntry, ConfigValue, SuiteConfig};
pub use workload::Workload;
pub use workloads::standard_registry;
