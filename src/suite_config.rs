//! Suite configuration store.
//!
//! The suite configuration is a JSON object mapping workload name to an object
//! of parameters:
//!
//! ```json
//! "Etc::Primes": { "checksum": 139698008, "limit": 3000000, "prefix": 3233, "iterations": 40 }
//! ```
//!
//! `iterations`, `checksum` and `warmup_iterations` are reserved; every other
//! field belongs to the workload. The store is loaded once, never mutated, and
//! lent read-only to the runner and the workload factories.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::error::{HarnessError, Result};

pub const FIELD_ITERATIONS: &str = "iterations";
pub const FIELD_CHECKSUM: &str = "checksum";
pub const FIELD_WARMUP_ITERATIONS: &str = "warmup_iterations";

/// A typed view of one configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigValue<'a> {
    Int(i64),
    Str(&'a str),
}

/// Parameters of a single workload.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    name: String,
    fields: Map<String, Value>,
}

impl ConfigEntry {
    pub fn new(name: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Workload name this entry is keyed by
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Look up a field as an integer or a string.
    pub fn get(&self, field: &str) -> Result<ConfigValue<'_>> {
        let value = self
            .fields
            .get(field)
            .ok_or_else(|| HarnessError::missing_field(&self.name, field))?;
        match value {
            Value::String(s) => Ok(ConfigValue::Str(s)),
            Value::Number(n) => n
                .as_i64()
                .map(ConfigValue::Int)
                .ok_or_else(|| HarnessError::invalid_field(&self.name, field, "64-bit integer")),
            _ => Err(HarnessError::invalid_field(
                &self.name,
                field,
                "integer or string",
            )),
        }
    }

    pub fn int(&self, field: &str) -> Result<i64> {
        match self.get(field)? {
            ConfigValue::Int(v) => Ok(v),
            ConfigValue::Str(_) => Err(HarnessError::invalid_field(&self.name, field, "integer")),
        }
    }

    /// Non-negative integer usable as a length or count.
    pub fn size(&self, field: &str) -> Result<usize> {
        let v = self.int(field)?;
        usize::try_from(v)
            .map_err(|_| HarnessError::invalid_field(&self.name, field, "non-negative integer"))
    }

    pub fn string(&self, field: &str) -> Result<&str> {
        match self.get(field)? {
            ConfigValue::Str(s) => Ok(s),
            ConfigValue::Int(_) => Err(HarnessError::invalid_field(&self.name, field, "string")),
        }
    }

    fn optional_count(&self, field: &str) -> Result<Option<u64>> {
        if !self.contains(field) {
            return Ok(None);
        }
        let v = self.int(field)?;
        u64::try_from(v)
            .map(Some)
            .map_err(|_| HarnessError::invalid_field(&self.name, field, "non-negative integer"))
    }

    /// Number of measured `run` calls; 1 when not configured.
    pub fn iterations(&self) -> Result<u64> {
        Ok(self.optional_count(FIELD_ITERATIONS)?.unwrap_or(1))
    }

    /// Expected 32-bit checksum; 0 when not configured.
    ///
    /// The value must be an exact JSON integer within `u32` range.
    pub fn expected_checksum(&self) -> Result<u32> {
        let Some(value) = self.fields.get(FIELD_CHECKSUM) else {
            return Ok(0);
        };
        value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| HarnessError::invalid_field(&self.name, FIELD_CHECKSUM, "unsigned 32-bit integer"))
    }

    /// Explicit `warmup_iterations`, otherwise `max(floor(iterations * 0.2), 1)`.
    pub fn warmup_iterations(&self) -> Result<u64> {
        if let Some(explicit) = self.optional_count(FIELD_WARMUP_ITERATIONS)? {
            return Ok(explicit);
        }
        let iterations = self.iterations()?;
        Ok(std::cmp::max((iterations as f64 * 0.2) as u64, 1))
    }
}

/// All configuration entries, keyed by workload name.
#[derive(Debug, Clone, Default)]
pub struct SuiteConfig {
    entries: FxHashMap<String, ConfigEntry>,
}

impl SuiteConfig {
    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| HarnessError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            entries = config.len(),
            "Suite configuration loaded"
        );
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: FxHashMap<String, Map<String, Value>> = serde_json::from_str(content)?;
        let entries = raw
            .into_iter()
            .map(|(name, fields)| (name.clone(), ConfigEntry::new(name, fields)))
            .collect();
        Ok(Self { entries })
    }

    pub fn entry(&self, workload: &str) -> Option<&ConfigEntry> {
        self.entries.get(workload)
    }

    fn require(&self, workload: &str) -> Result<&ConfigEntry> {
        self.entry(workload)
            .ok_or_else(|| HarnessError::MissingEntry(workload.to_string()))
    }

    pub fn get(&self, workload: &str, field: &str) -> Result<ConfigValue<'_>> {
        self.require(workload)?.get(field)
    }

    pub fn iterations(&self, workload: &str) -> Result<u64> {
        self.require(workload)?.iterations()
    }

    pub fn expected_checksum(&self, workload: &str) -> Result<u32> {
        self.require(workload)?.expected_checksum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
