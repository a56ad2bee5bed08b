//! Workload registry.
//!
//! Workloads are discovered through explicit registration (name -> factory),
//! never reflection. Registration order is execution order, and a name may be
//! registered only once.

use rustc_hash::FxHashSet;

use crate::error::{HarnessError, Result};
use crate::suite_config::ConfigEntry;
use crate::workload::Workload;

/// Builds a fresh workload instance from its configuration entry.
pub type Factory = Box<dyn Fn(&ConfigEntry) -> Result<Box<dyn Workload>> + Send + Sync>;

pub struct Registration {
    name: &'static str,
    factory: Factory,
}

impl Registration {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn build(&self, entry: &ConfigEntry) -> Result<Box<dyn Workload>> {
        (self.factory)(entry)
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration").field("name", &self.name).finish()
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    registrations: Vec<Registration>,
    names: FxHashSet<&'static str>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a workload. Registering the same name twice is fatal.
    pub fn register<F>(&mut self, name: &'static str, factory: F) -> Result<&mut Self>
    where
        F: Fn(&ConfigEntry) -> Result<Box<dyn Workload>> + Send + Sync + 'static,
    {
        if !self.names.insert(name) {
            return Err(HarnessError::DuplicateWorkload(name.to_string()));
        }
        self.registrations.push(Registration {
            name,
            factory: Box::new(factory),
        });
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.registrations.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.registrations.iter().map(|r| r.name).collect()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::Prng;
    use serde_json::Map;

    struct Fixed(u32);

    impl Workload for Fixed {
        fn run(&mut self, _rng: &mut Prng, _iteration: u64) {}

        fn checksum(&self) -> u32 {
            self.0
        }
    }

    fn fixed(value: u32) -> impl Fn(&ConfigEntry) -> Result<Box<dyn Workload>> + Send + Sync {
        move |_: &ConfigEntry| -> Result<Box<dyn Workload>> { Ok(Box::new(Fixed(value))) }
    }

    #[test]
    fn test_registration_order_is_preserved() {
        let mut registry = Registry::new();
        registry
            .register("Sort", fixed(1))
            .unwrap()
            .register("Primes", fixed(2))
            .unwrap()
            .register("Primes::Big", fixed(3))
            .unwrap();
        assert_eq!(registry.names(), vec!["Sort", "Primes", "Primes::Big"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_duplicate_registration_is_fatal() {
        let mut registry = Registry::new();
        registry.register("Primes", fixed(1)).unwrap();
        let err = registry.register("Primes", fixed(2)).unwrap_err();
        assert!(matches!(err, HarnessError::DuplicateWorkload(ref n) if n == "Primes"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_build_uses_factory() {
        let mut registry = Registry::new();
        registry.register("Fixed", fixed(42)).unwrap();
        let entry = ConfigEntry::new("Fixed", Map::new());
        let workload = registry.get("Fixed").unwrap().build(&entry).unwrap();
        assert_eq!(workload.checksum(), 42);
        assert!(registry.get("Missing").is_none());
    }
}
