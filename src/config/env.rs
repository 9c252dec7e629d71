//! Ambient environment access for reference resolution.

use std::collections::BTreeMap;

/// Lookup of process-ambient environment variables, consulted as a fallback
/// tier when a reference is not satisfied by the configuration itself.
///
/// Abstracted behind a trait so tests can supply a fixed environment without
/// mutating process state.
pub trait Ambient {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the invoking process's real environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Ambient for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A fixed, map-backed ambient environment for hermetic loads.
#[derive(Debug, Clone, Default)]
pub struct FixedAmbient {
    vars: BTreeMap<String, String>,
}

impl FixedAmbient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, replacing any previous value for the same name.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl Ambient for FixedAmbient {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
