//! Execution-environment variable source.
//!
//! Library code never touches `std::env` directly; the environment is an
//! injected collaborator so tests can substitute a fixed map without
//! process-global state.

use std::collections::HashMap;

/// Read-only key/value view of the execution environment.
pub trait Environment: Send + Sync {
    /// Look up a variable. `None` covers both unset and empty values,
    /// matching how container runtimes signal "not configured".
    fn var(&self, key: &str) -> Option<String>;
}

/// [`Environment`] backed by the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|value| !value.is_empty())
    }
}

/// [`Environment`] backed by a fixed map. Used by tests and by hosts that
/// scope configuration per tenant rather than per process.
#[derive(Debug, Default, Clone)]
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
}

impl StaticEnvironment {
    /// Empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl Environment for StaticEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
    }
}
