//! `Var(...)` resolution.
//!
//! Lookups go to the `vars` mapping of the local scope first and then to the
//! [`PlatformDefaults`] record. The defaults are an explicit value handed to
//! the resolver, never process-wide state.

use super::value::{DepsMap, DepsValue};
use crate::core::{FlattenError, Result};
use std::collections::BTreeMap;

/// Fixed values for the gclient platform variables.
///
/// gclient injects `host_cpu`/`host_os` from the machine it runs on; the
/// flattened manifest is always produced as if on a linux x64 host so that it
/// does not depend on where it was generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDefaults {
    values: BTreeMap<String, String>,
}

impl PlatformDefaults {
    /// An empty table, for callers that want every variable declared in `vars`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Adds or replaces a default.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl Default for PlatformDefaults {
    fn default() -> Self {
        Self::empty().with("host_cpu", "x64").with("host_os", "linux")
    }
}

/// Resolves variable names for one evaluation step.
pub struct VariableResolver<'a> {
    local_scope: &'a DepsMap,
    defaults: &'a PlatformDefaults,
}

impl<'a> VariableResolver<'a> {
    pub fn new(local_scope: &'a DepsMap, defaults: &'a PlatformDefaults) -> Self {
        Self {
            local_scope,
            defaults,
        }
    }

    /// Returns the value bound to `name`.
    ///
    /// # Errors
    ///
    /// [`FlattenError::UnresolvedVariable`] when neither `vars` nor the
    /// defaults know the name.
    pub fn lookup(&self, name: &str) -> Result<DepsValue> {
        if let Some(value) =
            self.local_scope.get("vars").and_then(DepsValue::as_map).and_then(|vars| vars.get(name))
        {
            return Ok(value.clone());
        }

        if let Some(value) = self.defaults.get(name) {
            return Ok(DepsValue::from(value));
        }

        Err(FlattenError::UnresolvedVariable {
            name: name.to_string(),
        })
    }
}
