//! Environment variable types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single `key = value` entry of an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// The variable name, referenced as `{{key}}`.
    pub key: String,
    /// The substituted value.
    pub value: String,
    /// Whether this variable is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl Variable {
    /// Creates a new enabled variable.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled variable.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: false,
        }
    }
}

/// A named, ordered set of variables used for `{{key}}` interpolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique identifier
    pub id: Uuid,
    /// Environment name (e.g., "Development", "Production")
    pub name: String,
    /// Variables in insertion order.
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl Environment {
    /// Creates a new environment with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            variables: Vec::new(),
        }
    }

    /// Sets a variable, updating the first entry with that key or appending.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.variables.iter_mut().find(|v| v.key == key) {
            existing.value = value;
            existing.enabled = true;
        } else {
            self.variables.push(Variable::new(key, value));
        }
    }

    /// Removes every variable with the given key. Returns true if any was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.variables.len();
        self.variables.retain(|v| v.key != key);
        self.variables.len() != before
    }

    /// Resolves a key to the value of the first enabled variable with that key.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|v| v.enabled && v.key == key)
            .map(|v| v.value.as_str())
    }

    /// Returns the number of variables in this environment.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new("New Environment")
    }
}
