//! Variable environment

use super::value::Value;

/// Mapping from variable name to current value.
///
/// Storage is a linear list; lookup and set are O(n), which is fine for the
/// handful of variables a script uses. Sequence-valued bindings hold a live
/// handle, so dropping the environment (or overwriting a binding) releases
/// each stored sequence reference exactly once.
pub struct Environment {
    vars: Vec<(String, Value)>,
}

impl Environment {
    /// Create a new, empty environment
    pub fn new() -> Self {
        Environment { vars: Vec::new() }
    }

    /// Value bound to `name`; uninitialized variables read as integer zero
    pub fn lookup(&self, name: &str) -> Value {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .unwrap_or(Value::Int(0))
    }

    /// Bind `name` to `value`, overwriting any prior binding
    pub fn set(&mut self, name: &str, value: Value) {
        match self.vars.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.vars.push((name.to_string(), value)),
        }
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
