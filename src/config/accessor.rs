//! Host configuration accessor
//!
//! The loader never talks to a settings store directly. Whatever embeds it
//! provides a [`ConfigurationAccessor`], which answers keyed lookups with a
//! caller-supplied default.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Keyed lookup into a host configuration store
pub trait ConfigurationAccessor {
    /// Return the raw resolved value for a dotted key, if any layer sets it.
    fn inspect(&self, key: &str) -> Option<Value>;

    /// Look up `key` and deserialize it as `T`, falling back to `default`.
    ///
    /// Absent keys, JSON `null`, and values of the wrong shape all resolve to
    /// `default`.
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.inspect(key) {
            None | Some(Value::Null) => default,
            Some(value) => match serde_json::from_value::<T>(value) {
                Ok(typed) => typed,
                Err(e) => {
                    debug!("Ignoring setting '{}' with unexpected type: {}", key, e);
                    default
                }
            },
        }
    }
}

impl<A: ConfigurationAccessor> ConfigurationAccessor for &A {
    fn inspect(&self, key: &str) -> Option<Value> {
        (**self).inspect(key)
    }
}

/// Accessor backed by a flat map of dotted keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryConfiguration {
    values: HashMap<String, Value>,
}

impl InMemoryConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.set(key, value);
        self
    }

    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigurationAccessor for InMemoryConfiguration {
    fn inspect(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}
