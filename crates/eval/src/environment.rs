//! Environmental parameters passed alongside a simulation.
//!
//! Accepted and carried through, but never consulted when matching
//! rules. Gating reactions on temperature or humidity is not
//! implemented.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named numeric parameters such as `temperature` or `humidity`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment(BTreeMap<String, f64>);

impl Environment {
    pub fn new() -> Self {
        Environment(BTreeMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Environment {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Environment(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
