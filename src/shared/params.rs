//! Ordered request parameters with cleaning and validation.
//!
//! Binance signs the exact byte sequence of the encoded query, so parameter
//! order is part of the wire contract. `Params` preserves insertion order and
//! supports repeated keys; optional insertion helpers drop absent values so no
//! key is ever sent as null.

use crate::error::SdkError;

/// An insertion-ordered sequence of `key=value` request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a parameter. Repeated keys are kept; each occurrence is emitted
    /// as its own `key=value` pair.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Append a parameter only when the value is present.
    pub fn insert_opt<T: ToString>(&mut self, key: impl Into<String>, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.insert(key, v);
        }
        self
    }

    /// First value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Remove every occurrence of `key`.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.0.retain(|(k, _)| k != key);
        self
    }

    /// Replace every occurrence of `key` with a single pair at the original
    /// first position, or append when absent.
    pub fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        match self.0.iter().position(|(k, _)| k == key) {
            Some(pos) => {
                self.0.retain(|(k, _)| k != key);
                self.0.insert(pos, (key.to_string(), value.to_string()));
            }
            None => {
                self.insert(key, value);
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Extend with another parameter set, preserving its order.
    pub fn extend(&mut self, other: &Params) -> &mut Self {
        self.0.extend(other.0.iter().cloned());
        self
    }

    /// Validate that every required field is present, reporting all missing
    /// names together rather than failing on the first.
    pub fn require(&self, fields: &[&str]) -> Result<(), SdkError> {
        let missing: Vec<&str> = fields
            .iter()
            .filter(|f| !self.contains_key(f))
            .copied()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SdkError::Validation(format!(
                "missing required parameter(s): {}",
                missing.join(", ")
            )))
        }
    }

    /// Canonical query encoding: percent-encoded `key=value` pairs joined by
    /// `&`, in insertion order. This exact byte sequence is what gets signed.
    pub fn to_query(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}
