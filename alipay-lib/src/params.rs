//! Request parameter mapping and canonical sign-string construction.
//!
//! [`Params`] keeps keys unique and remembers insertion order, the way the
//! gateway parameters are assembled per request. Signing never uses that
//! order: [`Params::canonicalize`] sorts by key and [`Params::sign_string`]
//! joins the sorted `key=value` pairs with `&`. That string is the exact
//! input to RSA signing and verification.
//!
//! ```rust
//! use alipay_lib::Params;
//!
//! let mut params = Params::new();
//! params.insert("method", "alipay.trade.page.pay");
//! params.insert("app_id", "2014072300007148");
//! assert_eq!(
//!     params.sign_string(),
//!     "app_id=2014072300007148&method=alipay.trade.page.pay"
//! );
//! ```

use crate::{AlipayError, Result};
use serde_json::Value;

/// An insertion-ordered mapping of unique parameter names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, returning the previous value.
    ///
    /// Replacing an existing key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder-style [`Params::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Get a parameter only if it holds a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion (or, once canonicalized, key) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Copy every entry of `other` into `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: Params) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// A copy without the named keys. `self` is left untouched.
    pub fn without(&self, keys: &[&str]) -> Params {
        Params {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| !keys.contains(&k.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// A copy with keys sorted ascending by byte order.
    pub fn canonicalize(&self) -> Params {
        let mut entries = self.entries.clone();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        Params { entries }
    }

    /// Returns true if keys are already in ascending order.
    pub fn is_canonical(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0].0 <= pair[1].0)
    }

    /// The canonical sign-string: sorted `key=value` pairs joined with `&`.
    ///
    /// An empty mapping yields an empty string.
    pub fn sign_string(&self) -> String {
        self.canonicalize()
            .entries
            .iter()
            .map(|(key, value)| format!("{}={}", key, render_value(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse an `application/x-www-form-urlencoded` body.
    ///
    /// `+` decodes to a space. A repeated key keeps its last value.
    pub fn from_form_encoded(body: &str) -> Result<Params> {
        let mut params = Params::new();
        for pair in body.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(raw_key, raw_key)?;
            let value = decode_component(raw_value, &key)?;
            params.insert(key, value);
        }
        Ok(params)
    }
}

fn decode_component(raw: &str, field: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| AlipayError::invalid_encoding(field, e))
}

/// Render a value the way it appears in the sign-string and query string.
///
/// Scalars use their natural text; objects and arrays are compact JSON.
/// Object fields keep their insertion order.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
