//! # Query Canonicalizer
//! Deterministic rendering of request parameters. The same rendering is used for the consent url,
//! the token request body, the resource query string and, unencoded, the signature base string.

use std::collections::BTreeMap;

/// # CanonicalParams
/// Parameters ordered by key, compared byte by byte.
///
/// Inserting an existing key replaces its value, so whatever is inserted last wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalParams(BTreeMap<String, String>);

impl CanonicalParams {
    /// Creates an empty set of parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, returning the value it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Inserts a parameter whose value may be missing. A missing value renders as empty.
    pub fn insert_optional(&mut self, key: impl Into<String>, value: Option<&str>) {
        self.0.insert(key.into(), value.unwrap_or_default().to_string());
    }

    /// Gets the value of a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterates over the parameters in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders `k1=v1&k2=v2...`.
    ///
    /// With `encode` the values are percent encoded the way `encodeURIComponent` does it, keys
    /// are written as is. Without it nothing is escaped, which is what the signature base string
    /// needs.
    pub fn to_query_string(&self, encode: bool) -> String {
        self.0
            .iter()
            .map(|(key, value)| {
                if encode {
                    format!("{key}={}", encode_component(value))
                } else {
                    format!("{key}={value}")
                }
            })
            .collect::<Vec<String>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for CanonicalParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for CanonicalParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// Canonical query string of `params`. See [CanonicalParams::to_query_string]
pub fn canonical_query_string<I, K, V>(params: I, encode: bool) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    params
        .into_iter()
        .collect::<CanonicalParams>()
        .to_query_string(encode)
}

/// Percent encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
pub(crate) fn encode_component(value: &str) -> String {
    // urlencoding also escapes the marks encodeURIComponent leaves alone
    urlencoding::encode(value)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}
