use std::collections::BTreeMap;

/// Untyped request parameters, keyed by name.
///
/// Later duplicates replace earlier ones. Values are kept verbatim; interpretation belongs to the
/// resolver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawParams {
    values: BTreeMap<String, String>,
}

impl RawParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `(key, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut out = Self::new();
        for (k, v) in pairs {
            out.insert(k, v);
        }
        out
    }

    /// Parse a URL query string such as `to=2026-12-31&tz=Europe%2FBerlin`.
    ///
    /// A leading `?` is ignored, `+` decodes to a space, and undecodable segments are kept raw.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim().strip_prefix('?').unwrap_or(query.trim());
        let mut out = Self::new();
        for segment in query.split('&') {
            if segment.is_empty() {
                continue;
            }
            let (k, v) = segment.split_once('=').unwrap_or((segment, ""));
            let k = decode_component(k);
            if k.is_empty() {
                continue;
            }
            out.insert(k, decode_component(v));
        }
        out
    }

    /// Parse a single `key=value` argument.
    pub fn parse_pair(arg: &str) -> Option<(String, String)> {
        let (k, v) = arg.split_once('=')?;
        let k = k.trim();
        if k.is_empty() {
            return None;
        }
        Some((k.to_owned(), v.to_owned()))
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a parameter. Blank values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Merge `other` on top of `self`.
    pub fn extend(&mut self, other: RawParams) {
        self.values.extend(other.values);
    }

    /// Number of stored parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when no parameter was supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(s) => s.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/params.rs"]
mod tests;
