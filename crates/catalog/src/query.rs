//! Ordered query-string parameters.
//!
//! Order matters for display (applied-filter chips follow parameter order) and
//! repeated keys are meaningful (multi-select filters), so this keeps the raw
//! `(key, value)` sequence instead of a map.

use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (with or without a leading `?`).
    ///
    /// Values are percent-decoded and `+` decodes to a space. Valueless keys
    /// (`?index`) become `(key, "")`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Copy with the first exact `(key, value)` pair removed.
    ///
    /// Only one pair is removed so that duplicated multi-select entries
    /// disappear one chip at a time.
    pub fn without(&self, key: &str, value: &str) -> Self {
        let mut pairs = self.pairs.clone();
        if let Some(pos) = pairs.iter().position(|(k, v)| k == key && v == value) {
            pairs.remove(pos);
        }
        Self { pairs }
    }

    /// Copy with every pair for `key` removed.
    pub fn without_key(&self, key: &str) -> Self {
        Self {
            pairs: self.pairs.iter().filter(|(k, _)| k != key).cloned().collect(),
        }
    }

    /// Copy with `(key, value)` appended (multi-select add).
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut pairs = self.pairs.clone();
        pairs.push((key.into(), value.into()));
        Self { pairs }
    }

    /// Copy with `key` holding exactly `value` (sort, price bounds, cursor).
    pub fn set(&self, key: &str, value: impl Into<String>) -> Self {
        self.without_key(key).with(key, value)
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.pairs {
            serializer.append_pair(k, v);
        }
        serializer.finish()
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
