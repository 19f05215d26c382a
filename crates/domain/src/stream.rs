use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stream labels, kept sorted by key so that equal label sets always
/// produce the same canonical identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LabelSet(BTreeMap<String, String>);

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Deterministic identity: `{k1="v1",k2="v2"}` with keys in
    /// lexicographic order.
    pub fn canonical(&self) -> String {
        let pairs: Vec<String> = self
            .0
            .iter()
            .map(|(key, value)| format!("{key}=\"{value}\""))
            .collect();
        format!("{{{}}}", pairs.join(","))
    }
}

/// A labeled sequence of `(timestamp_nanos, line)` values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogStream {
    #[serde(rename = "stream")]
    pub labels: LabelSet,
    pub values: Vec<(String, String)>,
}

impl LogStream {
    pub fn new(labels: LabelSet) -> Self {
        Self {
            labels,
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, timestamp_nanos: String, line: String) {
        self.values.push((timestamp_nanos, line));
    }
}

/// Body of one push to the log store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PushRequest {
    pub streams: Vec<LogStream>,
}

impl PushRequest {
    pub fn entry_count(&self) -> usize {
        self.streams.iter().map(|s| s.values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.iter().all(|s| s.values.is_empty())
    }
}
