use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Solver options in the order they were set.
///
/// A value of `None` (or a blank string) is a bare flag; anything else is a
/// flag/value pair when the command line is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverOptions {
    entries: Vec<(String, Option<String>)>,
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing an existing value in place
    pub fn set(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn set_flag(&mut self, name: impl Into<String>) {
        self.set(name, None);
    }

    /// Apply whitespace separated `name=value` assignments.
    ///
    /// A token without `=` sets a bare flag.
    pub fn parse_assignments(&mut self, assignments: &str) {
        for token in assignments.split_whitespace() {
            match token.split_once('=') {
                Some((name, value)) => self.set(name, Some(value.to_string())),
                None => self.set_flag(token),
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for SolverOptions {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut options = SolverOptions::new();
        for (k, v) in iter {
            options.set(k, v);
        }
        options
    }
}

impl Serialize for SolverOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// Scalars only: strings, numbers and booleans are kept as their text, null is a flag.
#[derive(Deserialize)]
#[serde(untagged)]
enum OptionValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<OptionValue> for String {
    fn from(value: OptionValue) -> Self {
        match value {
            OptionValue::Text(s) => s,
            OptionValue::Integer(i) => i.to_string(),
            OptionValue::Float(f) => f.to_string(),
            OptionValue::Bool(b) => b.to_string(),
        }
    }
}

struct SolverOptionsVisitor;

impl<'de> Visitor<'de> for SolverOptionsVisitor {
    type Value = SolverOptions;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of option names to scalar values or null")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut options = SolverOptions::new();
        while let Some((name, value)) = access.next_entry::<String, Option<OptionValue>>()? {
            if name.is_empty() {
                return Err(de::Error::custom("option names must not be empty"));
            }
            options.set(name, value.map(String::from));
        }
        Ok(options)
    }
}

impl<'de> Deserialize<'de> for SolverOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SolverOptionsVisitor)
    }
}
