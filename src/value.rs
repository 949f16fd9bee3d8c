//! Configuration value tree
//!
//! `ConfigValue` is the recursive sum type every configuration document is
//! made of: null, primitives (bool/number/string), sequences, and
//! string-keyed mappings. Mappings use `BTreeMap` so key iteration is
//! deterministic; since reconciliation always produces the defaults' key
//! set, result iteration order always matches the defaults' iteration order.

use crate::error::ValueError;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use std::fmt;

/// The mapping variant's backing store.
pub type Mapping = BTreeMap<String, ConfigValue>;

/// A configuration value: null, primitive, sequence, or mapping.
///
/// Integer and fractional numbers share the `Number` variant, so a numeric
/// field accepts either form. `Clone` is a deep copy; no `ConfigValue` ever
/// shares structure with another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<ConfigValue>),
    Mapping(Mapping),
}

/// The structural kind of a `ConfigValue` node, irrespective of its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Mapping,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

impl ConfigValue {
    /// The structural kind of this node.
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::Null => ValueKind::Null,
            ConfigValue::Bool(_) => ValueKind::Bool,
            ConfigValue::Number(_) => ValueKind::Number,
            ConfigValue::String(_) => ValueKind::String,
            ConfigValue::Sequence(_) => ValueKind::Sequence,
            ConfigValue::Mapping(_) => ValueKind::Mapping,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ConfigValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a mapping entry. Returns `None` for non-mappings.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Parse a JSON document into a `ConfigValue`.
    pub fn from_json_str(input: &str) -> Result<ConfigValue, ValueError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Ok(value.into())
    }

    /// Parse a TOML document into a `ConfigValue`.
    pub fn from_toml_str(input: &str) -> Result<ConfigValue, ValueError> {
        let value: toml::Value = toml::from_str(input)?;
        Ok(value.into())
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(b),
            serde_json::Value::Number(n) => ConfigValue::Number(n),
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::Sequence(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(entries) => ConfigValue::Mapping(
                entries.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<ConfigValue> for serde_json::Value {
    fn from(value: ConfigValue) -> Self {
        match value {
            ConfigValue::Null => serde_json::Value::Null,
            ConfigValue::Bool(b) => serde_json::Value::Bool(b),
            ConfigValue::Number(n) => serde_json::Value::Number(n),
            ConfigValue::String(s) => serde_json::Value::String(s),
            ConfigValue::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            ConfigValue::Mapping(entries) => serde_json::Value::Object(
                entries.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<toml::Value> for ConfigValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => ConfigValue::String(s),
            toml::Value::Integer(i) => ConfigValue::Number(i.into()),
            toml::Value::Float(f) => match Number::from_f64(f) {
                Some(n) => ConfigValue::Number(n),
                // TOML floats can be NaN/inf, the JSON number model cannot
                None => ConfigValue::Null,
            },
            toml::Value::Boolean(b) => ConfigValue::Bool(b),
            toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
            toml::Value::Array(items) => {
                ConfigValue::Sequence(items.into_iter().map(Into::into).collect())
            }
            toml::Value::Table(entries) => ConfigValue::Mapping(
                entries.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}
