//! Dynamically typed configuration values.
//!
//! A loaded document is a tree of [`ConfigValue`]s. Coercions never fail:
//! each `to_*` method returns `None` when the value cannot be viewed as the
//! requested type, and callers fall back to the type's zero value.

use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::errors::ConfigError;

/// Mapping from key to value; one level of a configuration tree.
pub type ConfigNode = BTreeMap<String, ConfigValue>;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// Explicit `null` / `~` / empty value.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar that fits in an `i64`.
    Int(i64),
    /// Floating point scalar, and integers beyond the `i64` range.
    Float(f64),
    /// String scalar.
    String(String),
    /// Ordered sequence.
    Sequence(Vec<ConfigValue>),
    /// Nested mapping.
    Mapping(ConfigNode),
}

impl ConfigValue {
    /// Short name of the variant, used in diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Returns the nested mapping if this value is one.
    pub const fn as_mapping(&self) -> Option<&ConfigNode> {
        match self {
            Self::Mapping(node) => Some(node),
            _ => None,
        }
    }

    /// String form of a scalar. `None` for null, sequences and mappings.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Null | Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }

    /// Plain string view used by string getters: strings as-is, ints in
    /// decimal, floats with six fractional digits. Bools, null and
    /// collections render empty.
    pub fn to_plain_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => format!("{f:.6}"),
            Self::Bool(_) | Self::Null | Self::Sequence(_) | Self::Mapping(_) => String::new(),
        }
    }

    /// Integer view: native ints directly, anything else through its
    /// string form and a base-10 parse.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            other => other.to_text()?.parse().ok(),
        }
    }

    /// Float view: native floats directly, anything else through its
    /// string form.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            other => other.to_text()?.parse().ok(),
        }
    }

    /// Boolean view. Nonzero numbers and the exact string `"true"` are
    /// true; everything else is false.
    pub fn to_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::String(s) => s == "true",
            Self::Null | Self::Sequence(_) | Self::Mapping(_) => false,
        }
    }

    /// Binds the value to `T` by rendering it back to YAML and parsing the
    /// text as `T`.
    ///
    /// Going through text rather than `serde_yaml::from_value` keeps plain
    /// scalars usable as strings, so `[1, 2]` binds to `Vec<String>`.
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T, serde_yaml::Error> {
        let text = serde_yaml::to_string(self)?;
        serde_yaml::from_str(&text)
    }

    /// Lenient form of [`ConfigValue::bind`].
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        self.bind().ok()
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Sequence(_) | Self::Mapping(_) => {
                let text = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(text.trim_end())
            }
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(node) => {
                let mut map = serializer.serialize_map(Some(node.len()))?;
                for (key, value) in node {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl TryFrom<serde_yaml::Value> for ConfigValue {
    type Error = ConfigError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value;

        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or_default()), Self::Int),
            Value::String(s) => Self::String(s),
            Value::Sequence(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(mapping) => {
                let mut node = ConfigNode::new();
                for (key, value) in mapping {
                    node.insert(mapping_key(key)?, Self::try_from(value)?);
                }
                Self::Mapping(node)
            }
            Value::Tagged(tagged) => Self::try_from(tagged.value)?,
        })
    }
}

/// Scalar mapping keys become their string form; `1: x` is reachable as `"1"`.
fn mapping_key(key: serde_yaml::Value) -> Result<String, ConfigError> {
    match ConfigValue::try_from(key)? {
        ConfigValue::Null => Ok("null".to_string()),
        scalar => scalar
            .to_text()
            .ok_or_else(|| ConfigError::UnsupportedKey(scalar.kind().to_string())),
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<ConfigNode> for ConfigValue {
    fn from(value: ConfigNode) -> Self {
        Self::Mapping(value)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(value: Vec<T>) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}
