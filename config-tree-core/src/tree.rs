use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered mapping used for all object-like config nodes.
///
/// Declaration order is significant for admin configs (field order drives
/// rendering order), so mappings preserve insertion order.
pub type ConfigMapping = IndexMap<String, ConfigValue>;

/// A generic configuration tree value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Explicit null (`~` in YAML).
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Ordered list of values.
    Sequence(Vec<ConfigValue>),
    /// Ordered string-keyed mapping.
    Mapping(ConfigMapping),
}

impl ConfigValue {
    /// Create an empty mapping value.
    pub fn mapping() -> Self {
        Self::Mapping(ConfigMapping::new())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&ConfigMapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut ConfigMapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// Return the value stored under `key` if this is a mapping.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Walk a nested mapping path and return the terminal value if found.
    ///
    /// Every intermediate segment must resolve to a mapping; the walk
    /// stops with `None` otherwise.
    pub fn get_path(&self, path: &[&str]) -> Option<&ConfigValue> {
        let mut current = self;
        for segment in path {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Mutable variant of [`get_path`](Self::get_path).
    pub fn get_path_mut(&mut self, path: &[&str]) -> Option<&mut ConfigValue> {
        let mut current = self;
        for segment in path {
            current = current.as_mapping_mut()?.get_mut(*segment)?;
        }
        Some(current)
    }

    /// Render a scalar value as a mapping key.
    ///
    /// Sequences, mappings, and nulls have no key form.
    pub fn scalar_key(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Null | Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }

    /// Human-readable name of the value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
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

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        Self::Sequence(value)
    }
}

impl From<ConfigMapping> for ConfigValue {
    fn from(value: ConfigMapping) -> Self {
        Self::Mapping(value)
    }
}

impl Display for ConfigValue {
    /// Compact single-line rendering, used in error messages and inspection.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "~"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Sequence(seq) => {
                write!(f, "[")?;
                for (i, item) in seq.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Mapping(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
