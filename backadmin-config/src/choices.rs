use std::collections::HashMap;
use std::fs;
use std::path::Path;

use config_tree_core::{ConfigMapping, ConfigValue};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised by a choice-source invocation.
#[derive(Debug, Error)]
pub enum ChoiceSourceError {
    #[error("no static choice callback \"{method}\" is registered for class \"{class}\"")]
    UnknownCallback { class: String, method: String },
    /// Application-defined failure inside the callback itself.
    #[error("{0}")]
    Failed(String),
}

/// Invocation point for application-supplied static choice callbacks.
///
/// Invoked synchronously, once per filter that needs a list; the result
/// is trusted as-is, not cached and not retried.
pub trait ChoiceSource {
    fn invoke(
        &self,
        class: &str,
        method: &str,
        args: &[ConfigValue],
    ) -> Result<ConfigValue, ChoiceSourceError>;
}

/// Choice source that knows no callbacks. Every invocation fails, which
/// surfaces as a configuration error on the filter that asked for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoChoiceSource;

impl ChoiceSource for NoChoiceSource {
    fn invoke(
        &self,
        class: &str,
        method: &str,
        _args: &[ConfigValue],
    ) -> Result<ConfigValue, ChoiceSourceError> {
        Err(ChoiceSourceError::UnknownCallback {
            class: class.to_string(),
            method: method.to_string(),
        })
    }
}

/// File-backed choice lists keyed by class and callback name.
///
/// Entries hold precomputed lists, so call arguments are accepted but not
/// interpolated.
#[derive(Debug, Clone, Default)]
pub struct StaticChoiceTable {
    entries: HashMap<(String, String), ConfigValue>,
}

impl StaticChoiceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the list returned by `class::method`.
    pub fn insert(&mut self, class: &str, method: &str, choices: ConfigValue) {
        self.entries
            .insert((class.to_string(), method.to_string()), choices);
    }
}

impl ChoiceSource for StaticChoiceTable {
    fn invoke(
        &self,
        class: &str,
        method: &str,
        _args: &[ConfigValue],
    ) -> Result<ConfigValue, ChoiceSourceError> {
        self.entries
            .get(&(class.to_string(), method.to_string()))
            .cloned()
            .ok_or_else(|| ChoiceSourceError::UnknownCallback {
                class: class.to_string(),
                method: method.to_string(),
            })
    }
}

#[derive(Debug, Deserialize)]
struct ChoiceEntry {
    class: String,
    method: String,
    values: toml::Value,
}

#[derive(Debug, Deserialize)]
struct ChoiceFile {
    #[serde(rename = "choice", default)]
    choices: Vec<ChoiceEntry>,
}

/// Errors returned when loading a choice table file.
#[derive(Debug, Error)]
pub enum ChoiceTableLoadError {
    #[error("failed to read choice table {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse choice table {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("unsupported value in choice table {path}: {detail}")]
    Unsupported { path: String, detail: String },
}

/// Load a choice table from a TOML file of `[[choice]]` entries.
pub fn load_choice_table(path: &Path) -> Result<StaticChoiceTable, ChoiceTableLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ChoiceTableLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let parsed: ChoiceFile = toml::from_str(&raw).map_err(|source| ChoiceTableLoadError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    let mut table = StaticChoiceTable::new();
    for entry in parsed.choices {
        let values = convert_toml(entry.values).map_err(|detail| {
            ChoiceTableLoadError::Unsupported {
                path: path.display().to_string(),
                detail: format!("{}::{}: {detail}", entry.class, entry.method),
            }
        })?;
        table.insert(&entry.class, &entry.method, values);
    }
    Ok(table)
}

fn convert_toml(value: toml::Value) -> Result<ConfigValue, String> {
    Ok(match value {
        toml::Value::String(s) => ConfigValue::String(s),
        toml::Value::Integer(i) => ConfigValue::Int(i),
        toml::Value::Float(f) => ConfigValue::Float(f),
        toml::Value::Boolean(b) => ConfigValue::Bool(b),
        toml::Value::Datetime(dt) => return Err(format!("datetime `{dt}` has no config form")),
        toml::Value::Array(items) => ConfigValue::Sequence(
            items
                .into_iter()
                .map(convert_toml)
                .collect::<Result<_, _>>()?,
        ),
        toml::Value::Table(table) => {
            let mut out = ConfigMapping::with_capacity(table.len());
            for (key, value) in table {
                out.insert(key, convert_toml(value)?);
            }
            ConfigValue::Mapping(out)
        }
    })
}
