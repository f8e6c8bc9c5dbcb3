use std::fs;
use std::path::Path;

use config_tree_core::ConfigValue;
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::backend::ObjectKind;
use crate::error::ConfigError;
use crate::pass::ConfigPass;
use crate::types::{DefaultTypeRegistry, TypeRegistry, ADMIN_ROLES_TYPE, EMBEDDED_LIST_TYPE};

/// Object-config paths whose field declarations may carry short form-type
/// names. The set is fixed; nothing else in an object config is touched.
pub const FORM_FIELD_PATHS: [&[&str]; 4] = [
    &["form", "fields"],
    &["edit", "fields"],
    &["new", "fields"],
    &["list", "form_filters"],
];

/// Short aliases shipped with the extension.
fn builtin_short_types() -> IndexMap<String, String> {
    IndexMap::from([
        ("embedded_list".to_string(), EMBEDDED_LIST_TYPE.to_string()),
        ("admin_roles".to_string(), ADMIN_ROLES_TYPE.to_string()),
    ])
}

/// Rewrites short form-type names into fully-qualified identifiers.
///
/// Resolution order per field: the merged alias table (custom aliases
/// override built-ins), then the legacy short-name table gated on the
/// target actually existing in the type registry. Anything else is left
/// unchanged for downstream form building to accept or reject.
pub struct ShortTypeResolver<R = DefaultTypeRegistry> {
    aliases: IndexMap<String, String>,
    registry: R,
}

impl ShortTypeResolver {
    pub fn new() -> Self {
        Self::with_custom_types(IndexMap::new())
    }

    pub fn with_custom_types(custom: IndexMap<String, String>) -> Self {
        Self::with_registry(custom, DefaultTypeRegistry::new())
    }
}

impl Default for ShortTypeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TypeRegistry> ShortTypeResolver<R> {
    pub fn with_registry(custom: IndexMap<String, String>, registry: R) -> Self {
        let mut aliases = builtin_short_types();
        aliases.extend(custom);
        Self { aliases, registry }
    }

    /// Resolve short type names across all objects. Never fails;
    /// idempotent on its own output.
    pub fn resolve(&self, mut config: ConfigValue) -> ConfigValue {
        for kind in ObjectKind::ALL {
            let Some(section) = config
                .get_path_mut(&[kind.section_key()])
                .and_then(ConfigValue::as_mapping_mut)
            else {
                continue;
            };
            for object_config in section.values_mut() {
                self.resolve_object(object_config);
            }
        }
        config
    }

    fn resolve_object(&self, object_config: &mut ConfigValue) {
        for path in FORM_FIELD_PATHS {
            let Some(fields) = object_config
                .get_path_mut(path)
                .and_then(ConfigValue::as_mapping_mut)
            else {
                continue;
            };
            for field in fields.values_mut() {
                self.resolve_field(field);
            }
        }
    }

    fn resolve_field(&self, field: &mut ConfigValue) {
        let Some(map) = field.as_mapping_mut() else {
            return;
        };
        let Some(short) = map.get("type").and_then(ConfigValue::as_str) else {
            return;
        };

        if let Some(target) = self.aliases.get(short) {
            map.insert("type".to_string(), ConfigValue::from(target.clone()));
        } else if let Some(candidate) = self.registry.resolve_legacy(short) {
            if self.registry.type_exists(&candidate) {
                map.insert("type".to_string(), ConfigValue::from(candidate));
            }
        }
    }
}

impl<R: TypeRegistry> ConfigPass for ShortTypeResolver<R> {
    fn name(&self) -> &'static str {
        "short-form-types"
    }

    fn process(&self, config: ConfigValue) -> Result<ConfigValue, ConfigError> {
        Ok(self.resolve(config))
    }
}

#[derive(Debug, Deserialize)]
struct CustomTypeEntry {
    short: String,
    target: String,
}

#[derive(Debug, Deserialize)]
struct CustomTypesFile {
    #[serde(rename = "type", default)]
    types: Vec<CustomTypeEntry>,
}

/// Errors returned when loading a custom alias file.
#[derive(Debug, Error)]
pub enum CustomTypesLoadError {
    #[error("failed to read custom types file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse custom types file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load custom short-type aliases from a TOML file of `[[type]]` entries.
pub fn load_custom_types(path: &Path) -> Result<IndexMap<String, String>, CustomTypesLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| CustomTypesLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let parsed: CustomTypesFile =
        toml::from_str(&raw).map_err(|source| CustomTypesLoadError::Parse {
            path: path.display().to_string(),
            source,
        })?;

    Ok(parsed
        .types
        .into_iter()
        .map(|entry| (entry.short, entry.target))
        .collect())
}
