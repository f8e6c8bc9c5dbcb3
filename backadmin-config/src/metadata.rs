use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Cardinality of an association mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    ToOne,
    ToMany,
}

/// ORM metadata for one mapped scalar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Primitive storage type tag (`boolean`, `string`, `integer`, ...).
    /// The tag set is open: custom mapping types pass through unchanged.
    pub field_type: String,
}

/// ORM metadata for one association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationMapping {
    pub cardinality: Cardinality,
    /// Fully-qualified class name of the association target.
    pub target_class: String,
}

/// Read-only lookup into the ORM's persistence metadata.
///
/// A property is either a mapped field, an association, or unknown; the
/// guesser treats unknown properties as unguessable rather than invalid.
pub trait MetadataRegistry {
    fn field_mapping(&self, class: &str, property: &str) -> Option<FieldMapping>;
    fn association_mapping(&self, class: &str, property: &str) -> Option<AssociationMapping>;
}

/// Registry with no knowledge of any class; every property is unguessable.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyMetadata;

impl MetadataRegistry for EmptyMetadata {
    fn field_mapping(&self, _class: &str, _property: &str) -> Option<FieldMapping> {
        None
    }

    fn association_mapping(&self, _class: &str, _property: &str) -> Option<AssociationMapping> {
        None
    }
}

#[derive(Debug, Clone, Default)]
struct ClassMetadata {
    fields: HashMap<String, FieldMapping>,
    associations: HashMap<String, AssociationMapping>,
}

/// File-backed metadata registry, for running the passes without a live ORM.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    classes: HashMap<String, ClassMetadata>,
}

impl StaticMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_field(&mut self, class: &str, property: &str, field_type: &str) {
        self.classes.entry(class.to_string()).or_default().fields.insert(
            property.to_string(),
            FieldMapping {
                field_type: field_type.to_string(),
            },
        );
    }

    pub fn add_association(
        &mut self,
        class: &str,
        property: &str,
        cardinality: Cardinality,
        target_class: &str,
    ) {
        self.classes
            .entry(class.to_string())
            .or_default()
            .associations
            .insert(
                property.to_string(),
                AssociationMapping {
                    cardinality,
                    target_class: target_class.to_string(),
                },
            );
    }
}

impl MetadataRegistry for StaticMetadata {
    fn field_mapping(&self, class: &str, property: &str) -> Option<FieldMapping> {
        self.classes.get(class)?.fields.get(property).cloned()
    }

    fn association_mapping(&self, class: &str, property: &str) -> Option<AssociationMapping> {
        self.classes.get(class)?.associations.get(property).cloned()
    }
}

#[derive(Debug, Deserialize)]
struct FieldEntry {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
}

#[derive(Debug, Deserialize)]
struct AssociationEntry {
    name: String,
    cardinality: Cardinality,
    target: String,
}

#[derive(Debug, Deserialize)]
struct ClassEntry {
    name: String,
    #[serde(rename = "field", default)]
    fields: Vec<FieldEntry>,
    #[serde(rename = "association", default)]
    associations: Vec<AssociationEntry>,
}

#[derive(Debug, Deserialize)]
struct MetadataFile {
    #[serde(rename = "class", default)]
    classes: Vec<ClassEntry>,
}

/// Errors returned when loading a metadata file.
#[derive(Debug, Error)]
pub enum MetadataLoadError {
    #[error("failed to read metadata file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse metadata file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load ORM metadata from a TOML file of `[[class]]` entries.
pub fn load_metadata(path: &Path) -> Result<StaticMetadata, MetadataLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| MetadataLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let parsed: MetadataFile = toml::from_str(&raw).map_err(|source| MetadataLoadError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    let mut metadata = StaticMetadata::new();
    for class in parsed.classes {
        for field in class.fields {
            metadata.add_field(&class.name, &field.name, &field.field_type);
        }
        for association in class.associations {
            metadata.add_association(
                &class.name,
                &association.name,
                association.cardinality,
                &association.target,
            );
        }
    }
    Ok(metadata)
}
