use config_tree_core::{ConfigMapping, ConfigValue};

use crate::backend::{object_class, ObjectKind};
use crate::choices::ChoiceSource;
use crate::error::ConfigError;
use crate::metadata::{AssociationMapping, Cardinality, FieldMapping, MetadataRegistry};
use crate::pass::ConfigPass;
use crate::types::{AUTOCOMPLETE_TYPE, CHOICE_TYPE};

/// Translation domain for the default boolean filter labels.
const TRANSLATION_DOMAIN: &str = "backadmin";
const TRUE_LABEL: &str = "list_form_filters.default.boolean.true";
const FALSE_LABEL: &str = "list_form_filters.default.boolean.false";

/// Guesses widget types for list-view form filters.
///
/// Filter declarations are normalized into a property-keyed mapping; for
/// entity objects the widget type and default options are inferred from
/// ORM metadata when the declaration does not set one. Filters whose type
/// remains undetermined are dropped from the result. Duplicate `property`
/// declarations keep the last entry, a consequence of the key-based
/// commit.
pub struct ListFilterGuesser<'a> {
    metadata: &'a dyn MetadataRegistry,
    choices: &'a dyn ChoiceSource,
}

impl<'a> ListFilterGuesser<'a> {
    pub fn new(metadata: &'a dyn MetadataRegistry, choices: &'a dyn ChoiceSource) -> Self {
        Self { metadata, choices }
    }

    /// Normalize and type-guess every object's `list.form_filters`.
    pub fn guess(&self, mut config: ConfigValue) -> Result<ConfigValue, ConfigError> {
        for kind in ObjectKind::ALL {
            let Some(section) = config
                .get_path_mut(&[kind.section_key()])
                .and_then(ConfigValue::as_mapping_mut)
            else {
                continue;
            };
            for object_config in section.values_mut() {
                self.process_object(kind, object_config)?;
            }
        }
        Ok(config)
    }

    fn process_object(
        &self,
        kind: ObjectKind,
        object_config: &mut ConfigValue,
    ) -> Result<(), ConfigError> {
        let class = object_class(object_config).to_string();
        let Some(filters_value) = object_config.get_path_mut(&["list", "form_filters"]) else {
            return Ok(());
        };

        // Accept the declared sequence, or an already-keyed mapping whose
        // values are re-processed in order (making the pass idempotent).
        let entries: Vec<ConfigValue> = match filters_value {
            ConfigValue::Sequence(seq) => std::mem::take(seq),
            ConfigValue::Mapping(map) => std::mem::take(map).into_values().collect(),
            _ => return Ok(()),
        };

        let mut result = ConfigMapping::new();
        for entry in entries {
            let mut filter = self.normalize(kind, &class, entry)?;
            if kind == ObjectKind::Entity {
                self.configure_entity_filter(&class, &mut filter)?;
            }

            // Still untyped after guessing: not renderable, drop it.
            if !filter.contains_key("type") {
                continue;
            }
            let Some(key) = filter.get("property").and_then(ConfigValue::scalar_key) else {
                continue;
            };
            result.insert(key, ConfigValue::Mapping(filter));
        }

        *filters_value = ConfigValue::Mapping(result);
        Ok(())
    }

    fn normalize(
        &self,
        kind: ObjectKind,
        class: &str,
        entry: ConfigValue,
    ) -> Result<ConfigMapping, ConfigError> {
        match entry {
            ConfigValue::String(name) => {
                let mut filter = ConfigMapping::new();
                filter.insert("property".to_string(), ConfigValue::String(name));
                Ok(filter)
            }
            ConfigValue::Mapping(filter) => {
                if !filter.contains_key("property") {
                    return Err(ConfigError::MissingPropertyKey {
                        class: class.to_string(),
                        kind,
                    });
                }
                Ok(filter)
            }
            other => Err(ConfigError::MalformedFilterEntry {
                class: class.to_string(),
                kind,
                found: format!("{} `{}`", other.kind_name(), other),
            }),
        }
    }

    fn configure_entity_filter(
        &self,
        class: &str,
        filter: &mut ConfigMapping,
    ) -> Result<(), ConfigError> {
        // An explicit type needs no guessing.
        if filter.contains_key("type") {
            return Ok(());
        }
        let Some(property) = filter.get("property").and_then(ConfigValue::scalar_key) else {
            return Ok(());
        };

        if let Some(field) = self.metadata.field_mapping(class, &property) {
            self.configure_field_filter(class, &property, &field, filter)?;
        } else if let Some(association) = self.metadata.association_mapping(class, &property) {
            configure_association_filter(&association, filter);
        }
        // Neither field nor association: unguessable, leave untyped.
        Ok(())
    }

    fn configure_field_filter(
        &self,
        class: &str,
        property: &str,
        field: &FieldMapping,
        filter: &mut ConfigMapping,
    ) -> Result<(), ConfigError> {
        let defaults = match field.field_type.as_str() {
            "boolean" => {
                let mut choices = ConfigMapping::new();
                choices.insert(TRUE_LABEL.to_string(), ConfigValue::Bool(true));
                choices.insert(FALSE_LABEL.to_string(), ConfigValue::Bool(false));

                let mut defaults = ConfigMapping::new();
                defaults.insert("choices".to_string(), ConfigValue::Mapping(choices));
                defaults.insert(
                    "choice_translation_domain".to_string(),
                    ConfigValue::from(TRANSLATION_DOMAIN),
                );
                defaults
            }
            "string" => {
                let choices = self.resolve_choice_list(class, property, filter)?;

                let mut defaults = ConfigMapping::new();
                defaults.insert("multiple".to_string(), ConfigValue::Bool(true));
                defaults.insert("choices".to_string(), choices);
                defaults.insert("attr".to_string(), select2_attr());
                defaults
            }
            _ => return Ok(()),
        };

        filter.insert("type".to_string(), ConfigValue::from(CHOICE_TYPE));
        merge_default_options(filter, defaults);
        Ok(())
    }

    /// Resolve the choice list for a string-typed filter.
    ///
    /// Explicit `choices` are consumed (and a superseded callback removed
    /// with them); otherwise the declared static callback is invoked
    /// against the entity class.
    fn resolve_choice_list(
        &self,
        class: &str,
        property: &str,
        filter: &mut ConfigMapping,
    ) -> Result<ConfigValue, ConfigError> {
        let options = filter
            .get_mut("type_options")
            .and_then(ConfigValue::as_mapping_mut);

        let Some(options) = options else {
            return Err(ConfigError::MissingChoiceSource {
                class: class.to_string(),
                property: property.to_string(),
            });
        };

        if let Some(choices) = options.shift_remove("choices") {
            options.shift_remove("choices_static_callback");
            return Ok(choices);
        }

        let callback = options.shift_remove("choices_static_callback");
        let Some((method, args)) = callback.as_ref().and_then(parse_callback) else {
            return Err(ConfigError::MissingChoiceSource {
                class: class.to_string(),
                property: property.to_string(),
            });
        };

        match self.choices.invoke(class, &method, &args) {
            Ok(choices) => Ok(choices),
            Err(source) => Err(ConfigError::ChoiceSourceFailed {
                class: class.to_string(),
                property: property.to_string(),
                method,
                source,
            }),
        }
    }
}

impl ConfigPass for ListFilterGuesser<'_> {
    fn name(&self) -> &'static str {
        "list-form-filters"
    }

    fn process(&self, config: ConfigValue) -> Result<ConfigValue, ConfigError> {
        self.guess(config)
    }
}

/// Parse a `choices_static_callback` declaration: a method name, or a
/// `[method, [args...]]` pair.
fn parse_callback(value: &ConfigValue) -> Option<(String, Vec<ConfigValue>)> {
    match value {
        ConfigValue::String(method) => Some((method.clone(), Vec::new())),
        ConfigValue::Sequence(parts) => {
            if parts.len() > 2 {
                return None;
            }
            let method = parts.first()?.as_str()?.to_string();
            let args = match parts.get(1) {
                None => Vec::new(),
                Some(ConfigValue::Sequence(args)) => args.clone(),
                Some(_) => return None,
            };
            Some((method, args))
        }
        _ => None,
    }
}

fn configure_association_filter(association: &AssociationMapping, filter: &mut ConfigMapping) {
    // Only to-one associations map onto the autocomplete selector.
    if association.cardinality != Cardinality::ToOne {
        return;
    }

    filter.insert("type".to_string(), ConfigValue::from(AUTOCOMPLETE_TYPE));

    let mut defaults = ConfigMapping::new();
    defaults.insert(
        "class".to_string(),
        ConfigValue::from(association.target_class.clone()),
    );
    defaults.insert("multiple".to_string(), ConfigValue::Bool(true));
    defaults.insert("attr".to_string(), select2_attr());
    merge_default_options(filter, defaults);
}

/// Merge `defaults` as the base layer under any user-supplied
/// `type_options`; explicit user options win on key collision.
fn merge_default_options(filter: &mut ConfigMapping, defaults: ConfigMapping) {
    let mut merged = defaults;
    if let Some(user) = filter.get("type_options").and_then(ConfigValue::as_mapping) {
        for (key, value) in user {
            merged.insert(key.clone(), value.clone());
        }
    }
    filter.insert("type_options".to_string(), ConfigValue::Mapping(merged));
}

fn select2_attr() -> ConfigValue {
    let mut attr = ConfigMapping::new();
    attr.insert("data-widget".to_string(), ConfigValue::from("select2"));
    ConfigValue::Mapping(attr)
}
