use std::collections::BTreeSet;

/// Fully-qualified identifier of the choice-selector form type.
pub const CHOICE_TYPE: &str = "backadmin.form.choice";
/// Fully-qualified identifier of the autocomplete-selector form type.
pub const AUTOCOMPLETE_TYPE: &str = "backadmin.form.autocomplete";
/// Fully-qualified identifier of the embedded-list form type.
pub const EMBEDDED_LIST_TYPE: &str = "backadmin.form.embedded_list";
/// Fully-qualified identifier of the admin-roles security form type.
pub const ADMIN_ROLES_TYPE: &str = "backadmin.form.security.admin_roles";

/// Form types always present in the host framework.
const BUILTIN_TYPES: &[&str] = &[
    CHOICE_TYPE,
    AUTOCOMPLETE_TYPE,
    EMBEDDED_LIST_TYPE,
    ADMIN_ROLES_TYPE,
    "backadmin.form.text",
    "backadmin.form.textarea",
    "backadmin.form.checkbox",
    "backadmin.form.integer",
    "backadmin.form.number",
    "backadmin.form.email",
    "backadmin.form.url",
    "backadmin.form.hidden",
    "backadmin.form.password",
    "backadmin.form.date",
    "backadmin.form.datetime",
    "backadmin.form.time",
    "backadmin.form.collection",
    "backadmin.form.entity",
];

/// Legacy v1 short tokens and their target identifiers.
///
/// Some targets belong to optional integrations and only exist when the
/// host application registered them, so resolution must be paired with an
/// existence check.
fn legacy_target(short: &str) -> Option<&'static str> {
    Some(match short {
        "text" => "backadmin.form.text",
        "textarea" => "backadmin.form.textarea",
        "choice" => CHOICE_TYPE,
        "checkbox" => "backadmin.form.checkbox",
        "integer" => "backadmin.form.integer",
        "number" => "backadmin.form.number",
        "email" => "backadmin.form.email",
        "url" => "backadmin.form.url",
        "hidden" => "backadmin.form.hidden",
        "password" => "backadmin.form.password",
        "date" => "backadmin.form.date",
        "datetime" => "backadmin.form.datetime",
        "time" => "backadmin.form.time",
        "collection" => "backadmin.form.collection",
        "entity" => "backadmin.form.entity",
        "ckeditor" => "backadmin.form.ckeditor",
        "vich_image" => "backadmin.form.vich_image",
        "vich_file" => "backadmin.form.vich_file",
        _ => return None,
    })
}

/// Lookup into the runtime's registered form types.
pub trait TypeRegistry {
    /// Map a legacy short token to a candidate fully-qualified identifier.
    ///
    /// Callers must verify the candidate with
    /// [`type_exists`](Self::type_exists) before accepting it.
    fn resolve_legacy(&self, short: &str) -> Option<String>;

    /// Whether `id` denotes a form type known to the runtime.
    fn type_exists(&self, id: &str) -> bool;
}

/// Registry backed by the framework's built-in form types plus any
/// identifiers registered by the host application.
#[derive(Debug, Clone, Default)]
pub struct DefaultTypeRegistry {
    registered: BTreeSet<String>,
}

impl DefaultTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an additional form-type identifier as existing.
    pub fn register(&mut self, id: impl Into<String>) {
        self.registered.insert(id.into());
    }
}

impl TypeRegistry for DefaultTypeRegistry {
    fn resolve_legacy(&self, short: &str) -> Option<String> {
        legacy_target(short).map(str::to_string)
    }

    fn type_exists(&self, id: &str) -> bool {
        BUILTIN_TYPES.contains(&id) || self.registered.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultTypeRegistry, TypeRegistry, CHOICE_TYPE};

    #[test]
    fn legacy_tokens_resolve_to_builtin_identifiers() {
        let registry = DefaultTypeRegistry::new();
        let resolved = registry.resolve_legacy("choice").expect("choice resolves");

        assert_eq!(resolved, CHOICE_TYPE);
        assert!(registry.type_exists(&resolved));
    }

    #[test]
    fn optional_integration_targets_require_registration() {
        let mut registry = DefaultTypeRegistry::new();
        let candidate = registry
            .resolve_legacy("ckeditor")
            .expect("ckeditor resolves to a candidate");

        assert!(!registry.type_exists(&candidate));
        registry.register(candidate.clone());
        assert!(registry.type_exists(&candidate));
    }

    #[test]
    fn unknown_tokens_do_not_resolve() {
        let registry = DefaultTypeRegistry::new();
        assert!(registry.resolve_legacy("markdown").is_none());
    }
}
