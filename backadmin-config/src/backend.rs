use std::fmt::{self, Display, Formatter};

use config_tree_core::ConfigValue;

/// Category of admin-managed persisted objects.
///
/// Entities are relational-ORM backed and eligible for filter type
/// guessing; documents are managed by a separate object mapper whose
/// metadata is not introspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Entity,
    Document,
}

impl ObjectKind {
    /// Both kinds, in backend-config processing order.
    pub const ALL: [ObjectKind; 2] = [ObjectKind::Entity, ObjectKind::Document];

    /// Top-level backend config key holding objects of this kind.
    pub fn section_key(self) -> &'static str {
        match self {
            Self::Entity => "entities",
            Self::Document => "documents",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Document => "document",
        }
    }
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared class of an object configuration, or a placeholder when the
/// declaration is missing or malformed.
pub fn object_class(object_config: &ConfigValue) -> &str {
    object_config
        .get("class")
        .and_then(ConfigValue::as_str)
        .unwrap_or("<unknown>")
}
