use thiserror::Error;

use crate::backend::ObjectKind;
use crate::choices::ChoiceSourceError;

/// Fatal configuration errors raised while processing a backend config
/// tree. Processing aborts at the first error; the caller is expected to
/// fail boot with it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `form_filters` entry is neither a string nor a mapping.
    #[error("the \"form_filters\" entries for the list view of the \"{class}\" {kind} can only be strings or mappings, got {found}")]
    MalformedFilterEntry {
        class: String,
        kind: ObjectKind,
        found: String,
    },
    /// A mapping-form filter entry omits the mandatory `property` key.
    #[error("a \"form_filters\" entry for the list view of the \"{class}\" {kind} does not define the mandatory \"property\" option")]
    MissingPropertyKey { class: String, kind: ObjectKind },
    /// A string-typed filter supplies neither explicit choices nor a
    /// usable static callback.
    #[error("choice filter \"{property}\" for entity \"{class}\" must provide either a \"choices\" option or a \"choices_static_callback\" option")]
    MissingChoiceSource { class: String, property: String },
    /// The injected choice source failed to produce a list.
    #[error("choice callback \"{method}\" on \"{class}\" for filter \"{property}\" failed: {source}")]
    ChoiceSourceFailed {
        class: String,
        property: String,
        method: String,
        source: ChoiceSourceError,
    },
}

impl ConfigError {
    /// Stable machine-friendly code, used in check reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedFilterEntry { .. } => "malformed_filter_entry",
            Self::MissingPropertyKey { .. } => "missing_property_key",
            Self::MissingChoiceSource { .. } => "missing_choice_source",
            Self::ChoiceSourceFailed { .. } => "choice_source_failed",
        }
    }
}
