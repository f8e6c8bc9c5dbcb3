use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use backadmin_config::choices::{load_choice_table, StaticChoiceTable};
use backadmin_config::metadata::{load_metadata, StaticMetadata};
use backadmin_config::short_types::load_custom_types;
use indexmap::IndexMap;

/// Collaborator data loaded from optional TOML files.
pub struct PassInputs {
    pub custom_types: IndexMap<String, String>,
    pub metadata: StaticMetadata,
    pub choices: StaticChoiceTable,
}

pub fn load_pass_inputs(
    custom_types: Option<&PathBuf>,
    metadata: Option<&PathBuf>,
    choices: Option<&PathBuf>,
) -> Result<PassInputs> {
    Ok(PassInputs {
        custom_types: match custom_types {
            Some(path) => load_custom_types(path).with_context(|| failed(path))?,
            None => IndexMap::new(),
        },
        metadata: match metadata {
            Some(path) => load_metadata(path).with_context(|| failed(path))?,
            None => StaticMetadata::new(),
        },
        choices: match choices {
            Some(path) => load_choice_table(path).with_context(|| failed(path))?,
            None => StaticChoiceTable::new(),
        },
    })
}

fn failed(path: &Path) -> String {
    format!("failed to load {}", path.display())
}
