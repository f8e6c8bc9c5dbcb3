use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::tree::ConfigValue;

/// Errors that can occur while writing a [`ConfigValue`] tree.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize YAML.
    #[error("failed to write YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Failed to serialize JSON.
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Failed to write output file.
    #[error("failed to write config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize a [`ConfigValue`] tree into YAML text.
pub fn write(value: &ConfigValue) -> Result<String, WriteError> {
    Ok(serde_yaml::to_string(value)?)
}

/// Serialize a [`ConfigValue`] tree and write it to `path` as YAML.
pub fn write_file(value: &ConfigValue, path: &Path) -> Result<(), WriteError> {
    let text = write(value)?;
    fs::write(path, text)?;
    Ok(())
}

/// Serialize a [`ConfigValue`] tree into pretty-printed JSON text.
pub fn write_json(value: &ConfigValue) -> Result<String, WriteError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::{write, write_json};
    use crate::parser::parse_str;

    #[test]
    fn yaml_output_keeps_key_order() {
        let tree = parse_str("list:\n  title: Books\n  max_results: 30\n").expect("parse");
        let text = write(&tree).expect("write");

        let title_at = text.find("title").expect("title present");
        let max_at = text.find("max_results").expect("max_results present");
        assert!(title_at < max_at);
    }

    #[test]
    fn json_output_renders_scalars_plainly() {
        let tree = parse_str("enabled: true\ncount: 2\n").expect("parse");
        let json = write_json(&tree).expect("write_json");

        assert!(json.contains("\"enabled\": true"));
        assert!(json.contains("\"count\": 2"));
    }
}
