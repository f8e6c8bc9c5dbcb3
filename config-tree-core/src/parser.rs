use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::tree::{ConfigMapping, ConfigValue};

/// Errors that can occur while parsing YAML into a [`ConfigValue`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input could not be decoded as YAML.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Input bytes were not valid UTF-8.
    #[error("invalid UTF-8 in YAML input: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to read input file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Valid YAML that the config tree cannot represent.
    #[error("unsupported YAML node: {0}")]
    Unsupported(String),
}

/// Parse YAML text into a [`ConfigValue`] tree.
pub fn parse_str(input: &str) -> Result<ConfigValue, ParseError> {
    let raw: serde_yaml::Value = serde_yaml::from_str(input)?;
    convert(raw)
}

/// Parse YAML bytes into a [`ConfigValue`] tree.
pub fn parse(input: &[u8]) -> Result<ConfigValue, ParseError> {
    parse_str(std::str::from_utf8(input)?)
}

/// Parse a YAML file into a [`ConfigValue`] tree.
pub fn parse_file(path: &Path) -> Result<ConfigValue, ParseError> {
    let raw = fs::read_to_string(path)?;
    parse_str(&raw)
}

fn convert(value: serde_yaml::Value) -> Result<ConfigValue, ParseError> {
    Ok(match value {
        serde_yaml::Value::Null => ConfigValue::Null,
        serde_yaml::Value::Bool(b) => ConfigValue::Bool(b),
        serde_yaml::Value::Number(n) => convert_number(&n)?,
        serde_yaml::Value::String(s) => ConfigValue::String(s),
        serde_yaml::Value::Sequence(seq) => ConfigValue::Sequence(
            seq.into_iter().map(convert).collect::<Result<_, _>>()?,
        ),
        serde_yaml::Value::Mapping(map) => {
            let mut out = ConfigMapping::with_capacity(map.len());
            for (key, value) in map {
                let serde_yaml::Value::String(key) = key else {
                    return Err(ParseError::Unsupported(format!(
                        "non-string mapping key `{}`",
                        describe(&key)
                    )));
                };
                out.insert(key, convert(value)?);
            }
            ConfigValue::Mapping(out)
        }
        serde_yaml::Value::Tagged(tagged) => {
            return Err(ParseError::Unsupported(format!(
                "tagged value `{}`",
                tagged.tag
            )));
        }
    })
}

fn convert_number(n: &serde_yaml::Number) -> Result<ConfigValue, ParseError> {
    if let Some(i) = n.as_i64() {
        return Ok(ConfigValue::Int(i));
    }
    if let Some(f) = n.as_f64() {
        return Ok(ConfigValue::Float(f));
    }
    Err(ParseError::Unsupported(format!("numeric literal `{n}`")))
}

fn describe(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => "~".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Sequence(_) => "<sequence>".to_string(),
        serde_yaml::Value::Mapping(_) => "<mapping>".to_string(),
        serde_yaml::Value::Tagged(t) => t.tag.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_str, ParseError};
    use crate::tree::ConfigValue;

    #[test]
    fn preserves_mapping_declaration_order() {
        let tree = parse_str("zulu: 1\nalpha: 2\nmike: 3\n").expect("parse");
        let keys: Vec<&str> = tree
            .as_mapping()
            .expect("mapping root")
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(keys, ["zulu", "alpha", "mike"]);
    }

    #[test]
    fn rejects_non_string_mapping_keys() {
        let err = parse_str("1: one\n").expect_err("numeric key should fail");
        assert!(matches!(err, ParseError::Unsupported(_)));
    }

    #[test]
    fn parses_scalars_into_typed_values() {
        let tree = parse_str("flag: true\ncount: 7\nname: books\nnothing: ~\n").expect("parse");

        assert_eq!(tree.get("flag"), Some(&ConfigValue::Bool(true)));
        assert_eq!(tree.get("count"), Some(&ConfigValue::Int(7)));
        assert_eq!(tree.get("name"), Some(&ConfigValue::from("books")));
        assert_eq!(tree.get("nothing"), Some(&ConfigValue::Null));
    }
}
