use std::collections::BTreeSet;

use config_tree_core::ConfigValue;
use serde::Serialize;

use crate::backend::{object_class, ObjectKind};
use crate::pass::{apply_passes, ConfigPass};
use crate::short_types::FORM_FIELD_PATHS;
use crate::types::TypeRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CheckSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckIssue {
    pub severity: CheckSeverity,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub objects: usize,
    pub passes: Vec<String>,
    pub errors: usize,
    pub warnings: usize,
    pub issues: Vec<CheckIssue>,
}

/// Run `passes` over a copy of `config` and report what an operator would
/// want to know before shipping the backend: hard configuration errors,
/// filters silently dropped as unguessable, and form types that no
/// registered widget backs.
pub fn build_check_report(
    config: &ConfigValue,
    passes: &[&dyn ConfigPass],
    registry: &dyn TypeRegistry,
) -> CheckReport {
    let mut issues = Vec::new();

    match apply_passes(passes, config.clone()) {
        Ok(processed) => {
            issues.extend(dropped_filter_issues(config, &processed));
            issues.extend(unknown_type_issues(&processed, registry));
        }
        Err(error) => issues.push(err(error.code(), &error.to_string())),
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == CheckSeverity::Error)
        .count();
    let warnings = issues
        .iter()
        .filter(|i| i.severity == CheckSeverity::Warning)
        .count();

    CheckReport {
        objects: object_count(config),
        passes: passes.iter().map(|pass| pass.name().to_string()).collect(),
        errors,
        warnings,
        issues,
    }
}

/// Plain-text rendering of a check report.
pub fn render_check_text(report: &CheckReport) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "check objects={} passes={}",
        report.objects,
        report.passes.join(",")
    ));
    out.push(format!(
        "result errors={} warnings={}",
        report.errors, report.warnings
    ));
    out.push("issues".to_string());
    if report.issues.is_empty() {
        out.push("- none".to_string());
        return out.join("\n");
    }
    for issue in &report.issues {
        let sev = match issue.severity {
            CheckSeverity::Error => "error",
            CheckSeverity::Warning => "warning",
        };
        out.push(format!("- [{sev}] {}: {}", issue.code, issue.message));
    }
    out.join("\n")
}

fn object_count(config: &ConfigValue) -> usize {
    ObjectKind::ALL
        .iter()
        .filter_map(|kind| config.get(kind.section_key()))
        .filter_map(ConfigValue::as_mapping)
        .map(|section| section.len())
        .sum()
}

fn dropped_filter_issues(original: &ConfigValue, processed: &ConfigValue) -> Vec<CheckIssue> {
    let mut out = Vec::new();
    for kind in ObjectKind::ALL {
        let Some(section) = original
            .get(kind.section_key())
            .and_then(ConfigValue::as_mapping)
        else {
            continue;
        };
        for (name, object_config) in section {
            let declared = declared_filter_properties(object_config);
            if declared.is_empty() {
                continue;
            }
            let kept: BTreeSet<&str> = processed
                .get_path(&[kind.section_key(), name.as_str(), "list", "form_filters"])
                .and_then(ConfigValue::as_mapping)
                .map(|map| map.keys().map(String::as_str).collect())
                .unwrap_or_default();

            let class = object_class(object_config);
            let mut seen = BTreeSet::new();
            for property in declared {
                if !seen.insert(property.clone()) || kept.contains(property.as_str()) {
                    continue;
                }
                out.push(warn(
                    "dropped_filter",
                    &format!(
                        "filter \"{property}\" on the \"{class}\" {kind} was dropped: no widget type could be determined"
                    ),
                ));
            }
        }
    }
    out
}

fn declared_filter_properties(object_config: &ConfigValue) -> Vec<String> {
    let Some(filters) = object_config.get_path(&["list", "form_filters"]) else {
        return Vec::new();
    };
    let entries: Vec<&ConfigValue> = match filters {
        ConfigValue::Sequence(seq) => seq.iter().collect(),
        ConfigValue::Mapping(map) => map.values().collect(),
        _ => return Vec::new(),
    };
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            ConfigValue::String(name) => Some(name.clone()),
            other => other.get("property").and_then(ConfigValue::scalar_key),
        })
        .collect()
}

fn unknown_type_issues(processed: &ConfigValue, registry: &dyn TypeRegistry) -> Vec<CheckIssue> {
    let mut out = Vec::new();
    for kind in ObjectKind::ALL {
        let Some(section) = processed
            .get(kind.section_key())
            .and_then(ConfigValue::as_mapping)
        else {
            continue;
        };
        for object_config in section.values() {
            let class = object_class(object_config);
            for path in FORM_FIELD_PATHS {
                let Some(fields) = object_config
                    .get_path(path)
                    .and_then(ConfigValue::as_mapping)
                else {
                    continue;
                };
                for (field_name, field) in fields {
                    let Some(type_id) = field.get("type").and_then(ConfigValue::as_str) else {
                        continue;
                    };
                    if !registry.type_exists(type_id) {
                        out.push(warn(
                            "unknown_form_type",
                            &format!(
                                "field \"{field_name}\" on the \"{class}\" {kind} uses unregistered form type \"{type_id}\""
                            ),
                        ));
                    }
                }
            }
        }
    }
    out
}

fn err(code: &str, message: &str) -> CheckIssue {
    CheckIssue {
        severity: CheckSeverity::Error,
        code: code.to_string(),
        message: message.to_string(),
    }
}

fn warn(code: &str, message: &str) -> CheckIssue {
    CheckIssue {
        severity: CheckSeverity::Warning,
        code: code.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use config_tree_core::parse_str;

    use super::{build_check_report, CheckSeverity};
    use crate::choices::NoChoiceSource;
    use crate::list_filters::ListFilterGuesser;
    use crate::metadata::{Cardinality, StaticMetadata};
    use crate::pass::ConfigPass;
    use crate::short_types::ShortTypeResolver;
    use crate::types::DefaultTypeRegistry;

    fn metadata() -> StaticMetadata {
        let mut metadata = StaticMetadata::new();
        metadata.add_field("App.Entity.Book", "available", "boolean");
        metadata.add_association(
            "App.Entity.Book",
            "author",
            Cardinality::ToOne,
            "App.Entity.Author",
        );
        metadata
    }

    #[test]
    fn clean_config_reports_no_issues() {
        let config = parse_str(
            r#"
entities:
  Book:
    class: App.Entity.Book
    list:
      form_filters:
        - available
        - author
"#,
        )
        .expect("parse");
        let metadata = metadata();
        let guesser = ListFilterGuesser::new(&metadata, &NoChoiceSource);
        let resolver = ShortTypeResolver::new();
        let passes: [&dyn ConfigPass; 2] = [&guesser, &resolver];

        let report = build_check_report(&config, &passes, &DefaultTypeRegistry::new());

        assert_eq!(report.objects, 1);
        assert_eq!(report.passes, ["list-form-filters", "short-form-types"]);
        assert_eq!(report.errors, 0);
        assert_eq!(report.warnings, 0);
    }

    #[test]
    fn dropped_filters_become_warnings() {
        let config = parse_str(
            r#"
entities:
  Book:
    class: App.Entity.Book
    list:
      form_filters:
        - available
        - ghost
"#,
        )
        .expect("parse");
        let metadata = metadata();
        let guesser = ListFilterGuesser::new(&metadata, &NoChoiceSource);
        let resolver = ShortTypeResolver::new();
        let passes: [&dyn ConfigPass; 2] = [&guesser, &resolver];

        let report = build_check_report(&config, &passes, &DefaultTypeRegistry::new());

        assert_eq!(report.warnings, 1);
        assert_eq!(report.issues[0].code, "dropped_filter");
        assert!(report.issues[0].message.contains("ghost"));
    }

    #[test]
    fn pass_errors_become_error_issues() {
        let config = parse_str(
            r#"
entities:
  Book:
    class: App.Entity.Book
    list:
      form_filters:
        - 42
"#,
        )
        .expect("parse");
        let metadata = metadata();
        let guesser = ListFilterGuesser::new(&metadata, &NoChoiceSource);
        let passes: [&dyn ConfigPass; 1] = [&guesser];

        let report = build_check_report(&config, &passes, &DefaultTypeRegistry::new());

        assert_eq!(report.errors, 1);
        assert_eq!(report.issues[0].severity, CheckSeverity::Error);
        assert_eq!(report.issues[0].code, "malformed_filter_entry");
    }

    #[test]
    fn unregistered_form_types_become_warnings() {
        let config = parse_str(
            r#"
entities:
  Book:
    class: App.Entity.Book
    form:
      fields:
        body: { type: frobnicator }
"#,
        )
        .expect("parse");
        let resolver = ShortTypeResolver::new();
        let passes: [&dyn ConfigPass; 1] = [&resolver];

        let report = build_check_report(&config, &passes, &DefaultTypeRegistry::new());

        assert_eq!(report.warnings, 1);
        assert_eq!(report.issues[0].code, "unknown_form_type");
        assert!(report.issues[0].message.contains("frobnicator"));
    }
}
