use config_tree_core::ConfigValue;

/// Render a config tree's shape with a configurable max depth.
///
/// Scalars render inline; mappings and sequences below the depth limit
/// collapse into a child count.
pub fn render_tree(value: &ConfigValue, max_depth: usize) -> String {
    let mut out = String::new();
    match value {
        ConfigValue::Mapping(map) => {
            for (key, child) in map {
                render_entry(key, child, 0, max_depth, &mut out);
            }
        }
        other => out.push_str(&format!("{other}\n")),
    }
    out
}

fn render_entry(name: &str, value: &ConfigValue, depth: usize, max_depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match value {
        ConfigValue::Mapping(map) => {
            if depth >= max_depth {
                out.push_str(&format!("{indent}{name} ({} keys)\n", map.len()));
                return;
            }
            out.push_str(&format!("{indent}{name}\n"));
            for (key, child) in map {
                render_entry(key, child, depth + 1, max_depth, out);
            }
        }
        ConfigValue::Sequence(seq) => {
            if depth >= max_depth {
                out.push_str(&format!("{indent}{name} ({} items)\n", seq.len()));
                return;
            }
            out.push_str(&format!("{indent}{name}\n"));
            for (index, child) in seq.iter().enumerate() {
                render_entry(&format!("[{index}]"), child, depth + 1, max_depth, out);
            }
        }
        scalar => out.push_str(&format!("{indent}{name}: {scalar}\n")),
    }
}

#[cfg(test)]
mod tests {
    use config_tree_core::parse_str;

    use super::render_tree;

    #[test]
    fn renders_scalars_inline_and_collapses_past_depth() {
        let tree = parse_str(
            r#"
entities:
  Book:
    class: App.Entity.Book
    list:
      form_filters:
        - available
"#,
        )
        .expect("parse");

        let rendered = render_tree(&tree, 2);

        assert!(rendered.contains("entities\n"));
        assert!(rendered.contains("  Book\n"));
        assert!(rendered.contains("    class: App.Entity.Book"));
        assert!(rendered.contains("    list (1 keys)"));
    }
}
