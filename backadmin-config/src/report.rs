use colored::Colorize;

use crate::check::{render_check_text, CheckReport};

/// Render a check report for terminal output, coloring issue lines by
/// severity.
pub fn render_check_colored(report: &CheckReport) -> String {
    let raw = render_check_text(report);
    let mut out = Vec::new();

    for line in raw.lines() {
        let colored = if line.starts_with("- [error]") {
            line.red().to_string()
        } else if line.starts_with("- [warning]") {
            line.yellow().to_string()
        } else if line.starts_with("result") {
            line.cyan().to_string()
        } else {
            line.to_string()
        };
        out.push(colored);
    }

    out.join("\n")
}
