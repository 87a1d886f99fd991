use colored::Colorize;
use vici_message::{format_summary, format_text, Message};

use crate::verify::{render_verify_text, VerifyReport};

/// Render a request message for terminal output.
pub fn render_message(message: &Message) -> String {
    let raw = format_text(message);
    let mut out = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim_start();
        let colored = if trimmed.ends_with('{') || trimmed.ends_with("{}") {
            line.cyan().to_string()
        } else if trimmed == "}" {
            line.dimmed().to_string()
        } else {
            line.to_string()
        };
        out.push(colored);
    }

    out.join("\n")
}

/// Render element counts for terminal output.
pub fn render_summary(command: &str, message: &Message) -> String {
    format!("{command} {}", format_summary(message))
        .cyan()
        .to_string()
}

/// Render a verify report with errors and warnings highlighted.
pub fn render_verify(report: &VerifyReport, verbose: bool) -> String {
    render_verify_text(report, verbose)
        .lines()
        .map(|line| {
            if line.starts_with("- [error]") {
                line.red().to_string()
            } else if line.starts_with("- [warning]") {
                line.yellow().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
