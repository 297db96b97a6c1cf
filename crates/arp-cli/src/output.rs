//! Output formatting utilities.

use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use crate::config::OutputFormat;

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Outputs rows in the specified format.
///
/// ## Errors
///
/// Returns an error if JSON serialization fails.
pub fn output<T: Tabled + serde::Serialize>(
    data: &[T],
    format: OutputFormat,
) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                info("No results found.");
            } else {
                println!("{}", render_table(data));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data)?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Renders rows as a rounded table.
#[must_use]
pub fn render_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).with(Style::rounded()).to_string()
}

/// Joins a set of names for a table cell.
#[must_use]
pub fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    let joined = items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        name: String,
        count: usize,
    }

    #[test]
    fn table_contains_headers_and_cells() {
        let rendered = render_table(&[Row {
            name: "R1".to_string(),
            count: 2,
        }]);

        assert!(rendered.contains("name"));
        assert!(rendered.contains("count"));
        assert!(rendered.contains("R1"));
    }

    #[test]
    fn join_uses_placeholder_when_empty() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(join(&empty), "-");

        let items = vec!["R1".to_string(), "R2".to_string()];
        assert_eq!(join(&items), "R1, R2");
    }
}
