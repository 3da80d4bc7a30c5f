//! Table utilities for terminal output.

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::Value;

/// A table pre-configured for terminal output
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Truncate a string to `max` characters, appending "..." if truncated.
///
/// Safe for multi-byte (UTF-8) strings.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Board lanes side by side: one table column per board column, one row per
/// rank. Cards show the lead name and position.
pub fn board_table(board: &Value) -> Table {
    let mut table = new_table();
    let columns = board["columns"].as_array().cloned().unwrap_or_default();

    table.set_header(columns.iter().map(|c| {
        let count = c["leads"].as_array().map_or(0, Vec::len);
        let marker = if c["is_default"].as_bool().unwrap_or(false) {
            " *"
        } else {
            ""
        };
        Cell::new(format!("{}{} ({})", text(&c["title"]), marker, count))
    }));

    let depth = columns
        .iter()
        .map(|c| c["leads"].as_array().map_or(0, Vec::len))
        .max()
        .unwrap_or(0);

    for rank in 0..depth {
        table.add_row(columns.iter().map(|c| {
            let card = c["leads"]
                .get(rank)
                .map(|lead| {
                    format!(
                        "{} [{}]",
                        truncate_str(&text(&lead["name"]), 32),
                        text(&lead["position"])
                    )
                })
                .unwrap_or_default();
            Cell::new(card)
        }));
    }
    table
}

/// Rows of objects with the given keys as columns
pub fn records_table(rows: &[Value], keys: &[&str]) -> Table {
    let mut table = new_table();
    table.set_header(keys.iter().copied());
    for row in rows {
        table.add_row(keys.iter().map(|k| truncate_str(&text(&row[*k]), 48)));
    }
    table
}

/// A scalar as display text; nulls are blank
pub fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_str_long() {
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn test_board_table_lanes() {
        let board = json!({
            "columns": [
                {"title": "New Leads", "is_default": true, "leads": [
                    {"name": "Ana", "position": 0},
                    {"name": "Bruno", "position": 1}
                ]},
                {"title": "Won", "is_default": false, "leads": []}
            ]
        });

        let rendered = board_table(&board).to_string();
        assert!(rendered.contains("New Leads * (2)"));
        assert!(rendered.contains("Won (0)"));
        assert!(rendered.contains("Ana [0]"));
        assert!(rendered.contains("Bruno [1]"));
    }

    #[test]
    fn test_text_blanks_null() {
        assert_eq!(text(&Value::Null), "");
        assert_eq!(text(&json!(3)), "3");
        assert_eq!(text(&json!("x")), "x");
    }
}
