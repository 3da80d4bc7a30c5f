//! Rendering command results for the terminal

use crate::table::{board_table, records_table};
use clap::ValueEnum;
use serde_json::Value;

/// How command results are printed on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Keys shown when a result holds a list of this kind of record
const RECORD_LAYOUTS: &[(&str, &[&str])] = &[
    ("organizations", &["slug", "name", "id"]),
    ("columns", &["order", "title", "id", "is_default"]),
    ("leads", &["name", "status", "column_id", "position", "id"]),
    ("history", &["timestamp", "action", "from_column", "to_column", "details"]),
    ("entries", &["timestamp", "op", "actor", "duration_ms"]),
];

/// Render a command result in the requested format
pub fn render(value: &Value, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Ok(serde_yaml_ng::to_string(value)?),
        OutputFormat::Table => render_table(value),
    }
}

/// Boards and record lists get tables; anything else falls back to YAML
fn render_table(value: &Value) -> anyhow::Result<String> {
    if is_board(value) {
        return Ok(board_table(value).to_string());
    }
    for (key, columns) in RECORD_LAYOUTS {
        if let Some(rows) = value.get(*key).and_then(Value::as_array) {
            if rows.first().is_some_and(Value::is_object) {
                return Ok(records_table(rows, columns).to_string());
            }
        }
    }
    Ok(serde_yaml_ng::to_string(value)?)
}

fn is_board(value: &Value) -> bool {
    value["columns"]
        .as_array()
        .is_some_and(|columns| columns.iter().all(|c| c.get("leads").is_some()))
        && value.get("count").is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_json_and_yaml() {
        let value = json!({"deleted": true, "id": "01ABC"});

        let json = render(&value, OutputFormat::Json).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), value);

        let yaml = render(&value, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("deleted: true"));
    }

    #[test]
    fn test_table_for_lead_list() {
        let value = json!({
            "leads": [{"name": "Ana", "status": "new", "column_id": "c1", "position": 0, "id": "l1"}],
            "count": 1
        });
        let rendered = render(&value, OutputFormat::Table).unwrap();
        assert!(rendered.contains("Ana"));
        assert!(rendered.contains("column_id"));
    }

    #[test]
    fn test_column_list_is_not_a_board() {
        let value = json!({
            "columns": [{"order": 0, "title": "New Leads", "id": "c1", "is_default": true}],
            "count": 1
        });
        assert!(!is_board(&value));
        let rendered = render(&value, OutputFormat::Table).unwrap();
        assert!(rendered.contains("New Leads"));
    }

    #[test]
    fn test_table_falls_back_to_yaml() {
        let value = json!({"id": "01ABC", "name": "Acme"});
        let rendered = render(&value, OutputFormat::Table).unwrap();
        assert!(rendered.contains("name: Acme"));
    }
}
