//! Terminal rendering for tabular reply payloads.
//!
//! Column set comes from the first row; rows are heterogeneous, so missing
//! cells render empty. Weather tables get their numbers formatted to two
//! decimals; everything else renders as received.

use comfy_table::{Cell, ContentArrangement, Table, presets};
use console::style;
use serde_json::Value;

use tourmate_types::chat::Row;
use tourmate_types::table::TableKind;

/// Render a table payload (with its title) to the terminal.
pub fn print_table(rows: &[Row], insights: Option<&str>) {
    if rows.is_empty() {
        return;
    }

    let kind = TableKind::classify(rows);
    println!();
    println!("  {}", style(kind.title()).bold());
    println!("{}", build_table(rows, kind));

    if let Some(insights) = insights {
        println!();
        println!("  {}", style("Key Insights").bold().blue());
        println!("  {insights}");
    }
    println!();
}

/// Build the comfy-table for a payload.
fn build_table(rows: &[Row], kind: TableKind) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let columns: Vec<String> = rows[0].keys().cloned().collect();
    table.set_header(
        columns
            .iter()
            .map(|column| Cell::new(column.replace('_', " "))),
    );

    for row in rows {
        table.add_row(
            columns
                .iter()
                .map(|column| Cell::new(row.get(column).map_or(String::new(), |v| format_cell(v, kind)))),
        );
    }

    table
}

/// Format one cell value for display.
fn format_cell(value: &Value, kind: TableKind) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if kind == TableKind::Weather {
                n.as_f64()
                    .map(|f| format!("{f:.2}"))
                    .unwrap_or_else(|| n.to_string())
            } else {
                n.to_string()
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather_row() -> Row {
        let mut row = Row::new();
        row.insert(
            "Weather_Description".to_string(),
            Value::String("Partly cloudy".to_string()),
        );
        row.insert(
            "Temperature".to_string(),
            Value::Number(serde_json::Number::from_f64(29.456).unwrap()),
        );
        row
    }

    #[test]
    fn test_weather_numbers_render_with_two_decimals() {
        let row = weather_row();
        let value = row.get("Temperature").unwrap();
        assert_eq!(format_cell(value, TableKind::Weather), "29.46");
    }

    #[test]
    fn test_non_weather_numbers_render_as_is() {
        let value = Value::Number(serde_json::Number::from(42));
        assert_eq!(format_cell(&value, TableKind::Generic), "42");
    }

    #[test]
    fn test_missing_cells_render_empty() {
        let full = weather_row();
        let mut sparse = Row::new();
        sparse.insert(
            "Weather_Description".to_string(),
            Value::String("Sunny".to_string()),
        );

        let table = build_table(&[full, sparse], TableKind::Weather);
        let rendered = table.to_string();
        assert!(rendered.contains("Partly cloudy"));
        assert!(rendered.contains("Sunny"));
        // Header uses spaces, not underscores.
        assert!(rendered.contains("Weather Description"));
    }
}
