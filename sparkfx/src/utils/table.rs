//! Table formatting utilities

use prettytable::{Cell, Row, Table};

/// Create a table with headers
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).style_spec("b"))
        .collect();
    table.set_titles(Row::new(header_cells));

    table
}

/// Add a two-column property row to a table
pub fn add_property_row<V: ToString>(table: &mut Table, property: &str, value: V) {
    table.add_row(Row::new(vec![
        Cell::new(property),
        Cell::new(&value.to_string()),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_table() {
        let mut table = create_table(&["Property", "Value"]);
        add_property_row(&mut table, "Max particles", 250);
        add_property_row(&mut table, "Motion", "radial");

        assert_eq!(table.len(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("Max particles"));
        assert!(rendered.contains("radial"));
    }
}
