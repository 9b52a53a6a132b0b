use serde_json::{Value, json};

use crate::models::record::{Record, Table};

const HEADER_ITEM: &str = "Item";
const HEADER_CATEGORY: &str = "Category";
const HEADER_UNITS: &str = "Units";
const HEADER_UNIT_COST: &str = "Unit Cost";
const HEADER_TOTAL: &str = "Total";
const HEADER_ADDED: &str = "Added";

struct HeaderMap {
    item: usize,
    category: usize,
    units: usize,
    unit_cost: usize,
    total: usize,
    added: usize,
}

/// Turns a v4 values response (`{"range": .., "values": [[..], ..]}`) into a
/// Table. The first row is the header; columns are located by header name so
/// the sheet's column order does not matter. A worksheet with no values key
/// (blank sheet) is an empty Table.
pub fn table_from_values(raw: &Value) -> Result<Table, String> {
    let grid = match raw.get("values").and_then(|v| v.as_array()) {
        Some(grid) => grid,
        None => return Ok(Table::default()),
    };

    let mut rows_iter = grid.iter();

    let headers = match rows_iter.next() {
        Some(first) => header_map(first)?,
        None => return Ok(Table::default()),
    };

    let mut rows: Vec<Record> = Vec::with_capacity(grid.len().saturating_sub(1));

    for (offset, row) in rows_iter.enumerate() {
        let row = row
            .as_array()
            .ok_or_else(|| format!("Row {} of the values grid is not an array.", offset + 2))?;

        if row.iter().all(is_blank_cell) {
            continue;
        }

        // +2: 1-based sheet rows, plus the header row
        let sheet_row = offset + 2;

        rows.push(Record {
            item: cell_text(row, headers.item),
            category: cell_text(row, headers.category),
            units: cell_number(row, headers.units)
                .map(|n| n.round() as u32)
                .ok_or_else(|| format!("Units in sheet row {} is not a number.", sheet_row))?,
            unit_cost: cell_number(row, headers.unit_cost)
                .ok_or_else(|| format!("Unit Cost in sheet row {} is not a number.", sheet_row))?,
            total: cell_number(row, headers.total)
                .ok_or_else(|| format!("Total in sheet row {} is not a number.", sheet_row))?,
            added: cell_text(row, headers.added),
        });
    }

    Ok(Table::new(rows))
}

/// The value grid for a whole-worksheet write: header row first, then one row
/// per record, numbers as JSON numbers.
pub fn values_from_table(table: &Table) -> Value {
    let mut grid: Vec<Value> = Vec::with_capacity(table.len() + 1);

    grid.push(json!([
        HEADER_ITEM,
        HEADER_CATEGORY,
        HEADER_UNITS,
        HEADER_UNIT_COST,
        HEADER_TOTAL,
        HEADER_ADDED
    ]));

    for record in &table.rows {
        grid.push(json!([
            record.item,
            record.category,
            record.units,
            record.unit_cost,
            record.total,
            record.added,
        ]));
    }

    Value::Array(grid)
}

fn header_map(first_row: &Value) -> Result<HeaderMap, String> {
    let cells = first_row
        .as_array()
        .ok_or_else(|| String::from("Header row of the values grid is not an array."))?;

    let find = |wanted: &str| -> Result<usize, String> {
        cells
            .iter()
            .position(|c| {
                c.as_str()
                    .map(|s| s.trim().eq_ignore_ascii_case(wanted))
                    .unwrap_or(false)
            })
            .ok_or_else(|| format!("Column {:?} not found in the worksheet header.", wanted))
    };

    Ok(HeaderMap {
        item: find(HEADER_ITEM)?,
        category: find(HEADER_CATEGORY)?,
        units: find(HEADER_UNITS)?,
        unit_cost: find(HEADER_UNIT_COST)?,
        total: find(HEADER_TOTAL)?,
        added: find(HEADER_ADDED)?,
    })
}

fn is_blank_cell(cell: &Value) -> bool {
    match cell {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

// Rows shorter than the header just read as empty cells.
fn cell_text(row: &[Value], idx: usize) -> String {
    match row.get(idx) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

// UNFORMATTED_VALUE gives real numbers, but sheets filled by hand often hold
// them as text, so both shapes parse.
fn cell_number(row: &[Value], idx: usize) -> Option<f64> {
    match row.get(idx) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }
}
