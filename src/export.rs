//! Table upload — serialize a table as a SPARQL `INSERT DATA` update.
//!
//! Every row becomes one blank node typed `<dataframe#row>` with one property
//! per column, replacing whatever the target graph held before.
//!
//! ```text
//! Table → write_insert_data() → DROP SILENT GRAPH + INSERT DATA
//!   → Session::upload_table() → endpoint
//! ```

use std::io::Write;

use crate::model::{ColumnType, Table, Value, XSD_NS};
use crate::Result;

/// Write the update script for `table` into graph `graph` (an IRI without brackets).
///
/// Missing cells (null or NaN) are omitted from their row.
pub fn write_insert_data(table: &Table, graph: &str, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "PREFIX xsd: <{XSD_NS}> ")?;
    writeln!(writer)?;
    writeln!(writer, "DROP SILENT GRAPH <{graph}> ;")?;
    writeln!(writer, "INSERT DATA {{ GRAPH <{graph}> {{")?;

    let predicates: Vec<String> = table
        .column_names()
        .map(|name| format!("<{}>", name.replace(' ', "")))
        .collect();

    for row in 0..table.num_rows() {
        write!(writer, "[ a <dataframe#row>")?;
        for (column, predicate) in table.columns().iter().zip(&predicates) {
            let value = &column.values[row];
            if value.is_missing() {
                continue;
            }
            write!(writer, "; {} {}", predicate, format_term(column.column_type, value))?;
        }
        writeln!(writer, " ].")?;
    }

    writeln!(writer, "}} }}")?;
    Ok(())
}

/// Convenience wrapper returning the update as a string.
pub fn insert_data_update(table: &Table, graph: &str) -> Result<String> {
    let mut buf = Vec::new();
    write_insert_data(table, graph, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Format a cell as an RDF term for its column type.
fn format_term(column_type: ColumnType, value: &Value) -> String {
    match column_type {
        ColumnType::Generic => quote(&value.to_string()),
        ColumnType::Float | ColumnType::Double | ColumnType::Decimal => match value.as_float() {
            Some(f) if f.is_infinite() => {
                let text = if f > 0.0 { "INF" } else { "-INF" };
                let xsd = column_type.xsd_name().unwrap_or("double");
                format!("\"{text}\"^^xsd:{xsd}")
            }
            _ => value.to_string(),
        },
        ColumnType::Byte
        | ColumnType::Short
        | ColumnType::Integer
        | ColumnType::Int
        | ColumnType::NonNegativeInteger
        | ColumnType::Long => value.to_string(),
        ColumnType::Boolean | ColumnType::DateTime | ColumnType::Date | ColumnType::Time => {
            let xsd = column_type.xsd_name().unwrap_or("string");
            format!("{}^^xsd:{xsd}", quote(&value.to_string()))
        }
    }
}

fn quote(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("\"{escaped}\"")
}
