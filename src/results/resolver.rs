//! Column type resolver: a whole result set → [`Table`].
//!
//! Two phases. Phase one decodes every cell and fixes each column's final type;
//! phase two materializes values under that final type only, so a demotion to
//! generic applies to every row of the column, including rows seen before it.

use tracing::debug;

use super::binding::decode;
use crate::model::{Cell, Column, ColumnType, ResultSet, Table, Value};
use crate::Result;

struct ColumnState<'a> {
    name: &'a str,
    declared: Option<ColumnType>,
    cells: Vec<(Cell<'a>, Value)>,
}

impl<'a> ColumnState<'a> {
    fn new(name: &'a str, rows: usize) -> Self {
        Self { name, declared: None, cells: Vec::with_capacity(rows) }
    }

    /// Unset adopts; a different type demotes to generic for good.
    fn observe(&mut self, column_type: ColumnType) {
        self.declared = match self.declared {
            None => Some(column_type),
            Some(current) if current == column_type => Some(current),
            Some(current) => {
                if !current.is_generic() {
                    debug!(column = self.name, from = ?current, to = ?column_type, "column demoted to generic");
                }
                Some(ColumnType::Generic)
            }
        };
    }

    fn finish(self) -> Column {
        let column_type = self.declared.unwrap_or(ColumnType::Generic);
        let values = self
            .cells
            .into_iter()
            .map(|(cell, value)| match cell.text() {
                None => column_type.missing(),
                Some(text) if column_type.is_generic() => Value::String(text),
                Some(_) => value,
            })
            .collect();
        Column::new(self.name, column_type, values)
    }
}

/// Build a typed table from a results document.
///
/// Columns follow `head.vars` order. Binding keys not declared in the header are ignored.
pub fn to_table(results: &ResultSet) -> Result<Table> {
    let rows = results.rows();
    let mut columns: Vec<ColumnState<'_>> = results
        .vars()
        .iter()
        .map(|name| ColumnState::new(name, rows.len()))
        .collect();

    for row in rows {
        for column in &mut columns {
            let cell = Cell::classify(row.get(column.name));
            let decoded = decode(cell, column.declared)?;
            if !cell.is_unbound() {
                column.observe(decoded.column_type);
            }
            column.cells.push((cell, decoded.value));
        }
    }

    let columns: Vec<Column> = columns.into_iter().map(ColumnState::finish).collect();
    debug!(rows = rows.len(), columns = columns.len(), "result set decoded");
    Table::new(columns, rows.len())
}
