//! Typed columnar table built from a result set.

use serde::{Deserialize, Serialize};

use super::Value;

/// XSD namespace stripped from datatype URIs.
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

/// Column type tag.
///
/// One variant per recognised XSD short name, so `integer` and `int` are
/// distinct tags even though both decode to `i32`. Everything else is `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Boolean,
    Byte,
    Short,
    Integer,
    Int,
    NonNegativeInteger,
    Long,
    Float,
    Double,
    Decimal,
    DateTime,
    Date,
    Time,
    /// Opaque text: entity refs, tagged literals, plain literals, conflicts.
    Generic,
}

impl ColumnType {
    /// Look up a short XSD type name (`integer`, `dateTime`, ...).
    pub fn from_xsd(name: &str) -> Option<Self> {
        Some(match name {
            "boolean" => ColumnType::Boolean,
            "byte" => ColumnType::Byte,
            "short" => ColumnType::Short,
            "integer" => ColumnType::Integer,
            "int" => ColumnType::Int,
            "nonNegativeInteger" => ColumnType::NonNegativeInteger,
            "long" => ColumnType::Long,
            "float" => ColumnType::Float,
            "double" => ColumnType::Double,
            "decimal" => ColumnType::Decimal,
            "dateTime" => ColumnType::DateTime,
            "date" => ColumnType::Date,
            "time" => ColumnType::Time,
            _ => return None,
        })
    }

    pub fn xsd_name(&self) -> Option<&'static str> {
        Some(match self {
            ColumnType::Boolean => "boolean",
            ColumnType::Byte => "byte",
            ColumnType::Short => "short",
            ColumnType::Integer => "integer",
            ColumnType::Int => "int",
            ColumnType::NonNegativeInteger => "nonNegativeInteger",
            ColumnType::Long => "long",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::Decimal => "decimal",
            ColumnType::DateTime => "dateTime",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::Generic => return None,
        })
    }

    /// Types whose missing cells become NaN instead of null.
    ///
    /// `long` and `nonNegativeInteger` are deliberately absent: their missing cells stay null.
    pub fn is_nan_filled(&self) -> bool {
        matches!(
            self,
            ColumnType::Byte
                | ColumnType::Short
                | ColumnType::Int
                | ColumnType::Integer
                | ColumnType::Float
                | ColumnType::Double
                | ColumnType::Decimal
        )
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, ColumnType::Generic)
    }

    /// Missing-value sentinel for a column of this type.
    pub fn missing(&self) -> Value {
        if self.is_nan_filled() { Value::NAN } else { Value::Null }
    }
}

/// One named, typed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType, values: Vec<Value>) -> Self {
        Self { name: name.into(), column_type, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Row-aligned columns in result-header order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    num_rows: usize,
}

impl Table {
    /// Build a table. Every column must hold exactly `num_rows` values.
    pub fn new(columns: Vec<Column>, num_rows: usize) -> crate::Result<Self> {
        if let Some(bad) = columns.iter().find(|c| c.len() != num_rows) {
            return Err(crate::Error::UnexpectedResponse(format!(
                "column '{}' has {} values, expected {num_rows}",
                bad.name,
                bad.len()
            )));
        }
        Ok(Self { columns, num_rows })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`Table::column`] but a missing column is an error.
    pub fn require(&self, name: &str) -> crate::Result<&Column> {
        self.column(name)
            .ok_or_else(|| crate::Error::MissingColumn(name.to_owned()))
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column).and_then(|c| c.values.get(row))
    }
}
