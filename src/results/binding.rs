//! Binding decoder: one result cell → (column type, native value).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::model::{Cell, ColumnType, Value, XSD_NS};
use crate::{Error, Result};

/// Outcome of decoding one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub column_type: ColumnType,
    pub value: Value,
}

impl Decoded {
    fn generic(text: String) -> Self {
        Self { column_type: ColumnType::Generic, value: Value::String(text) }
    }
}

/// Decode a cell.
///
/// `declared` is the column's type so far; it only matters for unbound cells,
/// which take the column's missing-value sentinel.
pub fn decode(cell: Cell<'_>, declared: Option<ColumnType>) -> Result<Decoded> {
    match cell {
        Cell::Unbound => {
            let column_type = declared.unwrap_or(ColumnType::Generic);
            Ok(Decoded { column_type, value: column_type.missing() })
        }
        Cell::EntityRef(v) => Ok(Decoded::generic(format!("<{v}>"))),
        Cell::LangLiteral { value, lang } => Ok(Decoded::generic(format!("\"{value}\"@{lang}"))),
        Cell::TypedLiteral { value, datatype } => {
            let name = short_type_name(datatype)?;
            match ColumnType::from_xsd(name) {
                Some(column_type) => Ok(Decoded { column_type, value: coerce(column_type, value)? }),
                None => Ok(Decoded::generic(value.to_owned())),
            }
        }
        Cell::PlainLiteral(v) => Ok(Decoded::generic(v.to_owned())),
    }
}

/// Strip the XSD namespace. Datatypes outside it are returned whole.
fn short_type_name(datatype: &str) -> Result<&str> {
    let name = datatype.strip_prefix(XSD_NS).unwrap_or(datatype);
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(Error::MalformedLiteral {
            datatype: datatype.to_owned(),
            value: String::new(),
        });
    }
    Ok(name)
}

/// Coerce literal text to the native representation of a scalar column type.
pub fn coerce(column_type: ColumnType, text: &str) -> Result<Value> {
    let malformed = || Error::MalformedLiteral {
        datatype: column_type.xsd_name().unwrap_or("string").to_owned(),
        value: text.to_owned(),
    };
    let t = text.trim();
    let value = match column_type {
        ColumnType::Boolean => Value::Bool(text == "true"),
        ColumnType::Byte => Value::Byte(t.parse().map_err(|_| malformed())?),
        ColumnType::Short => Value::Short(t.parse().map_err(|_| malformed())?),
        ColumnType::Integer | ColumnType::Int | ColumnType::NonNegativeInteger => {
            Value::Int(t.parse().map_err(|_| malformed())?)
        }
        ColumnType::Long => Value::Long(t.parse().map_err(|_| malformed())?),
        ColumnType::Float => Value::Float(t.parse().map_err(|_| malformed())?),
        ColumnType::Double | ColumnType::Decimal => Value::Double(t.parse().map_err(|_| malformed())?),
        ColumnType::DateTime => parse_datetime(t).ok_or_else(malformed)?,
        ColumnType::Date => {
            let (date, _) = split_offset(t, 10).ok_or_else(malformed)?;
            Value::Date(NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| malformed())?)
        }
        ColumnType::Time => {
            let (time, _) = split_offset(t, 8).ok_or_else(malformed)?;
            Value::Time(NaiveTime::parse_from_str(time, "%H:%M:%S%.f").map_err(|_| malformed())?)
        }
        ColumnType::Generic => Value::String(text.to_owned()),
    };
    Ok(value)
}

/// Split an optional `Z` or `±hh:mm` suffix off a date or time lexical form.
///
/// The offset can only start at or after `min_len`, so the `-` separators
/// inside a date are never taken for one. The wall-clock part is kept as-is.
fn split_offset(text: &str, min_len: usize) -> Option<(&str, Option<&str>)> {
    if let Some(rest) = text.strip_suffix('Z') {
        return Some((rest, Some("Z")));
    }
    let Some(pos) = text.rfind(['+', '-']).filter(|&p| p >= min_len) else {
        return Some((text, None));
    };
    let offset = &text[pos..];
    let b = offset.as_bytes();
    let valid = b.len() == 6
        && b[3] == b':'
        && [1, 2, 4, 5].iter().all(|&i| b[i].is_ascii_digit());
    valid.then(|| (&text[..pos], Some(offset)))
}

/// Offset-bearing timestamps normalise to UTC; bare ones stay local.
fn parse_datetime(text: &str) -> Option<Value> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(Value::DateTime(dt.with_timezone(&Utc)));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(Value::LocalDateTime)
}
