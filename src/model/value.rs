//! Native scalar produced by decoding one result cell.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Decoded scalar value of a table cell.
///
/// Covers the XSD scalars the decoder coerces to:
/// - Missing: Null (NaN stands in for missing numerics, stored as `Double(NaN)`)
/// - Numeric: Byte, Short, Int, Long, Float, Double
/// - Text: String (entity refs, language-tagged and plain literals)
/// - Temporal: DateTime, LocalDateTime, Date, Time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),

    // Temporal types
    DateTime(DateTime<Utc>),
    LocalDateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    /// Missing-value sentinel for numeric columns.
    pub const NAN: Value = Value::Double(f64::NAN);

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// NaN in either float width.
    pub fn is_nan(&self) -> bool {
        match self {
            Value::Float(f) => f.is_nan(),
            Value::Double(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Null or the NaN sentinel.
    pub fn is_missing(&self) -> bool { self.is_null() || self.is_nan() }

    /// Attempt to extract as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Byte(i) => Some(*i as i64),
            Value::Short(i) => Some(*i as i64),
            Value::Int(i) => Some(*i as i64),
            Value::Long(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempt to extract as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f as f64),
            Value::Double(f) => Some(*f),
            other => other.as_int().map(|i| i as f64),
        }
    }

    /// Attempt to extract as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i8> for Value { fn from(v: i8) -> Self { Value::Byte(v) } }
impl From<i16> for Value { fn from(v: i16) -> Self { Value::Short(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Long(v) } }
impl From<f32> for Value { fn from(v: f32) -> Self { Value::Float(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Double(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<NaiveDate> for Value { fn from(v: NaiveDate) -> Self { Value::Date(v) } }
impl From<NaiveTime> for Value { fn from(v: NaiveTime) -> Self { Value::Time(v) } }
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

// ============================================================================
// Display
// ============================================================================

/// Unquoted text form. Strings print as-is so generic columns round-trip.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Byte(i) => write!(f, "{i}"),
            Value::Short(i) => write!(f, "{i}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Long(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s}"),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::LocalDateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::Date(d) => write!(f, "{d}"),
            Value::Time(t) => write!(f, "{t}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from() {
        assert_eq!(Value::from("hello"), Value::String("hello".into()));
        assert_eq!(Value::from(42), Value::Int(42));
        assert_eq!(Value::from(42i64), Value::Long(42));
        assert_eq!(Value::from(2.5), Value::Double(2.5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }

    #[test]
    fn test_missing_sentinels() {
        assert!(Value::NAN.is_missing());
        assert!(Value::NAN.is_nan());
        assert!(Value::Null.is_missing());
        assert!(!Value::Double(0.0).is_missing());
        assert!(!Value::String(String::new()).is_missing());
        assert!(Value::Float(f32::NAN).is_missing());
        assert!(!Value::Float(f32::INFINITY).is_missing());
    }

    #[test]
    fn test_numeric_widening() {
        assert_eq!(Value::Byte(-3).as_int(), Some(-3));
        assert_eq!(Value::Short(7).as_float(), Some(7.0));
        assert_eq!(Value::Float(1.5).as_float(), Some(1.5));
        assert_eq!(Value::String("1".into()).as_int(), None);
    }

    #[test]
    fn test_display_is_unquoted() {
        assert_eq!(Value::from("<http://a>").to_string(), "<http://a>");
        assert_eq!(Value::Int(5).to_string(), "5");
        let d = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap();
        assert_eq!(Value::Date(d).to_string(), "2021-03-04");
    }
}
