//! Arrow bridge: [`Table`] → [`RecordBatch`].
//!
//! | Column type | Arrow type |
//! |-------------|------------|
//! | boolean | `Boolean` |
//! | byte / short | `Int8` / `Int16` |
//! | integer, int, nonNegativeInteger | `Int32` |
//! | long | `Int64` |
//! | float / double, decimal | `Float32` / `Float64` |
//! | dateTime | `Timestamp(µs)` |
//! | date / time | `Date32` / `Time64(µs)` |
//! | generic | `Utf8` |
//!
//! Missing cells (null and the NaN sentinel) become Arrow nulls.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Float32Array, Float64Array, Int16Array, Int32Array,
    Int64Array, Int8Array, StringArray, Time64MicrosecondArray, TimestampMicrosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use chrono::{Datelike, Timelike};

use crate::model::{Column, ColumnType, Table, Value};
use crate::Result;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub fn data_type(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::Boolean => DataType::Boolean,
        ColumnType::Byte => DataType::Int8,
        ColumnType::Short => DataType::Int16,
        ColumnType::Integer | ColumnType::Int | ColumnType::NonNegativeInteger => DataType::Int32,
        ColumnType::Long => DataType::Int64,
        ColumnType::Float => DataType::Float32,
        ColumnType::Double | ColumnType::Decimal => DataType::Float64,
        ColumnType::DateTime => DataType::Timestamp(TimeUnit::Microsecond, None),
        ColumnType::Date => DataType::Date32,
        ColumnType::Time => DataType::Time64(TimeUnit::Microsecond),
        ColumnType::Generic => DataType::Utf8,
    }
}

fn timestamp_micros(value: &Value) -> Option<i64> {
    match value {
        Value::DateTime(dt) => Some(dt.timestamp_micros()),
        Value::LocalDateTime(dt) => Some(dt.and_utc().timestamp_micros()),
        _ => None,
    }
}

fn array(column: &Column) -> ArrayRef {
    let values = &column.values;
    match column.column_type {
        ColumnType::Boolean => Arc::new(BooleanArray::from(
            values.iter().map(Value::as_bool).collect::<Vec<_>>(),
        )),
        ColumnType::Byte => Arc::new(Int8Array::from(
            values.iter().map(|v| match v { Value::Byte(i) => Some(*i), _ => None }).collect::<Vec<_>>(),
        )),
        ColumnType::Short => Arc::new(Int16Array::from(
            values.iter().map(|v| match v { Value::Short(i) => Some(*i), _ => None }).collect::<Vec<_>>(),
        )),
        ColumnType::Integer | ColumnType::Int | ColumnType::NonNegativeInteger => Arc::new(Int32Array::from(
            values.iter().map(|v| match v { Value::Int(i) => Some(*i), _ => None }).collect::<Vec<_>>(),
        )),
        ColumnType::Long => Arc::new(Int64Array::from(
            values.iter().map(|v| match v { Value::Long(i) => Some(*i), _ => None }).collect::<Vec<_>>(),
        )),
        ColumnType::Float => Arc::new(Float32Array::from(
            values
                .iter()
                .map(|v| match v {
                    Value::Float(f) if !f.is_nan() => Some(*f),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        ColumnType::Double | ColumnType::Decimal => Arc::new(Float64Array::from(
            values
                .iter()
                .map(|v| if v.is_missing() { None } else { v.as_float() })
                .collect::<Vec<_>>(),
        )),
        ColumnType::DateTime => Arc::new(TimestampMicrosecondArray::from(
            values.iter().map(timestamp_micros).collect::<Vec<_>>(),
        )),
        ColumnType::Date => Arc::new(Date32Array::from(
            values
                .iter()
                .map(|v| match v {
                    Value::Date(d) => Some(d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        ColumnType::Time => Arc::new(Time64MicrosecondArray::from(
            values
                .iter()
                .map(|v| match v {
                    Value::Time(t) => Some(
                        t.num_seconds_from_midnight() as i64 * 1_000_000 + (t.nanosecond() / 1_000) as i64,
                    ),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        ColumnType::Generic => Arc::new(StringArray::from(
            values
                .iter()
                .map(|v| if v.is_missing() { None } else { Some(v.to_string()) })
                .collect::<Vec<_>>(),
        )),
    }
}

/// Convert a table into a single record batch with one nullable field per column.
pub fn to_record_batch(table: &Table) -> Result<RecordBatch> {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .map(|c| Field::new(c.name.as_str(), data_type(c.column_type), true))
        .collect();
    let arrays: Vec<ArrayRef> = table.columns().iter().map(array).collect();
    let options = RecordBatchOptions::new().with_row_count(Some(table.num_rows()));
    Ok(RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), arrays, &options)?)
}
