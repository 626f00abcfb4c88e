//! Literal row values for fixture datasets.
//!
//! A [`Row`] is a fixed-arity tuple of [`Value`]s aligned positionally with a
//! [`StructType`](crate::schema::StructType). [`rows_to_columns`] transposes a
//! row-major literal dataset into Polars columns according to the schema.

use crate::error::TestkitError;
use crate::schema::{data_type_to_polars_type, DataType, StructType};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use polars::prelude::{IntoSeries, NamedFrom, Series, StructChunked};

/// A single literal cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Str(String),
    Int(i32),
    Long(i64),
    Double(f64),
    Boolean(bool),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Interval(TimeDelta),
    Binary(Vec<u8>),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// True if this value's runtime type is compatible with `data_type`,
    /// recursing through array elements and map entries. `Null` is
    /// type-compatible with everything; nullability is checked separately.
    pub fn conforms_to(&self, data_type: &DataType) -> bool {
        match (self, data_type) {
            (Value::Null, _) => true,
            (Value::Str(_), DataType::String) => true,
            (Value::Int(_), DataType::Integer) => true,
            // Integral literals widen to Long and Double.
            (Value::Long(_) | Value::Int(_), DataType::Long) => true,
            (Value::Double(_) | Value::Long(_) | Value::Int(_), DataType::Double) => true,
            (Value::Boolean(_), DataType::Boolean) => true,
            (Value::Date(_), DataType::Date) => true,
            (Value::Timestamp(_), DataType::Timestamp) => true,
            (Value::Interval(_), DataType::DayTimeInterval(_, _)) => true,
            (Value::Binary(_), DataType::Binary) => true,
            (Value::Array(items), DataType::Array(inner)) => {
                items.iter().all(|v| v.conforms_to(inner))
            }
            (Value::Map(entries), DataType::Map(key, value)) => entries
                .iter()
                .all(|(k, v)| k.conforms_to(key) && v.conforms_to(value)),
            _ => false,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Str(_) => "string",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Double(_) => "double",
            Value::Boolean(_) => "boolean",
            Value::Date(_) => "date",
            Value::Timestamp(_) => "timestamp",
            Value::Interval(_) => "interval",
            Value::Binary(_) => "binary",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<TimeDelta> for Value {
    fn from(v: TimeDelta) -> Self {
        Value::Interval(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(v)
    }
}

/// A fixed-arity tuple of values, one dataset row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Row(values)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build a row from literals: `row!["Bread", 9]`.
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        $crate::row::Row::new(vec![$($crate::row::Value::from($value)),*])
    };
}

/// Transpose row-major literals into one Polars `Series` per schema field.
///
/// Cell values that cannot be converted to the field's physical dtype produce
/// a construction error; no type verification beyond that happens here.
pub fn rows_to_columns(rows: &[Row], schema: &StructType) -> Result<Vec<Series>, TestkitError> {
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != schema.len() {
            return Err(TestkitError::Schema(format!(
                "row {idx} has {} values but schema has {} fields",
                row.len(),
                schema.len()
            )));
        }
    }
    schema
        .fields()
        .iter()
        .enumerate()
        .map(|(pos, field)| {
            let cells: Vec<&Value> = rows.iter().map(|r| &r.values()[pos]).collect();
            build_series(&field.name, &field.data_type, &cells)
        })
        .collect()
}

fn build_series(
    name: &str,
    data_type: &DataType,
    cells: &[&Value],
) -> Result<Series, TestkitError> {
    let series = match data_type {
        DataType::String => {
            let vals: Vec<Option<&str>> = cells
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Str(s) => Ok(Some(s.as_str())),
                    other => Err(mismatch(name, "string", other)),
                })
                .collect::<Result<_, _>>()?;
            Series::new(name.into(), vals)
        }
        DataType::Integer => {
            let vals: Vec<Option<i32>> = cells
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Int(i) => Ok(Some(*i)),
                    other => Err(mismatch(name, "int", other)),
                })
                .collect::<Result<_, _>>()?;
            Series::new(name.into(), vals)
        }
        DataType::Long => {
            let vals: Vec<Option<i64>> = cells
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Long(i) => Ok(Some(*i)),
                    Value::Int(i) => Ok(Some(i64::from(*i))),
                    other => Err(mismatch(name, "long", other)),
                })
                .collect::<Result<_, _>>()?;
            Series::new(name.into(), vals)
        }
        DataType::Double => {
            let vals: Vec<Option<f64>> = cells
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Double(x) => Ok(Some(*x)),
                    Value::Long(i) => Ok(Some(*i as f64)),
                    Value::Int(i) => Ok(Some(f64::from(*i))),
                    other => Err(mismatch(name, "double", other)),
                })
                .collect::<Result<_, _>>()?;
            Series::new(name.into(), vals)
        }
        DataType::Boolean => {
            let vals: Vec<Option<bool>> = cells
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Boolean(b) => Ok(Some(*b)),
                    other => Err(mismatch(name, "boolean", other)),
                })
                .collect::<Result<_, _>>()?;
            Series::new(name.into(), vals)
        }
        DataType::Date => {
            let epoch = NaiveDate::default();
            let vals: Vec<Option<i32>> = cells
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Date(d) => Ok(Some((*d - epoch).num_days() as i32)),
                    other => Err(mismatch(name, "date", other)),
                })
                .collect::<Result<_, _>>()?;
            Series::new(name.into(), vals)
                .cast(&data_type_to_polars_type(data_type))?
        }
        DataType::Timestamp => {
            let vals: Vec<Option<i64>> = cells
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Timestamp(ts) => Ok(Some(ts.and_utc().timestamp_micros())),
                    other => Err(mismatch(name, "timestamp", other)),
                })
                .collect::<Result<_, _>>()?;
            Series::new(name.into(), vals)
                .cast(&data_type_to_polars_type(data_type))?
        }
        DataType::DayTimeInterval(_, _) => {
            let vals: Vec<Option<i64>> = cells
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Interval(td) => td.num_microseconds().map(Some).ok_or_else(|| {
                        TestkitError::Schema(format!(
                            "column '{name}': interval overflows microseconds"
                        ))
                    }),
                    other => Err(mismatch(name, "interval", other)),
                })
                .collect::<Result<_, _>>()?;
            Series::new(name.into(), vals)
                .cast(&data_type_to_polars_type(data_type))?
        }
        DataType::Binary => {
            let vals: Vec<Option<&[u8]>> = cells
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Binary(b) => Ok(Some(b.as_slice())),
                    other => Err(mismatch(name, "binary", other)),
                })
                .collect::<Result<_, _>>()?;
            Series::new(name.into(), vals)
        }
        DataType::Array(inner) => {
            let vals: Vec<Option<Series>> = cells
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Array(items) => {
                        let refs: Vec<&Value> = items.iter().collect();
                        build_series("item", inner, &refs).map(Some)
                    }
                    other => Err(mismatch(name, "array", other)),
                })
                .collect::<Result<_, _>>()?;
            Series::new(name.into(), vals)
        }
        DataType::Map(key, value) => {
            let vals: Vec<Option<Series>> = cells
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Map(entries) => map_entries_series(key, value, entries).map(Some),
                    other => Err(mismatch(name, "map", other)),
                })
                .collect::<Result<_, _>>()?;
            Series::new(name.into(), vals)
        }
        DataType::Struct(_) => {
            return Err(TestkitError::Schema(format!(
                "column '{name}': struct literals are not supported in fixture rows"
            )));
        }
    };
    Ok(series)
}

/// One row's map cell as a series of `{key, value}` structs.
fn map_entries_series(
    key_type: &DataType,
    value_type: &DataType,
    entries: &[(Value, Value)],
) -> Result<Series, TestkitError> {
    let keys: Vec<&Value> = entries.iter().map(|(k, _)| k).collect();
    let values: Vec<&Value> = entries.iter().map(|(_, v)| v).collect();
    let key_series = build_series("key", key_type, &keys)?;
    let value_series = build_series("value", value_type, &values)?;
    let fields = [key_series, value_series];
    let entries = StructChunked::from_series("entries".into(), entries.len(), fields.iter())?;
    Ok(entries.into_series())
}

fn mismatch(column: &str, expected: &str, got: &Value) -> TestkitError {
    TestkitError::Schema(format!(
        "column '{column}': expected {expected} value, got {}",
        got.type_name()
    ))
}
