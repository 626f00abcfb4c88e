//! Spark-style schema descriptors and their Polars mapping.
//!
//! A [`StructType`] is an ordered list of [`StructField`]s (name, type,
//! nullability). Fixture datasets are paired positionally with one of these.

use polars::prelude::{DataType as PlDataType, Field, Schema, TimeUnit};
use serde::{Deserialize, Serialize};

/// Bound of a day-time interval (start/end precision of the original
/// engine's `DayTimeIntervalType(startField, endField)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalField {
    Day,
    Hour,
    Minute,
    Second,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataType {
    String,
    Integer,
    Long,
    Double,
    Boolean,
    Date,
    Timestamp,
    Binary,
    /// Day-time interval, optionally bounded to a start/end field.
    /// `DayTimeInterval(None, None)` covers the full day-to-second range.
    DayTimeInterval(Option<IntervalField>, Option<IntervalField>),
    Array(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
    Struct(Vec<StructField>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl StructField {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        StructField {
            name: name.into(),
            data_type,
            nullable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructType {
    fields: Vec<StructField>,
}

impl StructType {
    pub fn new(fields: Vec<StructField>) -> Self {
        StructType { fields }
    }

    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn from_polars_schema(schema: &Schema) -> Self {
        let fields = schema
            .iter()
            .map(|(name, dtype)| StructField {
                name: name.to_string(),
                data_type: polars_type_to_data_type(dtype),
                // Polars doesn't expose nullability in the same way.
                nullable: true,
            })
            .collect();
        StructType { fields }
    }

    pub fn to_polars_schema(&self) -> Schema {
        let fields: Vec<Field> = self
            .fields
            .iter()
            .map(|f| {
                Field::new(
                    f.name.as_str().into(),
                    data_type_to_polars_type(&f.data_type),
                )
            })
            .collect();
        Schema::from_iter(fields)
    }

    /// Serialize the schema to a JSON string (array of field objects with
    /// name, data_type, nullable).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize the schema to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub(crate) fn polars_type_to_data_type(polars_type: &PlDataType) -> DataType {
    match polars_type {
        PlDataType::String => DataType::String,
        PlDataType::Int32 => DataType::Integer,
        PlDataType::Int64 => DataType::Long,
        // Map both Float32 and Float64 to Double for schema parity.
        PlDataType::Float32 | PlDataType::Float64 => DataType::Double,
        PlDataType::Boolean => DataType::Boolean,
        PlDataType::Date => DataType::Date,
        PlDataType::Datetime(_, _) => DataType::Timestamp,
        PlDataType::Duration(_) => DataType::DayTimeInterval(None, None),
        PlDataType::Binary => DataType::Binary,
        PlDataType::List(inner) => match map_entry_types(inner) {
            // List(Struct{key, value}) is the physical encoding of a map.
            Some((key, value)) => DataType::Map(Box::new(key), Box::new(value)),
            None => DataType::Array(Box::new(polars_type_to_data_type(inner))),
        },
        PlDataType::Struct(fields) => DataType::Struct(
            fields
                .iter()
                .map(|f| {
                    StructField::new(
                        f.name().to_string(),
                        polars_type_to_data_type(f.dtype()),
                        true,
                    )
                })
                .collect(),
        ),
        _ => DataType::String, // Default fallback
    }
}

pub(crate) fn data_type_to_polars_type(data_type: &DataType) -> PlDataType {
    match data_type {
        DataType::String => PlDataType::String,
        DataType::Integer => PlDataType::Int32,
        DataType::Long => PlDataType::Int64,
        DataType::Double => PlDataType::Float64,
        DataType::Boolean => PlDataType::Boolean,
        DataType::Date => PlDataType::Date,
        DataType::Timestamp => PlDataType::Datetime(TimeUnit::Microseconds, None),
        // Precision bounds are descriptor-only; physically a microsecond duration.
        DataType::DayTimeInterval(_, _) => PlDataType::Duration(TimeUnit::Microseconds),
        DataType::Binary => PlDataType::Binary,
        DataType::Array(inner) => PlDataType::List(Box::new(data_type_to_polars_type(inner))),
        DataType::Map(key, value) => PlDataType::List(Box::new(PlDataType::Struct(vec![
            Field::new("key".into(), data_type_to_polars_type(key)),
            Field::new("value".into(), data_type_to_polars_type(value)),
        ]))),
        DataType::Struct(fields) => PlDataType::Struct(
            fields
                .iter()
                .map(|f| {
                    Field::new(
                        f.name.as_str().into(),
                        data_type_to_polars_type(&f.data_type),
                    )
                })
                .collect(),
        ),
    }
}

/// If `inner` is the `Struct{key, value}` shape used to encode maps, return
/// the (key, value) descriptor types.
fn map_entry_types(inner: &PlDataType) -> Option<(DataType, DataType)> {
    let PlDataType::Struct(fields) = inner else {
        return None;
    };
    if fields.len() != 2
        || fields[0].name().as_str() != "key"
        || fields[1].name().as_str() != "value"
    {
        return None;
    }
    Some((
        polars_type_to_data_type(fields[0].dtype()),
        polars_type_to_data_type(fields[1].dtype()),
    ))
}
