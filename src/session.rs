//! Session handle for the Polars-backed engine.
//!
//! [`SessionBuilder::get_or_create`] installs a process-wide default session
//! on first use; every later call returns a handle sharing the same
//! underlying instance, which is what session-scoped fixtures rely on.

use crate::dataframe::DataFrame;
use crate::error::TestkitError;
use crate::row::{rows_to_columns, Row, Value};
use crate::schema::StructType;
use log::debug;
use polars::prelude::{Column, DataFrame as PlDataFrame};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static DEFAULT_SESSION: OnceLock<Session> = OnceLock::new();

/// Builder for creating a [`Session`] with configuration options.
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    app_name: Option<String>,
    config: HashMap<String, String>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        SessionBuilder::default()
    }

    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    pub fn config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Return the process-wide default session, creating it from this
    /// builder's options if none exists yet. Options are ignored when a
    /// default session was already installed.
    pub fn get_or_create(self) -> Session {
        DEFAULT_SESSION
            .get_or_init(|| {
                debug!(
                    "creating default session (app_name: {:?})",
                    self.app_name.as_deref()
                );
                Session {
                    inner: Arc::new(SessionInner {
                        app_name: self.app_name,
                        config: self.config,
                    }),
                }
            })
            .clone()
    }

    /// Create a fresh session that is not installed as the default.
    pub fn create(self) -> Session {
        Session {
            inner: Arc::new(SessionInner {
                app_name: self.app_name,
                config: self.config,
            }),
        }
    }
}

#[derive(Debug)]
struct SessionInner {
    app_name: Option<String>,
    config: HashMap<String, String>,
}

/// Shared entry point to the engine. Cloning is cheap; clones share one
/// underlying instance.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn app_name(&self) -> Option<&str> {
        self.inner.app_name.as_deref()
    }

    pub fn conf(&self, key: &str) -> Option<&str> {
        self.inner.config.get(key).map(String::as_str)
    }

    /// True if both handles share the same underlying session instance.
    pub fn same_session(&self, other: &Session) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Create a dataframe from literal rows, verifying every cell against the
    /// schema descriptor first (arity, nullability, type conformance).
    pub fn create_dataframe(
        &self,
        data: &[Row],
        schema: &StructType,
    ) -> Result<DataFrame, TestkitError> {
        verify_rows(data, schema)?;
        self.build(data, schema)
    }

    /// Create a dataframe without re-verifying the data against the schema;
    /// the caller asserts the data already conforms. Mismatches still surface
    /// as construction errors from the engine.
    pub fn create_dataframe_unchecked(
        &self,
        data: &[Row],
        schema: &StructType,
    ) -> Result<DataFrame, TestkitError> {
        self.build(data, schema)
    }

    fn build(&self, data: &[Row], schema: &StructType) -> Result<DataFrame, TestkitError> {
        let columns: Vec<Column> = rows_to_columns(data, schema)?
            .into_iter()
            .map(Column::from)
            .collect();
        let df = PlDataFrame::new(columns)?;
        Ok(DataFrame::from_polars(df))
    }
}

fn verify_rows(rows: &[Row], schema: &StructType) -> Result<(), TestkitError> {
    for (row_idx, row) in rows.iter().enumerate() {
        if row.len() != schema.len() {
            return Err(TestkitError::Schema(format!(
                "row {row_idx} has {} values but schema has {} fields",
                row.len(),
                schema.len()
            )));
        }
        for (field, value) in schema.fields().iter().zip(row.values()) {
            if matches!(value, Value::Null) {
                if !field.nullable {
                    return Err(TestkitError::Schema(format!(
                        "row {row_idx}: null in non-nullable field '{}'",
                        field.name
                    )));
                }
                continue;
            }
            if !value.conforms_to(&field.data_type) {
                return Err(TestkitError::Schema(format!(
                    "row {row_idx}: value {value:?} does not conform to field '{}' ({:?})",
                    field.name, field.data_type
                )));
            }
        }
    }
    Ok(())
}
