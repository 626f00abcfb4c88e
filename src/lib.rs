//! Test support for the frameguard Spark-style Polars backend.
//!
//! This crate supplies the session-scoped fixtures shared by the backend's
//! test suite (sample datasets, schema descriptors, a configuration
//! accessor) together with the small engine surface they need: a session
//! with a process-wide default, Spark-style schema descriptors mapped onto
//! Polars dtypes, and row-literal dataframe construction.

pub mod config;
pub mod dataframe;
pub mod error;
pub mod fixtures;
pub mod row;
pub mod schema;
pub mod session;

pub use config::ConfigParams;
pub use dataframe::DataFrame;
pub use error::TestkitError;
pub use row::{Row, Value};
pub use schema::{DataType, IntervalField, StructField, StructType};
pub use session::{Session, SessionBuilder};
