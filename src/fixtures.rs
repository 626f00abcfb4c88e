//! Session-scoped fixtures for backend tests.
//!
//! Every fixture is built lazily on first request and cached for the life of
//! the process. Construction failures panic, which the test runner reports as
//! a setup failure; fixtures do no error handling of their own.

use crate::config::ConfigParams;
use crate::dataframe::DataFrame;
use crate::row;
use crate::row::{Row, Value};
use crate::schema::{DataType, IntervalField, StructField, StructType};
use crate::session::Session;
use chrono::{NaiveDate, TimeDelta};
use log::debug;
use std::sync::OnceLock;

/// Shared session handle. Repeated calls return handles to the same
/// underlying session instance.
pub fn spark() -> Session {
    Session::builder().app_name("frameguard_spark_tests").get_or_create()
}

/// Sample product/price data.
pub fn sample_data() -> &'static [Row] {
    static DATA: OnceLock<Vec<Row>> = OnceLock::new();
    DATA.get_or_init(|| vec![row!["Bread", 9], row!["Butter", 15]])
}

/// Schema for [`sample_data`].
pub fn sample_schema() -> &'static StructType {
    static SCHEMA: OnceLock<StructType> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        StructType::new(vec![
            StructField::new("product", DataType::String, true),
            StructField::new("price", DataType::Integer, true),
        ])
    })
}

/// Create a dataframe for testing. Schema re-verification is disabled; the
/// fixture data is asserted to conform already.
pub fn spark_df(spark: &Session, data: &[Row], schema: &StructType) -> DataFrame {
    spark
        .create_dataframe_unchecked(data, schema)
        .expect("fixture dataframe construction")
}

/// Dataframe with date, timestamp, and day-time interval columns.
pub fn sample_date_df() -> DataFrame {
    static DF: OnceLock<DataFrame> = OnceLock::new();
    DF.get_or_init(|| {
        debug!("building date/interval fixture");
        let data = vec![
            row![
                date(2022, 10, 1),
                date(2022, 10, 1).and_hms_opt(5, 32, 0).expect("valid time"),
                TimeDelta::days(45),
                TimeDelta::days(45),
            ],
            row![
                date(2022, 11, 5),
                date(2022, 11, 5).and_hms_opt(15, 34, 0).expect("valid time"),
                TimeDelta::days(30),
                TimeDelta::days(45),
            ],
        ];
        let schema = StructType::new(vec![
            StructField::new("purchase_date", DataType::Date, false),
            StructField::new("purchase_datetime", DataType::Timestamp, false),
            StructField::new("expiry_time", DataType::DayTimeInterval(None, None), false),
            StructField::new(
                "expected_time",
                DataType::DayTimeInterval(
                    Some(IntervalField::Minute),
                    Some(IntervalField::Second),
                ),
                false,
            ),
        ]);
        spark_df(&spark(), &data, &schema)
    })
    .clone()
}

/// Dataframe whose first column is built as string data and then cast to
/// binary.
pub fn sample_string_binary_df() -> DataFrame {
    static DF: OnceLock<DataFrame> = OnceLock::new();
    DF.get_or_init(|| {
        debug!("building string/binary fixture");
        let data = vec![row!["test1", "Bread"], row!["test2", "Butter"]];
        let schema = StructType::new(vec![
            StructField::new("purchase_info", DataType::String, false),
            StructField::new("product", DataType::String, false),
        ]);
        spark_df(&spark(), &data, &schema)
            .cast_column("purchase_info", &DataType::Binary)
            .expect("cast purchase_info to binary")
    })
    .clone()
}

/// Dataframe with a date, a nested array, and a map column.
pub fn sample_complex_df() -> DataFrame {
    static DF: OnceLock<DataFrame> = OnceLock::new();
    DF.get_or_init(|| {
        debug!("building complex-data fixture");
        let data = vec![
            Row::new(vec![
                Value::Date(date(2022, 10, 1)),
                Value::Array(vec![
                    Value::Array(vec![Value::from("josh")]),
                    Value::Array(vec![Value::from("27")]),
                ]),
                Value::Map(vec![(Value::from("product_bought"), Value::from("bread"))]),
            ]),
            Row::new(vec![
                Value::Date(date(2022, 11, 5)),
                Value::Array(vec![
                    Value::Array(vec![Value::from("Adam")]),
                    Value::Array(vec![Value::from("22")]),
                ]),
                Value::Map(vec![(Value::from("product_bought"), Value::from("bread"))]),
            ]),
        ];
        let schema = StructType::new(vec![
            StructField::new("purchase_date", DataType::Date, false),
            StructField::new(
                "customer_details",
                DataType::Array(Box::new(DataType::Array(Box::new(DataType::String)))),
                false,
            ),
            StructField::new(
                "product_details",
                DataType::Map(Box::new(DataType::String), Box::new(DataType::String)),
                false,
            ),
        ]);
        spark_df(&spark(), &data, &schema)
    })
    .clone()
}

/// Sample data for check tests: a dataset every row of which meets the
/// expression threshold, one that does not, and the threshold itself.
#[derive(Debug, Clone)]
pub struct CheckData {
    pub pass_rows: Vec<Row>,
    pub fail_rows: Vec<Row>,
    pub expression_threshold: i32,
}

pub fn sample_check_data() -> &'static CheckData {
    static DATA: OnceLock<CheckData> = OnceLock::new();
    DATA.get_or_init(|| CheckData {
        pass_rows: vec![row!["foo", 30], row!["bar", 30]],
        fail_rows: vec![row!["foo", 30], row!["bar", 31]],
        expression_threshold: 30,
    })
}

/// Configuration handle for backend test parameters.
pub fn config_params() -> &'static ConfigParams {
    static PARAMS: OnceLock<ConfigParams> = OnceLock::new();
    PARAMS.get_or_init(|| ConfigParams::new("spark", "parameters.yaml"))
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}
