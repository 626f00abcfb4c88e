//! Internal-consistency checks for the shared fixtures: every dataset lines
//! up with its schema descriptor, the binary cast really re-types its column,
//! and the session fixture hands out one shared instance.

use frameguard_spark_testkit::fixtures::{
    config_params, sample_check_data, sample_complex_df, sample_data, sample_date_df,
    sample_schema, sample_string_binary_df, spark, spark_df,
};
use frameguard_spark_testkit::{DataType, Value};
use polars::prelude::{DataType as PlDataType, TimeUnit};
use std::sync::Arc;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn session_fixture_is_shared_across_requests() {
    init();
    let a = spark();
    let b = spark();
    assert!(a.same_session(&b));
}

#[test]
fn sample_data_matches_sample_schema() {
    init();
    let data = sample_data();
    let schema = sample_schema();
    assert_eq!(data.len(), 2);
    for row in data {
        assert_eq!(row.len(), schema.len());
        for (value, field) in row.values().iter().zip(schema.fields()) {
            assert!(
                value.conforms_to(&field.data_type),
                "{value:?} does not conform to field '{}'",
                field.name
            );
        }
    }
}

#[test]
fn sample_data_constructs_under_verification() {
    init();
    // The verified path re-checks what the fixtures assert by hand.
    let df = spark()
        .create_dataframe(sample_data(), sample_schema())
        .unwrap();
    assert_eq!(df.count().unwrap(), 2);
    assert_eq!(df.columns().unwrap(), vec!["product", "price"]);
}

#[test]
fn date_fixture_has_expected_shape_and_types() {
    init();
    let df = sample_date_df();
    assert_eq!(df.count().unwrap(), 2);
    assert_eq!(
        df.columns().unwrap(),
        vec![
            "purchase_date",
            "purchase_datetime",
            "expiry_time",
            "expected_time"
        ]
    );
    let collected = df.collect();
    assert_eq!(
        collected.column("purchase_date").unwrap().dtype(),
        &PlDataType::Date
    );
    assert_eq!(
        collected.column("purchase_datetime").unwrap().dtype(),
        &PlDataType::Datetime(TimeUnit::Microseconds, None)
    );
    assert_eq!(
        collected.column("expiry_time").unwrap().dtype(),
        &PlDataType::Duration(TimeUnit::Microseconds)
    );
    // The bounded interval column shares the unbounded one's physical type.
    assert_eq!(
        collected.column("expected_time").unwrap().dtype(),
        collected.column("expiry_time").unwrap().dtype()
    );
}

#[test]
fn binary_fixture_first_column_is_binary_after_cast() {
    init();
    let df = sample_string_binary_df();
    let collected = df.collect();
    let purchase_info = collected.column("purchase_info").unwrap();
    assert_eq!(purchase_info.dtype(), &PlDataType::Binary);
    assert_ne!(purchase_info.dtype(), &PlDataType::String);
    // The cast preserved the values byte-for-byte.
    let first = purchase_info
        .as_materialized_series()
        .binary()
        .unwrap()
        .get(0);
    assert_eq!(first, Some(b"test1".as_slice()));
    // The untouched column is still string-typed.
    assert_eq!(
        collected.column("product").unwrap().dtype(),
        &PlDataType::String
    );
}

#[test]
fn complex_fixture_keeps_nested_types() {
    init();
    let df = sample_complex_df();
    assert_eq!(df.count().unwrap(), 2);
    let schema = df.schema();
    assert_eq!(schema.len(), 3);
    assert!(matches!(schema.fields()[0].data_type, DataType::Date));
    let DataType::Array(ref inner) = schema.fields()[1].data_type else {
        panic!(
            "customer_details should be an array, got {:?}",
            schema.fields()[1].data_type
        );
    };
    assert!(matches!(**inner, DataType::Array(_)));
    assert!(matches!(
        schema.fields()[2].data_type,
        DataType::Map(_, _)
    ));
}

#[test]
fn check_data_pass_rows_meet_the_threshold() {
    init();
    let check = sample_check_data();
    let threshold = Value::Int(check.expression_threshold);
    assert!(check
        .pass_rows
        .iter()
        .all(|row| row.values()[1] == threshold));
    assert!(check
        .fail_rows
        .iter()
        .any(|row| row.values()[1] != threshold));
}

#[test]
fn dataframe_fixtures_are_cached_per_process() {
    init();
    let a = sample_date_df();
    let b = sample_date_df();
    assert!(Arc::ptr_eq(&a.collect(), &b.collect()));
}

#[test]
fn config_params_fixture_reads_the_spark_namespace() {
    init();
    let params = config_params();
    assert_eq!(params.namespace(), "spark");
    assert_eq!(params.resource(), "parameters.yaml");
    assert!(params.get_bool("validation_enabled").unwrap());
    assert_eq!(
        params.get_str("validation_depth").unwrap(),
        "SCHEMA_AND_DATA"
    );
}

#[test]
fn spark_df_helper_skips_schema_verification() {
    init();
    // A null in a non-nullable field would fail the verified path, but the
    // helper constructs without re-checking, as fixtures assert conformance.
    use frameguard_spark_testkit::{Row, StructField, StructType};
    let schema = StructType::new(vec![StructField::new("product", DataType::String, false)]);
    let df = spark_df(&spark(), &[Row::new(vec![Value::Null])], &schema);
    assert_eq!(df.count().unwrap(), 1);
}
