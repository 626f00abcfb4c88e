//! Row-literal dataframe construction through the session helper: verified
//! and unchecked paths, and how mismatches surface.

use frameguard_spark_testkit::{
    row, DataType, Row, Session, StructField, StructType, TestkitError, Value,
};
use polars::prelude::DataType as PlDataType;

fn spark() -> Session {
    Session::builder()
        .app_name("construction_tests")
        .get_or_create()
}

fn product_schema() -> StructType {
    StructType::new(vec![
        StructField::new("product", DataType::String, true),
        StructField::new("price", DataType::Integer, true),
    ])
}

#[test]
fn verified_construction_round_trips_schema() {
    let df = spark()
        .create_dataframe(&[row!["Bread", 9], row!["Butter", 15]], &product_schema())
        .unwrap();
    let schema = df.schema();
    assert_eq!(schema.len(), 2);
    assert!(matches!(schema.fields()[0].data_type, DataType::String));
    assert!(matches!(schema.fields()[1].data_type, DataType::Integer));
}

#[test]
fn verified_construction_rejects_arity_mismatch() {
    let err = spark()
        .create_dataframe(&[row!["Bread", 9, true]], &product_schema())
        .unwrap_err();
    assert!(matches!(err, TestkitError::Schema(_)));
    assert!(err.to_string().contains("3 values"));
}

#[test]
fn verified_construction_rejects_type_mismatch() {
    let err = spark()
        .create_dataframe(&[row![9, "Bread"]], &product_schema())
        .unwrap_err();
    assert!(matches!(err, TestkitError::Schema(_)));
}

#[test]
fn unchecked_construction_defers_mismatches_to_the_engine() {
    // Arity still fails (columns cannot be built), but it surfaces from the
    // construction layer rather than the verification pass.
    let err = spark()
        .create_dataframe_unchecked(&[row!["Bread"]], &product_schema())
        .unwrap_err();
    assert!(matches!(err, TestkitError::Schema(_)));
}

#[test]
fn empty_dataset_builds_empty_typed_columns() {
    let df = spark()
        .create_dataframe(&[], &product_schema())
        .unwrap();
    assert_eq!(df.count().unwrap(), 0);
    let collected = df.collect();
    assert_eq!(
        collected.column("price").unwrap().dtype(),
        &PlDataType::Int32
    );
}

#[test]
fn nullable_fields_accept_nulls_under_verification() {
    let df = spark()
        .create_dataframe(
            &[Row::new(vec![Value::Null, Value::Int(9)])],
            &product_schema(),
        )
        .unwrap();
    assert_eq!(df.collect().column("product").unwrap().null_count(), 1);
}

#[test]
fn integral_literals_widen_to_long() {
    let schema = StructType::new(vec![StructField::new("price", DataType::Long, true)]);
    let df = spark().create_dataframe(&[row![15]], &schema).unwrap();
    assert_eq!(
        df.collect().column("price").unwrap().dtype(),
        &PlDataType::Int64
    );
}
