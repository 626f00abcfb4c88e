//! Thin wrapper around an eager Polars `DataFrame`.

use crate::error::TestkitError;
use crate::schema::{data_type_to_polars_type, DataType, StructType};
use polars::prelude::{Column, DataFrame as PlDataFrame};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DataFrame {
    df: Arc<PlDataFrame>,
}

impl DataFrame {
    pub fn from_polars(df: PlDataFrame) -> Self {
        DataFrame { df: Arc::new(df) }
    }

    /// Get the schema of the DataFrame.
    pub fn schema(&self) -> StructType {
        StructType::from_polars_schema(self.df.schema())
    }

    /// Get column names.
    pub fn columns(&self) -> Result<Vec<String>, TestkitError> {
        Ok(self
            .df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect())
    }

    /// Count the number of rows.
    pub fn count(&self) -> Result<usize, TestkitError> {
        Ok(self.df.height())
    }

    /// The underlying Polars frame.
    pub fn collect(&self) -> Arc<PlDataFrame> {
        self.df.clone()
    }

    /// First n rows as a new DataFrame.
    pub fn head(&self, n: usize) -> DataFrame {
        DataFrame::from_polars(self.df.head(Some(n)))
    }

    /// Re-type an existing column, returning a new DataFrame. Used by
    /// fixtures that build a column as one type and cast it afterwards
    /// (string to binary).
    pub fn cast_column(&self, name: &str, data_type: &DataType) -> Result<DataFrame, TestkitError> {
        let resolved = self.resolve_column_name(name)?;
        let target = data_type_to_polars_type(data_type);
        let columns: Vec<Column> = self
            .df
            .get_columns()
            .iter()
            .map(|c| {
                if c.name().as_str() == resolved {
                    c.cast(&target)
                } else {
                    Ok(c.clone())
                }
            })
            .collect::<Result<_, _>>()?;
        Ok(DataFrame::from_polars(PlDataFrame::new(columns)?))
    }

    fn resolve_column_name(&self, name: &str) -> Result<String, TestkitError> {
        let names = self.df.get_column_names();
        if names.iter().any(|n| n.as_str() == name) {
            return Ok(name.to_string());
        }
        let available: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        Err(TestkitError::NotFound(format!(
            "column '{}' not found. Available columns: [{}]",
            name,
            available.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;
    use crate::schema::StructField;
    use crate::session::Session;
    use polars::prelude::DataType as PlDataType;

    fn string_pair_df() -> DataFrame {
        let schema = StructType::new(vec![
            StructField::new("purchase_info", DataType::String, false),
            StructField::new("product", DataType::String, false),
        ]);
        Session::builder()
            .create()
            .create_dataframe_unchecked(&[row!["test1", "Bread"], row!["test2", "Butter"]], &schema)
            .unwrap()
    }

    #[test]
    fn test_schema_and_columns() {
        let df = string_pair_df();
        assert_eq!(df.columns().unwrap(), vec!["purchase_info", "product"]);
        let schema = df.schema();
        assert_eq!(schema.len(), 2);
        assert!(matches!(schema.fields()[0].data_type, DataType::String));
    }

    #[test]
    fn test_head() {
        let df = string_pair_df();
        assert_eq!(df.head(1).count().unwrap(), 1);
    }

    #[test]
    fn test_cast_column_string_to_binary() {
        let df = string_pair_df().cast_column("purchase_info", &DataType::Binary).unwrap();
        let collected = df.collect();
        assert_eq!(
            collected.column("purchase_info").unwrap().dtype(),
            &PlDataType::Binary
        );
        // Other columns keep their type.
        assert_eq!(
            collected.column("product").unwrap().dtype(),
            &PlDataType::String
        );
    }

    #[test]
    fn test_cast_column_unknown_name() {
        let err = string_pair_df()
            .cast_column("missing", &DataType::Binary)
            .unwrap_err();
        assert!(matches!(err, TestkitError::NotFound(_)));
        assert!(err.to_string().contains("purchase_info"));
    }
}
