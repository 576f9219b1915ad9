#![forbid(unsafe_code)]

use crate::column::Column;
use crate::value::{ArrayData, ScalarType, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur when projecting a table against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("column '{0}' missing from source table and fallback set")]
    MissingColumn(String),
}

/// An ordered mapping from field name to scalar type, defining a table's
/// expected shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<(String, ScalarType)>,
}

impl Schema {
    pub fn new<S: Into<String>>(fields: Vec<(S, ScalarType)>) -> Schema {
        Schema {
            fields: fields
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, ScalarType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(n, _)| n == name)
    }

    pub fn field_type(&self, name: &str) -> Option<ScalarType> {
        self.field_index(name).map(|i| self.fields[i].1)
    }
}

/// A named, ordered collection of equal-length columns sharing one row count.
///
/// Tables are immutable value objects after construction; [`Table::sort`]
/// and [`Table::pick_columns`] produce new tables and never mutate in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Schema,
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build one column per schema field by extracting each row's positional
    /// value.
    ///
    /// Rows are positional per the schema's field order; a row shorter than
    /// the schema reads as the type's undefined sentinel for the missing
    /// fields.
    pub fn of_rows(schema: Schema, rows: &[Vec<Value>]) -> Table {
        let row_count = rows.len();
        let columns = schema
            .fields
            .iter()
            .enumerate()
            .map(|(field, &(_, ty))| {
                let cell = |row: &Vec<Value>| row.get(field).cloned().unwrap_or(Value::Null);
                let data = match ty {
                    ScalarType::Int => {
                        ArrayData::from(rows.iter().map(|r| cell(r).as_int()).collect::<Vec<_>>())
                    }
                    ScalarType::Float => {
                        ArrayData::from(rows.iter().map(|r| cell(r).as_float()).collect::<Vec<_>>())
                    }
                    ScalarType::Str => {
                        ArrayData::from(rows.iter().map(|r| cell(r).as_str()).collect::<Vec<_>>())
                    }
                };
                Column::of_array(data, ty)
            })
            .collect();
        Table {
            schema,
            columns,
            row_count,
        }
    }

    /// Wrap pre-built columns directly, in schema order.
    ///
    /// The row count is taken from the first column. All columns sharing one
    /// length is a documented invariant of the type; it is asserted in debug
    /// builds rather than validated on every construction.
    pub fn of_columns(schema: Schema, columns: Vec<Column>) -> Table {
        assert_eq!(
            schema.len(),
            columns.len(),
            "schema and column count mismatch"
        );
        let row_count = columns.first().map(|c| c.row_count()).unwrap_or(0);
        debug_assert!(
            columns.iter().all(|c| c.row_count() == row_count),
            "all table columns must share one row count"
        );
        Table {
            schema,
            columns,
            row_count,
        }
    }

    /// Wrap per-field backing arrays via [`Column::of_array`] with each
    /// field's declared type.
    pub fn of_arrays(schema: Schema, arrays: Vec<ArrayData>) -> Table {
        assert_eq!(schema.len(), arrays.len(), "schema and array count mismatch");
        let columns = schema
            .fields
            .iter()
            .zip(arrays)
            .map(|(&(_, ty), data)| Column::of_array(data, ty))
            .collect();
        Table::of_columns(schema, columns)
    }

    /// Project `source` onto `target`: each target field takes the source's
    /// column if present, else the fallback's, else the projection fails.
    ///
    /// The result's column set is exactly the target schema's fields, in
    /// schema order, regardless of extra fields present in the source; its
    /// row count equals the source's.
    pub fn pick_columns(
        target: Schema,
        source: &Table,
        fallback: Option<&HashMap<String, Column>>,
    ) -> Result<Table, TableError> {
        let mut columns = Vec::with_capacity(target.len());
        for (name, _) in &target.fields {
            let column = source
                .column(name)
                .or_else(|| fallback.and_then(|f| f.get(name)))
                .ok_or_else(|| TableError::MissingColumn(name.clone()))?;
            columns.push(column.clone());
        }
        Ok(Table {
            schema: target,
            columns,
            row_count: source.row_count,
        })
    }

    /// A new table with every column replaced by a view through one shared,
    /// stable row permutation. No column data is re-materialized.
    ///
    /// `compare` receives original row indices; equal rows keep their
    /// original relative order.
    pub fn sort(&self, mut compare: impl FnMut(usize, usize) -> Ordering) -> Table {
        let mut permutation: Vec<u32> = (0..self.row_count as u32).collect();
        permutation.sort_by(|&i, &j| compare(i as usize, j as usize));
        let permutation = std::sync::Arc::new(permutation);
        let columns = self
            .columns
            .iter()
            .map(|c| Column::view(c, permutation.clone()))
            .collect();
        Table {
            schema: self.schema.clone(),
            columns,
            row_count: self.row_count,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.schema.field_index(name).map(|i| &self.columns[i])
    }

    pub fn column_at(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    /// Columns in schema order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_schema() -> Schema {
        Schema::new(vec![("x", ScalarType::Int), ("n", ScalarType::Str)])
    }

    #[test]
    fn of_rows_pads_short_rows_with_the_undefined_sentinel() {
        let t = Table::of_rows(
            xy_schema(),
            &[
                vec![Value::Int(10), Value::from("row1")],
                vec![Value::Int(-1)],
            ],
        );
        assert_eq!(t.row_count(), 2);
        let n = t.column("n").unwrap();
        assert_eq!(&*n.str(0), "row1");
        assert_eq!(&*n.str(1), "");
    }

    #[test]
    fn pick_columns_reports_the_missing_field_by_name() {
        let t = Table::of_rows(xy_schema(), &[vec![Value::Int(1), Value::from("a")]]);
        let target = Schema::new(vec![("x", ScalarType::Int), ("y", ScalarType::Int)]);
        let err = Table::pick_columns(target, &t, None).unwrap_err();
        assert_eq!(err, TableError::MissingColumn("y".to_owned()));
    }

    #[test]
    fn sort_shares_one_permutation_across_columns() {
        let t = Table::of_rows(
            xy_schema(),
            &[
                vec![Value::Int(3), Value::from("c")],
                vec![Value::Int(1), Value::from("a")],
                vec![Value::Int(2), Value::from("b")],
            ],
        );
        let x = t.column("x").unwrap().clone();
        let sorted = t.sort(|i, j| x.int(i).cmp(&x.int(j)));
        assert_eq!(*sorted.column("x").unwrap().to_int_array(), vec![1, 2, 3]);
        let names = sorted.column("n").unwrap().to_str_array();
        assert_eq!(&*names[0], "a");
        assert_eq!(&*names[2], "c");
        // The source table is untouched.
        assert_eq!(t.column("x").unwrap().int(0), 3);
    }
}
