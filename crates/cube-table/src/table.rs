use crate::error::{TableError, TableResult};
use crate::value::Value;
use std::collections::HashMap;

/// A named, row-major in-memory table.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given columns. Column names must be unique.
    pub fn new(name: impl Into<String>, columns: Vec<impl Into<String>>) -> TableResult<Self> {
        let name = name.into();
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut column_index = HashMap::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            if column_index.insert(column.clone(), idx).is_some() {
                return Err(TableError::DuplicateColumn {
                    table: name,
                    column: column.clone(),
                });
            }
        }

        Ok(Self {
            name,
            columns,
            column_index,
            rows: Vec::new(),
        })
    }

    /// Build a table from `(column, values)` pairs. All columns must have the same length.
    pub fn from_columns<C>(name: impl Into<String>, columns: Vec<(C, Vec<Value>)>) -> TableResult<Self>
    where
        C: Into<String>,
    {
        let name = name.into();
        let mut names = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        for (column, values) in columns {
            names.push(column.into());
            data.push(values);
        }

        let mut table = Table::new(name, Vec::<String>::new())?;
        for (column, values) in names.into_iter().zip(data) {
            table.add_column(column, values)?;
        }
        Ok(table)
    }

    /// Build a table from whole rows, validating each against the column count.
    pub fn from_rows(
        name: impl Into<String>,
        columns: Vec<impl Into<String>>,
        rows: Vec<Vec<Value>>,
    ) -> TableResult<Self> {
        let mut table = Table::new(name, columns)?;
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[Value]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> TableResult<()> {
        if row.len() != self.columns.len() {
            return Err(TableError::SchemaMismatch {
                table: self.name.clone(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }

        self.rows.push(row);
        Ok(())
    }

    pub fn column_idx(&self, column: &str) -> Option<usize> {
        self.column_index.get(column).copied()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_idx(column)?;
        self.rows.get(row)?.get(idx)
    }

    pub fn value_by_idx(&self, row: usize, idx: usize) -> Option<&Value> {
        self.rows.get(row)?.get(idx)
    }

    /// Iterate over one column top to bottom.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> TableResult<()> {
        let name = name.into();
        if self.column_index.contains_key(&name) {
            return Err(TableError::DuplicateColumn {
                table: self.name.clone(),
                column: name,
            });
        }
        // A table without columns has no rows yet; the first column decides the length.
        if self.columns.is_empty() && self.rows.is_empty() {
            self.rows = vec![Vec::new(); values.len()];
        }
        if values.len() != self.rows.len() {
            return Err(TableError::ColumnLengthMismatch {
                table: self.name.clone(),
                column: name,
                expected: self.rows.len(),
                actual: values.len(),
            });
        }

        let idx = self.columns.len();
        self.columns.push(name.clone());
        self.column_index.insert(name, idx);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Copy of this table with only `columns`, in the given order.
    pub fn select(&self, columns: &[impl AsRef<str>]) -> TableResult<Table> {
        let idxs = columns
            .iter()
            .map(|c| {
                self.column_idx(c.as_ref()).ok_or_else(|| TableError::UnknownColumn {
                    table: self.name.clone(),
                    column: c.as_ref().to_string(),
                })
            })
            .collect::<TableResult<Vec<_>>>()?;

        let names: Vec<String> = idxs.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| idxs.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Table::from_rows(self.name.clone(), names, rows)
    }
}
