//! Partitioned views over a [`TableBackend`].
//!
//! A [`GroupedView`] is what an aggregation callback receives: the key columns, one
//! [`Partition`] per distinct key combination, and per-column reducers that produce one
//! [`Value`] per partition in partition order.
use crate::backend::TableBackend;
use crate::error::{TableError, TableResult};
use crate::table::Table;
use crate::value::Value;

/// One group of rows sharing the same key values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    key: Vec<Value>,
    rows: Vec<usize>,
}

impl Partition {
    pub fn new(key: Vec<Value>, rows: Vec<usize>) -> Self {
        Self { key, rows }
    }

    pub fn key(&self) -> &[Value] {
        &self.key
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn push_row(&mut self, row: usize) {
        self.rows.push(row);
    }
}

#[derive(Debug)]
pub struct GroupedView<'a> {
    table: &'a dyn TableBackend,
    key_columns: Vec<String>,
    partitions: Vec<Partition>,
}

impl<'a> GroupedView<'a> {
    /// Partition `table` by `key_columns`.
    pub fn new(table: &'a dyn TableBackend, key_columns: &[impl AsRef<str>]) -> TableResult<Self> {
        let mut idxs = Vec::with_capacity(key_columns.len());
        for column in key_columns {
            let column = column.as_ref();
            let idx = table
                .column_index(column)
                .ok_or_else(|| TableError::UnknownColumn {
                    table: table.name().to_string(),
                    column: column.to_string(),
                })?;
            idxs.push(idx);
        }

        Ok(Self {
            table,
            key_columns: key_columns.iter().map(|c| c.as_ref().to_string()).collect(),
            partitions: table.partition(&idxs),
        })
    }

    /// A view with no key columns and a single partition holding every row.
    pub fn whole(table: &'a dyn TableBackend) -> Self {
        Self {
            table,
            key_columns: Vec::new(),
            partitions: table.partition(&[]),
        }
    }

    pub fn table(&self) -> &'a dyn TableBackend {
        self.table
    }

    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Number of rows in each partition.
    pub fn count_rows(&self) -> Vec<Value> {
        self.partitions
            .iter()
            .map(|p| Value::from(p.len() as f64))
            .collect()
    }

    /// The key columns as an ordinary table, one row per partition.
    pub fn keys_table(&self) -> TableResult<Table> {
        let rows = self.partitions.iter().map(|p| p.key.clone()).collect();
        Table::from_rows(self.table.name(), self.key_columns.clone(), rows)
    }

    pub fn column(&self, name: &str) -> TableResult<GroupedColumn<'_, 'a>> {
        let idx = self
            .table
            .column_index(name)
            .ok_or_else(|| TableError::UnknownColumn {
                table: self.table.name().to_string(),
                column: name.to_string(),
            })?;
        Ok(GroupedColumn {
            view: self,
            name: name.to_string(),
            idx,
        })
    }
}

/// One source column seen through a [`GroupedView`].
#[derive(Debug)]
pub struct GroupedColumn<'v, 'a> {
    view: &'v GroupedView<'a>,
    name: String,
    idx: usize,
}

impl GroupedColumn<'_, '_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values of this column in one partition, in row order.
    pub fn values(&self, partition: usize) -> Vec<Value> {
        self.view
            .partitions
            .get(partition)
            .map(|p| {
                p.rows
                    .iter()
                    .map(|&row| self.view.table.value_by_idx(row, self.idx).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn non_blank(&self, partition: usize) -> impl Iterator<Item = Value> {
        self.values(partition).into_iter().filter(|v| !v.is_blank())
    }

    fn numbers(&self, partition: usize) -> TableResult<Vec<f64>> {
        self.non_blank(partition)
            .map(|v| {
                v.as_f64().ok_or_else(|| {
                    TableError::Type(format!("column {} holds non-numeric value {v:?}", self.name))
                })
            })
            .collect()
    }

    fn per_partition<T>(&self, mut f: impl FnMut(usize) -> T) -> Vec<T> {
        (0..self.view.partitions.len()).map(&mut f).collect()
    }

    /// Sum of the numeric values, ignoring blanks. An all-blank partition sums to 0.
    pub fn sum(&self) -> TableResult<Vec<Value>> {
        self.per_partition(|p| -> TableResult<Value> {
            Ok(Value::from(self.numbers(p)?.iter().sum::<f64>()))
        })
        .into_iter()
        .collect()
    }

    /// Arithmetic mean of the numeric values, or blank when there are none.
    pub fn mean(&self) -> TableResult<Vec<Value>> {
        self.per_partition(|p| -> TableResult<Value> {
            let numbers = self.numbers(p)?;
            if numbers.is_empty() {
                return Ok(Value::Blank);
            }
            Ok(Value::from(numbers.iter().sum::<f64>() / numbers.len() as f64))
        })
        .into_iter()
        .collect()
    }

    /// Number of non-blank values.
    pub fn count(&self) -> Vec<Value> {
        self.per_partition(|p| Value::from(self.non_blank(p).count() as f64))
    }

    pub fn min(&self) -> Vec<Value> {
        self.per_partition(|p| self.non_blank(p).min().unwrap_or_default())
    }

    pub fn max(&self) -> Vec<Value> {
        self.per_partition(|p| self.non_blank(p).max().unwrap_or_default())
    }

    pub fn first(&self) -> Vec<Value> {
        self.per_partition(|p| self.values(p).into_iter().next().unwrap_or_default())
    }
}
