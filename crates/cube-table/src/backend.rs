use crate::grouped::Partition;
use crate::table::Table;
use crate::value::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Storage abstraction for the tables fed into a grouping-sets query.
///
/// The engine relies on this trait to:
/// - resolve column indices by name
/// - access scalar values by row/column
/// - enumerate the distinct values of a column
/// - partition rows by a set of key columns
///
/// Only the first four methods are required. The defaults for `distinct_values` and `partition`
/// scan every row; backends with dictionaries or indexes can override them.
pub trait TableBackend: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
    fn columns(&self) -> &[String];
    fn row_count(&self) -> usize;
    fn column_index(&self, column: &str) -> Option<usize>;
    fn value_by_idx(&self, row: usize, idx: usize) -> Option<Value>;

    fn value(&self, row: usize, column: &str) -> Option<Value> {
        let idx = self.column_index(column)?;
        self.value_by_idx(row, idx)
    }

    /// Distinct values of a column in first-seen order. Blanks are included.
    fn distinct_values(&self, idx: usize) -> Vec<Value> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for row in 0..self.row_count() {
            let value = self.value_by_idx(row, idx).unwrap_or_default();
            if seen.insert(value.clone()) {
                out.push(value);
            }
        }
        out
    }

    /// Split the rows into one partition per distinct combination of `key_idxs` values.
    ///
    /// Partitions are returned in ascending key order; rows inside a partition keep table
    /// order. An empty `key_idxs` yields a single partition holding every row.
    fn partition(&self, key_idxs: &[usize]) -> Vec<Partition> {
        if key_idxs.is_empty() {
            return vec![Partition::new(Vec::new(), (0..self.row_count()).collect())];
        }

        let mut slots: HashMap<Vec<Value>, usize> = HashMap::new();
        let mut partitions: Vec<Partition> = Vec::new();
        for row in 0..self.row_count() {
            let key: Vec<Value> = key_idxs
                .iter()
                .map(|&idx| self.value_by_idx(row, idx).unwrap_or_default())
                .collect();
            match slots.get(&key) {
                Some(&slot) => partitions[slot].push_row(row),
                None => {
                    slots.insert(key.clone(), partitions.len());
                    partitions.push(Partition::new(key, vec![row]));
                }
            }
        }

        partitions.sort_by(|a, b| a.key().cmp(b.key()));
        log::trace!(
            "partitioned {} rows of {} into {} groups",
            self.row_count(),
            self.name(),
            partitions.len()
        );
        partitions
    }
}

impl TableBackend for Table {
    fn name(&self) -> &str {
        Table::name(self)
    }

    fn columns(&self) -> &[String] {
        Table::columns(self)
    }

    fn row_count(&self) -> usize {
        Table::row_count(self)
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.column_idx(column)
    }

    fn value_by_idx(&self, row: usize, idx: usize) -> Option<Value> {
        Table::value_by_idx(self, row, idx).cloned()
    }
}
