use crate::engine::{GroupingError, GroupingResult};
use cube_table::TableBackend;
use std::collections::HashSet;

/// Power sets are enumerated with a `usize` counter.
pub const MAX_GROUPING_COLUMNS: usize = (usize::BITS - 1) as usize;

/// The ordered grouping columns of a query, resolved against the source table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupingSpec {
    columns: Vec<String>,
    source_idxs: Vec<usize>,
}

impl GroupingSpec {
    /// Resolve `columns` against `table`. Fails on unknown or repeated names.
    pub fn resolve(table: &dyn TableBackend, columns: &[impl AsRef<str>]) -> GroupingResult<Self> {
        if columns.len() > MAX_GROUPING_COLUMNS {
            return Err(GroupingError::TooManyGroupingColumns {
                count: columns.len(),
                max: MAX_GROUPING_COLUMNS,
            });
        }

        let mut seen = HashSet::with_capacity(columns.len());
        let mut names = Vec::with_capacity(columns.len());
        let mut source_idxs = Vec::with_capacity(columns.len());
        for column in columns {
            let column = column.as_ref();
            let idx = table
                .column_index(column)
                .ok_or_else(|| GroupingError::ColumnNotFound {
                    table: table.name().to_string(),
                    column: column.to_string(),
                })?;
            if !seen.insert(column) {
                return Err(GroupingError::DuplicateGroupingColumn {
                    column: column.to_string(),
                });
            }
            names.push(column.to_string());
            source_idxs.push(idx);
        }

        Ok(Self {
            columns: names,
            source_idxs,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, pos: usize) -> &str {
        &self.columns[pos]
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Column index in the source table of the grouping column at `pos`.
    pub(crate) fn source_idx(&self, pos: usize) -> usize {
        self.source_idxs[pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_table::{Table, Value};

    fn table() -> Table {
        Table::from_rows(
            "Sales",
            vec!["Area", "Year", "Total"],
            vec![vec![Value::from("a"), Value::from(2014), Value::from(5)]],
        )
        .unwrap()
    }

    #[test]
    fn resolves_in_declared_order() {
        let spec = GroupingSpec::resolve(&table(), &["Year", "Area"]).unwrap();
        assert_eq!(spec.columns(), ["Year", "Area"]);
        assert_eq!(spec.source_idx(0), 1);
        assert_eq!(spec.source_idx(1), 0);
    }

    #[test]
    fn unknown_column_fails_fast() {
        let err = GroupingSpec::resolve(&table(), &["Area", "Month"]).unwrap_err();
        assert!(matches!(err, GroupingError::ColumnNotFound { column, .. } if column == "Month"));
    }

    #[test]
    fn repeated_column_is_rejected() {
        let err = GroupingSpec::resolve(&table(), &["Area", "Area"]).unwrap_err();
        assert!(matches!(err, GroupingError::DuplicateGroupingColumn { column } if column == "Area"));
    }

    #[test]
    fn too_many_columns_is_rejected_before_lookup() {
        let names: Vec<String> = (0..=MAX_GROUPING_COLUMNS).map(|i| format!("c{i}")).collect();
        let table = Table::new("Wide", names.clone()).unwrap();
        let err = GroupingSpec::resolve(&table, names.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            GroupingError::TooManyGroupingColumns { count, max }
                if count == MAX_GROUPING_COLUMNS + 1 && max == MAX_GROUPING_COLUMNS
        ));
    }

    #[test]
    fn empty_spec_is_valid() {
        let spec = GroupingSpec::resolve(&table(), &[] as &[&str]).unwrap();
        assert!(spec.is_empty());
    }
}
