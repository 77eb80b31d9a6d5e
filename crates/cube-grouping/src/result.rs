use cube_table::{Table, TableResult, Value};
use std::fmt;
use std::sync::Arc;

/// The label shown in place of a grouping column that a grouping rolls up.
pub fn placeholder_label(column: &str) -> String {
    format!("(All {column}s)")
}

/// A grouping-column cell: either a real value or the rolled-up marker.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupingValue {
    Value(Value),
    All { column: Arc<str> },
}

impl GroupingValue {
    pub fn all(column: &str) -> Self {
        GroupingValue::All {
            column: Arc::from(column),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, GroupingValue::All { .. })
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            GroupingValue::Value(v) => Some(v),
            GroupingValue::All { .. } => None,
        }
    }

    /// Flatten into a plain value; the marker becomes its text label.
    pub fn to_value(&self) -> Value {
        match self {
            GroupingValue::Value(v) => v.clone(),
            GroupingValue::All { column } => Value::from(placeholder_label(column)),
        }
    }
}

impl fmt::Display for GroupingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingValue::Value(v) => write!(f, "{v}"),
            GroupingValue::All { column } => f.write_str(&placeholder_label(column)),
        }
    }
}

impl From<Value> for GroupingValue {
    fn from(value: Value) -> Self {
        GroupingValue::Value(value)
    }
}

/// One output row: a cell per grouping column, then the aggregate values.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupingRow {
    pub keys: Vec<GroupingValue>,
    pub values: Vec<Value>,
}

/// Counters describing how much work a query did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Groupings requested (the power set size).
    pub groupings: usize,
    /// Aggregation callback invocations.
    pub aggregations: usize,
    /// Grouping columns found to hold a single value.
    pub degenerate_columns: Vec<String>,
}

/// The result of a grouping-sets query.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupingSetsResult {
    pub grouping_columns: Vec<String>,
    pub value_columns: Vec<String>,
    pub rows: Vec<GroupingRow>,
    pub stats: GroupingStats,
}

impl GroupingSetsResult {
    /// Grouping columns followed by aggregate columns.
    pub fn columns(&self) -> Vec<String> {
        self.grouping_columns
            .iter()
            .chain(&self.value_columns)
            .cloned()
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Flatten into a plain table, rendering rolled-up cells as `"(All <Column>s)"`.
    pub fn to_table(&self, name: impl Into<String>) -> TableResult<Table> {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.keys
                    .iter()
                    .map(GroupingValue::to_value)
                    .chain(row.values.iter().cloned())
                    .collect()
            })
            .collect();
        Table::from_rows(name, self.columns(), rows)
    }
}
