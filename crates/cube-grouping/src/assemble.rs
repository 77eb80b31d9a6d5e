use crate::degenerate::DegenerateColumns;
use crate::engine::{GroupingError, GroupingResult};
use crate::powerset::Grouping;
use crate::reducer::EffectiveGrouping;
use crate::result::{GroupingRow, GroupingValue};
use crate::spec::GroupingSpec;
use cube_table::Table;

/// Expands cached aggregation results into row blocks for individual groupings.
///
/// Every grouping column of every row ends up as exactly one of: the partition key value, the
/// degenerate column's single value, or the rolled-up marker.
#[derive(Debug)]
pub struct RowAssembler<'s> {
    spec: &'s GroupingSpec,
    degenerate: &'s DegenerateColumns,
    /// Aggregate column order, fixed by the first block assembled.
    value_columns: Option<Vec<String>>,
}

impl<'s> RowAssembler<'s> {
    pub fn new(spec: &'s GroupingSpec, degenerate: &'s DegenerateColumns) -> Self {
        Self {
            spec,
            degenerate,
            value_columns: None,
        }
    }

    /// Build the block for `grouping` from the cached result of its effective grouping.
    pub fn assemble(
        &mut self,
        grouping: &Grouping,
        effective: &EffectiveGrouping,
        result: &Table,
    ) -> GroupingResult<Vec<GroupingRow>> {
        let key_count = effective.len();
        let value_columns = &result.columns()[key_count..];
        let value_order = self.value_order(grouping, value_columns)?;

        let mut template: Vec<GroupingValue> = (0..self.spec.len())
            .map(|pos| GroupingValue::all(self.spec.column(pos)))
            .collect();
        for &pos in grouping.positions() {
            if effective.contains(pos) {
                continue;
            }
            if let Some(value) = self.degenerate.value(pos) {
                template[pos] = GroupingValue::Value(value.clone());
            }
        }

        let rows = result
            .rows()
            .iter()
            .map(|row| {
                let mut keys = template.clone();
                for (slot, &pos) in effective.positions().iter().enumerate() {
                    keys[pos] = GroupingValue::Value(row[slot].clone());
                }
                let values = value_order
                    .iter()
                    .map(|&idx| row[key_count + idx].clone())
                    .collect();
                GroupingRow { keys, values }
            })
            .collect();
        Ok(rows)
    }

    /// Aggregate column order shared by every block.
    pub fn value_columns(&self) -> &[String] {
        self.value_columns.as_deref().unwrap_or_default()
    }

    pub fn into_value_columns(self) -> Vec<String> {
        self.value_columns.unwrap_or_default()
    }

    /// For each output aggregate column, its index among `columns`.
    fn value_order(&mut self, grouping: &Grouping, columns: &[String]) -> GroupingResult<Vec<usize>> {
        let expected = self.value_columns.get_or_insert_with(|| columns.to_vec());

        let mismatch = || GroupingError::InconsistentAggregateColumns {
            grouping: grouping
                .column_names(self.spec)
                .into_iter()
                .map(str::to_string)
                .collect(),
            expected: expected.clone(),
            actual: columns.to_vec(),
        };
        if expected.len() != columns.len() {
            return Err(mismatch());
        }
        expected
            .iter()
            .map(|name| columns.iter().position(|c| c == name).ok_or_else(mismatch))
            .collect()
    }
}
