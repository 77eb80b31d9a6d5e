use crate::spec::GroupingSpec;
use cube_table::{TableBackend, Value};
use std::collections::BTreeMap;

/// Grouping columns that hold exactly one distinct value, keyed by grouping position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DegenerateColumns {
    values: BTreeMap<usize, Value>,
}

impl DegenerateColumns {
    /// Scan each grouping column once over the whole table.
    ///
    /// An empty table has no degenerate columns. Blank is an ordinary value here, so an
    /// all-blank column is degenerate with value [`Value::Blank`].
    pub fn detect(table: &dyn TableBackend, spec: &GroupingSpec) -> Self {
        let mut values = BTreeMap::new();
        for pos in 0..spec.len() {
            let mut distinct = table.distinct_values(spec.source_idx(pos));
            if distinct.len() == 1 {
                if let Some(value) = distinct.pop() {
                    log::trace!("grouping column {} is constant: {value:?}", spec.column(pos));
                    values.insert(pos, value);
                }
            }
        }
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.values.contains_key(&pos)
    }

    pub fn value(&self, pos: usize) -> Option<&Value> {
        self.values.get(&pos)
    }

    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.values.keys().copied()
    }
}
