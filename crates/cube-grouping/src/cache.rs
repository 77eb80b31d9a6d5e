use crate::engine::{GroupingError, GroupingResult};
use crate::reducer::EffectiveGrouping;
use crate::result::placeholder_label;
use crate::spec::GroupingSpec;
use cube_table::{GroupedView, Table, TableBackend, TableResult};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// The aggregation applied to every partition of a grouping.
///
/// Implementations return one row per partition of `view`, in partition order, holding only
/// aggregate columns; the partition keys are added by the caller. They must be pure: equal
/// views must produce equal tables, since results are shared between equivalent groupings.
pub trait Aggregator {
    fn aggregate(&self, view: &GroupedView<'_>) -> TableResult<Table>;
}

impl<F> Aggregator for F
where
    F: Fn(&GroupedView<'_>) -> TableResult<Table>,
{
    fn aggregate(&self, view: &GroupedView<'_>) -> TableResult<Table> {
        self(view)
    }
}

/// Aggregation results keyed by effective grouping. Each key is aggregated at most once.
///
/// A cached table holds the effective grouping's key columns first, in grouping-spec order,
/// followed by the aggregate columns.
#[derive(Debug, Default)]
pub struct AggregationCache {
    results: BTreeMap<EffectiveGrouping, Table>,
    invocations: usize,
}

impl AggregationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, effective: &EffectiveGrouping) -> Option<&Table> {
        self.results.get(effective)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of times the aggregator has been called.
    pub fn invocations(&self) -> usize {
        self.invocations
    }

    pub fn get_or_aggregate(
        &mut self,
        table: &dyn TableBackend,
        spec: &GroupingSpec,
        effective: &EffectiveGrouping,
        aggregator: &dyn Aggregator,
    ) -> GroupingResult<&Table> {
        match self.results.entry(effective.clone()) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                self.invocations += 1;
                let result = aggregate(table, spec, effective, aggregator)?;
                Ok(&*entry.insert(result))
            }
        }
    }
}

fn aggregate(
    table: &dyn TableBackend,
    spec: &GroupingSpec,
    effective: &EffectiveGrouping,
    aggregator: &dyn Aggregator,
) -> GroupingResult<Table> {
    let keys = effective.column_names(spec);
    let grouping = || keys.iter().map(|c| c.to_string()).collect::<Vec<_>>();
    log::trace!("aggregating by {keys:?}");

    let view = if effective.is_grand_total() {
        GroupedView::whole(table)
    } else {
        GroupedView::new(table, keys.as_slice())?
    };

    let output = aggregator
        .aggregate(&view)
        .map_err(|source| GroupingError::AggregationFailed {
            grouping: grouping(),
            source,
        })?;

    if output.row_count() != view.len() {
        return Err(GroupingError::AggregationShapeMismatch {
            grouping: grouping(),
            expected: view.len(),
            actual: output.row_count(),
        });
    }

    for column in output.columns() {
        let collides = spec.contains(column)
            || spec.columns().iter().any(|c| placeholder_label(c) == *column);
        if collides {
            return Err(GroupingError::AmbiguousColumnName {
                column: column.clone(),
                grouping: grouping(),
            });
        }
    }

    let mut result = view.keys_table()?;
    for (idx, column) in output.columns().iter().enumerate() {
        result.add_column(column.clone(), output.column_values(idx).cloned().collect())?;
    }
    Ok(result)
}
