//! Grouping-sets evaluation.
//!
//! A query over grouping columns `C` produces one row block per subset of `C`. The naive plan
//! runs one aggregation per subset. Columns holding a single value in the input cannot split
//! any partition, so subsets that differ only by such columns share an aggregation: the engine
//! groups the power set into equivalence classes keyed by
//! [`EffectiveGrouping`](crate::EffectiveGrouping), aggregates once
//! per class through the [`AggregationCache`], and expands each cached result into one block per
//! member grouping with the [`RowAssembler`].
use crate::assemble::RowAssembler;
use crate::cache::{AggregationCache, Aggregator};
use crate::degenerate::DegenerateColumns;
use crate::finalize::finalize;
use crate::powerset::PowerSet;
use crate::reducer::EquivalenceClasses;
use crate::result::{GroupingSetsResult, GroupingStats};
use crate::spec::GroupingSpec;
use cube_table::{GroupedView, Table, TableBackend, TableError, TableResult};

pub type GroupingResult<T> = Result<T, GroupingError>;

#[derive(Debug, thiserror::Error)]
pub enum GroupingError {
    #[error("unknown grouping column {table}[{column}]")]
    ColumnNotFound { table: String, column: String },

    #[error("grouping column {column} is listed more than once")]
    DuplicateGroupingColumn { column: String },

    #[error("too many grouping columns: {count} (at most {max})")]
    TooManyGroupingColumns { count: usize, max: usize },

    #[error("aggregation by {grouping:?} failed: {source}")]
    AggregationFailed {
        grouping: Vec<String>,
        #[source]
        source: TableError,
    },

    #[error("aggregation by {grouping:?} returned {actual} rows for {expected} partitions")]
    AggregationShapeMismatch {
        grouping: Vec<String>,
        expected: usize,
        actual: usize,
    },

    #[error("aggregate column {column} (grouping {grouping:?}) collides with a grouping column or its placeholder")]
    AmbiguousColumnName {
        column: String,
        grouping: Vec<String>,
    },

    #[error("aggregation by {grouping:?} returned columns {actual:?}, expected {expected:?}")]
    InconsistentAggregateColumns {
        grouping: Vec<String>,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Where rolled-up markers sort relative to real values of the same column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaceholderOrder {
    /// Sort the marker as its text label, e.g. `"(All Years)"`, among the real values. Text
    /// sorts after numbers, and `(` sorts before letters and digits.
    #[default]
    AsLabel,
    First,
    Last,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupingSetsOptions {
    /// Share one aggregation between groupings that differ only by constant columns.
    pub collapse_degenerate_columns: bool,
    pub placeholder_order: PlaceholderOrder,
}

impl Default for GroupingSetsOptions {
    fn default() -> Self {
        Self {
            collapse_degenerate_columns: true,
            placeholder_order: PlaceholderOrder::default(),
        }
    }
}

impl GroupingSetsOptions {
    /// One aggregation per grouping, no deduplication.
    pub fn naive() -> Self {
        Self::default().with_collapse_degenerate_columns(false)
    }

    pub fn with_collapse_degenerate_columns(mut self, collapse: bool) -> Self {
        self.collapse_degenerate_columns = collapse;
        self
    }

    pub fn with_placeholder_order(mut self, order: PlaceholderOrder) -> Self {
        self.placeholder_order = order;
        self
    }
}

/// Compute `GROUP BY GROUPING SETS` over every subset of `columns` with default options.
///
/// `aggfunc` receives one [`GroupedView`] per distinct effective grouping and returns the
/// aggregate columns, one row per partition.
pub fn grouping_sets<F>(
    table: &dyn TableBackend,
    columns: &[impl AsRef<str>],
    aggfunc: F,
) -> GroupingResult<GroupingSetsResult>
where
    F: Fn(&GroupedView<'_>) -> TableResult<Table>,
{
    execute(table, columns, &aggfunc, &GroupingSetsOptions::default())
}

pub fn grouping_sets_with_options<F>(
    table: &dyn TableBackend,
    columns: &[impl AsRef<str>],
    aggfunc: F,
    options: &GroupingSetsOptions,
) -> GroupingResult<GroupingSetsResult>
where
    F: Fn(&GroupedView<'_>) -> TableResult<Table>,
{
    execute(table, columns, &aggfunc, options)
}

/// Run a grouping-sets query with any [`Aggregator`].
pub fn execute(
    table: &dyn TableBackend,
    columns: &[impl AsRef<str>],
    aggregator: &dyn Aggregator,
    options: &GroupingSetsOptions,
) -> GroupingResult<GroupingSetsResult> {
    let spec = GroupingSpec::resolve(table, columns)?;

    let degenerate = if options.collapse_degenerate_columns {
        DegenerateColumns::detect(table, &spec)
    } else {
        DegenerateColumns::default()
    };

    let classes = EquivalenceClasses::build(PowerSet::new(spec.len()), &degenerate);
    log::debug!(
        "{} groupings reduced to {} aggregations",
        classes.grouping_count(),
        classes.len()
    );

    let mut cache = AggregationCache::new();
    let mut assembler = RowAssembler::new(&spec, &degenerate);
    let mut blocks = Vec::with_capacity(classes.grouping_count());
    for (effective, groupings) in classes.iter() {
        let result = cache.get_or_aggregate(table, &spec, effective, aggregator)?;
        for grouping in groupings {
            blocks.push(assembler.assemble(grouping, effective, result)?);
        }
    }

    let stats = GroupingStats {
        groupings: classes.grouping_count(),
        aggregations: cache.invocations(),
        degenerate_columns: degenerate
            .positions()
            .map(|pos| spec.column(pos).to_string())
            .collect(),
    };
    let rows = finalize(blocks, options.placeholder_order);
    log::debug!(
        "grouping sets over {:?} on {}: {} rows from {} aggregations",
        spec.columns(),
        table.name(),
        rows.len(),
        stats.aggregations
    );

    Ok(GroupingSetsResult {
        grouping_columns: spec.columns().to_vec(),
        value_columns: assembler.into_value_columns(),
        rows,
        stats,
    })
}
