//! `GROUP BY GROUPING SETS` over the power set of a table's grouping columns.
//!
//! For grouping columns `[Area, Year]` the query returns the union of the aggregations by
//! `(Area, Year)`, `(Area)`, `(Year)` and `()`, with rolled-up columns marked
//! [`GroupingValue::All`] (rendered `"(All Areas)"`, `"(All Years)"`).
//!
//! ```
//! use cube_grouping::grouping_sets;
//! use cube_table::{Table, Value};
//!
//! let sales = Table::from_columns(
//!     "Sales",
//!     vec![
//!         ("Area", vec![Value::from("a"), Value::from("b")]),
//!         ("Total", vec![Value::from(5), Value::from(7)]),
//!     ],
//! )
//! .unwrap();
//!
//! let result = grouping_sets(&sales, &["Area"], |view| {
//!     Table::from_columns("agg", vec![("Total (n)", view.column("Total")?.sum()?)])
//! })
//! .unwrap();
//!
//! assert_eq!(result.row_count(), 3);
//! assert_eq!(result.columns(), ["Area", "Total (n)"]);
//! ```

#![forbid(unsafe_code)]

mod assemble;
mod cache;
mod degenerate;
mod engine;
mod finalize;
mod powerset;
mod reducer;
mod result;
mod spec;

pub use crate::assemble::RowAssembler;
pub use crate::cache::{AggregationCache, Aggregator};
pub use crate::degenerate::DegenerateColumns;
pub use crate::engine::{
    execute, grouping_sets, grouping_sets_with_options, GroupingError, GroupingResult,
    GroupingSetsOptions, PlaceholderOrder,
};
pub use crate::finalize::finalize;
pub use crate::powerset::{Grouping, PowerSet};
pub use crate::reducer::{EffectiveGrouping, EquivalenceClasses};
pub use crate::result::{
    placeholder_label, GroupingRow, GroupingSetsResult, GroupingStats, GroupingValue,
};
pub use crate::spec::{GroupingSpec, MAX_GROUPING_COLUMNS};
