//! Tabular substrate for grouping-sets queries.
//!
//! This crate provides:
//! - [`Value`]: hashable, totally ordered scalars.
//! - [`Table`]: a small row-major in-memory table.
//! - [`TableBackend`]: the storage trait a grouping-sets query reads through (named columns,
//!   distinct values, partitioning).
//! - [`GroupedView`]: the per-partition view handed to aggregation callbacks.

#![forbid(unsafe_code)]

mod backend;
mod error;
mod grouped;
mod table;
mod value;

pub use crate::backend::TableBackend;
pub use crate::error::{TableError, TableResult};
pub use crate::grouped::{GroupedColumn, GroupedView, Partition};
pub use crate::table::Table;
pub use crate::value::Value;
