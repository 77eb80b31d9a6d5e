//! Collapsing groupings that differ only by degenerate columns.
//!
//! A degenerate column splits the table into exactly one partition, so grouping by it (or not)
//! yields the same partitions. Every grouping is therefore reduced to its *effective grouping*,
//! the grouping minus degenerate columns, and groupings sharing an effective grouping form one
//! equivalence class that needs a single aggregation pass.
use crate::degenerate::DegenerateColumns;
use crate::powerset::Grouping;
use crate::spec::GroupingSpec;
use std::collections::BTreeMap;

/// A grouping with every degenerate column removed. Used as the aggregation cache key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectiveGrouping(Grouping);

impl EffectiveGrouping {
    pub fn of(grouping: &Grouping, degenerate: &DegenerateColumns) -> Self {
        let positions = grouping
            .positions()
            .iter()
            .copied()
            .filter(|&pos| !degenerate.contains(pos))
            .collect();
        Self(Grouping::new(positions))
    }

    pub fn positions(&self) -> &[usize] {
        self.0.positions()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The empty effective grouping aggregates every row as one partition.
    pub fn is_grand_total(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.0.contains(pos)
    }

    pub fn column_names<'s>(&self, spec: &'s GroupingSpec) -> Vec<&'s str> {
        self.0.column_names(spec)
    }
}

/// Effective grouping -> the requested groupings that reduce to it.
#[derive(Clone, Debug, Default)]
pub struct EquivalenceClasses {
    classes: BTreeMap<EffectiveGrouping, Vec<Grouping>>,
    grouping_count: usize,
}

impl EquivalenceClasses {
    pub fn build(
        groupings: impl IntoIterator<Item = Grouping>,
        degenerate: &DegenerateColumns,
    ) -> Self {
        let mut classes: BTreeMap<EffectiveGrouping, Vec<Grouping>> = BTreeMap::new();
        let mut grouping_count = 0;
        for grouping in groupings {
            let effective = EffectiveGrouping::of(&grouping, degenerate);
            classes.entry(effective).or_default().push(grouping);
            grouping_count += 1;
        }
        Self {
            classes,
            grouping_count,
        }
    }

    /// Number of distinct effective groupings, i.e. aggregation passes needed.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Number of requested groupings across all classes.
    pub fn grouping_count(&self) -> usize {
        self.grouping_count
    }

    pub fn get(&self, effective: &EffectiveGrouping) -> Option<&[Grouping]> {
        self.classes.get(effective).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EffectiveGrouping, &[Grouping])> + '_ {
        self.classes.iter().map(|(k, v)| (k, v.as_slice()))
    }
}
