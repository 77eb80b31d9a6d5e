use crate::engine::PlaceholderOrder;
use crate::result::{placeholder_label, GroupingRow, GroupingValue};
use cube_table::Value;
use std::cmp::Ordering;

/// Concatenate row blocks and sort them by the grouping columns, left to right.
///
/// The sort is stable. Block order does not affect the result since keys are unique across
/// blocks.
pub fn finalize(blocks: Vec<Vec<GroupingRow>>, order: PlaceholderOrder) -> Vec<GroupingRow> {
    let mut rows: Vec<GroupingRow> = blocks.into_iter().flatten().collect();
    rows.sort_by(|a, b| cmp_keys(&a.keys, &b.keys, order));
    rows
}

fn cmp_keys(a: &[GroupingValue], b: &[GroupingValue], order: PlaceholderOrder) -> Ordering {
    for (a, b) in a.iter().zip(b.iter()) {
        let ord = cmp_grouping_value(a, b, order);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

pub(crate) fn cmp_grouping_value(
    a: &GroupingValue,
    b: &GroupingValue,
    order: PlaceholderOrder,
) -> Ordering {
    use GroupingValue::{All, Value as V};

    match (a, b) {
        (V(a), V(b)) => a.cmp(b),
        (All { .. }, All { .. }) => Ordering::Equal,
        (All { column }, V(v)) => cmp_all_with_value(column, v, order),
        (V(v), All { column }) => cmp_all_with_value(column, v, order).reverse(),
    }
}

fn cmp_all_with_value(column: &str, value: &Value, order: PlaceholderOrder) -> Ordering {
    match order {
        PlaceholderOrder::First => Ordering::Less,
        PlaceholderOrder::Last => Ordering::Greater,
        // Real values win ties against an identical label.
        PlaceholderOrder::AsLabel => Value::from(placeholder_label(column))
            .cmp(value)
            .then(Ordering::Greater),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(keys: Vec<GroupingValue>) -> GroupingRow {
        GroupingRow {
            keys,
            values: Vec::new(),
        }
    }

    fn labels(rows: &[GroupingRow]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.keys.iter().map(|k| k.to_string()).collect())
            .collect()
    }

    fn blocks() -> Vec<Vec<GroupingRow>> {
        vec![
            vec![row(vec![GroupingValue::all("Area"), GroupingValue::all("Year")])],
            vec![
                row(vec![Value::from("b").into(), Value::from(2014).into()]),
                row(vec![Value::from("a").into(), Value::from(2014).into()]),
            ],
            vec![row(vec![Value::from("a").into(), GroupingValue::all("Year")])],
        ]
    }

    #[test]
    fn placeholders_sort_by_label_by_default() {
        let rows = finalize(blocks(), PlaceholderOrder::AsLabel);
        assert_eq!(
            labels(&rows),
            [
                ["(All Areas)", "(All Years)"],
                ["a", "2014"],
                ["a", "(All Years)"],
                ["b", "2014"],
            ]
        );
    }

    #[test]
    fn placeholders_can_sort_last() {
        let rows = finalize(blocks(), PlaceholderOrder::Last);
        assert_eq!(
            labels(&rows),
            [
                ["a", "2014"],
                ["a", "(All Years)"],
                ["b", "2014"],
                ["(All Areas)", "(All Years)"],
            ]
        );
    }

    #[test]
    fn placeholders_can_sort_first() {
        let rows = finalize(blocks(), PlaceholderOrder::First);
        assert_eq!(
            labels(&rows),
            [
                ["(All Areas)", "(All Years)"],
                ["a", "(All Years)"],
                ["a", "2014"],
                ["b", "2014"],
            ]
        );
    }

    #[test]
    fn real_value_equal_to_label_sorts_before_marker() {
        let marker = GroupingValue::all("Area");
        let lookalike = GroupingValue::Value(Value::from("(All Areas)"));
        assert_eq!(
            cmp_grouping_value(&lookalike, &marker, PlaceholderOrder::AsLabel),
            Ordering::Less
        );
        assert_eq!(
            cmp_grouping_value(&marker, &lookalike, PlaceholderOrder::AsLabel),
            Ordering::Greater
        );
    }
}
