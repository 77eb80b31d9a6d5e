use cube_grouping::{grouping_sets, grouping_sets_with_options, GroupingSetsOptions};
use cube_table::{GroupedView, Table, TableResult, Value};
use proptest::prelude::*;
use proptest::test_runner::RngSeed;
use std::collections::HashSet;

const CASES: u32 = 64;
const COLUMNS: [&str; 3] = ["Area", "Year", "Kind"];

type Row = (u8, u8, u8, i32);

/// Rows over three grouping columns, each with one to three distinct values.
fn dataset() -> impl Strategy<Value = Vec<Row>> {
    (1u8..=3, 1u8..=3, 1u8..=3).prop_flat_map(|(a, b, c)| {
        prop::collection::vec((0..a, 0..b, 0..c, -50i32..50), 1..16)
    })
}

fn to_table(rows: &[Row]) -> Table {
    Table::from_rows(
        "Sales",
        vec!["Area", "Year", "Kind", "Total"],
        rows.iter()
            .map(|&(a, y, k, total)| {
                vec![
                    Value::from(format!("area-{a}")),
                    Value::from(2000 + i32::from(y)),
                    Value::from(i32::from(k)),
                    Value::from(total),
                ]
            })
            .collect(),
    )
    .unwrap()
}

fn sum_total(view: &GroupedView<'_>) -> TableResult<Table> {
    Table::from_columns("agg", vec![("Total (n)", view.column("Total")?.sum()?)])
}

fn key(row: &Row, pos: usize) -> u8 {
    match pos {
        0 => row.0,
        1 => row.1,
        _ => row.2,
    }
}

/// Sum over groupings of the number of distinct key combinations.
fn expected_row_count(rows: &[Row]) -> usize {
    (0u32..1 << COLUMNS.len())
        .map(|mask| {
            rows.iter()
                .map(|row| {
                    (0..COLUMNS.len())
                        .map(|pos| (mask & (1 << pos) != 0).then(|| key(row, pos)))
                        .collect::<Vec<_>>()
                })
                .collect::<HashSet<_>>()
                .len()
        })
        .sum()
}

fn constant_columns(rows: &[Row]) -> usize {
    (0..COLUMNS.len())
        .filter(|&pos| rows.iter().map(|row| key(row, pos)).collect::<HashSet<_>>().len() == 1)
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: CASES,
        rng_seed: RngSeed::Fixed(0),
        max_shrink_iters: 0,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn one_block_per_grouping(rows in dataset()) {
        let table = to_table(&rows);
        let result = grouping_sets(&table, &COLUMNS, sum_total).unwrap();

        prop_assert_eq!(result.stats.groupings, 8);
        prop_assert_eq!(result.row_count(), expected_row_count(&rows));
    }

    #[test]
    fn k_constant_columns_need_2_pow_n_minus_k_aggregations(rows in dataset()) {
        let table = to_table(&rows);
        let result = grouping_sets(&table, &COLUMNS, sum_total).unwrap();

        let k = constant_columns(&rows);
        prop_assert_eq!(result.stats.degenerate_columns.len(), k);
        prop_assert_eq!(result.stats.aggregations, 1usize << (COLUMNS.len() - k));
    }

    #[test]
    fn collapsing_never_changes_the_output(rows in dataset()) {
        let table = to_table(&rows);
        let optimized = grouping_sets(&table, &COLUMNS, sum_total).unwrap();
        let naive = grouping_sets_with_options(
            &table,
            &COLUMNS,
            sum_total,
            &GroupingSetsOptions::naive(),
        )
        .unwrap();

        prop_assert_eq!(&optimized.rows, &naive.rows);
        prop_assert_eq!(naive.stats.aggregations, 8);
    }

    #[test]
    fn every_row_sums_its_matching_source_rows(rows in dataset()) {
        let table = to_table(&rows);
        let result = grouping_sets(&table, &COLUMNS, sum_total).unwrap();

        for out in &result.rows {
            let expected: f64 = table
                .rows()
                .iter()
                .filter(|source| {
                    out.keys
                        .iter()
                        .enumerate()
                        .all(|(pos, key)| key.value().map_or(true, |v| &source[pos] == v))
                })
                .filter_map(|source| source[3].as_f64())
                .sum();
            prop_assert_eq!(&out.values, &vec![Value::from(expected)]);
        }
    }
}
