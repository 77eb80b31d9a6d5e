use cube_table::{GroupedView, Table, TableBackend, Value};
use pretty_assertions::assert_eq;

fn sales() -> Table {
    Table::from_rows(
        "Sales",
        vec!["Area", "Year", "Month", "Total"],
        vec![
            vec![Value::from("a"), Value::from(2014), Value::from(1), Value::from(5)],
            vec![Value::from("a"), Value::from(2014), Value::from(2), Value::from(6)],
            vec![Value::from("b"), Value::from(2014), Value::from(3), Value::from(7)],
            vec![Value::from("b"), Value::from(2015), Value::from(4), Value::from(8)],
        ],
    )
    .unwrap()
}

#[test]
fn grouping_by_two_columns_sums_each_combination() {
    let table = sales();
    let view = GroupedView::new(&table, &["Area", "Year"]).unwrap();

    let keys = view.keys_table().unwrap();
    assert_eq!(
        keys.rows(),
        [
            vec![Value::from("a"), Value::from(2014)],
            vec![Value::from("b"), Value::from(2014)],
            vec![Value::from("b"), Value::from(2015)],
        ]
    );
    assert_eq!(
        view.column("Total").unwrap().sum().unwrap(),
        vec![Value::from(11), Value::from(7), Value::from(8)]
    );
}

#[test]
fn grouping_order_does_not_change_partition_contents() {
    let table = sales();
    let by_area_year = GroupedView::new(&table, &["Area", "Year"]).unwrap();
    let by_year_area = GroupedView::new(&table, &["Year", "Area"]).unwrap();

    let mut left: Vec<Vec<usize>> = by_area_year
        .partitions()
        .iter()
        .map(|p| p.rows().to_vec())
        .collect();
    let mut right: Vec<Vec<usize>> = by_year_area
        .partitions()
        .iter()
        .map(|p| p.rows().to_vec())
        .collect();
    left.sort();
    right.sort();
    assert_eq!(left, right);
}

#[test]
fn blank_keys_form_their_own_partition() {
    let table = Table::from_columns(
        "Sparse",
        vec![
            ("Area", vec![Value::Blank, Value::from("a"), Value::Blank]),
            ("Total", vec![Value::from(1), Value::from(2), Value::from(3)]),
        ],
    )
    .unwrap();

    assert_eq!(table.distinct_values(0), vec![Value::Blank, Value::from("a")]);

    let view = GroupedView::new(&table, &["Area"]).unwrap();
    assert_eq!(view.len(), 2);
    assert_eq!(view.partitions()[0].key(), [Value::Blank]);
    assert_eq!(
        view.column("Total").unwrap().sum().unwrap(),
        vec![Value::from(4), Value::from(2)]
    );
}

#[test]
fn backend_value_lookup_by_name() {
    let table = sales();
    let backend: &dyn TableBackend = &table;
    assert_eq!(backend.value(3, "Total"), Some(Value::from(8)));
    assert_eq!(backend.value(0, "Missing"), None);
    assert_eq!(backend.value(9, "Total"), None);
}
