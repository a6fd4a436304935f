mod common;

use common::{Category, Product, category, init_tracing, mixed_products, names, product};
use sortpage_core::query::prelude::*;
use sortpage_core::order_by_expression;

fn categories(items: &[(i32, &str)]) -> Vec<Category> {
    items.iter().map(|(id, name)| category(*id, name)).collect()
}

fn category_names(items: Vec<Category>) -> Vec<String> {
    items.into_iter().map(|c| c.name).collect()
}

#[test]
fn test_without_sort_keeps_order() {
    init_tracing();
    let data = categories(&[(2, "Category B"), (1, "Category A")]);

    let sorted = data.as_query().order_by_expression("").unwrap().into_vec();

    assert_eq!(category_names(sorted), ["Category B", "Category A"]);
}

#[test]
fn test_whitespace_sort_keeps_order() {
    let data = categories(&[(3, "C"), (1, "A"), (2, "B")]);

    let sorted = data.as_query().order_by_expression(" \t ").unwrap().into_vec();

    assert_eq!(category_names(sorted), ["C", "A", "B"]);
}

#[test]
fn test_single_sort_defaults_ascending() {
    let data = categories(&[(2, "Category B"), (1, "Category A")]);

    let sorted = data.as_query().order_by_expression("Name").unwrap().into_vec();

    assert_eq!(category_names(sorted), ["Category A", "Category B"]);
}

#[test]
fn test_explicit_ascending() {
    let data = categories(&[(1, "Category A"), (2, "Category C"), (3, "Category B")]);

    let sorted = data.as_query().order_by_expression("Name:asc").unwrap().into_vec();

    assert_eq!(
        category_names(sorted),
        ["Category A", "Category B", "Category C"]
    );
}

#[test]
fn test_descending_suffix_is_case_insensitive() {
    for sort in ["Name:desc", "Name:DESC", "Name:Desc", "name : descending"] {
        let data = categories(&[(1, "Category A"), (2, "Category C"), (3, "Category B")]);

        let sorted = data.as_query().order_by_expression(sort).unwrap().into_vec();

        assert_eq!(
            category_names(sorted),
            ["Category C", "Category B", "Category A"],
            "sort string {sort:?}"
        );
    }
}

#[test]
fn test_numeric_property_uses_natural_order() {
    let data = categories(&[(10, "ten"), (9, "nine"), (100, "hundred")]);

    let sorted = data.as_query().order_by_expression("id").unwrap().into_vec();

    assert_eq!(category_names(sorted), ["nine", "ten", "hundred"]);
}

#[test]
fn test_nested_ascending() {
    let category_a = category(1, "Category A");
    let category_b = category(2, "Category B");
    let data = vec![
        product(1, "Product A", Some(&category_b)),
        product(2, "Product B", Some(&category_a)),
    ];

    let sorted = data
        .as_query()
        .order_by_expression("Category.Name:asc")
        .unwrap()
        .into_vec();

    assert_eq!(names(&sorted), ["Product B", "Product A"]);
}

#[test]
fn test_nested_descending() {
    let category_a = category(1, "Category A");
    let category_b = category(2, "Category B");
    let data = vec![
        product(1, "Product A", Some(&category_b)),
        product(2, "Product B", Some(&category_a)),
    ];

    let sorted = data
        .as_query()
        .order_by_expression("Category.Name:desc")
        .unwrap()
        .into_vec();

    assert_eq!(names(&sorted), ["Product A", "Product B"]);
}

#[test]
fn test_multiple_sorting_asc_then_desc() {
    let sorted = mixed_products()
        .as_query()
        .order_by_expression("Category.Name:asc, Name:desc")
        .unwrap()
        .into_vec();

    assert_eq!(
        names(&sorted),
        ["Product D", "Product C", "Product E", "Product B", "Product A"]
    );
}

#[test]
fn test_multiple_sorting_desc_then_asc() {
    let sorted = mixed_products()
        .as_query()
        .order_by_expression("Category.Name:desc, Name:asc")
        .unwrap()
        .into_vec();

    assert_eq!(
        names(&sorted),
        ["Product A", "Product B", "Product E", "Product C", "Product D"]
    );
}

#[test]
fn test_nested_path_as_secondary_term() {
    let sorted = mixed_products()
        .as_query()
        .order_by_expression("Id:asc, Category.Name:desc")
        .unwrap()
        .into_vec();

    assert_eq!(
        names(&sorted),
        ["Product A", "Product B", "Product C", "Product D", "Product E"]
    );
}

#[test]
fn test_missing_nested_reference_sorts_last_ascending() {
    let category_a = category(1, "Category A");
    let data = vec![
        product(1, "Orphan", None),
        product(2, "Product B", Some(&category_a)),
    ];

    let ascending = data
        .clone()
        .as_query()
        .order_by_expression("Category.Name")
        .unwrap()
        .into_vec();
    assert_eq!(names(&ascending), ["Product B", "Orphan"]);

    let descending = data
        .as_query()
        .order_by_expression("Category.Name:desc")
        .unwrap()
        .into_vec();
    assert_eq!(names(&descending), ["Orphan", "Product B"]);
}

#[test]
fn test_same_spec_twice_is_idempotent() {
    let sort = "Category.Name:asc, Id:desc";

    let once = mixed_products()
        .as_query()
        .order_by_expression(sort)
        .unwrap()
        .into_vec();
    let twice = order_by_expression(mixed_products().as_query(), sort)
        .and_then(|q| q.order_by_expression(sort))
        .unwrap()
        .into_vec();

    assert_eq!(once, twice);
}

#[test]
fn test_invalid_property_reports_segment() {
    let data = categories(&[(1, "Category A"), (2, "Category B")]);

    let err = data
        .as_query()
        .order_by_expression("NonExistentProperty")
        .unwrap_err();

    assert!(matches!(err, QueryError::PropertyNotFound { .. }));
    assert!(
        err.to_string()
            .contains("Property 'NonExistentProperty' not found")
    );
}

#[test]
fn test_invalid_nested_property_names_nested_type() {
    let err = mixed_products()
        .as_query()
        .order_by_expression("Category.NoSuchProp")
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Property 'NoSuchProp' not found on type 'Category'"
    );
}

#[test]
fn test_empty_property_before_colon_is_rejected() {
    let err = mixed_products()
        .as_query()
        .order_by_expression("Name, :asc")
        .unwrap_err();

    assert!(matches!(err, QueryError::InvalidArgument(_)));
}

#[test]
fn test_nested_object_cannot_be_a_key() {
    let err = mixed_products()
        .as_query()
        .order_by_expression("Category")
        .unwrap_err();

    assert!(matches!(err, QueryError::NotOrderable { .. }));
}

#[test]
fn test_errors_raised_before_enumeration() {
    use std::cell::Cell;

    let pulled = Cell::new(0usize);
    let source = mixed_products()
        .into_iter()
        .inspect(|_| pulled.set(pulled.get() + 1));

    let result = MemoryQuery::new(source).order_by_expression("Name, Missing:desc");

    assert!(result.is_err());
    assert_eq!(pulled.get(), 0);
}

#[test]
fn test_concurrent_calls_do_not_interfere() {
    let handles: Vec<_> = ["Name:asc", "Name:desc", "Category.Name:desc, Id"]
        .into_iter()
        .map(|sort| {
            std::thread::spawn(move || {
                let sorted = mixed_products()
                    .as_query()
                    .order_by_expression(sort)
                    .unwrap()
                    .into_vec();
                sorted.into_iter().map(|p: Product| p.id).collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<i32>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0], vec![1, 2, 3, 4, 5]);
    assert_eq!(results[1], vec![5, 4, 3, 2, 1]);
    assert_eq!(results[2], vec![1, 2, 5, 3, 4]);
}
