mod common;

use common::{Category, category, mixed_products, names};
use sortpage_core::query::prelude::*;
use sortpage_core::{ListParams, QueryConfig, paginate};

fn three_categories() -> Vec<Category> {
    vec![
        category(1, "Category A"),
        category(2, "Category B"),
        category(3, "Category C"),
    ]
}

#[test]
fn test_one_item_per_page_returns_one_element() {
    let page = three_categories().as_query().paginate(2, 1).into_vec();

    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Category B");
}

#[test]
fn test_page_length_matches_remaining_items() {
    let total = 7i64;
    for page_size in 1..=4i64 {
        for page_number in 1..=5i64 {
            let items: Vec<Category> = (0..total as i32)
                .map(|id| category(id, &format!("c{id}")))
                .collect();

            let page = paginate(items.as_query(), page_number, page_size).into_vec();

            let expected = page_size.min((total - (page_number - 1) * page_size).max(0));
            assert_eq!(
                page.len() as i64,
                expected,
                "page {page_number} size {page_size}"
            );
        }
    }
}

#[test]
fn test_page_beyond_end_is_empty() {
    let page = three_categories().as_query().paginate(4, 1).count();
    assert_eq!(page, 0);
}

#[test]
fn test_degenerate_inputs_are_permissive() {
    // Page numbers below one clamp to the first page
    let first = three_categories().as_query().paginate(0, 2).into_vec();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].id, 1);

    let negative = three_categories().as_query().paginate(-3, 2).into_vec();
    assert_eq!(negative[0].id, 1);

    // Non-positive page sizes yield nothing
    assert_eq!(three_categories().as_query().paginate(1, 0).count(), 0);
    assert_eq!(three_categories().as_query().paginate(2, -1).count(), 0);
}

#[test]
fn test_pagination_follows_current_order() {
    let page = mixed_products()
        .as_query()
        .order_by_expression("Name:desc")
        .unwrap()
        .paginate(2, 2)
        .into_vec();

    assert_eq!(names(&page), ["Product C", "Product B"]);
}

#[test]
fn test_page_request_form() {
    let page = three_categories()
        .as_query()
        .page(PageRequest::new(3, 1))
        .first()
        .map(|c| c.name);

    assert_eq!(page.as_deref(), Some("Category C"));
}

#[test]
fn test_list_params_apply_defaults() {
    let params: ListParams = serde_json::from_str(r#"{"sort": "Category.Name:desc, Id"}"#).unwrap();
    let config = QueryConfig::default();

    let page = params.apply(mixed_products().as_query(), &config).unwrap().into_vec();

    assert_eq!(
        names(&page),
        ["Product A", "Product B", "Product E", "Product C", "Product D"]
    );
}

#[test]
fn test_list_params_clamp_page_size() {
    let params = ListParams {
        sort: None,
        page: Some(1),
        page_size: Some(10_000),
    };
    let config = QueryConfig {
        default_page_size: 2,
        max_page_size: 3,
        max_sort_terms: 2,
    };

    assert_eq!(params.page_request(&config), PageRequest::new(1, 3));

    let page = params.apply(mixed_products().as_query(), &config).unwrap().into_vec();
    assert_eq!(page.len(), 3);

    let defaulted = ListParams::default().page_request(&config);
    assert_eq!(defaulted, PageRequest::new(1, 2));
}

#[test]
fn test_list_params_reject_too_many_terms() {
    let params = ListParams {
        sort: Some("Id, Name, Category.Name".to_string()),
        ..ListParams::default()
    };
    let config = QueryConfig {
        max_sort_terms: 2,
        ..QueryConfig::default()
    };

    let err = params
        .apply(mixed_products().as_query(), &config)
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument(_)));
}

#[test]
fn test_list_params_accept_camel_case_page_size() {
    let params: ListParams = serde_json::from_str(r#"{"page": 2, "pageSize": 5}"#).unwrap();
    assert_eq!(params.page, Some(2));
    assert_eq!(params.page_size, Some(5));
}
