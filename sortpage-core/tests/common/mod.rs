#![allow(dead_code)]

use once_cell::sync::Lazy;
use sortpage_core::query::{Schema, Sortable};

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category: Option<Category>,
}

impl Sortable for Category {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: Lazy<Schema<Category>> = Lazy::new(|| {
            Schema::builder("Category")
                .table("categories")
                .relation("c")
                .field("Id", |c: &Category| c.id)
                .field("Name", |c: &Category| c.name.clone())
                .build()
        });
        &SCHEMA
    }
}

impl Sortable for Product {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: Lazy<Schema<Product>> = Lazy::new(|| {
            Schema::builder("Product")
                .table("products")
                .relation("p")
                .field("Id", |p: &Product| p.id)
                .field("Name", |p: &Product| p.name.clone())
                .nested("Category", |p: &Product| p.category.as_ref())
                .build()
        });
        &SCHEMA
    }
}

pub fn category(id: i32, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
    }
}

pub fn product(id: i32, name: &str, category: Option<&Category>) -> Product {
    Product {
        id,
        name: name.to_string(),
        category: category.cloned(),
    }
}

/// Five products over two categories with ties on the category
pub fn mixed_products() -> Vec<Product> {
    let category_a = category(1, "Category A");
    let category_b = category(2, "Category B");

    vec![
        product(5, "Product E", Some(&category_b)),
        product(1, "Product A", Some(&category_b)),
        product(4, "Product D", Some(&category_a)),
        product(2, "Product B", Some(&category_b)),
        product(3, "Product C", Some(&category_a)),
    ]
}

pub fn names<'a>(items: impl IntoIterator<Item = &'a Product>) -> Vec<&'a str> {
    items.into_iter().map(|p| p.name.as_str()).collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
