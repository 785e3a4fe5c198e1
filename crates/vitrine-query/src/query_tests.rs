use super::*;
use vitrine_model::ProductId;

fn product(id: &str, name: &str, category: &str, price: f64, rating: f64) -> Product {
    Product {
        id: ProductId::parse(id).expect("id"),
        name: name.to_string(),
        description: format!("{name} for everyday use"),
        price,
        original_price: None,
        category: category.to_string(),
        brand: None,
        rating,
        review_count: 10,
        image: None,
        images: None,
        in_stock: true,
        features: None,
        sku: None,
    }
}

// Ten products, three of them Electronics, matching the worked example in
// the storefront contract.
fn fixture() -> Vec<Product> {
    vec![
        product("p-01", "Wireless Headphones", "Electronics", 199.99, 4.6),
        product("p-02", "Chef Knife", "Home", 89.0, 4.8),
        product("p-03", "Smart Speaker", "Electronics", 49.99, 4.1),
        product("p-04", "Yoga Mat", "Sports", 29.0, 4.4),
        product("p-05", "Cast Iron Skillet", "Home", 35.0, 4.7),
        product("p-06", "4K Action Camera", "Electronics", 249.0, 4.3),
        product("p-07", "Trail Running Shoes", "Sports", 119.0, 4.5),
        product("p-08", "French Press", "Home", 25.0, 4.2),
        product("p-09", "Resistance Bands", "Sports", 19.0, 4.0),
        product("p-10", "Stand Mixer", "Home", 329.0, 4.9),
    ]
}

fn request(filter: ProductFilter, sort: Option<SortSpec>, page: usize, limit: usize) -> ProductQueryRequest {
    ProductQueryRequest {
        filter,
        sort,
        page,
        limit,
    }
}

fn ids(page: &ProductPage) -> Vec<&str> {
    page.items.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn empty_term_and_category_match_the_whole_collection() {
    let products = fixture();
    let req = request(
        ProductFilter {
            term: Some(String::new()),
            category: Some(String::new()),
        },
        None,
        1,
        100,
    );
    let page = query_products(&products, &req, &QueryLimits::default()).expect("query");
    assert_eq!(page.total, products.len());
    assert_eq!(page.items.len(), products.len());
}

#[test]
fn page_length_follows_the_pagination_formula() {
    let products = fixture();
    let limits = QueryLimits::default();
    for limit in [1, 2, 3, 7, 10, 25] {
        for page_no in 1..=6 {
            let req = request(ProductFilter::default(), None, page_no, limit);
            let page = query_products(&products, &req, &limits).expect("query");
            let expected = limit.min(page.total.saturating_sub((page_no - 1) * limit));
            assert_eq!(
                page.items.len(),
                expected,
                "page={page_no} limit={limit}"
            );
            assert_eq!(page.total, products.len());
        }
    }
}

#[test]
fn unsorted_results_preserve_fixture_order() {
    let products = fixture();
    let req = request(ProductFilter::default(), None, 1, 100);
    let page = query_products(&products, &req, &QueryLimits::default()).expect("query");
    let expected: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids(&page), expected);
}

#[test]
fn price_ascending_and_descending_are_reverses() {
    let products = fixture();
    let limits = QueryLimits::default();
    let asc = query_products(
        &products,
        &request(
            ProductFilter::default(),
            Some(SortSpec::parse("price").expect("sort")),
            1,
            100,
        ),
        &limits,
    )
    .expect("ascending query");
    let desc = query_products(
        &products,
        &request(
            ProductFilter::default(),
            Some(SortSpec::parse("-price").expect("sort")),
            1,
            100,
        ),
        &limits,
    )
    .expect("descending query");

    let mut reversed = ids(&desc);
    reversed.reverse();
    assert_eq!(ids(&asc), reversed);
    assert!(asc
        .items
        .windows(2)
        .all(|w| w[0].price <= w[1].price));
}

#[test]
fn sort_is_stable_for_equal_keys_in_both_directions() {
    let products = vec![
        product("p-a", "Alpha", "Home", 10.0, 4.0),
        product("p-b", "Bravo", "Home", 10.0, 4.0),
        product("p-c", "Charlie", "Home", 5.0, 4.0),
        product("p-d", "Delta", "Home", 10.0, 4.0),
    ];
    let limits = QueryLimits::default();

    let asc = query_products(
        &products,
        &request(
            ProductFilter::default(),
            Some(SortSpec::parse("price").expect("sort")),
            1,
            10,
        ),
        &limits,
    )
    .expect("ascending query");
    assert_eq!(ids(&asc), vec!["p-c", "p-a", "p-b", "p-d"]);

    let desc = query_products(
        &products,
        &request(
            ProductFilter::default(),
            Some(SortSpec::parse("-price").expect("sort")),
            1,
            10,
        ),
        &limits,
    )
    .expect("descending query");
    // Equal keys must retain fixture order even when the direction flips.
    assert_eq!(ids(&desc), vec!["p-a", "p-b", "p-d", "p-c"]);
}

#[test]
fn category_with_no_matches_is_empty_for_any_page() {
    let products = fixture();
    let limits = QueryLimits::default();
    for page_no in [1, 2, 9] {
        let req = request(
            ProductFilter {
                term: None,
                category: Some("Garden".to_string()),
            },
            None,
            page_no,
            4,
        );
        let page = query_products(&products, &req, &limits).expect("query");
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }
}

#[test]
fn electronics_pagination_matches_the_contract_example() {
    let products = fixture();
    let limits = QueryLimits::default();
    let filter = ProductFilter {
        term: None,
        category: Some("Electronics".to_string()),
    };

    let first = query_products(
        &products,
        &request(filter.clone(), None, 1, 2),
        &limits,
    )
    .expect("first page");
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.total, 3);

    let second = query_products(&products, &request(filter, None, 2, 2), &limits)
        .expect("second page");
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.total, 3);
}

#[test]
fn out_of_range_page_keeps_total_and_returns_no_items() {
    let products = fixture();
    let req = request(ProductFilter::default(), None, 50, 8);
    let page = query_products(&products, &req, &QueryLimits::default()).expect("query");
    assert!(page.items.is_empty());
    assert_eq!(page.total, products.len());
}

#[test]
fn term_matches_name_and_description_case_insensitively() {
    let products = fixture();
    let limits = QueryLimits::default();

    let by_name = query_products(
        &products,
        &request(
            ProductFilter {
                term: Some("HEADPHONES".to_string()),
                category: None,
            },
            None,
            1,
            10,
        ),
        &limits,
    )
    .expect("term query");
    assert_eq!(ids(&by_name), vec!["p-01"]);

    // Descriptions are generated as "<name> for everyday use".
    let by_description = query_products(
        &products,
        &request(
            ProductFilter {
                term: Some("everyday".to_string()),
                category: None,
            },
            None,
            1,
            100,
        ),
        &limits,
    )
    .expect("description query");
    assert_eq!(by_description.total, products.len());
}

#[test]
fn term_and_category_filters_compose() {
    let products = fixture();
    let req = request(
        ProductFilter {
            term: Some("camera".to_string()),
            category: Some("Electronics".to_string()),
        },
        None,
        1,
        10,
    );
    let page = query_products(&products, &req, &QueryLimits::default()).expect("query");
    assert_eq!(ids(&page), vec!["p-06"]);
    assert_eq!(page.total, 1);
}

#[test]
fn invalid_limit_and_page_are_rejected() {
    let products = fixture();
    let limits = QueryLimits::default();

    let zero_limit = request(ProductFilter::default(), None, 1, 0);
    let err = query_products(&products, &zero_limit, &limits).expect_err("limit 0");
    assert!(err.to_string().contains("limit"));

    let oversized = request(ProductFilter::default(), None, 1, limits.max_limit + 1);
    assert!(query_products(&products, &oversized, &limits).is_err());

    let zero_page = request(ProductFilter::default(), None, 0, 5);
    let err = query_products(&products, &zero_page, &limits).expect_err("page 0");
    assert!(err.to_string().contains("page"));

    let long_term = request(
        ProductFilter {
            term: Some("x".repeat(limits.max_term_len + 1)),
            category: None,
        },
        None,
        1,
        5,
    );
    assert!(query_products(&products, &long_term, &limits).is_err());
}

#[test]
fn sort_spec_parses_direction_and_rejects_unknown_fields() {
    let spec = SortSpec::parse("-rating").expect("parse -rating");
    assert_eq!(spec.field, SortField::Rating);
    assert_eq!(spec.direction, SortDirection::Descending);

    let spec = SortSpec::parse("name").expect("parse name");
    assert_eq!(spec.direction, SortDirection::Ascending);

    assert!(SortSpec::parse("color").is_err());
    assert!(SortSpec::parse("-").is_err());
}

#[test]
fn name_sort_collates_case_insensitively() {
    let products = vec![
        product("p-a", "zebra print mug", "Home", 10.0, 4.0),
        product("p-b", "Air Fryer", "Home", 20.0, 4.0),
        product("p-c", "blender", "Home", 30.0, 4.0),
    ];
    let page = query_products(
        &products,
        &request(
            ProductFilter::default(),
            Some(SortSpec::parse("name").expect("sort")),
            1,
            10,
        ),
        &QueryLimits::default(),
    )
    .expect("query");
    assert_eq!(ids(&page), vec!["p-b", "p-c", "p-a"]);
}
