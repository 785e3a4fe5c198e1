#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use vitrine_model::Product;

pub const CRATE_NAME: &str = "vitrine-query";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProductFilter {
    pub term: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Price,
    Rating,
    ReviewCount,
}

impl SortField {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            "rating" => Some(Self::Rating),
            "reviewCount" => Some(Self::ReviewCount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parses the wire form: a sortable field name with an optional
    /// leading `-` for descending, e.g. `price` or `-rating`.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let (direction, name) = match raw.strip_prefix('-') {
            Some(rest) => (SortDirection::Descending, rest),
            None => (SortDirection::Ascending, raw),
        };
        let field = SortField::parse(name)
            .ok_or_else(|| QueryError(format!("unknown sort field: {name}")))?;
        Ok(Self { field, direction })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryLimits {
    pub max_limit: usize,
    pub max_term_len: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_limit: 100,
            max_term_len: 128,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductQueryRequest {
    pub filter: ProductFilter,
    pub sort: Option<SortSpec>,
    /// 1-based page index.
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: usize,
}

#[derive(Debug)]
pub struct QueryError(pub String);

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for QueryError {}

/// Canonical term normalization policy: NFKC + Unicode lowercase.
#[must_use]
pub fn normalize_term(input: &str) -> String {
    input.nfkc().collect::<String>().to_lowercase()
}

/// Runs the fixed query pipeline over the catalog: validate, filter by
/// term, filter by category, count, stable sort, paginate. Pure read; the
/// caller keeps ownership of the collection.
pub fn query_products(
    products: &[Product],
    req: &ProductQueryRequest,
    limits: &QueryLimits,
) -> Result<ProductPage, QueryError> {
    validate_request(req, limits)?;

    let term = req
        .filter
        .term
        .as_deref()
        .map(normalize_term)
        .filter(|t| !t.is_empty());
    let category = req.filter.category.as_deref().filter(|c| !c.is_empty());

    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| matches_term(p, term.as_deref()))
        .filter(|p| category.is_none_or(|c| p.category == c))
        .collect();
    let total = matched.len();

    // Vec::sort_by is stable, so equal keys keep fixture order and
    // pagination stays deterministic across calls in either direction.
    if let Some(sort) = &req.sort {
        matched.sort_by(|a, b| {
            let ord = compare_by_field(a, b, sort.field);
            match sort.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }

    let start = (req.page - 1).checked_mul(req.limit).unwrap_or(usize::MAX);
    let items: Vec<Product> = matched
        .into_iter()
        .skip(start)
        .take(req.limit)
        .cloned()
        .collect();

    Ok(ProductPage { items, total })
}

fn validate_request(req: &ProductQueryRequest, limits: &QueryLimits) -> Result<(), QueryError> {
    if req.limit == 0 || req.limit > limits.max_limit {
        return Err(QueryError(format!(
            "limit must be between 1 and {}",
            limits.max_limit
        )));
    }
    if req.page == 0 {
        return Err(QueryError("page must be >= 1".to_string()));
    }
    if let Some(term) = &req.filter.term {
        if term.len() > limits.max_term_len {
            return Err(QueryError(format!(
                "term length exceeds {}",
                limits.max_term_len
            )));
        }
    }
    Ok(())
}

fn matches_term(product: &Product, term: Option<&str>) -> bool {
    let Some(term) = term else {
        return true;
    };
    normalize_term(&product.name).contains(term)
        || normalize_term(&product.description).contains(term)
}

fn compare_by_field(a: &Product, b: &Product, field: SortField) -> Ordering {
    match field {
        SortField::Name => normalize_term(&a.name).cmp(&normalize_term(&b.name)),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Rating => a.rating.total_cmp(&b.rating),
        SortField::ReviewCount => a.review_count.cmp(&b.review_count),
    }
}

#[cfg(test)]
mod query_tests;
