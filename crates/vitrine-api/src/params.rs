use crate::errors::ApiError;
use std::collections::BTreeMap;
use vitrine_query::SortSpec;

pub const DEFAULT_LIMIT: usize = 8;
pub const DEFAULT_MAX_LIMIT: usize = 100;

/// Query-string parameters of `GET /products`, as the storefront UI sends
/// them. The free-text term arrives under the `query` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListProductsParams {
    pub term: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: usize,
    pub limit: usize,
    pub pretty: bool,
}

pub fn parse_list_products_params(
    query: &BTreeMap<String, String>,
) -> Result<ListProductsParams, ApiError> {
    parse_list_products_params_with_limit(query, DEFAULT_LIMIT, DEFAULT_MAX_LIMIT)
}

pub fn parse_list_products_params_with_limit(
    query: &BTreeMap<String, String>,
    default_limit: usize,
    max_limit: usize,
) -> Result<ListProductsParams, ApiError> {
    let limit = if let Some(raw) = query.get("limit") {
        let value = raw
            .parse::<usize>()
            .map_err(|_| ApiError::invalid_param("limit", raw))?;
        if value == 0 || value > max_limit {
            return Err(ApiError::invalid_param("limit", raw));
        }
        value
    } else {
        default_limit
    };

    let page = if let Some(raw) = query.get("page") {
        let value = raw
            .parse::<usize>()
            .map_err(|_| ApiError::invalid_param("page", raw))?;
        if value == 0 {
            return Err(ApiError::invalid_param("page", raw));
        }
        value
    } else {
        1
    };

    // Empty strings mean "no filter"; the UI always sends the keys.
    let term = query.get("query").cloned().filter(|v| !v.is_empty());
    let category = query.get("category").cloned().filter(|v| !v.is_empty());
    let sort = query.get("sort").cloned().filter(|v| !v.is_empty());

    Ok(ListProductsParams {
        term,
        category,
        sort,
        page,
        limit,
        pretty: query
            .get("pretty")
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
    })
}

pub fn parse_sort_spec(raw: Option<String>) -> Result<Option<SortSpec>, ApiError> {
    let Some(value) = raw else {
        return Ok(None);
    };
    let spec = SortSpec::parse(&value).map_err(|_| ApiError::invalid_param("sort", &value))?;
    Ok(Some(spec))
}
