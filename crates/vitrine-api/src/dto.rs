// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use vitrine_model::Product;
use vitrine_query::ProductPage;

/// The exact list-response shape the storefront UI consumes: a bounded
/// `items` slice plus the pre-pagination match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductPageDto {
    pub items: Vec<Product>,
    pub total: usize,
}

impl From<ProductPage> for ProductPageDto {
    fn from(page: ProductPage) -> Self {
        Self {
            items: page.items,
            total: page.total,
        }
    }
}
