// SPDX-License-Identifier: Apache-2.0

use crate::{ParseError, Product};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The full fixture collection. Loaded once at startup, validated, and
/// never mutated afterwards; concurrent readers share it by handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        let mut seen = BTreeSet::new();
        for product in &self.products {
            product.validate()?;
            if !seen.insert(product.id.as_str()) {
                return Err(ParseError::Duplicate(product.id.as_str().to_string()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProductId;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::parse(id).expect("id"),
            name: format!("Product {id}"),
            description: String::new(),
            price: 10.0,
            original_price: None,
            category: "Home".to_string(),
            brand: None,
            rating: 4.0,
            review_count: 0,
            image: None,
            images: None,
            in_stock: true,
            features: None,
            sku: None,
        }
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let catalog = Catalog::new(vec![product("a"), product("b"), product("a")]);
        let err = catalog.validate().expect_err("duplicate must fail");
        assert!(err.to_string().contains("duplicate product id"));
    }

    #[test]
    fn find_by_id_returns_matching_product() {
        let catalog = Catalog::new(vec![product("a"), product("b")]);
        catalog.validate().expect("valid catalog");
        assert_eq!(
            catalog.find_by_id("b").map(|p| p.id.as_str()),
            Some("b")
        );
        assert!(catalog.find_by_id("zz").is_none());
    }
}
