// SPDX-License-Identifier: Apache-2.0

use crate::ParseError;
use serde::{Deserialize, Serialize};

pub const ID_MAX_LEN: usize = 64;
pub const NAME_MAX_LEN: usize = 256;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ProductId(String);

impl ProductId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("product id"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("product id"));
        }
        if input.len() > ID_MAX_LEN {
            return Err(ParseError::TooLong("product id", ID_MAX_LEN));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One catalog record. Field names on the wire are camelCase because the
/// storefront UI consumes the serialized form directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: String,
    pub brand: Option<String>,
    pub rating: f64,
    pub review_count: u64,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub in_stock: bool,
    pub features: Option<Vec<String>>,
    pub sku: Option<String>,
}

impl Product {
    pub fn validate(&self) -> Result<(), ParseError> {
        ProductId::parse(self.id.as_str())?;
        if self.name.trim().is_empty() {
            return Err(ParseError::Empty("product name"));
        }
        if self.name.len() > NAME_MAX_LEN {
            return Err(ParseError::TooLong("product name", NAME_MAX_LEN));
        }
        if self.category.trim().is_empty() {
            return Err(ParseError::Empty("product category"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ParseError::InvalidFormat(
                "product price must be finite and >= 0",
            ));
        }
        if let Some(original) = self.original_price {
            if !original.is_finite() || original < 0.0 {
                return Err(ParseError::InvalidFormat(
                    "product originalPrice must be finite and >= 0",
                ));
            }
        }
        if !self.rating.is_finite() || !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(ParseError::InvalidFormat(
                "product rating must be within [0, 5]",
            ));
        }
        Ok(())
    }
}
