// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod catalog;
mod product;

pub use catalog::Catalog;
pub use product::{Product, ProductId, ID_MAX_LEN, MAX_RATING, NAME_MAX_LEN};

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
    Duplicate(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidFormat(msg) => f.write_str(msg),
            Self::Duplicate(id) => write!(f, "duplicate product id: {id}"),
        }
    }
}

impl std::error::Error for ParseError {}
