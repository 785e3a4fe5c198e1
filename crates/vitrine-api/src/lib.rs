// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod dto;
mod errors;
mod params;

pub use dto::ProductPageDto;
pub use errors::{ApiError, ApiErrorCode};
pub use params::{
    parse_list_products_params, parse_list_products_params_with_limit, parse_sort_spec,
    ListProductsParams,
};

pub const CRATE_NAME: &str = "vitrine-api";
