//! Search module.
//!
//! Title filtering for product listings.

mod filter;

pub use filter::{filter_products, TitleFilter};
