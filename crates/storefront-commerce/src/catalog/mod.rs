//! Product catalog module.
//!
//! Contains the product types, the remote catalog source, and the
//! client-side catalog that holds the fetched product list.

mod product;
mod source;
mod store;

pub use product::{Product, Rating};
pub use source::{CatalogSource, HttpCatalogSource, DEFAULT_CATALOG_URL};
pub use store::ProductCatalog;
