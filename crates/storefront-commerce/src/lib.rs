//! Catalog, cart and product search for the storefront.
//!
//! - **Catalog**: products fetched from a remote JSON endpoint and held for
//!   the session
//! - **Cart**: lines with quantities, totals, and a local snapshot that
//!   survives restarts
//! - **Search**: case-insensitive title filter for listings
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::Cache;
//! use storefront_commerce::prelude::*;
//!
//! let catalog = ProductCatalog::from_url(DEFAULT_CATALOG_URL);
//! let products = catalog.ensure_loaded().await?;
//!
//! let mut cart = Cart::load(Cache::open("/tmp/storefront")?);
//! cart.add_to_cart(&products[0]);
//! println!("Total: {}", cart.cart_total());
//!
//! for product in filter_products(&products, "backpack") {
//!     println!("{} {}", product.title, product.price);
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        CatalogSource, HttpCatalogSource, Product, ProductCatalog, Rating, DEFAULT_CATALOG_URL,
    };

    // Cart
    pub use crate::cart::{
        Cart, CartLine, LogObserver, PersistenceObserver, PersistenceWriteFailure, RemoveOutcome,
        CART_SNAPSHOT_KEY,
    };

    // Search
    pub use crate::search::{filter_products, TitleFilter};
}
