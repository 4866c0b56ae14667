//! Type-safe key-value snapshot store for the storefront.
//!
//! Provides a simple, ergonomic API for keeping small pieces of state (the
//! cart, mostly) in a local key-value store with automatic JSON
//! serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::Cache;
//!
//! let cache = Cache::open("/tmp/storefront")?;
//!
//! // Store a value
//! cache.set("cart", &lines)?;
//!
//! // Retrieve a value
//! let lines: Option<Vec<CartLine>> = cache.get("cart")?;
//!
//! // Delete a value
//! cache.delete("cart")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvBackend};
}
