//! Cart and cart line types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storefront_cache::Cache;

use crate::cart::{LogObserver, PersistenceObserver, PersistenceWriteFailure, SnapshotOperation};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;

/// Key the cart snapshot is stored under.
pub const CART_SNAPSHOT_KEY: &str = "cart";

/// A product in the cart together with how many of it.
///
/// Serialized as the product's own fields plus `quantity`, so a snapshot
/// entry reads like a catalog entry with a count attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// The product as it was when first added.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, always at least 1 while the line exists.
    pub quantity: u32,
}

impl CartLine {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Product ID of this line.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// `price * quantity`, clamped instead of overflowing.
    pub fn subtotal(&self) -> Money {
        self.product
            .price
            .saturating_multiply(i64::from(self.quantity))
    }
}

/// Result of removing one unit of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// No line for that product; nothing changed.
    NotInCart,
    /// Quantity went down; the new quantity.
    Decremented(u32),
    /// The last unit went and the line with it.
    Removed,
}

/// A shopping cart mirrored to a snapshot store.
///
/// Lines keep the order in which products were first added, and there is
/// at most one line per product. Every change is written to the snapshot
/// store straight away; a failed write is reported to the
/// [`PersistenceObserver`] and otherwise ignored.
pub struct Cart {
    lines: Vec<CartLine>,
    cache: Cache,
    key: String,
    observer: Arc<dyn PersistenceObserver>,
}

impl Cart {
    /// Load the cart from the snapshot under [`CART_SNAPSHOT_KEY`].
    pub fn load(cache: Cache) -> Self {
        Self::load_with_key(cache, CART_SNAPSHOT_KEY)
    }

    /// Load the cart from the snapshot under `key`.
    ///
    /// A missing or unreadable snapshot gives an empty cart.
    pub fn load_with_key(cache: Cache, key: impl Into<String>) -> Self {
        let key = key.into();
        let lines = match cache.get::<Vec<CartLine>>(&key) {
            Ok(Some(lines)) => {
                let count = lines.len();
                let lines = normalize(lines);
                if lines.len() != count {
                    tracing::warn!(key = %key, "cart snapshot had invalid lines; repaired");
                }
                tracing::debug!(key = %key, lines = lines.len(), "cart restored from snapshot");
                lines
            }
            Ok(None) => {
                tracing::debug!(key = %key, "no cart snapshot; starting empty");
                Vec::new()
            }
            Err(error) => {
                tracing::warn!(key = %key, %error, "cart snapshot unreadable; starting empty");
                Vec::new()
            }
        };

        Self {
            lines,
            cache,
            key,
            observer: Arc::new(LogObserver),
        }
    }

    /// Report persistence failures to `observer` instead of the log.
    pub fn with_observer(mut self, observer: Arc<dyn PersistenceObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Add one unit of `product`.
    ///
    /// An existing line keeps the metadata it was created with; only its
    /// quantity changes. Returns the line's new quantity.
    pub fn add_to_cart(&mut self, product: &Product) -> u32 {
        let quantity = match self.lines.iter_mut().find(|l| l.id() == product.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.lines.push(CartLine::new(product.clone()));
                1
            }
        };
        self.persist();
        quantity
    }

    /// Remove one unit of the product with `id`.
    ///
    /// Removing a product that isn't in the cart changes nothing and writes
    /// nothing.
    pub fn remove_from_cart(&mut self, id: ProductId) -> RemoveOutcome {
        let Some(index) = self.lines.iter().position(|l| l.id() == id) else {
            return RemoveOutcome::NotInCart;
        };

        let outcome = if self.lines[index].quantity > 1 {
            self.lines[index].quantity -= 1;
            RemoveOutcome::Decremented(self.lines[index].quantity)
        } else {
            self.lines.remove(index);
            RemoveOutcome::Removed
        };
        self.persist();
        outcome
    }

    /// Empty the cart and drop its snapshot.
    pub fn clear(&mut self) {
        self.lines.clear();
        if let Err(error) = self.cache.delete(&self.key) {
            self.report(SnapshotOperation::Delete, error.to_string());
        }
    }

    /// Lines in the order products were first added.
    pub fn cart_items(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of `price * quantity` over all lines; zero when empty.
    pub fn cart_total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |total, line| total.saturating_add(&line.subtotal()))
    }

    /// Total number of units (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the line for a product.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id() == id)
    }

    /// Snapshot key this cart writes to.
    pub fn snapshot_key(&self) -> &str {
        &self.key
    }

    fn persist(&self) {
        if let Err(error) = self.cache.set(&self.key, self.lines.as_slice()) {
            self.report(SnapshotOperation::Write, error.to_string());
        }
    }

    fn report(&self, operation: SnapshotOperation, reason: String) {
        self.observer.write_failed(&PersistenceWriteFailure {
            key: self.key.clone(),
            operation,
            reason,
        });
    }
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart")
            .field("key", &self.key)
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

/// Drop empty lines and fold duplicates into the first occurrence.
fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut out: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            continue;
        }
        match out.iter_mut().find(|l| l.id() == line.id()) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => out.push(line),
        }
    }
    out
}
