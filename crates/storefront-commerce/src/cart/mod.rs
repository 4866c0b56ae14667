//! Shopping cart module.
//!
//! Contains the cart, its lines, and the hook that hears about snapshot
//! writes that didn't make it to storage.

mod cart;
mod persist;

pub use cart::{Cart, CartLine, RemoveOutcome, CART_SNAPSHOT_KEY};
pub use persist::{LogObserver, PersistenceObserver, PersistenceWriteFailure, SnapshotOperation};
