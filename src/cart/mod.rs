//! Checkout handoff: committed packages and the cart collection.

pub mod store;
pub mod types;

pub use store::CartStore;
pub use types::PackageItem;
