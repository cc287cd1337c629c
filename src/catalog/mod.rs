//! Service catalog subsystem.
//!
//! # Data Flow
//! ```text
//! config file ([[catalog.services]] tables)
//!     → config::loader (parse & validate)
//!     → ServiceCatalog::build (filter hidden/excluded, sort)
//!     → shared via ArcSwap to HTTP handlers
//!
//! On config reload the whole catalog is rebuilt and swapped atomically;
//! live builder sessions keep the prices they selected at.
//! ```

pub mod store;
pub mod types;

pub use store::ServiceCatalog;
pub use types::{ServiceCategory, ServiceOption};
