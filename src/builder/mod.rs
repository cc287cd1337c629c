//! Package builder core: selection state and the pricing calculator.
//!
//! # Data Flow
//! ```text
//! client action (toggle / ±quantity / reset)
//!     → sessions.rs (locate the session's SelectionState)
//!     → selection.rs (apply the mutation)
//!     → pricing.rs (re-derive PricingResult from scratch)
//!     → HTTP response (rounded for display)
//! ```
//!
//! # Design Decisions
//! - Pricing is a pure projection of the selection, recomputed on every
//!   read; nothing is cached or incrementally updated.
//! - The reducer takes a resolved `ServiceOption`, so an unknown service id
//!   cannot reach it; the HTTP layer does catalog lookup first.
//! - Invalid quantity adjustments are no-ops rather than errors.

pub mod pricing;
pub mod selection;
pub mod sessions;
pub mod types;

pub use pricing::{discount_percent, round_to_cents};
pub use selection::SelectionState;
pub use sessions::SessionStore;
pub use types::{PricingResult, SelectionEntry};
