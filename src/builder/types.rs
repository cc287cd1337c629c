//! Package builder types.

use serde::{Deserialize, Serialize};

/// One selected service inside a builder session.
///
/// The name and unit price are captured from the catalog at selection time,
/// so an in-flight session is not repriced by a catalog reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    /// Catalog id of the selected service.
    pub service_id: String,

    /// Display name, captured at selection time.
    pub name: String,

    /// Monthly unit price, captured at selection time.
    pub unit_price: f64,

    /// Chosen quantity. Always at least 1: reaching zero removes the entry.
    pub quantity: u32,

    /// Preview image of the service, if it has one.
    pub image_url: Option<String>,
}

/// Priced view of a selection, re-derived from scratch on every read.
///
/// Monetary fields carry full floating-point precision; rounding to two
/// decimals happens only at display or commit time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PricingResult {
    /// Sum of unit price times quantity over all entries.
    pub subtotal: f64,

    /// Number of distinct selected services (not total quantity).
    pub unique_service_count: usize,

    /// Discount tier derived from the distinct-service count.
    pub discount_percent: u32,

    /// `subtotal * discount_percent / 100`.
    pub discount_amount: f64,

    /// `subtotal - discount_amount`.
    pub total: f64,

    /// Sum of quantities, for display only.
    pub total_items: u64,
}
