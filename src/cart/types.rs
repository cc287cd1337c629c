//! Cart line-item types.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::builder::{round_to_cents, PricingResult, SelectionState};

/// A customised package committed from a builder session.
///
/// This is the single opaque line item the builder hands to the cart: the
/// computed total, a human-readable manifest, and a preview image. The
/// pricing engine has no further responsibility once it is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageItem {
    /// Line-item identifier.
    pub id: Uuid,

    /// Synthesized display name, e.g. `"Custom Package (3 services)"`.
    pub name: String,

    /// Final price, rounded to cents at commit time.
    pub price: f64,

    /// `"name ×qty"` segments in selection order.
    pub manifest: String,

    /// Preview image carried over from the builder session.
    pub image_url: Option<String>,

    /// Commit timestamp (seconds since epoch).
    pub created_at: u64,
}

impl PackageItem {
    /// Synthesize a package from a selection and its freshly computed price.
    pub fn from_selection(selection: &SelectionState, pricing: &PricingResult) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            id: Uuid::new_v4(),
            name: format!(
                "Custom Package ({} service{})",
                pricing.unique_service_count,
                if pricing.unique_service_count == 1 { "" } else { "s" }
            ),
            price: round_to_cents(pricing.total),
            manifest: selection.manifest(),
            image_url: selection.preview_image().map(str::to_owned),
            created_at: now,
        }
    }
}
