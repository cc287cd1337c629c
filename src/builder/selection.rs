//! Selection state for one builder session.

use serde::{Deserialize, Serialize};

use crate::builder::types::SelectionEntry;
use crate::catalog::ServiceOption;

/// The services a client has picked while customising a package.
///
/// Entries keep insertion order, which is the order the manifest lists them
/// in. Invariant: an entry exists for a service id iff its quantity is at
/// least 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    entries: Vec<SelectionEntry>,

    /// Image of the most recently added service that carries one. Purely a
    /// display pointer; it survives removal of the service it came from.
    preview_image: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn preview_image(&self) -> Option<&str> {
        self.preview_image.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, service_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.service_id == service_id)
    }

    /// Flip a service on or off.
    ///
    /// Not selected: insert with quantity 1 and point the preview image at
    /// the service if it has one. Already selected: remove the entry
    /// entirely, regardless of its quantity (toggling is an on/off action,
    /// distinct from quantity decrement).
    pub fn toggle(&mut self, service: &ServiceOption) {
        match self.position(&service.id) {
            Some(pos) => {
                self.entries.remove(pos);
            }
            None => {
                self.entries.push(SelectionEntry {
                    service_id: service.id.clone(),
                    name: service.name.clone(),
                    unit_price: service.monthly_price,
                    quantity: 1,
                    image_url: service.image_url.clone(),
                });
                if service.image_url.is_some() {
                    self.preview_image = service.image_url.clone();
                }
            }
        }
    }

    /// Adjust the quantity of an already-selected service by `delta`.
    ///
    /// The UI only ever sends ±1, but any integer works. A result of zero or
    /// below removes the entry. Adjusting a service that is not selected is
    /// a silent no-op: this is client-local state and there is nothing
    /// useful to report.
    pub fn adjust_quantity(&mut self, service_id: &str, delta: i64) {
        let Some(pos) = self.position(service_id) else {
            return;
        };
        let next = i64::from(self.entries[pos].quantity).saturating_add(delta);
        if next <= 0 {
            self.entries.remove(pos);
        } else {
            self.entries[pos].quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    /// Empty the selection unconditionally.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.preview_image = None;
    }

    /// Human-readable listing of the selection, one `"name ×qty"` segment
    /// per entry in the order they were added.
    pub fn manifest(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} ×{}", e.name, e.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
