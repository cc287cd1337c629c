//! Built, query-ready view of the configured catalog.

use std::collections::HashMap;

use crate::catalog::types::{ServiceCategory, ServiceOption};

/// Immutable catalog built from configuration.
///
/// The public ordering (category, then ascending price) is computed once at
/// build time so every consumer sees the same stable sequence. A config
/// reload replaces the whole catalog rather than mutating it in place.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    /// Every configured entry, including hidden ones (admin surface).
    all: Vec<ServiceOption>,

    /// Visible, non-excluded entries in public display order.
    visible: Vec<ServiceOption>,

    /// Index into `visible` by service id.
    visible_by_id: HashMap<String, usize>,
}

impl ServiceCatalog {
    /// Build a catalog from configured entries, dropping excluded categories
    /// from the public view.
    pub fn build(entries: Vec<ServiceOption>, excluded: &[ServiceCategory]) -> Self {
        let mut visible: Vec<ServiceOption> = entries
            .iter()
            .filter(|e| e.visible && !excluded.contains(&e.category))
            .cloned()
            .collect();

        visible.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(a.monthly_price.total_cmp(&b.monthly_price))
        });

        let visible_by_id = visible
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();

        Self {
            all: entries,
            visible,
            visible_by_id,
        }
    }

    /// Publicly offered services, ordered by category then ascending price.
    pub fn visible_services(&self) -> &[ServiceOption] {
        &self.visible
    }

    /// Look up a publicly offered service by id.
    ///
    /// Hidden and excluded entries are not found here: builder sessions can
    /// only ever select what the public catalog offers.
    pub fn find_visible(&self, id: &str) -> Option<&ServiceOption> {
        self.visible_by_id.get(id).map(|&i| &self.visible[i])
    }

    /// Every configured entry, including hidden ones.
    pub fn all_services(&self) -> &[ServiceOption] {
        &self.all
    }

    /// Number of publicly offered services per category, in display order.
    pub fn category_counts(&self) -> Vec<(ServiceCategory, usize)> {
        let mut counts: Vec<(ServiceCategory, usize)> = Vec::new();
        for entry in &self.visible {
            match counts.iter_mut().find(|(c, _)| *c == entry.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((entry.category, 1)),
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svc(id: &str, category: ServiceCategory, price: f64, visible: bool) -> ServiceOption {
        ServiceOption {
            id: id.to_string(),
            name: id.to_string(),
            category,
            monthly_price: price,
            description: None,
            image_url: None,
            visible,
        }
    }

    #[test]
    fn test_visible_ordering_category_then_price() {
        let catalog = ServiceCatalog::build(
            vec![
                svc("pr-1", ServiceCategory::PublicRelations, 300.0, true),
                svc("brand-2", ServiceCategory::Branding, 900.0, true),
                svc("brand-1", ServiceCategory::Branding, 250.0, true),
                svc("media-1", ServiceCategory::Media, 100.0, true),
            ],
            &[],
        );

        let ids: Vec<&str> = catalog
            .visible_services()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["brand-1", "brand-2", "media-1", "pr-1"]);
    }

    #[test]
    fn test_hidden_and_excluded_entries_are_not_offered() {
        let catalog = ServiceCatalog::build(
            vec![
                svc("brand-1", ServiceCategory::Branding, 250.0, true),
                svc("hidden", ServiceCategory::Branding, 100.0, false),
                svc("scout-1", ServiceCategory::Scouting, 500.0, true),
            ],
            &[ServiceCategory::Scouting],
        );

        assert_eq!(catalog.visible_services().len(), 1);
        assert!(catalog.find_visible("hidden").is_none());
        assert!(catalog.find_visible("scout-1").is_none());
        assert!(catalog.find_visible("brand-1").is_some());
        // Admin view still sees everything configured.
        assert_eq!(catalog.all_services().len(), 3);
    }

    #[test]
    fn test_category_counts() {
        let catalog = ServiceCatalog::build(
            vec![
                svc("brand-1", ServiceCategory::Branding, 250.0, true),
                svc("brand-2", ServiceCategory::Branding, 400.0, true),
                svc("media-1", ServiceCategory::Media, 100.0, true),
            ],
            &[],
        );

        assert_eq!(
            catalog.category_counts(),
            vec![(ServiceCategory::Branding, 2), (ServiceCategory::Media, 1)]
        );
    }
}
