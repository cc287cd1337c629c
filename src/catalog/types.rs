//! Service catalog types.

use serde::{Deserialize, Serialize};

/// Category a catalog service belongs to.
///
/// Declaration order doubles as display order: the public catalog is sorted
/// by category first, so the variants are listed the way the marketing site
/// presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    /// Brand identity and personal brand development.
    Branding,
    /// Social media management and content production.
    Media,
    /// Press relations and interview coaching.
    PublicRelations,
    /// Scouting reports and performance analytics.
    Scouting,
    /// Contract negotiation and advisory.
    ContractAdvisory,
    /// Sponsorship and partnership sourcing.
    Partnerships,
}

impl ServiceCategory {
    /// Human-readable label used by the admin surfaces and the CLI.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::Branding => "Branding",
            ServiceCategory::Media => "Media",
            ServiceCategory::PublicRelations => "Public Relations",
            ServiceCategory::Scouting => "Scouting",
            ServiceCategory::ContractAdvisory => "Contract Advisory",
            ServiceCategory::Partnerships => "Partnerships",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single catalog entry offered to clients.
///
/// Entries are declared in the configuration file and are immutable once the
/// catalog is built; edits go through a config reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOption {
    /// Unique identifier, referenced by builder sessions and carts.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Category used for grouping and catalog ordering.
    pub category: ServiceCategory,

    /// Monthly unit price. Must be non-negative (checked at config load).
    pub monthly_price: f64,

    /// Optional marketing copy.
    #[serde(default)]
    pub description: Option<String>,

    /// Optional preview image reference.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Hidden entries stay in the catalog but are never offered publicly.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_option_toml_defaults() {
        let entry: ServiceOption = toml::from_str(
            r#"
            id = "social-basic"
            name = "Social Media Management"
            category = "media"
            monthly_price = 450.0
            "#,
        )
        .unwrap();

        assert!(entry.visible);
        assert_eq!(entry.description, None);
        assert_eq!(entry.image_url, None);
        assert_eq!(entry.category, ServiceCategory::Media);
    }

    #[test]
    fn test_category_ordering_matches_declaration() {
        assert!(ServiceCategory::Branding < ServiceCategory::Media);
        assert!(ServiceCategory::Scouting < ServiceCategory::Partnerships);
    }
}
