//! Semantic configuration validation.
//!
//! Serde handles the syntactic layer; these checks catch configs that parse
//! but cannot run. All errors are collected and reported together rather
//! than failing on the first one.

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a parsed config.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("catalog service with a blank id")]
    BlankServiceId,

    #[error("duplicate catalog service id '{0}'")]
    DuplicateServiceId(String),

    #[error("service '{id}' has invalid monthly_price {price}")]
    InvalidPrice { id: String, price: f64 },

    #[error("{field} is not a valid socket address: '{value}'")]
    InvalidBindAddress { field: &'static str, value: String },

    #[error("admin API is enabled but api_key is blank")]
    BlankAdminKey,
}

/// Validate a parsed configuration, returning every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidBindAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut seen = HashSet::new();
    for service in &config.catalog.services {
        if service.id.trim().is_empty() {
            errors.push(ValidationError::BlankServiceId);
        } else if !seen.insert(service.id.as_str()) {
            errors.push(ValidationError::DuplicateServiceId(service.id.clone()));
        }

        if !service.monthly_price.is_finite() || service.monthly_price < 0.0 {
            errors.push(ValidationError::InvalidPrice {
                id: service.id.clone(),
                price: service.monthly_price,
            });
        }
    }

    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::BlankAdminKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ServiceCategory, ServiceOption};

    fn svc(id: &str, price: f64) -> ServiceOption {
        ServiceOption {
            id: id.to_string(),
            name: id.to_string(),
            category: ServiceCategory::Media,
            monthly_price: price,
            description: None,
            image_url: None,
            visible: true,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.catalog.services = vec![svc("a", 10.0), svc("a", 20.0), svc("b", -5.0)];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::DuplicateServiceId("a".to_string())));
        assert!(errors.contains(&ValidationError::InvalidPrice {
            id: "b".to_string(),
            price: -5.0
        }));
    }

    #[test]
    fn test_blank_admin_key_rejected_only_when_enabled() {
        let mut config = AppConfig::default();
        config.admin.api_key = "  ".to_string();
        assert!(validate_config(&config).is_ok());

        config.admin.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::BlankAdminKey]);
    }

    #[test]
    fn test_nan_price_rejected() {
        let mut config = AppConfig::default();
        config.catalog.services = vec![svc("a", f64::NAN)];
        assert!(validate_config(&config).is_err());
    }
}
