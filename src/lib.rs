//! Sports-agency package builder service library.

pub mod admin;
pub mod builder;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use builder::{PricingResult, SelectionState, SessionStore};
pub use catalog::{ServiceCatalog, ServiceCategory, ServiceOption};
pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
