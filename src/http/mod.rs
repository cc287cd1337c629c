//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! client request
//!     → server.rs (Axum setup, middleware, shared state)
//!     → handlers.rs (catalog read, session mutation, checkout)
//!     → builder core (reducer + pricing, synchronous)
//!     → JSON response (monetary values rounded for display)
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
