//! Cross-market listing reconciliation engine.
//!
//! Aggregates listing, pricing and corporate-action data scraped from three
//! structurally unrelated exchanges (BME, Euronext and the Portfolio micro
//! exchange) and reconciles each raw product record into one canonical
//! [`models::ProcessedProduct`] used for cross-market reporting.
//!
//! The engine is pure: the fetch layer hands it already-parsed raw records
//! and it produces plain serializable outputs. The only storage touchpoint
//! is the read-only [`services::CorporateActionsStore`] snapshot needed for
//! the BME Growth segment.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;

pub use config::ProcessingConfig;
pub use error::{AppError, Result};
