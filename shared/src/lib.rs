//! Shared types and models for the Price Tracker platform
//!
//! This crate contains the domain models and the pure pricing rules shared
//! between the backend, the admin UI (via WASM), and the import pipeline.

pub mod models;
pub mod pricing;
pub mod types;
pub mod validation;

pub use models::*;
pub use pricing::*;
pub use types::*;
pub use validation::*;
