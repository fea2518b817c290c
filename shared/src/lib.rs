//! Shared types and models for the crop advisor
//!
//! This crate contains the yield rule engine and the field insight
//! derivation, shared between the backend and the frontend (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
