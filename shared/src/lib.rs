//! Shared types and models for the Homelab Dashboard
//!
//! This crate contains the wire types exchanged between the backend and the
//! dashboard frontend, together with the pure rules that apply to them:
//! status classification, service search and partial-update merging.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
