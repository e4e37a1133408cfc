//! Shared types for the FTX REST API
//!
//! This crate provides the core type definitions used across the ftx crates.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Method`], [`Scope`] - Request verb and authentication scope
//! - [`Query`] - Ordered request parameters, shared by URL building and signing
//! - [`Resolution`], [`Chain`], [`FillsOrder`], [`Depth`] - Validated parameters
//! - [`Side`], [`OrderType`], [`TriggerType`] - Order enums
//! - [`ArgumentError`] - Caller-side parameter violations

pub mod constants;
pub mod enums;
pub mod error;
pub mod query;

// Re-export commonly used types
pub use enums::*;
pub use error::*;
pub use query::*;
