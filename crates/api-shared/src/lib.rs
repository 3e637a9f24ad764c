//! # API Shared
//!
//! Shared utilities and definitions for the registry front ends.
//!
//! Contains:
//! - JSON request/response bodies (`types` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` for request decoding and response encoding.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
